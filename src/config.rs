//! Configuration and CLI argument handling

use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "ticktock")]
#[command(about = "A state-managed HTTP countdown timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Hours component of an initial countdown duration
    #[arg(long, default_value = "0")]
    pub hours: u64,

    /// Minutes component of an initial countdown duration
    #[arg(long, default_value = "0")]
    pub minutes: u64,

    /// Seconds component of an initial countdown duration
    #[arg(long, default_value = "0")]
    pub seconds: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Initial countdown duration in seconds, if any was given
    pub fn initial_duration(&self) -> Option<(u64, u64, u64)> {
        if self.hours > 0 || self.minutes > 0 || self.seconds > 0 {
            Some((self.hours, self.minutes, self.seconds))
        } else {
            None
        }
    }
}
