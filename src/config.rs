use clap::Parser;
use tracing::Level;

/// Default cap for a single request frame, the same as the largest string value.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 512 * 1024 * 1024;

#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Config {
    /// The address to listen on
    #[arg(short, long, env = "RUSTDIS_BIND", default_value = "127.0.0.1")]
    pub bind: String,

    /// The port to listen on
    #[arg(short, long, env = "RUSTDIS_PORT", default_value_t = 6379)]
    pub port: u16,

    /// How many commands a transaction may queue before it is discarded
    #[arg(long, env = "RUSTDIS_MAX_QUEUED_COMMANDS", default_value_t = 100)]
    pub max_queued_commands: usize,

    /// The largest request frame accepted, in bytes
    #[arg(long, env = "RUSTDIS_MAX_FRAME_SIZE", default_value_t = DEFAULT_MAX_FRAME_SIZE)]
    pub max_frame_size: usize,

    /// Maximum level of the log output
    #[arg(long, env = "RUSTDIS_LOG_LEVEL", default_value_t = Level::INFO)]
    pub log_level: Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind: "127.0.0.1".to_string(),
            port: 6379,
            max_queued_commands: 100,
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            log_level: Level::INFO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let config = Config::try_parse_from([
            "rustdis",
            "--port",
            "7000",
            "--max-queued-commands",
            "10",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.port, 7000);
        assert_eq!(config.max_queued_commands, 10);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.max_frame_size, DEFAULT_MAX_FRAME_SIZE);
    }
}
