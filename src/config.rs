use anyhow::{anyhow, Result};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::game::{RandomAi, DEFAULT_AI_DELAY_MS};

const MAX_AI_DELAY_MS: u64 = 10_000;

#[derive(Parser, Debug, Clone)]
#[command(name = "tic_tac_toe_vs_ai")]
#[command(about = "Tic-Tac-Toe against a random computer opponent")]
pub struct Config {
    /// Delay before the AI answers, in milliseconds
    #[arg(long, env = "TTT_AI_DELAY_MS", default_value_t = DEFAULT_AI_DELAY_MS)]
    pub ai_delay_ms: u64,

    /// Fixed seed for the AI's random choices
    #[arg(long, env = "TTT_SEED")]
    pub seed: Option<u64>,

    /// Log filter (trace, debug, info, warn, error or a full directive)
    #[arg(long, env = "TTT_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if self.ai_delay_ms > MAX_AI_DELAY_MS {
            return Err(anyhow!(
                "ai_delay_ms must be at most {MAX_AI_DELAY_MS}, got {}",
                self.ai_delay_ms
            ));
        }

        self.env_filter()?;

        Ok(())
    }

    pub fn ai_delay(&self) -> Duration {
        Duration::from_millis(self.ai_delay_ms)
    }

    pub fn env_filter(&self) -> Result<EnvFilter> {
        EnvFilter::try_new(&self.log_level)
            .map_err(|e| anyhow!("invalid log_level '{}': {}", self.log_level, e))
    }

    pub fn ai(&self) -> RandomAi {
        match self.seed {
            Some(seed) => RandomAi::seeded(seed),
            None => RandomAi::from_entropy(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["tic_tac_toe_vs_ai"]).unwrap();

        assert_eq!(config.ai_delay(), Duration::from_millis(500));
        assert_eq!(config.seed, None);
        assert_eq!(config.log_level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "tic_tac_toe_vs_ai",
            "--ai-delay-ms",
            "0",
            "--seed",
            "9",
            "--log-level",
            "tic_tac_toe_vs_ai=debug",
        ])
        .unwrap();

        assert_eq!(config.ai_delay(), Duration::ZERO);
        assert_eq!(config.seed, Some(9));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_long_delay() {
        let config =
            Config::try_parse_from(["tic_tac_toe_vs_ai", "--ai-delay-ms", "60000"]).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_log_filter() {
        let config = Config::try_parse_from([
            "tic_tac_toe_vs_ai",
            "--log-level",
            "tic_tac_toe_vs_ai=loud",
        ])
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_seeded_ai_is_reproducible() {
        let config = Config::try_parse_from(["tic_tac_toe_vs_ai", "--seed", "5"]).unwrap();
        let board = [None; 9];

        let mut first = config.ai();
        let mut second = config.ai();
        assert_eq!(first.choose(&board), second.choose(&board));
    }
}
