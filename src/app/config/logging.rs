//! Log output settings.

use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};

/// How log lines are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines for an attended terminal.
    #[default]
    Pretty,
    /// One JSON object per line, for log shipping.
    Json,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or
    /// `rampscout=debug,reqwest=warn`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

impl LoggingConfig {
    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level))
    }

    /// Install the global subscriber. A second call is a no-op.
    pub fn init(&self) {
        let builder = fmt().with_env_filter(self.filter());
        let installed = match self.format {
            LogFormat::Json => builder.json().with_current_span(false).try_init(),
            LogFormat::Pretty => builder.with_target(false).try_init(),
        };
        if installed.is_err() {
            tracing::debug!("Logging already initialised");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        logging: LoggingConfig,
    }

    #[test]
    fn parses_json_format() {
        let parsed: Wrapper = toml::from_str("[logging]\nformat = \"json\"\n").unwrap();
        assert_eq!(parsed.logging.format, LogFormat::Json);
        assert_eq!(parsed.logging.level, "info");
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(toml::from_str::<Wrapper>("[logging]\nformat = \"xml\"\n").is_err());
    }
}
