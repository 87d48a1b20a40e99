//! Log setup for the terminal client.
//!
//! Logs go to stderr so they never interleave with prompts on stdout.
//! `VOCAB_STUDY_LOG` takes an `EnvFilter` directive (default `warn`) and
//! `VOCAB_STUDY_LOG_FORMAT` one of `text`, `json` or `pretty`.

use std::str::FromStr;

use tracing_subscriber::EnvFilter;

pub const LOG_FILTER_ENV: &str = "VOCAB_STUDY_LOG";
pub const LOG_FORMAT_ENV: &str = "VOCAB_STUDY_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            _ => Err(format!(
                "Invalid log format: '{}'. Valid options: text, json, pretty",
                s
            )),
        }
    }
}

pub fn init(format: LogFormat, directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    let result = match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .flatten_event(true)
            .with_target(true)
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .pretty()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init(),
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init(),
    };
    // a subscriber installed earlier (tests, embedding) stays in charge
    let _ = result;
}

pub fn init_from_env() {
    let format = std::env::var(LOG_FORMAT_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default();
    let directive = std::env::var(LOG_FILTER_ENV).unwrap_or_else(|_| "warn".to_string());
    init(format, &directive);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_from_str() {
        assert_eq!("text".parse::<LogFormat>().unwrap(), LogFormat::Text);
        assert_eq!("JSON".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);

        let result = "xml".parse::<LogFormat>();
        assert!(result.unwrap_err().contains("Invalid log format: 'xml'"));
    }

    #[test]
    fn test_init_twice_does_not_panic() {
        init(LogFormat::Text, "debug");
        init(LogFormat::Json, "not a [valid directive");
    }
}
