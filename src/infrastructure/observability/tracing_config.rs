use crate::presentation::config::{Environment, LogFormat, LoggingSettings};

/// How the global subscriber renders and filters events.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    pub environment: Environment,
    pub json_format: bool,
    pub filter: String,
}

impl TracingConfig {
    pub fn from_settings(environment: Environment, logging: &LoggingSettings) -> Self {
        Self {
            environment,
            json_format: logging.format == LogFormat::Json,
            filter: logging.filter.clone(),
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_settings(Environment::default(), &LoggingSettings::default())
    }
}
