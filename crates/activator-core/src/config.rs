use activator_utils::parse_flag;
use std::env;

/// Runtime options for an [`Activator`](crate::Activator).
///
/// ## Environment Variables
///
/// - `ACTIVATOR_RS_METRICS`: Enable cache hit/miss/build counters
///   (`"1"`, `"true"`, `"yes"`, `"on"` or their negations; default: enabled)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActivatorConfig {
    pub collect_metrics: bool,
}

impl ActivatorConfig {
    pub const METRICS_ENV: &'static str = "ACTIVATOR_RS_METRICS";

    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(value) = env::var(Self::METRICS_ENV) {
            match parse_flag(&value) {
                Some(enabled) => config.collect_metrics = enabled,
                None => tracing::warn!(
                    "ignoring unrecognised {}={:?}",
                    Self::METRICS_ENV,
                    value
                ),
            }
        }
        config
    }
}

impl Default for ActivatorConfig {
    fn default() -> Self {
        Self {
            collect_metrics: true,
        }
    }
}
