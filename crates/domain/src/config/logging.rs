use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log every received question and every upstream answer record.
    #[serde(default)]
    pub diagnostics: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            diagnostics: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
