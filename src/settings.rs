use serde::{Deserialize, Serialize};

fn default_listen_addr() -> String {
    "127.0.0.1:7765".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    /// Address the watcher signal socket binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// When enabled the application initialises the logger at debug level.
    /// Defaults to `false` when the field is missing in the settings file.
    #[serde(default)]
    pub debug_logging: bool,
    /// Directory the log file is written to.
    #[serde(default = "default_log_dir")]
    pub log_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            debug_logging: false,
            log_dir: default_log_dir(),
        }
    }
}

impl Settings {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path).unwrap_or_default();
        if content.is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
