use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
pub const DEFAULT_REFERER: &str = "https://www.bilibili.com/";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ClientConfig {
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
    pub referer: String,
    /// extra headers sent with every request
    pub headers: Vec<(String, String)>,
    /// session cookies in `Cookie` header form: `SESSDATA=...; bili_jct=...`
    pub cookies: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout_secs: 20,
            connect_timeout_secs: 10,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer: DEFAULT_REFERER.to_string(),
            headers: Vec::new(),
            cookies: None,
        }
    }
}

impl ClientConfig {
    pub async fn load(path: &str) -> Result<Self, LoadConfigError> {
        let data = tokio::fs::read_to_string(path).await?;
        Self::from_toml_str(&data)
    }

    pub fn from_toml_str(data: &str) -> Result<Self, LoadConfigError> {
        Ok(toml::from_str(data)?)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}

#[derive(Debug)]
pub enum LoadConfigError {
    IoError(std::io::Error),
    ParseError(toml::de::Error),
}

impl From<std::io::Error> for LoadConfigError {
    fn from(e: std::io::Error) -> Self {
        LoadConfigError::IoError(e)
    }
}

impl From<toml::de::Error> for LoadConfigError {
    fn from(e: toml::de::Error) -> Self {
        LoadConfigError::ParseError(e)
    }
}

impl std::fmt::Display for LoadConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for LoadConfigError {}
