use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use streamfeed::activity::parse_time;
use streamfeed::{Clock, FixedClock, SystemClock};

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct Config {
    pub(crate) codec: CodecConfig,
    pub(crate) output: OutputConfig,
    pub(crate) log: LogConfig,
}

#[derive(Clone, Default, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct CodecConfig {
    /// Wire-format time stamped on activities without one, instead of now.
    pub(crate) fixed_time: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct OutputConfig {
    pub(crate) pretty: bool,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub(crate) struct LogConfig {
    pub(crate) level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    pub(crate) fn load(path: &Path) -> Result<Config> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("unable to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("unable to parse config {}", path.display()))
    }
}

impl CodecConfig {
    pub(crate) fn clock(&self) -> Result<Box<dyn Clock>> {
        match &self.fixed_time {
            Some(text) => {
                let time = parse_time(text)
                    .ok_or_else(|| anyhow!("codec.fixed_time {text:?} is not a wire time"))?;
                Ok(Box::new(FixedClock(time)))
            }
            None => Ok(Box::new(SystemClock)),
        }
    }
}
