//! Configuration loading for the monitor

use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Where key events come from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// JSON lines on standard input
    #[default]
    Stdin,
    /// The platform's session-wide key event tap
    Native,
}

impl FromStr for SourceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stdin" => Ok(Self::Stdin),
            "native" => Ok(Self::Native),
            other => bail!("unknown event source {other:?} (expected \"stdin\" or \"native\")"),
        }
    }
}

/// Monitor configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Source of host key events
    pub source: SourceKind,

    /// Capacity of the channel between the source and the dispatcher
    pub channel_capacity: usize,

    /// Also report events whose target is a text-entry element
    pub monitor_form_fields: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: SourceKind::Stdin,
            channel_capacity: 32,
            monitor_form_fields: true,
        }
    }
}

impl Config {
    /// Load configuration from the environment and defaults
    pub fn load() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(source) = lookup("SHORTKEY_SOURCE") {
            config.source = source.parse().context("invalid SHORTKEY_SOURCE")?;
        }

        if let Some(capacity) = lookup("SHORTKEY_CHANNEL_CAPACITY") {
            config.channel_capacity = capacity
                .trim()
                .parse()
                .context("invalid SHORTKEY_CHANNEL_CAPACITY")?;
            if config.channel_capacity == 0 {
                bail!("SHORTKEY_CHANNEL_CAPACITY must be positive");
            }
        }

        if let Some(flag) = lookup("SHORTKEY_MONITOR_FORM_FIELDS") {
            config.monitor_form_fields = flag
                .trim()
                .parse()
                .context("invalid SHORTKEY_MONITOR_FORM_FIELDS")?;
        }

        Ok(config)
    }
}
