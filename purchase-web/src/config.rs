use std::path::PathBuf;

use anyhow::{Context, Result};
use purchase_charts::ChartConfig;
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;

/// Settings read from the environment at startup.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Config {
    pub(crate) port: u16,
    /// `None` serves the sample table compiled into the binary.
    pub(crate) dataset_path: Option<PathBuf>,
    pub(crate) chart: ChartConfig,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(port) => port.parse::<u16>().unwrap_or_else(|e| {
                warn!("ignoring PORT={port}: {e}, using {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };
        let chart = ChartConfig::default();
        let size = |key: &str, default: u32| -> Result<u32> {
            match lookup(key) {
                Some(value) => value
                    .parse()
                    .with_context(|| format!("{key}={value} is not a size")),
                None => Ok(default),
            }
        };
        let width = size("CHART_WIDTH", chart.width)?;
        let height = size("CHART_HEIGHT", chart.height)?;
        let chart = chart.with_size(width, height);
        Ok(Self {
            port,
            dataset_path: lookup("PURCHASE_DATASET")
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            chart,
        })
    }
}
