mod config;
mod web;

use std::sync::Arc;

use anyhow::Result;
use purchase_dataset::Dataset;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::web::{filter::FilterOptions, WebState};

fn load_dataset(config: &Config) -> Result<Dataset> {
    Ok(match &config.dataset_path {
        Some(path) => Dataset::load(path)?,
        None => {
            info!("PURCHASE_DATASET not set, using the embedded sample");
            purchase_dataset::embedded()?.clone()
        }
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let config = Config::from_env()?;
    // records are read once here and never touched again
    let dataset = load_dataset(&config)?;
    info!("{} purchase records ready", dataset.len());
    let web_state = WebState {
        filter_options: Arc::new(FilterOptions::from_dataset(&dataset)),
        dataset: Arc::new(dataset),
        chart_config: Arc::new(config.chart.clone()),
    };
    web::start_web(web_state, config.port).await
}
