use anyhow::{anyhow, Result};
use plotters_svg::SVGBackend;
use purchase_charts::{draw_stacked_bar_chart, AggregatedBucket, BarRegion, ChartConfig};

/// A standalone svg document plus the bar geometry needed to lay tooltips over it.
#[derive(Clone, Debug)]
pub struct RenderedChart {
    pub svg: String,
    pub bars: Vec<BarRegion>,
}

pub fn render_chart(buckets: &[AggregatedBucket], config: &ChartConfig) -> Result<RenderedChart> {
    let mut buffer = String::new();
    let bars = {
        let backend = SVGBackend::with_string(&mut buffer, (config.width, config.height));
        draw_stacked_bar_chart(backend, config, buckets)
            .map_err(|e| anyhow!("Failed to draw chart: {}", e))?
    };
    Ok(RenderedChart { svg: buffer, bars })
}
