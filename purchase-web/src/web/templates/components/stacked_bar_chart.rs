use maud::{html, PreEscaped, Render};
use purchase_charts::BarRegion;
use purchase_charts_html::RenderedChart;

/// The drawn svg with an invisible box laid over every bar. Hovering a box fades in
/// its tooltip; the fade itself lives in main.css.
pub(crate) struct StackedBarChart<'a> {
    pub(crate) chart: &'a RenderedChart,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

struct BarTooltip<'a>(&'a BarRegion);

impl<'a> Render for BarTooltip<'a> {
    fn render(&self) -> maud::Markup {
        let bar = self.0;
        html! {
            div class="bar-hit" style=(format!(
                "left: {:.1}px; top: {:.1}px; width: {:.1}px; height: {:.1}px",
                bar.x, bar.y, bar.width, bar.height
            )) {
                div class="tooltip" style=(format!("border-left: 4px solid {}", bar.series.css_color())) {
                    @for (i, (name, value)) in bar.tooltip_lines().into_iter().enumerate() {
                        @if i > 0 {
                            br;
                        }
                        strong { (name) ":" }
                        " " (value)
                    }
                }
            }
        }
    }
}

impl<'a> Render for StackedBarChart<'a> {
    fn render(&self) -> maud::Markup {
        html! {
            div id="chart" class="chart" style=(format!("width: {}px; height: {}px", self.width, self.height)) {
                (PreEscaped(&self.chart.svg))
                @for bar in &self.chart.bars {
                    (BarTooltip(bar))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use purchase_charts::Series;

    use super::*;

    #[test]
    fn test_tooltip_markup() {
        let chart = RenderedChart {
            svg: "<svg></svg>".to_string(),
            bars: vec![BarRegion {
                age: "18-25".to_string(),
                series: Series::Female,
                value: 50.0,
                x: 100.0,
                y: 80.5,
                width: 75.0,
                height: 20.0,
            }],
        };
        let markup = StackedBarChart {
            chart: &chart,
            width: 900,
            height: 550,
        }
        .render()
        .into_string();
        assert!(markup.contains("<svg></svg>"));
        assert!(markup.contains("left: 100.0px; top: 80.5px; width: 75.0px; height: 20.0px"));
        assert!(markup.contains("border-left: 4px solid #ff7f0e"));
        assert!(markup.contains("<strong>Age:</strong> 18-25<br><strong>Gender:</strong> Female<br><strong>Total Purchase:</strong> 50"));
    }
}
