mod aggregate;
mod config;
mod scale;
mod stack;

pub use aggregate::{aggregate, aggregate_filtered, AggregatedBucket};
pub use config::{ChartConfig, Margin};
pub use scale::{BandScale, LinearScale};
pub use stack::{stack, Series, StackedInterval};

use std::ops::Range;

use log::debug;
use plotters::{
    coord::Shift,
    drawing::DrawingAreaErrorKind,
    prelude::*,
    style::{
        text_anchor::{HPos, Pos, VPos},
        FontStyle, FontTransform, TextStyle,
    },
};
use serde::{Deserialize, Serialize};

const FONT: &str = "sans-serif";
const TICK_SIZE: i32 = 6;
const LEGEND_SWATCH: i32 = 15;
const LEGEND_TEXT_OFFSET: i32 = 20;

/// Where one bar ended up on the surface, in surface coordinates. This is what hover
/// tooltips are positioned from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BarRegion {
    pub age: String,
    pub series: Series,
    /// The series' own amount for this age group.
    pub value: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BarRegion {
    pub fn tooltip_lines(&self) -> [(&'static str, String); 3] {
        [
            ("Age", self.age.clone()),
            ("Gender", self.series.name().to_string()),
            ("Total Purchase", self.value.to_string()),
        ]
    }
}

pub struct ChartScales {
    pub x: BandScale,
    pub y: LinearScale,
}

impl ChartScales {
    /// Value range handed to the chart coordinates. A zero width domain is widened
    /// around its value so it still lands in the middle of the plot.
    fn y_range(&self) -> Range<f64> {
        match self.y.domain() {
            (d0, d1) if !(d0.is_finite() && d1.is_finite()) => 0.0..1.0,
            (d0, d1) if d0 == d1 => d0 - 1.0..d0 + 1.0,
            (d0, d1) => d0.min(d1)..d0.max(d1),
        }
    }
}

/// Band scale over the bucket ages and a nice linear scale from zero to the tallest
/// stack. NaN totals are ignored when looking for the tallest stack.
pub fn build_scales(config: &ChartConfig, buckets: &[AggregatedBucket]) -> ChartScales {
    let x = BandScale::new(
        buckets.iter().map(|b| b.age.clone()).collect(),
        (0.0, config.inner_width()),
        config.band_padding,
    );
    let max = buckets
        .iter()
        .map(AggregatedBucket::total)
        .filter(|total| !total.is_nan())
        .fold(None, |max: Option<f64>, total| {
            Some(max.map_or(total, |m| m.max(total)))
        })
        .unwrap_or(0.0);
    let y = LinearScale::new((0.0, max), (config.inner_height(), 0.0)).nice(config.tick_count);
    ChartScales { x, y }
}

/// One stacked segment with its band offset inside the plot area.
struct StackedBar<'b> {
    age: &'b str,
    x: f64,
    interval: StackedInterval,
}

/// Bars whose geometry isn't finite are left out since there is nothing sensible to
/// draw for them.
fn stacked_bars<'b>(buckets: &'b [AggregatedBucket], scales: &ChartScales) -> Vec<StackedBar<'b>> {
    let mut bars = Vec::with_capacity(buckets.len() * Series::STACK_ORDER.len());
    for bucket in buckets {
        let Some(x) = scales.x.position(&bucket.age) else {
            continue;
        };
        for interval in stack(bucket) {
            let drawable = [
                x,
                scales.x.bandwidth(),
                scales.y.map(interval.top),
                scales.y.map(interval.bottom),
            ]
            .iter()
            .all(|v| v.is_finite());
            if drawable {
                bars.push(StackedBar {
                    age: &bucket.age,
                    x,
                    interval,
                });
            }
        }
    }
    bars
}

/// Lays out one rectangle per bucket and series, in surface coordinates.
pub fn bar_regions(
    config: &ChartConfig,
    buckets: &[AggregatedBucket],
    scales: &ChartScales,
) -> Vec<BarRegion> {
    let (ox, oy) = (config.margin.left as f64, config.margin.top as f64);
    stacked_bars(buckets, scales)
        .into_iter()
        .map(|bar| {
            let top = scales.y.map(bar.interval.top);
            let bottom = scales.y.map(bar.interval.bottom);
            BarRegion {
                age: bar.age.to_string(),
                series: bar.interval.series,
                value: bar.interval.value(),
                x: ox + bar.x,
                y: oy + top,
                width: scales.x.bandwidth(),
                height: bottom - top,
            }
        })
        .collect()
}

fn text_style<'a>(size: f64, h_pos: HPos, v_pos: VPos) -> TextStyle<'a> {
    (FONT, size)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(h_pos, v_pos))
}

type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

fn draw_titles<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    config: &ChartConfig,
) -> DrawResult<DB> {
    let center = config.width as i32 / 2;
    root.draw(&Text::new(
        config.title.clone(),
        (center, 30),
        (FONT, 18.0)
            .into_font()
            .style(FontStyle::Bold)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;
    root.draw(&Text::new(
        config.x_label.clone(),
        (center, config.height as i32 - 20),
        text_style(14.0, HPos::Center, VPos::Bottom),
    ))?;
    // rotated a quarter turn counter clockwise, reading bottom to top
    root.draw(&Text::new(
        config.y_label.clone(),
        (20, config.height as i32 / 2),
        (FONT, 14.0)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Bottom)),
    ))?;
    Ok(())
}

/// Draws the whole stacked bar chart onto `backend` and returns where each bar landed.
/// Every call paints a complete chart; nothing carries over between calls.
///
/// The plot area is laid out by the margins: the bottom and left margins become the
/// label areas of the two axes. The x coordinate is the band scale's pixel offset, with
/// a key point at every band center, and the y coordinate is the nice value domain
/// with a key point at every tick.
pub fn draw_stacked_bar_chart<'a, DB>(
    backend: DB,
    config: &ChartConfig,
    buckets: &[AggregatedBucket],
) -> Result<Vec<BarRegion>, Box<dyn std::error::Error + Send + Sync + 'a>>
where
    DB: 'a + DrawingBackend,
{
    let root = backend.into_drawing_area();
    let scales = build_scales(config, buckets);
    let bars = stacked_bars(buckets, &scales);
    debug!(
        "drawing {} buckets as {} bars, value domain {:?}",
        buckets.len(),
        bars.len(),
        scales.y.domain()
    );

    let centers: Vec<f64> = scales.x.centers().map(|(_, x)| x).collect();
    let ticks = scales.y.ticks(config.tick_count);
    let mut chart = ChartBuilder::on(&root)
        .margin_top(config.margin.top)
        .margin_right(config.margin.right)
        .x_label_area_size(config.margin.bottom)
        .y_label_area_size(config.margin.left)
        .build_cartesian_2d(
            (0.0..config.inner_width()).with_key_points(centers),
            scales.y_range().with_key_points(ticks),
        )?;

    let x_label = |x: &f64| scales.x.label_at(*x).unwrap_or_default().to_string();
    let y_label = |y: &f64| scales.y.tick_label(*y, config.tick_count);
    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(BLACK.stroke_width(1))
        .set_all_tick_mark_size(TICK_SIZE)
        .x_label_style((FONT, 10.0).into_font())
        .y_label_style((FONT, 10.0).into_font())
        .x_label_formatter(&x_label)
        .y_label_formatter(&y_label)
        .draw()?;

    let bandwidth = scales.x.bandwidth();
    for series in Series::STACK_ORDER {
        let color = series.color();
        chart
            .draw_series(
                bars.iter()
                    .filter(|bar| bar.interval.series == series)
                    .map(|bar| {
                        Rectangle::new(
                            [
                                (bar.x, bar.interval.top),
                                (bar.x + bandwidth, bar.interval.bottom),
                            ],
                            color.filled(),
                        )
                    }),
            )?
            .label(series.name())
            .legend(move |(x, y)| {
                Rectangle::new(
                    [
                        (x, y - LEGEND_SWATCH / 2),
                        (x + LEGEND_SWATCH, y + LEGEND_SWATCH - LEGEND_SWATCH / 2),
                    ],
                    color.filled(),
                )
            });
    }

    // the legend sits at (width - 150, margin.top) on the surface
    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::Coordinate(
            config.width as i32 - 150 - config.margin.left as i32,
            0,
        ))
        .margin(0)
        .legend_area_size(LEGEND_TEXT_OFFSET)
        .label_font((FONT, 12.0).into_font())
        .draw()?;

    draw_titles(&root, config)?;

    // To avoid the IO failure being ignored silently, we manually call the present function
    root.present()?;
    Ok(bar_regions(config, buckets, &scales))
}
