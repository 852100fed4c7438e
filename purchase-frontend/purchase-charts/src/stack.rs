use std::fmt::Display;

use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

use crate::AggregatedBucket;

/// The two stacked series, bottom first.
#[derive(Hash, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    Male,
    Female,
}

impl Series {
    pub const STACK_ORDER: [Series; 2] = [Series::Male, Series::Female];

    pub fn name(&self) -> &'static str {
        match self {
            Series::Male => "Male",
            Series::Female => "Female",
        }
    }

    pub fn color(&self) -> RGBColor {
        match self {
            Series::Male => RGBColor(0x1f, 0x77, 0xb4),
            Series::Female => RGBColor(0xff, 0x7f, 0x0e),
        }
    }

    /// Same color as a css hex string, for markup drawn outside the chart.
    pub fn css_color(&self) -> String {
        let RGBColor(r, g, b) = self.color();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl Display for Series {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StackedInterval {
    pub series: Series,
    pub bottom: f64,
    pub top: f64,
}

impl StackedInterval {
    /// The series' own amount, not the cumulative height.
    pub fn value(&self) -> f64 {
        self.top - self.bottom
    }
}

/// Stacks one bucket's series in [`Series::STACK_ORDER`]. Each series starts where the
/// previous one ended; a NaN top hands its bottom through instead.
pub fn stack(bucket: &AggregatedBucket) -> [StackedInterval; 2] {
    let mut offset = 0.0;
    Series::STACK_ORDER.map(|series| {
        let bottom = offset;
        let top = bottom + bucket.value(series);
        if !top.is_nan() {
            offset = top;
        }
        StackedInterval {
            series,
            bottom,
            top,
        }
    })
}
