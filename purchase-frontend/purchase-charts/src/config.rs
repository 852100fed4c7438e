use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

/// Everything about the drawing surface that used to live in module globals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub margin: Margin,
    /// Fraction of each band step left empty, between bars and at the edges.
    pub band_padding: f64,
    /// Approximate number of ticks on the value axis.
    pub tick_count: usize,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 550,
            margin: Margin {
                top: 80,
                right: 30,
                bottom: 70,
                left: 80,
            },
            band_padding: 0.2,
            tick_count: 10,
            title: "Total Purchase by Age Group (stacked by Gender)".to_string(),
            x_label: "Age".to_string(),
            y_label: "Purchase".to_string(),
        }
    }
}

impl ChartConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn inner_width(&self) -> f64 {
        self.width as f64 - self.margin.left as f64 - self.margin.right as f64
    }

    pub fn inner_height(&self) -> f64 {
        self.height as f64 - self.margin.top as f64 - self.margin.bottom as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_size() {
        let config = ChartConfig::default();
        assert_eq!(config.inner_width(), 790.0);
        assert_eq!(config.inner_height(), 400.0);
        let config = config.with_size(600, 300);
        assert_eq!(config.inner_width(), 490.0);
        assert_eq!(config.inner_height(), 150.0);
    }
}
