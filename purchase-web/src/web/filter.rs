use anyhow::Result;
use purchase_charts::{aggregate_filtered, ChartConfig};
use purchase_charts_html::{render_chart, RenderedChart};
use purchase_dataset::Dataset;
use purchase_types::{FilterField, FilterState, ALL};
use serde::Deserialize;
use tracing::{debug, warn};

/// What a filter control submits. Each control only ever sends its own field, which is
/// how picking one filter drops the other.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct FilterQuery {
    pub(crate) field: Option<String>,
    pub(crate) value: Option<String>,
}

impl FilterQuery {
    pub(crate) fn into_filter_state(self) -> FilterState {
        let field = match self.field.as_deref() {
            None | Some("") => FilterField::All,
            Some(field) => field.parse().unwrap_or_else(|e| {
                warn!("{e}, showing everything");
                FilterField::All
            }),
        };
        let value = self.value.filter(|v| !v.is_empty());
        match value {
            Some(value) if field != FilterField::All => FilterState::new(value, field),
            _ => FilterState::default(),
        }
    }
}

/// Dropdown contents, worked out once from the dataset.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct FilterOptions {
    pub(crate) cities: Vec<String>,
    pub(crate) occupations: Vec<String>,
}

impl FilterOptions {
    pub(crate) fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            cities: dataset.distinct_values(FilterField::CityCategory),
            occupations: dataset.distinct_values(FilterField::Occupation),
        }
    }

    /// `All` followed by every value of `field`.
    pub(crate) fn choices(&self, field: FilterField) -> impl Iterator<Item = &str> {
        let values: &[String] = match field {
            FilterField::CityCategory => &self.cities,
            FilterField::Occupation => &self.occupations,
            FilterField::All => &[],
        };
        std::iter::once(ALL).chain(values.iter().map(String::as_str))
    }
}

/// Recomputes the buckets for `filter` from scratch and draws a brand new chart.
pub(crate) fn redraw(
    dataset: &Dataset,
    config: &ChartConfig,
    filter: &FilterState,
) -> Result<RenderedChart> {
    let buckets = aggregate_filtered(dataset.records(), filter);
    debug!(
        "{} = {} kept {} age groups",
        filter.field,
        filter.value,
        buckets.len()
    );
    render_chart(&buckets, config)
}

#[cfg(test)]
mod tests {
    use purchase_charts::Series;
    use purchase_types::{Gender, Record};

    use super::*;

    fn query(field: Option<&str>, value: Option<&str>) -> FilterQuery {
        FilterQuery {
            field: field.map(str::to_string),
            value: value.map(str::to_string),
        }
    }

    fn dataset() -> Dataset {
        let record = |age: &str, gender: &str, purchase: f64, city: &str| Record {
            age: age.to_string(),
            gender: Gender::from(gender.to_string()),
            purchase,
            city_category: city.to_string(),
            occupation: "4".to_string(),
        };
        Dataset::from_records(vec![
            record("18-25", "M", 100.0, "A"),
            record("18-25", "F", 50.0, "B"),
            record("26-35", "M", 200.0, "C"),
            record("36-45", "O", 999.0, "C"),
        ])
    }

    #[test]
    fn test_query_to_filter() {
        assert_eq!(query(None, None).into_filter_state(), FilterState::default());
        assert_eq!(
            query(Some("City_Category"), Some("A")).into_filter_state(),
            FilterState::new("A", FilterField::CityCategory)
        );
        assert_eq!(
            query(Some("Occupation"), None).into_filter_state(),
            FilterState::default()
        );
        assert_eq!(
            query(Some("Marital_Status"), Some("1")).into_filter_state(),
            FilterState::default()
        );
        assert_eq!(
            query(Some("All"), Some("A")).into_filter_state(),
            FilterState::default()
        );
    }

    #[test]
    fn test_choices_start_with_all() {
        let options = FilterOptions::from_dataset(&dataset());
        assert_eq!(
            options.choices(FilterField::CityCategory).collect::<Vec<_>>(),
            vec!["All", "A", "B", "C"]
        );
        assert_eq!(
            options.choices(FilterField::Occupation).collect::<Vec<_>>(),
            vec!["All", "4"]
        );
    }

    #[test]
    fn test_redraw() {
        let dataset = dataset();
        let config = ChartConfig::default();

        let chart = redraw(&dataset, &config, &FilterState::default()).unwrap();
        // the O record still opens a bucket, just an empty one
        assert_eq!(chart.bars.len(), 6);
        assert_eq!(chart.bars[4].age, "36-45");
        assert_eq!(chart.bars[4].value, 0.0);

        let chart = redraw(&dataset, &config, &FilterState::new("C", FilterField::CityCategory)).unwrap();
        let ages: Vec<_> = chart.bars.iter().map(|b| b.age.as_str()).collect();
        assert_eq!(ages, vec!["26-35", "26-35", "36-45", "36-45"]);
        assert_eq!(chart.bars[0].series, Series::Male);
        assert_eq!(chart.bars[0].value, 200.0);

        let chart = redraw(&dataset, &config, &FilterState::new("Z", FilterField::CityCategory)).unwrap();
        assert!(chart.bars.is_empty());
    }
}
