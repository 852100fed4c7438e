use std::sync::Arc;

use maud::html;
use purchase_charts_html::RenderedChart;
use purchase_types::{FilterField, FilterState};

use crate::web::filter::FilterOptions;
use crate::web::templates::{
    components::{filter_dropdown::FilterDropdown, stacked_bar_chart::StackedBarChart},
    page::Page,
};

pub(crate) struct ChartPage {
    pub(crate) filter: FilterState,
    pub(crate) options: Arc<FilterOptions>,
    pub(crate) chart: RenderedChart,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl ChartPage {
    fn dropdown<'a>(&'a self, field: FilterField, id: &'a str) -> FilterDropdown<'a> {
        FilterDropdown {
            field,
            id,
            selected: self.filter.selected_for(field),
            choices: self.options.choices(field).collect(),
        }
    }
}

impl Page for ChartPage {
    fn get_name(&'_ self) -> String {
        "Purchases by Age Group".to_string()
    }

    fn get_description(&'_ self) -> Option<String> {
        Some("Total purchases per age group, stacked by gender".to_string())
    }

    fn draw_body(&self) -> maud::Markup {
        html! {
            div id="filter-wrapper" {
                (self.dropdown(FilterField::CityCategory, "cityFilter"))
                (self.dropdown(FilterField::Occupation, "occupationFilter"))
            }
            (StackedBarChart {
                chart: &self.chart,
                width: self.width,
                height: self.height,
            })
        }
    }
}
