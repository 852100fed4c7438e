pub(crate) mod filter_dropdown;
pub(crate) mod footer;
pub(crate) mod stacked_bar_chart;
