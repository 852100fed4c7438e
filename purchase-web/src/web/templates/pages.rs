pub(crate) mod chart_page;
