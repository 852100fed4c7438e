pub mod error;
pub mod filter;
mod static_content;
mod templates;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{FromRef, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use purchase_charts::ChartConfig;
use purchase_dataset::Dataset;
use tracing::instrument;

use self::error::WebError;
use self::filter::{redraw, FilterOptions, FilterQuery};
use self::templates::{page::RenderPage, pages::chart_page::ChartPage};

#[derive(Clone, FromRef)]
pub(crate) struct WebState {
    pub(crate) dataset: Arc<Dataset>,
    pub(crate) chart_config: Arc<ChartConfig>,
    pub(crate) filter_options: Arc<FilterOptions>,
}

/// The whole page: both filter controls and a freshly drawn chart for the one active filter.
#[instrument(skip(dataset, chart_config, filter_options))]
async fn chart_page(
    State(dataset): State<Arc<Dataset>>,
    State(chart_config): State<Arc<ChartConfig>>,
    State(filter_options): State<Arc<FilterOptions>>,
    Query(query): Query<FilterQuery>,
) -> Result<RenderPage<ChartPage>, WebError> {
    let filter = query.into_filter_state();
    let chart = redraw(&dataset, &chart_config, &filter)?;
    Ok(RenderPage(ChartPage {
        filter,
        options: filter_options,
        chart,
        width: chart_config.width,
        height: chart_config.height,
    }))
}

/// Just the svg, for embedding the chart somewhere else.
#[instrument(skip(dataset, chart_config))]
async fn chart_svg(
    State(dataset): State<Arc<Dataset>>,
    State(chart_config): State<Arc<ChartConfig>>,
    Query(query): Query<FilterQuery>,
) -> Result<impl IntoResponse, WebError> {
    let filter = query.into_filter_state();
    let chart = redraw(&dataset, &chart_config, &filter)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], chart.svg))
}

async fn fallback() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Not found")
}

pub(crate) fn router(state: WebState) -> Router {
    Router::new()
        .route("/", get(chart_page))
        .route("/chart.svg", get(chart_svg))
        .route("/static/{*path}", get(static_content::static_path))
        .fallback(fallback)
        .with_state(state)
}

pub(crate) async fn start_web(state: WebState, port: u16) -> anyhow::Result<()> {
    let app = router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use axum::body::to_bytes;
    use purchase_types::{Gender, Record};

    use super::*;

    fn record(age: &str, gender: Gender, purchase: f64, city: &str, occupation: &str) -> Record {
        Record {
            age: age.to_string(),
            gender,
            purchase,
            city_category: city.to_string(),
            occupation: occupation.to_string(),
        }
    }

    fn state() -> WebState {
        let dataset = Dataset::from_records(vec![
            record("18-25", Gender::Male, 100.0, "A", "4"),
            record("18-25", Gender::Female, 50.0, "B", "4"),
            record("26-35", Gender::Male, 200.0, "A", "12"),
        ]);
        WebState {
            filter_options: Arc::new(FilterOptions::from_dataset(&dataset)),
            dataset: Arc::new(dataset),
            chart_config: Arc::new(ChartConfig::default()),
        }
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn page(field: Option<&str>, value: Option<&str>) -> String {
        let state = state();
        let response = chart_page(
            State(state.dataset),
            State(state.chart_config),
            State(state.filter_options),
            Query(FilterQuery {
                field: field.map(str::to_string),
                value: value.map(str::to_string),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        body_string(response).await
    }

    #[tokio::test]
    async fn test_initial_page() {
        let body = page(None, None).await;
        assert!(body.contains("<svg"));
        assert!(body.contains(r#"id="cityFilter""#));
        assert!(body.contains(r#"id="occupationFilter""#));
        assert_eq!(body.matches(r#"class="bar-hit""#).count(), 4);
    }

    #[tokio::test]
    async fn test_filtered_page() {
        let body = page(Some("City_Category"), Some("B")).await;
        assert_eq!(body.matches(r#"class="bar-hit""#).count(), 2);
        assert!(body.contains(r#"<option value="B" selected>B</option>"#));
    }

    #[tokio::test]
    async fn test_unmatched_filter_draws_empty_chart() {
        let body = page(Some("City_Category"), Some("X")).await;
        assert!(body.contains("<svg"));
        assert_eq!(body.matches(r#"class="bar-hit""#).count(), 0);
    }

    #[tokio::test]
    async fn test_chart_svg() {
        let state = state();
        let response = chart_svg(
            State(state.dataset),
            State(state.chart_config),
            Query(FilterQuery {
                field: Some("Occupation".to_string()),
                value: Some("12".to_string()),
            }),
        )
        .await
        .unwrap()
        .into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "image/svg+xml"
        );
        let body = body_string(response).await;
        assert!(body.contains("26-35"));
        assert!(!body.contains("18-25"));
    }
}
