use axum::body::Body;
use axum::extract::Path;
use axum::http::{header, HeaderValue, Response, StatusCode};
use axum::response::IntoResponse;

use crate::web::error::WebError;

#[cfg(not(debug_assertions))]
const CACHE_CONTROL: &str = "public, max-age=86400";
#[cfg(debug_assertions)]
const CACHE_CONTROL: &str = "none";

/// In release mode, return the files from a statically included dir
#[cfg(not(debug_assertions))]
fn get_static_file(path: &str) -> Option<&'static [u8]> {
    use include_dir::include_dir;
    static STATIC_DIR: include_dir::Dir = include_dir!("$CARGO_MANIFEST_DIR/static");
    let file = STATIC_DIR.get_file(path)?;
    Some(file.contents())
}

/// In debug mode, just load the files from disk
#[cfg(debug_assertions)]
fn get_static_file(path: &str) -> Option<Vec<u8>> {
    let file = std::path::PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")).join(path);
    std::fs::read(file).ok()
}

async fn get_file(path: &str) -> Result<Response<Body>, WebError> {
    if path.split('/').any(|part| part == "..") {
        return Err(WebError::StaticFileNotFound(path.to_string()));
    }
    let mime_type = mime_guess::from_path(path).first_or_text_plain();
    let file = get_static_file(path).ok_or_else(|| WebError::StaticFileNotFound(path.to_string()))?;
    Ok(Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            HeaderValue::from_str(mime_type.as_ref()).unwrap_or(HeaderValue::from_static("text/plain")),
        )
        .header(header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL))
        .body(Body::from(file))?)
}

pub(crate) async fn static_path(Path(path): Path<String>) -> Result<impl IntoResponse, WebError> {
    get_file(&path).await
}
