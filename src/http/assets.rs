//! Front-end page and static assets, compiled into the binary.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

const INDEX_TEMPLATE: &str = include_str!("../../templates/index.html");
const APP_JS: &str = include_str!("../../static/app.js");
const STYLE_CSS: &str = include_str!("../../static/style.css");

/// Render the form page.
pub fn render_index() -> String {
    INDEX_TEMPLATE.replace("{{VERSION}}", env!("CARGO_PKG_VERSION"))
}

/// `GET /`
pub async fn index() -> Html<String> {
    Html(render_index())
}

/// `GET /static/{*path}`
pub async fn static_asset(Path(path): Path<String>) -> Response {
    match lookup(&path) {
        Some((content_type, body)) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
        None => (StatusCode::NOT_FOUND, "404 page not found").into_response(),
    }
}

fn lookup(path: &str) -> Option<(&'static str, &'static str)> {
    match path {
        "app.js" => Some(("text/javascript; charset=utf-8", APP_JS)),
        "style.css" => Some(("text/css; charset=utf-8", STYLE_CSS)),
        _ => None,
    }
}
