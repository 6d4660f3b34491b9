use axum::response::Html;

static LANDING_PAGE: &str = include_str!("../../static/index.html");

pub async fn home() -> Html<&'static str> {
    Html(LANDING_PAGE)
}
