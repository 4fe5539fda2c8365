//! Upload form

use axum::response::Html;

use crate::pages;

pub async fn index() -> Html<&'static str> {
    Html(pages::UPLOAD_PAGE)
}
