//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use super::header::render_header;
use crate::filters;
use crate::header::HeaderView;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub header: HeaderView,
}

/// Display the home page.
///
/// GET /
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> impl IntoResponse {
    HomeTemplate {
        header: render_header(&state, &session, "/").await,
    }
}
