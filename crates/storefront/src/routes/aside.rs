//! Panel open/close routes.
//!
//! The panels are plain markup; these routes only answer with the
//! `HX-Trigger` event that tells `aside.js` which one to show.

use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::{AppError, Result};
use crate::header::aside::{AsideKey, HX_TRIGGER, HxAside, PanelManager};

/// Empty response carrying the recorded panel command.
pub(crate) fn aside_response(aside: &HxAside) -> Response {
    let mut response = StatusCode::NO_CONTENT.into_response();
    if let Some(trigger) = aside.trigger() {
        response.headers_mut().insert(HX_TRIGGER, trigger);
    }
    response
}

/// Open a panel.
///
/// POST /aside/{key}/open
pub async fn open(Path(key): Path<String>) -> Result<Response> {
    let key: AsideKey = key
        .parse()
        .map_err(|e: crate::header::aside::UnknownAside| AppError::BadRequest(e.to_string()))?;

    let mut aside = HxAside::new();
    aside.open(key);
    Ok(aside_response(&aside))
}

/// Close whichever panel is open.
///
/// POST /aside/close
pub async fn close() -> Response {
    let mut aside = HxAside::new();
    aside.close();
    aside_response(&aside)
}
