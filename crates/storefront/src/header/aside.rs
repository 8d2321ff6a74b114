//! Slide-over panels (cart, search, mobile menu).
//!
//! The browser owns the panels. The server only asks for a panel to open or
//! close; [`HxAside`] turns those requests into an HTMX `HX-Trigger` header
//! that `static/js/aside.js` applies.

use std::fmt;
use std::str::FromStr;

use axum::http::{HeaderName, HeaderValue};
use thiserror::Error;

/// HTMX response header carrying client-side events.
pub const HX_TRIGGER: HeaderName = HeaderName::from_static("hx-trigger");

/// Panel identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsideKey {
    Mobile,
    Search,
    Cart,
}

impl AsideKey {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Search => "search",
            Self::Cart => "cart",
        }
    }
}

impl fmt::Display for AsideKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown panel: {0}")]
pub struct UnknownAside(pub String);

impl FromStr for AsideKey {
    type Err = UnknownAside;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile" => Ok(Self::Mobile),
            "search" => Ok(Self::Search),
            "cart" => Ok(Self::Cart),
            other => Err(UnknownAside(other.to_string())),
        }
    }
}

/// Opens and closes panels by key.
pub trait PanelManager {
    fn open(&mut self, key: AsideKey);
    fn close(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsideCommand {
    Open(AsideKey),
    Close,
}

/// Panel manager that answers an HTMX request.
///
/// Only the last command survives; a panel can't be opened and closed in
/// the same response.
#[derive(Debug, Default)]
pub struct HxAside {
    command: Option<AsideCommand>,
}

impl HxAside {
    #[must_use]
    pub const fn new() -> Self {
        Self { command: None }
    }

    #[must_use]
    pub const fn command(&self) -> Option<AsideCommand> {
        self.command
    }

    /// `HX-Trigger` value for the recorded command, if any.
    #[must_use]
    pub fn trigger(&self) -> Option<HeaderValue> {
        let event = match self.command? {
            AsideCommand::Open(key) => serde_json::json!({ "aside:open": key.as_str() }),
            AsideCommand::Close => serde_json::json!({ "aside:close": true }),
        };
        HeaderValue::from_str(&event.to_string()).ok()
    }
}

impl PanelManager for HxAside {
    fn open(&mut self, key: AsideKey) {
        self.command = Some(AsideCommand::Open(key));
    }

    fn close(&mut self) {
        self.command = Some(AsideCommand::Close);
    }
}
