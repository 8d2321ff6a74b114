//! Men/Women toggle next to the quiz button.
//!
//! Purely cosmetic. The state belongs to the rendered component: it travels
//! with the toggle's own form submission and the server keeps nothing.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenderToggle {
    #[serde(default)]
    pub is_male: bool,
}

impl GenderToggle {
    #[must_use]
    pub const fn toggle(self) -> Self {
        Self {
            is_male: !self.is_male,
        }
    }

    /// Knob position class.
    #[must_use]
    pub const fn knob_class(self) -> &'static str {
        if self.is_male {
            "translate-x-1"
        } else {
            "translate-x-16"
        }
    }

    /// Icon shown on the knob.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        if self.is_male { "user-group" } else { "user" }
    }
}
