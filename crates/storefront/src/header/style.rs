//! Active-link styling for navigation links.

/// Routing state of a navigation link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavLinkState {
    /// The link targets the current page.
    pub is_active: bool,
    /// A navigation to the link is in flight.
    pub is_pending: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkColor {
    Grey,
    Black,
}

/// Style descriptor for a navigation link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkStyle {
    /// `None` keeps the inherited weight.
    pub font_weight: Option<FontWeight>,
    pub color: LinkColor,
}

impl LinkStyle {
    /// Utility classes for templates. Inline `style` attributes are blocked
    /// by the content security policy.
    #[must_use]
    pub fn class_names(&self) -> &'static str {
        match (self.font_weight, self.color) {
            (Some(FontWeight::Bold), LinkColor::Grey) => "font-bold text-grey",
            (Some(FontWeight::Bold), LinkColor::Black) => "font-bold text-black",
            (None, LinkColor::Grey) => "text-grey",
            (None, LinkColor::Black) => "text-black",
        }
    }
}

/// Bold when active; grey while a navigation is pending, black otherwise.
#[must_use]
pub const fn active_link_style(state: NavLinkState) -> LinkStyle {
    LinkStyle {
        font_weight: if state.is_active {
            Some(FontWeight::Bold)
        } else {
            None
        },
        color: if state.is_pending {
            LinkColor::Grey
        } else {
            LinkColor::Black
        },
    }
}
