//! Three-state view of a value produced asynchronously.

/// Observed state of a deferred value.
///
/// A value starts `Pending` and moves at most once to `Resolved` or
/// `Failed`; both are terminal for the render cycle that produced them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DeferredState<T> {
    #[default]
    Pending,
    Resolved(T),
    Failed,
}

impl<T> DeferredState<T> {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// True once the value has resolved or failed.
    #[must_use]
    pub const fn is_settled(&self) -> bool {
        !self.is_pending()
    }

    /// The resolved value, if any.
    #[must_use]
    pub const fn resolved(&self) -> Option<&T> {
        match self {
            Self::Resolved(value) => Some(value),
            Self::Pending | Self::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_pending() {
        let state: DeferredState<bool> = DeferredState::default();
        assert!(state.is_pending());
        assert!(!state.is_settled());
    }

    #[test]
    fn test_resolved_accessor() {
        assert_eq!(DeferredState::Resolved(7).resolved(), Some(&7));
        assert_eq!(DeferredState::<i32>::Failed.resolved(), None);
        assert_eq!(DeferredState::<i32>::Pending.resolved(), None);
    }
}
