//! Read-side presentation of sensitive values.
//!
//! A presenter wraps one already-fetched value and decides what the UI may
//! render. It never mutates the underlying value map, never persists the
//! revealed state, and never fetches or decrypts anything itself.

use fleetdeck_types::{Effect, FieldKind, FieldSchema};

/// Fixed mask rendered for hidden sensitive values.
///
/// Deliberately constant: the mask must never leak the literal's length or
/// any of its characters.
pub const MASK: &str = "••••••••";

/// Visibility of one displayed sensitive value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Hidden,
    Revealed,
}

/// Presenter for one displayed value.
///
/// Transitions are user-triggered only; there is no timeout auto-hide.
#[derive(Debug, Clone)]
pub struct SensitiveValue {
    literal: String,
    sensitive: bool,
    state: RevealState,
}

impl SensitiveValue {
    /// Wraps a fetched value. Sensitive values start hidden.
    pub fn new(literal: impl Into<String>, sensitive: bool) -> Self {
        Self {
            literal: literal.into(),
            sensitive,
            state: RevealState::Hidden,
        }
    }

    /// Wraps a fetched value according to its field schema. Password-kind
    /// fields are masked even if the catalog forgot the sensitivity flag.
    pub fn for_field(field: &FieldSchema, literal: impl Into<String>) -> Self {
        let sensitive = field.sensitive
            || match field.kind {
                FieldKind::Password => true,
                FieldKind::Text | FieldKind::Email | FieldKind::File => false,
            };
        Self::new(literal, sensitive)
    }

    /// What the UI renders right now: the literal for non-sensitive or
    /// revealed values, the fixed mask otherwise.
    pub fn display(&self) -> &str {
        if !self.sensitive {
            return &self.literal;
        }
        match self.state {
            RevealState::Hidden => MASK,
            RevealState::Revealed => &self.literal,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    pub fn reveal(&mut self) {
        self.state = RevealState::Revealed;
    }

    pub fn hide(&mut self) {
        self.state = RevealState::Hidden;
    }

    /// Requests a clipboard write of the literal value. The reveal state is
    /// left untouched; copying never implies revealing.
    pub fn copy(&self) -> Effect {
        Effect::CopyToClipboardRequested(self.literal.clone())
    }
}
