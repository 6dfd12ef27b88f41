//! Inline controls attached to nodes.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::error::{LibraryError, Result};

/// What kind of value an [`InputControl`] edits.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
}

impl InputKind {
    pub fn default_value(self) -> ControlValue {
        match self {
            InputKind::Text => ControlValue::Text(String::new()),
            InputKind::Number => ControlValue::Number(OrderedFloat(0.0)),
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKind::Text => f.write_str("text"),
            InputKind::Number => f.write_str("number"),
        }
    }
}

/// Value held by a control or produced on an output.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum ControlValue {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl ControlValue {
    pub fn number(value: f64) -> Self {
        ControlValue::Number(OrderedFloat(value))
    }

    pub fn text(value: &str) -> Self {
        ControlValue::Text(value.to_string())
    }

    pub fn kind(&self) -> InputKind {
        match self {
            ControlValue::Number(_) => InputKind::Number,
            ControlValue::Text(_) => InputKind::Text,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            ControlValue::Number(n) => Some(n.into_inner()),
            ControlValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            ControlValue::Text(s) => Some(s),
            ControlValue::Number(_) => None,
        }
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlValue::Number(n) => write!(f, "{}", n),
            ControlValue::Text(s) => f.write_str(s),
        }
    }
}

/// A free-text or numeric input field shown inside a node.
#[derive(Clone, Debug, PartialEq)]
pub struct InputControl {
    kind: InputKind,
    value: ControlValue,
    readonly: bool,
}

impl InputControl {
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            value: kind.default_value(),
            readonly: false,
        }
    }

    pub fn text() -> Self {
        Self::new(InputKind::Text)
    }

    pub fn number() -> Self {
        Self::new(InputKind::Number)
    }

    /// Sets the initial value. A value of another kind is ignored with a warning.
    pub fn with_initial(mut self, value: ControlValue) -> Self {
        if value.kind() == self.kind {
            self.value = value;
        } else {
            log::warn!(
                "Ignoring {} initial value for a {} control",
                value.kind(),
                self.kind
            );
        }
        self
    }

    pub fn with_readonly(mut self, readonly: bool) -> Self {
        self.readonly = readonly;
        self
    }

    pub fn kind(&self) -> InputKind {
        self.kind
    }

    pub fn value(&self) -> &ControlValue {
        &self.value
    }

    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Replaces the value. `key` is only used for error messages.
    pub fn set_value(&mut self, key: &str, value: ControlValue) -> Result<()> {
        if self.readonly {
            return Err(LibraryError::ReadonlyControl(key.to_string()));
        }
        if value.kind() != self.kind {
            return Err(LibraryError::ControlKindMismatch {
                key: key.to_string(),
                expected: self.kind.to_string(),
            });
        }
        self.value = value;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_control_accepts_empty_string() {
        let mut control = InputControl::text().with_initial(ControlValue::text("hello"));
        control.set_value("port", ControlValue::text("")).unwrap();
        assert_eq!(control.value(), &ControlValue::text(""));
    }

    #[test]
    fn kind_mismatch_is_rejected() {
        let mut control = InputControl::number();
        let err = control
            .set_value("n", ControlValue::text("1"))
            .unwrap_err();
        assert!(matches!(err, LibraryError::ControlKindMismatch { .. }));
        assert_eq!(control.value(), &ControlValue::number(0.0));
    }

    #[test]
    fn readonly_control_is_not_editable() {
        let mut control = InputControl::text().with_readonly(true);
        assert!(matches!(
            control.set_value("port", ControlValue::text("x")),
            Err(LibraryError::ReadonlyControl(_))
        ));
    }

    #[test]
    fn mismatched_initial_value_is_ignored() {
        let control = InputControl::number().with_initial(ControlValue::text("one"));
        assert_eq!(control.value(), &ControlValue::number(0.0));
    }
}
