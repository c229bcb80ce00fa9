use serde::Serialize;
use thiserror::Error;

/// One rejected form field with the message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

/// Character bounds for a text field, with the messages for each side.
pub(crate) struct Bounds {
    pub min: usize,
    pub max: usize,
    pub too_short: &'static str,
    pub too_long: &'static str,
}

/// Forms count characters, not bytes (Thai text is multi-byte).
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

pub(crate) fn check_bounds(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: &str,
    bounds: &Bounds,
) {
    let len = char_len(value);
    if len < bounds.min {
        errors.push(field, bounds.too_short);
    } else if len > bounds.max {
        errors.push(field, bounds.too_long);
    }
}

/// Optional fields may be left empty; anything else must respect the bounds.
pub(crate) fn check_optional_bounds(
    errors: &mut ValidationErrors,
    field: &'static str,
    value: Option<&str>,
    bounds: &Bounds,
) {
    if let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) {
        check_bounds(errors, field, value, bounds);
    }
}

pub(crate) fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
