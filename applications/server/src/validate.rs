/// Request input validation
///
/// Collects per-field error messages the way the API contract reports them:
/// a map of field name to a list of human-readable messages.
use crate::error::ServerError;
use std::collections::BTreeMap;

/// Field name → error messages, in stable field order
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Accumulates rule failures across the fields of one request
#[derive(Debug, Default)]
pub struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// The field must be present and non-empty
    pub fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.add_error(field, format!("The {field} field is required."));
        }
        self
    }

    /// The field must look like an email address (skipped when empty;
    /// `required` already reports that case)
    pub fn email(&mut self, field: &str, value: &str) -> &mut Self {
        if !value.trim().is_empty() && !is_valid_email(value) {
            self.add_error(field, format!("The {field} must be a valid email address."));
        }
        self
    }

    /// Record a failure the caller discovered itself (e.g. a uniqueness
    /// probe against the store)
    pub fn add_error(&mut self, field: &str, message: impl Into<String>) -> &mut Self {
        self.errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
        self
    }

    /// Whether no rule has failed for the field so far
    pub fn field_passes(&self, field: &str) -> bool {
        !self.errors.contains_key(field)
    }

    /// Resolve into the validation-error response, if anything failed
    pub fn finish(self) -> Result<(), ServerError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ServerError::Validation(self.errors))
        }
    }
}

/// Structural email check: non-empty local and domain parts, a single `@`,
/// and a dotted domain
pub fn is_valid_email(email: &str) -> bool {
    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return false;
    }

    let (local, domain) = (parts[0], parts[1]);
    if local.is_empty() || domain.is_empty() {
        return false;
    }

    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}
