pub mod auth;
pub mod channels;
pub mod comments;
pub mod users;
pub mod videos;

use crate::domain::shared::errors::DomainError;
use validator::ValidationErrors;

/// Collapse validator output into a single client-facing message.
///
/// Fields are visited in name order so the reported message is stable.
pub(crate) fn validation_error(errors: ValidationErrors) -> DomainError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().cloned().collect();
    fields.sort();

    let message = fields
        .first()
        .and_then(|field| {
            field_errors.get(field).and_then(|errs| errs.first()).map(|err| {
                err.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid {}", field))
            })
        })
        .unwrap_or_else(|| "Invalid request".to_string());

    DomainError::ValidationError(message)
}

/// Trim and drop empty optional text.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
