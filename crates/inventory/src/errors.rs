use thiserror::Error;

use crate::field::ItemField;
use crate::item::ItemId;
use crate::schema::ValidationErrors;

/// Contract violations on the store's mutation surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("field `{field}` expects a {expected} value, got {got}")]
    Mismatch {
        field: ItemField,
        expected: &'static str,
        got: &'static str,
    },
}

/// Failures turning a validated draft into a record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializeError {
    #[error("{field} is not a number: {raw:?}")]
    InvalidNumber { field: ItemField, raw: String },

    #[error("unknown category: {0:?}")]
    UnknownCategory(String),
}

/// Failures reported by a persistence gateway.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered but refused the request. `message` is the
    /// backend's own reason and is shown to the user as is.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("malformed data: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("item not found: {0}")]
    NotFound(ItemId),

    #[error("{0}")]
    Unavailable(String),
}

/// Why a submit did not reach (or did not survive) the gateway.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("a submission is already in flight")]
    AlreadySubmitting,

    #[error("{} field(s) are invalid", .0.len())]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Serialize(#[from] SerializeError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_message_is_passed_through() {
        let err = reqwest::Client::new()
            .get("not a url")
            .build()
            .unwrap_err();
        let message = err.to_string();
        assert_eq!(GatewayError::from(err).to_string(), message);
    }

    #[test]
    fn rejection_shows_the_backend_reason() {
        let err = GatewayError::Rejected {
            status: 401,
            message: "Permission denied".into(),
        };
        assert_eq!(err.to_string(), "Permission denied");
    }
}
