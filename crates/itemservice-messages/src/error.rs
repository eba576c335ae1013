use thiserror::Error;

use crate::locale::Locale;

/// No template exists for the key in any searched catalog and the caller
/// supplied no default message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No message found under code '{key}' for locale '{locale}'.")]
pub struct MessageNotFound {
    pub key: String,
    pub locale: Locale,
}
