//! Caller identity.

use serde::{Deserialize, Serialize};

/// Identity of an authenticated caller, as issued by the backend.
///
/// The backend scopes carts, wishlists, reward points, and order history to
/// this identity. It is an opaque text principal from the client's point of
/// view; the client never mints or derives one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Wrap a principal string.
    #[must_use]
    pub const fn new(id: String) -> Self {
        Self(id)
    }

    /// The underlying principal text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for CustomerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}
