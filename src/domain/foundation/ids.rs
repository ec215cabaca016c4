//! Strongly-typed identifier value objects.
//!
//! Every identifier in this service is minted by an external system (identity
//! service, process engine, content service), so they are opaque non-empty
//! strings rather than locally generated UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates the identifier, returning error if empty.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.trim().is_empty() {
                    return Err(ValidationError::empty_field($field));
                }
                Ok(Self(id))
            }

            /// Returns the inner string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

opaque_id!(
    /// Identifier of a user session, issued by the identity service.
    SessionId,
    "session_id"
);

opaque_id!(
    /// User identifier (from the identity service).
    UserId,
    "user_id"
);

opaque_id!(
    /// Identifier of a process definition (also used as the support id).
    ProcessId,
    "process_id"
);

opaque_id!(
    /// Identifier of one running process instance.
    ProcessInstanceId,
    "process_instance_id"
);

opaque_id!(
    /// Identifier of a node in a process graph.
    ElementId,
    "element_id"
);

opaque_id!(
    /// Opaque reference to a content package.
    ContentId,
    "content_id"
);
