//! String-backed ID types.
//!
//! Each ID type wraps an owned `String` to prevent cross-type confusion.
//! A `ReviewId` cannot be accidentally used where a `ReviewerId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// Create a new ID.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(
    /// Reviewer (and peer rater) identifier.
    ReviewerId
);

define_id!(
    /// Review identifier.
    ReviewId
);

define_id!(
    /// Proposal identifier.
    ProposalId
);

define_id!(
    /// Peer assessment identifier.
    AssessmentId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_plain_strings() {
        let id = ReviewerId::from("rv-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rv-1\"");
        let back: ReviewerId = serde_json::from_str("\"rv-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn display_is_raw_id() {
        assert_eq!(ProposalId::new("p-7").to_string(), "p-7");
    }
}
