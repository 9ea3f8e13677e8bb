//! Read-only view of a user as supplied by the identity store.

use serde::{Deserialize, Serialize};

/// User identity the token subsystem issues credentials for.
///
/// Owned by the external identity store. Profile fields are optional because
/// the store may hand back partially populated records; claim building
/// rejects those.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Numeric user id
    pub id: i64,

    /// Login name
    pub username: Option<String>,

    /// Given name
    pub first_name: Option<String>,

    /// Family name
    pub last_name: Option<String>,

    /// Role names in the order the store returned them
    #[serde(default)]
    pub roles: Vec<String>,
}

impl Identity {
    /// Creates a fully populated identity with no roles
    pub fn new(
        id: i64,
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: Some(username.into()),
            first_name: Some(first_name.into()),
            last_name: Some(last_name.into()),
            roles: Vec::new(),
        }
    }

    /// Replaces the role list
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }
}
