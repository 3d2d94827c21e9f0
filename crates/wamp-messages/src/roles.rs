//! # Client Roles
//!
//! The fixed set of role names a `roles` details entry may announce.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A role a peer can announce in `Hello`/`Welcome` details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    Callee,
    Caller,
    Publisher,
    Subscriber,
}

/// A role name outside the allowed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown role '{0}'")]
pub struct UnknownRoleName(pub String);

impl Role {
    /// Every allowed role, in declaration order.
    pub const ALL: [Role; 4] = [Role::Callee, Role::Caller, Role::Publisher, Role::Subscriber];

    /// Wire name of the role.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Callee => "callee",
            Role::Caller => "caller",
            Role::Publisher => "publisher",
            Role::Subscriber => "subscriber",
        }
    }

    /// Comma-separated list of allowed role names, for error texts.
    #[must_use]
    pub fn allowed() -> String {
        Role::ALL.map(Role::as_str).join(", ")
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRoleName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| UnknownRoleName(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_roles() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
    }

    #[test]
    fn test_parse_unknown_role() {
        assert_eq!(
            "broker".parse::<Role>(),
            Err(UnknownRoleName("broker".to_string()))
        );
    }

    #[test]
    fn test_allowed_list() {
        assert_eq!(Role::allowed(), "callee, caller, publisher, subscriber");
    }
}
