//! Authenticated-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session gate is the only writer. Everything else reads the active
//! `Session` to decide which panel controls exist for the signed-in role.
//!
//! DESIGN
//! ======
//! Roles are persisted in profile documents under the `rol` field using the
//! wire values of the original deployment (`mensajero`, `oficina_partes`,
//! `admin`). English spellings are accepted on read.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Profile field holding the role wire value.
pub const PROFILE_ROLE_FIELD: &str = "rol";

/// Office role that gates which panel actions are shown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    #[serde(rename = "mensajero", alias = "courier")]
    Courier,
    #[serde(rename = "oficina_partes", alias = "intake_office")]
    IntakeOffice,
    #[serde(rename = "admin")]
    Admin,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Courier, Role::IntakeOffice, Role::Admin];

    /// Value stored in the profile document.
    #[must_use]
    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Courier => "mensajero",
            Self::IntakeOffice => "oficina_partes",
            Self::Admin => "admin",
        }
    }

    /// Human-readable label for selectors and the panel header.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Courier => "Courier",
            Self::IntakeOffice => "Intake office",
            Self::Admin => "Administrator",
        }
    }

    /// Couriers only read the list; every other role may create records.
    #[must_use]
    pub fn can_create_records(self) -> bool {
        !matches!(self, Self::Courier)
    }

    #[must_use]
    pub fn can_export(self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_value())
    }
}

/// Error returned when a role string is not one of the known roles.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "mensajero" | "courier" => Ok(Self::Courier),
            "oficina_partes" | "intake_office" => Ok(Self::IntakeOffice),
            "admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

/// Signed-in user with a resolved role.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

/// Holder for the single active session, if any.
///
/// Provided to components as `RwSignal<SessionState>`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    session: Option<Session>,
}

impl SessionState {
    #[must_use]
    pub fn current(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn role(&self) -> Option<Role> {
        self.session.as_ref().map(|s| s.role)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Replace any active session with `session`.
    pub fn establish(&mut self, session: Session) {
        self.session = Some(session);
    }

    pub fn clear(&mut self) {
        self.session = None;
    }
}
