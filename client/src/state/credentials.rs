//! Login/register form state.
//!
//! Exists only while the login view is shown; nothing here is persisted.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use super::session::Role;

/// Which identity-provider operation the credential form submits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AuthMode {
    #[default]
    SignIn,
    Register,
}

impl AuthMode {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::SignIn => Self::Register,
            Self::Register => Self::SignIn,
        }
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::SignIn => "Sign in",
            Self::Register => "Register",
        }
    }

    #[must_use]
    pub fn toggle_label(self) -> &'static str {
        match self {
            Self::SignIn => "Register instead",
            Self::Register => "I already have an account",
        }
    }

    /// Prefix for the alert shown when the operation fails.
    #[must_use]
    pub fn failure_prefix(self) -> &'static str {
        match self {
            Self::SignIn => "Error signing in",
            Self::Register => "Error registering",
        }
    }
}

/// Email, password and registration role typed into the login view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Only meaningful in register mode.
    pub role: Role,
    pub mode: AuthMode,
}

impl Credentials {
    pub fn toggle_mode(&mut self) {
        self.mode = self.mode.toggled();
    }

    #[must_use]
    pub fn shows_role_selector(&self) -> bool {
        self.mode == AuthMode::Register
    }
}
