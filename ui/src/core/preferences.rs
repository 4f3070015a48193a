//! User preferences and the signed-in session.

use serde::{Deserialize, Serialize};

use super::reactive::Source;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    #[serde(default = "default_true")]
    pub show_sidebar_widgets: bool,
    #[serde(default)]
    pub list_module: Option<String>,
    #[serde(default)]
    pub date_format: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            show_sidebar_widgets: true,
            list_module: None,
            date_format: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserPreferenceStore {
    preferences: Source<UserPreferences>,
}

impl UserPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn preferences(&self) -> &Source<UserPreferences> {
        &self.preferences
    }

    pub fn current(&self) -> UserPreferences {
        self.preferences.get().unwrap_or_default()
    }

    pub fn set(&self, preferences: UserPreferences) {
        self.preferences.set(preferences);
    }
}

/// Who is signed in, if anyone. Read by the auth guard.
#[derive(Debug, Clone)]
pub struct AuthSession {
    user: Source<Option<String>>,
}

impl AuthSession {
    pub fn new() -> Self {
        Self {
            user: Source::with_value(None),
        }
    }

    pub fn user(&self) -> &Source<Option<String>> {
        &self.user
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(self.user.get(), Some(Some(_)))
    }

    /// Blank user names are rejected.
    pub fn sign_in(&self, user_name: &str) -> bool {
        let user_name = user_name.trim();
        if user_name.is_empty() {
            return false;
        }
        self.user.set(Some(user_name.to_string()));
        true
    }

    pub fn sign_out(&self) {
        self.user.set(None);
    }
}

impl Default for AuthSession {
    fn default() -> Self {
        Self::new()
    }
}
