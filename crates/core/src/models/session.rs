use serde::{Deserialize, Serialize};

/// Who is looking at the dashboard.
///
/// Issued by the authentication collaborator and passed in explicitly;
/// the core never reads credentials from ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user_id: String,

    #[serde(default)]
    pub display_name: Option<String>,

    /// Opaque credential; its presence is what makes the session authenticated.
    #[serde(default, skip_serializing)]
    token: Option<String>,
}

impl Session {
    pub fn new(user_id: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
            token: Some(token.into()),
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// A session with no credential, e.g. before login.
    pub fn anonymous() -> Self {
        Self {
            user_id: String::new(),
            display_name: None,
            token: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Name for the greeting line, falling back to the user id.
    pub fn greeting_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.user_id)
    }

    /// Drop the credential. The host is responsible for clearing its own storage.
    pub fn end(&mut self) {
        self.token = None;
    }
}
