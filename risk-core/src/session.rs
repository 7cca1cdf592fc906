use crate::dto::User;

/// Who the dashboard is acting for. Lives only in memory; the server keeps
/// the real session in a cookie.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<User>,
}

impl Session {
    pub fn sign_in(&mut self, user: User) {
        tracing::debug!(email = %user.email, "session established");
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn set(&mut self, user: Option<User>) {
        match user {
            Some(u) => self.sign_in(u),
            None => self.sign_out(),
        }
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn greeting(&self) -> String {
        match &self.user {
            Some(u) => format!("Welcome, {}", u.name),
            None => "Welcome, guest".to_string(),
        }
    }
}
