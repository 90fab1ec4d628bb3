//! Login gate holding the single authenticated user.

use super::models::{Credentials, Session};

/// Decides whether a username/password pair may log in.
pub trait Authenticator {
    fn verify(&self, username: &str, password: &str) -> bool;
}

impl Authenticator for Credentials {
    fn verify(&self, username: &str, password: &str) -> bool {
        username == self.username && password == self.password
    }
}

/// Holds at most one [`Session`].
///
/// # Examples
///
/// ```
/// use empdir::domain::{Credentials, SessionStore};
///
/// let mut store = SessionStore::new(Credentials::default());
/// assert!(!store.login("admin", "wrong"));
/// assert!(store.login("admin", "admin123"));
/// assert!(store.is_authenticated());
/// store.logout();
/// assert!(!store.is_authenticated());
/// ```
#[derive(Debug)]
pub struct SessionStore<A = Credentials> {
    authenticator: A,
    session: Option<Session>,
}

impl<A: Authenticator> SessionStore<A> {
    pub fn new(authenticator: A) -> Self {
        Self {
            authenticator,
            session: None,
        }
    }

    /// Attempts to log in. A rejected attempt leaves no session behind.
    pub fn login(&mut self, username: &str, password: &str) -> bool {
        if self.authenticator.verify(username, password) {
            self.session = Some(Session {
                username: username.to_string(),
                authenticated: true,
            });
            true
        } else {
            self.session = None;
            false
        }
    }

    pub fn logout(&mut self) {
        self.session = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.authenticated)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
