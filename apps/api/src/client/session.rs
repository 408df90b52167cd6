use std::sync::Arc;

use tokio::sync::watch;

/// A sign-in state change published to session subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
    SignedIn,
    SignedOut,
}

/// The client's session: the current access token plus change notifications.
///
/// Clones share the same state, so a component can hold a clone and
/// subscribe instead of reading an ambient global.
#[derive(Clone)]
pub struct Session {
    token: Arc<watch::Sender<Option<String>>>,
}

impl Session {
    pub fn new() -> Self {
        let (token, _) = watch::channel(None);
        Self {
            token: Arc::new(token),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token);
        session
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        self.token.send_replace(Some(token.into()));
    }

    pub fn sign_out(&self) {
        self.token.send_replace(None);
    }

    pub fn access_token(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.token.borrow().is_some()
    }

    pub fn subscribe(&self) -> SessionEvents {
        SessionEvents {
            rx: self.token.subscribe(),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SessionEvents {
    rx: watch::Receiver<Option<String>>,
}

impl SessionEvents {
    /// The change published since the last call, if any, without waiting.
    /// `None` as well once every `Session` clone is dropped.
    pub fn pending(&mut self) -> Option<AuthEvent> {
        if !self.rx.has_changed().unwrap_or(false) {
            return None;
        }
        let event = if self.rx.borrow_and_update().is_some() {
            AuthEvent::SignedIn
        } else {
            AuthEvent::SignedOut
        };
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribers_see_sign_in_and_sign_out() {
        let session = Session::new();
        let mut events = session.subscribe();
        assert!(!session.is_signed_in());

        session.sign_in("token-1");
        assert_eq!(events.pending(), Some(AuthEvent::SignedIn));
        assert_eq!(session.access_token().as_deref(), Some("token-1"));

        session.sign_out();
        assert_eq!(events.pending(), Some(AuthEvent::SignedOut));
        assert!(session.access_token().is_none());
    }

    #[test]
    fn test_pending_does_not_wait() {
        let session = Session::with_token("t");
        let mut events = session.subscribe();
        assert_eq!(events.pending(), None);

        session.sign_out();
        assert_eq!(events.pending(), Some(AuthEvent::SignedOut));
        assert_eq!(events.pending(), None);
    }

    #[test]
    fn test_clones_share_state() {
        let session = Session::new();
        let clone = session.clone();
        clone.sign_in("shared");
        assert_eq!(session.access_token().as_deref(), Some("shared"));
    }

    #[test]
    fn test_no_events_after_session_dropped() {
        let session = Session::with_token("t");
        let mut events = session.subscribe();
        drop(session);
        assert_eq!(events.pending(), None);
    }
}
