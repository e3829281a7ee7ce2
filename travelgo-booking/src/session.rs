use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

use travelgo_core::BookingDraft;

use crate::BookingError;

/// Per-token scratch state: who is logged in, and at most one in-flight
/// booking draft.
#[derive(Debug, Default, Clone)]
pub struct Session {
    pub identity: Option<String>,
    pub draft: Option<BookingDraft>,
}

struct Entry {
    session: Session,
    expires_at: Instant,
}

/// Process-local session storage keyed by the opaque cookie token.
///
/// Drafts live only between the book and payment steps and are deliberately
/// lost on restart. Every operation takes the map lock exactly once, so draft
/// reads and writes within a request are atomic per session.
pub struct SessionStore {
    ttl: Duration,
    entries: Mutex<HashMap<String, Entry>>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Takes the map lock and drops every expired entry, so the map never
    /// holds more than the live sessions.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry>> {
        let mut entries = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries
    }

    /// Insert-or-refresh path, for operations that may establish a session.
    fn with_session<T>(&self, token: &str, f: impl FnOnce(&mut Session) -> T) -> T {
        let mut entries = self.lock();
        let entry = entries.entry(token.to_string()).or_insert_with(|| Entry {
            session: Session::default(),
            expires_at: Instant::now() + self.ttl,
        });
        entry.expires_at = Instant::now() + self.ttl;
        f(&mut entry.session)
    }

    /// Existing-session path. Never allocates an entry, so arbitrary
    /// client-supplied tokens cannot grow the map.
    fn with_existing<T>(&self, token: &str, f: impl FnOnce(&mut Session) -> T) -> Option<T> {
        let mut entries = self.lock();
        let entry = entries.get_mut(token)?;
        entry.expires_at = Instant::now() + self.ttl;
        Some(f(&mut entry.session))
    }

    pub fn get_identity(&self, token: &str) -> Option<String> {
        self.with_existing(token, |session| session.identity.clone())
            .flatten()
    }

    /// Overwrites any prior identity without touching an in-flight draft.
    pub fn set_identity(&self, token: &str, email: &str) {
        self.with_session(token, |session| session.identity = Some(email.to_string()));
    }

    /// Logout: the entry is dropped wholesale, draft included.
    pub fn clear(&self, token: &str) {
        self.lock().remove(token);
    }

    /// Installs a new draft, silently discarding any previous one. Starting a
    /// second booking before paying for the first abandons the first.
    pub fn create_draft(&self, token: &str, draft: BookingDraft) -> Result<BookingDraft, BookingError> {
        self.with_existing(token, |session| {
            if session.identity.is_none() {
                return Err(BookingError::Unauthenticated);
            }
            session.draft = Some(draft.clone());
            Ok(draft)
        })
        .unwrap_or(Err(BookingError::Unauthenticated))
    }

    pub fn mutate_draft<T>(
        &self,
        token: &str,
        f: impl FnOnce(&mut BookingDraft) -> T,
    ) -> Result<T, BookingError> {
        self.with_existing(token, |session| match session.draft.as_mut() {
            Some(draft) => Ok(f(draft)),
            None => Err(BookingError::NoDraft),
        })
        .unwrap_or(Err(BookingError::NoDraft))
    }

    pub fn peek_draft(&self, token: &str) -> Result<BookingDraft, BookingError> {
        self.with_existing(token, |session| {
            session.draft.clone().ok_or(BookingError::NoDraft)
        })
        .unwrap_or(Err(BookingError::NoDraft))
    }

    /// Removes and returns the draft; payment consumes it exactly once.
    pub fn take_draft(&self, token: &str) -> Result<BookingDraft, BookingError> {
        self.with_existing(token, |session| {
            session.draft.take().ok_or(BookingError::NoDraft)
        })
        .unwrap_or(Err(BookingError::NoDraft))
    }

    /// Compensation path: puts the draft back after a failed persistence
    /// write so payment can be retried.
    pub fn restore_draft(&self, token: &str, draft: BookingDraft) {
        self.with_session(token, |session| session.draft = Some(draft));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use travelgo_core::BookingKind;
    use uuid::Uuid;

    fn draft_for(email: &str, details: &str) -> BookingDraft {
        BookingDraft {
            booking_id: Uuid::new_v4(),
            email: email.to_string(),
            kind: BookingKind::Bus,
            source: "Hyderabad".to_string(),
            destination: "Bangalore".to_string(),
            date: "2026-09-01".to_string(),
            details: details.to_string(),
            price: Decimal::new(120000, 2),
        }
    }

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(300))
    }

    #[test]
    fn test_identity_lifecycle() {
        let sessions = store();
        assert_eq!(sessions.get_identity("t1"), None);

        sessions.set_identity("t1", "a@example.com");
        assert_eq!(sessions.get_identity("t1").as_deref(), Some("a@example.com"));

        sessions.clear("t1");
        assert_eq!(sessions.get_identity("t1"), None);
    }

    #[test]
    fn test_create_draft_requires_identity() {
        let sessions = store();
        let err = sessions.create_draft("t1", draft_for("a@example.com", "Volvo AC"));
        assert!(matches!(err, Err(BookingError::Unauthenticated)));
    }

    #[test]
    fn test_second_draft_overwrites_first() {
        let sessions = store();
        sessions.set_identity("t1", "a@example.com");

        let first = sessions.create_draft("t1", draft_for("a@example.com", "first")).unwrap();
        let second = sessions.create_draft("t1", draft_for("a@example.com", "second")).unwrap();

        let current = sessions.peek_draft("t1").unwrap();
        assert_eq!(current.booking_id, second.booking_id);
        assert_ne!(current.booking_id, first.booking_id);
    }

    #[test]
    fn test_take_draft_consumes_exactly_once() {
        let sessions = store();
        sessions.set_identity("t1", "a@example.com");
        sessions.create_draft("t1", draft_for("a@example.com", "Volvo AC")).unwrap();

        assert!(sessions.take_draft("t1").is_ok());
        assert!(matches!(sessions.take_draft("t1"), Err(BookingError::NoDraft)));
        assert!(matches!(sessions.mutate_draft("t1", |_| ()), Err(BookingError::NoDraft)));
    }

    #[test]
    fn test_logout_abandons_draft() {
        let sessions = store();
        sessions.set_identity("t1", "a@example.com");
        sessions.create_draft("t1", draft_for("a@example.com", "Volvo AC")).unwrap();

        sessions.clear("t1");
        assert!(matches!(sessions.peek_draft("t1"), Err(BookingError::NoDraft)));
    }

    #[test]
    fn test_expired_session_resets() {
        let sessions = SessionStore::new(Duration::ZERO);
        sessions.set_identity("t1", "a@example.com");
        assert_eq!(sessions.get_identity("t1"), None);
    }

    #[test]
    fn test_reads_with_unknown_tokens_allocate_nothing() {
        let sessions = store();
        for i in 0..10_000 {
            assert_eq!(sessions.get_identity(&format!("junk-{i}")), None);
            assert!(matches!(
                sessions.peek_draft(&format!("junk-{i}")),
                Err(BookingError::NoDraft)
            ));
        }
        assert!(sessions.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_expired_entries_are_evicted() {
        let sessions = SessionStore::new(Duration::ZERO);
        for i in 0..100 {
            sessions.set_identity(&format!("t{i}"), "a@example.com");
        }
        // Any access sweeps out dead entries; the map holds live sessions only.
        sessions.get_identity("t0");
        assert!(sessions.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_draft_without_session_entry_is_unauthenticated() {
        let sessions = store();
        let err = sessions.create_draft("never-seen", draft_for("a@example.com", "Volvo AC"));
        assert!(matches!(err, Err(BookingError::Unauthenticated)));
        assert!(sessions.entries.lock().unwrap().is_empty());
    }

    #[test]
    fn test_sessions_are_isolated_by_token() {
        let sessions = store();
        sessions.set_identity("t1", "a@example.com");
        sessions.set_identity("t2", "b@example.com");
        sessions.create_draft("t1", draft_for("a@example.com", "Volvo AC")).unwrap();

        assert!(matches!(sessions.peek_draft("t2"), Err(BookingError::NoDraft)));
        assert_eq!(sessions.get_identity("t2").as_deref(), Some("b@example.com"));
    }
}
