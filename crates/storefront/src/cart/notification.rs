//! Cart notification banner with a cancellable hide timer.
//!
//! Each shopper has one [`Notifier`]. Showing a message replaces whatever is
//! on screen and aborts the previous hide timer, so an older notification
//! can never hide a newer one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use moka::sync::Cache;
use tokio::task::AbortHandle;
use tower_sessions::Session;
use uuid::Uuid;

use crate::models::session_keys;

/// Upper bound on live notifiers kept in memory.
const MAX_NOTIFIERS: u64 = 100_000;

/// A notification banner owned by one shopper.
///
/// Cloning is cheap; clones share the same banner.
#[derive(Debug, Clone)]
pub struct Notifier {
    inner: Arc<NotifierInner>,
}

#[derive(Debug)]
struct NotifierInner {
    hide_after: Duration,
    banner: Mutex<Banner>,
}

#[derive(Debug, Default)]
struct Banner {
    message: Option<String>,
    generation: u64,
    pending_hide: Option<AbortHandle>,
}

impl Notifier {
    /// Create a notifier whose messages stay visible for `hide_after`.
    #[must_use]
    pub fn new(hide_after: Duration) -> Self {
        Self {
            inner: Arc::new(NotifierInner {
                hide_after,
                banner: Mutex::new(Banner::default()),
            }),
        }
    }

    /// Show a message, cancelling any pending hide and scheduling a new one.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn show(&self, message: impl Into<String>) {
        let mut banner = self.inner.lock();
        if let Some(pending) = banner.pending_hide.take() {
            pending.abort();
        }
        banner.generation = banner.generation.wrapping_add(1);
        banner.message = Some(message.into());

        let generation = banner.generation;
        let hide_after = self.inner.hide_after;
        let weak: Weak<NotifierInner> = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            if let Some(inner) = weak.upgrade() {
                inner.hide(generation);
            }
        });
        banner.pending_hide = Some(task.abort_handle());
    }

    /// The message currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.inner.lock().message.clone()
    }
}

impl NotifierInner {
    fn lock(&self) -> MutexGuard<'_, Banner> {
        self.banner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hide the banner if it still shows the message from `generation`.
    fn hide(&self, generation: u64) {
        let mut banner = self.lock();
        if banner.generation == generation {
            banner.message = None;
            banner.pending_hide = None;
        }
    }
}

impl Drop for NotifierInner {
    fn drop(&mut self) {
        let banner = self
            .banner
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = banner.pending_hide.take() {
            pending.abort();
        }
    }
}

/// Notifiers for all shoppers, keyed by an id stored in each session.
///
/// Idle notifiers are evicted; a shopper coming back later simply gets a
/// fresh, empty banner.
#[derive(Clone)]
pub struct NotifierRegistry {
    notifiers: Cache<Uuid, Notifier>,
    hide_after: Duration,
}

impl NotifierRegistry {
    /// Create a registry.
    ///
    /// * `hide_after` - how long each message stays visible
    /// * `idle_expiry` - how long an unused notifier is kept
    #[must_use]
    pub fn new(hide_after: Duration, idle_expiry: Duration) -> Self {
        Self {
            notifiers: Cache::builder()
                .max_capacity(MAX_NOTIFIERS)
                .time_to_idle(idle_expiry)
                .build(),
            hide_after,
        }
    }

    /// The notifier for an id, created on first use.
    #[must_use]
    pub fn get(&self, id: Uuid) -> Notifier {
        self.notifiers
            .get_with(id, || Notifier::new(self.hide_after))
    }

    /// The shopper's notifier, if their session already has one.
    pub async fn existing(&self, session: &Session) -> Option<Notifier> {
        match session.get::<Uuid>(session_keys::NOTIFIER_ID).await {
            Ok(id) => id.map(|id| self.get(id)),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read notifier id from session");
                None
            }
        }
    }

    /// The shopper's notifier, assigning one to the session if needed.
    ///
    /// Returns `None` only if the session cannot be read or written; the
    /// caller carries on without a banner.
    pub async fn ensure(&self, session: &Session) -> Option<Notifier> {
        match session.get::<Uuid>(session_keys::NOTIFIER_ID).await {
            Ok(Some(id)) => return Some(self.get(id)),
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read notifier id from session");
                return None;
            }
        }

        let id = Uuid::new_v4();
        if let Err(e) = session.insert(session_keys::NOTIFIER_ID, id).await {
            tracing::warn!(error = %e, "Failed to store notifier id in session");
            return None;
        }
        Some(self.get(id))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_sessions::MemoryStore;

    use super::*;

    const HIDE_AFTER: Duration = Duration::from_millis(2_000);

    async fn advance(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_message_hides_after_duration() {
        let notifier = Notifier::new(HIDE_AFTER);
        assert!(notifier.current().is_none());

        notifier.show("\"Widget\" fue añadido al carrito.");
        assert_eq!(
            notifier.current().as_deref(),
            Some("\"Widget\" fue añadido al carrito.")
        );

        advance(1_900).await;
        assert!(notifier.current().is_some());

        advance(200).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_message_cancels_pending_hide() {
        let notifier = Notifier::new(HIDE_AFTER);
        notifier.show("primero");

        advance(1_500).await;
        notifier.show("segundo");

        // The first hide would have fired at 2000ms.
        advance(1_000).await;
        assert_eq!(notifier.current().as_deref(), Some("segundo"));

        advance(600).await;
        assert_eq!(notifier.current().as_deref(), Some("segundo"));

        advance(500).await;
        assert!(notifier.current().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_clones_share_banner() {
        let notifier = Notifier::new(HIDE_AFTER);
        let clone = notifier.clone();
        notifier.show("hola");
        assert_eq!(clone.current().as_deref(), Some("hola"));
    }

    #[tokio::test]
    async fn test_registry_returns_same_notifier_for_id() {
        let registry = NotifierRegistry::new(HIDE_AFTER, Duration::from_secs(60));
        let id = Uuid::new_v4();
        registry.get(id).show("hola");
        assert_eq!(registry.get(id).current().as_deref(), Some("hola"));
        assert!(registry.get(Uuid::new_v4()).current().is_none());
    }

    #[tokio::test]
    async fn test_registry_session_binding() {
        let registry = NotifierRegistry::new(HIDE_AFTER, Duration::from_secs(60));
        let session = Session::new(None, Arc::new(MemoryStore::default()), None);

        assert!(registry.existing(&session).await.is_none());

        let notifier = registry.ensure(&session).await.unwrap();
        notifier.show("hola");

        let again = registry.existing(&session).await.unwrap();
        assert_eq!(again.current().as_deref(), Some("hola"));

        let ensured = registry.ensure(&session).await.unwrap();
        assert_eq!(ensured.current().as_deref(), Some("hola"));
    }
}
