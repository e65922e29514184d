//! Document lifecycle observer.
//!
//! Host adapters forward every ready-state-change event to
//! [`DocumentLifecycle::ready_state_changed`]; consumers subscribe to
//! streams of changes or of entries into a particular state.

use std::pin::Pin;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};
use tracing::{debug, warn};

use crate::domain::{LifecycleError, LifecycleState};

/// Buffered state changes per observer before it starts lagging.
const EVENT_CAPACITY: usize = 32;

/// Boxed stream returned by lifecycle observers.
pub type LifecycleStream<T> = Pin<Box<dyn Stream<Item = T> + Send + 'static>>;

/// Reactive view of a host document's ready state.
#[derive(Debug)]
pub struct DocumentLifecycle {
    current: Mutex<LifecycleState>,
    events: broadcast::Sender<LifecycleState>,
}

impl DocumentLifecycle {
    /// Start tracking a document currently in `initial`.
    pub fn new(initial: LifecycleState) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: Mutex::new(initial),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LifecycleState> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The most recently reported state.
    pub fn current_state(&self) -> LifecycleState {
        *self.lock()
    }

    /// Whether the document is currently [`LifecycleState::Loading`].
    pub fn is_loading(&self) -> bool {
        self.current_state() == LifecycleState::Loading
    }

    /// Whether the document is currently [`LifecycleState::Ready`].
    pub fn is_ready(&self) -> bool {
        self.current_state() == LifecycleState::Ready
    }

    /// Whether the document is currently [`LifecycleState::Completed`].
    pub fn is_completed(&self) -> bool {
        self.current_state() == LifecycleState::Completed
    }

    /// Handle a ready-state-change event from the host.
    ///
    /// Unknown ready states are rejected and not broadcast.
    pub fn ready_state_changed(&self, ready_state: &str) -> Result<LifecycleState, LifecycleError> {
        let state = LifecycleState::from_ready_state(ready_state)?;
        self.transition(state);
        Ok(state)
    }

    /// Record `state` and notify observers.
    ///
    /// Every call notifies, even when the state did not change.
    pub fn transition(&self, state: LifecycleState) {
        let mut current = self.lock();
        *current = state;
        let observers = self.events.receiver_count();
        // No receivers is not an error; the state is still recorded.
        let _ = self.events.send(state);
        debug!(%state, observers, "Document lifecycle changed");
    }

    /// Every subsequent state change.
    pub fn changes(&self) -> LifecycleStream<LifecycleState> {
        let receiver = {
            let _current = self.lock();
            self.events.subscribe()
        };
        Box::pin(Self::live(receiver))
    }

    /// Fires when the document is, or later becomes, [`LifecycleState::Loading`].
    pub fn loading(&self) -> LifecycleStream<()> {
        self.entered(LifecycleState::Loading)
    }

    /// Fires when the document is, or later becomes, [`LifecycleState::Ready`].
    pub fn ready(&self) -> LifecycleStream<()> {
        self.entered(LifecycleState::Ready)
    }

    /// Fires when the document is, or later becomes, [`LifecycleState::Completed`].
    pub fn completed(&self) -> LifecycleStream<()> {
        self.entered(LifecycleState::Completed)
    }

    /// Emits once immediately if the document is in `state`, then once per
    /// later notification of `state`.
    pub fn entered(&self, state: LifecycleState) -> LifecycleStream<()> {
        // Subscribe and read under the lock so a concurrent transition is
        // seen exactly once, either as the initial trigger or as an event.
        let (already, receiver) = {
            let current = self.lock();
            (*current == state, self.events.subscribe())
        };

        let initial = tokio_stream::iter(already.then_some(()));
        let later = Self::live(receiver).filter_map(move |next| (next == state).then_some(()));
        Box::pin(initial.chain(later))
    }

    fn live(
        receiver: broadcast::Receiver<LifecycleState>,
    ) -> impl Stream<Item = LifecycleState> + Send + 'static {
        BroadcastStream::new(receiver).filter_map(|event| match event {
            Ok(state) => Some(state),
            Err(err) => {
                warn!(%err, "Lifecycle observer lagged; skipping missed changes");
                None
            }
        })
    }
}

impl Default for DocumentLifecycle {
    fn default() -> Self {
        Self::new(LifecycleState::Loading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::task;
    use tokio_test::{assert_pending, assert_ready_eq};

    #[test]
    fn test_state_queries() {
        let lifecycle = DocumentLifecycle::default();
        assert!(lifecycle.is_loading());

        lifecycle.ready_state_changed("interactive").unwrap();
        assert!(lifecycle.is_ready());
        assert!(!lifecycle.is_loading());

        lifecycle.ready_state_changed("complete").unwrap();
        assert!(lifecycle.is_completed());
        assert_eq!(lifecycle.current_state(), LifecycleState::Completed);
    }

    #[test]
    fn test_unknown_ready_state_is_rejected_and_not_broadcast() {
        let lifecycle = DocumentLifecycle::new(LifecycleState::Ready);
        let mut changes = task::spawn(lifecycle.changes());

        let err = lifecycle.ready_state_changed("prerender").unwrap_err();
        assert_eq!(err, LifecycleError::UnknownReadyState("prerender".into()));
        assert_eq!(lifecycle.current_state(), LifecycleState::Ready);
        assert_pending!(changes.poll_next());
    }

    #[test]
    fn test_changes_has_no_initial_item() {
        let lifecycle = DocumentLifecycle::new(LifecycleState::Completed);
        let mut changes = task::spawn(lifecycle.changes());
        assert_pending!(changes.poll_next());

        lifecycle.transition(LifecycleState::Loading);
        lifecycle.transition(LifecycleState::Ready);
        assert_ready_eq!(changes.poll_next(), Some(LifecycleState::Loading));
        assert_ready_eq!(changes.poll_next(), Some(LifecycleState::Ready));
        assert_pending!(changes.poll_next());
    }

    #[test]
    fn test_entered_fires_immediately_when_already_in_state() {
        let lifecycle = DocumentLifecycle::new(LifecycleState::Completed);
        let mut completed = task::spawn(lifecycle.completed());
        let mut loading = task::spawn(lifecycle.loading());

        assert_ready_eq!(completed.poll_next(), Some(()));
        assert_pending!(completed.poll_next());
        assert_pending!(loading.poll_next());
    }

    #[test]
    fn test_entered_fires_on_each_matching_change() {
        let lifecycle = DocumentLifecycle::default();
        let mut ready = task::spawn(lifecycle.ready());
        assert_pending!(ready.poll_next());

        lifecycle.ready_state_changed("interactive").unwrap();
        assert!(ready.is_woken());
        assert_ready_eq!(ready.poll_next(), Some(()));

        lifecycle.ready_state_changed("complete").unwrap();
        assert_pending!(ready.poll_next());

        // Repeated notifications are delivered, not coalesced.
        lifecycle.ready_state_changed("interactive").unwrap();
        lifecycle.ready_state_changed("interactive").unwrap();
        assert_ready_eq!(ready.poll_next(), Some(()));
        assert_ready_eq!(ready.poll_next(), Some(()));
        assert_pending!(ready.poll_next());
    }

    #[test]
    fn test_observers_are_independent() {
        let lifecycle = DocumentLifecycle::default();
        let mut first = task::spawn(lifecycle.completed());
        let mut second = task::spawn(lifecycle.completed());

        lifecycle.transition(LifecycleState::Completed);
        assert_ready_eq!(first.poll_next(), Some(()));
        assert_ready_eq!(second.poll_next(), Some(()));
    }

    #[tokio::test]
    async fn test_completed_stream_with_async_consumer() {
        let lifecycle = DocumentLifecycle::default();
        let mut completed = lifecycle.completed();

        lifecycle.ready_state_changed("interactive").unwrap();
        lifecycle.ready_state_changed("complete").unwrap();
        assert_eq!(completed.next().await, Some(()));
    }

    #[test]
    fn test_lagging_observer_skips_missed_changes() {
        let lifecycle = DocumentLifecycle::default();
        let mut changes = task::spawn(lifecycle.changes());

        for _ in 0..EVENT_CAPACITY {
            lifecycle.transition(LifecycleState::Loading);
        }
        lifecycle.transition(LifecycleState::Ready);
        lifecycle.transition(LifecycleState::Completed);

        let mut seen = Vec::new();
        while let std::task::Poll::Ready(Some(state)) = changes.poll_next() {
            seen.push(state);
        }
        assert_eq!(seen.len(), EVENT_CAPACITY);
        assert_eq!(seen.last(), Some(&LifecycleState::Completed));
    }
}
