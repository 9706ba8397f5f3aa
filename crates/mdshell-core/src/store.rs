// ── Reactive state store ──
//
// Host-owned holder for the application + device state. Mutations are
// broadcast to subscribers via a `watch` channel; the shell itself only
// ever sees the read side.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures_core::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::trace;

use crate::model::StateSnapshot;

/// Read-only access to the current state.
pub trait StateSource {
    /// One coherent observation of application and device state.
    fn snapshot(&self) -> StateSnapshot;
}

/// Central reactive store for shell state.
///
/// `update` is the only mutation path and notifies subscribers only when
/// the snapshot actually changed.
pub struct StateStore {
    state: watch::Sender<Arc<StateSnapshot>>,
}

impl StateStore {
    pub fn new(initial: StateSnapshot) -> Self {
        let (state, _) = watch::channel(Arc::new(initial));
        Self { state }
    }

    /// Apply `mutate` to a copy of the current snapshot and publish it.
    /// Returns `true` if the state changed.
    pub fn update<F>(&self, mutate: F) -> bool
    where
        F: FnOnce(&mut StateSnapshot),
    {
        self.state.send_if_modified(|current| {
            let mut next = StateSnapshot::clone(current);
            mutate(&mut next);
            if next == **current {
                return false;
            }
            trace!(?next, "state updated");
            *current = Arc::new(next);
            true
        })
    }

    /// Cheap shared handle to the latest snapshot.
    pub fn current(&self) -> Arc<StateSnapshot> {
        Arc::clone(&self.state.borrow())
    }

    /// A cloneable read-only handle.
    pub fn reader(&self) -> StateReader {
        StateReader {
            receiver: self.state.subscribe(),
        }
    }

    pub fn subscribe(&self) -> StateStream {
        StateStream::new(self.state.subscribe())
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.receiver_count()
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(StateSnapshot::default())
    }
}

impl StateSource for StateStore {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::clone(&self.state.borrow())
    }
}

/// Read-only view of a [`StateStore`]. Carries no mutation capability.
#[derive(Clone)]
pub struct StateReader {
    receiver: watch::Receiver<Arc<StateSnapshot>>,
}

impl StateSource for StateReader {
    fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::clone(&self.receiver.borrow())
    }
}

impl StateSource for StateSnapshot {
    fn snapshot(&self) -> StateSnapshot {
        self.clone()
    }
}

// ── Subscriptions ────────────────────────────────────────────────────

/// A subscription to state changes.
///
/// Provides the snapshot seen at creation time plus reactive change
/// notification via `changed()` or by converting into a `Stream`.
pub struct StateStream {
    current: Arc<StateSnapshot>,
    receiver: watch::Receiver<Arc<StateSnapshot>>,
}

impl StateStream {
    fn new(mut receiver: watch::Receiver<Arc<StateSnapshot>>) -> Self {
        let current = Arc::clone(&receiver.borrow_and_update());
        Self { current, receiver }
    }

    /// Snapshot from the most recent `changed()` (or creation).
    pub fn current(&self) -> &Arc<StateSnapshot> {
        &self.current
    }

    /// Wait for the next change. Returns `None` once the store is dropped.
    pub async fn changed(&mut self) -> Option<Arc<StateSnapshot>> {
        self.receiver.changed().await.ok()?;
        let snap = Arc::clone(&self.receiver.borrow_and_update());
        self.current = Arc::clone(&snap);
        Some(snap)
    }

    /// Every snapshot published after `current()`, as a `Stream`.
    pub fn into_stream(self) -> StateWatchStream {
        StateWatchStream {
            inner: WatchStream::from_changes(self.receiver),
        }
    }
}

/// `Stream` adapter yielding every published snapshot.
pub struct StateWatchStream {
    inner: WatchStream<Arc<StateSnapshot>>,
}

impl Stream for StateWatchStream {
    type Item = Arc<StateSnapshot>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}
