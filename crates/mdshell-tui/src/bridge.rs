//! Bridges from the reactive inputs into the TUI action channel.
//!
//! The state bridge runs as a background task forwarding every published
//! snapshot. The preference bridge is a plain listener: each system
//! preference notification becomes exactly one action.

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use mdshell_core::{PreferenceSubscription, StateStream, SystemPreference};

use crate::action::Action;

/// Forward store changes as [`Action::StateChanged`] until cancelled or
/// until the store goes away.
pub async fn run_state_bridge(
    stream: StateStream,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    let mut updates = stream.into_stream();
    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            changed = updates.next() => {
                let Some(snapshot) = changed else { break };
                if action_tx.send(Action::StateChanged(snapshot)).is_err() {
                    break;
                }
            }
        }
    }
    debug!("state bridge shut down");
}

/// Subscribe to the system preference, turning each notification into an
/// [`Action::SystemPreferenceChanged`]. Drop or unsubscribe the returned
/// handle at teardown.
pub fn subscribe_preference(
    preference: &dyn SystemPreference,
    action_tx: mpsc::UnboundedSender<Action>,
) -> PreferenceSubscription {
    preference.subscribe(Box::new(move |prefers_dark| {
        let _ = action_tx.send(Action::SystemPreferenceChanged(prefers_dark));
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mdshell_core::{MainView, PreferenceSignal, StateStore};

    #[test]
    fn preference_notifications_become_actions() {
        let signal = PreferenceSignal::new(false);
        let (tx, mut rx) = mpsc::unbounded_channel();
        let subscription = subscribe_preference(&signal, tx);

        signal.set(true);
        signal.set(false);
        assert_eq!(rx.try_recv().unwrap(), Action::SystemPreferenceChanged(true));
        assert_eq!(rx.try_recv().unwrap(), Action::SystemPreferenceChanged(false));

        subscription.unsubscribe();
        signal.set(true);
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn state_bridge_forwards_snapshots() {
        let store = StateStore::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(run_state_bridge(store.subscribe(), tx, cancel.clone()));

        store.update(|s| s.app.main_view = Some(MainView::Factory));
        let Some(Action::StateChanged(snapshot)) = rx.recv().await else {
            panic!("expected StateChanged");
        };
        assert_eq!(snapshot.app.main_view, Some(MainView::Factory));

        cancel.cancel();
        task.await.unwrap();
        assert_eq!(store.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn state_bridge_stops_with_the_store() {
        let store = StateStore::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(run_state_bridge(
            store.subscribe(),
            tx,
            CancellationToken::new(),
        ));

        drop(store);
        task.await.unwrap();
        assert!(rx.recv().await.is_none());
    }
}
