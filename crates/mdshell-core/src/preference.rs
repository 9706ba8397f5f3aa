// ── System "prefers dark" signal ──
//
// The OS-level preference is an injected event source with an explicit
// subscribe/unsubscribe lifecycle. `PreferenceSignal` is the settable
// implementation the host feeds; `FixedPreference` pins a value for tests.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use dashmap::DashMap;
use tracing::debug;

/// Change callback invoked with the new "prefers dark" value.
pub type PreferenceListener = Box<dyn Fn(bool) + Send + Sync>;

/// Read + change-notification contract for the system preference.
pub trait SystemPreference: Send + Sync {
    /// Current "prefers dark" value.
    fn prefers_dark(&self) -> bool;

    /// Register `on_change`. The callback fires once per change until the
    /// returned subscription is released.
    fn subscribe(&self, on_change: PreferenceListener) -> PreferenceSubscription;
}

#[derive(Default)]
struct Registry {
    listeners: DashMap<u64, Arc<dyn Fn(bool) + Send + Sync>>,
    next_id: AtomicU64,
}

/// Handle for a registered listener. Releasing it (explicitly or by drop)
/// unregisters the listener.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct PreferenceSubscription {
    registry: Option<Weak<Registry>>,
    id: u64,
}

impl PreferenceSubscription {
    /// A subscription that is not attached to any source.
    pub fn detached() -> Self {
        Self {
            registry: None,
            id: 0,
        }
    }

    /// Whether the listener is still registered with a live source.
    pub fn is_active(&self) -> bool {
        self.registry
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|registry| registry.listeners.contains_key(&self.id))
    }

    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(registry) = self.registry.take().and_then(|weak| weak.upgrade()) {
            registry.listeners.remove(&self.id);
            debug!(id = self.id, "system preference listener removed");
        }
    }
}

impl Drop for PreferenceSubscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for PreferenceSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceSubscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

// ── Settable signal ────────────────────────────────────────────────

/// Settable preference source. Clones share the same value and listeners.
#[derive(Clone)]
pub struct PreferenceSignal {
    current: Arc<AtomicBool>,
    registry: Arc<Registry>,
}

impl PreferenceSignal {
    pub fn new(prefers_dark: bool) -> Self {
        Self {
            current: Arc::new(AtomicBool::new(prefers_dark)),
            registry: Arc::new(Registry::default()),
        }
    }

    /// Publish a new value. Listeners are notified exactly once when the
    /// value changes; setting the same value is a no-op. Returns the number
    /// of listeners notified.
    pub fn set(&self, prefers_dark: bool) -> usize {
        let previous = self.current.swap(prefers_dark, Ordering::SeqCst);
        if previous == prefers_dark {
            return 0;
        }

        // Snapshot first so callbacks may unsubscribe without holding a shard lock.
        let listeners: Vec<_> = self
            .registry
            .listeners
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        debug!(
            prefers_dark,
            listeners = listeners.len(),
            "system preference changed"
        );
        for listener in &listeners {
            (listener.as_ref())(prefers_dark);
        }
        listeners.len()
    }

    /// Flip the current value, notifying listeners.
    pub fn toggle(&self) -> bool {
        let next = !self.prefers_dark();
        self.set(next);
        next
    }

    pub fn listener_count(&self) -> usize {
        self.registry.listeners.len()
    }
}

impl SystemPreference for PreferenceSignal {
    fn prefers_dark(&self) -> bool {
        self.current.load(Ordering::SeqCst)
    }

    fn subscribe(&self, on_change: PreferenceListener) -> PreferenceSubscription {
        let id = self.registry.next_id.fetch_add(1, Ordering::Relaxed);
        self.registry.listeners.insert(id, Arc::from(on_change));
        debug!(id, "system preference listener added");
        PreferenceSubscription {
            registry: Some(Arc::downgrade(&self.registry)),
            id,
        }
    }
}

impl std::fmt::Debug for PreferenceSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceSignal")
            .field("prefers_dark", &self.prefers_dark())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

// ── Fixed value ────────────────────────────────────────────────────

/// A preference that never changes.
#[derive(Debug, Clone, Copy)]
pub struct FixedPreference(pub bool);

impl SystemPreference for FixedPreference {
    fn prefers_dark(&self) -> bool {
        self.0
    }

    fn subscribe(&self, _on_change: PreferenceListener) -> PreferenceSubscription {
        PreferenceSubscription::detached()
    }
}

// ── Environment detection ──────────────────────────────────────────

/// Interpret a `COLORFGBG` value ("fg;bg" or "fg;default;bg").
///
/// Background indexes 0-6 and 8 are dark ANSI colors.
pub fn parse_colorfgbg(value: &str) -> Option<bool> {
    let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    match bg {
        0..=6 | 8 => Some(true),
        7 | 9..=15 => Some(false),
        _ => None,
    }
}

/// Best-effort guess at the terminal's dark/light background.
pub fn detect_from_env() -> Option<bool> {
    std::env::var("COLORFGBG")
        .ok()
        .as_deref()
        .and_then(parse_colorfgbg)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn recorder() -> (Arc<Mutex<Vec<bool>>>, PreferenceListener) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let listener: PreferenceListener = Box::new(move |dark| sink.lock().unwrap().push(dark));
        (seen, listener)
    }

    #[test]
    fn notifies_once_per_change() {
        let signal = PreferenceSignal::new(false);
        let (seen, listener) = recorder();
        let _sub = signal.subscribe(listener);

        assert_eq!(signal.set(true), 1);
        assert_eq!(signal.set(true), 0);
        assert_eq!(signal.set(false), 1);

        assert_eq!(*seen.lock().unwrap(), vec![true, false]);
        assert!(!signal.prefers_dark());
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let signal = PreferenceSignal::new(false);
        let (seen, listener) = recorder();
        let sub = signal.subscribe(listener);
        assert!(sub.is_active());
        assert_eq!(signal.listener_count(), 1);

        sub.unsubscribe();
        assert_eq!(signal.listener_count(), 0);
        signal.set(true);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn dropping_subscription_unsubscribes() {
        let signal = PreferenceSignal::new(true);
        {
            let (_seen, listener) = recorder();
            let _sub = signal.subscribe(listener);
            assert_eq!(signal.listener_count(), 1);
        }
        assert_eq!(signal.listener_count(), 0);
    }

    #[test]
    fn subscription_outliving_signal_is_inert() {
        let signal = PreferenceSignal::new(false);
        let (_seen, listener) = recorder();
        let sub = signal.subscribe(listener);
        drop(signal);
        assert!(!sub.is_active());
        sub.unsubscribe();
    }

    #[test]
    fn clones_share_listeners() {
        let signal = PreferenceSignal::new(false);
        let source = signal.clone();
        let (seen, listener) = recorder();
        let _sub = signal.subscribe(listener);

        assert!(source.toggle());
        assert_eq!(*seen.lock().unwrap(), vec![true]);
    }

    #[test]
    fn fixed_preference_never_fires() {
        let fixed = FixedPreference(true);
        let (seen, listener) = recorder();
        let sub = fixed.subscribe(listener);
        assert!(fixed.prefers_dark());
        assert!(!sub.is_active());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn colorfgbg_parsing() {
        assert_eq!(parse_colorfgbg("15;0"), Some(true));
        assert_eq!(parse_colorfgbg("0;15"), Some(false));
        assert_eq!(parse_colorfgbg("12;default;8"), Some(true));
        assert_eq!(parse_colorfgbg("0;7"), Some(false));
        assert_eq!(parse_colorfgbg("garbage"), None);
        assert_eq!(parse_colorfgbg("0;200"), None);
    }
}
