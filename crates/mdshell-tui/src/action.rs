//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use mdshell_core::{Capability, MainView, StateSnapshot};

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Store mutations ────────────────────────────────────────────
    /// `None` clears the main view, leaving the content area blank.
    SwitchView(Option<MainView>),
    CycleColorTheme,
    ToggleVintageMode,
    ToggleLoading,
    ToggleFullWidth,
    ToggleFullHeight,
    ToggleCapability(Capability),

    // ── Reactive inputs ────────────────────────────────────────────
    /// The store published a new snapshot.
    StateChanged(Arc<StateSnapshot>),
    /// Flip the simulated OS dark/light preference.
    ToggleSystemPreference,
    /// The system preference signal fired.
    SystemPreferenceChanged(bool),

    // ── View-level ─────────────────────────────────────────────────
    ToggleHelp,
    SelectNext,
    SelectPrev,
}
