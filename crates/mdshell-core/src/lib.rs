// mdshell-core: shell-resolution logic between the state store and the render layer.

pub mod error;
pub mod layout;
pub mod model;
pub mod preference;
pub mod shell;
pub mod store;
pub mod theme;
pub mod view;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use layout::{Breakpoint, LayoutMetrics, LayoutModifiers, PanelSize};
pub use model::{
    ApplicationState, Capability, ColorTheme, DeviceState, MainView, StateSnapshot, ThemeVariant,
};
pub use preference::{
    FixedPreference, PreferenceListener, PreferenceSignal, PreferenceSubscription,
    SystemPreference,
};
pub use shell::{NormalShell, Overlay, RenderDecision, Shell, ShellMode, resolve};
pub use store::{StateReader, StateSource, StateStore, StateStream};
pub use theme::{ThemeFactory, resolve_theme};
pub use view::ViewSlots;
