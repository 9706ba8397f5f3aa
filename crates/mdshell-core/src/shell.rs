//! Shell orchestration: one render decision per state observation.
//!
//! The legacy gate runs first. When vintage mode is on, the whole interface
//! is swapped for the legacy shell and nothing else is evaluated. Otherwise
//! the theme resolver, view switch, layout policy and loading gate each
//! compute independently and their results are composed into a
//! [`NormalShell`].

use serde::Serialize;
use tracing::{debug, info};

use crate::layout::LayoutModifiers;
use crate::model::{ColorTheme, StateSnapshot, ThemeVariant};
use crate::store::StateSource;
use crate::theme::resolve_theme;
use crate::view::ViewSlots;

// ── Loading gate ─────────────────────────────────────────────────────

/// Blocking overlay drawn above the rest of the interface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Overlay {
    #[default]
    Hidden,
    Visible,
}

impl Overlay {
    pub fn from_loading(loading: bool) -> Self {
        if loading { Self::Visible } else { Self::Hidden }
    }

    pub fn is_visible(self) -> bool {
        self == Self::Visible
    }
}

// ── Legacy gate ──────────────────────────────────────────────────────

/// Top-level shell mode, selected solely by vintage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ShellMode {
    Normal,
    Legacy,
}

impl ShellMode {
    pub fn from_vintage(vintage_mode: bool) -> Self {
        if vintage_mode { Self::Legacy } else { Self::Normal }
    }
}

// ── Render decision ──────────────────────────────────────────────────

/// Everything the normal shell needs to draw a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalShell {
    pub view: ViewSlots,
    pub theme: ThemeVariant,
    pub layout: LayoutModifiers,
    pub overlay: Overlay,
}

/// Output of one resolution pass, consumed by the render layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenderDecision {
    Normal(NormalShell),
    /// The legacy shell replaces the entire interface root.
    Legacy,
}

impl RenderDecision {
    pub fn mode(&self) -> ShellMode {
        match self {
            Self::Normal(_) => ShellMode::Normal,
            Self::Legacy => ShellMode::Legacy,
        }
    }

    pub fn normal(&self) -> Option<&NormalShell> {
        match self {
            Self::Normal(shell) => Some(shell),
            Self::Legacy => None,
        }
    }

    pub fn theme(&self) -> Option<ThemeVariant> {
        self.normal().map(|shell| shell.theme)
    }

    pub fn view(&self) -> Option<ViewSlots> {
        self.normal().map(|shell| shell.view)
    }

    pub fn layout(&self) -> Option<LayoutModifiers> {
        self.normal().map(|shell| shell.layout)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        self.normal().map(|shell| shell.overlay)
    }
}

/// Resolve a render decision from one snapshot and the system preference.
pub fn resolve(snapshot: &StateSnapshot, prefers_dark: bool) -> RenderDecision {
    let app = &snapshot.app;
    if ShellMode::from_vintage(app.vintage_mode) == ShellMode::Legacy {
        return RenderDecision::Legacy;
    }

    RenderDecision::Normal(NormalShell {
        view: ViewSlots::select(app.main_view),
        theme: resolve_theme(app.color_theme, prefers_dark),
        layout: LayoutModifiers::resolve(
            &snapshot.device,
            app.page_full_height,
            app.page_full_width,
        ),
        overlay: Overlay::from_loading(app.loading),
    })
}

// ── Stateful orchestrator ────────────────────────────────────────────

/// Keeps the latest decision and the inputs needed to re-run the theme
/// resolver on its own when only the system preference changes.
#[derive(Debug, Clone)]
pub struct Shell {
    prefers_dark: bool,
    color_theme: ColorTheme,
    decision: RenderDecision,
}

impl Shell {
    pub fn new(snapshot: &StateSnapshot, prefers_dark: bool) -> Self {
        let decision = resolve(snapshot, prefers_dark);
        info!(mode = ?decision.mode(), "shell mounted");
        Self {
            prefers_dark,
            color_theme: snapshot.app.color_theme,
            decision,
        }
    }

    /// Build from any read-only state source.
    pub fn from_source(source: &dyn StateSource, prefers_dark: bool) -> Self {
        Self::new(&source.snapshot(), prefers_dark)
    }

    pub fn decision(&self) -> &RenderDecision {
        &self.decision
    }

    pub fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }

    /// Full re-resolution after an application-state change.
    pub fn apply_state(&mut self, snapshot: &StateSnapshot) -> &RenderDecision {
        let next = resolve(snapshot, self.prefers_dark);
        if next.mode() != self.decision.mode() {
            info!(from = ?self.decision.mode(), to = ?next.mode(), "shell mode changed");
        }
        debug!(?next, "state resolved");
        self.color_theme = snapshot.app.color_theme;
        self.decision = next;
        &self.decision
    }

    /// Re-run only the theme resolver after a system-preference
    /// notification. In legacy mode the preference is recorded for the next
    /// normal-mode pass and the decision is left alone.
    pub fn apply_system_preference(&mut self, prefers_dark: bool) -> &RenderDecision {
        self.prefers_dark = prefers_dark;
        if let RenderDecision::Normal(shell) = &mut self.decision {
            shell.theme = resolve_theme(self.color_theme, prefers_dark);
            debug!(prefers_dark, theme = %shell.theme, "theme re-resolved");
        }
        &self.decision
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::{ApplicationState, Capability, DeviceState, MainView};
    use pretty_assertions::assert_eq;

    fn snapshot(app: ApplicationState) -> StateSnapshot {
        StateSnapshot {
            app,
            device: DeviceState::default(),
        }
    }

    #[test]
    fn vintage_mode_overrides_everything() {
        let snap = StateSnapshot {
            app: ApplicationState {
                main_view: Some(MainView::Factory),
                loading: true,
                page_full_height: true,
                page_full_width: true,
                color_theme: ColorTheme::DarkBlue,
                vintage_mode: true,
            },
            device: DeviceState::with_capabilities([Capability::ContentList]),
        };
        let decision = resolve(&snap, true);
        assert_eq!(decision, RenderDecision::Legacy);
        assert_eq!(decision.mode(), ShellMode::Legacy);
        assert!(decision.theme().is_none());
        assert!(decision.overlay().is_none());
        assert!(decision.view().is_none());
    }

    #[test]
    fn normal_mode_composes_all_resolvers() {
        let snap = StateSnapshot {
            app: ApplicationState {
                main_view: Some(MainView::Main),
                loading: true,
                page_full_width: true,
                color_theme: ColorTheme::System,
                ..ApplicationState::default()
            },
            device: DeviceState::with_capabilities([Capability::ContentList]),
        };
        let decision = resolve(&snap, true);
        assert_eq!(
            decision,
            RenderDecision::Normal(NormalShell {
                view: ViewSlots::select(Some(MainView::Main)),
                theme: ThemeVariant::Dark,
                layout: LayoutModifiers {
                    list_sized: true,
                    full_height: false,
                    full_width: true,
                },
                overlay: Overlay::Visible,
            })
        );
    }

    #[test]
    fn loading_toggle_changes_only_overlay() {
        let mut app = ApplicationState {
            main_view: Some(MainView::Main),
            ..ApplicationState::default()
        };
        let mut shell = Shell::new(&snapshot(app.clone()), false);
        let baseline = *shell.decision().normal().unwrap();

        for loading in [true, false, true] {
            app.loading = loading;
            let decision = *shell.apply_state(&snapshot(app.clone())).normal().unwrap();
            assert_eq!(decision.overlay, Overlay::from_loading(loading));
            assert_eq!(
                NormalShell {
                    overlay: baseline.overlay,
                    ..decision
                },
                baseline
            );
        }
    }

    #[test]
    fn preference_change_rereads_theme_only() {
        let app = ApplicationState {
            main_view: Some(MainView::Factory),
            color_theme: ColorTheme::System,
            loading: true,
            ..ApplicationState::default()
        };
        let mut shell = Shell::new(&snapshot(app), false);
        let before = *shell.decision().normal().unwrap();
        assert_eq!(before.theme, ThemeVariant::Light);

        let after = *shell.apply_system_preference(true).normal().unwrap();
        assert_eq!(after.theme, ThemeVariant::Dark);
        assert_eq!(
            NormalShell {
                theme: before.theme,
                ..after
            },
            before
        );
    }

    #[test]
    fn preference_change_ignored_by_explicit_theme() {
        let app = ApplicationState {
            color_theme: ColorTheme::DarkBlue,
            ..ApplicationState::default()
        };
        let mut shell = Shell::new(&snapshot(app), false);
        assert_eq!(
            shell.apply_system_preference(true).theme(),
            Some(ThemeVariant::DarkBlue)
        );
    }

    #[test]
    fn preference_recorded_while_legacy() {
        let mut app = ApplicationState {
            vintage_mode: true,
            color_theme: ColorTheme::System,
            ..ApplicationState::default()
        };
        let mut shell = Shell::new(&snapshot(app.clone()), false);
        assert_eq!(shell.apply_system_preference(true), &RenderDecision::Legacy);
        assert!(shell.prefers_dark());

        app.vintage_mode = false;
        assert_eq!(
            shell.apply_state(&snapshot(app)).theme(),
            Some(ThemeVariant::Dark)
        );
    }

    #[test]
    fn shell_reads_from_state_source() {
        let snap = snapshot(ApplicationState {
            main_view: None,
            ..ApplicationState::default()
        });
        let shell = Shell::from_source(&snap, false);
        assert!(shell.decision().view().unwrap().is_blank());
    }

    #[test]
    fn decision_serializes_with_mode_tag() {
        let legacy = serde_json::to_value(RenderDecision::Legacy).unwrap();
        assert_eq!(legacy, serde_json::json!({ "mode": "legacy" }));

        let normal = serde_json::to_value(resolve(&StateSnapshot::default(), false)).unwrap();
        assert_eq!(normal["mode"], "normal");
        assert_eq!(normal["theme"], "light");
        assert_eq!(normal["overlay"], "hidden");
    }
}
