#![allow(clippy::unwrap_used)]
// End-to-end tests: store → shell → decision, with a live preference signal.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use mdshell_core::{
    ApplicationState, Capability, ColorTheme, LayoutMetrics, MainView, Overlay, PreferenceSignal,
    RenderDecision, Shell, ShellMode, StateSnapshot, StateSource, StateStore, SystemPreference,
    ThemeVariant, ViewSlots,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn store_with(app: ApplicationState) -> StateStore {
    StateStore::new(StateSnapshot {
        app,
        ..StateSnapshot::default()
    })
}

fn main_view_app() -> ApplicationState {
    ApplicationState {
        main_view: Some(MainView::Main),
        ..ApplicationState::default()
    }
}

// ── View switch ─────────────────────────────────────────────────────

#[test]
fn main_view_activates_main_and_controls() {
    let store = store_with(main_view_app());
    let shell = Shell::from_source(&store, false);
    let view = shell.decision().view().unwrap();

    assert!(view.main);
    assert!(view.controls);
    assert!(!view.welcome);
    assert!(!view.factory);
}

#[test]
fn unset_view_leaves_content_blank() {
    let store = store_with(ApplicationState {
        main_view: MainView::parse_lenient(""),
        ..ApplicationState::default()
    });
    let shell = Shell::from_source(&store.reader(), false);
    assert_eq!(shell.decision().view(), Some(ViewSlots::default()));
}

// ── Legacy gate ─────────────────────────────────────────────────────

#[test]
fn vintage_mode_wins_over_factory_and_loading() {
    let store = store_with(ApplicationState {
        main_view: Some(MainView::Factory),
        loading: true,
        vintage_mode: true,
        ..ApplicationState::default()
    });
    let shell = Shell::from_source(&store, true);
    assert_eq!(shell.decision(), &RenderDecision::Legacy);
}

#[test]
fn toggling_vintage_mode_switches_shell_mode() {
    let store = store_with(main_view_app());
    let mut shell = Shell::from_source(&store, false);
    assert_eq!(shell.decision().mode(), ShellMode::Normal);

    store.update(|s| s.app.vintage_mode = true);
    assert_eq!(shell.apply_state(&store.snapshot()).mode(), ShellMode::Legacy);

    store.update(|s| s.app.vintage_mode = false);
    assert_eq!(shell.apply_state(&store.snapshot()).mode(), ShellMode::Normal);
}

// ── Loading gate ────────────────────────────────────────────────────

#[test]
fn loading_toggles_overlay_in_lockstep() {
    let store = store_with(main_view_app());
    let mut shell = Shell::from_source(&store, false);
    let baseline = *shell.decision();

    for loading in [true, false, true] {
        store.update(|s| s.app.loading = loading);
        let decision = *shell.apply_state(&store.snapshot());
        assert_eq!(decision.overlay(), Some(Overlay::from_loading(loading)));
        assert_eq!(decision.view(), baseline.view());
        assert_eq!(decision.theme(), baseline.theme());
        assert_eq!(decision.layout(), baseline.layout());
    }
}

// ── Capability layout ───────────────────────────────────────────────

#[test]
fn content_list_capability_drives_list_sizing() {
    let store = store_with(ApplicationState {
        page_full_width: true,
        ..main_view_app()
    });
    let mut shell = Shell::from_source(&store, false);

    store.update(|s| {
        s.device.device_capabilities.insert(Capability::ContentList);
    });
    let with = shell.apply_state(&store.snapshot()).layout().unwrap();
    assert!(with.list_sized);
    assert!(with.full_width);
    assert!(!with.full_height);

    store.update(|s| {
        s.device.device_capabilities.remove(&Capability::ContentList);
    });
    let without = shell.apply_state(&store.snapshot()).layout().unwrap();
    assert!(!without.list_sized);
    assert_eq!(without.full_width, with.full_width);
    assert_eq!(without.full_height, with.full_height);
}

#[test]
fn full_height_beats_list_height() {
    let store = store_with(ApplicationState {
        page_full_height: true,
        ..main_view_app()
    });
    store.update(|s| {
        s.device.device_capabilities.insert(Capability::ContentList);
    });
    let shell = Shell::from_source(&store, false);
    let layout = shell.decision().layout().unwrap();

    let metrics = LayoutMetrics::default();
    let both = metrics.panel_size(layout, (120, 60));
    let list_only = metrics.panel_size(
        mdshell_core::LayoutModifiers {
            full_height: false,
            ..layout
        },
        (120, 60),
    );
    assert!(both.height >= list_only.height);
    assert_eq!(both.height, 55);

    let full_only = metrics.panel_size(
        mdshell_core::LayoutModifiers {
            list_sized: false,
            ..layout
        },
        (120, 32),
    );
    assert_eq!(metrics.panel_size(layout, (120, 32)).height, full_only.height);
}

// ── Theme + system preference ───────────────────────────────────────

#[test]
fn system_theme_tracks_preference_notifications() {
    let store = store_with(ApplicationState {
        color_theme: ColorTheme::System,
        ..main_view_app()
    });
    let signal = PreferenceSignal::new(false);
    let mut shell = Shell::from_source(&store, signal.prefers_dark());
    assert_eq!(shell.decision().theme(), Some(ThemeVariant::Light));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let subscription = signal.subscribe(Box::new(move |dark| {
        let _ = tx.send(dark);
    }));

    signal.set(true);
    signal.set(true);
    signal.set(false);
    signal.set(true);

    let mut resolutions = 0;
    while let Ok(dark) = rx.try_recv() {
        shell.apply_system_preference(dark);
        resolutions += 1;
    }
    assert_eq!(resolutions, 3);
    assert_eq!(shell.decision().theme(), Some(ThemeVariant::Dark));

    subscription.unsubscribe();
    signal.set(false);
    assert!(rx.try_recv().is_err());
    assert_eq!(shell.decision().theme(), Some(ThemeVariant::Dark));
}

#[test]
fn teardown_releases_preference_listener() {
    let signal = PreferenceSignal::new(true);
    let calls = Arc::new(AtomicUsize::new(0));
    {
        let counter = Arc::clone(&calls);
        let _subscription = signal.subscribe(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        signal.set(false);
    }
    signal.set(true);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(signal.listener_count(), 0);
}

// ── Snapshot of the exposed decision ────────────────────────────────

#[test]
fn render_decision_json_shape() {
    let store = store_with(ApplicationState {
        color_theme: ColorTheme::Dark,
        ..main_view_app()
    });
    store.update(|s| {
        s.device.device_capabilities.insert(Capability::ContentList);
    });
    let shell = Shell::from_source(&store, false);

    insta::assert_json_snapshot!(shell.decision(), @r###"
    {
      "mode": "normal",
      "view": {
        "welcome": false,
        "main": true,
        "factory": false,
        "controls": true
      },
      "theme": "dark",
      "layout": {
        "list_sized": true,
        "full_height": false,
        "full_width": false
      },
      "overlay": "hidden"
    }
    "###);
}
