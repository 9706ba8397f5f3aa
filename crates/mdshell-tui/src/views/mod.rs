//! View slots. Exactly one content view is drawn per frame (or none), plus
//! the control panel when the main view is active.

pub mod controls;
pub mod disc;
pub mod factory;
pub mod legacy;
pub mod overlay;
pub mod welcome;

use mdshell_core::MainView;

use crate::component::Component;

/// All content-slot components, instantiated once.
pub struct Views {
    pub welcome: welcome::WelcomeView,
    pub disc: disc::DiscView,
    pub factory: factory::FactoryView,
    pub controls: controls::ControlsView,
    pub legacy: legacy::LegacyShell,
}

impl Views {
    pub fn new() -> Self {
        Self {
            welcome: welcome::WelcomeView,
            disc: disc::DiscView::new(),
            factory: factory::FactoryView,
            controls: controls::ControlsView,
            legacy: legacy::LegacyShell,
        }
    }

    /// The component backing a main view's slot.
    pub fn content(&self, view: MainView) -> &dyn Component {
        match view {
            MainView::Welcome => &self.welcome,
            MainView::Main => &self.disc,
            MainView::Factory => &self.factory,
        }
    }

    pub fn content_mut(&mut self, view: MainView) -> &mut dyn Component {
        match view {
            MainView::Welcome => &mut self.welcome,
            MainView::Main => &mut self.disc,
            MainView::Factory => &mut self.factory,
        }
    }
}

impl Default for Views {
    fn default() -> Self {
        Self::new()
    }
}
