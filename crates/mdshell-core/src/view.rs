//! View switch: which content slot is instantiated for a main view.

use serde::Serialize;

use crate::model::MainView;

/// Activation state of the content slots.
///
/// At most one of `welcome`, `main`, `factory` is set. `controls` is the
/// secondary control-panel slot and rides along with `main`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ViewSlots {
    pub welcome: bool,
    pub main: bool,
    pub factory: bool,
    pub controls: bool,
}

impl ViewSlots {
    /// Select the slots for a main view. `None` (unset or unrecognized)
    /// leaves every slot inactive and the content area blank.
    pub fn select(view: Option<MainView>) -> Self {
        match view {
            Some(MainView::Welcome) => Self {
                welcome: true,
                ..Self::default()
            },
            Some(MainView::Main) => Self {
                main: true,
                controls: true,
                ..Self::default()
            },
            Some(MainView::Factory) => Self {
                factory: true,
                ..Self::default()
            },
            None => Self::default(),
        }
    }

    /// The view whose slot is active, if any.
    pub fn active(self) -> Option<MainView> {
        if self.welcome {
            Some(MainView::Welcome)
        } else if self.main {
            Some(MainView::Main)
        } else if self.factory {
            Some(MainView::Factory)
        } else {
            None
        }
    }

    pub fn is_blank(self) -> bool {
        self.active().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use strum::IntoEnumIterator;

    #[test]
    fn exactly_one_primary_slot_per_known_view() {
        for view in MainView::iter() {
            let slots = ViewSlots::select(Some(view));
            let active = [slots.welcome, slots.main, slots.factory]
                .iter()
                .filter(|on| **on)
                .count();
            assert_eq!(active, 1, "{view} should activate exactly one slot");
            assert_eq!(slots.active(), Some(view));
        }
    }

    #[test]
    fn main_view_activates_controls() {
        assert_eq!(
            ViewSlots::select(Some(MainView::Main)),
            ViewSlots {
                welcome: false,
                main: true,
                factory: false,
                controls: true,
            }
        );
    }

    #[test]
    fn welcome_and_factory_leave_controls_inactive() {
        assert!(!ViewSlots::select(Some(MainView::Welcome)).controls);
        assert!(!ViewSlots::select(Some(MainView::Factory)).controls);
    }

    #[test]
    fn unrecognized_view_renders_blank() {
        let slots = ViewSlots::select(MainView::parse_lenient("BOGUS"));
        assert_eq!(slots, ViewSlots::default());
        assert!(slots.is_blank());
    }
}
