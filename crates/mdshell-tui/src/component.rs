//! Component trait, the building block for every view slot.

use color_eyre::eyre::Result;
use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect};

use mdshell_core::LayoutModifiers;

use crate::action::Action;
use crate::theme::Palette;

/// What a component needs from the current render decision.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub palette: &'a Palette,
    pub layout: LayoutModifiers,
}

/// Every view slot implements Component.
///
/// Lifecycle: (`handle_key_event` | `update` | `render`)*
pub trait Component: Send {
    /// Handle a keyboard event while this component's slot is active.
    fn handle_key_event(&mut self, _key: KeyEvent) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Process a dispatched action. May return a follow-up action.
    fn update(&mut self, _action: &Action) -> Result<Option<Action>> {
        Ok(None)
    }

    /// Render into the provided frame area.
    fn render(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>);

    /// Identifier used in logs.
    fn id(&self) -> &str;
}
