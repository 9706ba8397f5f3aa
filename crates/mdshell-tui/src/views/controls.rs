//! Playback control panel, drawn under the disc view.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::component::{Component, RenderContext};

pub struct ControlsView;

impl Component for ControlsView {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        let p = ctx.palette;
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(p.panel_border());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let line = Line::from(vec![
            Span::styled("⏮  ", p.text()),
            Span::styled("▶  ", p.key_hint_key()),
            Span::styled("■  ", p.text()),
            Span::styled("⏭", p.text()),
            Span::styled("    stopped", p.dim()),
        ]);
        frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), inner);
    }

    fn id(&self) -> &str {
        "controls"
    }
}
