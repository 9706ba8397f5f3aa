//! Welcome view, shown before a device is opened.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::component::{Component, RenderContext};

pub struct WelcomeView;

impl Component for WelcomeView {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        let p = ctx.palette;
        let lines = vec![
            Line::from(Span::styled("mdshell", p.title())),
            Line::from(""),
            Line::from(Span::styled(
                "Connect a MiniDisc recorder over USB to get started.",
                p.text(),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("2 ", p.key_hint_key()),
                Span::styled("open the disc", p.key_hint()),
                Span::styled("   3 ", p.key_hint_key()),
                Span::styled("factory mode", p.key_hint()),
            ]),
        ];

        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).min(area.height);
        let top = area.y + area.height.saturating_sub(height) / 2;
        let centered = Rect::new(area.x, top, area.width, height);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), centered);
    }

    fn id(&self) -> &str {
        "welcome"
    }
}
