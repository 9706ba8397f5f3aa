//! Layers drawn above the normal shell: the loading backdrop and the help
//! popup.

use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use throbber_widgets_tui::{BRAILLE_SIX, Throbber, ThrobberState};

use crate::theme::Palette;

/// Centered rect of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Blocking backdrop with a spinner.
pub fn render_loading(frame: &mut Frame, area: Rect, palette: &Palette, state: &ThrobberState) {
    frame.render_widget(Clear, area);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text_dim)),
        area,
    );

    let popup = centered(area, 24, 3);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(palette.panel());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let throbber = Throbber::default()
        .label("Working…")
        .style(palette.text())
        .throbber_style(
            Style::default()
                .fg(palette.primary_light)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX);
    let mut state = state.clone();
    frame.render_stateful_widget(throbber, inner, &mut state);
}

/// Keyboard shortcut reference.
pub fn render_help(frame: &mut Frame, area: Rect, palette: &Palette) {
    let popup = centered(area, 52, 19);
    frame.render_widget(Clear, popup);

    let block = Block::default()
        .title(" Keyboard Shortcuts ")
        .title_style(palette.title())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary_dark))
        .style(palette.panel());
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let entry = |key: &'static str, label: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {key:<10}"), palette.key_hint_key()),
            Span::styled(label, palette.key_hint()),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("  Views", palette.accent())),
        entry("1 / 2 / 3", "Welcome / Disc / Factory"),
        entry("0", "Clear the view"),
        entry("j/k ↑/↓", "Move selection"),
        Line::from(""),
        Line::from(Span::styled("  Appearance", palette.accent())),
        entry("t", "Cycle color theme"),
        entry("s", "Flip system dark preference"),
        entry("v", "Vintage mode"),
        entry("w / h", "Full width / full height"),
        Line::from(""),
        Line::from(Span::styled("  Device", palette.accent())),
        entry("c", "Toggle content listing"),
        entry("l", "Toggle busy state"),
        Line::from(""),
        entry("q", "Quit"),
        Line::from(Span::styled("Esc or ? to close", palette.key_hint())).alignment(Alignment::Right),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
