//! Legacy alternate shell ("vintage mode").
//!
//! Replaces the entire interface root, so it carries its own fixed chrome
//! and never reads the resolved theme.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::theme::{LEGACY_DESKTOP, LEGACY_FACE, LEGACY_SHADOW, LEGACY_TITLE};

pub struct LegacyShell;

impl LegacyShell {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        frame.render_widget(
            Block::default().style(Style::default().bg(LEGACY_DESKTOP)),
            area,
        );

        let width = 64u16.min(area.width.saturating_sub(4));
        let height = 16u16.min(area.height.saturating_sub(3));
        let window = Rect::new(
            area.x + area.width.saturating_sub(width) / 2,
            area.y + area.height.saturating_sub(height + 1) / 2,
            width,
            height,
        );

        let face = Style::default().bg(LEGACY_FACE).fg(Color::Black);
        let frame_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(LEGACY_SHADOW).bg(LEGACY_FACE))
            .style(face);
        let inner = frame_block.inner(window);
        frame.render_widget(frame_block, window);

        let [title_area, menu_area, body_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .areas(inner);

        let title = Line::from(vec![
            Span::styled(
                " mdshell 95",
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(usize::from(title_area.width.saturating_sub(20)))),
            Span::styled("_ □ x ", Style::default().fg(Color::White)),
        ]);
        frame.render_widget(
            Paragraph::new(title).style(Style::default().bg(LEGACY_TITLE)),
            title_area,
        );

        let menu = Line::from(vec![
            Span::styled(" F", face.add_modifier(Modifier::UNDERLINED)),
            Span::styled("ile  ", face),
            Span::styled("E", face.add_modifier(Modifier::UNDERLINED)),
            Span::styled("dit  ", face),
            Span::styled("V", face.add_modifier(Modifier::UNDERLINED)),
            Span::styled("iew  ", face),
            Span::styled("H", face.add_modifier(Modifier::UNDERLINED)),
            Span::styled("elp", face),
        ]);
        frame.render_widget(Paragraph::new(menu), menu_area);

        let body = vec![
            Line::from(""),
            Line::from(Span::styled(
                "Vintage mode",
                face.add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("Insert a disc to continue.", face)),
            Line::from(""),
            Line::from(Span::styled(
                "[ v ] Normal mode      [ q ] Exit",
                face.fg(LEGACY_TITLE),
            )),
        ];
        frame.render_widget(Paragraph::new(body).alignment(Alignment::Center), body_area);

        let taskbar = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::styled(
                    " Start ",
                    Style::default()
                        .bg(LEGACY_FACE)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" mdshell 95", face),
            ]))
            .style(face),
            taskbar,
        );
    }
}
