//! Main view: the disc in the connected recorder.
//!
//! The track list is only drawn when the device can list its contents;
//! otherwise the panel stays compact and shows a summary.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
};

use crate::action::Action;
use crate::component::{Component, RenderContext};

/// A track on the demo disc: (title, duration in seconds).
const DEMO_TRACKS: &[(&str, u32)] = &[
    ("Opening", 212),
    ("Night Drive", 247),
    ("Field Recording 03", 95),
    ("Interlude", 64),
    ("Long Way Home", 318),
    ("Untitled", 181),
];

const DISC_CAPACITY_SECS: u32 = 74 * 60;

fn format_duration(secs: u32) -> String {
    format!("{:>2}:{:02}", secs / 60, secs % 60)
}

pub struct DiscView {
    selected: usize,
}

impl DiscView {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn used_secs() -> u32 {
        DEMO_TRACKS.iter().map(|(_, secs)| secs).sum()
    }

    fn render_summary(frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        let p = ctx.palette;
        let used = Self::used_secs();
        let lines = vec![
            Line::from(Span::styled("Disc", p.title())),
            Line::from(vec![
                Span::styled(format!("{} tracks", DEMO_TRACKS.len()), p.text()),
                Span::styled(
                    format!(
                        "  {} used, {} free",
                        format_duration(used).trim_start(),
                        format_duration(DISC_CAPACITY_SECS.saturating_sub(used)).trim_start()
                    ),
                    p.dim(),
                ),
            ]),
            Line::from(Span::styled(
                "This device does not report its track list.",
                p.dim(),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn render_tracks(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        let p = ctx.palette;
        let [header_area, table_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

        let used = Self::used_secs();
        let header = Line::from(vec![
            Span::styled("Disc  ", p.title()),
            Span::styled(
                format!(
                    "{} / {}",
                    format_duration(used).trim_start(),
                    format_duration(DISC_CAPACITY_SECS).trim_start()
                ),
                p.dim(),
            ),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        let rows = DEMO_TRACKS
            .iter()
            .enumerate()
            .map(|(i, (title, secs))| {
                let style = if i == self.selected {
                    p.selected()
                } else {
                    p.text()
                };
                Row::new(vec![
                    format!("{:>2}", i + 1),
                    (*title).to_owned(),
                    format_duration(*secs),
                ])
                .style(style)
            });

        let table = Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(6),
            ],
        )
        .header(Row::new(vec!["#", "Title", "Time"]).style(p.table_header()))
        .column_spacing(2);

        frame.render_widget(table, table_area);
    }
}

impl Default for DiscView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for DiscView {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        Ok(match key.code {
            KeyCode::Char('j') | KeyCode::Down => Some(Action::SelectNext),
            KeyCode::Char('k') | KeyCode::Up => Some(Action::SelectPrev),
            _ => None,
        })
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        let last = DEMO_TRACKS.len().saturating_sub(1);
        match action {
            Action::SelectNext => self.selected = (self.selected + 1).min(last),
            Action::SelectPrev => self.selected = self.selected.saturating_sub(1),
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        if ctx.layout.list_sized {
            self.render_tracks(frame, area, ctx);
        } else {
            Self::render_summary(frame, area, ctx);
        }
    }

    fn id(&self) -> &str {
        "disc"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_clamped() {
        let mut view = DiscView::new();
        view.update(&Action::SelectPrev).unwrap();
        assert_eq!(view.selected(), 0);
        for _ in 0..20 {
            view.update(&Action::SelectNext).unwrap();
        }
        assert_eq!(view.selected(), DEMO_TRACKS.len() - 1);
    }

    #[test]
    fn durations_are_minutes_and_seconds() {
        assert_eq!(format_duration(212), " 3:32");
        assert_eq!(format_duration(64), " 1:04");
    }
}
