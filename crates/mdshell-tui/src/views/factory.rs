//! Factory view: the disc's raw table of contents.

use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Row, Table},
};

use crate::component::{Component, RenderContext};

/// (fragment, start cluster, end cluster, mode)
const DEMO_TOC: &[(u8, u16, u16, &str)] = &[
    (1, 0x0032, 0x01a4, "SP stereo"),
    (2, 0x01a5, 0x0381, "SP stereo"),
    (3, 0x0382, 0x0404, "LP2"),
    (4, 0x0405, 0x045e, "SP mono"),
    (5, 0x045f, 0x06c0, "SP stereo"),
    (6, 0x06c1, 0x0812, "LP4"),
];

pub struct FactoryView;

impl Component for FactoryView {
    fn render(&self, frame: &mut Frame, area: Rect, ctx: RenderContext<'_>) {
        let p = ctx.palette;
        let [header_area, table_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(1)]).areas(area);

        let header = Line::from(vec![
            Span::styled("Table of contents  ", p.title()),
            Span::styled("factory mode, read only", p.accent()),
        ]);
        frame.render_widget(Paragraph::new(header), header_area);

        let rows = DEMO_TOC.iter().map(|(fragment, start, end, mode)| {
            Row::new(vec![
                format!("{fragment:>3}"),
                format!("{start:#06x}"),
                format!("{end:#06x}"),
                (*mode).to_owned(),
            ])
            .style(p.text())
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(4),
                Constraint::Length(8),
                Constraint::Length(8),
                Constraint::Min(8),
            ],
        )
        .header(Row::new(vec!["Frag", "Start", "End", "Mode"]).style(p.table_header()))
        .column_spacing(2);

        frame.render_widget(table, table_area);
    }

    fn id(&self) -> &str {
        "factory"
    }
}
