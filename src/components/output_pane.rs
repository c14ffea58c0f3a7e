// ABOUTME: Output pane component showing the last JSON response written to a region

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::{AppState, OutputRegion};

pub struct OutputPaneComponent;

impl OutputPaneComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState, region: OutputRegion) {
        let focused = state.focused_output == region;
        let border_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };

        let block = Block::default()
            .title(region.title())
            .borders(Borders::ALL)
            .border_style(border_style);

        let Some(pane) = state.pane(region).filter(|p| !p.text.is_empty()) else {
            let paragraph = Paragraph::new(Self::empty_hint(region))
                .block(block)
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center);
            frame.render_widget(paragraph, area);
            return;
        };

        // JSON is shown unwrapped so indentation stays intact.
        let paragraph = Paragraph::new(pane.text.as_str())
            .block(block)
            .style(Style::default().fg(Color::White))
            .scroll((pane.scroll, 0));

        frame.render_widget(paragraph, area);
    }

    fn empty_hint(region: OutputRegion) -> &'static str {
        match region {
            OutputRegion::Chain => "Press c to view the chain",
            OutputRegion::Transaction => "Press t to create a transaction",
            OutputRegion::Mining => "Press m to mine a block",
            OutputRegion::Nodes => "Press n to register or r to resolve",
        }
    }
}

impl Default for OutputPaneComponent {
    fn default() -> Self {
        Self::new()
    }
}
