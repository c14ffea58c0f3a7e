// ABOUTME: Main layout component arranging the output grid, bottom menu bar, and overlays

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    style::{Color, Style},
};

use crate::app::{AppState, OutputRegion};
use super::{FormDialogComponent, HelpComponent, OutputPaneComponent, ToastsComponent};

pub struct LayoutComponent {
    output_pane: OutputPaneComponent,
    form_dialog: FormDialogComponent,
    toasts: ToastsComponent,
    help: HelpComponent,
}

impl LayoutComponent {
    pub fn new() -> Self {
        Self {
            output_pane: OutputPaneComponent::new(),
            form_dialog: FormDialogComponent::new(),
            toasts: ToastsComponent::new(),
            help: HelpComponent::new(),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, state: &AppState) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),     // Output grid
                Constraint::Length(3),  // Bottom menu bar
            ])
            .split(frame.size());

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(main_chunks[0]);

        let halves = Constraint::Percentage(50);
        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([halves, halves])
            .split(rows[0]);
        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([halves, halves])
            .split(rows[1]);

        let cells = [top[0], top[1], bottom[0], bottom[1]];
        for (region, cell) in OutputRegion::ALL.into_iter().zip(cells) {
            self.output_pane.render(frame, cell, state, region);
        }

        self.render_menu_bar(frame, main_chunks[1], state);

        self.form_dialog.render(frame, frame.size(), state);

        // Toasts stay above forms so failures remain visible while editing
        self.toasts.render(frame, main_chunks[0], state);

        if state.help_visible {
            self.help.render(frame, frame.size());
        }
    }

    fn render_menu_bar(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let menu_text = "[c]hain [t]ransaction [m]ine [n]ode [r]esolve [x]dismiss [?]help [q]uit";

        let mut title = format!(" {} ", state.node_url);
        if state.in_flight > 0 {
            title.push_str(&format!("• {} pending ", state.in_flight));
        }

        let menu = Paragraph::new(menu_text)
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center);

        frame.render_widget(menu, area);
    }
}

impl Default for LayoutComponent {
    fn default() -> Self {
        Self::new()
    }
}
