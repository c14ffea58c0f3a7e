// ABOUTME: Popup forms for creating a transaction and registering a peer node

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
    style::{Color, Style},
};

use crate::app::{AppState, state::View};
use crate::app::forms::{NodeForm, TransactionField, TransactionForm};

use super::centered_rect;

pub struct FormDialogComponent;

impl FormDialogComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        match state.current_view {
            View::TransactionForm => self.render_transaction_form(frame, area, &state.transaction_form),
            View::NodeForm => self.render_node_form(frame, area, &state.node_form),
            View::Dashboard => {}
        }
    }

    fn render_transaction_form(&self, frame: &mut Frame, area: Rect, form: &TransactionForm) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(3),  // Sender
                Constraint::Length(3),  // Recipient
                Constraint::Length(3),  // Amount
                Constraint::Min(0),
                Constraint::Length(3),  // Instructions
            ])
            .split(popup_area);

        frame.render_widget(Self::title("New Transaction", "POST /transactions/new"), chunks[0]);

        let fields = [TransactionField::Sender, TransactionField::Recipient, TransactionField::Amount];
        for (field, chunk) in fields.into_iter().zip(&chunks[1..4]) {
            let input = Self::input(form.field(field), field.label(), form.focused == field);
            frame.render_widget(input, *chunk);
        }

        frame.render_widget(Self::instructions("Tab: Next field • Enter: Submit • Esc: Cancel"), chunks[5]);
    }

    fn render_node_form(&self, frame: &mut Frame, area: Rect, form: &NodeForm) {
        let popup_area = centered_rect(60, 40, area);
        frame.render_widget(Clear, popup_area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Title
                Constraint::Length(3),  // Address
                Constraint::Min(0),
                Constraint::Length(3),  // Instructions
            ])
            .split(popup_area);

        frame.render_widget(Self::title("Register Node", "POST /nodes/register"), chunks[0]);
        frame.render_widget(Self::input(&form.address, "Node Address", true), chunks[1]);
        frame.render_widget(Self::instructions("Type node address • Enter: Register • Esc: Cancel"), chunks[3]);
    }

    fn title<'a>(text: &'a str, endpoint: &'a str) -> Paragraph<'a> {
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(endpoint)
            )
            .style(Style::default().fg(Color::Yellow))
            .alignment(Alignment::Center)
    }

    fn input<'a>(value: &'a str, label: &'a str, focused: bool) -> Paragraph<'a> {
        let border = if focused { Color::Green } else { Color::White };
        Paragraph::new(value)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(border))
                    .title(label)
            )
            .style(Style::default().fg(Color::White))
    }

    fn instructions(text: &str) -> Paragraph<'_> {
        Paragraph::new(text)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Gray))
            )
            .style(Style::default().fg(Color::Gray))
            .alignment(Alignment::Center)
    }
}

impl Default for FormDialogComponent {
    fn default() -> Self {
        Self::new()
    }
}
