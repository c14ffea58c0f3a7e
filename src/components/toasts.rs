// ABOUTME: Toast overlay rendering live notifications in the top-right corner
// Oldest notification is drawn first; styling follows the notification's severity

use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::{AppState, Notification, Severity};

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 3;

pub struct ToastsComponent;

impl ToastsComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, state: &AppState) {
        let width = TOAST_WIDTH.min(area.width);
        let x = area.x + area.width.saturating_sub(width);
        let mut y = area.y;

        for notification in state.notifications.visible() {
            if y + TOAST_HEIGHT > area.y + area.height {
                break;
            }
            let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);
            frame.render_widget(Clear, toast_area);
            frame.render_widget(Self::toast(&notification), toast_area);
            y += TOAST_HEIGHT;
        }
    }

    fn toast(notification: &Notification) -> Paragraph<'_> {
        let (color, title) = Self::style_for(&notification.severity);

        Paragraph::new(notification.message.as_str())
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .style(Style::default().fg(color))
            .wrap(Wrap { trim: true })
    }

    fn style_for(severity: &Severity) -> (Color, &str) {
        if severity.is_success() {
            (Color::Green, "✓ success")
        } else if severity.is_danger() {
            (Color::Red, "✗ danger")
        } else {
            (Color::Gray, severity.as_str())
        }
    }
}

impl Default for ToastsComponent {
    fn default() -> Self {
        Self::new()
    }
}
