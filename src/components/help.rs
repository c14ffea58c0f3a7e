// ABOUTME: Help overlay component displaying keyboard shortcuts and commands

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem},
    style::{Color, Modifier, Style},
};

use super::centered_rect;

pub struct HelpComponent;

impl HelpComponent {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let popup_area = centered_rect(60, 80, area);

        frame.render_widget(Clear, popup_area);

        let section = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
        let help_items = vec![
            ListItem::new("Node Actions:").style(section),
            ListItem::new("  c          View chain"),
            ListItem::new("  m          Mine block"),
            ListItem::new("  r          Resolve nodes"),
            ListItem::new("  t          New transaction"),
            ListItem::new("  n          Register node"),
            ListItem::new(""),
            ListItem::new("Panes:").style(section),
            ListItem::new("  h/l ←/→    Previous/next pane"),
            ListItem::new("  j/k ↓/↑    Scroll output"),
            ListItem::new("  g          Scroll to top"),
            ListItem::new(""),
            ListItem::new("Forms:").style(section),
            ListItem::new("  Tab        Next field"),
            ListItem::new("  Enter      Submit"),
            ListItem::new("  Esc        Close form"),
            ListItem::new(""),
            ListItem::new("General:").style(section),
            ListItem::new("  x          Dismiss oldest notification"),
            ListItem::new("  ?          Toggle this help"),
            ListItem::new("  q/Esc      Quit application"),
            ListItem::new("  Ctrl+C     Force quit"),
        ];

        let help_list = List::new(help_items)
            .block(
                Block::default()
                    .title("Help - Press ? or Esc to close")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
            );

        frame.render_widget(help_list, popup_area);
    }
}

impl Default for HelpComponent {
    fn default() -> Self {
        Self::new()
    }
}
