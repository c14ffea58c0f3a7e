// ABOUTME: UI components for the TUI interface including output panes, forms, toasts, and help

pub mod form_dialog;
pub mod help;
pub mod layout;
pub mod output_pane;
pub mod toasts;

pub use form_dialog::FormDialogComponent;
pub use help::HelpComponent;
pub use layout::LayoutComponent;
pub use output_pane::OutputPaneComponent;
pub use toasts::ToastsComponent;

use ratatui::prelude::*;

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
