// ABOUTME: Event handling system for keyboard input and app actions
// Maps keys to named UI events; node calls are queued for the next tick rather than awaited here

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::actions::Action;
use crate::app::AppState;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Quit,
    ToggleHelp,
    ViewChain,
    MineBlock,
    ResolveNodes,
    OpenTransactionForm,
    OpenNodeForm,
    NextPane,
    PreviousPane,
    ScrollDown,
    ScrollUp,
    ScrollTop,
    DismissNotification,
    // Form events
    FormInputChar(char),
    FormBackspace,
    FormNextField,
    FormPreviousField,
    FormSubmit,
    FormCancel,
}

pub struct EventHandler;

impl EventHandler {
    pub fn handle_key_event(key_event: KeyEvent, state: &mut AppState) -> Option<AppEvent> {
        use crate::app::state::View;

        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(AppEvent::Quit);
        }

        if state.help_visible {
            return match key_event.code {
                KeyCode::Char('?') | KeyCode::Esc => Some(AppEvent::ToggleHelp),
                _ => None,
            };
        }

        if state.current_view != View::Dashboard {
            return Self::handle_form_keys(key_event);
        }

        match key_event.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(AppEvent::Quit),
            KeyCode::Char('?') => Some(AppEvent::ToggleHelp),
            KeyCode::Char('c') => Some(AppEvent::ViewChain),
            KeyCode::Char('m') => Some(AppEvent::MineBlock),
            KeyCode::Char('r') => Some(AppEvent::ResolveNodes),
            KeyCode::Char('t') => Some(AppEvent::OpenTransactionForm),
            KeyCode::Char('n') => Some(AppEvent::OpenNodeForm),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Some(AppEvent::NextPane),
            KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Some(AppEvent::PreviousPane),
            KeyCode::Char('j') | KeyCode::Down => Some(AppEvent::ScrollDown),
            KeyCode::Char('k') | KeyCode::Up => Some(AppEvent::ScrollUp),
            KeyCode::Char('g') => Some(AppEvent::ScrollTop),
            KeyCode::Char('x') => Some(AppEvent::DismissNotification),
            _ => None,
        }
    }

    fn handle_form_keys(key_event: KeyEvent) -> Option<AppEvent> {
        match key_event.code {
            KeyCode::Esc => Some(AppEvent::FormCancel),
            KeyCode::Enter => Some(AppEvent::FormSubmit),
            KeyCode::Tab | KeyCode::Down => Some(AppEvent::FormNextField),
            KeyCode::BackTab | KeyCode::Up => Some(AppEvent::FormPreviousField),
            KeyCode::Backspace => Some(AppEvent::FormBackspace),
            KeyCode::Char(ch) => Some(AppEvent::FormInputChar(ch)),
            _ => None,
        }
    }

    pub fn process_event(event: AppEvent, state: &mut AppState) {
        use crate::app::state::View;

        match event {
            AppEvent::Quit => state.quit(),
            AppEvent::ToggleHelp => state.toggle_help(),
            AppEvent::ViewChain => state.queue_action(Action::ViewChain),
            AppEvent::MineBlock => state.queue_action(Action::MineBlock),
            AppEvent::ResolveNodes => state.queue_action(Action::ResolveNodes),
            AppEvent::OpenTransactionForm => state.open_transaction_form(),
            AppEvent::OpenNodeForm => state.open_node_form(),
            AppEvent::NextPane => state.next_output(),
            AppEvent::PreviousPane => state.previous_output(),
            AppEvent::ScrollDown => state.scroll_down(),
            AppEvent::ScrollUp => state.scroll_up(),
            AppEvent::ScrollTop => state.scroll_to_top(),
            AppEvent::DismissNotification => state.dismiss_notification(),
            AppEvent::FormInputChar(ch) => match state.current_view {
                View::TransactionForm => state.transaction_form.input_char(ch),
                View::NodeForm => state.node_form.input_char(ch),
                View::Dashboard => {}
            },
            AppEvent::FormBackspace => match state.current_view {
                View::TransactionForm => state.transaction_form.backspace(),
                View::NodeForm => state.node_form.backspace(),
                View::Dashboard => {}
            },
            AppEvent::FormNextField => {
                if state.current_view == View::TransactionForm {
                    state.transaction_form.next_field();
                }
            }
            AppEvent::FormPreviousField => {
                if state.current_view == View::TransactionForm {
                    state.transaction_form.previous_field();
                }
            }
            AppEvent::FormSubmit => match state.current_view {
                View::TransactionForm => state.submit_transaction(),
                View::NodeForm => state.submit_node(),
                View::Dashboard => {}
            },
            AppEvent::FormCancel => state.close_form(),
        }
    }
}
