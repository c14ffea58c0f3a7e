// ABOUTME: Application state management and view switching logic
// Owns output panes, input forms, notifications, and the queue of actions waiting to run

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::api::NodeApi;
use crate::app::actions::{Action, ActionOutcome, Dispatcher, OutputRegion};
use crate::app::forms::{NodeForm, TransactionForm};
use crate::app::notification::NotificationCenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    TransactionForm,
    NodeForm,
}

#[derive(Debug, Clone, Default)]
pub struct OutputPane {
    pub text: String,
    pub scroll: u16,
}

impl OutputPane {
    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

#[derive(Debug)]
pub struct AppState {
    pub current_view: View,
    pub focused_output: OutputRegion,
    pub outputs: HashMap<OutputRegion, OutputPane>,
    pub transaction_form: TransactionForm,
    pub node_form: NodeForm,
    pub notifications: NotificationCenter,
    pub help_visible: bool,
    pub should_quit: bool,
    pub node_url: String,
    // Actions waiting for the next tick to be dispatched
    pub pending_actions: VecDeque<Action>,
    pub in_flight: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(NotificationCenter::new(), String::new())
    }
}

impl AppState {
    pub fn new(notifications: NotificationCenter, node_url: String) -> Self {
        Self {
            current_view: View::Dashboard,
            focused_output: OutputRegion::Chain,
            outputs: OutputRegion::ALL
                .iter()
                .map(|region| (*region, OutputPane::default()))
                .collect(),
            transaction_form: TransactionForm::default(),
            node_form: NodeForm::default(),
            notifications,
            help_visible: false,
            should_quit: false,
            node_url,
            pending_actions: VecDeque::new(),
            in_flight: 0,
        }
    }

    pub fn output(&self, region: OutputRegion) -> &str {
        self.outputs.get(&region).map_or("", |pane| pane.text.as_str())
    }

    pub fn pane(&self, region: OutputRegion) -> Option<&OutputPane> {
        self.outputs.get(&region)
    }

    /// Replaces the pane's content, like assigning an element's text content.
    pub fn write_output(&mut self, region: OutputRegion, text: String) {
        let pane = self.outputs.entry(region).or_default();
        pane.text = text;
        pane.scroll = 0;
        self.focused_output = region;
    }

    pub fn queue_action(&mut self, action: Action) {
        debug!("Queued {}", action);
        self.pending_actions.push_back(action);
    }

    pub fn apply_outcome(&mut self, outcome: ActionOutcome) {
        let notifications = self.notifications.clone();
        outcome.apply(&notifications, |region, text| self.write_output(region, text));
    }

    pub fn toggle_help(&mut self) {
        self.help_visible = !self.help_visible;
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn open_transaction_form(&mut self) {
        self.current_view = View::TransactionForm;
    }

    pub fn open_node_form(&mut self) {
        self.current_view = View::NodeForm;
    }

    pub fn close_form(&mut self) {
        self.current_view = View::Dashboard;
    }

    /// Field values are kept after submitting so the same request can be resent.
    pub fn submit_transaction(&mut self) {
        let request = self.transaction_form.to_request();
        self.queue_action(Action::NewTransaction(request));
        self.close_form();
    }

    pub fn submit_node(&mut self) {
        let request = self.node_form.to_request();
        self.queue_action(Action::RegisterNode(request));
        self.close_form();
    }

    pub fn next_output(&mut self) {
        let idx = self.focused_index();
        self.focused_output = OutputRegion::ALL[(idx + 1) % OutputRegion::ALL.len()];
    }

    pub fn previous_output(&mut self) {
        let idx = self.focused_index();
        self.focused_output = if idx == 0 {
            OutputRegion::ALL[OutputRegion::ALL.len() - 1]
        } else {
            OutputRegion::ALL[idx - 1]
        };
    }

    fn focused_index(&self) -> usize {
        OutputRegion::ALL
            .iter()
            .position(|r| *r == self.focused_output)
            .unwrap_or(0)
    }

    pub fn scroll_down(&mut self) {
        if let Some(pane) = self.outputs.get_mut(&self.focused_output) {
            let max = u16::try_from(pane.line_count().saturating_sub(1)).unwrap_or(u16::MAX);
            pane.scroll = pane.scroll.saturating_add(1).min(max);
        }
    }

    pub fn scroll_up(&mut self) {
        if let Some(pane) = self.outputs.get_mut(&self.focused_output) {
            pane.scroll = pane.scroll.saturating_sub(1);
        }
    }

    pub fn scroll_to_top(&mut self) {
        if let Some(pane) = self.outputs.get_mut(&self.focused_output) {
            pane.scroll = 0;
        }
    }

    pub fn dismiss_notification(&mut self) {
        if let Some(dismissed) = self.notifications.dismiss_oldest() {
            debug!("Dismissed notification {}", dismissed.id);
        }
    }
}

pub struct App {
    pub state: AppState,
    dispatcher: Dispatcher,
    outcomes: mpsc::UnboundedReceiver<ActionOutcome>,
}

impl App {
    pub fn new(api: Arc<dyn NodeApi>, notifications: NotificationCenter, node_url: String) -> Self {
        let (dispatcher, outcomes) = Dispatcher::new(api);
        Self {
            state: AppState::new(notifications, node_url),
            dispatcher,
            outcomes,
        }
    }

    /// Dispatches queued actions and applies any outcomes that have arrived.
    ///
    /// Must be called from within a tokio runtime.
    pub fn tick(&mut self) {
        while let Some(action) = self.state.pending_actions.pop_front() {
            self.state.in_flight += 1;
            self.dispatcher.dispatch(action);
        }

        while let Ok(outcome) = self.outcomes.try_recv() {
            self.state.in_flight = self.state.in_flight.saturating_sub(1);
            info!("{} finished (ok: {})", outcome.spec.name, outcome.result.is_ok());
            self.state.apply_outcome(outcome);
        }
    }

    pub fn is_busy(&self) -> bool {
        self.state.in_flight > 0 || !self.state.pending_actions.is_empty()
    }
}
