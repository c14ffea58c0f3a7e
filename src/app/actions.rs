// ABOUTME: Dispatch table mapping UI actions to node endpoint calls
// Each action performs exactly one call and reports its outcome through the notification center

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::api::{ApiResult, Endpoint, EndpointCall, NodeApi, RegisterNodesRequest, TransactionRequest};
use crate::app::notification::NotificationCenter;

/// Pane an action writes its response into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputRegion {
    Chain,
    Transaction,
    Mining,
    Nodes,
}

impl OutputRegion {
    pub const ALL: [Self; 4] = [Self::Chain, Self::Transaction, Self::Mining, Self::Nodes];

    pub fn title(self) -> &'static str {
        match self {
            Self::Chain => "Chain",
            Self::Transaction => "Transaction",
            Self::Mining => "Mining",
            Self::Nodes => "Nodes",
        }
    }
}

#[derive(Debug)]
pub struct ActionSpec {
    pub name: &'static str,
    pub endpoint: Endpoint,
    pub output: OutputRegion,
    pub success_message: &'static str,
    pub error_prefix: &'static str,
}

static VIEW_CHAIN: ActionSpec = ActionSpec {
    name: "view-chain",
    endpoint: Endpoint::Chain,
    output: OutputRegion::Chain,
    success_message: "Blockchain fetched successfully!",
    error_prefix: "Error fetching blockchain: ",
};

static NEW_TRANSACTION: ActionSpec = ActionSpec {
    name: "new-transaction",
    endpoint: Endpoint::NewTransaction,
    output: OutputRegion::Transaction,
    success_message: "Transaction created successfully!",
    error_prefix: "Error creating transaction: ",
};

static MINE_BLOCK: ActionSpec = ActionSpec {
    name: "mine-block",
    endpoint: Endpoint::Mine,
    output: OutputRegion::Mining,
    success_message: "Block mined successfully!",
    error_prefix: "Error mining block: ",
};

static REGISTER_NODE: ActionSpec = ActionSpec {
    name: "register-node",
    endpoint: Endpoint::RegisterNodes,
    output: OutputRegion::Nodes,
    success_message: "Node registered successfully!",
    error_prefix: "Error registering node: ",
};

static RESOLVE_NODES: ActionSpec = ActionSpec {
    name: "resolve-nodes",
    endpoint: Endpoint::ResolveNodes,
    output: OutputRegion::Nodes,
    success_message: "Nodes resolved successfully!",
    error_prefix: "Error resolving nodes: ",
};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    ViewChain,
    NewTransaction(TransactionRequest),
    MineBlock,
    RegisterNode(RegisterNodesRequest),
    ResolveNodes,
}

impl Action {
    pub fn spec(&self) -> &'static ActionSpec {
        match self {
            Self::ViewChain => &VIEW_CHAIN,
            Self::NewTransaction(_) => &NEW_TRANSACTION,
            Self::MineBlock => &MINE_BLOCK,
            Self::RegisterNode(_) => &REGISTER_NODE,
            Self::ResolveNodes => &RESOLVE_NODES,
        }
    }

    pub fn to_call(&self) -> ApiResult<EndpointCall> {
        let endpoint = self.spec().endpoint;
        Ok(match self {
            Self::NewTransaction(request) => EndpointCall::post(endpoint, request)?,
            Self::RegisterNode(request) => EndpointCall::post(endpoint, request)?,
            Self::ViewChain | Self::MineBlock | Self::ResolveNodes => EndpointCall::get(endpoint),
        })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.spec().name)
    }
}

#[derive(Debug)]
pub struct ActionOutcome {
    pub spec: &'static ActionSpec,
    pub result: ApiResult<Value>,
}

impl ActionOutcome {
    /// Pretty JSON on success, `prefix + message` on failure.
    pub fn into_report(self) -> Result<String, String> {
        match self.result {
            Ok(value) => serde_json::to_string_pretty(&value)
                .map_err(|e| format!("{}{}", self.spec.error_prefix, e)),
            Err(e) => Err(format!("{}{}", self.spec.error_prefix, e)),
        }
    }

    /// Hands the rendered response to `write_output` and surfaces the result as a notification.
    pub fn apply(
        self,
        notifications: &NotificationCenter,
        mut write_output: impl FnMut(OutputRegion, String),
    ) {
        let spec = self.spec;
        match self.into_report() {
            Ok(rendered) => {
                write_output(spec.output, rendered);
                notifications.success(spec.success_message);
            }
            Err(message) => {
                error!("{} failed: {}", spec.name, message);
                notifications.danger(message);
            }
        }
    }
}

pub async fn perform(api: &dyn NodeApi, action: Action) -> ActionOutcome {
    let spec = action.spec();
    let result = match action.to_call() {
        Ok(call) => api.execute(call).await,
        Err(e) => Err(e),
    };
    ActionOutcome { spec, result }
}

/// Runs actions in the background and hands their outcomes back to the UI loop.
pub struct Dispatcher {
    api: Arc<dyn NodeApi>,
    outcomes: mpsc::UnboundedSender<ActionOutcome>,
}

impl Dispatcher {
    pub fn new(api: Arc<dyn NodeApi>) -> (Self, mpsc::UnboundedReceiver<ActionOutcome>) {
        let (outcomes, receiver) = mpsc::unbounded_channel();
        (Self { api, outcomes }, receiver)
    }

    pub fn dispatch(&self, action: Action) {
        info!("Dispatching {} ({})", action, action.spec().endpoint);
        let api = Arc::clone(&self.api);
        let outcomes = self.outcomes.clone();

        tokio::spawn(async move {
            let outcome = perform(api.as_ref(), action).await;
            if outcomes.send(outcome).is_err() {
                debug!("Outcome receiver dropped");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::MockNodeApi;
    use crate::api::endpoint::Amount;
    use crate::api::{ApiError, HttpMethod};
    use futures_util::FutureExt;
    use serde_json::json;
    use std::collections::HashMap;

    fn mock_returning(
        expected: EndpointCall,
        result: fn() -> ApiResult<Value>,
    ) -> Arc<dyn NodeApi> {
        let mut api = MockNodeApi::new();
        api.expect_execute()
            .withf(move |call| *call == expected)
            .times(1)
            .returning(move |_| async move { result() }.boxed());
        Arc::new(api)
    }

    #[test]
    fn test_action_table() {
        assert_eq!(Action::ViewChain.spec().endpoint, Endpoint::Chain);
        assert_eq!(Action::MineBlock.spec().output, OutputRegion::Mining);
        assert_eq!(Action::ResolveNodes.spec().output, OutputRegion::Nodes);
        assert_eq!(
            Action::RegisterNode(RegisterNodesRequest::single("a")).spec().output,
            OutputRegion::Nodes
        );
        assert_eq!(Action::ViewChain.to_string(), "view-chain");
    }

    #[tokio::test]
    async fn test_transaction_issues_post_with_numeric_amount() {
        let action = Action::NewTransaction(TransactionRequest {
            sender: "A".to_string(),
            recipient: "B".to_string(),
            amount: Amount(10.0),
        });
        let call = action.to_call().unwrap();
        assert_eq!(call.method(), HttpMethod::Post);
        assert_eq!(call.path(), "/transactions/new");
        assert_eq!(
            call.payload,
            Some(json!({"sender": "A", "recipient": "B", "amount": 10}))
        );

        let api = mock_returning(call, || {
            Ok(json!({"message": "Transaction will be added to Block 2"}))
        });
        let report = perform(api.as_ref(), action).await.into_report().unwrap();
        assert!(report.contains("Transaction will be added to Block 2"));
    }

    #[tokio::test]
    async fn test_register_node_wraps_address() {
        let action = Action::RegisterNode(RegisterNodesRequest::single("http://x:5000"));
        let expected = EndpointCall {
            endpoint: Endpoint::RegisterNodes,
            payload: Some(json!({"nodes": ["http://x:5000"]})),
        };

        let api = mock_returning(expected, || Ok(json!({"total_nodes": ["x:5000"]})));
        assert!(perform(api.as_ref(), action).await.result.is_ok());
    }

    #[tokio::test]
    async fn test_dispatch_delivers_outcome_over_channel() {
        let api = mock_returning(EndpointCall::get(Endpoint::Mine), || {
            Ok(json!({"message": "New Block Forged", "index": 2}))
        });
        let (dispatcher, mut rx) = Dispatcher::new(api);

        dispatcher.dispatch(Action::MineBlock);
        let outcome = rx.recv().await.unwrap();

        assert_eq!(outcome.spec.name, "mine-block");
        assert_eq!(outcome.result.unwrap()["index"], 2);
    }

    #[tokio::test]
    async fn test_success_writes_output_and_notifies() {
        let notifications = NotificationCenter::new();
        let mut outputs = HashMap::new();
        let outcome = ActionOutcome {
            spec: Action::ViewChain.spec(),
            result: Ok(json!({"chain": [], "length": 0})),
        };

        outcome.apply(&notifications, |region, text| {
            outputs.insert(region, text);
        });

        assert_eq!(
            outputs.get(&OutputRegion::Chain).map(String::as_str),
            Some("{\n  \"chain\": [],\n  \"length\": 0\n}")
        );
        let visible = notifications.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "Blockchain fetched successfully!");
        assert!(visible[0].severity.is_success());
    }

    #[tokio::test]
    async fn test_failure_notifies_danger_with_prefix() {
        let notifications = NotificationCenter::new();
        let mut written = false;
        let outcome = ActionOutcome {
            spec: Action::ResolveNodes.spec(),
            result: Err(ApiError::Server {
                status: 500,
                message: "Unknown error".to_string(),
            }),
        };

        outcome.apply(&notifications, |_, _| written = true);

        assert!(!written);
        let visible = notifications.visible();
        assert_eq!(visible[0].message, "Error resolving nodes: Unknown error");
        assert!(visible[0].severity.is_danger());
    }
}
