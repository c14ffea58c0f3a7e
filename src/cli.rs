// ABOUTME: Non-interactive subcommands that run a single node action and print the result

use std::process::ExitCode;
use std::sync::Arc;

use crate::api::endpoint::{Amount, RegisterNodesRequest, TransactionRequest};
use crate::api::NodeApi;
use crate::app::actions::{perform, Action};
use crate::app::forms::parse_float;
use crate::config::Command;

pub fn action_for(command: &Command) -> Action {
    match command {
        Command::Chain => Action::ViewChain,
        Command::Mine => Action::MineBlock,
        Command::Resolve => Action::ResolveNodes,
        Command::Tx {
            sender,
            recipient,
            amount,
        } => Action::NewTransaction(TransactionRequest {
            sender: sender.clone(),
            recipient: recipient.clone(),
            amount: Amount(parse_float(amount)),
        }),
        Command::Register { address } => Action::RegisterNode(RegisterNodesRequest::single(address.clone())),
    }
}

/// Prints pretty JSON on success; on failure prints `prefix + message` to stderr.
pub async fn run_command(api: Arc<dyn NodeApi>, command: &Command) -> ExitCode {
    let action = action_for(command);
    match perform(api.as_ref(), action).await.into_report() {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(message) => {
            tracing::error!("{}", message);
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}
