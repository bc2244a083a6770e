// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

//! Echo Workflow
//!
//! Smallest possible AI workflow: a one-node graph whose `echo` node returns
//! its input unchanged. Used as a diagnostic for the graph plumbing.
//!
//! # DDD Pattern: Application Service
//!
//! - **Layer:** Application
//! - **Responsibility:** Build the echo graph once and run it per request
//! - **Collaborators:** Domain: `StateGraph` / `CompiledGraph`

use crate::domain::workflow::{CompiledGraph, FnNode, NodeError, StateGraph, WorkflowError};
use tracing::debug;

pub const ECHO_NODE: &str = "echo";

/// State carried through the echo graph
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoState {
    pub text: String,
    pub result: String,
}

/// Holds the compiled echo graph. Keeps no per-call state.
pub struct EchoWorkflow {
    graph: CompiledGraph<EchoState>,
}

impl EchoWorkflow {
    pub fn new() -> Result<Self, WorkflowError> {
        let mut graph = StateGraph::new();
        graph.add_node(
            ECHO_NODE,
            FnNode(|state: EchoState| async move {
                debug!(length = state.text.len(), "Echo node invoked");
                Ok::<_, NodeError>(EchoState {
                    result: state.text.clone(),
                    text: state.text,
                })
            }),
        )?;
        graph.set_entry_point(ECHO_NODE);

        Ok(Self {
            graph: graph.compile()?,
        })
    }

    /// Return `text` unchanged after a pass through the graph
    pub async fn run(&self, text: &str) -> Result<String, WorkflowError> {
        let run = self
            .graph
            .invoke(EchoState {
                text: text.to_string(),
                result: String::new(),
            })
            .await?;
        Ok(run.state.result)
    }
}
