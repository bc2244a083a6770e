// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Workflow Graph Model
//!
//! A small state-graph engine: named nodes transform a shared state value and
//! edges (fixed or routed on the state) decide which node runs next.
//!
//! # Architectural Context
//!
//! - **Layer:** Domain Layer
//! - **Purpose:** Execution model for every AI workflow (echo, course, lesson)
//!
//! # Design Principles
//!
//! 1. **Build then freeze:** a [`StateGraph`] is assembled, validated by
//!    [`StateGraph::compile`], and the resulting [`CompiledGraph`] is
//!    immutable and shareable
//! 2. **Self-Validating:** dangling edges and unknown routes fail at compile
//!    time, not mid-run
//! 3. **Bounded:** every run stops after `recursion_limit` node executions

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

/// Reserved target name that terminates a run
pub const END: &str = "__end__";

/// Default number of node executions allowed per run
pub const DEFAULT_RECURSION_LIMIT: usize = 25;

/// Error type returned by node bodies
pub type NodeError = Box<dyn std::error::Error + Send + Sync>;

/// Router used by conditional edges; returns a key of the route map
pub type RouteFn<S> = Arc<dyn Fn(&S) -> &'static str + Send + Sync>;

// ============================================================================
// Value Objects
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeName(String);

impl NodeName {
    pub fn new(name: impl Into<String>) -> Result<Self, WorkflowError> {
        let name = name.into();
        if name.trim().is_empty() || name == END {
            return Err(WorkflowError::InvalidNodeName(name));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where an edge leads
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    Node(NodeName),
    End,
}

impl Target {
    pub fn parse(name: &str) -> Result<Self, WorkflowError> {
        if name == END {
            Ok(Target::End)
        } else {
            NodeName::new(name).map(Target::Node)
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Node(name) => write!(f, "{}", name),
            Target::End => f.write_str(END),
        }
    }
}

// ============================================================================
// Nodes & Edges
// ============================================================================

/// A unit of work in a graph: consumes the state and returns the next one
#[async_trait]
pub trait GraphNode<S>: Send + Sync {
    async fn run(&self, state: S) -> Result<S, NodeError>;
}

/// Adapts an async closure into a [`GraphNode`]
pub struct FnNode<F>(pub F);

#[async_trait]
impl<S, F, Fut> GraphNode<S> for FnNode<F>
where
    S: Send + 'static,
    F: Fn(S) -> Fut + Send + Sync,
    Fut: Future<Output = Result<S, NodeError>> + Send,
{
    async fn run(&self, state: S) -> Result<S, NodeError> {
        (self.0)(state).await
    }
}

enum Edge<S> {
    Direct(Target),
    Conditional {
        router: RouteFn<S>,
        routes: HashMap<String, Target>,
    },
}

impl<S> Edge<S> {
    fn targets(&self) -> Vec<&Target> {
        match self {
            Edge::Direct(target) => vec![target],
            Edge::Conditional { routes, .. } => routes.values().collect(),
        }
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Mutable graph definition. Nodes run in the order the edges dictate,
/// starting from the entry point.
pub struct StateGraph<S> {
    nodes: HashMap<NodeName, Arc<dyn GraphNode<S>>>,
    edges: HashMap<NodeName, Edge<S>>,
    entry_point: Option<String>,
}

impl<S: Send + 'static> Default for StateGraph<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Send + 'static> StateGraph<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry_point: None,
        }
    }

    pub fn add_node<N>(&mut self, name: &str, node: N) -> Result<&mut Self, WorkflowError>
    where
        N: GraphNode<S> + 'static,
    {
        let name = NodeName::new(name)?;
        if self.nodes.contains_key(&name) {
            return Err(WorkflowError::DuplicateNode(name.to_string()));
        }
        self.nodes.insert(name, Arc::new(node));
        Ok(self)
    }

    pub fn add_edge(&mut self, from: &str, to: &str) -> Result<&mut Self, WorkflowError> {
        let target = Target::parse(to)?;
        self.insert_edge(from, Edge::Direct(target))?;
        Ok(self)
    }

    /// Route from `from` by calling `router` on the state after `from` ran.
    /// `routes` maps every key the router may return to its target.
    pub fn add_conditional_edges<R>(
        &mut self,
        from: &str,
        router: R,
        routes: &[(&str, &str)],
    ) -> Result<&mut Self, WorkflowError>
    where
        R: Fn(&S) -> &'static str + Send + Sync + 'static,
    {
        let mut route_map = HashMap::with_capacity(routes.len());
        for (key, to) in routes {
            route_map.insert((*key).to_string(), Target::parse(to)?);
        }
        self.insert_edge(
            from,
            Edge::Conditional {
                router: Arc::new(router),
                routes: route_map,
            },
        )?;
        Ok(self)
    }

    pub fn set_entry_point(&mut self, name: &str) -> &mut Self {
        self.entry_point = Some(name.to_string());
        self
    }

    fn insert_edge(&mut self, from: &str, edge: Edge<S>) -> Result<(), WorkflowError> {
        let from = NodeName::new(from)?;
        if self.edges.contains_key(&from) {
            return Err(WorkflowError::DuplicateEdge(from.to_string()));
        }
        self.edges.insert(from, edge);
        Ok(())
    }

    /// Validate the definition and freeze it
    pub fn compile(self) -> Result<CompiledGraph<S>, WorkflowError> {
        let entry = self.entry_point.clone().ok_or(WorkflowError::NoEntryPoint)?;
        let entry = NodeName::new(entry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(WorkflowError::EntryPointNotFound(entry.to_string()));
        }

        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(WorkflowError::UnknownNode(from.to_string()));
            }
            for target in edge.targets() {
                if let Target::Node(name) = target {
                    if !self.nodes.contains_key(name) {
                        return Err(WorkflowError::TransitionTargetNotFound {
                            from: from.to_string(),
                            target: name.to_string(),
                        });
                    }
                }
            }
        }

        Ok(CompiledGraph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        })
    }
}

// ============================================================================
// Execution
// ============================================================================

/// Final state of a run plus the nodes visited, in order
#[derive(Debug, Clone)]
pub struct GraphRun<S> {
    pub state: S,
    pub path: Vec<String>,
}

pub struct CompiledGraph<S> {
    nodes: HashMap<NodeName, Arc<dyn GraphNode<S>>>,
    edges: HashMap<NodeName, Edge<S>>,
    entry: NodeName,
    recursion_limit: usize,
}

impl<S: Send + 'static> CompiledGraph<S> {
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    pub async fn invoke(&self, state: S) -> Result<GraphRun<S>, WorkflowError> {
        let mut state = state;
        let mut path = Vec::new();
        let mut current = Some(self.entry.clone());

        while let Some(name) = current {
            if path.len() >= self.recursion_limit {
                return Err(WorkflowError::RecursionLimit(self.recursion_limit));
            }

            let node = self
                .nodes
                .get(&name)
                .ok_or_else(|| WorkflowError::UnknownNode(name.to_string()))?;

            debug!(node = %name, step = path.len() + 1, "Running graph node");
            state = node
                .run(state)
                .await
                .map_err(|source| WorkflowError::NodeFailed {
                    node: name.to_string(),
                    source,
                })?;
            path.push(name.to_string());

            current = match self.edges.get(&name) {
                None => None,
                Some(Edge::Direct(target)) => next_node(target),
                Some(Edge::Conditional { router, routes }) => {
                    let key = (**router)(&state);
                    let target = routes.get(key).ok_or_else(|| WorkflowError::UnknownRoute {
                        node: name.to_string(),
                        route: key.to_string(),
                    })?;
                    next_node(target)
                }
            };
        }

        Ok(GraphRun { state, path })
    }
}

fn next_node(target: &Target) -> Option<NodeName> {
    match target {
        Target::Node(name) => Some(name.clone()),
        Target::End => None,
    }
}

// ============================================================================
// Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum WorkflowError {
    #[error("Invalid node name: '{0}'")]
    InvalidNodeName(String),

    #[error("Node '{0}' is already defined")]
    DuplicateNode(String),

    #[error("Node '{0}' already has an outgoing edge")]
    DuplicateEdge(String),

    #[error("Node '{0}' not found in graph")]
    UnknownNode(String),

    #[error("Graph has no entry point")]
    NoEntryPoint,

    #[error("Entry point '{0}' not found in graph nodes")]
    EntryPointNotFound(String),

    #[error("Transition target '{target}' not found (from node '{from}')")]
    TransitionTargetNotFound { from: String, target: String },

    #[error("Node '{node}' routed to unknown key '{route}'")]
    UnknownRoute { node: String, route: String },

    #[error("Recursion limit of {0} node executions reached")]
    RecursionLimit(usize),

    #[error("Node '{node}' failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: NodeError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn push(tag: &'static str) -> FnNode<impl Fn(Vec<&'static str>) -> std::future::Ready<Result<Vec<&'static str>, NodeError>>> {
        FnNode(move |mut state: Vec<&'static str>| {
            state.push(tag);
            std::future::ready(Ok(state))
        })
    }

    #[tokio::test]
    async fn test_linear_graph_runs_in_order() {
        let mut graph = StateGraph::new();
        graph.add_node("a", push("a")).unwrap();
        graph.add_node("b", push("b")).unwrap();
        graph.add_edge("a", "b").unwrap();
        graph.add_edge("b", END).unwrap();
        graph.set_entry_point("a");

        let run = graph.compile().unwrap().invoke(Vec::new()).await.unwrap();
        assert_eq!(run.state, vec!["a", "b"]);
        assert_eq!(run.path, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_node_without_edge_is_terminal() {
        let mut graph = StateGraph::new();
        graph.add_node("only", push("only")).unwrap();
        graph.set_entry_point("only");

        let run = graph.compile().unwrap().invoke(Vec::new()).await.unwrap();
        assert_eq!(run.path, vec!["only"]);
    }

    #[tokio::test]
    async fn test_conditional_loop_until_done() {
        let mut graph = StateGraph::new();
        graph.add_node("tick", push("tick")).unwrap();
        graph
            .add_conditional_edges(
                "tick",
                |state: &Vec<&'static str>| if state.len() < 3 { "again" } else { "done" },
                &[("again", "tick"), ("done", END)],
            )
            .unwrap();
        graph.set_entry_point("tick");

        let run = graph.compile().unwrap().invoke(Vec::new()).await.unwrap();
        assert_eq!(run.state.len(), 3);
    }

    #[tokio::test]
    async fn test_recursion_limit() {
        let mut graph = StateGraph::new();
        graph.add_node("spin", push("spin")).unwrap();
        graph.add_edge("spin", "spin").unwrap();
        graph.set_entry_point("spin");

        let compiled = graph.compile().unwrap().with_recursion_limit(5);
        let err = compiled.invoke(Vec::new()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::RecursionLimit(5)));
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let mut graph = StateGraph::new();
        graph.add_node("a", push("a")).unwrap();
        graph
            .add_conditional_edges("a", |_: &Vec<&'static str>| "nowhere", &[("done", END)])
            .unwrap();
        graph.set_entry_point("a");

        let err = graph.compile().unwrap().invoke(Vec::new()).await.unwrap_err();
        assert!(matches!(err, WorkflowError::UnknownRoute { ref route, .. } if route == "nowhere"));
    }

    #[tokio::test]
    async fn test_node_failure_is_propagated() {
        let mut graph: StateGraph<u32> = StateGraph::new();
        graph
            .add_node(
                "boom",
                FnNode(|_: u32| async { Err::<u32, NodeError>("kaboom".into()) }),
            )
            .unwrap();
        graph.set_entry_point("boom");

        let err = graph.compile().unwrap().invoke(0).await.unwrap_err();
        assert_eq!(err.to_string(), "Node 'boom' failed: kaboom");
    }

    #[test]
    fn test_compile_validation() {
        let mut graph: StateGraph<u32> = StateGraph::new();
        assert!(matches!(
            StateGraph::<u32>::new().compile(),
            Err(WorkflowError::NoEntryPoint)
        ));

        graph.add_node("a", FnNode(|s: u32| async move { Ok::<u32, NodeError>(s) })).unwrap();
        assert!(matches!(
            graph.add_node("a", FnNode(|s: u32| async move { Ok::<u32, NodeError>(s) })),
            Err(WorkflowError::DuplicateNode(_))
        ));
        assert!(matches!(
            graph.add_node("", FnNode(|s: u32| async move { Ok::<u32, NodeError>(s) })),
            Err(WorkflowError::InvalidNodeName(_))
        ));
        graph.add_edge("a", "missing").unwrap();
        assert!(matches!(
            graph.add_edge("a", END),
            Err(WorkflowError::DuplicateEdge(_))
        ));
        graph.set_entry_point("a");
        assert!(matches!(
            graph.compile(),
            Err(WorkflowError::TransitionTargetNotFound { .. })
        ));
    }
}
