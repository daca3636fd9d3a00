use std::collections::HashMap;
use std::sync::Arc;

use switchyard_core::{Checkpoint, Checkpointer, GraphState, Runnable, StateSchema, StateUpdate};

use crate::{ExecutionConfig, GraphError};

/// Edge target meaning "stop here".
pub const END: &str = "__end__";

/// A graph node: takes the current state, returns an update to fold into it.
pub trait GraphNode<S: StateSchema>: Runnable<GraphState<S>, StateUpdate<S>> {}

impl<S: StateSchema, T> GraphNode<S> for T where T: Runnable<GraphState<S>, StateUpdate<S>> {}

type RouteFn<S> = Arc<dyn Fn(&GraphState<S>) -> String + Send + Sync>;

enum Edge<S: StateSchema> {
    Direct(String),
    Conditional(RouteFn<S>),
}

pub struct GraphBuilder<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, Edge<S>>,
    entry: Option<String>,
    checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    config: ExecutionConfig,
}

impl<S: StateSchema> Default for GraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSchema> GraphBuilder<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            checkpointer: None,
            config: ExecutionConfig::default(),
        }
    }

    pub fn add_node<R>(mut self, name: &str, node: R) -> Self
    where
        R: GraphNode<S> + 'static,
    {
        self.nodes.insert(name.to_string(), Box::new(node));
        self
    }

    pub fn set_entry(mut self, name: &str) -> Self {
        self.entry = Some(name.to_string());
        self
    }

    pub fn add_edge(mut self, from: &str, to: &str) -> Self {
        self.edges
            .insert(from.to_string(), Edge::Direct(to.to_string()));
        self
    }

    /// After `from` runs, `route` picks the next node by name (or [`END`]).
    pub fn add_conditional_edge<F>(mut self, from: &str, route: F) -> Self
    where
        F: Fn(&GraphState<S>) -> String + Send + Sync + 'static,
    {
        self.edges
            .insert(from.to_string(), Edge::Conditional(Arc::new(route)));
        self
    }

    pub fn with_checkpointer<C>(mut self, checkpointer: C) -> Self
    where
        C: Checkpointer<S> + 'static,
    {
        self.checkpointer = Some(Arc::new(checkpointer));
        self
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<ExecutableGraph<S>, GraphError> {
        let entry = self.entry.ok_or(GraphError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphError::MissingNode { node: entry });
        }
        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(GraphError::MissingNode { node: from.clone() });
            }
            if let Edge::Direct(to) = edge {
                if to != END && !self.nodes.contains_key(to) {
                    return Err(GraphError::InvalidEdge { node: to.clone() });
                }
            }
        }
        Ok(ExecutableGraph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            checkpointer: self.checkpointer,
            config: self.config,
        })
    }
}

pub struct ExecutableGraph<S: StateSchema> {
    nodes: HashMap<String, Box<dyn GraphNode<S>>>,
    edges: HashMap<String, Edge<S>>,
    entry: String,
    checkpointer: Option<Arc<dyn Checkpointer<S>>>,
    config: ExecutionConfig,
}

impl<S: StateSchema> ExecutableGraph<S> {
    /// Runs from the entry node until a node without an outgoing edge (or an
    /// edge to [`END`]) has executed.
    pub async fn invoke(&self, state: GraphState<S>) -> Result<GraphState<S>, GraphError> {
        self.run(state).await.map(|(state, _)| state)
    }

    /// Loads the latest checkpoint for `thread_id` (or the default state),
    /// folds `input` into it, runs the graph and checkpoints the result.
    pub async fn invoke_with_thread(
        &self,
        thread_id: &str,
        input: StateUpdate<S>,
    ) -> Result<GraphState<S>, GraphError> {
        let (prior, prior_step) = match self.load_checkpoint(thread_id).await? {
            Some(checkpoint) => (checkpoint.state, checkpoint.step),
            None => (GraphState::default(), 0),
        };
        let (state, last_node) = self.run(prior.apply(input)).await?;

        if let Some(checkpointer) = &self.checkpointer {
            let checkpoint =
                Checkpoint::new(thread_id.to_string(), state.clone(), prior_step + 1, last_node);
            checkpointer
                .save(&checkpoint)
                .await
                .map_err(|err| GraphError::Checkpoint(err.to_string()))?;
            tracing::debug!(thread_id, step = checkpoint.step, "checkpoint saved");
        }
        Ok(state)
    }

    /// Latest checkpointed state for `thread_id`, if any.
    pub async fn get_state(&self, thread_id: &str) -> Result<Option<GraphState<S>>, GraphError> {
        Ok(self
            .load_checkpoint(thread_id)
            .await?
            .map(|checkpoint| checkpoint.state))
    }

    async fn load_checkpoint(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, GraphError> {
        match &self.checkpointer {
            Some(checkpointer) => checkpointer
                .load(thread_id)
                .await
                .map_err(|err| GraphError::Checkpoint(err.to_string())),
            None => Ok(None),
        }
    }

    async fn run(&self, mut state: GraphState<S>) -> Result<(GraphState<S>, String), GraphError> {
        let mut current = self.entry.clone();
        let mut steps = 0usize;
        loop {
            if let Some(max) = self.config.max_steps {
                if steps >= max {
                    return Err(GraphError::MaxStepsExceeded {
                        max,
                        reached: steps,
                    });
                }
            }
            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::MissingNode {
                    node: current.clone(),
                })?;

            tracing::debug!(node = %current, "entering node");
            let update = node
                .invoke(state.clone())
                .await
                .map_err(|source| GraphError::NodeFailed {
                    node: current.clone(),
                    source,
                })?;
            state = state.apply(update);
            steps += 1;
            tracing::trace!(node = %current, state = %state.data.trace_repr(), "state updated");

            let next = match self.edges.get(&current) {
                Some(Edge::Direct(next)) => next.clone(),
                Some(Edge::Conditional(route)) => route(&state),
                None => END.to_string(),
            };
            if next == END {
                return Ok((state, current));
            }
            if !self.nodes.contains_key(&next) {
                return Err(GraphError::InvalidEdge { node: next });
            }
            current = next;
        }
    }
}
