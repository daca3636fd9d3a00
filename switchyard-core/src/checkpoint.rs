use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::state::{GraphState, StateSchema};
use crate::SwitchyardError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(bound = "S: StateSchema")]
pub struct Checkpoint<S: StateSchema> {
    pub thread_id: String,
    pub state: GraphState<S>,
    pub step: u64,
    pub node: String,
    pub created_at: String,
}

impl<S: StateSchema> Checkpoint<S> {
    pub fn new(thread_id: String, state: GraphState<S>, step: u64, node: String) -> Self {
        Self {
            thread_id,
            state,
            step,
            node,
            created_at: Utc::now().to_rfc3339(),
        }
    }
}

#[async_trait::async_trait]
pub trait Checkpointer<S: StateSchema>: Send + Sync {
    async fn save(&self, checkpoint: &Checkpoint<S>) -> Result<(), SwitchyardError>;
    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, SwitchyardError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckpointMetadata {
    pub seq: u64,
    pub node: String,
    pub created_at: String,
}

#[async_trait::async_trait]
pub trait HistoryCheckpointer<S: StateSchema>: Send + Sync {
    async fn list_checkpoints(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CheckpointMetadata>, SwitchyardError>;
}

/// Process-lifetime checkpoint store. Every save is kept; `load` returns the
/// latest one for the thread. Nothing is ever evicted.
pub struct InMemoryCheckpointer<S: StateSchema> {
    inner: Arc<RwLock<HashMap<String, Vec<Checkpoint<S>>>>>,
}

impl<S: StateSchema> Default for InMemoryCheckpointer<S> {
    fn default() -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<S: StateSchema> Clone for InMemoryCheckpointer<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: StateSchema> InMemoryCheckpointer<S> {
    /// Number of threads that have at least one checkpoint.
    pub fn thread_count(&self) -> Result<usize, SwitchyardError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SwitchyardError::CheckpointFailed("lock".into()))?;
        Ok(guard.len())
    }
}

#[async_trait::async_trait]
impl<S: StateSchema> Checkpointer<S> for InMemoryCheckpointer<S> {
    async fn save(&self, checkpoint: &Checkpoint<S>) -> Result<(), SwitchyardError> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SwitchyardError::CheckpointFailed("lock".into()))?;
        guard
            .entry(checkpoint.thread_id.clone())
            .or_default()
            .push(checkpoint.clone());
        Ok(())
    }

    async fn load(&self, thread_id: &str) -> Result<Option<Checkpoint<S>>, SwitchyardError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SwitchyardError::CheckpointFailed("lock".into()))?;
        Ok(guard
            .get(thread_id)
            .and_then(|history| history.last().cloned()))
    }
}

#[async_trait::async_trait]
impl<S: StateSchema> HistoryCheckpointer<S> for InMemoryCheckpointer<S> {
    async fn list_checkpoints(
        &self,
        thread_id: &str,
    ) -> Result<Vec<CheckpointMetadata>, SwitchyardError> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SwitchyardError::CheckpointFailed("lock".into()))?;
        let metadata = guard
            .get(thread_id)
            .map(|history| {
                history
                    .iter()
                    .map(|cp| CheckpointMetadata {
                        seq: cp.step,
                        node: cp.node.clone(),
                        created_at: cp.created_at.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();
        Ok(metadata)
    }
}
