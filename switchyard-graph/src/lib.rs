mod config;
mod error;
mod graph;

pub use config::ExecutionConfig;
pub use error::GraphError;
pub use graph::{ExecutableGraph, GraphBuilder, GraphNode, END};

pub use switchyard_core::{
    Checkpoint, CheckpointMetadata, Checkpointer, GraphState, HistoryCheckpointer,
    InMemoryCheckpointer, StateSchema, StateUpdate,
};
