mod error;
mod runnable;
mod value;

pub mod checkpoint;
pub mod llm;
pub mod output_parsers;
pub mod state;
pub mod tool;

pub use checkpoint::{
    Checkpoint, CheckpointMetadata, Checkpointer, HistoryCheckpointer, InMemoryCheckpointer,
};
pub use error::SwitchyardError;
pub use llm::{LlmRequest, LlmResponse, Message, Role};
pub use output_parsers::{strip_code_fences, JsonOutputParser};
pub use runnable::Runnable;
pub use state::{Append, GraphState, Reducer, StateSchema, StateUpdate};
pub use tool::{Tool, ToolError};
pub use value::{TryFromValue, Value};
