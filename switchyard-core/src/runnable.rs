use async_trait::async_trait;

use crate::SwitchyardError;

/// A unit of async work. Graph nodes, LLM clients and pipeline steps all
/// implement this.
#[async_trait]
pub trait Runnable<Input: Send + 'static, Output: Send + 'static>: Send + Sync {
    async fn invoke(&self, input: Input) -> Result<Output, SwitchyardError>;
}
