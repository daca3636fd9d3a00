#[derive(Clone, Debug)]
pub struct ExecutionConfig {
    /// Upper bound on node executions per invocation; `None` disables it.
    pub max_steps: Option<usize>,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            max_steps: Some(25),
        }
    }
}
