use async_trait::async_trait;
use switchyard_core::{SwitchyardError, Value};

/// One step of a KYC run: takes the previous step's JSON object and returns
/// the next one.
#[async_trait]
pub trait KycAgent: Send + Sync {
    fn name(&self) -> &str;
    async fn process(&self, message: Value) -> Result<Value, SwitchyardError>;
}

/// Runs registered agents in order, feeding each output into the next.
#[derive(Default)]
pub struct KycPipeline {
    agents: Vec<Box<dyn KycAgent>>,
}

impl KycPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_agent<A: KycAgent + 'static>(&mut self, agent: A) -> &mut Self {
        self.agents.push(Box::new(agent));
        self
    }

    pub fn agent_names(&self) -> Vec<&str> {
        self.agents.iter().map(|agent| agent.name()).collect()
    }

    pub async fn run_interaction(&self, message: Value) -> Result<Value, SwitchyardError> {
        tracing::info!(agents = self.agents.len(), "KYC pipeline received message");
        let mut message = message;
        for agent in &self.agents {
            message = agent.process(message).await?;
            tracing::info!(agent = agent.name(), output = %message, "processed by agent");
        }
        Ok(message)
    }
}
