use std::collections::HashMap;

use async_trait::async_trait;
use switchyard_core::{Message, Runnable, SwitchyardError, Value};

use crate::PromptTemplate;

#[derive(Debug, Clone)]
pub enum MessagePromptTemplate {
    System(PromptTemplate),
    Human(PromptTemplate),
}

impl MessagePromptTemplate {
    pub fn system(template: &str) -> Self {
        Self::System(PromptTemplate::new(template))
    }

    pub fn human(template: &str) -> Self {
        Self::Human(PromptTemplate::new(template))
    }

    pub fn format(&self, vars: &HashMap<String, Value>) -> Result<Message, SwitchyardError> {
        match self {
            MessagePromptTemplate::System(t) => Ok(Message::system(t.render(vars)?)),
            MessagePromptTemplate::Human(t) => Ok(Message::user(t.render(vars)?)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatPromptTemplate {
    messages: Vec<MessagePromptTemplate>,
}

impl ChatPromptTemplate {
    pub fn new(messages: Vec<MessagePromptTemplate>) -> Self {
        Self { messages }
    }

    pub fn format_messages(
        &self,
        vars: &HashMap<String, Value>,
    ) -> Result<Vec<Message>, SwitchyardError> {
        self.messages.iter().map(|tmpl| tmpl.format(vars)).collect()
    }
}

#[async_trait]
impl Runnable<HashMap<String, Value>, Vec<Message>> for ChatPromptTemplate {
    async fn invoke(&self, input: HashMap<String, Value>) -> Result<Vec<Message>, SwitchyardError> {
        self.format_messages(&input)
    }
}
