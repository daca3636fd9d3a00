use serde::{Deserialize, Serialize};
use switchyard_core::{Append, Reducer, StateSchema};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn agent(content: impl Into<String>) -> Self {
        Self {
            role: Role::Agent,
            content: content.into(),
        }
    }
}

/// Conversation for one thread id. Both lists only ever grow.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConversationState {
    pub messages: Vec<Message>,
    pub todos: Vec<String>,
}

impl ConversationState {
    /// Content of the most recent message, or "" for an empty conversation.
    pub fn last_content(&self) -> &str {
        self.messages
            .last()
            .map(|message| message.content.as_str())
            .unwrap_or_default()
    }
}

/// Additions to a [`ConversationState`]; applied by appending.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConversationUpdate {
    pub messages: Vec<Message>,
    pub todos: Vec<String>,
}

impl ConversationUpdate {
    pub fn user_message(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(content)],
            todos: Vec::new(),
        }
    }

    pub fn agent_reply(content: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::agent(content)],
            todos: Vec::new(),
        }
    }
}

impl StateSchema for ConversationState {
    type Update = ConversationUpdate;

    fn apply(current: &Self, update: Self::Update) -> Self {
        Self {
            messages: Append.reduce(current.messages.clone(), update.messages),
            todos: Append.reduce(current.todos.clone(), update.todos),
        }
    }
}
