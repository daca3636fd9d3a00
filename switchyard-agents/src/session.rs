use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use switchyard_graph::{ExecutableGraph, InMemoryCheckpointer, StateUpdate};

use crate::graph::build_agent_graph;
use crate::router::{route, Route};
use crate::state::{ConversationState, ConversationUpdate, Message, Role};
use crate::AgentError;

pub const DEFAULT_THREAD_ID: &str = "default";

/// Result of one chat turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChatReply {
    pub thread_id: String,
    pub route: Route,
    /// Agent messages produced this turn.
    pub replies: Vec<String>,
    /// Full todo list for the thread after this turn.
    pub todos: Vec<String>,
    /// `replies` joined by blank lines, then the tracked-todos line.
    pub text: String,
}

/// Joins the agent replies with blank lines and appends the todo line.
pub fn render_reply(replies: &[String], todos: &[String]) -> String {
    format!("{}\n\nTracked todos: {:?}", replies.join("\n\n"), todos)
}

/// Session façade over the agent graph: one call per user message, state kept
/// per thread id in memory for the life of the process.
///
/// Calls on the same thread id are serialized; different thread ids proceed
/// independently.
pub struct AgentChat {
    graph: ExecutableGraph<ConversationState>,
    checkpointer: InMemoryCheckpointer<ConversationState>,
    thread_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl AgentChat {
    pub fn new() -> Result<Self, AgentError> {
        let checkpointer = InMemoryCheckpointer::default();
        let graph = build_agent_graph(checkpointer.clone())?;
        Ok(Self {
            graph,
            checkpointer,
            thread_locks: Mutex::new(HashMap::new()),
        })
    }

    pub async fn chat(
        &self,
        message: &str,
        thread_id: Option<&str>,
    ) -> Result<ChatReply, AgentError> {
        let thread_id = resolve_thread_id(thread_id);
        let lock = self.thread_lock(&thread_id)?;
        let _guard = lock.lock().await;

        let selected = route(message);
        let state = self
            .graph
            .invoke_with_thread(&thread_id, StateUpdate::new(ConversationUpdate::user_message(message)))
            .await?;

        let replies = replies_since_last_user_message(&state.data.messages);
        let text = render_reply(&replies, &state.data.todos);
        tracing::info!(
            thread_id = %thread_id,
            route = %selected,
            todos = state.data.todos.len(),
            "chat turn complete"
        );

        Ok(ChatReply {
            thread_id,
            route: selected,
            replies,
            todos: state.data.todos,
            text,
        })
    }

    /// Current todo list for a thread (empty for an unknown thread).
    pub async fn todos(&self, thread_id: Option<&str>) -> Result<Vec<String>, AgentError> {
        Ok(self.snapshot(thread_id).await?.todos)
    }

    /// Full message history for a thread (empty for an unknown thread).
    pub async fn history(&self, thread_id: Option<&str>) -> Result<Vec<Message>, AgentError> {
        Ok(self.snapshot(thread_id).await?.messages)
    }

    /// Number of threads with stored state.
    pub fn thread_count(&self) -> Result<usize, AgentError> {
        self.checkpointer
            .thread_count()
            .map_err(|_| AgentError::LockPoisoned)
    }

    async fn snapshot(&self, thread_id: Option<&str>) -> Result<ConversationState, AgentError> {
        let thread_id = resolve_thread_id(thread_id);
        Ok(self
            .graph
            .get_state(&thread_id)
            .await?
            .map(|state| state.data)
            .unwrap_or_default())
    }

    fn thread_lock(&self, thread_id: &str) -> Result<Arc<tokio::sync::Mutex<()>>, AgentError> {
        let mut locks = self
            .thread_locks
            .lock()
            .map_err(|_| AgentError::LockPoisoned)?;
        Ok(Arc::clone(locks.entry(thread_id.to_string()).or_default()))
    }
}

fn resolve_thread_id(thread_id: Option<&str>) -> String {
    match thread_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => DEFAULT_THREAD_ID.to_string(),
    }
}

fn replies_since_last_user_message(messages: &[Message]) -> Vec<String> {
    let start = messages
        .iter()
        .rposition(|message| message.role == Role::User)
        .map(|index| index + 1)
        .unwrap_or(0);
    messages[start..]
        .iter()
        .filter(|message| message.role == Role::Agent)
        .map(|message| message.content.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_or_missing_thread_ids_share_default() {
        assert_eq!(resolve_thread_id(None), "default");
        assert_eq!(resolve_thread_id(Some("")), "default");
        assert_eq!(resolve_thread_id(Some("t1")), "t1");
    }

    #[test]
    fn only_replies_after_latest_user_message_are_rendered() {
        let messages = vec![
            Message::user("one"),
            Message::agent("first"),
            Message::user("two"),
            Message::agent("second"),
        ];
        assert_eq!(replies_since_last_user_message(&messages), vec!["second"]);
    }

    #[test]
    fn render_appends_todo_line() {
        let text = render_reply(
            &["a".to_string(), "b".to_string()],
            &["milk".to_string(), "eggs".to_string()],
        );
        assert_eq!(text, "a\n\nb\n\nTracked todos: [\"milk\", \"eggs\"]");
        assert_eq!(render_reply(&[], &[]), "\n\nTracked todos: []");
    }
}
