use async_trait::async_trait;
use switchyard_core::{GraphState, Runnable, StateUpdate, SwitchyardError};

use crate::router::Route;
use crate::state::{ConversationState, ConversationUpdate};

const TODO_KEYWORD: &str = "todo";
const EMPTY_TODO_LIST: &str = "(no items yet)";

/// Items listed after the last literal "todo" (case-sensitive, unlike
/// routing): comma separated, trimmed, empties dropped. A leading ':' is
/// treated as punctuation, not part of the item.
pub fn parse_todo_items(message: &str) -> Vec<String> {
    let tail = match message.rfind(TODO_KEYWORD) {
        Some(start) => &message[start + TODO_KEYWORD.len()..],
        None => message,
    };
    tail.trim_start_matches(|c: char| c == ':' || c.is_whitespace())
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn capture_todos(state: &ConversationState) -> ConversationUpdate {
    let additions = parse_todo_items(state.last_content());
    let summary = if state.todos.is_empty() && additions.is_empty() {
        EMPTY_TODO_LIST.to_string()
    } else {
        state
            .todos
            .iter()
            .chain(additions.iter())
            .map(|item| format!("- {item}"))
            .collect::<Vec<_>>()
            .join("\n")
    };
    let reply = format!(
        "I captured your tasks. Current list:\n{summary}\nUse 'todo' again to add more items."
    );
    ConversationUpdate {
        todos: additions,
        ..ConversationUpdate::agent_reply(reply)
    }
}

pub fn analyze(state: &ConversationState) -> ConversationUpdate {
    let prompt = state.last_content();
    ConversationUpdate::agent_reply(format!(
        "Here is a lightweight analysis of your request:\n\
         - Main idea: {prompt}\n\
         - Signal: I am a deterministic reasoning helper, not an LLM.\n\
         - Next step: ask the todo agent to track follow-ups or simply continue chatting."
    ))
}

pub fn echo(state: &ConversationState) -> ConversationUpdate {
    ConversationUpdate::agent_reply(format!(
        "Echo agent here. You said: '{}'.",
        state.last_content()
    ))
}

/// Entry node. Routing happens on its outgoing conditional edge, so the node
/// itself leaves the state untouched.
pub struct RouterNode;

#[async_trait]
impl Runnable<GraphState<ConversationState>, StateUpdate<ConversationState>> for RouterNode {
    async fn invoke(
        &self,
        _input: GraphState<ConversationState>,
    ) -> Result<StateUpdate<ConversationState>, SwitchyardError> {
        Ok(StateUpdate::empty())
    }
}

/// One of the three answering agents.
pub struct AgentNode {
    route: Route,
}

impl AgentNode {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

#[async_trait]
impl Runnable<GraphState<ConversationState>, StateUpdate<ConversationState>> for AgentNode {
    async fn invoke(
        &self,
        input: GraphState<ConversationState>,
    ) -> Result<StateUpdate<ConversationState>, SwitchyardError> {
        let update = match self.route {
            Route::Todo => capture_todos(&input.data),
            Route::Analysis => analyze(&input.data),
            Route::Echo => echo(&input.data),
        };
        tracing::debug!(agent = %self.route, added_todos = update.todos.len(), "agent replied");
        Ok(StateUpdate::new(update))
    }
}
