//! A small multi-agent router: one router node picks between a todo
//! collector, a canned analysis helper and an echo agent, and conversation
//! state is kept per thread id for the life of the process.

mod error;
mod graph;
mod handlers;
mod router;
mod session;
mod state;

pub use error::AgentError;
pub use graph::{build_agent_graph, ROUTER_NODE};
pub use handlers::{analyze, capture_todos, echo, parse_todo_items, AgentNode, RouterNode};
pub use router::{route, Route};
pub use session::{render_reply, AgentChat, ChatReply, DEFAULT_THREAD_ID};
pub use state::{ConversationState, ConversationUpdate, Message, Role};
