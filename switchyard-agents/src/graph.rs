use switchyard_graph::{
    Checkpointer, ExecutableGraph, GraphBuilder, GraphError, GraphState, END,
};

use crate::handlers::{AgentNode, RouterNode};
use crate::router::{route, Route};
use crate::state::ConversationState;

pub const ROUTER_NODE: &str = "router";

/// router -> {todo_agent | analysis_agent | echo_agent} -> END
pub fn build_agent_graph<C>(checkpointer: C) -> Result<ExecutableGraph<ConversationState>, GraphError>
where
    C: Checkpointer<ConversationState> + 'static,
{
    let mut builder = GraphBuilder::<ConversationState>::new()
        .add_node(ROUTER_NODE, RouterNode)
        .set_entry(ROUTER_NODE)
        .add_conditional_edge(ROUTER_NODE, |state: &GraphState<ConversationState>| {
            route(state.data.last_content()).as_str().to_string()
        })
        .with_checkpointer(checkpointer);

    for agent in Route::ALL {
        builder = builder
            .add_node(agent.as_str(), AgentNode::new(agent))
            .add_edge(agent.as_str(), END);
    }
    builder.build()
}
