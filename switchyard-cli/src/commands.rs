use std::sync::Arc;

use anyhow::Context;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::json;
use switchyard_agents::AgentChat;
use switchyard_kyc::{DocumentIngestor, KycPipeline, RiskAnalyzer};
use switchyard_llm::GroqClient;
use switchyard_mcp::{AgentChatTool, McpServer};

use crate::KycArgs;

const SERVER_NAME: &str = "switchyard-agents";

pub async fn serve() -> anyhow::Result<()> {
    let chat = Arc::new(AgentChat::new()?);
    let server = McpServer::new(SERVER_NAME, env!("CARGO_PKG_VERSION"))
        .with_tool(AgentChatTool::new(chat));
    server.serve_stdio().await?;
    Ok(())
}

pub async fn chat(message: &str, thread: Option<&str>) -> anyhow::Result<()> {
    let chat = AgentChat::new()?;
    let reply = chat.chat(message, thread).await?;
    println!("[{}] {}", reply.route, reply.text);
    Ok(())
}

pub async fn interactive(thread: Option<&str>) -> anyhow::Result<()> {
    let chat = AgentChat::new()?;
    let mut editor = DefaultEditor::new()?;

    println!("Agent router. Messages with 'todo' go to the todo agent; why/because/explain/analysis to the analysis agent; anything else is echoed.");
    println!("Type quit, exit or q to leave.");

    loop {
        let line = match tokio::task::block_in_place(|| editor.readline("You: ")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        if matches!(message.to_lowercase().as_str(), "quit" | "exit" | "q") {
            break;
        }
        if let Err(err) = editor.add_history_entry(message) {
            tracing::debug!(error = %err, "could not record REPL history");
        }

        match chat.chat(message, thread).await {
            Ok(reply) => println!("[{}]\n{}\n", reply.route, reply.text),
            Err(err) => eprintln!("error: {err}\n"),
        }
    }

    println!("Goodbye.");
    Ok(())
}

pub async fn kyc(args: KycArgs) -> anyhow::Result<()> {
    let document = match (args.document, args.file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        (None, None) => anyhow::bail!("either --document or --file is required"),
    };

    let client = GroqClient::with_base_url(args.api_key, &args.base_url)?.with_model(args.model);
    let mut pipeline = KycPipeline::new();
    pipeline
        .register_agent(DocumentIngestor::new(client.clone()))
        .register_agent(RiskAnalyzer::new(client));

    let result = pipeline
        .run_interaction(json!({ "document_text": document }))
        .await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
