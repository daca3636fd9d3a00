use switchyard_core::SwitchyardError;

#[test]
fn error_display_for_llm_provider() {
    let err = SwitchyardError::LlmProvider("rate limited".to_string());
    assert_eq!(format!("{err}"), "LLM provider failed: rate limited");
}

#[test]
fn error_display_for_tool_call_failed() {
    let err = SwitchyardError::ToolCallFailed {
        tool_name: "agent_chat".to_string(),
        reason: "missing message".to_string(),
    };
    assert_eq!(
        format!("{err}"),
        "Tool call failed for 'agent_chat': missing message"
    );
}

#[test]
fn error_display_for_parse_failed() {
    let err = SwitchyardError::ParseFailed {
        output: "<html>".to_string(),
        reason: "unexpected token".to_string(),
    };
    assert_eq!(
        format!("{err}"),
        "Parsing failed on output '<html>': unexpected token"
    );
}

#[test]
fn serde_errors_convert() {
    let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let converted: SwitchyardError = err.into();
    assert!(matches!(converted, SwitchyardError::Serde(_)));
}
