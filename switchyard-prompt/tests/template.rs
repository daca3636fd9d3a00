use std::collections::HashMap;

use switchyard_core::Value;
use switchyard_prompt::PromptTemplate;

#[test]
fn renders_template_with_vars() {
    let tmpl = PromptTemplate::new("Document:\n{{document_text}}");
    let mut vars = HashMap::new();
    vars.insert("document_text".to_string(), Value::from("John Doe"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "Document:\nJohn Doe");
}

#[test]
fn does_not_confuse_overlapping_keys() {
    let tmpl = PromptTemplate::new("{{name}} {{fullname}}");
    let mut vars = HashMap::new();
    vars.insert("name".to_string(), Value::from("X"));
    vars.insert("fullname".to_string(), Value::from("Y"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "X Y");
}

#[test]
fn leaves_single_braces_alone() {
    let tmpl = PromptTemplate::new("{ \"Risk Level\": \"Medium\" } {{data}}");
    let mut vars = HashMap::new();
    vars.insert("data".to_string(), Value::from("ok"));
    let rendered = tmpl.render(&vars).expect("render");
    assert_eq!(rendered, "{ \"Risk Level\": \"Medium\" } ok");
}

#[test]
fn missing_vars_render_empty() {
    let tmpl = PromptTemplate::new("[{{ missing }}]");
    let rendered = tmpl.render(&HashMap::new()).expect("render");
    assert_eq!(rendered, "[]");
}

#[test]
fn inserted_values_are_not_rendered_again() {
    let tmpl = PromptTemplate::new("{{a}}");
    let mut vars = HashMap::new();
    vars.insert("a".to_string(), Value::from("{{b}}"));
    vars.insert("b".to_string(), Value::from("nope"));
    assert_eq!(tmpl.render(&vars).expect("render"), "{{b}}");
}
