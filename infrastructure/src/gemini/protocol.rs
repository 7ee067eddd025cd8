//! Wire format for `generateContent` requests.
//!
//! Response bodies deserialize straight into
//! [`ResponseTurn`](agendai_domain::ResponseTurn); only the request side needs
//! explicit mapping.

use agendai_application::Exchange;
use agendai_domain::{ConversationTurn, GenerationSettings, ToolCatalog, ToolSchema};
use serde_json::{Map, Value, json};

/// Convert one tool schema to a Gemini function declaration.
///
/// Types are lowercase JSON-schema names; enumerations become `string` with
/// an `enum` list.
pub fn function_declaration(tool: &ToolSchema) -> Value {
    let mut properties = Map::new();
    for param in &tool.parameters {
        let mut prop = Map::new();
        prop.insert("type".to_string(), json!(param.kind.json_type()));
        prop.insert("description".to_string(), json!(param.description));
        if let Some(values) = param.kind.allowed_values() {
            prop.insert("enum".to_string(), json!(values));
        }
        properties.insert(param.name.clone(), Value::Object(prop));
    }

    json!({
        "name": tool.name,
        "description": tool.description,
        "parameters": {
            "type": "object",
            "properties": properties,
            "required": tool.required,
        }
    })
}

/// All catalog tools, in catalog order, wrapped as a single `tools` entry.
pub fn tools_field(catalog: &ToolCatalog) -> Value {
    let declarations: Vec<Value> = catalog.tools().iter().map(function_declaration).collect();
    json!([{ "functionDeclarations": declarations }])
}

pub fn generation_config(settings: &GenerationSettings) -> Value {
    json!({
        "temperature": settings.temperature(),
        "maxOutputTokens": settings.max_output_tokens(),
        "topP": settings.top_p(),
        "topK": settings.top_k(),
    })
}

fn function_response(tool_name: &str, payload: &Value) -> Value {
    // The API only accepts an object as the response.
    let response = match payload {
        Value::Object(_) => payload.clone(),
        other => json!({ "result": other }),
    };
    json!({ "functionResponse": { "name": tool_name, "response": response } })
}

/// Map the session history onto `contents`.
///
/// Model turns with no parts are dropped, and the tool results around them
/// then collapse into one `user` content.
pub fn contents(turns: &[ConversationTurn]) -> Vec<Value> {
    let mut contents: Vec<Value> = Vec::new();
    let mut pending_results: Vec<Value> = Vec::new();

    let flush = |contents: &mut Vec<Value>, pending: &mut Vec<Value>| {
        if !pending.is_empty() {
            contents.push(json!({ "role": "user", "parts": std::mem::take(pending) }));
        }
    };

    for turn in turns {
        match turn {
            ConversationTurn::ToolResult { tool_name, payload } => {
                pending_results.push(function_response(tool_name, payload));
            }
            ConversationTurn::Prompt { text, .. } => {
                flush(&mut contents, &mut pending_results);
                contents.push(json!({ "role": "user", "parts": [{ "text": text }] }));
            }
            ConversationTurn::Response(response) => {
                flush(&mut contents, &mut pending_results);
                let parts: Vec<Value> = response
                    .parts()
                    .filter(|p| p.text.is_some() || p.function_call.is_some())
                    .filter_map(|p| serde_json::to_value(p).ok())
                    .collect();
                if !parts.is_empty() {
                    contents.push(json!({ "role": "model", "parts": parts }));
                }
            }
        }
    }
    flush(&mut contents, &mut pending_results);

    contents
}

/// Full request body for one exchange.
pub fn request_body(exchange: Exchange<'_>) -> Value {
    let mut body = json!({
        "contents": contents(exchange.turns),
        "generationConfig": generation_config(exchange.settings),
    });
    if !exchange.catalog.is_empty() {
        body["tools"] = tools_field(exchange.catalog);
    }
    body
}

#[cfg(test)]
mod tests {
    use super::*;
    use agendai_domain::{ParameterSpec, Part, ResponseTurn, scheduling_catalog};

    #[test]
    fn test_function_declaration() {
        let tool = ToolSchema::new("delete_calendar_event", "Deletes an event")
            .with_required(ParameterSpec::string("event_id", "Event to delete"))
            .with_parameter(ParameterSpec::enumeration("status", "Status", ["pending", "confirmed"]));

        let decl = function_declaration(&tool);

        assert_eq!(decl["name"], "delete_calendar_event");
        assert_eq!(decl["parameters"]["type"], "object");
        assert_eq!(decl["parameters"]["properties"]["event_id"]["type"], "string");
        assert_eq!(
            decl["parameters"]["properties"]["status"]["enum"],
            json!(["pending", "confirmed"])
        );
        assert!(decl["parameters"]["properties"]["event_id"]["enum"].is_null());
        assert_eq!(decl["parameters"]["required"], json!(["event_id"]));
    }

    #[test]
    fn test_contents_mapping() {
        let turns = vec![
            ConversationTurn::prompt("Liste os eventos"),
            ConversationTurn::Response(ResponseTurn::from_parts(vec![
                Part::function_call("list_calendar_events", json!({"professional_id": "p"})),
                Part::function_call("get_calendar_free_busy", json!({"professional_id": "p"})),
            ])),
            ConversationTurn::tool_result("list_calendar_events", json!({"events": []})),
            ConversationTurn::Response(ResponseTurn::from_text("Eventos recebidos.")),
            ConversationTurn::tool_result("get_calendar_free_busy", json!(["not", "an", "object"])),
            ConversationTurn::Response(ResponseTurn::from_text("Agenda livre.")),
        ];

        let contents = contents(&turns);

        assert_eq!(contents.len(), 6);
        assert_eq!(contents[0], json!({"role": "user", "parts": [{"text": "Liste os eventos"}]}));
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(
            contents[1]["parts"][0]["functionCall"]["name"],
            "list_calendar_events"
        );
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(
            contents[2]["parts"][0]["functionResponse"],
            json!({"name": "list_calendar_events", "response": {"events": []}})
        );
        assert_eq!(contents[3]["parts"][0]["text"], "Eventos recebidos.");
        assert_eq!(
            contents[4]["parts"][0]["functionResponse"]["response"],
            json!({"result": ["not", "an", "object"]})
        );
        assert_eq!(contents[5], json!({"role": "model", "parts": [{"text": "Agenda livre."}]}));
    }

    #[test]
    fn test_empty_model_turn_is_dropped() {
        let turns = vec![
            ConversationTurn::prompt("oi"),
            ConversationTurn::Response(ResponseTurn::from_parts(vec![
                Part::function_call("list_calendar_events", json!({})),
                Part::function_call("read_sheet_config", json!({})),
            ])),
            ConversationTurn::tool_result("list_calendar_events", json!({"events": []})),
            ConversationTurn::Response(ResponseTurn::default()),
            ConversationTurn::tool_result("read_sheet_config", json!({"ok": true})),
        ];

        let contents = contents(&turns);

        assert_eq!(contents.len(), 3);
        assert_eq!(contents[2]["parts"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_every_candidate_is_replayed() {
        let mut response = ResponseTurn::from_parts(vec![Part::function_call(
            "list_calendar_events",
            json!({}),
        )]);
        let second = ResponseTurn::from_parts(vec![Part::function_call(
            "read_sheet_config",
            json!({}),
        )]);
        response.candidates.extend(second.candidates);
        let answered = response.requested_tool_names();
        let turns = vec![ConversationTurn::prompt("oi"), ConversationTurn::Response(response)];

        let contents = contents(&turns);

        let replayed: Vec<&str> = contents[1]["parts"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["functionCall"]["name"].as_str())
            .collect();
        assert_eq!(replayed, answered);
        assert_eq!(replayed, vec!["list_calendar_events", "read_sheet_config"]);
    }

    #[test]
    fn test_request_body() {
        let catalog = scheduling_catalog().unwrap();
        let settings = GenerationSettings::default();
        let turns = vec![ConversationTurn::prompt("oi")];

        let body = request_body(Exchange {
            turns: &turns,
            settings: &settings,
            catalog: &catalog,
        });

        assert_eq!(body["generationConfig"]["maxOutputTokens"], 1024);
        assert_eq!(body["generationConfig"]["topK"], 40);
        let declarations = body["tools"][0]["functionDeclarations"].as_array().unwrap();
        assert_eq!(declarations.len(), 9);
        assert_eq!(declarations[0]["name"], "list_calendar_events");
    }

    #[test]
    fn test_request_body_without_tools() {
        let catalog = ToolCatalog::new();
        let settings = GenerationSettings::default();
        let body = request_body(Exchange {
            turns: &[],
            settings: &settings,
            catalog: &catalog,
        });
        assert!(body.get("tools").is_none());
        assert_eq!(body["contents"], json!([]));
    }
}
