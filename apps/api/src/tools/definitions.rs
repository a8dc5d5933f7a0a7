use serde_json::{json, Value};

use crate::tools::ToolKind;

/// Function definitions the voice assistant is configured with.
/// When `server_url` is set each tool points its calls at it.
pub fn tool_definitions(server_url: Option<&str>) -> Vec<Value> {
    ToolKind::ALL
        .into_iter()
        .map(|kind| {
            let mut tool = json!({
                "type": "function",
                "function": {
                    "name": kind.name(),
                    "description": description(kind),
                    "parameters": parameters(kind),
                }
            });
            if let Some(url) = server_url {
                tool["server"] = json!({ "url": url });
            }
            tool
        })
        .collect()
}

fn description(kind: ToolKind) -> &'static str {
    match kind {
        ToolKind::JobSearch => "Searches job listings for a role in an area.",
        ToolKind::WebSearch => "Searches the web for the user provided query.",
    }
}

fn parameters(kind: ToolKind) -> Value {
    match kind {
        ToolKind::JobSearch => json!({
            "type": "object",
            "properties": {
                "role": { "type": "string", "description": "Job title or role, e.g. \"React developer\"" },
                "area": { "type": "string", "description": "City, country or \"remote\"" }
            },
            "required": ["role", "area"]
        }),
        ToolKind::WebSearch => json!({
            "type": "object",
            "properties": {
                "search_query": { "type": "string", "description": "What to search the web for" }
            },
            "required": ["search_query"]
        }),
    }
}
