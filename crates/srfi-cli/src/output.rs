use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
        OutputFormat::Text => Ok(render_text(&serde_json::to_value(value)?)),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// `key: value` lines; array items become blocks separated by a blank line.
fn render_text(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(none)"),
        Value::Array(items) if items.iter().all(Value::is_object) => items
            .iter()
            .map(render_text)
            .collect::<Vec<_>>()
            .join("\n\n"),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", value_to_cell(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        other => value_to_cell(other),
    }
}

fn value_to_cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Array(items) if items.iter().all(|item| !item.is_object()) => items
            .iter()
            .map(value_to_cell)
            .collect::<Vec<_>>()
            .join(" "),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        srfi_implemented: Vec<u32>,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example {
            id: "chibi",
            srfi_implemented: vec![1, 2],
        };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "chibi");
    }

    #[test]
    fn raw_render_is_single_line() {
        let value = Example {
            id: "chibi",
            srfi_implemented: vec![1],
        };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert_eq!(out, r#"{"id":"chibi","srfi_implemented":[1]}"#);
    }

    #[test]
    fn text_render_lists_fields() {
        let value = vec![
            Example {
                id: "chibi",
                srfi_implemented: vec![1, 2],
            },
            Example {
                id: "guile",
                srfi_implemented: vec![],
            },
        ];
        let out = render(&value, OutputFormat::Text).expect("text render should work");
        assert_eq!(
            out,
            "id: chibi\nsrfi_implemented: 1 2\n\nid: guile\nsrfi_implemented: "
        );
    }

    #[test]
    fn text_render_of_empty_list() {
        let out = render(&Vec::<Example>::new(), OutputFormat::Text).expect("text render");
        assert_eq!(out, "(none)");
    }
}
