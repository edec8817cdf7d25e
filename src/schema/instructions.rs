use serde_json::Value;

use super::Schema;

/// Render a schema into natural-language formatting instructions suitable for
/// embedding in a prompt.
///
/// Pure function of the schema value: the same schema always renders the same
/// text. The output has two parts: a field-by-field outline of the expected
/// shape, and the raw schema JSON in a fenced block the model can follow
/// literally.
pub fn format_instructions(schema: &Schema) -> String {
    let mut outline = String::new();
    describe_value(schema.to_json(), 0, &mut outline);

    format!(
        "Your response must be a single JSON value conforming to the JSON Schema below. \
Do not output anything before or after the JSON value, and do not wrap it in markdown.\n\n\
Expected shape:\n{}\n\
Here is the JSON Schema your output must conform to:\n```json\n{}\n```",
        outline,
        schema.to_string()
    )
}

fn describe_value(schema: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let type_name = schema["type"].as_str().unwrap_or("object");

    match type_name {
        "object" => {
            let required: Vec<&str> = schema["required"]
                .as_array()
                .map(|r| r.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            if let Some(properties) = schema["properties"].as_object() {
                for (name, prop) in properties {
                    let prop_type = prop["type"].as_str().unwrap_or("object");
                    let requirement = if required.contains(&name.as_str()) {
                        "required"
                    } else {
                        "optional"
                    };

                    out.push_str(&format!("{}- \"{}\" ({}, {})", indent, name, prop_type, requirement));
                    if let Some(desc) = prop["description"].as_str() {
                        out.push_str(&format!(": {}", desc));
                    }
                    out.push('\n');

                    match prop_type {
                        "object" => describe_value(prop, depth + 1, out),
                        "array" => describe_array_items(prop, depth + 1, out),
                        _ => {}
                    }
                }
            }
        }
        "array" => {
            out.push_str(&format!("{}- a JSON array", indent));
            if let Some(min) = schema["minItems"].as_u64() {
                out.push_str(&format!(" with at least {} item(s)", min));
            }
            if let Some(desc) = schema["description"].as_str() {
                out.push_str(&format!(": {}", desc));
            }
            out.push('\n');
            describe_array_items(schema, depth + 1, out);
        }
        other => {
            out.push_str(&format!("{}- a JSON {}", indent, other));
            if let Some(desc) = schema["description"].as_str() {
                out.push_str(&format!(": {}", desc));
            }
            out.push('\n');
        }
    }
}

fn describe_array_items(array_schema: &Value, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let items = &array_schema["items"];
    if items.is_null() {
        return;
    }

    let item_type = items["type"].as_str().unwrap_or("object");
    out.push_str(&format!("{}each item is a JSON {}", indent, item_type));
    if let Some(desc) = items["description"].as_str() {
        out.push_str(&format!(": {}", desc));
    }

    if item_type == "object" {
        out.push_str(" with:\n");
        describe_value(items, depth + 1, out);
    } else {
        out.push('\n');
    }
}
