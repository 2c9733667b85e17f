use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => Ok(render_table(&serde_json::to_value(value)?, table_options())),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn table_options() -> table::TableOptions {
    let prefs = ui::prefs();
    table::TableOptions {
        max_width: prefs.term_width,
        color: prefs.table_color,
    }
}

/// Objects render as key/value rows, arrays of objects as one row per item
/// with the union of their keys as columns (first-seen order).
fn render_table(value: &Value, options: table::TableOptions) -> String {
    match value {
        Value::Array(items) if items.is_empty() => String::from("(no rows)"),
        Value::Array(items) if items.iter().all(Value::is_object) => {
            let mut headers = Vec::<&str>::new();
            for map in items.iter().filter_map(Value::as_object) {
                for key in map.keys() {
                    if !headers.contains(&key.as_str()) {
                        headers.push(key);
                    }
                }
            }
            let rows = items
                .iter()
                .filter_map(Value::as_object)
                .map(|map| {
                    headers
                        .iter()
                        .map(|header| map.get(*header).map_or_else(|| "-".to_string(), cell))
                        .collect()
                })
                .collect::<Vec<Vec<String>>>();
            table::render_table(&headers, &rows, options)
        }
        Value::Array(items) => {
            let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
            table::render_table(&["value"], &rows, options)
        }
        Value::Object(map) => {
            let rows = map
                .iter()
                .map(|(key, value)| vec![key.clone(), cell(value)])
                .collect::<Vec<_>>();
            table::render_table(&["key", "value"], &rows, options)
        }
        scalar => table::render_table(&["value"], &[vec![cell(scalar)]], options),
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(v) => v.clone(),
        Value::Number(v) => v.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::{render, render_table, table::TableOptions};
    use crate::cli::OutputFormat;

    const PLAIN: TableOptions = TableOptions {
        max_width: None,
        color: false,
    };

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Snapshot {
        patient_id: &'static str,
        variability_index: f64,
    }

    fn snapshot() -> Snapshot {
        Snapshot {
            patient_id: "PX-1",
            variability_index: 0.78,
        }
    }

    #[test]
    fn json_render_is_valid_json() {
        let out = render(&snapshot(), OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["patientId"], "PX-1");
        assert_eq!(parsed["variabilityIndex"], 0.78);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let out = render(&snapshot(), OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
        assert!(serde_json::from_str::<serde_json::Value>(&out).is_ok());
    }

    #[test]
    fn object_renders_as_key_value_rows() {
        let value = serde_json::to_value(snapshot()).unwrap();
        let out = render_table(&value, PLAIN);
        assert!(out.lines().next().is_some_and(|line| line.starts_with("key")));
        assert!(out.contains("patientId"));
        assert!(out.contains("0.78"));
    }

    #[test]
    fn array_of_objects_uses_union_of_keys() {
        let value = serde_json::json!([
            {"subject": "Cellular", "flexibility": 80.5},
            {"subject": "Immune", "rigidity": 12}
        ]);
        let out = render_table(&value, PLAIN);
        let header = out.lines().next().unwrap();
        assert!(header.contains("subject"));
        assert!(header.contains("flexibility"));
        assert!(header.contains("rigidity"));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn empty_array_has_placeholder() {
        let out = render_table(&serde_json::json!([]), PLAIN);
        assert_eq!(out, "(no rows)");
    }
}
