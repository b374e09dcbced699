use finsight_core::Envelope;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::error::CliError;

pub fn render(envelope: &Envelope<Value>, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            let payload = if pretty {
                serde_json::to_string_pretty(envelope)?
            } else {
                serde_json::to_string(envelope)?
            };
            println!("{payload}");
        }
        OutputFormat::Table => print!("{}", render_table(envelope)?),
    }

    Ok(())
}

fn render_table(envelope: &Envelope<Value>) -> Result<String, CliError> {
    let mut out = String::new();
    out.push_str(&format!("request_id  : {}\n", envelope.meta.request_id));
    out.push_str(&format!("generated_at: {}\n", envelope.meta.generated_at));
    out.push_str(&format!("latency_ms  : {}\n", envelope.meta.latency_ms));

    if !envelope.meta.warnings.is_empty() {
        out.push_str("warnings:\n");
        for warning in &envelope.meta.warnings {
            out.push_str(&format!("  - {warning}\n"));
        }
    }

    for (name, rows) in tabular_sections(&envelope.data) {
        out.push_str(&format!("{name}:\n"));
        out.push_str(&format_rows(rows));
    }

    let rest = without_tabular_sections(&envelope.data);
    if !rest.is_null() {
        out.push_str("data:\n");
        for line in serde_json::to_string_pretty(&rest)?.lines() {
            out.push_str(&format!("  {line}\n"));
        }
    }

    Ok(out)
}

/// Top-level arrays of flat objects, printed as aligned columns.
fn tabular_sections(data: &Value) -> Vec<(&str, &[Value])> {
    let Value::Object(map) = data else {
        return Vec::new();
    };
    map.iter()
        .filter_map(|(name, value)| match value {
            Value::Array(rows) if is_tabular(rows) => Some((name.as_str(), rows.as_slice())),
            _ => None,
        })
        .collect()
}

fn without_tabular_sections(data: &Value) -> Value {
    let Value::Object(map) = data else {
        return data.clone();
    };
    let rest = map
        .iter()
        .filter(|(_, value)| !matches!(value, Value::Array(rows) if is_tabular(rows)))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect::<serde_json::Map<_, _>>();
    if rest.is_empty() {
        Value::Null
    } else {
        Value::Object(rest)
    }
}

fn is_tabular(rows: &[Value]) -> bool {
    !rows.is_empty() && rows.iter().all(Value::is_object)
}

fn format_rows(rows: &[Value]) -> String {
    let mut columns: Vec<&str> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !columns.contains(&key.as_str()) {
                    columns.push(key.as_str());
                }
            }
        }
    }

    let cells = rows
        .iter()
        .map(|row| columns.iter().map(|column| cell(&row[*column])).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let widths = columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            cells
                .iter()
                .map(|row| row[index].chars().count())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();

    let mut out = String::new();
    let header = columns.iter().map(|column| column.to_string()).collect::<Vec<_>>();
    for row in std::iter::once(&header).chain(cells.iter()) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{value:<w$}", w = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_f64() {
            Some(float) if number.is_f64() => format!("{float:.2}"),
            _ => number.to_string(),
        },
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(" "),
        other => other.to_string(),
    }
}
