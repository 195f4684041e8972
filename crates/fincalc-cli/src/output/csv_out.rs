use serde_json::Value;
use std::io;

/// Field/value CSV rows over the `result` object, or over the bare object
/// for commands that return one (the filing lookup).
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut writer = csv::Writer::from_writer(stdout.lock());

    let Some(map) = value.as_object() else {
        let _ = writer.write_record([&scalar(value)]);
        let _ = writer.flush();
        return;
    };

    let rows = match map.get("result") {
        Some(Value::Object(result)) => result,
        _ => map,
    };

    let _ = writer.write_record(["field", "value"]);
    for (field, val) in rows {
        let _ = writer.write_record([field.as_str(), &scalar(val)]);
    }
    let _ = writer.flush();
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
