use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Two-column field/value table.
///
/// Calculator commands return a computation envelope; its `result` object
/// becomes the table body, with warnings and the methodology line printed
/// underneath so a valuation quirk is never buried. The filing lookup
/// returns a bare object, which is tabled directly.
pub fn print_table(value: &Value) {
    let Some(map) = value.as_object() else {
        println!("{value}");
        return;
    };

    match map.get("result") {
        Some(Value::Object(result)) => {
            println!("{}", field_table(result));
            print_warnings(map);
            if let Some(Value::String(methodology)) = map.get("methodology") {
                println!("\nMethodology: {methodology}");
            }
        }
        _ => println!("{}", field_table(map)),
    }
}

fn field_table(fields: &serde_json::Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (field, val) in fields {
        builder.push_record([field.as_str(), &cell(val)]);
    }
    Table::from(builder)
}

fn print_warnings(envelope: &serde_json::Map<String, Value>) {
    let Some(Value::Array(warnings)) = envelope.get("warnings") else {
        return;
    };
    if warnings.is_empty() {
        return;
    }
    println!("\nWarnings:");
    for warning in warnings {
        if let Value::String(text) = warning {
            println!("  - {text}");
        }
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(cell).collect::<Vec<_>>().join(", "),
        other => other.to_string(),
    }
}
