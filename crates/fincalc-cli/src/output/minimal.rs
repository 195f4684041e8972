use serde_json::Value;

/// The headline fields, in the order a quick caller wants them: profit of a
/// bond order, the solved CAPM variable, a located filing's URL.
const PRIORITY_KEYS: [&str; 6] = [
    "profit",
    "value",
    "document_url",
    "value_per_bond",
    "order_value",
    "pv_coupons",
];

/// Print just the answer figure, nothing else.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|envelope| envelope.get("result"))
        .unwrap_or(value);

    let Some(fields) = result.as_object() else {
        println!("{}", scalar(result));
        return;
    };

    for key in PRIORITY_KEYS {
        if let Some(val) = fields.get(key) {
            if !val.is_null() {
                println!("{}", scalar(val));
                return;
            }
        }
    }

    if let Some((field, val)) = fields.iter().next() {
        println!("{field}: {}", scalar(val));
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
