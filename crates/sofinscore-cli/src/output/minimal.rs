use serde_json::Value;

/// One-line answer: the decision with its score for a prediction, the
/// category counts for the charts, otherwise the first result field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);
    println!("{}", minimal_line(result));
}

fn minimal_line(result: &Value) -> String {
    if let Some(decision) = result.get("decision").and_then(Value::as_str) {
        let score = result.get("reliability_score").map(scalar).unwrap_or_default();
        let pct = result
            .get("default_probability_pct")
            .map(scalar)
            .unwrap_or_default();
        return format!("{decision} {score}/100 (p={pct}%)");
    }

    if let Some(volumes) = result.get("decision_volumes").and_then(Value::as_array) {
        return volumes
            .iter()
            .map(|v| {
                format!(
                    "{}={}",
                    v.get("category").map(scalar).unwrap_or_default(),
                    v.get("volume").map(scalar).unwrap_or_default()
                )
            })
            .collect::<Vec<_>>()
            .join(" ");
    }

    match result.as_object().and_then(|m| m.iter().next()) {
        Some((key, val)) => format!("{key}: {}", scalar(val)),
        None => scalar(result),
    }
}

fn scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
