//! Decoders tolerant of the shapes the tabular export layer emits
//! (integers as floats or strings, `null` counters, `NaN` placeholders).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f as i64)),
        Value::String(raw) => raw.trim().parse::<i64>().ok(),
        _ => None,
    }
}

pub(crate) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(value_as_i64)
        .map(|n| n.clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0))
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(flag)) => flag,
        Some(Value::Number(number)) => number.as_i64().map(|n| n != 0).unwrap_or(false),
        Some(Value::String(raw)) => raw.eq_ignore_ascii_case("true"),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "super::opt_i64")]
        page: Option<i64>,
        #[serde(default, deserialize_with = "super::count")]
        models: u32,
        #[serde(default, deserialize_with = "super::flag")]
        ok: bool,
    }

    #[test]
    fn accepts_floats_strings_and_nulls() {
        let row: Row = serde_json::from_str(r#"{"page": 3.0, "models": null, "ok": "true"}"#)
            .expect("decode");
        assert_eq!(row.page, Some(3));
        assert_eq!(row.models, 0);
        assert!(row.ok);

        let row: Row = serde_json::from_str(r#"{"page": "12", "models": 4}"#).expect("decode");
        assert_eq!(row.page, Some(12));
        assert_eq!(row.models, 4);
        assert!(!row.ok);
    }
}
