//! Payload sizing
//!
//! Measures a JSON sample by its most compact encoding, which is what the
//! metrics agent actually ships per message.

use serde_json::{Number, Value};
use tracing::debug;

/// Sample reading from an accelerometer/GPS node
pub const DEFAULT_PAYLOAD_SAMPLE: &str = r#"{
  "ts": 946598401852,
  "ax": -0.0293,
  "ay": -0.0132,
  "az": -1.001,
  "lat": 41.55549204890693,
  "lng": -8.412197669159601,
  "sats": 11
}"#;

/// Compact encoding of `text`, or `None` if it is not valid JSON
pub fn compact_payload(text: &str) -> Option<String> {
    encode_compact(text).and_then(|bytes| String::from_utf8(bytes).ok())
}

/// Byte length of the compact UTF-8 encoding of `text`.
///
/// A sample that fails to parse measures as zero so a half-edited document
/// never breaks the calculation.
pub fn measure_payload_bytes(text: &str) -> u64 {
    encode_compact(text)
        .map(|bytes| bytes.len() as u64)
        .unwrap_or(0)
}

fn encode_compact(text: &str) -> Option<Vec<u8>> {
    let mut value = match serde_json::from_str::<Value>(text) {
        Ok(value) => value,
        Err(e) => {
            debug!(error = %e, "Payload sample does not parse");
            return None;
        }
    };

    if let Err(literal) = canonicalize_numbers(&mut value) {
        debug!(literal = %literal, "Payload number has no finite encoding");
        return None;
    }

    serde_json::to_vec(&value).ok()
}

/// Rewrite every number in place to its canonical form.
///
/// Numbers are parsed with `arbitrary_precision`, so each one still holds
/// its literal text. Integer literals are exact at any size and kept as
/// written; other literals become the shortest text of their nearest `f64`.
fn canonicalize_numbers(value: &mut Value) -> Result<(), String> {
    match value {
        Value::Number(n) => *n = canonical_number(n)?,
        Value::Array(items) => {
            for item in items {
                canonicalize_numbers(item)?;
            }
        }
        Value::Object(map) => {
            for (_, item) in map.iter_mut() {
                canonicalize_numbers(item)?;
            }
        }
        _ => {}
    }
    Ok(())
}

fn canonical_number(n: &Number) -> Result<Number, String> {
    let literal = n.to_string();

    if !literal.contains(|c: char| matches!(c, '.' | 'e' | 'E')) {
        // JSON forbids leading zeros, so only negative zero needs rewriting
        return Ok(if literal == "-0" {
            Number::from(0u64)
        } else {
            n.clone()
        });
    }

    literal
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .ok_or(literal)
}
