//! Object projection.
//!
//! Converts a [`MessageInstance`] tree into a plain nested
//! [`serde_json::Value`] for application code that wants a schema-free
//! data tree. The conversion is pure and idempotent: the source instance
//! is never mutated and the output is an independent copy.
//!
//! Shape rules:
//!
//! - scalar fields are always present, defaults filled in;
//! - a message-typed field becomes a nested object, or is absent when the
//!   field was never assigned;
//! - repeated fields are always arrays, present even when empty.

use serde_json::{Map, Number, Value};

use crate::message::{MessageInstance, ScalarValue};
use crate::schema::{FieldKind, ScalarType};

/// Projects a message into a plain nested data tree.
pub fn project(msg: &MessageInstance) -> Value {
    let mut out = Map::new();
    for spec in msg.schema().fields {
        let tag = spec.tag;
        let name = spec.name.to_string();
        match spec.kind {
            FieldKind::Scalar(t) => {
                out.insert(name, scalar_field(msg, tag, t));
            }
            FieldKind::Message(_) => {
                if let Some(child) = msg.get_message(tag) {
                    out.insert(name, project(child));
                }
            }
            FieldKind::RepeatedScalar(_) => {
                let items = msg.repeated_scalars(tag).iter().map(scalar_value).collect();
                out.insert(name, Value::Array(items));
            }
            FieldKind::RepeatedMessage(_) => {
                let items = msg.repeated_messages(tag).iter().map(project).collect();
                out.insert(name, Value::Array(items));
            }
        }
    }
    Value::Object(out)
}

fn scalar_field(msg: &MessageInstance, tag: u32, t: ScalarType) -> Value {
    match t {
        ScalarType::Str => Value::String(msg.get_str(tag).to_owned()),
        ScalarType::Int32 => Value::from(msg.get_i32(tag)),
        ScalarType::Int64 => Value::from(msg.get_i64(tag)),
        ScalarType::Bool => Value::Bool(msg.get_bool(tag)),
        ScalarType::Float => float(msg.get_f32(tag)),
    }
}

fn scalar_value(value: &ScalarValue) -> Value {
    match value {
        ScalarValue::Str(s) => Value::String(s.clone()),
        ScalarValue::Int32(n) => Value::from(*n),
        ScalarValue::Int64(n) => Value::from(*n),
        ScalarValue::Bool(b) => Value::Bool(*b),
        ScalarValue::Float(f) => float(*f),
    }
}

fn float(f: f32) -> Value {
    // JSON has no NaN/Infinity; those project as null.
    Number::from_f64(f as f64).map(Value::Number).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schemas::{DNS_RECORD, DOMAIN_REPORT, SCAN_RESULT, TIMESTAMP};
    use serde_json::json;

    #[test]
    fn defaults_are_filled_in() {
        let msg = MessageInstance::new(&DOMAIN_REPORT);
        assert_eq!(
            project(&msg),
            json!({
                "domain": "",
                "score": 0,
            })
        );
    }

    #[test]
    fn absent_message_field_is_omitted_present_is_nested() {
        let mut msg = MessageInstance::new(&DOMAIN_REPORT);
        msg.set_str(1, "example.com");
        msg.set_i32(2, 87);
        let tree = project(&msg);
        assert!(tree.get("created_at").is_none());

        let mut ts = MessageInstance::new(&TIMESTAMP);
        ts.set_i64(1, 1000);
        msg.set_message(5, ts);
        assert_eq!(
            project(&msg),
            json!({
                "domain": "example.com",
                "score": 87,
                "created_at": {"seconds": 1000, "nanos": 0},
            })
        );
    }

    #[test]
    fn repeated_fields_are_arrays_even_when_empty() {
        let msg = MessageInstance::new(&SCAN_RESULT);
        let tree = project(&msg);
        assert_eq!(tree["tags"], json!([]));
        assert_eq!(tree["records"], json!([]));
    }

    #[test]
    fn repeated_message_projection_keeps_order() {
        let mut msg = MessageInstance::new(&SCAN_RESULT);
        for value in ["first", "second"] {
            let mut rec = MessageInstance::new(&DNS_RECORD);
            rec.set_str(2, value);
            msg.add_message(7, rec);
        }
        let tree = project(&msg);
        assert_eq!(tree["records"][0]["value"], "first");
        assert_eq!(tree["records"][1]["value"], "second");
    }

    #[test]
    fn key_order_follows_schema_order() {
        let mut msg = MessageInstance::new(&DOMAIN_REPORT);
        msg.set_i32(2, 1);
        msg.set_str(1, "x");
        let tree = project(&msg);
        let keys: Vec<&String> = tree.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["domain", "score"]);
    }

    #[test]
    fn idempotent_and_source_preserving() {
        let mut msg = MessageInstance::new(&SCAN_RESULT);
        msg.set_str(1, "h");
        msg.add_str(6, "t");
        let before = msg.clone();
        let a = project(&msg);
        let b = project(&msg);
        assert_eq!(a, b);
        assert_eq!(msg, before);
    }

    #[test]
    fn projection_is_an_independent_copy() {
        let mut msg = MessageInstance::new(&SCAN_RESULT);
        msg.set_str(1, "before");
        let tree = project(&msg);
        msg.set_str(1, "after");
        assert_eq!(tree["host"], "before");
    }

    #[test]
    fn non_finite_float_projects_as_null() {
        let mut msg = MessageInstance::new(&SCAN_RESULT);
        msg.set_f32(4, f32::NAN);
        assert_eq!(project(&msg)["latency_ms"], Value::Null);
    }
}
