//! Message instances: sparse field-value containers built against a schema.
//!
//! Field semantics follow proto3:
//!
//! - A scalar equal to its zero default is the same state as "never set";
//!   the setter normalizes zero values away so the container has a single
//!   representation for both, matching what the wire can express.
//! - Message-typed fields track presence: assigned is observable via
//!   [`MessageInstance::has`] even when the child carries only defaults.
//! - Repeated fields are never null; absence is the empty sequence.
//!
//! Assigning a value of the wrong declared kind, or addressing a tag the
//! schema does not declare, is a programmer error and panics.

use std::collections::BTreeMap;

use crate::schema::{FieldKind, FieldSpec, ScalarType, Schema};

/// A single scalar field value.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    Str(String),
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Float(f32),
}

impl ScalarValue {
    /// The declared type this value satisfies.
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            ScalarValue::Str(_) => ScalarType::Str,
            ScalarValue::Int32(_) => ScalarType::Int32,
            ScalarValue::Int64(_) => ScalarType::Int64,
            ScalarValue::Bool(_) => ScalarType::Bool,
            ScalarValue::Float(_) => ScalarType::Float,
        }
    }

    /// The proto3 zero default for a scalar type.
    pub fn default_of(scalar_type: ScalarType) -> ScalarValue {
        match scalar_type {
            ScalarType::Str => ScalarValue::Str(String::new()),
            ScalarType::Int32 => ScalarValue::Int32(0),
            ScalarType::Int64 => ScalarValue::Int64(0),
            ScalarType::Bool => ScalarValue::Bool(false),
            ScalarType::Float => ScalarValue::Float(0.0),
        }
    }

    /// True when the value equals its type's zero default.
    pub fn is_default(&self) -> bool {
        match self {
            ScalarValue::Str(s) => s.is_empty(),
            ScalarValue::Int32(n) => *n == 0,
            ScalarValue::Int64(n) => *n == 0,
            ScalarValue::Bool(b) => !b,
            ScalarValue::Float(f) => *f == 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum FieldValue {
    Scalar(ScalarValue),
    Message(MessageInstance),
    RepeatedScalar(Vec<ScalarValue>),
    RepeatedMessage(Vec<MessageInstance>),
}

/// A sparse tag→value container built against a [`Schema`].
///
/// Created empty (all defaults) or hydrated by the decoder; consumed
/// read-only by the encoder and the object projection. Ownership is
/// tree-shaped: every child message belongs to exactly one parent slot.
#[derive(Debug, Clone)]
pub struct MessageInstance {
    schema: &'static Schema,
    fields: BTreeMap<u32, FieldValue>,
}

impl PartialEq for MessageInstance {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.schema, other.schema) && self.fields == other.fields
    }
}

impl MessageInstance {
    /// Creates an empty instance; every field reads as its default.
    pub fn new(schema: &'static Schema) -> Self {
        Self {
            schema,
            fields: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &'static Schema {
        self.schema
    }

    /// True when no field is set (the instance serializes to zero bytes).
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn spec(&self, tag: u32) -> &'static FieldSpec {
        self.schema.field(tag).unwrap_or_else(|| {
            panic!("schema {} has no field with tag {tag}", self.schema.name)
        })
    }

    fn kind_mismatch(&self, tag: u32, wanted: &str) -> ! {
        let spec = self.spec(tag);
        panic!(
            "field {}.{} (tag {tag}) is {:?}, not {wanted}",
            self.schema.name, spec.name, spec.kind
        )
    }

    // ---------------------------------------------------------------- scalars

    /// Sets a singular scalar field. A zero-default value resets the field
    /// to unset; the two states are indistinguishable on the wire.
    pub fn set_scalar(&mut self, tag: u32, value: ScalarValue) {
        let spec = self.spec(tag);
        match spec.kind {
            FieldKind::Scalar(t) if t == value.scalar_type() => {
                if value.is_default() {
                    self.fields.remove(&tag);
                } else {
                    self.fields.insert(tag, FieldValue::Scalar(value));
                }
            }
            _ => self.kind_mismatch(tag, "a scalar of the assigned type"),
        }
    }

    fn scalar(&self, tag: u32, scalar_type: ScalarType) -> Option<&ScalarValue> {
        match self.spec(tag).kind {
            FieldKind::Scalar(t) if t == scalar_type => match self.fields.get(&tag) {
                Some(FieldValue::Scalar(v)) => Some(v),
                _ => None,
            },
            _ => self.kind_mismatch(tag, "a singular scalar"),
        }
    }

    pub fn get_str(&self, tag: u32) -> &str {
        match self.scalar(tag, ScalarType::Str) {
            Some(ScalarValue::Str(s)) => s,
            _ => "",
        }
    }

    pub fn get_i32(&self, tag: u32) -> i32 {
        match self.scalar(tag, ScalarType::Int32) {
            Some(ScalarValue::Int32(n)) => *n,
            _ => 0,
        }
    }

    pub fn get_i64(&self, tag: u32) -> i64 {
        match self.scalar(tag, ScalarType::Int64) {
            Some(ScalarValue::Int64(n)) => *n,
            _ => 0,
        }
    }

    pub fn get_bool(&self, tag: u32) -> bool {
        matches!(self.scalar(tag, ScalarType::Bool), Some(ScalarValue::Bool(true)))
    }

    pub fn get_f32(&self, tag: u32) -> f32 {
        match self.scalar(tag, ScalarType::Float) {
            Some(ScalarValue::Float(f)) => *f,
            _ => 0.0,
        }
    }

    pub fn set_str(&mut self, tag: u32, value: impl Into<String>) {
        self.set_scalar(tag, ScalarValue::Str(value.into()));
    }

    pub fn set_i32(&mut self, tag: u32, value: i32) {
        self.set_scalar(tag, ScalarValue::Int32(value));
    }

    pub fn set_i64(&mut self, tag: u32, value: i64) {
        self.set_scalar(tag, ScalarValue::Int64(value));
    }

    pub fn set_bool(&mut self, tag: u32, value: bool) {
        self.set_scalar(tag, ScalarValue::Bool(value));
    }

    pub fn set_f32(&mut self, tag: u32, value: f32) {
        self.set_scalar(tag, ScalarValue::Float(value));
    }

    // ---------------------------------------------------------------- messages

    /// Assigns a message-typed field. Presence is observable afterwards
    /// even when `child` is empty.
    pub fn set_message(&mut self, tag: u32, child: MessageInstance) {
        match self.spec(tag).kind {
            FieldKind::Message(sub) if sub.same_as(child.schema) => {
                self.fields.insert(tag, FieldValue::Message(child));
            }
            _ => self.kind_mismatch(tag, "a message of the assigned schema"),
        }
    }

    /// Whether a message-typed field was assigned. Presence is tracked for
    /// message-typed fields only; asking for any other kind panics.
    pub fn has(&self, tag: u32) -> bool {
        match self.spec(tag).kind {
            FieldKind::Message(_) => self.fields.contains_key(&tag),
            _ => self.kind_mismatch(tag, "a message-typed field (presence)"),
        }
    }

    pub fn get_message(&self, tag: u32) -> Option<&MessageInstance> {
        match self.spec(tag).kind {
            FieldKind::Message(_) => match self.fields.get(&tag) {
                Some(FieldValue::Message(m)) => Some(m),
                _ => None,
            },
            _ => self.kind_mismatch(tag, "a message-typed field"),
        }
    }

    /// Resets any field to its unset state: default for scalars, absent
    /// for message-typed fields, empty for repeated fields.
    pub fn clear(&mut self, tag: u32) {
        self.spec(tag);
        self.fields.remove(&tag);
    }

    // ---------------------------------------------------------------- repeated

    fn repeated_scalar_vec(&mut self, tag: u32, value_type: ScalarType) -> &mut Vec<ScalarValue> {
        match self.spec(tag).kind {
            FieldKind::RepeatedScalar(t) if t == value_type => {
                let entry = self
                    .fields
                    .entry(tag)
                    .or_insert_with(|| FieldValue::RepeatedScalar(Vec::new()));
                match entry {
                    FieldValue::RepeatedScalar(v) => v,
                    _ => unreachable!("repeated scalar slot holds non-repeated value"),
                }
            }
            _ => self.kind_mismatch(tag, "a repeated scalar of the assigned type"),
        }
    }

    /// Appends to a repeated scalar field.
    pub fn add_scalar(&mut self, tag: u32, value: ScalarValue) {
        let t = value.scalar_type();
        self.repeated_scalar_vec(tag, t).push(value);
    }

    /// Inserts into a repeated scalar field at `index` (order is
    /// wire-significant).
    pub fn insert_scalar(&mut self, tag: u32, index: usize, value: ScalarValue) {
        let t = value.scalar_type();
        self.repeated_scalar_vec(tag, t).insert(index, value);
    }

    pub fn add_str(&mut self, tag: u32, value: impl Into<String>) {
        self.add_scalar(tag, ScalarValue::Str(value.into()));
    }

    /// Replaces a repeated scalar field wholesale. An empty sequence
    /// resets the field to its absent state.
    pub fn set_repeated_scalars(&mut self, tag: u32, values: Vec<ScalarValue>) {
        match self.spec(tag).kind {
            FieldKind::RepeatedScalar(t) => {
                if values.iter().any(|v| v.scalar_type() != t) {
                    self.kind_mismatch(tag, "elements of the declared scalar type");
                }
                if values.is_empty() {
                    self.fields.remove(&tag);
                } else {
                    self.fields.insert(tag, FieldValue::RepeatedScalar(values));
                }
            }
            _ => self.kind_mismatch(tag, "a repeated scalar field"),
        }
    }

    pub fn repeated_scalars(&self, tag: u32) -> &[ScalarValue] {
        match self.spec(tag).kind {
            FieldKind::RepeatedScalar(_) => match self.fields.get(&tag) {
                Some(FieldValue::RepeatedScalar(v)) => v,
                _ => &[],
            },
            _ => self.kind_mismatch(tag, "a repeated scalar field"),
        }
    }

    fn repeated_message_vec(&mut self, tag: u32, child: &MessageInstance) -> &mut Vec<MessageInstance> {
        match self.spec(tag).kind {
            FieldKind::RepeatedMessage(sub) if sub.same_as(child.schema) => {
                let entry = self
                    .fields
                    .entry(tag)
                    .or_insert_with(|| FieldValue::RepeatedMessage(Vec::new()));
                match entry {
                    FieldValue::RepeatedMessage(v) => v,
                    _ => unreachable!("repeated message slot holds non-repeated value"),
                }
            }
            _ => self.kind_mismatch(tag, "a repeated message of the declared schema"),
        }
    }

    /// Appends to a repeated message field.
    pub fn add_message(&mut self, tag: u32, child: MessageInstance) {
        self.repeated_message_vec(tag, &child).push(child);
    }

    /// Inserts into a repeated message field at `index`.
    pub fn insert_message(&mut self, tag: u32, index: usize, child: MessageInstance) {
        self.repeated_message_vec(tag, &child).insert(index, child);
    }

    /// Replaces a repeated message field wholesale.
    pub fn set_repeated_messages(&mut self, tag: u32, values: Vec<MessageInstance>) {
        match self.spec(tag).kind {
            FieldKind::RepeatedMessage(sub) => {
                if values.iter().any(|m| !sub.same_as(m.schema)) {
                    self.kind_mismatch(tag, "elements of the declared schema");
                }
                if values.is_empty() {
                    self.fields.remove(&tag);
                } else {
                    self.fields.insert(tag, FieldValue::RepeatedMessage(values));
                }
            }
            _ => self.kind_mismatch(tag, "a repeated message field"),
        }
    }

    pub fn repeated_messages(&self, tag: u32) -> &[MessageInstance] {
        match self.spec(tag).kind {
            FieldKind::RepeatedMessage(_) => match self.fields.get(&tag) {
                Some(FieldValue::RepeatedMessage(v)) => v,
                _ => &[],
            },
            _ => self.kind_mismatch(tag, "a repeated message field"),
        }
    }
}
