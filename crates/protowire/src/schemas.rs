//! Representative message schemas.
//!
//! The full schema set of the backend API is mechanically generated, one
//! table per message type; these tables are the hand-maintained
//! representatives used across the test suite, covering every field kind
//! the codec speaks.

use crate::schema::{FieldKind, FieldSpec, ScalarType, Schema};

/// Wall-clock instant, split like `google.protobuf.Timestamp`.
pub static TIMESTAMP: Schema = Schema {
    name: "Timestamp",
    fields: &[
        FieldSpec {
            tag: 1,
            name: "seconds",
            kind: FieldKind::Scalar(ScalarType::Int64),
        },
        FieldSpec {
            tag: 2,
            name: "nanos",
            kind: FieldKind::Scalar(ScalarType::Int32),
        },
    ],
};

/// One resolved DNS record of a scanned host.
pub static DNS_RECORD: Schema = Schema {
    name: "DnsRecord",
    fields: &[
        FieldSpec {
            tag: 1,
            name: "record_type",
            kind: FieldKind::Scalar(ScalarType::Str),
        },
        FieldSpec {
            tag: 2,
            name: "value",
            kind: FieldKind::Scalar(ScalarType::Str),
        },
        FieldSpec {
            tag: 3,
            name: "ttl",
            kind: FieldKind::Scalar(ScalarType::Int32),
        },
    ],
};

/// Per-domain reputation summary.
pub static DOMAIN_REPORT: Schema = Schema {
    name: "DomainReport",
    fields: &[
        FieldSpec {
            tag: 1,
            name: "domain",
            kind: FieldKind::Scalar(ScalarType::Str),
        },
        FieldSpec {
            tag: 2,
            name: "score",
            kind: FieldKind::Scalar(ScalarType::Int32),
        },
        FieldSpec {
            tag: 5,
            name: "created_at",
            kind: FieldKind::Message(&TIMESTAMP),
        },
    ],
};

/// Full scan result; exercises every field kind.
pub static SCAN_RESULT: Schema = Schema {
    name: "ScanResult",
    fields: &[
        FieldSpec {
            tag: 1,
            name: "host",
            kind: FieldKind::Scalar(ScalarType::Str),
        },
        FieldSpec {
            tag: 2,
            name: "port",
            kind: FieldKind::Scalar(ScalarType::Int32),
        },
        FieldSpec {
            tag: 3,
            name: "secure",
            kind: FieldKind::Scalar(ScalarType::Bool),
        },
        FieldSpec {
            tag: 4,
            name: "latency_ms",
            kind: FieldKind::Scalar(ScalarType::Float),
        },
        FieldSpec {
            tag: 5,
            name: "scanned_at",
            kind: FieldKind::Message(&TIMESTAMP),
        },
        FieldSpec {
            tag: 6,
            name: "tags",
            kind: FieldKind::RepeatedScalar(ScalarType::Str),
        },
        FieldSpec {
            tag: 7,
            name: "records",
            kind: FieldKind::RepeatedMessage(&DNS_RECORD),
        },
        FieldSpec {
            tag: 8,
            name: "bytes_scanned",
            kind: FieldKind::Scalar(ScalarType::Int64),
        },
    ],
};
