//! Declarative payload schemas and their interpreter.
//!
//! Outbound payloads are validated against a constraint tree before they are
//! served. The schemas are the single source of truth for payload shape;
//! the serde structs in the route modules must serialize into something
//! these accept, and the tests hold them to that.

use chrono::DateTime;
use once_cell::sync::Lazy;
use serde_json::Value;
use util::failure::Failure;

/// Identifies a declared schema in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaId {
    SystemInfo,
    WeatherInfo,
    ApiError,
}

/// An object schema: a list of named, constrained fields.
#[derive(Debug)]
pub struct Schema {
    pub fields: Vec<Field>,
}

#[derive(Debug)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldKind,
}

/// Constraint set for a single field.
#[derive(Debug)]
pub enum FieldKind {
    Number {
        minimum: Option<f64>,
        maximum: Option<f64>,
        integer: bool,
    },
    String {
        /// Fixed allowed set, when the field is an enum.
        allowed: Option<&'static [&'static str]>,
        format: Option<Format>,
    },
    Boolean {
        /// Pins the field to a single literal value.
        pinned: Option<bool>,
    },
    Object(Schema),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    DateTime,
}

/// One failed constraint: where, what was expected, what was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(Vec<Violation>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }
}

impl Field {
    fn number(name: &'static str, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        Field {
            name,
            required: true,
            kind: FieldKind::Number {
                minimum,
                maximum,
                integer: false,
            },
        }
    }

    fn integer(name: &'static str, minimum: Option<f64>) -> Self {
        Field {
            name,
            required: true,
            kind: FieldKind::Number {
                minimum,
                maximum: None,
                integer: true,
            },
        }
    }

    fn string(name: &'static str) -> Self {
        Field {
            name,
            required: true,
            kind: FieldKind::String {
                allowed: None,
                format: None,
            },
        }
    }

    fn object(name: &'static str, schema: Schema) -> Self {
        Field {
            name,
            required: true,
            kind: FieldKind::Object(schema),
        }
    }

    fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

fn usage_block() -> Schema {
    Schema {
        fields: vec![
            Field::number("total", Some(0.0), None),
            Field::number("used", Some(0.0), None),
            Field::number("percentage", Some(0.0), Some(100.0)),
        ],
    }
}

static SYSTEM_INFO: Lazy<Schema> = Lazy::new(|| Schema {
    fields: vec![
        Field::object(
            "cpu",
            Schema {
                fields: vec![
                    Field::number("usage", Some(0.0), Some(100.0)),
                    Field::integer("cores", Some(1.0)),
                ],
            },
        ),
        Field::object("memory", usage_block()),
        Field::object("disk", usage_block()),
        Field::number("uptime", Some(0.0), None),
    ],
});

static WEATHER_INFO: Lazy<Schema> = Lazy::new(|| Schema {
    fields: vec![
        Field::number("temperature", None, None),
        Field::string("condition"),
        Field {
            name: "weatherType",
            required: true,
            kind: FieldKind::String {
                allowed: Some(&["sunny", "cloudy", "rainy", "snowy", "unknown"]),
                format: None,
            },
        },
        Field::number("humidity", Some(0.0), Some(100.0)),
        Field {
            name: "lastUpdated",
            required: true,
            kind: FieldKind::String {
                allowed: None,
                format: Some(Format::DateTime),
            },
        },
    ],
});

static API_ERROR: Lazy<Schema> = Lazy::new(|| Schema {
    fields: vec![
        Field {
            name: "success",
            required: true,
            kind: FieldKind::Boolean {
                pinned: Some(false),
            },
        },
        Field::object(
            "error",
            Schema {
                fields: vec![Field::string("message"), Field::string("code").optional()],
            },
        ),
        Field {
            name: "timestamp",
            required: true,
            kind: FieldKind::String {
                allowed: None,
                format: Some(Format::DateTime),
            },
        },
    ],
});

/// Looks up a declared schema.
pub fn schema(id: SchemaId) -> &'static Schema {
    match id {
        SchemaId::SystemInfo => &SYSTEM_INFO,
        SchemaId::WeatherInfo => &WEATHER_INFO,
        SchemaId::ApiError => &API_ERROR,
    }
}

/// Validates a value against a schema. Pure; collects every violation
/// rather than stopping at the first.
pub fn validate(schema: &Schema, value: &Value) -> ValidationResult {
    let mut violations = Vec::new();
    check_object(schema, value, "", &mut violations);
    if violations.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(violations)
    }
}

/// Validates an outbound payload; a violation is a payload-construction bug
/// and is surfaced as an internal failure, never served.
pub fn ensure_valid(id: SchemaId, value: &Value) -> Result<(), Failure> {
    match validate(schema(id), value) {
        ValidationResult::Valid => Ok(()),
        ValidationResult::Invalid(violations) => {
            let detail = violations
                .iter()
                .map(|v| format!("{}: expected {}, got {}", v.path, v.expected, v.actual))
                .collect::<Vec<_>>()
                .join("; ");
            tracing::error!(schema = ?id, "Outbound payload failed validation: {detail}");
            Err(Failure::Runtime(format!(
                "outbound payload failed validation ({detail})"
            )))
        }
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}

fn type_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn check_object(schema: &Schema, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let Some(map) = value.as_object() else {
        out.push(Violation {
            path: if path.is_empty() { "(root)".into() } else { path.into() },
            expected: "object".into(),
            actual: type_of(value).into(),
        });
        return;
    };

    for field in &schema.fields {
        let field_path = join_path(path, field.name);
        match map.get(field.name) {
            None => {
                if field.required {
                    out.push(Violation {
                        path: field_path,
                        expected: "required field".into(),
                        actual: "missing".into(),
                    });
                }
            }
            Some(v) => check_field(&field.kind, v, &field_path, out),
        }
    }
}

fn check_field(kind: &FieldKind, value: &Value, path: &str, out: &mut Vec<Violation>) {
    match kind {
        FieldKind::Number {
            minimum,
            maximum,
            integer,
        } => {
            let Some(n) = value.as_f64() else {
                out.push(Violation {
                    path: path.into(),
                    expected: "number".into(),
                    actual: type_of(value).into(),
                });
                return;
            };
            if *integer && n.fract() != 0.0 {
                out.push(Violation {
                    path: path.into(),
                    expected: "integer".into(),
                    actual: n.to_string(),
                });
            }
            if let Some(min) = minimum {
                if n < *min {
                    out.push(Violation {
                        path: path.into(),
                        expected: format!("minimum {min}"),
                        actual: n.to_string(),
                    });
                }
            }
            if let Some(max) = maximum {
                if n > *max {
                    out.push(Violation {
                        path: path.into(),
                        expected: format!("maximum {max}"),
                        actual: n.to_string(),
                    });
                }
            }
        }
        FieldKind::String { allowed, format } => {
            let Some(s) = value.as_str() else {
                out.push(Violation {
                    path: path.into(),
                    expected: "string".into(),
                    actual: type_of(value).into(),
                });
                return;
            };
            if let Some(allowed) = allowed {
                if !allowed.contains(&s) {
                    out.push(Violation {
                        path: path.into(),
                        expected: format!("one of {allowed:?}"),
                        actual: s.into(),
                    });
                }
            }
            if let Some(Format::DateTime) = format {
                if DateTime::parse_from_rfc3339(s).is_err() {
                    out.push(Violation {
                        path: path.into(),
                        expected: "date-time".into(),
                        actual: s.into(),
                    });
                }
            }
        }
        FieldKind::Boolean { pinned } => {
            let Some(b) = value.as_bool() else {
                out.push(Violation {
                    path: path.into(),
                    expected: "boolean".into(),
                    actual: type_of(value).into(),
                });
                return;
            };
            if let Some(pinned) = pinned {
                if b != *pinned {
                    out.push(Violation {
                        path: path.into(),
                        expected: format!("const {pinned}"),
                        actual: b.to_string(),
                    });
                }
            }
        }
        FieldKind::Object(inner) => check_object(inner, value, path, out),
    }
}
