//! DTOs for the Firestore REST wire format.
//!
//! Firestore wraps every field in a typed value object (`stringValue`,
//! `integerValue`, `mapValue`, ...). The adapter converts between those and
//! plain JSON documents in one pass each way.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value, json};

use crate::domain::ports::Document;

#[derive(Debug, Deserialize)]
pub(super) struct FirestoreDocumentDto {
    #[serde(default)]
    pub(super) name: String,
    #[serde(default)]
    pub(super) fields: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ListDocumentsResponseDto {
    #[serde(default)]
    pub(super) documents: Vec<FirestoreDocumentDto>,
    pub(super) next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RunQueryResponseItemDto {
    pub(super) document: Option<FirestoreDocumentDto>,
}

#[derive(Debug, Serialize)]
pub(super) struct WriteDocumentDto {
    pub(super) fields: Map<String, Value>,
}

impl WriteDocumentDto {
    pub(super) fn from_document(document: &Document) -> Self {
        Self {
            fields: encode_fields(document),
        }
    }
}

impl FirestoreDocumentDto {
    /// Decode the typed fields into a plain document.
    ///
    /// When the stored fields carry no `id`, the last segment of the
    /// document name is used.
    pub(super) fn into_document(self) -> Result<Document, String> {
        let mut document = decode_fields(self.fields)?;
        if !document.contains_key("id") {
            if let Some(id) = self.name.rsplit('/').next().filter(|id| !id.is_empty()) {
                document.insert("id".to_owned(), Value::String(id.to_owned()));
            }
        }
        Ok(document)
    }
}

/// Structured query selecting documents whose `field` equals `value`.
pub(super) fn equality_query(collection: &str, field: &str, value: &Value) -> Value {
    json!({
        "structuredQuery": {
            "from": [{ "collectionId": collection }],
            "where": {
                "fieldFilter": {
                    "field": { "fieldPath": field },
                    "op": "EQUAL",
                    "value": encode_value(value),
                }
            }
        }
    })
}

pub(super) fn encode_fields(document: &Document) -> Map<String, Value> {
    document
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect()
}

pub(super) fn encode_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(flag) => json!({ "booleanValue": flag }),
        Value::Number(number) => match (number.as_i64(), number.as_f64()) {
            (Some(integer), _) => json!({ "integerValue": integer.to_string() }),
            (None, Some(double)) if number.is_f64() => json!({ "doubleValue": double }),
            // u64 beyond i64::MAX; Firestore integers are signed 64-bit.
            _ => json!({ "doubleValue": number }),
        },
        Value::String(text) => json!({ "stringValue": text }),
        Value::Array(items) => json!({
            "arrayValue": { "values": items.iter().map(encode_value).collect::<Vec<_>>() }
        }),
        Value::Object(fields) => json!({ "mapValue": { "fields": encode_fields(fields) } }),
    }
}

pub(super) fn decode_fields(fields: Map<String, Value>) -> Result<Document, String> {
    fields
        .into_iter()
        .map(|(key, value)| {
            decode_value(value)
                .map(|decoded| (key.clone(), decoded))
                .map_err(|error| format!("field {key}: {error}"))
        })
        .collect()
}

pub(super) fn decode_value(value: Value) -> Result<Value, String> {
    let Value::Object(mut typed) = value else {
        return Err("typed value must be an object".to_owned());
    };
    let Some(kind) = typed.keys().next().cloned() else {
        return Err("typed value is empty".to_owned());
    };
    if typed.len() != 1 {
        return Err(format!("typed value has {} kinds", typed.len()));
    }
    let inner = typed.remove(&kind).unwrap_or(Value::Null);

    match kind.as_str() {
        "nullValue" => Ok(Value::Null),
        "booleanValue" => match inner {
            Value::Bool(_) => Ok(inner),
            other => Err(format!("booleanValue must be a bool, got {other}")),
        },
        "integerValue" => decode_integer(inner),
        "doubleValue" => decode_double(inner),
        "stringValue" | "timestampValue" | "referenceValue" | "bytesValue" => match inner {
            Value::String(_) => Ok(inner),
            other => Err(format!("{kind} must be a string, got {other}")),
        },
        "geoPointValue" => Ok(inner),
        "arrayValue" => {
            let values = match inner {
                Value::Object(mut array) => array.remove("values").unwrap_or(Value::Array(vec![])),
                other => return Err(format!("arrayValue must be an object, got {other}")),
            };
            let Value::Array(items) = values else {
                return Err("arrayValue.values must be an array".to_owned());
            };
            items
                .into_iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
        "mapValue" => {
            let fields = match inner {
                Value::Object(mut map) => map.remove("fields").unwrap_or(Value::Object(Map::new())),
                other => return Err(format!("mapValue must be an object, got {other}")),
            };
            let Value::Object(fields) = fields else {
                return Err("mapValue.fields must be an object".to_owned());
            };
            decode_fields(fields).map(Value::Object)
        }
        other => Err(format!("unsupported value kind {other}")),
    }
}

fn decode_integer(inner: Value) -> Result<Value, String> {
    match inner {
        Value::String(text) => text
            .parse::<i64>()
            .map(|integer| Value::Number(integer.into()))
            .map_err(|error| format!("integerValue {text:?} is not an i64: {error}")),
        Value::Number(number) if number.is_i64() || number.is_u64() => Ok(Value::Number(number)),
        other => Err(format!("integerValue must be a string, got {other}")),
    }
}

fn decode_double(inner: Value) -> Result<Value, String> {
    match inner {
        Value::Number(number) => Ok(Value::Number(number)),
        Value::String(text) => text
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| format!("doubleValue {text:?} is not a finite number")),
        other => Err(format!("doubleValue must be a number, got {other}")),
    }
}
