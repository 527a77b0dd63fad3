//! DTOs for decoding Firestore REST documents.
//!
//! Firestore wraps every field in a typed value (`stringValue`,
//! `integerValue`, ...). Documents are unwrapped into plain JSON first and
//! then decoded with the same DTOs the REST adapter uses.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::{Map, Value};

use crate::domain::ports::OwnerProfile;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) enum FieldValueDto {
    NullValue(IgnoredAny),
    BooleanValue(bool),
    IntegerValue(String),
    DoubleValue(Value),
    TimestampValue(String),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(Value),
    MapValue(MapValueDto),
    ArrayValue(ArrayValueDto),
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct MapValueDto {
    #[serde(default)]
    fields: BTreeMap<String, FieldValueDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ArrayValueDto {
    #[serde(default)]
    values: Vec<FieldValueDto>,
}

impl FieldValueDto {
    pub(super) fn into_json(self) -> Value {
        match self {
            Self::NullValue(_) => Value::Null,
            Self::BooleanValue(flag) => Value::Bool(flag),
            Self::IntegerValue(text) => text
                .parse::<i64>()
                .map_or(Value::String(text), Value::from),
            Self::DoubleValue(number) | Self::GeoPointValue(number) => number,
            Self::TimestampValue(text)
            | Self::StringValue(text)
            | Self::BytesValue(text)
            | Self::ReferenceValue(text) => Value::String(text),
            Self::MapValue(map) => Value::Object(fields_into_json(map.fields)),
            Self::ArrayValue(array) => Value::Array(
                array
                    .values
                    .into_iter()
                    .map(FieldValueDto::into_json)
                    .collect(),
            ),
        }
    }
}

fn fields_into_json(fields: BTreeMap<String, FieldValueDto>) -> Map<String, Value> {
    fields
        .into_iter()
        .map(|(key, value)| (key, value.into_json()))
        .collect()
}

#[derive(Debug, Deserialize)]
pub(super) struct DocumentDto {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, FieldValueDto>,
}

impl DocumentDto {
    /// Document id: the last segment of the resource name.
    pub(super) fn id(&self) -> &str {
        self.name.rsplit('/').next().unwrap_or_default()
    }

    /// Unwrap typed fields into a plain JSON object.
    pub(super) fn into_json(self) -> Map<String, Value> {
        fields_into_json(self.fields)
    }

    /// Read an operator profile out of a `users/{uid}` document.
    pub(super) fn into_owner_profile(self) -> OwnerProfile {
        let fields = self.into_json();
        let text = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| fields.get(*key))
                .find_map(|value| match value {
                    Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
                    Value::Number(number) => Some(number.to_string()),
                    _ => None,
                })
        };
        OwnerProfile {
            service_center_id: text(&["id"]),
            display_name: text(&["displayName", "name"]),
        }
    }
}

/// One element of a `runQuery` response stream.
#[derive(Debug, Deserialize)]
pub(super) struct RunQueryItemDto {
    #[serde(default)]
    pub(super) document: Option<DocumentDto>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    fn document(json: &str) -> DocumentDto {
        serde_json::from_str(json).expect("document should decode")
    }

    #[test]
    fn typed_fields_unwrap_to_plain_json() {
        let doc = document(
            r#"{
                "name": "projects/servio/databases/(default)/documents/servicereservations/abc123",
                "fields": {
                    "customer": { "stringValue": "John Doe" },
                    "cost": { "doubleValue": 49.99 },
                    "quantity": { "integerValue": "3" },
                    "paid": { "booleanValue": true },
                    "notes": { "nullValue": null },
                    "serviceDate": { "timestampValue": "2024-05-20T09:30:00Z" },
                    "vehicle": { "mapValue": { "fields": { "make": { "stringValue": "Honda" } } } },
                    "tags": { "arrayValue": { "values": [{ "stringValue": "urgent" }] } },
                    "empty": { "arrayValue": {} }
                },
                "createTime": "2024-05-01T00:00:00Z"
            }"#,
        );

        assert_eq!(doc.id(), "abc123");
        assert_eq!(
            Value::Object(doc.into_json()),
            json!({
                "customer": "John Doe",
                "cost": 49.99,
                "quantity": 3,
                "paid": true,
                "notes": null,
                "serviceDate": "2024-05-20T09:30:00Z",
                "vehicle": { "make": "Honda" },
                "tags": ["urgent"],
                "empty": []
            })
        );
    }

    #[test]
    fn owner_profiles_read_the_center_from_the_id_field() {
        let doc = document(
            r#"{
                "name": "projects/p/databases/(default)/documents/users/uid-1",
                "fields": {
                    "id": { "stringValue": "center-from-id" },
                    "serviceCenterId": { "stringValue": "other" },
                    "name": { "stringValue": "Quick Fix" }
                }
            }"#,
        );

        let profile = doc.into_owner_profile();
        assert_eq!(profile.service_center_id.as_deref(), Some("center-from-id"));
        assert_eq!(profile.display_name.as_deref(), Some("Quick Fix"));
    }

    #[test]
    fn owner_profiles_ignore_a_lone_service_center_field() {
        let profile = document(
            r#"{
                "name": "projects/p/databases/(default)/documents/users/uid-1",
                "fields": { "serviceCenterId": { "stringValue": "other" } }
            }"#,
        )
        .into_owner_profile();
        assert_eq!(profile.service_center_id, None);
    }

    #[test]
    fn owner_profiles_tolerate_missing_fields() {
        let profile = document(r#"{"name": "projects/p/databases/(default)/documents/users/u"}"#)
            .into_owner_profile();
        assert_eq!(
            profile,
            OwnerProfile {
                service_center_id: None,
                display_name: None,
            }
        );
    }

    #[test]
    fn query_items_without_documents_are_allowed() {
        let items: Vec<RunQueryItemDto> =
            serde_json::from_str(r#"[{"readTime": "2024-05-01T00:00:00Z"}]"#).expect("decode");
        assert!(items[0].document.is_none());
    }
}
