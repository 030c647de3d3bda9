//! Accident log records as Procore returns them, and what we return.

use serde::{Deserialize, Deserializer, Serialize};

/// An accident log from
/// `GET /rest/v1.0/projects/{project_id}/accident_logs`.
///
/// Procore omits fields and sends `null` freely, so every field falls back to
/// its empty value.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct AccidentLog {
    /// Accident log ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,

    /// Free text entered by whoever reported the accident.
    #[serde(deserialize_with = "null_as_default")]
    pub comments: String,

    /// The date of the accident (`YYYY-MM-DD`).
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,

    /// When the log was created.
    #[serde(deserialize_with = "null_as_default")]
    pub created_at: String,

    /// Who created the log.
    #[serde(deserialize_with = "null_as_default")]
    pub created_by: Creator,

    /// Workflow status of the log.
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,

    /// Attachment references. Passed through untouched.
    #[serde(deserialize_with = "null_as_default")]
    pub attachments: Vec<serde_json::Value>,

    /// Project specific custom fields. Never interpreted.
    pub custom_fields: serde_json::Value,
}

/// The user that created an [`AccidentLog`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Creator {
    /// User ID.
    #[serde(deserialize_with = "null_as_default")]
    pub id: i64,

    /// Login (usually an email address).
    #[serde(deserialize_with = "null_as_default")]
    pub login: String,

    /// Display name.
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
}

/// An entry in the response from `/accidents`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct AccidentTypeResult {
    /// ID of the accident log this came from.
    pub accident_log_id: i64,

    /// The value of the `[Type: …]` tag in the comments.
    pub accident_type: String,

    /// The date of the accident.
    pub date: String,

    /// Display name of the user that reported the accident.
    pub reported_by: String,

    /// The full comments, including the tag.
    pub comments: String,
}

/// Deserialize `null` as `T::default()`.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::assert;
    use serde_json::json;

    #[test]
    fn decode_full_record() {
        let log: AccidentLog = serde_json::from_value(json!({
            "id": 7,
            "comments": "Ladder slipped [Type: Fall]",
            "date": "2024-02-14",
            "created_at": "2024-02-14T16:20:00Z",
            "created_by": {"id": 3, "login": "pat@example.com", "name": "Pat"},
            "status": "open",
            "attachments": [],
            "custom_fields": {"custom_field_12": {"value": "North lot"}},
            "weather_conditions": "sunny",
        }))
        .unwrap();

        assert!(log.id == 7);
        assert!(log.created_by.name == "Pat");
        assert!(log.custom_fields["custom_field_12"]["value"] == "North lot");
    }

    #[test]
    fn decode_nulls_and_missing_fields() {
        let log: AccidentLog = serde_json::from_value(json!({
            "id": 8,
            "comments": null,
            "created_by": null,
            "attachments": null,
        }))
        .unwrap();

        assert!(
            log == AccidentLog {
                id: 8,
                custom_fields: serde_json::Value::Null,
                ..AccidentLog::default()
            }
        );
    }

    #[test]
    fn decode_null_ids() {
        let log: AccidentLog = serde_json::from_value(json!({
            "id": null,
            "comments": "[Type: Fall]",
            "created_by": {"id": null, "login": null, "name": "X"},
        }))
        .unwrap();

        assert!(log.id == 0);
        assert!(log.comments == "[Type: Fall]");
        assert!(
            log.created_by
                == Creator {
                    id: 0,
                    login: String::new(),
                    name: "X".to_owned(),
                }
        );
    }

    #[test]
    fn decode_rejects_wrong_types() {
        assert!(let Err(_) = serde_json::from_value::<AccidentLog>(json!({
            "id": "eight",
        })));
    }
}
