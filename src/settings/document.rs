use crate::camera::binding_list::CameraBindingList;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CREDENTIALS_KEY: &str = "blink_credentials";

/// Login attributes returned by the Blink account API. Only `username` is
/// required; fields this tool does not know about are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Credential {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Credential {
    pub fn for_user(username: impl Into<String>) -> Self {
        Credential {
            username: username.into(),
            password: None,
            uid: None,
            device_id: None,
            token: None,
            host: None,
            region_id: None,
            client_id: None,
            account_id: None,
            user_id: None,
            extra: Map::new(),
        }
    }
}

/// One upload destination for one camera. Stored as `[name, serial, token]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String, String)", into = "(String, String, String)")]
pub struct Binding {
    pub device_name: String,
    pub device_id: String,
    pub upload_token: String,
}

impl Binding {
    pub fn new(device_name: impl Into<String>, device_id: impl Into<String>, upload_token: impl Into<String>) -> Self {
        Binding {
            device_name: device_name.into(),
            device_id: device_id.into(),
            upload_token: upload_token.into(),
        }
    }
}

impl From<(String, String, String)> for Binding {
    fn from((device_name, device_id, upload_token): (String, String, String)) -> Self {
        Binding { device_name, device_id, upload_token }
    }
}

impl From<Binding> for (String, String, String) {
    fn from(binding: Binding) -> Self {
        (binding.device_name, binding.device_id, binding.upload_token)
    }
}

/// The on-disk settings file. Key names are shared with the uploader that
/// consumes this file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsDocument {
    #[serde(rename = "blink_credentials", default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
    #[serde(rename = "blink_username", default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(rename = "upload_list", default)]
    pub bindings: CameraBindingList,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bindings_serialize_as_three_element_arrays() {
        let mut doc = SettingsDocument::default();
        doc.bindings.push(Binding::new("Porch", "SN123", "tok1"));
        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(value, json!({ "upload_list": [["Porch", "SN123", "tok1"]] }));
    }

    #[test]
    fn unknown_keys_survive_a_round_trip() {
        let raw = json!({
            "blink_username": "me@example.com",
            "upload_list": [],
            "upload_interval": 10
        });
        let doc: SettingsDocument = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(doc.extra.get("upload_interval"), Some(&json!(10)));
        assert_eq!(serde_json::to_value(&doc).unwrap(), raw);
    }

    #[test]
    fn credential_keeps_unrecognised_attributes() {
        let raw = json!({ "username": "me@example.com", "token": "abc", "is_errored": false });
        let cred: Credential = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(cred.token.as_deref(), Some("abc"));
        assert_eq!(cred.extra.get("is_errored"), Some(&json!(false)));
        assert_eq!(serde_json::to_value(&cred).unwrap(), raw);
    }

    #[test]
    fn credential_requires_username() {
        assert!(serde_json::from_value::<Credential>(json!({ "token": "abc" })).is_err());
    }
}
