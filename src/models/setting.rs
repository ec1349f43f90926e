use serde::{Deserialize, Serialize};

/// Keys returned by `GET /api/settings`, with the value used when unset.
pub const KNOWN_SETTINGS: [(&str, &str); 4] = [
    ("notifications", "true"),
    ("theme", "light"),
    ("reminder_frequency", "daily"),
    ("name", "Friend"),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Setting {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingQuery {
    pub default: Option<String>,
}

/// Settings are stored as text; JSON strings keep their contents, anything
/// else is stored as its JSON form.
pub fn setting_value_to_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
