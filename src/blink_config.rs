use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BlinkApiConfig {
    pub api_url: Option<String>, // e.g., http://127.0.0.1:8080, replaces every regional host
    pub client_name: String,
    pub request_timeout_secs: u64,
}

impl Default for BlinkApiConfig {
    fn default() -> Self {
        BlinkApiConfig {
            api_url: None,
            client_name: "Computer".to_string(),
            request_timeout_secs: 30,
        }
    }
}
