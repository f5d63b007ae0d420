use serde::Deserialize;

// Fields the service always sends but this client does not read are kept for
// debugging and marked `dead_code`. `id`, `model` and `usage` default so that
// minimal bodies from compatible endpoints still decode.
#[derive(Debug, Deserialize)]
pub struct Response {
    #[serde(default)]
    pub id: String,

    #[allow(dead_code)]
    /// This is always `message`
    #[serde(rename = "type", default)]
    pub r#type: Option<String>,

    #[allow(dead_code)]
    /// This is always `assistant`
    #[serde(default)]
    pub role: Option<String>,

    #[serde(default)]
    pub model: String,

    pub content: Vec<ResponseContent>,

    pub stop_reason: Option<String>,

    #[allow(dead_code)]
    #[serde(default)]
    pub stop_sequence: Option<String>,

    #[serde(default)]
    pub usage: Usage,
}

/// Output blocks, tagged by `type`. A block kind missing here fails decoding
/// instead of being dropped.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseContent {
    Text { text: String },
}

#[derive(Debug, Default, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub input_tokens: u32,
    #[serde(default)]
    pub output_tokens: u32,
    pub cache_creation_input_tokens: Option<u32>,
    pub cache_read_input_tokens: Option<u32>,
}
