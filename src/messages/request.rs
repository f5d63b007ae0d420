use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Request {
    pub model: String,

    pub max_tokens: u32,

    pub messages: Vec<InputMessage>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,

    /// Between 0.0 and 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InputMessage {
    pub role: InputMessageRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMessageRole {
    User,
    Assistant,
}
