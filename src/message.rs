// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

fn default_astrology_type() -> String {
    "vedic".to_string()
}

fn default_ayanamsa() -> String {
    "lahiri".to_string()
}

/// Birth details forwarded as-is to the chart service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BirthInput {
    pub name: String,
    pub gender: String,
    pub birth_date: Map<String, Value>,
    pub birth_time: Map<String, Value>,
    pub place_of_birth: String,
    #[serde(default = "default_astrology_type")]
    pub astrology_type: String,
    #[serde(default = "default_ayanamsa")]
    pub ayanamsa: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub birth_input: BirthInput,
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub answer: String,
}
