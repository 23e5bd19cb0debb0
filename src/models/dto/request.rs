use serde::Deserialize;
use validator::Validate;

/// Upper bound on pasted problem text or URL length.
pub const MAX_CONTENT_CHARS: u64 = 50_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputType {
    Url,
    Text,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenerateRequestDto {
    #[serde(alias = "inputType")]
    pub input_type: InputType,

    #[validate(length(max = MAX_CONTENT_CHARS))]
    pub content: String,
}
