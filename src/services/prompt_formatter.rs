//! Model-family prompt templates and their inverse.
//!
//! The family is chosen once from the configured model identifier. Each
//! formatter wraps a prompt before generation and strips the echoed prompt and
//! template markers from the decoded output afterwards.

pub const CHAT_SYSTEM_PROMPT: &str =
    "You are a helpful AI assistant specialized in programming and code explanation.";

const INSTRUCT_PREFIX: &str = "Instruct: ";
const OUTPUT_MARKER: &str = "Output:";

const SYSTEM_MARKER: &str = "<|system|>";
const USER_MARKER: &str = "<|user|>";
const ASSISTANT_MARKER: &str = "<|assistant|>";
const END_OF_TURN: &str = "</s>";

pub trait PromptFormatter: Send + Sync {
    fn format(&self, prompt: &str) -> String;

    /// Recovers only the generated continuation from the decoded output.
    fn strip(&self, formatted_prompt: &str, response: &str) -> String;

    fn name(&self) -> &'static str;
}

/// `Instruct: …\nOutput:` template used by the Phi family.
pub struct InstructionFormatter;

impl PromptFormatter for InstructionFormatter {
    fn format(&self, prompt: &str) -> String {
        format!("{INSTRUCT_PREFIX}{prompt}\n{OUTPUT_MARKER}")
    }

    fn strip(&self, formatted_prompt: &str, response: &str) -> String {
        if let Some(rest) = response.strip_prefix(formatted_prompt) {
            return rest.trim().to_string();
        }
        // Only a reply that echoes the template owns its first `Output:` marker.
        let echoed = response.trim_start().starts_with(INSTRUCT_PREFIX.trim_end());
        match response.split_once(OUTPUT_MARKER) {
            Some((_, rest)) if echoed => rest.trim().to_string(),
            _ => response.trim().to_string(),
        }
    }

    fn name(&self) -> &'static str {
        "instruction"
    }
}

/// System/user/assistant chat template used by the Llama family.
pub struct ChatFormatter {
    system_prompt: &'static str,
}

impl ChatFormatter {
    pub fn new(system_prompt: &'static str) -> Self {
        Self { system_prompt }
    }
}

impl PromptFormatter for ChatFormatter {
    fn format(&self, prompt: &str) -> String {
        format!(
            "{SYSTEM_MARKER}\n{}{END_OF_TURN}\n{USER_MARKER}\n{prompt}{END_OF_TURN}\n{ASSISTANT_MARKER}\n",
            self.system_prompt
        )
    }

    fn strip(&self, formatted_prompt: &str, response: &str) -> String {
        let generated = if let Some(rest) = response.strip_prefix(formatted_prompt) {
            rest
        } else if let Some((_, rest)) = response.split_once(ASSISTANT_MARKER) {
            rest
        } else {
            response
        };

        [SYSTEM_MARKER, USER_MARKER, ASSISTANT_MARKER, END_OF_TURN]
            .iter()
            .fold(generated.to_string(), |text, marker| text.replace(marker, ""))
            .trim()
            .to_string()
    }

    fn name(&self) -> &'static str {
        "chat"
    }
}

/// No template; only an echoed prompt prefix is removed.
pub struct PassthroughFormatter;

impl PromptFormatter for PassthroughFormatter {
    fn format(&self, prompt: &str) -> String {
        prompt.to_string()
    }

    fn strip(&self, formatted_prompt: &str, response: &str) -> String {
        response
            .strip_prefix(formatted_prompt)
            .unwrap_or(response)
            .trim()
            .to_string()
    }

    fn name(&self) -> &'static str {
        "passthrough"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Instruction,
    Chat,
}

/// Model id substrings, checked in order against the lowercased identifier.
const FAMILY_MARKERS: &[(&str, Family)] = &[
    ("microsoft/phi", Family::Instruction),
    ("tinyllama", Family::Chat),
    ("llama", Family::Chat),
];

/// Picks the formatter for `model_id`, falling back to passthrough.
pub fn formatter_for(model_id: &str) -> Box<dyn PromptFormatter> {
    let model_id = model_id.to_lowercase();
    let family = FAMILY_MARKERS
        .iter()
        .find(|(marker, _)| model_id.contains(marker))
        .map(|(_, family)| *family);

    match family {
        Some(Family::Instruction) => Box::new(InstructionFormatter),
        Some(Family::Chat) => Box::new(ChatFormatter::new(CHAT_SYSTEM_PROMPT)),
        None => Box::new(PassthroughFormatter),
    }
}
