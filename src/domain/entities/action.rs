use std::fmt;

/// What a request asks the model to do. Also the cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Summary,
    Example,
    Command,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Summary => "summary",
            ActionType::Example => "example",
            ActionType::Command => "command",
        }
    }

    /// Build the instructional prompt sent to the provider
    pub fn prompt(&self, text: &str) -> String {
        let instruction = match self {
            ActionType::Summary => {
                "Summarize this man page concisely highlighting its core functionality, main options, and typical use cases:"
            }
            ActionType::Example => {
                "Based on this man page, provide 3-5 practical, real-world usage examples with explanations. Include both simple and advanced use cases:"
            }
            ActionType::Command => {
                "Generate the most appropriate command line syntax for this intent. Include a brief explanation of what each part does:"
            }
        };
        format!("{}\n\n{}", instruction, text)
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_text_after_instruction() {
        let prompt = ActionType::Summary.prompt("LS(1) manual");
        assert!(prompt.starts_with("Summarize this man page"));
        assert!(prompt.ends_with("\n\nLS(1) manual"));
    }
}
