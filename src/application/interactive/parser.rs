//! Line parser - Parses interactive-mode input into commands

/// One line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractiveCommand {
    Summary(String),
    Example(String),
    Generate(String),
    Help,
    Exit,
    Empty,
    Unknown(String),
}

/// Parses `<action> <argument>` lines
pub struct LineParser;

impl LineParser {
    pub fn parse(line: &str) -> InteractiveCommand {
        let line = line.trim();
        if line.is_empty() {
            return InteractiveCommand::Empty;
        }

        // Split action and the rest of the line
        let (action, rest) = match line.split_once(char::is_whitespace) {
            Some((action, rest)) => (action, rest.trim()),
            None => (line, ""),
        };

        match (action.to_lowercase().as_str(), rest) {
            ("exit" | "quit", _) => InteractiveCommand::Exit,
            ("help" | "?", "") => InteractiveCommand::Help,
            ("summary", arg) if !arg.is_empty() => InteractiveCommand::Summary(arg.to_string()),
            ("example" | "examples", arg) if !arg.is_empty() => InteractiveCommand::Example(arg.to_string()),
            ("generate", arg) if !arg.is_empty() => InteractiveCommand::Generate(arg.to_string()),
            _ => InteractiveCommand::Unknown(line.to_string()),
        }
    }
}
