//! Documentation retrieval
//!
//! Fallback chain: `man <cmd>`, the shell's `help` builtin, `<cmd> --help`,
//! `<cmd> -h`. Non-man sources are tagged with a marker so the CLI can tell
//! the user where the text came from.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use std::process::{Command, Stdio};

use crate::domain::entities::DocSource;
use crate::domain::traits::DocumentationSource;

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").unwrap());
// Backspace overstrike used by nroff for bold and underline
static OVERSTRIKE: Lazy<Regex> = Lazy::new(|| Regex::new(r".\x08").unwrap());

/// Retrieves documentation by shelling out to the system's help facilities
#[derive(Debug, Clone)]
pub struct ManRetriever {
    man: String,
    shell: String,
}

impl Default for ManRetriever {
    fn default() -> Self {
        Self::new()
    }
}

impl ManRetriever {
    pub fn new() -> Self {
        Self {
            man: "man".to_string(),
            shell: "bash".to_string(),
        }
    }

    pub fn with_programs(man: impl Into<String>, shell: impl Into<String>) -> Self {
        Self {
            man: man.into(),
            shell: shell.into(),
        }
    }

    fn man_page(&self, command: &str) -> Option<String> {
        let mut cmd = Command::new(&self.man);
        cmd.arg(command).env("MANPAGER", "cat").env("PAGER", "cat");
        run(cmd)
    }

    fn shell_builtin(&self, command: &str) -> Option<String> {
        // Name passed as a positional parameter, never spliced into the script
        let mut cmd = Command::new(&self.shell);
        cmd.args(["-c", "help \"$1\" 2>/dev/null", "smartman", command]);
        run(cmd)
    }

    fn help_flag(&self, command: &str, flag: &str) -> Option<String> {
        let mut cmd = Command::new(command);
        cmd.arg(flag);
        run(cmd)
    }
}

impl DocumentationSource for ManRetriever {
    fn get_documentation(&self, command: &str) -> String {
        let command = command.trim();

        if let Some(page) = self.man_page(command) {
            tracing::debug!("Found man page for {}", command);
            return page;
        }
        if let Some(help) = self.shell_builtin(command) {
            tracing::debug!("Found shell builtin help for {}", command);
            return DocSource::ShellBuiltin.tag(&help);
        }
        for flag in ["--help", "-h"] {
            if let Some(help) = self.help_flag(command, flag) {
                tracing::debug!("Found `{} {}` output", command, flag);
                return DocSource::HelpOutput.tag(&help);
            }
        }

        tracing::debug!("No documentation found for {}", command);
        no_documentation(command)
    }
}

pub fn no_documentation(command: &str) -> String {
    format!(
        "{} No manual page or help information found for '{}'. Using general knowledge.",
        DocSource::Missing.marker().unwrap_or_default(),
        command
    )
}

/// Run a command, returning cleaned stdout when it succeeded with output
fn run(mut cmd: Command) -> Option<String> {
    let output = cmd
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let text = clean_output(&String::from_utf8_lossy(&output.stdout));
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Strip terminal formatting from man/help output
pub fn clean_output(s: &str) -> String {
    let s = OVERSTRIKE.replace_all(s, "");
    ANSI_ESCAPE.replace_all(&s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_output_strips_overstrike_and_ansi() {
        assert_eq!(clean_output("N\x08NA\x08AM\x08ME\x08E"), "NAME");
        assert_eq!(clean_output("_\x08l_\x08s"), "ls");
        assert_eq!(clean_output("\x1b[1mbold\x1b[0m text"), "bold text");
    }

    #[test]
    fn test_unknown_command_has_no_documentation() {
        let retriever = ManRetriever::with_programs("smartman-missing-man", "smartman-missing-shell");
        let doc = retriever.get_documentation("smartman-no-such-command-xyz");
        assert_eq!(DocSource::detect(&doc), DocSource::Missing);
        assert!(doc.contains("'smartman-no-such-command-xyz'"));
    }

    #[cfg(unix)]
    #[test]
    fn test_help_flag_fallback_is_tagged() {
        // `echo --help` prints "--help" and exits 0 when man is unavailable
        let retriever = ManRetriever::with_programs("smartman-missing-man", "smartman-missing-shell");
        let doc = retriever.get_documentation("echo");
        assert_eq!(DocSource::detect(&doc), DocSource::HelpOutput);
    }

    #[test]
    fn test_no_documentation_text() {
        assert_eq!(
            no_documentation("frob"),
            "NO_DOCUMENTATION: No manual page or help information found for 'frob'. Using general knowledge."
        );
    }
}
