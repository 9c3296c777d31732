/// Prefix for output of the shell's `help` builtin
pub const SHELL_BUILTIN_MARKER: &str = "SHELL BUILTIN COMMAND:";
/// Prefix for `--help` / `-h` output
pub const HELP_OUTPUT_MARKER: &str = "COMMAND HELP OUTPUT:";
/// Prefix used when nothing could be retrieved
pub const NO_DOCUMENTATION_MARKER: &str = "NO_DOCUMENTATION:";

/// Where a piece of documentation text came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocSource {
    ManPage,
    ShellBuiltin,
    HelpOutput,
    Missing,
}

impl DocSource {
    /// Classify documentation text by its sentinel prefix
    pub fn detect(text: &str) -> Self {
        if text.starts_with(SHELL_BUILTIN_MARKER) {
            DocSource::ShellBuiltin
        } else if text.starts_with(HELP_OUTPUT_MARKER) {
            DocSource::HelpOutput
        } else if text.starts_with(NO_DOCUMENTATION_MARKER) {
            DocSource::Missing
        } else {
            DocSource::ManPage
        }
    }

    pub fn marker(&self) -> Option<&'static str> {
        match self {
            DocSource::ManPage => None,
            DocSource::ShellBuiltin => Some(SHELL_BUILTIN_MARKER),
            DocSource::HelpOutput => Some(HELP_OUTPUT_MARKER),
            DocSource::Missing => Some(NO_DOCUMENTATION_MARKER),
        }
    }

    /// Tag raw help text with this source's marker
    pub fn tag(&self, text: &str) -> String {
        match self.marker() {
            Some(marker) => format!("{}\n{}", marker, text),
            None => text.to_string(),
        }
    }
}
