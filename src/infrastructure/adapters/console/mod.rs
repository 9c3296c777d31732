//! Console adapter - terminal input and rendering

use colored::{ColoredString, Colorize};
use std::io::{self, BufRead, Write};

use crate::application::interactive::{Reply, ReplyKind};
use crate::domain::entities::DocSource;

const PANEL_WIDTH: usize = 72;

/// Reads prompts from stdin and renders answers to stdout. Status lines go to
/// stderr so the answer itself can be piped.
pub struct ConsoleAdapter {
    width: usize,
}

impl ConsoleAdapter {
    pub fn new() -> Self {
        Self { width: PANEL_WIDTH }
    }

    /// Read one line; `None` on end of input
    pub fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{}", prompt.bold());
        io::stdout().flush().ok()?;
        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(input.trim().to_string()),
        }
    }

    pub fn status(&self, message: &str) {
        eprintln!("{}", message.blue().bold());
    }

    /// Tell the user which documentation source a response was built from
    pub fn source_notice(&self, source: DocSource) {
        let notice = match source {
            DocSource::ManPage => "Found man page documentation.".green(),
            DocSource::ShellBuiltin => "Found shell builtin documentation.".yellow(),
            DocSource::HelpOutput => "Found command help output.".yellow(),
            DocSource::Missing => "No documentation found. Using LLM's general knowledge.".red(),
        };
        eprintln!("{}", notice.bold());
    }

    pub fn reply(&self, reply: &Reply) {
        println!("{}", self.render(reply));
    }

    pub fn message(&self, title: &str, body: &str) {
        println!("{}", frame(title.bold().cyan(), body, self.width));
    }

    pub fn error(&self, error: &dyn std::fmt::Display) {
        eprintln!("{} {}", "Error:".red().bold(), error);
    }

    pub fn render(&self, reply: &Reply) -> String {
        let title = match reply.kind {
            ReplyKind::Summary => reply.title.as_str().green(),
            ReplyKind::Examples => reply.title.as_str().yellow(),
            ReplyKind::Command => reply.title.as_str().magenta(),
            ReplyKind::Info => reply.title.as_str().blue(),
        };
        frame(title.bold(), &reply.body, self.width)
    }
}

impl Default for ConsoleAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn frame(title: ColoredString, body: &str, width: usize) -> String {
    let rule = "─".repeat(width);
    format!("{}\n{}\n{}\n{}", title, rule.dimmed(), body.trim_end(), rule.dimmed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_contains_title_and_body() {
        let console = ConsoleAdapter::new();
        let reply = Reply {
            kind: ReplyKind::Summary,
            title: "Summary of 'ls'".to_string(),
            body: "ls lists directory contents\n\n".to_string(),
            source: Some(DocSource::ManPage),
        };
        let out = console.render(&reply);
        assert!(out.contains("Summary of 'ls'"));
        assert!(out.contains("ls lists directory contents\n"));
        assert_eq!(out.lines().count(), 4);
    }
}
