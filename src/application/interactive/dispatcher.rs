//! Dispatcher - Routes interactive commands to the LLM operations

use crate::application::errors::ProviderError;
use crate::application::services::LLMInterface;
use crate::domain::entities::DocSource;
use crate::domain::traits::DocumentationSource;

use super::parser::InteractiveCommand;

pub const USAGE: &str =
    "Use: summary <cmd>, example <cmd>, generate <intent>, help, or exit";

/// What kind of answer a reply carries, for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    Summary,
    Examples,
    Command,
    Info,
}

/// A rendered answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub kind: ReplyKind,
    pub title: String,
    pub body: String,
    /// Set when the answer was built from documentation
    pub source: Option<DocSource>,
}

/// Outcome of one dispatched line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Reply(Reply),
    Usage,
    Exit,
    Nothing,
}

pub struct Dispatcher<'a, D: DocumentationSource> {
    llm: &'a LLMInterface,
    docs: D,
}

impl<'a, D: DocumentationSource> Dispatcher<'a, D> {
    pub fn new(llm: &'a LLMInterface, docs: D) -> Self {
        Self { llm, docs }
    }

    pub fn summary(&self, command: &str) -> Result<Reply, ProviderError> {
        let doc = self.docs.get_documentation(command);
        Ok(Reply {
            kind: ReplyKind::Summary,
            title: format!("Summary of '{}'", command),
            body: self.llm.summarize(&doc)?,
            source: Some(DocSource::detect(&doc)),
        })
    }

    pub fn examples(&self, command: &str) -> Result<Reply, ProviderError> {
        let doc = self.docs.get_documentation(command);
        Ok(Reply {
            kind: ReplyKind::Examples,
            title: format!("Examples for '{}'", command),
            body: self.llm.generate_examples(&doc)?,
            source: Some(DocSource::detect(&doc)),
        })
    }

    pub fn generate(&self, intent: &str) -> Result<Reply, ProviderError> {
        Ok(Reply {
            kind: ReplyKind::Command,
            title: "Generated Command".to_string(),
            body: self.llm.generate_command(intent)?,
            source: None,
        })
    }

    pub fn dispatch(&self, command: InteractiveCommand) -> Result<Dispatch, ProviderError> {
        let reply = match command {
            InteractiveCommand::Summary(name) => self.summary(&name)?,
            InteractiveCommand::Example(name) => self.examples(&name)?,
            InteractiveCommand::Generate(intent) => self.generate(&intent)?,
            InteractiveCommand::Help => Reply {
                kind: ReplyKind::Info,
                title: "Help".to_string(),
                body: USAGE.to_string(),
                source: None,
            },
            InteractiveCommand::Exit => return Ok(Dispatch::Exit),
            InteractiveCommand::Empty => return Ok(Dispatch::Nothing),
            InteractiveCommand::Unknown(_) => return Ok(Dispatch::Usage),
        };
        Ok(Dispatch::Reply(reply))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::interactive::LineParser;
    use crate::infrastructure::llm::{CompletionRequest, LLMResult, ProviderConfig, ProviderKind, LLM};

    struct EchoProvider;

    impl LLM for EchoProvider {
        fn name(&self) -> &str {
            "echo"
        }

        fn send(&self, request: &CompletionRequest) -> LLMResult<String> {
            Ok(request.prompt.clone())
        }
    }

    struct FixedDocs;

    impl DocumentationSource for FixedDocs {
        fn get_documentation(&self, command: &str) -> String {
            format!("COMMAND HELP OUTPUT:\nUsage: {}", command)
        }
    }

    fn llm() -> LLMInterface {
        LLMInterface::new(Box::new(EchoProvider), ProviderConfig::new(ProviderKind::Custom, None))
    }

    #[test]
    fn test_summary_reply_carries_source() {
        let llm = llm();
        let dispatcher = Dispatcher::new(&llm, FixedDocs);

        let Dispatch::Reply(reply) = dispatcher.dispatch(LineParser::parse("summary foo")).unwrap() else {
            panic!("expected a reply");
        };
        assert_eq!(reply.kind, ReplyKind::Summary);
        assert_eq!(reply.title, "Summary of 'foo'");
        assert_eq!(reply.source, Some(DocSource::HelpOutput));
        assert!(reply.body.contains("Usage: foo"));
    }

    #[test]
    fn test_generate_skips_documentation() {
        let llm = llm();
        let dispatcher = Dispatcher::new(&llm, FixedDocs);

        let reply = dispatcher.generate("list open ports").unwrap();
        assert_eq!(reply.kind, ReplyKind::Command);
        assert!(reply.body.ends_with("list open ports"));
        assert!(!reply.body.contains("COMMAND HELP OUTPUT"));
    }

    #[test]
    fn test_control_flow() {
        let llm = llm();
        let dispatcher = Dispatcher::new(&llm, FixedDocs);
        assert_eq!(dispatcher.dispatch(InteractiveCommand::Exit).unwrap(), Dispatch::Exit);
        assert_eq!(dispatcher.dispatch(InteractiveCommand::Empty).unwrap(), Dispatch::Nothing);
        assert_eq!(
            dispatcher.dispatch(InteractiveCommand::Unknown("x".into())).unwrap(),
            Dispatch::Usage
        );
    }
}
