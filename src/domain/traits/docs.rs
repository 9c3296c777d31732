/// DocumentationSource trait - retrieves documentation text for a command.
///
/// Never fails outward: when nothing is found the text carries the
/// `NO_DOCUMENTATION:` marker instead.
pub trait DocumentationSource {
    fn get_documentation(&self, command: &str) -> String;
}
