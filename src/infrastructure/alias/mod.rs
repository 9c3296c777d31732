//! Shell alias installation (`llm-man` -> `smartman`)

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const ALIAS_NAME: &str = "llm-man";

/// Profiles checked in order; the first existing one is used
const PROFILE_FILES: [&str; 3] = [".bashrc", ".bash_profile", ".zshrc"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasOutcome {
    Added(PathBuf),
    AlreadyPresent(PathBuf),
}

/// First existing shell profile under `home`
pub fn find_profile(home: &Path) -> Option<PathBuf> {
    PROFILE_FILES
        .iter()
        .map(|name| home.join(name))
        .find(|path| path.is_file())
}

/// Append the alias to the user's shell profile unless it is already there
pub fn install_alias(home: &Path) -> io::Result<AliasOutcome> {
    let profile = find_profile(home).ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Could not find a suitable shell profile file")
    })?;

    let content = fs::read_to_string(&profile)?;
    if content.contains(&format!("alias {}=", ALIAS_NAME)) {
        return Ok(AliasOutcome::AlreadyPresent(profile));
    }

    let mut file = OpenOptions::new().append(true).open(&profile)?;
    write!(file, "\n# SmartMan alias\nalias {}='smartman'\n", ALIAS_NAME)?;
    tracing::info!("Added alias {} to {}", ALIAS_NAME, profile.display());
    Ok(AliasOutcome::Added(profile))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_profile_is_error() {
        let home = tempfile::tempdir().unwrap();
        let err = install_alias(home.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_adds_alias_once() {
        let home = tempfile::tempdir().unwrap();
        let zshrc = home.path().join(".zshrc");
        fs::write(&zshrc, "export PATH=$PATH\n").unwrap();

        assert_eq!(install_alias(home.path()).unwrap(), AliasOutcome::Added(zshrc.clone()));
        assert_eq!(install_alias(home.path()).unwrap(), AliasOutcome::AlreadyPresent(zshrc.clone()));

        let content = fs::read_to_string(&zshrc).unwrap();
        assert!(content.starts_with("export PATH=$PATH\n"));
        assert_eq!(content.matches("alias llm-man='smartman'").count(), 1);
    }

    #[test]
    fn test_bashrc_preferred_over_zshrc() {
        let home = tempfile::tempdir().unwrap();
        fs::write(home.path().join(".zshrc"), "").unwrap();
        fs::write(home.path().join(".bashrc"), "").unwrap();
        assert_eq!(find_profile(home.path()), Some(home.path().join(".bashrc")));
    }
}
