//! The `.env` file store: anchored line replacement over full-file text.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Errors from the config store.
#[derive(Debug)]
pub enum EnvError {
    /// The key has no assignment line in the store. The store is left
    /// untouched.
    KeyNotFound(String),

    /// Filesystem failure reading or replacing the store.
    Io(io::Error),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvError::KeyNotFound(key) => {
                write!(f, "key '{}' not present in config store", key)
            }
            EnvError::Io(e) => write!(f, "config store I/O error: {}", e),
        }
    }
}

impl std::error::Error for EnvError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EnvError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for EnvError {
    fn from(e: io::Error) -> Self {
        EnvError::Io(e)
    }
}

/// In-memory view of the persisted `.env` file.
///
/// Reads parse lazily per lookup; writes are read-modify-write over the
/// full text and only touch the single matched line.
#[derive(Debug, Clone)]
pub struct EnvFile {
    path: PathBuf,
    contents: String,
}

/// Does this line assign `key`? Anchored at line start: optional leading
/// whitespace, the exact key, optional whitespace, then `=`.
fn assigns_key(line: &str, key: &str) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return false;
    }
    match trimmed.split_once('=') {
        Some((lhs, _)) => lhs.trim_end() == key,
        None => false,
    }
}

/// Strip one layer of matching quotes from a value.
fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['\'', '"'] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

impl EnvFile {
    /// Load the store from disk.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EnvError> {
        let path = path.into();
        let contents = std::fs::read_to_string(&path)?;
        Ok(Self { path, contents })
    }

    /// Build a store from in-memory text. Used by tests and by callers
    /// that manage persistence themselves.
    pub fn from_contents(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Look up a key's value, with quotes stripped.
    pub fn get(&self, key: &str) -> Option<String> {
        self.contents
            .lines()
            .find(|line| assigns_key(line, key))
            .and_then(|line| line.split_once('='))
            .map(|(_, value)| unquote(value).to_string())
    }

    /// Look up a key, falling back to the empty string.
    ///
    /// The empty string is not a usable default: a downstream call will
    /// reject it as an invalid argument. The fallback only defers the
    /// failure to a point where the submission client reports it.
    pub fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default()
    }

    /// Replace the value of an existing key, leaving every other line
    /// byte-identical. The new value is written single-quoted, so it must
    /// not itself contain a single quote or a newline; object ids,
    /// addresses, and type strings never do.
    ///
    /// In-memory only; call [`save`](Self::save) to persist.
    pub fn upsert(&mut self, key: &str, value: &str) -> Result<(), EnvError> {
        debug_assert!(
            !value.contains('\'') && !value.contains('\n'),
            "value {:?} cannot be single-quoted",
            value
        );
        let mut replaced = false;
        let mut out = String::with_capacity(self.contents.len() + value.len());

        for (i, line) in self.contents.split_inclusive('\n').enumerate() {
            if !replaced && assigns_key(line, key) {
                let newline = if line.ends_with('\n') { "\n" } else { "" };
                out.push_str(&format!("{}='{}'{}", key, value, newline));
                replaced = true;
                debug!(key, line = i + 1, "config store key updated");
            } else {
                out.push_str(line);
            }
        }

        if !replaced {
            return Err(EnvError::KeyNotFound(key.to_string()));
        }

        self.contents = out;
        Ok(())
    }

    /// Persist the store, atomically replacing the file on disk.
    ///
    /// Writes the full text to a sibling temp file and renames it over the
    /// target, so no reader ever observes a partially written store.
    pub fn save(&self) -> Result<(), EnvError> {
        // Append rather than swap the extension: `config.env` must stage
        // through `config.env.tmp`, not clobber a sibling `config.tmp`.
        let mut tmp_name = self.path.as_os_str().to_os_string();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);
        std::fs::write(&tmp_path, &self.contents)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "# localcoin deployment\n\
                           PACKAGE_ID='0xold'\n\
                           \n\
                           # objects\n\
                           TOKEN_POLICY='0x1'\n\
                           TOKEN_POLICY_CAP=\"0x2\"\n\
                           CAMPAIGN=\n";

    #[test]
    fn test_get_strips_quotes() {
        let env = EnvFile::from_contents(".env", FIXTURE);
        assert_eq!(env.get("PACKAGE_ID").as_deref(), Some("0xold"));
        assert_eq!(env.get("TOKEN_POLICY_CAP").as_deref(), Some("0x2"));
        assert_eq!(env.get("CAMPAIGN").as_deref(), Some(""));
        assert_eq!(env.get("MISSING"), None);
        assert_eq!(env.get_or_empty("MISSING"), "");
    }

    #[test]
    fn test_upsert_touches_only_matched_line() {
        let mut env = EnvFile::from_contents(".env", FIXTURE);
        env.upsert("TOKEN_POLICY", "0xnew").unwrap();

        let expected = FIXTURE.replace("TOKEN_POLICY='0x1'", "TOKEN_POLICY='0xnew'");
        assert_eq!(env.contents(), expected);
    }

    #[test]
    fn test_upsert_missing_key_is_error_and_noop() {
        let mut env = EnvFile::from_contents(".env", FIXTURE);
        let err = env.upsert("FOO", "bar").unwrap_err();
        assert!(matches!(err, EnvError::KeyNotFound(k) if k == "FOO"));
        assert_eq!(env.contents(), FIXTURE);
    }

    #[test]
    fn test_key_match_is_anchored() {
        // A key that is a prefix of another must not match it.
        let mut env = EnvFile::from_contents(".env", "TOKEN_POLICY_CAP='0x2'\n");
        let err = env.upsert("TOKEN_POLICY", "0xnew").unwrap_err();
        assert!(matches!(err, EnvError::KeyNotFound(_)));

        // Commented-out assignments are not assignments.
        let mut env = EnvFile::from_contents(".env", "# PACKAGE_ID='0xold'\n");
        assert!(env.upsert("PACKAGE_ID", "0xnew").is_err());
        assert_eq!(env.get("PACKAGE_ID"), None);
    }

    #[test]
    fn test_upsert_last_line_without_newline() {
        let mut env = EnvFile::from_contents(".env", "A='1'\nB='2'");
        env.upsert("B", "3").unwrap();
        assert_eq!(env.contents(), "A='1'\nB='3'");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(&path, FIXTURE).unwrap();

        let mut env = EnvFile::load(&path).unwrap();
        env.upsert("PACKAGE_ID", "0xfresh").unwrap();
        env.save().unwrap();

        let reloaded = EnvFile::load(&path).unwrap();
        assert_eq!(reloaded.get("PACKAGE_ID").as_deref(), Some("0xfresh"));
        // Untouched lines survive byte-for-byte, temp file is gone.
        assert!(reloaded.contents().contains("# localcoin deployment\n"));
        assert!(!dir.path().join(".env.tmp").exists());
    }

    #[test]
    fn test_save_does_not_clobber_sibling_tmp_file() {
        // `config.env` stages through `config.env.tmp`; an unrelated
        // `config.tmp` sibling must survive untouched.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.env");
        let sibling = dir.path().join("config.tmp");
        std::fs::write(&sibling, "unrelated\n").unwrap();

        let env = EnvFile::from_contents(&path, "PACKAGE_ID='0xab'\n");
        env.save().unwrap();

        assert_eq!(std::fs::read_to_string(&sibling).unwrap(), "unrelated\n");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "PACKAGE_ID='0xab'\n"
        );
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "cannot be single-quoted")]
    fn test_upsert_rejects_unquotable_value() {
        let mut env = EnvFile::from_contents(".env", "PACKAGE_ID='0xab'\n");
        let _ = env.upsert("PACKAGE_ID", "0x'ab");
    }
}
