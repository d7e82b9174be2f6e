//! Tracker credentials: dotenv file first, flags / environment second.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use watchtower_core::WatchtowerError;

pub const URL_KEY: &str = "KITSU_DATA_SOURCE_URL";
pub const EMAIL_KEY: &str = "KITSU_DATA_SOURCE_USER_EMAIL";
pub const PASSWORD_KEY: &str = "KITSU_DATA_SOURCE_USER_PASSWORD";

#[derive(Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    pub base_url: String,
    pub email: String,
    pub password: String,
}

// password は出さない
impl std::fmt::Debug for TrackerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl TrackerConfig {
    /// If `dotenv` exists it wins; otherwise all three explicit values are required.
    pub fn resolve(
        dotenv: &Path,
        base_url: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, WatchtowerError> {
        if dotenv.is_file() {
            let text = fs::read_to_string(dotenv).map_err(|e| WatchtowerError::io(dotenv, e))?;
            return Self::from_dotenv(&text);
        }
        match (base_url, email, password) {
            (Some(base_url), Some(email), Some(password)) => Ok(Self::new(base_url, email, password)),
            _ => Err(WatchtowerError::Config(format!(
                "no {} found and missing tracker settings; specify base_url, email and password",
                dotenv.display()
            ))),
        }
    }

    pub fn from_dotenv(text: &str) -> Result<Self, WatchtowerError> {
        let vars = parse_dotenv(text);
        let get = |key: &str| {
            vars.get(key)
                .cloned()
                .ok_or_else(|| WatchtowerError::Config(format!("missing {key} in dotenv file")))
        };
        Ok(Self::new(get(URL_KEY)?, get(EMAIL_KEY)?, get(PASSWORD_KEY)?))
    }

    fn new(base_url: String, email: String, password: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email,
            password,
        }
    }
}

/// `KEY=value` per line; `#` lines and blank lines are ignored.
fn parse_dotenv(text: &str) -> HashMap<String, String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            (key.trim().to_string(), value.to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOTENV: &str = "\
# local tracker
KITSU_DATA_SOURCE_URL=https://kitsu.example.com/api/
KITSU_DATA_SOURCE_USER_EMAIL=admin@example.com

KITSU_DATA_SOURCE_USER_PASSWORD=\"s3cret=yes\"
";

    #[test]
    fn reads_dotenv_file() {
        let config = TrackerConfig::from_dotenv(DOTENV).unwrap();
        assert_eq!(config.base_url, "https://kitsu.example.com/api");
        assert_eq!(config.email, "admin@example.com");
        assert_eq!(config.password, "s3cret=yes");
    }

    #[test]
    fn missing_key_is_a_config_error() {
        let err = TrackerConfig::from_dotenv("KITSU_DATA_SOURCE_URL=x").unwrap_err();
        assert!(matches!(err, WatchtowerError::Config(msg) if msg.contains(EMAIL_KEY)));
    }

    #[test]
    fn dotenv_file_wins_over_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env.local");
        fs::write(&path, DOTENV).unwrap();

        let config = TrackerConfig::resolve(
            &path,
            Some("https://other".into()),
            Some("o@example.com".into()),
            Some("pw".into()),
        )
        .unwrap();
        assert_eq!(config.email, "admin@example.com");
    }

    #[test]
    fn flags_are_used_without_dotenv() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(".env.local");

        let config = TrackerConfig::resolve(
            &missing,
            Some("https://kitsu/api".into()),
            Some("e".into()),
            Some("p".into()),
        )
        .unwrap();
        assert_eq!(config.base_url, "https://kitsu/api");

        let err = TrackerConfig::resolve(&missing, None, Some("e".into()), None).unwrap_err();
        assert!(matches!(err, WatchtowerError::Config(_)));
    }

    #[test]
    fn debug_hides_password() {
        let config = TrackerConfig::from_dotenv(DOTENV).unwrap();
        assert!(!format!("{config:?}").contains("s3cret"));
    }
}
