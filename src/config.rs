use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_SESSION_PATH: &str = "data/session.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub session_path: PathBuf,
}

impl ClientConfig {
    /// Normalises values coming from flags or `TRACKUP_*` variables: the
    /// base URL loses its trailing slash and blanks fall back to defaults.
    pub fn new(base_url: &str, session_path: &Path) -> Self {
        let base_url = match base_url.trim().trim_end_matches('/') {
            "" => DEFAULT_BASE_URL.to_string(),
            trimmed => trimmed.to_string(),
        };
        let session_path = if session_path.as_os_str().to_string_lossy().trim().is_empty() {
            PathBuf::from(DEFAULT_SESSION_PATH)
        } else {
            session_path.to_path_buf()
        };

        Self {
            base_url,
            session_path,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Path::new(DEFAULT_SESSION_PATH))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_blank() {
        let config = ClientConfig::new(" ", Path::new("  "));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session_path, PathBuf::from(DEFAULT_SESSION_PATH));
    }

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = ClientConfig::new("https://trackup.example.com/", Path::new("/tmp/s.json"));
        assert_eq!(config.base_url, "https://trackup.example.com");
        assert_eq!(config.session_path, PathBuf::from("/tmp/s.json"));
    }
}
