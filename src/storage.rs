use crate::errors::ClientError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;
use tracing::error;

#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    jwt: String,
}

pub async fn load_token(path: &Path) -> Option<String> {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice::<StoredSession>(&bytes) {
            Ok(stored) if !stored.jwt.is_empty() => Some(stored.jwt),
            Ok(_) => None,
            Err(err) => {
                error!("failed to parse session file: {err}");
                None
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
        Err(err) => {
            error!("failed to read session file: {err}");
            None
        }
    }
}

pub async fn persist_token(path: &Path, token: &str) -> Result<(), ClientError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    let payload = serde_json::to_vec_pretty(&StoredSession {
        jwt: token.to_string(),
    })?;
    fs::write(path, payload).await?;
    Ok(())
}

pub async fn clear_token(path: &Path) -> Result<(), ClientError> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn unique_session_path() -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let mut path = std::env::temp_dir();
        path.push(format!("trackup_storage_{}_{}", std::process::id(), nanos));
        path.push("session.json");
        path
    }

    #[tokio::test]
    async fn persisted_token_loads_back() {
        let path = unique_session_path();
        persist_token(&path, "abc.def").await.unwrap();
        assert_eq!(load_token(&path).await.as_deref(), Some("abc.def"));

        clear_token(&path).await.unwrap();
        assert_eq!(load_token(&path).await, None);
    }

    #[tokio::test]
    async fn clearing_a_missing_file_is_not_an_error() {
        let path = unique_session_path();
        assert!(clear_token(&path).await.is_ok());
    }

    #[tokio::test]
    async fn corrupt_session_file_reads_as_signed_out() {
        let path = unique_session_path();
        fs::create_dir_all(path.parent().unwrap()).await.unwrap();
        fs::write(&path, b"not json").await.unwrap();
        assert_eq!(load_token(&path).await, None);
    }
}
