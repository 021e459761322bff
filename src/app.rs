use crate::config::ClientConfig;
use crate::errors::ClientError;
use crate::state::Session;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

/// HTTP access to the TrackUp API for one session.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
            session,
        }
    }

    pub fn from_config(config: &ClientConfig, session: Session) -> Self {
        Self::new(config.base_url.clone(), session)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Unauthenticated JSON POST, used by the sign-in forms.
    pub async fn post_public<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        debug!(%path, "POST");
        Ok(self.http.post(self.url(path)).json(body).send().await?)
    }

    /// GET `path` with the bearer token and parse the JSON body.
    ///
    /// Fails with [`ClientError::Unauthenticated`] before touching the network
    /// when no token is stored, and when the server answers `401`.
    pub async fn auth_fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self.dispatch(Method::GET, path, |request| request).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Response, ClientError> {
        self.dispatch(method, path, |request| request.json(body)).await
    }

    pub async fn send_empty(&self, method: Method, path: &str) -> Result<Response, ClientError> {
        self.dispatch(method, path, |request| request).await
    }

    async fn dispatch<F>(&self, method: Method, path: &str, build: F) -> Result<Response, ClientError>
    where
        F: FnOnce(RequestBuilder) -> RequestBuilder,
    {
        let token = self.session.token().await.ok_or(ClientError::Unauthenticated)?;
        debug!(%method, %path, "authenticated request");
        let request = self.http.request(method, self.url(path)).bearer_auth(token);
        let response = build(request).send().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            return Err(ClientError::Unauthenticated);
        }
        Ok(response)
    }
}
