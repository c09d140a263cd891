//! HTTP client for the Signchain vault API.
//!
//! Every call goes through [`VaultClient::dispatch`], which attaches the
//! bearer credential, optionally signs the body, and unwraps the
//! `{success, data, error}` response envelope.
//!
//! # Examples
//!
//! ```no_run
//! use signchain_client::{VaultApi, VaultClient};
//! use signchain_common::{ClientConfig, ListWalletsOptions};
//!
//! # async fn example() -> Result<(), signchain_client::ClientError> {
//! let config = ClientConfig::new("api-key", "vault-id")
//!     .with_auth_secret_key_from_env()
//!     .with_timeout(30);
//! let client = VaultClient::new(config)?;
//!
//! let page = client
//!     .list_wallets(&ListWalletsOptions::new().with_count(20))
//!     .await?;
//! for wallet in page.page {
//!     println!("{} {}", wallet.address, wallet.name);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - **Transport failures**: connection errors and timeouts, never retried
//! - **Server errors (>= 400)**: the envelope's `error` message, verbatim
//! - **Decode failures**: bodies that are not the expected JSON envelope
//!
//! # Security
//!
//! The API key and signing secret are stored using the `secrecy` crate and
//! are never logged. Signature tokens are generated per request and are not
//! logged either.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, error, warn};
use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;

use signchain_common::{
    Address, ApiResponse, ClientConfig, CreateWalletRequest, ListWalletsOptions,
    ListWalletsResult, SignRequest, SignResult, UpdateWalletRequest, VaultStatus, Wallet,
};

use crate::VaultApi;
use crate::auth::{AuthSecretKey, SIGNATURE_HEADER};
use crate::error::ClientError;

const APPLICATION_JSON: &str = "application/json";

/// Body argument for [`VaultClient::dispatch`] calls that send no body.
pub const NO_BODY: Option<&()> = None;

/// Client for a single Signchain vault.
///
/// Holds only immutable state, so one instance (or cheap clones of it) can
/// serve any number of concurrent calls. Cancelling a call is done by
/// dropping its future, which aborts the in-flight request.
#[derive(Clone)]
pub struct VaultClient {
    client: reqwest::Client,
    config: Arc<ClientConfig>,
    api_key: Arc<SecretString>,
    auth_secret_key: Option<Arc<AuthSecretKey>>,
    base_url: String,
}

// Custom Debug implementation to avoid exposing credentials
impl std::fmt::Debug for VaultClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultClient")
            .field("api_key", &"[REDACTED]")
            .field("auth_secret_key", &self.auth_secret_key.as_ref().map(|_| "[REDACTED]"))
            .field("base_url", &self.base_url)
            .field("vault_id", &self.config.vault_id)
            .finish_non_exhaustive()
    }
}

impl VaultClient {
    /// Create a new vault client from a configuration.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use signchain_client::VaultClient;
    /// use signchain_common::ClientConfig;
    ///
    /// let config = ClientConfig::new("api-key", "vault-id")
    ///     .with_base_url("https://signchain.net")
    ///     .with_auth_secret_key("shared-secret");
    ///
    /// let client = VaultClient::new(config)?;
    /// # Ok::<(), signchain_client::ClientError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be created.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;

        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| ClientError::ConfigurationError("API key is required".to_string()))?;

        let auth_secret_key = config
            .auth_secret_key
            .clone()
            .map(|secret| Arc::new(AuthSecretKey::from(secret)));

        let base_url = config.base_url().trim_end_matches('/').to_string();

        // None means no timeout; callers may still bound calls themselves
        let client = match config.timeout() {
            Some(timeout) => reqwest::Client::builder().timeout(timeout).build()?,
            None => reqwest::Client::builder().build()?,
        };

        Ok(Self {
            client,
            config: Arc::new(config),
            api_key: Arc::new(api_key),
            auth_secret_key,
            base_url,
        })
    }

    /// Whether signed calls can be made with this client.
    #[must_use]
    pub const fn can_sign(&self) -> bool {
        self.auth_secret_key.is_some()
    }

    /// Send one request to the vault and unwrap the response envelope.
    ///
    /// `path` is appended to the base URL as-is and must already carry any
    /// query string. When `body` is present it is sent as JSON; when
    /// `signed` is set, a signature over the exact body bytes (empty when
    /// there is no body) is attached in the `X-Vault-Auth-Signature` header.
    ///
    /// Returns `Ok(Some(data))` for a successful JSON envelope and `Ok(None)`
    /// for a successful response that is not JSON. Each call is a single
    /// attempt; nothing is retried.
    ///
    /// # Errors
    ///
    /// - [`ClientError::MissingSecretKey`] if `signed` is set without a
    ///   configured secret; no request is sent
    /// - [`ClientError::NetworkError`] / [`ClientError::TimeoutError`] if the
    ///   request could not be completed
    /// - [`ClientError::ServerError`] if the vault answered with status
    ///   `>= 400`, or a successful status with `success: false`
    /// - [`ClientError::DecodeError`] / [`ClientError::InvalidResponse`] if
    ///   the body is not a well-formed envelope
    pub async fn dispatch<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        signed: bool,
    ) -> Result<Option<T>, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{}", self.base_url, path);

        // Validate URL construction
        reqwest::Url::parse(&url)
            .map_err(|e| ClientError::ConfigurationError(format!("Invalid URL '{url}': {e}")))?;

        let payload = body.map(serde_json::to_vec).transpose()?;

        let mut request_builder = self
            .client
            .request(method.clone(), &url)
            .header(ACCEPT, APPLICATION_JSON)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_key.expose_secret()),
            );

        if signed {
            let key = self
                .auth_secret_key
                .as_ref()
                .ok_or(ClientError::MissingSecretKey)?;
            let signature = key.sign(Utc::now(), payload.as_deref().unwrap_or_default())?;
            request_builder = request_builder.header(SIGNATURE_HEADER, signature.as_str());
        }

        if let Some(payload) = payload {
            request_builder = request_builder
                .header(CONTENT_TYPE, APPLICATION_JSON)
                .body(payload);
        }

        debug!("Dispatching {method} {url} (signed: {signed})");

        let response = request_builder
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        let is_json = is_json_content_type(response.headers());

        // Always drain the body so the connection can be reused
        let body = response.bytes().await.map_err(|e| {
            warn!("Failed to read response body: {e}");
            ClientError::transport(e)
        })?;

        if status.as_u16() >= 400 {
            let envelope: ApiResponse<serde_json::Value> =
                serde_json::from_slice(&body).map_err(|source| {
                    error!(
                        "Vault request failed with status {} and an undecodable body: {source}",
                        status.as_u16()
                    );
                    ClientError::DecodeError {
                        status: status.as_u16(),
                        source,
                    }
                })?;

            let message = envelope.error.ok_or_else(|| {
                error!(
                    "Vault request failed with status {} without an error message",
                    status.as_u16()
                );
                ClientError::InvalidResponse(format!(
                    "HTTP {} response carried no error message",
                    status.as_u16()
                ))
            })?;

            error!(
                "Vault request failed with status {}: {}",
                status.as_u16(),
                message
            );

            return Err(ClientError::ServerError {
                status: status.as_u16(),
                message,
            });
        }

        if !is_json {
            warn!(
                "Response with status {} is not JSON, no data decoded",
                status.as_u16()
            );
            return Ok(None);
        }

        debug!(
            "Received {} byte JSON response with status {}",
            body.len(),
            status.as_u16()
        );

        let envelope: ApiResponse<T> =
            serde_json::from_slice(&body).map_err(|source| ClientError::DecodeError {
                status: status.as_u16(),
                source,
            })?;

        if !envelope.success {
            warn!(
                "Vault returned status {} with an unsuccessful envelope",
                status.as_u16()
            );
            return Err(envelope.error.map_or_else(
                || {
                    ClientError::InvalidResponse(
                        "unsuccessful response carried no error message".to_string(),
                    )
                },
                |message| ClientError::ServerError {
                    status: status.as_u16(),
                    message,
                },
            ));
        }

        Ok(envelope.data)
    }

    /// GET a resource; a success without data is an invalid response.
    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.dispatch(Method::GET, path, NO_BODY, false)
            .await?
            .ok_or_else(|| ClientError::InvalidResponse("response carried no data".to_string()))
    }

    fn vault_path(&self) -> String {
        format!("/api/v1/vaults/{}", self.config.vault_id)
    }

    fn wallets_path(&self) -> String {
        format!("{}/wallets", self.vault_path())
    }

    fn wallet_path(&self, address: Address) -> String {
        format!("{}/{address}", self.wallets_path())
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case(APPLICATION_JSON))
}

#[async_trait]
impl VaultApi for VaultClient {
    fn config(&self) -> &ClientConfig {
        &self.config
    }

    async fn sign(&self, request: &SignRequest) -> Result<Option<SignResult>, ClientError> {
        let path = format!("{}/sign", self.vault_path());
        self.dispatch(Method::POST, &path, Some(request), true).await
    }

    async fn create_wallet(
        &self,
        request: &CreateWalletRequest,
    ) -> Result<Option<Wallet>, ClientError> {
        self.dispatch(Method::POST, &self.wallets_path(), Some(request), false)
            .await
    }

    async fn get_wallet(&self, address: Address) -> Result<Wallet, ClientError> {
        self.fetch(&self.wallet_path(address)).await
    }

    async fn list_wallets(
        &self,
        options: &ListWalletsOptions,
    ) -> Result<ListWalletsResult, ClientError> {
        let query = options.query_string();
        let path = if query.is_empty() {
            self.wallets_path()
        } else {
            format!("{}?{query}", self.wallets_path())
        };
        self.fetch(&path).await
    }

    async fn update_wallet(
        &self,
        address: Address,
        request: &UpdateWalletRequest,
    ) -> Result<Option<Wallet>, ClientError> {
        self.dispatch(Method::PUT, &self.wallet_path(address), Some(request), false)
            .await
    }

    async fn expire_wallet(&self, address: Address) -> Result<Option<Wallet>, ClientError> {
        self.dispatch(Method::DELETE, &self.wallet_path(address), NO_BODY, false)
            .await
    }

    async fn unexpire_wallet(&self, address: Address) -> Result<Option<Wallet>, ClientError> {
        self.dispatch(Method::POST, &self.wallet_path(address), NO_BODY, false)
            .await
    }

    async fn vault_status(&self) -> Result<VaultStatus, ClientError> {
        self.fetch(&self.vault_path()).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]

    use std::time::{Duration, Instant};

    use super::*;
    use crate::auth::AuthSignature;
    use signchain_common::Chain;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const VAULT: &str = "vault-1";
    const ADDRESS: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    fn create_test_config(base_url: &str) -> ClientConfig {
        ClientConfig::new("test-key", VAULT).with_base_url(base_url)
    }

    fn create_test_client(base_url: &str) -> VaultClient {
        VaultClient::new(create_test_config(base_url)).unwrap()
    }

    fn address() -> Address {
        ADDRESS.parse().unwrap()
    }

    fn wallet_json(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "account": "acct-1",
            "vault": VAULT,
            "name": "treasury",
            "address": ADDRESS.to_lowercase(),
            "created": "2024-05-01T12:00:00Z",
            "updated": "2024-05-01T12:00:00Z"
        })
    }

    fn envelope(data: serde_json::Value) -> serde_json::Value {
        serde_json::json!({"success": true, "data": data})
    }

    #[tokio::test]
    async fn test_get_wallet_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/vaults/{VAULT}/wallets/{ADDRESS}")))
            .and(header("authorization", "Bearer test-key"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(wallet_json("w1"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let wallet = client.get_wallet(address()).await.unwrap();

        assert_eq!(wallet.id, "w1");
        assert_eq!(wallet.address, address());

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[0].headers.get("content-type").is_none());
        assert!(requests[0].headers.get(SIGNATURE_HEADER).is_none());
    }

    #[tokio::test]
    async fn test_server_error_message_is_exact() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                "success": false,
                "error": "wallet not found"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.get_wallet(address()).await.unwrap_err();

        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "wallet not found");
    }

    #[tokio::test]
    async fn test_error_status_with_non_json_body_is_decode_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_string("<html>Internal Server Error</html>")
                    .insert_header("content-type", "text/html"),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.vault_status().await.unwrap_err();

        assert!(matches!(err, ClientError::DecodeError { status: 500, .. }));
        assert!(!err.is_server_error());
    }

    #[tokio::test]
    async fn test_error_status_without_message_is_invalid_response() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(serde_json::json!({"success": false})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.vault_status().await.unwrap_err();

        assert!(matches!(err, ClientError::InvalidResponse(_)));
        assert!(err.is_decode_failure());
    }

    #[tokio::test]
    async fn test_non_json_success_returns_no_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .respond_with(
                ResponseTemplate::new(204).insert_header("content-type", "text/plain"),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let path = format!("/api/v1/vaults/{VAULT}/wallets/{ADDRESS}");
        let data: Option<Wallet> = client
            .dispatch(Method::DELETE, &path, NO_BODY, false)
            .await
            .unwrap();
        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_mutations_acknowledged_without_body_succeed() {
        let mock_server = MockServer::start().await;

        for verb in ["POST", "PUT", "DELETE"] {
            Mock::given(method(verb))
                .respond_with(ResponseTemplate::new(204))
                .mount(&mock_server)
                .await;
        }

        let config = create_test_config(&mock_server.uri()).with_auth_secret_key("shared-secret");
        let client = VaultClient::new(config).unwrap();

        let created = client
            .create_wallet(&CreateWalletRequest::new("treasury"))
            .await
            .unwrap();
        assert!(created.is_none());

        let renamed = client
            .update_wallet(address(), &UpdateWalletRequest::new("renamed"))
            .await
            .unwrap();
        assert!(renamed.is_none());

        assert!(client.expire_wallet(address()).await.unwrap().is_none());
        assert!(client.unexpire_wallet(address()).await.unwrap().is_none());

        let request = SignRequest::builder()
            .chain(Chain::Local)
            .contract(address())
            .sender(address())
            .build();
        assert!(client.sign(&request).await.unwrap().is_none());

        assert_eq!(mock_server.received_requests().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_reads_without_body_are_invalid_responses() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string("ok")
                    .insert_header("content-type", "text/plain"),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());

        let err = client.get_wallet(address()).await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));

        let err = client.vault_status().await.unwrap_err();
        assert!(err.is_decode_failure());
    }

    #[tokio::test]
    async fn test_json_content_type_with_charset() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(
                        serde_json::to_vec(&envelope(wallet_json("w2"))).unwrap(),
                        "application/json; charset=utf-8",
                    ),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let wallet = client.get_wallet(address()).await.unwrap();
        assert_eq!(wallet.id, "w2");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_decode_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "id": "w1"
            }))))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.get_wallet(address()).await.unwrap_err();
        assert!(matches!(err, ClientError::DecodeError { status: 200, .. }));
    }

    #[tokio::test]
    async fn test_unsuccessful_envelope_with_ok_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": false,
                "error": "vault is sealed"
            })))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.vault_status().await.unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.to_string(), "vault is sealed");
    }

    #[tokio::test]
    async fn test_successful_envelope_without_data() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let err = client.vault_status().await.unwrap_err();
        assert!(matches!(err, ClientError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_list_wallets_query_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/vaults/{VAULT}/wallets")))
            .and(query_param("offset", "10"))
            .and(query_param("count", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "count": 12,
                "page": [wallet_json("w11"), wallet_json("w12")]
            }))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let options = ListWalletsOptions::new().with_offset(10).with_count(5);
        let result = client.list_wallets(&options).await.unwrap();

        assert_eq!(result.count, 12);
        assert_eq!(result.page.len(), 2);

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("offset=10&count=5"));
    }

    #[tokio::test]
    async fn test_list_wallets_omits_unset_parameters() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/vaults/{VAULT}/wallets")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "count": 0,
                "page": []
            }))))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());

        client
            .list_wallets(&ListWalletsOptions::new())
            .await
            .unwrap();
        client
            .list_wallets(&ListWalletsOptions::new().with_count(5))
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), None);
        assert_eq!(requests[1].url.query(), Some("count=5"));
    }

    #[tokio::test]
    async fn test_create_wallet_sends_json_body() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/api/v1/vaults/{VAULT}/wallets")))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!({"name": "treasury"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(envelope(wallet_json("w3"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let wallet = client
            .create_wallet(&CreateWalletRequest::new("treasury"))
            .await
            .unwrap()
            .expect("created wallet");
        assert_eq!(wallet.id, "w3");
    }

    #[tokio::test]
    async fn test_wallet_lifecycle_methods() {
        let mock_server = MockServer::start().await;
        let wallet_path = format!("/api/v1/vaults/{VAULT}/wallets/{ADDRESS}");

        Mock::given(method("PUT"))
            .and(path(wallet_path.clone()))
            .and(body_json(serde_json::json!({"name": "renamed"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(wallet_json("w1"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut expired = wallet_json("w1");
        expired["expires"] = serde_json::json!("2024-06-01T00:00:00Z");
        Mock::given(method("DELETE"))
            .and(path(wallet_path.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(expired)))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("POST"))
            .and(path(wallet_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(wallet_json("w1"))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());

        let updated = client
            .update_wallet(address(), &UpdateWalletRequest::new("renamed"))
            .await
            .unwrap()
            .expect("renamed wallet");
        assert_eq!(updated.id, "w1");

        let expired = client.expire_wallet(address()).await.unwrap().unwrap();
        assert!(expired.expires.is_some());

        let unexpired = client.unexpire_wallet(address()).await.unwrap().unwrap();
        assert!(unexpired.expires.is_none());

        let requests = mock_server.received_requests().await.unwrap();
        assert!(requests[2].headers.get("content-type").is_none());
        assert!(requests[2].body.is_empty());
    }

    #[tokio::test]
    async fn test_vault_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("/api/v1/vaults/{VAULT}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "timestamp": "2024-05-01T12:00:00Z",
                "online": true,
                "vaultKeys": 2,
                "wallets": 40,
                "version": "2.1.0"
            }))))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let status = client.vault_status().await.unwrap();

        assert!(status.online);
        assert_eq!(status.vault_keys, 2);
        assert_eq!(status.wallets, 40);
        assert_eq!(status.version, "2.1.0");
    }

    #[tokio::test]
    async fn test_sign_attaches_verifiable_signature() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("/api/v1/vaults/{VAULT}/sign")))
            .and(header("content-type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "submissionHash": "0xfeed",
                "args": ["0x01", 7]
            }))))
            .expect(1)
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri()).with_auth_secret_key("shared-secret");
        let client = VaultClient::new(config).unwrap();
        assert!(client.can_sign());

        let request = SignRequest::builder()
            .chain(Chain::Sepolia)
            .contract(address())
            .sender(address())
            .args(vec![serde_json::json!("0x01")])
            .build();

        let before = Utc::now().timestamp_millis();
        let result = client.sign(&request).await.unwrap().expect("sign result");
        let after = Utc::now().timestamp_millis();
        assert_eq!(result.submission_hash, "0xfeed");
        assert_eq!(result.args.len(), 2);

        let requests = mock_server.received_requests().await.unwrap();
        let received = &requests[0];
        let token = received
            .headers
            .get(SIGNATURE_HEADER)
            .expect("signature header")
            .to_str()
            .unwrap();
        let signature = AuthSignature::new(token);

        let key = AuthSecretKey::new("shared-secret");
        assert!(key.verify(&signature, &received.body));
        assert!(!AuthSecretKey::new("other").verify(&signature, &received.body));

        let signed_at = signature.decode().unwrap().timestamp_millis;
        assert!((before..=after).contains(&signed_at));
    }

    struct CapturingLogger;

    static CAPTURED: std::sync::Mutex<Vec<String>> = std::sync::Mutex::new(Vec::new());
    static LOGGER: CapturingLogger = CapturingLogger;

    impl log::Log for CapturingLogger {
        fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &log::Record<'_>) {
            CAPTURED.lock().unwrap().push(record.args().to_string());
        }

        fn flush(&self) {}
    }

    #[tokio::test]
    async fn test_response_bodies_and_credentials_are_not_logged() {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);

        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
                "submissionHash": "0xfeed",
                "args": ["vault-produced-signature-0123"]
            }))))
            .mount(&mock_server)
            .await;

        let config = ClientConfig::new("logged-api-key-sentinel", VAULT)
            .with_base_url(mock_server.uri())
            .with_auth_secret_key("logged-secret-sentinel");
        let client = VaultClient::new(config).unwrap();

        let request = SignRequest::builder()
            .chain(Chain::Local)
            .contract(address())
            .sender(address())
            .build();
        client.sign(&request).await.unwrap().unwrap();

        let token = mock_server.received_requests().await.unwrap()[0]
            .headers
            .get(SIGNATURE_HEADER)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();

        let captured = CAPTURED.lock().unwrap().clone();
        assert!(captured.iter().any(|line| line.contains("byte JSON response")));
        for line in captured.iter() {
            assert!(!line.contains("vault-produced-signature-0123"), "{line}");
            assert!(!line.contains("logged-api-key-sentinel"), "{line}");
            assert!(!line.contains("logged-secret-sentinel"), "{line}");
            assert!(!line.contains(&token), "{line}");
        }
    }

    #[tokio::test]
    async fn test_signed_request_without_body_signs_empty_payload() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({}))))
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri()).with_auth_secret_key("shared-secret");
        let client = VaultClient::new(config).unwrap();

        let _: Option<serde_json::Value> = client
            .dispatch(Method::GET, "/api/v1/ping", NO_BODY, true)
            .await
            .unwrap();

        let requests = mock_server.received_requests().await.unwrap();
        let token = requests[0].headers.get(SIGNATURE_HEADER).unwrap();
        let signature = AuthSignature::new(token.to_str().unwrap());
        assert!(AuthSecretKey::new("shared-secret").verify(&signature, b""));
    }

    #[tokio::test]
    async fn test_signed_request_without_secret_fails_before_sending() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        assert!(!client.can_sign());

        let request = SignRequest::builder()
            .chain(Chain::Local)
            .contract(address())
            .sender(address())
            .build();

        let err = client.sign(&request).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingSecretKey));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_timeout_is_transport_failure() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(wallet_json("w1")))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let config = create_test_config(&mock_server.uri()).with_timeout(1);
        let client = VaultClient::new(config).unwrap();

        let started = Instant::now();
        let err = client.get_wallet(address()).await.unwrap_err();

        assert!(err.is_timeout());
        assert!(err.is_transport_failure());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_caller_deadline_cancels_call() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(envelope(wallet_json("w1")))
                    .set_delay(Duration::from_secs(10)),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());

        let started = Instant::now();
        let result =
            tokio::time::timeout(Duration::from_millis(200), client.get_wallet(address())).await;

        assert!(result.is_err());
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_failure() {
        // Nothing listens on the discard port
        let client = create_test_client("http://127.0.0.1:9");
        let err = client.vault_status().await.unwrap_err();

        assert!(err.is_transport_failure());
        assert!(err.status().is_none());
    }

    #[tokio::test]
    async fn test_concurrent_calls_share_one_client() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(envelope(wallet_json("w1"))))
            .expect(16)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server.uri());
        let calls = (0..16).map(|_| {
            let client = client.clone();
            async move { client.get_wallet(address()).await }
        });

        let results = futures::future::join_all(calls).await;
        assert!(results.iter().all(Result::is_ok));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let err = VaultClient::new(ClientConfig::new("", VAULT)).unwrap_err();
        assert!(matches!(err, ClientError::ConfigurationError(_)));

        let err = VaultClient::new(ClientConfig::new("key", VAULT).with_base_url("::")).unwrap_err();
        assert!(matches!(err, ClientError::ConfigurationError(_)));

        // A vault id must not be able to redirect the call to another endpoint
        let err = VaultClient::new(ClientConfig::new("key", "vault-1/wallets")).unwrap_err();
        assert!(matches!(err, ClientError::ConfigurationError(_)));
    }

    #[test]
    fn test_debug_redacts_credentials() {
        let config = ClientConfig::new("very-secret-api-key", VAULT)
            .with_auth_secret_key("very-secret-signing-key");
        let client = VaultClient::new(config).unwrap();

        let debug = format!("{client:?}");
        assert!(!debug.contains("very-secret-api-key"));
        assert!(!debug.contains("very-secret-signing-key"));
        assert!(debug.contains(VAULT));
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let client = create_test_client("http://localhost:8080/");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(
            client.wallet_path(address()),
            format!("/api/v1/vaults/{VAULT}/wallets/{ADDRESS}")
        );
    }

    #[test]
    fn test_json_content_type_detection() {
        let cases = [
            ("application/json", true),
            ("Application/JSON", true),
            ("application/json; charset=utf-8", true),
            ("text/plain", false),
            ("application/jsonp", false),
        ];

        for (value, expected) in cases {
            let mut headers = HeaderMap::new();
            headers.insert(CONTENT_TYPE, value.parse().unwrap());
            assert_eq!(is_json_content_type(&headers), expected, "{value}");
        }

        assert!(!is_json_content_type(&HeaderMap::new()));
    }
}
