//! HTTP client for the remote factbase store.

use std::io::Write;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use flate2::write::GzEncoder;
use flate2::Compression;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_ENCODING, CONTENT_TYPE, USER_AGENT};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::types::StoreConfig;

/// User agent for store requests: the literal tool name and its version.
pub const STORE_USER_AGENT: &str = concat!("judges ", env!("CARGO_PKG_VERSION"));

/// Header carrying the authentication token on every request.
///
/// This is the access-control gate of the remote store; deployments against
/// a store fork that renamed it must change this constant, not call sites.
pub const TOKEN_HEADER: &str = "X-Zerocracy-Token";

/// Header carrying upload metadata entries, base64-encoded and space-joined.
pub const META_HEADER: &str = "X-Zerocracy-Meta";

/// Client for one remote store endpoint.
///
/// Stateless between calls: every operation is an independent
/// request/response exchange bounded by the configured timeout, with no
/// retries and no connection affinity. Cloning is cheap and clones may be
/// used from separate tasks.
#[derive(Debug, Clone)]
pub struct StoreClient {
    /// HTTP client carrying timeout and default headers.
    client: reqwest::Client,

    /// Precomputed base URL, default ports elided.
    base_url: String,

    /// Configuration.
    config: StoreConfig,
}

impl StoreClient {
    /// Create a new client, validating the endpoint first.
    pub fn new(config: StoreConfig) -> StoreResult<Self> {
        if config.host.trim().is_empty() {
            return Err(StoreError::Config {
                message: "host must not be empty".to_string(),
            });
        }
        if config.port == 0 {
            return Err(StoreError::Config {
                message: "port must be a positive integer".to_string(),
            });
        }
        if config.timeout_secs == 0 {
            return Err(StoreError::Config {
                message: "timeout must be a positive number of seconds".to_string(),
            });
        }

        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(STORE_USER_AGENT));
        let token = HeaderValue::from_str(&config.token).map_err(|_| StoreError::Config {
            message: "token is not a valid header value".to_string(),
        })?;
        default_headers.insert(TOKEN_HEADER, token);

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(default_headers)
            .build()
            .map_err(|e| StoreError::Config {
                message: format!("failed to create HTTP client: {}", e),
            })?;

        let base_url = base_url(&config);

        Ok(Self {
            client,
            base_url,
            config,
        })
    }

    /// Upload a factbase under a name; returns the server-assigned id.
    ///
    /// `PUT /push/{name}` with the payload gzip-compressed when compression
    /// is enabled, the exact bytes otherwise. Metadata entries travel in a
    /// single [`META_HEADER`], each entry base64-encoded independently and
    /// joined by one space, input order preserved; an empty list omits the
    /// header.
    pub async fn push<S: AsRef<str>>(
        &self,
        name: &str,
        payload: &[u8],
        meta: &[S],
    ) -> StoreResult<u64> {
        let url = format!("{}/push/{}", self.base_url, name);
        debug!(url = %url, size = payload.len(), compress = self.config.compress, "pushing factbase");

        let mut request = self.client.put(&url);
        request = if self.config.compress {
            request
                .header(CONTENT_TYPE, "application/zip")
                .header(CONTENT_ENCODING, "gzip")
                .body(gzip(payload)?)
        } else {
            request
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(payload.to_vec())
        };
        if !meta.is_empty() {
            let value =
                HeaderValue::from_str(&encode_meta(meta)).map_err(|_| StoreError::Encoding {
                    message: "metadata does not fit a header value".to_string(),
                })?;
            request = request.header(META_HEADER, value);
        }

        let response = request.send().await?;
        let (status, body) = read(response).await?;
        parse_decimal(status, &body)
    }

    /// Download the stored bytes of an artifact: `GET /pull/{id}.fb`.
    pub async fn pull(&self, id: u64) -> StoreResult<Vec<u8>> {
        let url = format!("{}/pull/{}.fb", self.base_url, id);
        debug!(url = %url, "pulling factbase");

        let response = self.client.get(&url).send().await?;
        let (_, body) = read(response).await?;
        Ok(body)
    }

    /// Resolve a name to its most recently uploaded artifact id:
    /// `GET /recent/{name}.txt`.
    pub async fn recent(&self, name: &str) -> StoreResult<u64> {
        let url = format!("{}/recent/{}.txt", self.base_url, name);
        debug!(url = %url, "resolving recent artifact id");

        let response = self.client.get(&url).send().await?;
        let (status, body) = read(response).await?;
        parse_decimal(status, &body)
    }

    /// Check whether any artifact exists under a name: `GET /exists/{name}`.
    ///
    /// The body `"yes"` means true, anything else false. A non-2xx status is
    /// an error, never `false`.
    pub async fn exists(&self, name: &str) -> StoreResult<bool> {
        let url = format!("{}/exists/{}", self.base_url, name);
        debug!(url = %url, "checking name existence");

        let response = self.client.get(&url).send().await?;
        let (_, body) = read(response).await?;
        Ok(String::from_utf8_lossy(&body).trim() == "yes")
    }

    /// Read the exit code recorded for a job: `GET /exit/{id}.txt`.
    pub async fn exit_code(&self, id: u64) -> StoreResult<i32> {
        let url = format!("{}/exit/{}.txt", self.base_url, id);
        debug!(url = %url, "reading job exit code");

        let response = self.client.get(&url).send().await?;
        let (status, body) = read(response).await?;
        parse_decimal(status, &body)
    }

    /// Read the captured output of a job: `GET /stdout/{id}.txt`.
    pub async fn stdout(&self, id: u64) -> StoreResult<String> {
        let url = format!("{}/stdout/{}.txt", self.base_url, id);
        debug!(url = %url, "reading job stdout");

        let response = self.client.get(&url).send().await?;
        let (_, body) = read(response).await?;
        Ok(String::from_utf8_lossy(&body).into_owned())
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Render the base URL, eliding the port when it is the scheme default.
fn base_url(config: &StoreConfig) -> String {
    let (scheme, default_port) = if config.secure {
        ("https", 443)
    } else {
        ("http", 80)
    };
    if config.port == default_port {
        format!("{}://{}", scheme, config.host)
    } else {
        format!("{}://{}:{}", scheme, config.host, config.port)
    }
}

/// Read the full body, mapping non-2xx statuses to protocol errors.
async fn read(response: reqwest::Response) -> StoreResult<(u16, Vec<u8>)> {
    let status = response.status();
    let body = response.bytes().await?.to_vec();
    if !status.is_success() {
        return Err(StoreError::Protocol {
            status: status.as_u16(),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
    }
    Ok((status.as_u16(), body))
}

/// Parse a 2xx body as a base-10 integer; anything else is a protocol error.
fn parse_decimal<T: std::str::FromStr>(status: u16, body: &[u8]) -> StoreResult<T> {
    let text = String::from_utf8_lossy(body);
    text.trim()
        .parse::<T>()
        .map_err(|_| StoreError::Protocol {
            status,
            body: text.into_owned(),
        })
}

/// Gzip a payload for upload.
fn gzip(payload: &[u8]) -> StoreResult<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(payload)
        .and_then(|()| encoder.finish())
        .map_err(|e| StoreError::Encoding {
            message: format!("gzip failed: {}", e),
        })
}

/// Encode metadata entries: each base64-encoded on its own, space-joined.
fn encode_meta<S: AsRef<str>>(meta: &[S]) -> String {
    meta.iter()
        .map(|entry| BASE64.encode(entry.as_ref().as_bytes()))
        .collect::<Vec<_>>()
        .join(" ")
}
