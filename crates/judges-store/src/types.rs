//! Endpoint configuration for the store client.

/// Remote store endpoint: host, port, TLS flag, token, timeout, compression.
///
/// Immutable once handed to [`crate::StoreClient::new`]; a CLI invocation
/// builds exactly one of these.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Host name of the remote store.
    pub host: String,

    /// TCP port of the remote store.
    pub port: u16,

    /// Authentication token, attached to every request.
    pub token: String,

    /// Use HTTPS when true, plain HTTP otherwise.
    pub secure: bool,

    /// Upper bound on connect + response-read time, in seconds.
    pub timeout_secs: u64,

    /// Gzip-compress upload payloads.
    pub compress: bool,
}

fn default_timeout() -> u64 {
    30
}

impl StoreConfig {
    /// Create a config with defaults: HTTPS, 30s timeout, compression on.
    pub fn new(host: impl Into<String>, port: u16, token: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            token: token.into(),
            secure: true,
            timeout_secs: default_timeout(),
            compress: true,
        }
    }

    /// Toggle HTTPS.
    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the request timeout in seconds.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Toggle gzip compression of upload payloads.
    pub fn with_compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }
}
