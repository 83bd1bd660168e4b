//! Client for the remote factbase store.
//!
//! The store persists uploaded factbases ("artifacts") under names, assigns
//! each upload a positive integer id, and separately records the exit code
//! and captured output of the job that produced it. This crate implements
//! the client side of that contract:
//!
//! - `PUT /push/{name}` — upload, returns the new artifact id
//! - `GET /pull/{id}.fb` — download stored bytes
//! - `GET /recent/{name}.txt` — most recent artifact id for a name
//! - `GET /exists/{name}` — `"yes"` / `"no"`
//! - `GET /exit/{id}.txt` — recorded job exit code
//! - `GET /stdout/{id}.txt` — captured job output
//!
//! # Quick Start
//!
//! ```no_run
//! use judges_store::{StoreClient, StoreConfig};
//!
//! # async fn example() -> Result<(), judges_store::StoreError> {
//! let client = StoreClient::new(StoreConfig::new("example.org", 443, "token"))?;
//! let id = client.push("simple", b"hello, world!", &[] as &[&str]).await?;
//! let bytes = client.pull(id).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Contract notes
//!
//! - The token travels in the [`TOKEN_HEADER`] header on every request.
//! - Upload metadata travels in [`META_HEADER`]: each entry base64-encoded
//!   independently, joined by single spaces.
//! - The client never retries and never logs failures on its own behalf;
//!   every failure is returned to the caller as a typed [`StoreError`].

pub mod client;
pub mod error;
pub mod types;

pub use client::{StoreClient, META_HEADER, STORE_USER_AGENT, TOKEN_HEADER};
pub use error::{StoreError, StoreResult};
pub use types::StoreConfig;
