//! Core library for the judges CLI.
//!
//! Provides the collaborators the command orchestrators are built on:
//!
//! - [`Factbase`] — an in-memory fact database with opaque byte
//!   import/export and query-driven deletion
//! - [`Impex`] — factbase import/export bound to a file path
//! - [`Options`] — typed `k=v` options with secrecy-aware rendering
//! - [`Packs`] — discovery and execution of judge packs

pub mod error;
pub mod factbase;
pub mod impex;
pub mod options;
pub mod packs;
pub mod query;

pub use error::{CoreError, CoreResult};
pub use factbase::{Fact, Factbase, Scalar};
pub use impex::Impex;
pub use options::{OptValue, Options};
pub use packs::{Pack, Packs};
pub use query::Predicate;
