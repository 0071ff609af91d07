//! # JSON Chain
//!
//! A generic key-value container for building JSON documents
//! programmatically.
//!
//! ## Core Concepts
//!
//! - **Chain**: A hash map of string-like keys to serializable values with a
//!   fluent mutation API
//! - **Strict access**: `set_with_error` refuses to overwrite, `get_with_error`
//!   refuses missing keys
//! - **Merges**: `copy` (last writer wins) and `append` (first writer wins)
//! - **Output**: Serialized bytes with pretty-printing
//!
//! ## Example
//!
//! ```
//! use jsonchain::Chain;
//!
//! let mut chain: Chain<String, String> = Chain::new();
//! chain.set("name", "Mattéo").set("language", "Rust");
//!
//! assert!(chain.set_with_error("name", "Other").is_err());
//! assert_eq!(chain.get_with_error("name").unwrap(), "Mattéo");
//!
//! let mut other: Chain<String, String> = Chain::new();
//! other.load_from_bytes(chain.to_json().unwrap().as_bytes()).unwrap();
//! assert_eq!(chain, other);
//! ```

pub mod chain;
pub mod config;
mod encode;
pub mod error;
pub mod output;
pub mod shared;

// Re-exports
pub use chain::{Chain, ChainKey};
pub use config::PrettyConfig;
pub use error::{ChainError, Result};
pub use output::Output;
pub use shared::SharedChain;
