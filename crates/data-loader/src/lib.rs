//! # Data Loader Crate
//!
//! This crate reads the plain-text inputs of the item-mean baseline.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (UserId, ItemId, Rating, ScoreRequest)
//! - **parser**: Strict parsers for training, test-pair and user-list files
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::parser;
//! use std::path::Path;
//!
//! let ratings = parser::parse_ratings(Path::new("data/train.csv"))?;
//! let request = parser::parse_pairs(Path::new("data/test.csv"))?;
//!
//! println!("{} ratings, {} pairs to score", ratings.len(), request.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::{parse_pairs, parse_ratings, parse_users};
pub use types::{
    // Type aliases
    UserId,
    ItemId,
    // Core types
    Rating,
    ScoreRequest,
};
