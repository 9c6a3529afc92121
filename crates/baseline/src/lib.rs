//! Item-mean baseline rating predictor.
//!
//! This crate provides:
//! - TrainingStats: global and per-item rating sums and counts
//! - ItemMeanBaseline: the trained model, `µ + b(i)`
//! - score_items: writes predictions for a ScoreRequest
//!
//! ## Example Usage
//! ```ignore
//! use baseline::{ItemMeanBaseline, score_items};
//! use data_loader::parser;
//!
//! let model = ItemMeanBaseline::train(Path::new("train.csv"), 0.0)?;
//! let request = parser::parse_pairs(Path::new("test.csv"))?;
//! score_items(&model, &request, std::io::stdout().lock())?;
//! ```

pub mod error;
pub mod stats;
pub mod model;
pub mod scorer;

// Re-export main types
pub use error::{BaselineError, Result};
pub use model::ItemMeanBaseline;
pub use scorer::score_items;
pub use stats::{GlobalStats, ItemStats, TrainingStats};
