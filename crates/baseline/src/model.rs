//! The item-mean baseline predictor.
//!
//! Predicts `p(u, i) = µ + b(i)`, where `µ` is the global mean rating and
//! `b(i)` is item `i`'s mean rating less `µ`. Items without training
//! ratings have no offset and are predicted at `µ`.
//!
//! An optional damping term `d` pulls items with few ratings towards the
//! global mean, as if every item had `d` extra ratings equal to `µ`:
//!
//! ```text
//! b(i) = (sum(i) + d·µ) / (count(i) + d) − µ
//! ```
//!
//! With `d = 0` this is the plain item mean offset.

use crate::error::{BaselineError, Result};
use crate::stats::TrainingStats;
use data_loader::{ItemId, parser};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// A trained item-mean model. Immutable once built.
#[derive(Debug, Clone)]
pub struct ItemMeanBaseline {
    global_mean: f64,
    offsets: HashMap<ItemId, f64>,
    damping: f64,
}

impl ItemMeanBaseline {
    /// Train from a `user,item,rating` file.
    ///
    /// Steps:
    /// 1. Parse the whole file (any malformed line aborts)
    /// 2. Accumulate global and per-item sums and counts
    /// 3. Derive the item offsets
    pub fn train(path: &Path, damping: f64) -> Result<Self> {
        info!(file = %path.display(), "training item-mean baseline");

        let ratings = parser::parse_ratings(path)?;
        let stats = TrainingStats::from_ratings(&ratings);
        let model = Self::from_stats(&stats, damping)?;

        info!(
            ratings = stats.rating_count(),
            items = stats.item_count(),
            global_mean = model.global_mean,
            damping = model.damping(),
            "model trained"
        );
        Ok(model)
    }

    /// Derive the model from accumulated statistics
    pub fn from_stats(stats: &TrainingStats, damping: f64) -> Result<Self> {
        if !damping.is_finite() || damping < 0.0 {
            return Err(BaselineError::InvalidDamping(damping));
        }

        let global_mean = stats.global_mean()?;
        debug!(global_mean, items = stats.item_count(), "computed global mean");
        debug!(damping, "computing item offsets");

        let offsets = stats
            .iter_items()
            .map(|(&item, item_stats)| {
                let total = item_stats.sum + damping * global_mean;
                let count = item_stats.count as f64 + damping;
                (item, total / count - global_mean)
            })
            .collect();

        Ok(Self {
            global_mean,
            offsets,
            damping,
        })
    }

    pub fn global_mean(&self) -> f64 {
        self.global_mean
    }

    pub fn damping(&self) -> f64 {
        self.damping
    }

    /// The global mean together with every trained item's offset
    pub fn item_mean_offsets(&self) -> (f64, &HashMap<ItemId, f64>) {
        (self.global_mean, &self.offsets)
    }

    /// Offset of one item, `None` if it was not in the training data
    pub fn offset(&self, item: ItemId) -> Option<f64> {
        self.offsets.get(&item).copied()
    }

    /// Predicted rating of `item` for any user
    pub fn predict(&self, item: ItemId) -> f64 {
        self.global_mean + self.offset(item).unwrap_or(0.0)
    }

    /// Every item seen in training, sorted
    pub fn items(&self) -> BTreeSet<ItemId> {
        self.offsets.keys().copied().collect()
    }
}
