//! Rating sums and counts accumulated in a single pass over the training data.

use crate::error::{BaselineError, Result};
use data_loader::{ItemId, Rating};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Sum and count of every rating in the training set
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GlobalStats {
    pub sum: f64,
    pub count: u64,
}

/// Sum and count of the ratings one item received.
///
/// An entry only exists once the item has been rated, so `count >= 1`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemStats {
    pub sum: f64,
    pub count: u64,
}

/// Global and per-item statistics of a training set.
///
/// `global.count` always equals the sum of the per-item counts.
#[derive(Debug, Clone, Default)]
pub struct TrainingStats {
    pub(crate) global: GlobalStats,
    pub(crate) items: HashMap<ItemId, ItemStats>,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulates statistics over all ratings
    pub fn from_ratings<'a, I>(ratings: I) -> Self
    where
        I: IntoIterator<Item = &'a Rating>,
    {
        let mut stats = Self::new();
        for rating in ratings {
            stats.add(rating);
        }
        stats
    }

    /// Adds one rating to both the global and the item accumulator
    pub fn add(&mut self, rating: &Rating) {
        self.global.sum += rating.rating;
        self.global.count += 1;

        let item = self.items.entry(rating.item_id).or_default();
        item.sum += rating.rating;
        item.count += 1;
    }

    /// Mean of all ratings.
    ///
    /// Undefined for an empty training set, which is reported as
    /// [`BaselineError::EmptyTrainingSet`].
    pub fn global_mean(&self) -> Result<f64> {
        if self.global.count == 0 {
            return Err(BaselineError::EmptyTrainingSet);
        }
        Ok(self.global.sum / self.global.count as f64)
    }

    pub fn global(&self) -> GlobalStats {
        self.global
    }

    pub fn item(&self, item: ItemId) -> Option<&ItemStats> {
        self.items.get(&item)
    }

    /// Every item seen in training, sorted
    pub fn items(&self) -> BTreeSet<ItemId> {
        self.items.keys().copied().collect()
    }

    /// Number of distinct items
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Number of ratings
    pub fn rating_count(&self) -> u64 {
        self.global.count
    }

    pub(crate) fn iter_items(&self) -> impl Iterator<Item = (&ItemId, &ItemStats)> {
        self.items.iter()
    }
}
