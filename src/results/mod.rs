//! Splitting a ranking into the free preview and the paid segment.
//!
//! Ranks 1 to `free_count` are shown to everyone. The remaining ranks are
//! revealed by the paid full report.

use crate::core::StateScore;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const FREE_PREVIEW_COUNT: usize = 3;
pub const DEFAULT_PRICE_CENTS: u32 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionPolicy {
    pub free_count: usize,
}

impl Default for PartitionPolicy {
    fn default() -> Self {
        Self {
            free_count: FREE_PREVIEW_COUNT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Segment {
    Free,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultPartition {
    pub free: Vec<StateScore>,
    pub paid: Vec<StateScore>,
}

impl ResultPartition {
    /// Every entry with its 1-based rank and segment, in rank order.
    pub fn ranked(&self) -> impl Iterator<Item = (usize, &StateScore, Segment)> {
        self.free
            .iter()
            .map(|score| (score, Segment::Free))
            .chain(self.paid.iter().map(|score| (score, Segment::Paid)))
            .enumerate()
            .map(|(index, (score, segment))| (index + 1, score, segment))
    }

    pub fn len(&self) -> usize {
        self.free.len() + self.paid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.free.is_empty() && self.paid.is_empty()
    }
}

pub fn partition(results: &[StateScore], policy: PartitionPolicy) -> ResultPartition {
    let split = policy.free_count.min(results.len());
    let (free, paid) = results.split_at(split);
    ResultPartition {
        free: free.to_vec(),
        paid: paid.to_vec(),
    }
}

/// Price of the full report, in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    pub amount_cents: u32,
    pub currency: String,
}

impl Default for Price {
    fn default() -> Self {
        Self {
            amount_cents: DEFAULT_PRICE_CENTS,
            currency: "USD".to_string(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let major = self.amount_cents / 100;
        let minor = self.amount_cents % 100;
        match self.currency.as_str() {
            "USD" => write!(f, "${major}.{minor:02}"),
            other => write!(f, "{major}.{minor:02} {other}"),
        }
    }
}
