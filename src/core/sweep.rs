//! Sweep configuration
//!
//! A sweep is the Cartesian product of every configured dimension.
//! Combinations are produced lazily, in declaration order from the
//! outermost (commit size) to the innermost (async flag) dimension.

use serde::Serialize;

/// Default value for each dimension when the operator gives none
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SweepDefaults {
    pub commit_size: u32,
    pub batch_size: u32,
    pub image_multiplier: u32,
    pub threads: u32,
    pub processes: u32,
}

impl SweepDefaults {
    /// Defaults used by the native data generator
    pub const DATA_GENERATOR: SweepDefaults = SweepDefaults {
        commit_size: 100,
        batch_size: 100,
        image_multiplier: 1,
        threads: 1,
        processes: 1,
    };

    /// Defaults used by the simple Java loader
    pub const SIMPLE_LOADER: SweepDefaults = SweepDefaults {
        commit_size: 1,
        batch_size: 1,
        image_multiplier: 1,
        threads: 1,
        processes: 1,
    };
}

/// Ordered value lists for every tunable dimension
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SweepConfig {
    pub commit_sizes: Vec<u32>,
    pub batch_sizes: Vec<u32>,
    pub image_multipliers: Vec<u32>,
    pub thread_counts: Vec<u32>,
    pub process_counts: Vec<u32>,
    pub async_modes: Vec<bool>,
}

/// One tuple of dimension values drawn from a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Combination {
    pub commit_size: u32,
    pub batch_size: u32,
    pub image_multiplier: u32,
    pub threads: u32,
    pub processes: u32,
    pub async_mode: bool,
}

impl SweepConfig {
    /// Replace every empty dimension with its default value
    pub fn with_defaults(mut self, defaults: SweepDefaults) -> Self {
        fill(&mut self.commit_sizes, defaults.commit_size);
        fill(&mut self.batch_sizes, defaults.batch_size);
        fill(&mut self.image_multipliers, defaults.image_multiplier);
        fill(&mut self.thread_counts, defaults.threads);
        fill(&mut self.process_counts, defaults.processes);
        fill(&mut self.async_modes, false);
        self
    }

    /// Number of combinations the sweep visits
    pub fn len(&self) -> usize {
        self.commit_sizes.len()
            * self.batch_sizes.len()
            * self.image_multipliers.len()
            * self.thread_counts.len()
            * self.process_counts.len()
            * self.async_modes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over every combination exactly once
    pub fn combinations(&self) -> Combinations<'_> {
        Combinations {
            config: self,
            next: 0,
            total: self.len(),
        }
    }
}

fn fill<T>(values: &mut Vec<T>, default: T) {
    if values.is_empty() {
        values.push(default);
    }
}

/// Lazy iterator over the combinations of a [`SweepConfig`]
pub struct Combinations<'a> {
    config: &'a SweepConfig,
    next: usize,
    total: usize,
}

impl Combinations<'_> {
    /// Decode a flat index into one value per dimension, innermost first
    fn decode(&self, mut index: usize) -> Combination {
        let c = self.config;
        let mut pick = |len: usize| {
            let i = index % len;
            index /= len;
            i
        };
        let async_mode = c.async_modes[pick(c.async_modes.len())];
        let processes = c.process_counts[pick(c.process_counts.len())];
        let threads = c.thread_counts[pick(c.thread_counts.len())];
        let image_multiplier = c.image_multipliers[pick(c.image_multipliers.len())];
        let batch_size = c.batch_sizes[pick(c.batch_sizes.len())];
        let commit_size = c.commit_sizes[pick(c.commit_sizes.len())];
        Combination {
            commit_size,
            batch_size,
            image_multiplier,
            threads,
            processes,
            async_mode,
        }
    }
}

impl Iterator for Combinations<'_> {
    type Item = Combination;

    fn next(&mut self) -> Option<Combination> {
        if self.next >= self.total {
            return None;
        }
        let combination = self.decode(self.next);
        self.next += 1;
        Some(combination)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Combinations<'_> {}
