//! Bounded position history behind each particle.
//!
//! A trail records where a particle was at the start of each tick. It only
//! feeds rendering; physics never reads it back.

use glam::DVec2;
use std::collections::VecDeque;

/// Number of past positions kept per particle.
pub const TRAIL_CAPACITY: usize = 30;

/// FIFO history of past positions, oldest first.
///
/// Once full, pushing a new point evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Trail {
    points: VecDeque<DVec2>,
    capacity: usize,
}

impl Trail {
    /// Create an empty trail holding at most [`TRAIL_CAPACITY`] points.
    pub fn new() -> Self {
        Self::with_capacity(TRAIL_CAPACITY)
    }

    /// Create an empty trail with a custom capacity (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            points: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Record a position, evicting the oldest one when full.
    pub fn push(&mut self, point: DVec2) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest recorded position.
    pub fn oldest(&self) -> Option<DVec2> {
        self.points.front().copied()
    }

    /// Most recently recorded position.
    pub fn newest(&self) -> Option<DVec2> {
        self.points.back().copied()
    }

    /// Iterate points from oldest to newest.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = DVec2> + '_ {
        self.points.iter().copied()
    }

    /// Consecutive point pairs, oldest first. Empty for fewer than two points.
    pub fn segments(&self) -> impl Iterator<Item = (DVec2, DVec2)> + '_ {
        self.points
            .iter()
            .zip(self.points.iter().skip(1))
            .map(|(a, b)| (*a, *b))
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}
