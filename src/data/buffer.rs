//! Fixed-capacity rolling store for one channel's scalar samples.

use std::collections::VecDeque;

use crate::error::ConfigError;

/// FIFO buffer that evicts its oldest sample once `capacity` is reached.
///
/// Every value carries the stamp it was pushed with (the engine uses the tick
/// index), so channels fed at different rates stay on one time base.
#[derive(Debug, Clone)]
pub struct SampleBuffer {
    capacity: usize,
    values: VecDeque<f64>,
    stamps: VecDeque<u64>,
    pushed: u64,
}

impl SampleBuffer {
    /// Create an empty buffer. A zero capacity is a configuration error.
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
            stamps: VecDeque::with_capacity(capacity),
            pushed: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of values pushed since creation (or the last [`clear`](Self::clear)).
    pub fn total_pushed(&self) -> u64 {
        self.pushed
    }

    /// Append one value stamped with its push index, discarding the oldest
    /// if the buffer is full.
    pub fn push(&mut self, value: f64) {
        self.push_at(self.pushed, value);
    }

    /// Append one value with an explicit stamp.
    pub fn push_at(&mut self, stamp: u64, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
            self.stamps.pop_front();
        }
        self.values.push_back(value);
        self.stamps.push_back(stamp);
        self.pushed += 1;
    }

    pub fn extend<I: IntoIterator<Item = f64>>(&mut self, values: I) {
        for v in values {
            self.push(v);
        }
    }

    /// Most recently pushed value.
    pub fn latest(&self) -> Option<f64> {
        self.values.back().copied()
    }

    /// Ordered copy of the stored values, oldest first.
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.iter().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// `(stamp, value)` pairs, oldest first.
    pub fn iter_stamped(&self) -> impl Iterator<Item = (u64, f64)> + '_ {
        self.stamps.iter().copied().zip(self.values.iter().copied())
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.stamps.clear();
        self.pushed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pushed_keeps_counting_after_eviction() {
        let mut buf = SampleBuffer::new(2).unwrap();
        buf.extend([1.0, 2.0, 3.0]);
        assert_eq!(buf.len(), 2);
        assert_eq!(buf.total_pushed(), 3);
        assert_eq!(buf.latest(), Some(3.0));
    }

    #[test]
    fn stamps_are_evicted_with_their_values() {
        let mut buf = SampleBuffer::new(2).unwrap();
        buf.push_at(10, 1.0);
        buf.push_at(10, 2.0);
        buf.push_at(12, 3.0);
        assert_eq!(buf.iter_stamped().collect::<Vec<_>>(), vec![(10, 2.0), (12, 3.0)]);
        buf.clear();
        assert_eq!(buf.iter_stamped().count(), 0);
    }
}
