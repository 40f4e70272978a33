use std::{error::Error, fmt::Display};

/// Fixed-capacity buffer over the last N pushed values, readable by recency.
///
/// Pushing once full overwrites the oldest retained value. Index 0 is always
/// the most recent push, index len()-1 the oldest still retained. Storage is
/// reserved once at construction and never reallocated.
///
/// The buffer does no locking of its own; a capture thread and a reader
/// sharing one must wrap it in a Mutex and hold the lock across any
/// len()+get() sequence, since a push in between shifts which slot a recency
/// index names.
#[derive(Clone, Debug)]
pub struct RecencyBuffer<T> {
    slots: Vec<T>,
    cursor: usize,
    capacity: usize
}

#[derive(Debug, PartialEq, Eq)]
pub enum HistoryError {
    ZeroCapacity,
    OutOfRange(usize, usize)
}

impl Display for HistoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroCapacity => f.write_str("history capacity must be at least 1"),
            Self::OutOfRange(index, len) => f.write_fmt(format_args!("recency index {} out of range for history of {} items", index, len))
        }
    }
}

impl Error for HistoryError {}

impl<T> RecencyBuffer<T> {
    pub fn with_capacity(capacity: usize) -> Result<RecencyBuffer<T>, HistoryError> {
        if capacity == 0 { return Err(HistoryError::ZeroCapacity); }

        return Ok(RecencyBuffer {
            slots: Vec::with_capacity(capacity),
            cursor: 0,
            capacity: capacity
        });
    }

    pub fn capacity(&self) -> usize {
        return self.capacity;
    }

    pub fn len(&self) -> usize {
        return self.slots.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.slots.is_empty();
    }

    /// Push a value, silently evicting the oldest retained one when full.
    pub fn push(&mut self, item: T) {
        match self.slots.len() < self.capacity {
            // Still filling, the cursor slot doesn't exist yet
            true => self.slots.push(item),
            false => self.slots[self.cursor] = item
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Borrow the value pushed `index` pushes ago among those retained,
    /// 0 being the most recent.
    pub fn get(&self, index: usize) -> Result<&T, HistoryError> {
        if index >= self.slots.len() {
            return Err(HistoryError::OutOfRange(index, self.slots.len()));
        }

        // The cursor sits one past the newest value; walk backwards from it
        let slot = (self.cursor + self.capacity - 1 - index) % self.capacity;
        return Ok(&self.slots[slot]);
    }

    /// Iterate retained values most-recent-first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        return (0..self.slots.len()).map(move |index| {
            let slot = (self.cursor + self.capacity - 1 - index) % self.capacity;
            return &self.slots[slot];
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_capacity_is_rejected() {
        let result = RecencyBuffer::<u32>::with_capacity(0);
        assert_eq!(result.unwrap_err(), HistoryError::ZeroCapacity);
    }

    #[test]
    fn fresh_buffer_is_empty() {
        let buf = RecencyBuffer::<u32>::with_capacity(5).unwrap();
        assert_eq!(buf.len(), 0);
        assert!(buf.is_empty());
        assert_eq!(buf.get(0).unwrap_err(), HistoryError::OutOfRange(0, 0));
    }

    #[test]
    fn partial_fill_reads_newest_first() {
        let mut buf = RecencyBuffer::with_capacity(5).unwrap();
        buf.push(1);
        buf.push(2);
        buf.push(3);

        assert_eq!(buf.len(), 3);
        assert_eq!(buf.get(0), Ok(&3));
        assert_eq!(buf.get(1), Ok(&2));
        assert_eq!(buf.get(2), Ok(&1));
        assert_eq!(buf.get(3).unwrap_err(), HistoryError::OutOfRange(3, 3));
    }

    #[test]
    fn wrapping_evicts_only_the_oldest() {
        let mut buf = RecencyBuffer::with_capacity(5).unwrap();
        for v in 1..=6 {
            buf.push(v);
        }

        assert_eq!(buf.len(), 5);
        assert_eq!(buf.get(0), Ok(&6));
        assert_eq!(buf.get(1), Ok(&5));
        assert_eq!(buf.get(2), Ok(&4));
        assert_eq!(buf.get(3), Ok(&3));
        assert_eq!(buf.get(4), Ok(&2));
    }

    #[test]
    fn oldest_is_capacity_minus_one_pushes_back() {
        let mut buf = RecencyBuffer::with_capacity(4).unwrap();
        for v in 0..23 {
            buf.push(v);
        }

        assert_eq!(buf.get(0), Ok(&22));
        assert_eq!(buf.get(3), Ok(&19));
    }

    #[test]
    fn len_never_passes_capacity() {
        let mut buf = RecencyBuffer::with_capacity(5).unwrap();
        for pushes in 1..=20_usize {
            buf.push(pushes);
            assert_eq!(buf.len(), pushes.min(5));
        }
    }

    #[test]
    fn capacity_one_keeps_only_the_latest() {
        let mut buf = RecencyBuffer::with_capacity(1).unwrap();
        buf.push("a");
        buf.push("b");

        assert_eq!(buf.len(), 1);
        assert_eq!(buf.get(0), Ok(&"b"));
        assert_eq!(buf.get(1).unwrap_err(), HistoryError::OutOfRange(1, 1));
    }

    #[test]
    fn reads_do_not_mutate() {
        let mut buf = RecencyBuffer::with_capacity(3).unwrap();
        buf.push(7);
        buf.push(8);

        for _ in 0..3 {
            assert_eq!(buf.get(0), Ok(&8));
            assert_eq!(buf.get(1), Ok(&7));
            assert_eq!(buf.len(), 2);
        }
    }

    #[test]
    fn iter_matches_get_order() {
        let mut buf = RecencyBuffer::with_capacity(3).unwrap();
        for v in 1..=5 {
            buf.push(v);
        }

        let collected: Vec<u32> = buf.iter().copied().collect();
        assert_eq!(collected, vec![5, 4, 3]);
    }

    #[test]
    fn out_of_range_reports_index_and_len() {
        let mut buf = RecencyBuffer::with_capacity(2).unwrap();
        buf.push(1);

        assert_eq!(buf.get(5).unwrap_err(), HistoryError::OutOfRange(5, 1));
    }
}
