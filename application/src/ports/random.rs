//! Injectable randomness seam
//!
//! Topic selection and closing-message choice go through this port so
//! tests can assert deterministic behavior.

use std::sync::Mutex;

/// Source of uniform random indices
pub trait RandomSource: Send + Sync {
    /// An index in `0..bound`. `bound` must be non-zero.
    fn pick(&self, bound: usize) -> usize;
}

/// Deterministic source for tests: cycles through a fixed sequence of
/// picks, clamping each to the requested bound.
pub struct SequenceRandom {
    state: Mutex<(Vec<usize>, usize)>,
}

impl SequenceRandom {
    pub fn new(sequence: Vec<usize>) -> Self {
        assert!(!sequence.is_empty(), "sequence cannot be empty");
        Self {
            state: Mutex::new((sequence, 0)),
        }
    }

    /// Source that always picks the first candidate
    pub fn first() -> Self {
        Self::new(vec![0])
    }
}

impl RandomSource for SequenceRandom {
    fn pick(&self, bound: usize) -> usize {
        assert!(bound > 0, "pick bound must be non-zero");
        let mut state = self.state.lock().expect("random state poisoned");
        let (sequence, cursor) = &mut *state;
        let value = sequence[*cursor % sequence.len()];
        *cursor += 1;
        value.min(bound - 1)
    }
}
