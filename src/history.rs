use ndarray::{Array2, Array3, Axis};

use crate::error::EngineError;

/// Fixed-depth rolling store of energy-flow frames.
///
/// An index-based ring: pushes overwrite the oldest slot and advance the
/// cursor, so there is no per-push data movement. The ordered oldest-first
/// view is reconstructed on demand by [`HistoryBuffer::snapshot`]. Length is
/// always exactly `depth`; slots start zero-filled.
pub struct HistoryBuffer {
    frames: Vec<Array2<f64>>,
    cursor: usize, // Next slot to overwrite, i.e. the oldest frame
}

impl HistoryBuffer {
    pub fn new(depth: usize, size: usize) -> Result<Self, EngineError> {
        if depth == 0 {
            return Err(EngineError::invalid("history depth must be positive, got 0"));
        }
        if size == 0 {
            return Err(EngineError::invalid("frame size must be positive, got 0"));
        }
        Ok(HistoryBuffer {
            frames: vec![Array2::zeros((size, size)); depth],
            cursor: 0,
        })
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn frame_size(&self) -> usize {
        self.frames[0].nrows()
    }

    /// Evicts the oldest frame and appends `frame` at the newest position.
    pub fn push(&mut self, frame: Array2<f64>) {
        debug_assert_eq!(frame.nrows(), self.frame_size());
        debug_assert_eq!(frame.ncols(), self.frame_size());
        self.frames[self.cursor] = frame;
        self.cursor = (self.cursor + 1) % self.frames.len();
    }

    /// The most recently pushed frame (all zeros before the first push).
    pub fn latest(&self) -> &Array2<f64> {
        let depth = self.frames.len();
        &self.frames[(self.cursor + depth - 1) % depth]
    }

    /// Ordered history as a `(time, x, y)` volume, oldest frame first.
    pub fn snapshot(&self) -> Array3<f64> {
        let depth = self.frames.len();
        let n = self.frame_size();
        let mut volume = Array3::zeros((depth, n, n));
        for t in 0..depth {
            let frame = &self.frames[(self.cursor + t) % depth];
            volume.index_axis_mut(Axis(0), t).assign(frame);
        }
        volume
    }
}
