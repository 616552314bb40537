// =============================================================================
// Rolling window accumulator
// =============================================================================
//
// Fixed-capacity ring buffer with a running sum and sum of squares, so every
// rolling indicator (SMA, RSI means, Bollinger std) costs O(1) per element
// and O(n) per series instead of O(n·w) full-window recomputation.
//
// Statistics are only emitted once the window is full — a partially filled
// window never produces a value.

use std::collections::VecDeque;

/// Mean and sample standard deviation of one full window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowStats {
    pub mean: f64,
    /// Sample standard deviation (ddof = 1). Zero for a window of length 1.
    pub std_dev: f64,
}

/// Fixed-capacity sliding accumulator over a numeric sequence.
#[derive(Debug)]
pub struct RollingWindow {
    capacity: usize,
    buf: VecDeque<f64>,
    sum: f64,
    sum_sq: f64,
}

impl RollingWindow {
    /// `capacity` is the window width. A zero-width window is degenerate and
    /// never emits statistics.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            buf: VecDeque::with_capacity(capacity + 1),
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Push the next value, evicting the oldest once at capacity. Returns the
    /// window statistics only when the window is full after this push; a
    /// zero-capacity window never produces a value.
    pub fn push(&mut self, value: f64) -> Option<WindowStats> {
        if self.capacity == 0 {
            return None;
        }
        self.buf.push_back(value);
        self.sum += value;
        self.sum_sq += value * value;

        if self.buf.len() > self.capacity {
            // Unwrap is safe: len > capacity >= 1.
            let evicted = self.buf.pop_front().expect("ring is non-empty");
            self.sum -= evicted;
            self.sum_sq -= evicted * evicted;
        }

        if self.buf.len() < self.capacity {
            return None;
        }

        let n = self.capacity as f64;
        let mean = self.sum / n;
        let std_dev = if self.capacity < 2 {
            0.0
        } else {
            // Running-sum variance can go fractionally negative from
            // floating-point cancellation; clamp before the sqrt.
            let variance = (self.sum_sq - self.sum * self.sum / n) / (n - 1.0);
            variance.max(0.0).sqrt()
        };

        Some(WindowStats { mean, std_dev })
    }
}
