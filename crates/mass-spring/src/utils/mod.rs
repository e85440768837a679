//! Utility types and functions for the crate.

mod real;
pub mod vector;

pub use real::Real;
pub use vector::Vector;

/// A Kahan-compensated running sum in `f64`.
///
/// Used to accumulate many small lengths without the rounding drift of a naive sum.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompensatedSum {
    /// The running total.
    sum: f64,
    /// The low-order bits lost from `sum`.
    compensation: f64,
}

impl CompensatedSum {
    /// Creates an empty sum.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            sum: 0.0,
            compensation: 0.0,
        }
    }

    /// Adds a value to the sum.
    pub fn add(&mut self, value: f64) {
        let y = value - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    /// Returns the current total.
    #[must_use]
    pub const fn total(&self) -> f64 {
        self.sum
    }
}

impl Extend<f64> for CompensatedSum {
    fn extend<I: IntoIterator<Item = f64>>(&mut self, iter: I) {
        for v in iter {
            self.add(v);
        }
    }
}
