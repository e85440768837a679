//! A trait for the scalar type of the simulation.

use core::fmt::{Debug, Display};

/// A trait for types that can be used as scalars in the mass-spring system.
///
/// We provide a blanket implementation for all types that satisfy the trait bounds. This includes `f32` and `f64`.
pub trait Real:
    Copy
    + Debug
    + Display
    + Default
    + Send
    + Sync
    + num_traits::Float
    + num_traits::NumAssign
    + num_traits::FromPrimitive
    + num_traits::ToPrimitive
    + std::iter::Sum
{
    /// Returns half of the value.
    #[must_use]
    fn half(self) -> Self {
        self / (Self::one() + Self::one())
    }

    /// Converts an `f64` literal into this type.
    ///
    /// Every `Float` type can represent an `f64` approximately, so this falls back to `NaN` only for types that cannot.
    #[must_use]
    fn from_f64_lossy(value: f64) -> Self {
        <Self as num_traits::FromPrimitive>::from_f64(value).unwrap_or_else(Self::nan)
    }

    /// Converts the value to an `f64`, returning `NaN` if that is impossible.
    #[must_use]
    fn as_f64(self) -> f64 {
        <Self as num_traits::ToPrimitive>::to_f64(&self).unwrap_or(f64::NAN)
    }
}

/// Blanket implementation of `Real` for all types that satisfy the trait bounds.
impl<T> Real for T where
    T: Copy
        + Debug
        + Display
        + Default
        + Send
        + Sync
        + num_traits::Float
        + num_traits::NumAssign
        + num_traits::FromPrimitive
        + num_traits::ToPrimitive
        + std::iter::Sum
{
}
