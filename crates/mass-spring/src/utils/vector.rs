//! Helpers for 3-dimensional vectors stored as arrays.

use super::Real;

/// A point or direction in 3-dimensional space.
pub type Vector<T> = [T; 3];

/// The zero vector.
#[must_use]
pub fn zero<T: Real>() -> Vector<T> {
    [T::zero(); 3]
}

/// Returns `a + b`.
#[must_use]
pub fn add<T: Real>(a: &Vector<T>, b: &Vector<T>) -> Vector<T> {
    let mut out = *a;
    add_assign(&mut out, b);
    out
}

/// Adds `b` into `a` in place.
pub fn add_assign<T: Real>(a: &mut Vector<T>, b: &Vector<T>) {
    for (x, &y) in a.iter_mut().zip(b.iter()) {
        *x += y;
    }
}

/// Returns `a - b`.
#[must_use]
pub fn sub<T: Real>(a: &Vector<T>, b: &Vector<T>) -> Vector<T> {
    let mut out = *a;
    for (x, &y) in out.iter_mut().zip(b.iter()) {
        *x -= y;
    }
    out
}

/// Returns `v * s`.
#[must_use]
pub fn scale<T: Real>(v: &Vector<T>, s: T) -> Vector<T> {
    let mut out = *v;
    for x in &mut out {
        *x *= s;
    }
    out
}

/// Returns the dot product of `a` and `b`.
#[must_use]
pub fn dot<T: Real>(a: &Vector<T>, b: &Vector<T>) -> T {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum()
}

/// Returns the squared Euclidean norm of `v`.
#[must_use]
pub fn norm_squared<T: Real>(v: &Vector<T>) -> T {
    dot(v, v)
}

/// Returns the Euclidean norm of `v`.
#[must_use]
pub fn norm<T: Real>(v: &Vector<T>) -> T {
    norm_squared(v).sqrt()
}

/// Returns the Euclidean distance between `a` and `b`.
#[must_use]
pub fn distance<T: Real>(a: &Vector<T>, b: &Vector<T>) -> T {
    norm(&sub(a, b))
}

/// Returns `true` if every component of `v` is finite.
#[must_use]
pub fn is_finite<T: Real>(v: &Vector<T>) -> bool {
    v.iter().all(|x| x.is_finite())
}

/// Reflects `v` about the unit `normal`, i.e. `v - 2 (v · n) n`.
///
/// This is the closed form of `2 n (|-v| cos θ) - (-v)`, where θ is the angle between `-v` and `n`. Unlike the
/// trigonometric form, it is well-defined for a zero vector and does not lose precision when θ is near 0 or π.
#[must_use]
pub fn reflect<T: Real>(v: &Vector<T>, normal: &Vector<T>) -> Vector<T> {
    let two = T::one() + T::one();
    sub(v, &scale(normal, two * dot(v, normal)))
}
