use super::*;

/// Trait for k-means centroid computation via incremental aggregation.
///
/// Centers are rebuilt by folding assigned points into an accumulator:
/// start from `identity()`, `absorb()` every member, then read the result.
///
/// # Invariant
///
/// After absorbing N points the accumulator describes their centroid (mean).
pub trait Absorb {
    /// Returns the identity element for absorption.
    fn identity(&self) -> Self;
    /// Combines this accumulator with another point.
    fn absorb(self, other: &Point) -> Self;
}

/// Running coordinate sum and member count for one cluster.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    sum: Point,
    n: usize,
}

impl Centroid {
    pub fn empty(dimension: usize) -> Self {
        Self {
            sum: Point::zeros(dimension),
            n: 0,
        }
    }
    /// number of absorbed points
    pub fn n(&self) -> usize {
        self.n
    }
    /// coordinate-wise mean, or None if nothing was absorbed
    pub fn mean(self) -> Option<Point> {
        match self.n {
            0 => None,
            n => Some(self.sum.scale(n)),
        }
    }
}

impl Absorb for Centroid {
    fn identity(&self) -> Self {
        Self::empty(self.sum.dimension())
    }
    fn absorb(self, other: &Point) -> Self {
        Self {
            sum: self.sum.add(other),
            n: self.n + 1,
        }
    }
}
