use crate::Coordinate;
use serde::Deserialize;
use serde::Serialize;

/// A point in D-dimensional Euclidean space.
///
/// Data points are immutable once loaded. Centers share the same type and are
/// replaced wholesale by the refinement step rather than edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<Coordinate>);

impl Point {
    /// the origin of D-dimensional space
    pub fn zeros(dimension: usize) -> Self {
        Self(vec![0.; dimension])
    }
    /// number of coordinates
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    pub fn coords(&self) -> &[Coordinate] {
        &self.0
    }
    /// coordinate-wise sum, used to accumulate cluster means
    pub fn add(mut self, other: &Self) -> Self {
        debug_assert!(self.dimension() == other.dimension());
        self.0
            .iter_mut()
            .zip(other.0.iter())
            .for_each(|(a, b)| *a += b);
        self
    }
    /// coordinate-wise division by a positive count
    pub fn scale(mut self, divisor: usize) -> Self {
        debug_assert!(divisor > 0);
        let divisor = divisor as Coordinate;
        self.0.iter_mut().for_each(|a| *a /= divisor);
        self
    }
}

impl From<Vec<Coordinate>> for Point {
    fn from(coords: Vec<Coordinate>) -> Self {
        Self(coords)
    }
}

impl From<Point> for Vec<Coordinate> {
    fn from(point: Point) -> Self {
        point.0
    }
}

impl<const D: usize> From<[Coordinate; D]> for Point {
    fn from(coords: [Coordinate; D]) -> Self {
        Self(coords.to_vec())
    }
}

/// Comma-separated coordinates at four decimals.
impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let line = self
            .0
            .iter()
            .map(|x| format!("{:.4}", x))
            .collect::<Vec<String>>()
            .join(",");
        write!(f, "{}", line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_four_decimals() {
        let point = Point::from([1., -0.5, 2.123456]);
        assert_eq!(point.to_string(), "1.0000,-0.5000,2.1235");
    }

    #[test]
    fn add_then_scale_is_mean() {
        let mean = Point::zeros(2)
            .add(&Point::from([1., 2.]))
            .add(&Point::from([3., 6.]))
            .scale(2);
        assert_eq!(mean, Point::from([2., 4.]));
    }
}
