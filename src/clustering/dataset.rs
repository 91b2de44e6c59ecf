use super::*;
use crate::Coordinate;

/// A validated, row-aligned collection of points.
///
/// Rows are indexed 0..N in load order. Every row has the same dimensionality
/// D > 0 and only finite coordinates, so the clustering engine never has to
/// re-check either.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    dimension: usize,
    points: Vec<Point>,
}

impl Dataset {
    pub fn n(&self) -> usize {
        self.points.len()
    }
    pub fn dimension(&self) -> usize {
        self.dimension
    }
    pub fn points(&self) -> &[Point] {
        &self.points
    }
    pub fn point(&self, i: usize) -> &Point {
        &self.points[i]
    }
}

impl TryFrom<Vec<Point>> for Dataset {
    type Error = ClusterError;
    fn try_from(points: Vec<Point>) -> Result<Self, Self::Error> {
        let dimension = points
            .first()
            .map(Point::dimension)
            .ok_or(ClusterError::EmptyDataset)?;
        if dimension == 0 {
            return Err(ClusterError::ZeroDimension);
        }
        for (row, point) in points.iter().enumerate() {
            if point.dimension() != dimension {
                return Err(ClusterError::DimensionMismatch {
                    row,
                    expected: dimension,
                    found: point.dimension(),
                });
            }
            if let Some(column) = point.coords().iter().position(|x| !x.is_finite()) {
                return Err(ClusterError::NonFinite { row, column });
            }
        }
        Ok(Self { dimension, points })
    }
}

impl TryFrom<Vec<Vec<Coordinate>>> for Dataset {
    type Error = ClusterError;
    fn try_from(rows: Vec<Vec<Coordinate>>) -> Result<Self, Self::Error> {
        Self::try_from(rows.into_iter().map(Point::from).collect::<Vec<_>>())
    }
}
