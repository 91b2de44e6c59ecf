use super::*;
use crate::Energy;

/// Squared Euclidean distance. Points must share dimensionality.
/// Saturates to infinity for coordinates beyond roughly 1e154.
pub fn squared(a: &Point, b: &Point) -> Energy {
    debug_assert!(a.dimension() == b.dimension(), "dimension mismatch");
    a.coords()
        .iter()
        .zip(b.coords().iter())
        .map(|(x, y)| x - y)
        .map(|d| d * d)
        .sum::<Energy>()
}

/// Euclidean (L2) distance. Points must share dimensionality.
///
/// Differences are halved and rescaled by their largest magnitude before
/// squaring, so any two finite points have a finite distance unless the
/// result itself exceeds `f64::MAX`.
pub fn distance(a: &Point, b: &Point) -> Energy {
    debug_assert!(a.dimension() == b.dimension(), "dimension mismatch");
    let halves = || {
        a.coords()
            .iter()
            .zip(b.coords().iter())
            .map(|(x, y)| x / 2. - y / 2.)
    };
    let scale = halves().map(Energy::abs).fold(0., Energy::max);
    if scale == 0. {
        return 0.;
    }
    2. * scale * halves().map(|h| h / scale).map(|r| r * r).sum::<Energy>().sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pythagorean_triple() {
        let a = Point::from([0., 0.]);
        let b = Point::from([3., 4.]);
        assert_eq!(distance(&a, &b), 5.);
        assert_eq!(squared(&a, &b), 25.);
    }

    #[test]
    fn symmetric_and_zero_on_self() {
        let a = Point::from([1.5, -2., 7.]);
        let b = Point::from([-4., 0.25, 3.]);
        assert_eq!(distance(&a, &b), distance(&b, &a));
        assert_eq!(distance(&a, &a), 0.);
    }

    #[test]
    fn extreme_coordinates_stay_finite() {
        let a = Point::from([1e200, 0.]);
        let b = Point::from([-1e200, 0.]);
        assert_eq!(distance(&a, &b), 2e200);
        let c = Point::from([3e300, -4e300]);
        let d = Point::from([0., 0.]);
        assert!((distance(&c, &d) / 5e300 - 1.).abs() < 1e-12);
        assert_eq!(distance(&Point::from([f64::MAX]), &Point::from([0.])), f64::MAX);
    }
}
