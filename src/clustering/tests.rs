use super::*;
use crate::Coordinate;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;

/// Test fixture generating well-separated blobs.
///
/// Blob j is centered at 10·j on every axis and jittered uniformly in
/// [-1, 1), so blobs never overlap. Generation is seeded, so every call with
/// the same shape returns the same dataset.
pub struct Fixture;

impl Fixture {
    /// `k` blobs of `per` points each in `d` dimensions, blob-major order.
    pub fn blobs(k: usize, per: usize, d: usize) -> Dataset {
        let ref mut rng = SmallRng::seed_from_u64((k * 1_000_000 + per * 1_000 + d) as u64);
        (0..k)
            .flat_map(|j| std::iter::repeat(j).take(per))
            .map(|j| {
                (0..d)
                    .map(|_| 10. * j as Coordinate + rng.random_range(-1.0..1.0))
                    .collect::<Vec<Coordinate>>()
            })
            .collect::<Vec<Vec<Coordinate>>>()
            .try_into()
            .expect("blobs are rectangular and finite")
    }
}
