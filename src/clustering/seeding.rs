use super::*;
use crate::Energy;
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::Error;
use rand::distr::weighted::WeightedIndex;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// Rows still eligible to become a center.
///
/// The dataset itself is never reordered or shrunk; the pool marks rows as
/// taken instead, so a sampled index always names the original row.
#[derive(Debug, Clone)]
pub struct Pool {
    available: Vec<bool>,
    remaining: usize,
}

impl Pool {
    pub fn new(n: usize) -> Self {
        Self {
            available: vec![true; n],
            remaining: n,
        }
    }
    /// number of rows still available
    pub fn len(&self) -> usize {
        self.remaining
    }
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }
    pub fn contains(&self, i: usize) -> bool {
        self.available[i]
    }
    /// mark a row as chosen. taking a row twice is a bookkeeping bug.
    pub fn take(&mut self, i: usize) {
        debug_assert!(self.available[i], "row {} already taken", i);
        self.available[i] = false;
        self.remaining -= 1;
    }
    /// the k-th available row, in row order
    pub fn nth(&self, k: usize) -> Option<usize> {
        self.available
            .iter()
            .enumerate()
            .filter(|(_, available)| **available)
            .map(|(i, _)| i)
            .nth(k)
    }
}

/// The seeded centers, in selection order, and the rows they were copied from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seeds {
    pub indices: Vec<usize>,
    pub centers: Vec<Point>,
    pub degeneracies: Vec<Degeneracy>,
}

/// k-means++ initialization.
///
/// The first center is drawn uniformly. Each further center is drawn from the
/// remaining rows with probability proportional to the distance to the
/// nearest center chosen so far, so rows that coincide with a center are
/// never drawn while any other candidate has positive weight. If every
/// remaining candidate has zero weight the draw is uniform over the pool.
///
/// The generator is injected so callers control reproducibility.
pub struct Seeding<'a> {
    dataset: &'a Dataset,
    k: usize,
}

impl<'a> Seeding<'a> {
    pub fn new(dataset: &'a Dataset, k: usize) -> Self {
        Self { dataset, k }
    }

    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<Seeds, ClusterError> {
        let n = self.dataset.n();
        if self.k == 0 || self.k > n {
            return Err(ClusterError::InvalidClusters { k: self.k, n });
        }
        let mut pool = Pool::new(n);
        let mut nearest = vec![Energy::INFINITY; n];
        let mut indices = Vec::with_capacity(self.k);
        let mut degeneracies = Vec::new();
        let first = rng.random_range(0..n);
        pool.take(first);
        indices.push(first);
        log::debug!("{:<32}{:<32}", "kmeans++ seed 0", first);
        while indices.len() < self.k {
            let round = indices.len();
            let newest = indices.last().copied().expect("at least one seed");
            self.shrink(&mut nearest, newest);
            let weights = self.weights(&pool, &nearest);
            let i = match WeightedIndex::<Energy>::new(weights.iter()) {
                Ok(weighted) => weighted.sample(rng),
                Err(Error::InsufficientNonZero) => {
                    log::warn!("{:<32}{:<32}", "kmeans++ zero weights", round);
                    degeneracies.push(Degeneracy::Sampling { round });
                    pool.nth(rng.random_range(0..pool.len()))
                        .expect("pool holds at least one row while k <= n")
                }
                Err(e) => return Err(e.into()),
            };
            pool.take(i);
            indices.push(i);
            log::debug!("{:<32}{:<32}", format!("kmeans++ seed {}", round), i);
        }
        let centers = indices
            .iter()
            .map(|&i| self.dataset.point(i).clone())
            .collect::<Vec<Point>>();
        Ok(Seeds {
            indices,
            centers,
            degeneracies,
        })
    }

    /// Sampling weight of every row: its nearest-center distance while it
    /// remains in the pool, zero otherwise. Weights are rescaled by their
    /// maximum whenever their total would overflow, and rows at infinite
    /// distance take all of the mass.
    fn weights(&self, pool: &Pool, nearest: &[Energy]) -> Vec<Energy> {
        let weights = (0..nearest.len())
            .map(|i| if pool.contains(i) { nearest[i] } else { 0. })
            .collect::<Vec<Energy>>();
        if weights.iter().any(|w| w.is_infinite()) {
            return weights
                .into_iter()
                .map(|w| if w.is_infinite() { 1. } else { 0. })
                .collect();
        }
        if weights.iter().sum::<Energy>().is_finite() {
            return weights;
        }
        let max = weights.iter().copied().fold(0., Energy::max);
        weights.into_iter().map(|w| w / max).collect()
    }

    /// Lower each row's nearest-center distance against the newest center.
    fn shrink(&self, nearest: &mut [Energy], newest: usize) {
        let center = self.dataset.point(newest);
        nearest
            .par_iter_mut()
            .zip(self.dataset.points().par_iter())
            .for_each(|(d, x)| *d = Energy::min(*d, distance(x, center)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn pool_tracks_remaining() {
        let mut pool = Pool::new(5);
        pool.take(1);
        pool.take(3);
        assert_eq!(pool.len(), 3);
        assert!(!pool.contains(1));
        assert_eq!(pool.nth(0), Some(0));
        assert_eq!(pool.nth(1), Some(2));
        assert_eq!(pool.nth(2), Some(4));
        assert_eq!(pool.nth(3), None);
        pool.take(0);
        pool.take(2);
        pool.take(4);
        assert!(pool.is_empty());
    }

    #[test]
    fn seeds_k_distinct_rows() {
        let data = Fixture::blobs(4, 25, 3);
        let ref mut rng = SmallRng::seed_from_u64(crate::SEED);
        let seeds = Seeding::new(&data, 7).run(rng).unwrap();
        assert_eq!(seeds.centers.len(), 7);
        assert_eq!(seeds.indices.len(), 7);
        let mut unique = seeds.indices.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 7);
        for (i, center) in seeds.indices.iter().zip(seeds.centers.iter()) {
            assert_eq!(data.point(*i), center);
        }
        assert!(seeds.degeneracies.is_empty());
    }

    #[test]
    fn same_seed_same_centers() {
        let data = Fixture::blobs(3, 40, 2);
        let a = Seeding::new(&data, 5)
            .run(&mut SmallRng::seed_from_u64(7))
            .unwrap();
        let b = Seeding::new(&data, 5)
            .run(&mut SmallRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn duplicates_of_a_center_are_never_drawn() {
        // four copies of the origin and one far point: once the origin is
        // chosen its copies weigh zero, and vice versa
        let data = Dataset::try_from(vec![
            vec![0., 0.],
            vec![0., 0.],
            vec![0., 0.],
            vec![0., 0.],
            vec![9., 9.],
        ])
        .unwrap();
        for seed in 0..32 {
            let seeds = Seeding::new(&data, 2)
                .run(&mut SmallRng::seed_from_u64(seed))
                .unwrap();
            assert_ne!(seeds.centers[0], seeds.centers[1]);
            assert!(seeds.degeneracies.is_empty());
        }
    }

    #[test]
    fn identical_points_fall_back_to_uniform() {
        let data = Dataset::try_from(vec![vec![1., 2.]; 6]).unwrap();
        let ref mut rng = SmallRng::seed_from_u64(crate::SEED);
        let seeds = Seeding::new(&data, 4).run(rng).unwrap();
        assert_eq!(seeds.centers, vec![Point::from([1., 2.]); 4]);
        assert_eq!(
            seeds.degeneracies,
            vec![
                Degeneracy::Sampling { round: 1 },
                Degeneracy::Sampling { round: 2 },
                Degeneracy::Sampling { round: 3 },
            ]
        );
        let mut unique = seeds.indices.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 4);
    }

    #[test]
    fn extreme_coordinates_are_sampled_without_overflow() {
        let data = Dataset::try_from(vec![vec![1e308], vec![-1e308], vec![0.]]).unwrap();
        for seed in 0..16 {
            let seeds = Seeding::new(&data, 2)
                .run(&mut SmallRng::seed_from_u64(seed))
                .unwrap();
            // opposite extremes lie at infinite distance from each other
            if seeds.indices[0] != 2 {
                assert_eq!(seeds.centers[1], Point::from([-seeds.centers[0].coords()[0]]));
            }
            assert!(seeds.degeneracies.is_empty());
        }
        let data = Dataset::try_from(vec![
            vec![1e200, 0.],
            vec![-1e200, 0.],
            vec![0., 0.],
            vec![1., 1.],
        ])
        .unwrap();
        let ref mut rng = SmallRng::seed_from_u64(crate::SEED);
        let seeds = Seeding::new(&data, 3).run(rng).unwrap();
        assert_eq!(seeds.centers.len(), 3);
    }

    #[test]
    fn may_exhaust_the_pool() {
        let data = Fixture::blobs(2, 3, 2);
        let ref mut rng = SmallRng::seed_from_u64(crate::SEED);
        let seeds = Seeding::new(&data, data.n()).run(rng).unwrap();
        let mut all = seeds.indices.clone();
        all.sort();
        assert_eq!(all, (0..data.n()).collect::<Vec<_>>());
    }

    #[test]
    fn rejects_more_centers_than_rows() {
        let data = Fixture::blobs(2, 2, 2);
        let ref mut rng = SmallRng::seed_from_u64(crate::SEED);
        assert_eq!(
            Seeding::new(&data, 5).run(rng).unwrap_err(),
            ClusterError::InvalidClusters { k: 5, n: 4 }
        );
    }
}
