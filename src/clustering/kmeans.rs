use super::*;
use crate::Energy;
use crate::KMEANS_DEFAULT_ITERATIONS;
use crate::KMEANS_MAX_ITERATIONS;
use crate::KMEANS_MIN_ITERATIONS;
use crate::SEED;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::Deserialize;
use serde::Serialize;

/// Knobs for a single clustering run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// number of clusters
    pub k: usize,
    /// cap on Lloyd passes
    pub iterations: usize,
    /// displacement below which the centers count as converged
    pub epsilon: Energy,
    /// k-means++ generator seed
    pub seed: u64,
}

impl Params {
    /// Default iteration cap and the fixed seed.
    pub fn new(k: usize, epsilon: Energy) -> Self {
        Self {
            k,
            iterations: KMEANS_DEFAULT_ITERATIONS,
            epsilon,
            seed: SEED,
        }
    }
    pub fn iterations(self, iterations: usize) -> Self {
        Self { iterations, ..self }
    }
    pub fn seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    /// Checks 1 < k < n, 1 < iterations < 1000, and 0 <= epsilon < ∞.
    pub fn validate(&self, n: usize) -> Result<(), ClusterError> {
        if self.k <= 1 || self.k >= n {
            return Err(ClusterError::InvalidClusters { k: self.k, n });
        }
        if self.iterations <= KMEANS_MIN_ITERATIONS || self.iterations >= KMEANS_MAX_ITERATIONS {
            return Err(ClusterError::InvalidIterations(self.iterations));
        }
        if !self.epsilon.is_finite() || self.epsilon < 0. {
            return Err(ClusterError::InvalidEpsilon(self.epsilon));
        }
        Ok(())
    }
}

/// Everything a clustering run produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// rows copied into the initial centers, in selection order
    pub seeds: Vec<usize>,
    pub initial: Vec<Point>,
    pub centers: Vec<Point>,
    pub history: Vec<Iteration>,
    pub phase: Phase,
    /// inertia of the final centers
    pub inertia: Energy,
    pub degeneracies: Vec<Degeneracy>,
}

impl Outcome {
    /// number of Lloyd passes performed
    pub fn iterations(&self) -> usize {
        self.history.len()
    }
    pub fn converged(&self) -> bool {
        self.phase == Phase::Converged
    }
}

/// k-means clustering: k-means++ seeding followed by Lloyd refinement.
///
/// Parameters are validated against the dataset up front, so a constructed
/// `KMeans` always runs to completion.
pub struct KMeans<'a> {
    dataset: &'a Dataset,
    params: Params,
}

impl<'a> KMeans<'a> {
    pub fn new(dataset: &'a Dataset, params: Params) -> Result<Self, ClusterError> {
        params.validate(dataset.n())?;
        Ok(Self { dataset, params })
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Cluster with the generator seeded from `params.seed`.
    pub fn fit(&self) -> Result<Outcome, ClusterError> {
        self.fit_with(&mut SmallRng::seed_from_u64(self.params.seed))
    }

    /// Cluster with a caller-supplied generator.
    pub fn fit_with<R: Rng>(&self, rng: &mut R) -> Result<Outcome, ClusterError> {
        log::info!("{:<32}{:<32}", "kmeans++ seeding", self.params.k);
        let seeds = Seeding::new(self.dataset, self.params.k).run(rng)?;
        log::info!("{:<32}{:<32}", "kmeans iterating", self.params.iterations);
        let mut lloyd = Lloyd::new(
            self.dataset,
            seeds.centers.clone(),
            self.params.iterations,
            self.params.epsilon,
        );
        let history = lloyd.run();
        let phase = lloyd.phase();
        let degeneracies = seeds
            .degeneracies
            .iter()
            .chain(lloyd.degeneracies().iter())
            .copied()
            .collect::<Vec<Degeneracy>>();
        let centers = lloyd.into_centers();
        let inertia = inertia(self.dataset, &centers);
        log::info!(
            "{:<32}{:<32}",
            format!("kmeans {} after {}", phase, history.len()),
            format!("{:.6}", inertia)
        );
        Ok(Outcome {
            seeds: seeds.indices,
            initial: seeds.centers,
            centers,
            history,
            phase,
            inertia,
            degeneracies,
        })
    }
}

/// Cluster `points` into `k` groups and return the final centers.
///
/// Validates the points and parameters before doing any work and uses the
/// fixed [`SEED`] for k-means++ sampling.
pub fn cluster(
    points: Vec<Point>,
    k: usize,
    iterations: usize,
    epsilon: Energy,
) -> Result<Vec<Point>, ClusterError> {
    let ref dataset = Dataset::try_from(points)?;
    let params = Params::new(k, epsilon).iterations(iterations);
    Ok(KMeans::new(dataset, params)?.fit()?.centers)
}
