use super::*;
use crate::Energy;
use rayon::prelude::*;
use serde::Deserialize;
use serde::Serialize;

/// Where a refinement run stands.
///
/// `Seeded → Iterating → Converged | Exhausted`. Both terminal phases hold
/// the final centers; they differ only in why the loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Seeded,
    Iterating,
    /// The largest center displacement fell strictly below epsilon.
    Converged,
    /// The iteration cap was reached first.
    Exhausted,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Converged | Self::Exhausted)
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seeded => write!(f, "seeded"),
            Self::Iterating => write!(f, "iterating"),
            Self::Converged => write!(f, "converged"),
            Self::Exhausted => write!(f, "exhausted"),
        }
    }
}

/// Diagnostics for one assignment-and-update pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Iteration {
    /// 1-based pass number
    pub index: usize,
    /// sum of squared distances to the centers the pass started from
    pub inertia: Energy,
    /// largest distance any center moved during the pass
    pub displacement: Energy,
}

/// Lloyd's algorithm over a borrowed dataset.
///
/// Each pass assigns every point to its nearest center (ties go to the lowest
/// center index), moves every center to the mean of its points, and stops
/// once no center moved by epsilon or more, or after `iterations` passes.
/// A center that receives no points stays where it is.
///
/// The engine is an [`Iterator`] over passes, so callers can watch inertia
/// fall or just drain it with [`Lloyd::run`].
pub struct Lloyd<'a> {
    dataset: &'a Dataset,
    centers: Vec<Point>,
    iterations: usize,
    epsilon: Energy,
    phase: Phase,
    t: usize,
    degeneracies: Vec<Degeneracy>,
}

impl<'a> Lloyd<'a> {
    /// Centers must share the dataset's dimensionality.
    pub fn new(
        dataset: &'a Dataset,
        centers: Vec<Point>,
        iterations: usize,
        epsilon: Energy,
    ) -> Self {
        debug_assert!(!centers.is_empty());
        debug_assert!(centers.iter().all(|c| c.dimension() == dataset.dimension()));
        Self {
            dataset,
            centers,
            iterations,
            epsilon,
            phase: Phase::Seeded,
            t: 0,
            degeneracies: Vec::new(),
        }
    }

    pub fn k(&self) -> usize {
        self.centers.len()
    }
    pub fn t(&self) -> usize {
        self.t
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn centers(&self) -> &[Point] {
        &self.centers
    }
    pub fn degeneracies(&self) -> &[Degeneracy] {
        &self.degeneracies
    }
    pub fn into_centers(self) -> Vec<Point> {
        self.centers
    }

    /// Drive the engine to a terminal phase, returning every pass.
    pub fn run(&mut self) -> Vec<Iteration> {
        self.by_ref().collect()
    }

    /// Finds the nearest center for a point in O(K).
    pub fn neighbor(&self, x: &Point) -> (usize, Energy) {
        self.centers
            .iter()
            .enumerate()
            .map(|(j, c)| (j, distance(x, c)))
            .fold((0, Energy::INFINITY), |best, next| {
                if next.1 < best.1 { next } else { best }
            })
    }

    /// Nearest center and its distance for every point, in row order.
    pub fn assign(&self) -> Vec<(usize, Energy)> {
        self.dataset
            .points()
            .par_iter()
            .map(|x| self.neighbor(x))
            .collect::<Vec<_>>()
    }

    /// Mean of each cluster; empty clusters keep their current center.
    fn centroids(&mut self, assignments: &[(usize, Energy)]) -> Vec<Point> {
        let mut members = vec![Vec::new(); self.k()];
        for (i, (nearest, _)) in assignments.iter().enumerate() {
            members[*nearest].push(i);
        }
        let d = self.dataset.dimension();
        members
            .into_iter()
            .map(|rows| {
                rows.into_iter()
                    .map(|i| self.dataset.point(i))
                    .fold(Centroid::empty(d), Centroid::absorb)
                    .mean()
            })
            .collect::<Vec<Option<Point>>>()
            .into_iter()
            .enumerate()
            .map(|(j, mean)| match mean {
                Some(center) => center,
                None => {
                    let degeneracy = Degeneracy::EmptyCluster {
                        iteration: self.t + 1,
                        center: j,
                    };
                    log::warn!("{:<32}{:<32}", "kmeans empty cluster", degeneracy);
                    self.degeneracies.push(degeneracy);
                    self.centers[j].clone()
                }
            })
            .collect::<Vec<Point>>()
    }

    /// Executes one assignment-and-update pass and advances the phase.
    pub fn step(&mut self) -> Iteration {
        self.phase = Phase::Iterating;
        let assignments = self.assign();
        let inertia = assignments
            .iter()
            .map(|(_, d)| d * d)
            .sum::<Energy>();
        let centers = self.centroids(&assignments);
        let displacement = self
            .centers
            .iter()
            .zip(centers.iter())
            .map(|(old, new)| distance(old, new))
            .fold(0., Energy::max);
        self.centers = centers;
        self.t += 1;
        self.phase = if displacement < self.epsilon || displacement == 0. {
            Phase::Converged
        } else if self.t >= self.iterations {
            Phase::Exhausted
        } else {
            Phase::Iterating
        };
        log::debug!(
            "{:<32}{:<32}",
            format!("kmeans iteration {:3}", self.t),
            format!("{:.6} {:.6}", inertia, displacement)
        );
        Iteration {
            index: self.t,
            inertia,
            displacement,
        }
    }
}

impl Iterator for Lloyd<'_> {
    type Item = Iteration;
    fn next(&mut self) -> Option<Self::Item> {
        if self.phase.is_terminal() {
            None
        } else {
            Some(self.step())
        }
    }
}

/// Sum of squared distances from each point to its nearest center.
pub fn inertia(dataset: &Dataset, centers: &[Point]) -> Energy {
    dataset
        .points()
        .iter()
        .map(|x| {
            centers
                .iter()
                .map(|c| squared(x, c))
                .fold(Energy::INFINITY, Energy::min)
        })
        .sum::<Energy>()
}
