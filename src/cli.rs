use crate::*;
use clap::Parser;
use std::path::PathBuf;

/// kmeanspp K [ITER] EPSILON FILE1 FILE2
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Cluster the inner join of two keyed tables with k-means++",
    long_about = None
)]
pub struct Args {
    /// K [ITER] EPSILON FILE1 FILE2, where ITER defaults to 300
    #[arg(
        value_name = "ARGS",
        required = true,
        num_args = 4..=5,
        allow_negative_numbers = true
    )]
    pub positional: Vec<String>,
    /// k-means++ generator seed
    #[arg(long, default_value_t = SEED)]
    pub seed: u64,
    /// log every seeding round and iteration
    #[arg(long, short)]
    pub verbose: bool,
    /// print the full outcome as JSON
    #[arg(long)]
    pub json: bool,
}

/// The user-facing reasons an invocation is rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Usage {
    Clusters,
    Iterations,
    Epsilon,
}

impl std::fmt::Display for Usage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Clusters => write!(f, "Invalid number of clusters!"),
            Self::Iterations => write!(f, "Invalid maximum iteration!"),
            Self::Epsilon => write!(f, "Invalid epsilon!"),
        }
    }
}

impl std::error::Error for Usage {}

/// One-line message shown to the user for a failed run.
pub fn headline(error: &anyhow::Error) -> String {
    if let Some(usage) = error.downcast_ref::<Usage>() {
        return usage.to_string();
    }
    match error.downcast_ref::<ClusterError>() {
        Some(ClusterError::InvalidClusters { .. }) => Usage::Clusters.to_string(),
        Some(ClusterError::InvalidIterations(_)) => Usage::Iterations.to_string(),
        Some(ClusterError::InvalidEpsilon(_)) => Usage::Epsilon.to_string(),
        _ => String::from("An Error has Occurred"),
    }
}

/// A parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub params: Params,
    pub left: PathBuf,
    pub right: PathBuf,
    pub json: bool,
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;
    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let (k, iterations, epsilon, left, right) = match args.positional.as_slice() {
            [k, epsilon, left, right] => (k, None, epsilon, left, right),
            [k, iterations, epsilon, left, right] => (k, Some(iterations), epsilon, left, right),
            other => {
                return Err(anyhow::anyhow!(
                    "expected 4 or 5 arguments, got {}",
                    other.len()
                ));
            }
        };
        let k = k.parse::<usize>().map_err(|_| Usage::Clusters)?;
        let iterations = iterations
            .map(|t| t.parse::<usize>())
            .transpose()
            .map_err(|_| Usage::Iterations)?
            .unwrap_or(KMEANS_DEFAULT_ITERATIONS);
        let epsilon = epsilon.parse::<Energy>().map_err(|_| Usage::Epsilon)?;
        Ok(Self {
            params: Params::new(k, epsilon)
                .iterations(iterations)
                .seed(args.seed),
            left: PathBuf::from(left),
            right: PathBuf::from(right),
            json: args.json,
        })
    }
}

impl Config {
    /// Load, join, and cluster.
    pub fn run(&self) -> anyhow::Result<Outcome> {
        let left = Table::read(&self.left)?;
        let right = Table::read(&self.right)?;
        let ref dataset = join(&left, &right)?;
        log::info!(
            "{:<32}{:<32}",
            "clustering",
            format!("n = {} d = {}", dataset.n(), dataset.dimension())
        );
        Ok(KMeans::new(dataset, self.params)?.fit()?)
    }

    /// Text to print on success.
    pub fn render(&self, outcome: &Outcome) -> anyhow::Result<String> {
        if self.json {
            return Ok(serde_json::to_string_pretty(outcome)?);
        }
        let seeds = outcome
            .seeds
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<String>>()
            .join(",");
        Ok(std::iter::once(seeds)
            .chain(outcome.centers.iter().map(|c| c.to_string()))
            .collect::<Vec<String>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(argv: &[&str]) -> anyhow::Result<Config> {
        let args = Args::try_parse_from(std::iter::once("kmeanspp").chain(argv.iter().copied()))?;
        Config::try_from(args)
    }

    fn fixture(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kmeanspp-{}-{}.txt", std::process::id(), name));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn iterations_are_optional() {
        let four = config(&["3", "0.01", "a.txt", "b.txt"]).unwrap();
        assert_eq!(four.params.k, 3);
        assert_eq!(four.params.iterations, KMEANS_DEFAULT_ITERATIONS);
        assert_eq!(four.params.epsilon, 0.01);
        assert_eq!(four.params.seed, SEED);
        assert_eq!(four.left, PathBuf::from("a.txt"));
        assert_eq!(four.right, PathBuf::from("b.txt"));
        let five = config(&["3", "50", "0.01", "a.txt", "b.txt", "--seed", "9"]).unwrap();
        assert_eq!(five.params.iterations, 50);
        assert_eq!(five.params.seed, 9);
    }

    #[test]
    fn arity_is_enforced() {
        assert!(config(&["3", "0.01", "a.txt"]).is_err());
        assert!(config(&["3", "50", "0.01", "a.txt", "b.txt", "c.txt"]).is_err());
    }

    #[test]
    fn non_integers_are_usage_errors() {
        let e = config(&["3.5", "0.01", "a.txt", "b.txt"]).unwrap_err();
        assert_eq!(headline(&e), "Invalid number of clusters!");
        let e = config(&["3", "ten", "0.01", "a.txt", "b.txt"]).unwrap_err();
        assert_eq!(headline(&e), "Invalid maximum iteration!");
        let e = config(&["3", "x", "a.txt", "b.txt"]).unwrap_err();
        assert_eq!(headline(&e), "Invalid epsilon!");
    }

    #[test]
    fn negative_epsilon_parses_but_fails_validation() {
        let c = config(&["2", "-0.5", "a.txt", "b.txt"]).unwrap();
        assert_eq!(c.params.epsilon, -0.5);
        let ref data = Dataset::try_from(vec![vec![0.], vec![1.], vec![2.]]).unwrap();
        let e = anyhow::Error::from(KMeans::new(data, c.params).err().unwrap());
        assert_eq!(headline(&e), "Invalid epsilon!");
    }

    #[test]
    fn end_to_end() {
        let left = fixture("left", "3,10,1\n0,0,0\n1,0,1\n2,10,0\n");
        let right = fixture("right", "0,5\n1,5\n2,5\n3,5\n4,5\n");
        let c = config(&[
            "2",
            "300",
            "0.0001",
            left.to_str().unwrap(),
            right.to_str().unwrap(),
        ])
        .unwrap();
        let outcome = c.run().unwrap();
        std::fs::remove_file(&left).unwrap();
        std::fs::remove_file(&right).unwrap();
        assert_eq!(outcome.centers.len(), 2);
        assert!(outcome.converged());
        assert!(outcome.centers.iter().all(|p| p.dimension() == 3));
        let text = c.render(&outcome).unwrap();
        let lines = text.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].split(',').count(), 2);
        assert!(lines[1..].iter().all(|l| l.ends_with(",5.0000")));
    }

    #[test]
    fn missing_file_is_generic() {
        let c = config(&["2", "0.1", "/nonexistent/a", "/nonexistent/b"]).unwrap();
        let e = c.run().unwrap_err();
        assert_eq!(headline(&e), "An Error has Occurred");
    }

    #[test]
    fn k_out_of_range_is_a_usage_error() {
        let left = fixture("range-left", "0,1\n1,2\n");
        let right = fixture("range-right", "0,1\n1,2\n");
        let c = config(&["2", "0.1", left.to_str().unwrap(), right.to_str().unwrap()]).unwrap();
        let e = c.run().unwrap_err();
        std::fs::remove_file(&left).unwrap();
        std::fs::remove_file(&right).unwrap();
        assert_eq!(headline(&e), "Invalid number of clusters!");
    }
}
