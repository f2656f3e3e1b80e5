use anyhow::Context;
use calccore::math::MatrixHelper;
use calccore::prelude::Limits;
use ndarray::Array2;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Configuration for generating demo inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    pub list_len: usize,
    pub value_span: i64,
    pub matrix_dim: usize,
    pub even_count: usize,
    pub seed: u64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            list_len: 7,
            value_span: 100,
            matrix_dim: 3,
            even_count: 10,
            seed: 0,
        }
    }
}

/// One randomized input for each calculator.
#[derive(Debug, Clone)]
pub struct SampleSet {
    pub numbers: Vec<i64>,
    pub rank: usize,
    pub left: Array2<i64>,
    pub right: Array2<i64>,
    /// Same size as `left`; multiplying by it must give `left` back.
    pub identity: Array2<i64>,
    pub even_count: usize,
}

impl SampleConfig {
    /// Clamps sizes into what the runner will accept.
    pub fn fit_to(mut self, limits: &Limits) -> Self {
        self.list_len = self.list_len.clamp(1, limits.max_numbers.max(1));
        self.matrix_dim = self.matrix_dim.clamp(1, limits.max_matrix_dim.max(1));
        self.even_count = self.even_count.clamp(1, limits.max_even_count.max(1));
        self.value_span = self.value_span.max(1);
        self
    }
}

pub fn build_samples(config: &SampleConfig) -> anyhow::Result<SampleSet> {
    let dim = config.matrix_dim.max(1);
    let cells = dim
        .checked_mul(dim)
        .context("overflow computing matrix cell count for generator")?;

    let span = config.value_span.max(1);
    let mut rng = StdRng::seed_from_u64(config.seed);

    let numbers: Vec<i64> = (0..config.list_len.max(1))
        .map(|_| rng.gen_range(-span..=span))
        .collect();
    let rank = rng.gen_range(1..=numbers.len());
    let left = random_matrix(&mut rng, dim, cells)?;
    let right = random_matrix(&mut rng, dim, cells)?;

    Ok(SampleSet {
        numbers,
        rank,
        left,
        right,
        identity: MatrixHelper::identity(dim),
        even_count: config.even_count.max(1),
    })
}

fn random_matrix(rng: &mut StdRng, dim: usize, cells: usize) -> anyhow::Result<Array2<i64>> {
    let values: Vec<i64> = (0..cells).map(|_| rng.gen_range(-9..=9)).collect();
    Array2::from_shape_vec((dim, dim), values).context("shaping generated matrix")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generator_builds_requested_shapes() {
        let samples = build_samples(&SampleConfig::default()).unwrap();
        assert_eq!(samples.numbers.len(), 7);
        assert!((1..=7).contains(&samples.rank));
        assert_eq!(samples.left.dim(), (3, 3));
        assert_eq!(samples.right.dim(), (3, 3));
        assert_eq!(samples.identity.diag().to_vec(), vec![1, 1, 1]);
        assert_eq!(samples.identity.sum(), 3);
    }

    #[test]
    fn same_seed_repeats_samples() {
        let config = SampleConfig {
            seed: 42,
            ..Default::default()
        };
        let first = build_samples(&config).unwrap();
        let second = build_samples(&config).unwrap();
        assert_eq!(first.numbers, second.numbers);
        assert_eq!(first.left, second.left);
    }

    #[test]
    fn fit_to_respects_limits() {
        let limits = Limits {
            max_numbers: 4,
            max_matrix_dim: 2,
            max_even_count: 3,
        };
        let config = SampleConfig {
            list_len: 50,
            matrix_dim: 9,
            even_count: 0,
            ..Default::default()
        }
        .fit_to(&limits);
        assert_eq!(config.list_len, 4);
        assert_eq!(config.matrix_dim, 2);
        assert_eq!(config.even_count, 1);
    }
}
