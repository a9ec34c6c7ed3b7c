//! RNG reel generator

use std::collections::BTreeMap;

use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::grid::{Grid, GridSpec};
use crate::symbols::Symbol;

/// How each grid cell picks its symbol
///
/// `Uniform` gives every symbol the same chance regardless of its pay tier.
/// `Weighted` draws proportionally to a per-symbol weight; symbols missing
/// from the map never appear.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ReelDistribution {
    #[default]
    Uniform,
    Weighted { weights: BTreeMap<Symbol, f64> },
}

impl ReelDistribution {
    /// Weights in [`Symbol::ALL`] order
    pub fn weight_vector(&self) -> Vec<f64> {
        match self {
            ReelDistribution::Uniform => vec![1.0; Symbol::COUNT],
            ReelDistribution::Weighted { weights } => Symbol::ALL
                .iter()
                .map(|s| weights.get(s).copied().unwrap_or(0.0))
                .collect(),
        }
    }

    /// Probability of `symbol` landing in a single cell
    pub fn probability(&self, symbol: Symbol) -> f64 {
        let weights = self.weight_vector();
        let total: f64 = weights.iter().sum();
        if total > 0.0 {
            weights[symbol.index()] / total
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
enum Sampler {
    Uniform,
    Weighted(WeightedIndex<f64>),
}

/// Produces fresh grids from an injected random source
#[derive(Debug, Clone)]
pub struct ReelGenerator {
    spec: GridSpec,
    sampler: Sampler,
}

impl ReelGenerator {
    /// Uniform generator for a layout
    pub fn uniform(spec: GridSpec) -> CoreResult<Self> {
        Self::new(spec, &ReelDistribution::Uniform)
    }

    pub fn new(spec: GridSpec, distribution: &ReelDistribution) -> CoreResult<Self> {
        if spec.rows == 0 || spec.cols == 0 {
            return Err(CoreError::EmptyGrid);
        }

        let sampler = match distribution {
            ReelDistribution::Uniform => Sampler::Uniform,
            ReelDistribution::Weighted { .. } => {
                let weights = distribution.weight_vector();
                if weights.iter().any(|w| !w.is_finite()) {
                    return Err(CoreError::InvalidWeights(format!(
                        "weights must be finite, got {weights:?}"
                    )));
                }
                let index = WeightedIndex::new(&weights)
                    .map_err(|e| CoreError::InvalidWeights(e.to_string()))?;
                Sampler::Weighted(index)
            }
        };

        Ok(Self { spec, sampler })
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    /// Draw a single symbol
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Symbol {
        let index = match &self.sampler {
            Sampler::Uniform => rng.random_range(0..Symbol::COUNT),
            Sampler::Weighted(index) => index.sample(rng),
        };
        Symbol::ALL[index]
    }

    /// Generate a full grid, every cell drawn independently
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Grid {
        let rows = (0..self.spec.rows)
            .map(|_| (0..self.spec.cols).map(|_| self.draw(rng)).collect())
            .collect();
        Grid::from_rows_unchecked(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_generated_shape() {
        let generator = ReelGenerator::uniform(GridSpec::standard_3x5()).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let grid = generator.generate(&mut rng);
            assert_eq!(grid.row_count(), 3);
            assert!(grid.rows().iter().all(|row| row.len() == 5));
        }
    }

    #[test]
    fn test_seeded_generation_repeats() {
        let generator = ReelGenerator::uniform(GridSpec { rows: 4, cols: 6 }).unwrap();
        let a = generator.generate(&mut StdRng::seed_from_u64(99));
        let b = generator.generate(&mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_uniform_covers_every_symbol() {
        let generator = ReelGenerator::uniform(GridSpec::standard_3x5()).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let mut seen = [false; Symbol::COUNT];
        for _ in 0..200 {
            for row in generator.generate(&mut rng).rows() {
                for s in row {
                    seen[s.index()] = true;
                }
            }
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_weighted_excludes_zero_weight() {
        let weights = [(Symbol::Cherry, 3.0), (Symbol::Seven, 1.0)]
            .into_iter()
            .collect();
        let generator = ReelGenerator::new(
            GridSpec::standard_3x5(),
            &ReelDistribution::Weighted { weights },
        )
        .unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let grid = generator.generate(&mut rng);
            assert!(
                grid.rows()
                    .iter()
                    .flatten()
                    .all(|s| matches!(s, Symbol::Cherry | Symbol::Seven))
            );
        }
    }

    #[test]
    fn test_all_zero_weights_rejected() {
        let dist = ReelDistribution::Weighted {
            weights: BTreeMap::new(),
        };
        let err = ReelGenerator::new(GridSpec::standard_3x5(), &dist).unwrap_err();
        assert!(matches!(err, CoreError::InvalidWeights(_)));
    }

    #[test]
    fn test_empty_spec_rejected() {
        let err = ReelGenerator::uniform(GridSpec { rows: 0, cols: 5 }).unwrap_err();
        assert_eq!(err, CoreError::EmptyGrid);
    }

    #[test]
    fn test_probability() {
        assert!((ReelDistribution::Uniform.probability(Symbol::Bar) - 1.0 / 7.0).abs() < 1e-12);
        let weights = [(Symbol::Bell, 1.0), (Symbol::Plum, 3.0)].into_iter().collect();
        let dist = ReelDistribution::Weighted { weights };
        assert_eq!(dist.probability(Symbol::Plum), 0.75);
        assert_eq!(dist.probability(Symbol::Seven), 0.0);
    }
}
