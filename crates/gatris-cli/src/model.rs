use std::collections::BTreeMap;

use anyhow::{Context as _, bail};
use chrono::{DateTime, Utc};
use gatris_engine::BoardConfig;
use gatris_evaluator::{Feature, WEIGHT_COUNT, Weights};
use gatris_training::TrainingOutcome;
use serde::{Deserialize, Serialize};

/// Trained weights as saved by `gatris train`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct WeightsModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f64,
    pub generations: usize,
    pub board: BoardConfig,
    /// Weight per feature, keyed by [`Feature::name`].
    pub weights: BTreeMap<String, f64>,
}

impl WeightsModel {
    pub fn from_outcome(name: String, board: BoardConfig, outcome: &TrainingOutcome) -> Self {
        let weights = outcome
            .best
            .weights()
            .iter()
            .map(|(feature, value)| (feature.name().to_owned(), value))
            .collect();
        Self {
            name,
            trained_at: Utc::now(),
            final_fitness: outcome.best.fitness(),
            generations: outcome.generations,
            board,
            weights,
        }
    }

    pub fn to_weights(&self) -> anyhow::Result<Weights> {
        for name in self.weights.keys() {
            if Feature::from_name(name).is_none() {
                bail!("Unknown feature `{name}` in model {}", self.name);
            }
        }
        let mut values = [0.0; WEIGHT_COUNT];
        for feature in Feature::ALL {
            values[feature.index()] = *self
                .weights
                .get(feature.name())
                .with_context(|| {
                    format!("Model {} has no `{}` weight", self.name, feature.name())
                })?;
        }
        Ok(Weights::new(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(weights: Weights) -> WeightsModel {
        WeightsModel {
            name: "test".to_owned(),
            trained_at: DateTime::UNIX_EPOCH,
            final_fitness: 1.0,
            generations: 1,
            board: BoardConfig::default(),
            weights: weights
                .iter()
                .map(|(feature, value)| (feature.name().to_owned(), value))
                .collect(),
        }
    }

    #[test]
    fn test_weights_roundtrip_through_json() {
        let model = model(Weights::REFERENCE);
        let json = serde_json::to_string(&model).unwrap();
        assert!(json.contains(r#""landing_height":"#));
        let back: WeightsModel = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_weights().unwrap(), Weights::REFERENCE);
    }

    #[test]
    fn test_missing_and_unknown_features() {
        let mut missing = model(Weights::ZERO);
        missing.weights.remove("holes");
        assert!(missing.to_weights().is_err());

        let mut unknown = model(Weights::ZERO);
        unknown.weights.insert("bumpiness".to_owned(), 1.0);
        assert!(unknown.to_weights().is_err());
    }
}
