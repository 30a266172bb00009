use std::{fmt, ops::Index};

use serde::{Deserialize, Serialize};

/// Number of heuristic features, and therefore of weights.
pub const WEIGHT_COUNT: usize = 6;

/// A weight vector whose length is not [`WEIGHT_COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("expected {WEIGHT_COUNT} weights, got {len}")]
pub struct WeightCountError {
    pub len: usize,
}

/// Heuristic features in weight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    LandingHeight,
    MeltedLines,
    RowTransitions,
    ColumnTransitions,
    Holes,
    WellSums,
}

impl Feature {
    pub const ALL: [Self; WEIGHT_COUNT] = [
        Feature::LandingHeight,
        Feature::MeltedLines,
        Feature::RowTransitions,
        Feature::ColumnTransitions,
        Feature::Holes,
        Feature::WellSums,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Stable snake_case name used in saved models.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Feature::LandingHeight => "landing_height",
            Feature::MeltedLines => "melted_lines",
            Feature::RowTransitions => "row_transitions",
            Feature::ColumnTransitions => "column_transitions",
            Feature::Holes => "holes",
            Feature::WellSums => "well_sums",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|feature| feature.name() == name)
    }
}

/// One weight per [`Feature`], in [`Feature::ALL`] order.
///
/// Weights are plain values: copying a `Weights` never shares storage, so
/// individuals in a population can be mutated independently.
///
/// # Example
///
/// ```
/// use gatris_evaluator::{Feature, Weights};
///
/// let weights = Weights::try_from(vec![-0.5, 1.0, -0.25, -1.0, -0.125, -0.2]).unwrap();
/// assert_eq!(weights[Feature::MeltedLines], 1.0);
/// assert!(Weights::try_from(vec![1.0; 5]).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weights([f64; WEIGHT_COUNT]);

impl Weights {
    /// A weight vector known to play well on the standard 10 × 20 board.
    pub const REFERENCE: Self = Self([
        -0.394_136_045_545_080_86,
        1.271_929_594_962_682_3,
        -0.227_151_731_996_055_62,
        -1.070_933_670_013_230_4,
        -0.127_347_573_340_044_57,
        -0.186_365_896_568_746_55,
    ]);

    /// All weights zero: every placement scores 0.
    pub const ZERO: Self = Self([0.0; WEIGHT_COUNT]);

    #[must_use]
    pub const fn new(values: [f64; WEIGHT_COUNT]) -> Self {
        Self(values)
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; WEIGHT_COUNT] {
        &self.0
    }

    pub fn as_array_mut(&mut self) -> &mut [f64; WEIGHT_COUNT] {
        &mut self.0
    }

    /// Weighted sum of feature values given in [`Feature::ALL`] order.
    #[must_use]
    pub fn dot(&self, values: &[f64; WEIGHT_COUNT]) -> f64 {
        self.0.iter().zip(values).map(|(w, v)| w * v).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().zip(self.0.iter().copied())
    }
}

impl Index<Feature> for Weights {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.0[feature.index()]
    }
}

impl TryFrom<&[f64]> for Weights {
    type Error = WeightCountError;

    fn try_from(values: &[f64]) -> Result<Self, Self::Error> {
        let values = <[f64; WEIGHT_COUNT]>::try_from(values)
            .map_err(|_| WeightCountError { len: values.len() })?;
        Ok(Self(values))
    }
}

impl TryFrom<Vec<f64>> for Weights {
    type Error = WeightCountError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::try_from(values.as_slice())
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for Weights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, w) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{w:.6}")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_count_is_checked() {
        assert_eq!(
            Weights::try_from(vec![0.0; 7]),
            Err(WeightCountError { len: 7 })
        );
        assert_eq!(
            Weights::try_from(&[][..]),
            Err(WeightCountError { len: 0 })
        );
        assert_eq!(
            WeightCountError { len: 3 }.to_string(),
            "expected 6 weights, got 3"
        );
        let weights = Weights::try_from(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0][..]).unwrap();
        assert_eq!(weights[Feature::WellSums], 6.0);
    }

    #[test]
    fn test_feature_names_roundtrip() {
        for feature in Feature::ALL {
            assert_eq!(Feature::from_name(feature.name()), Some(feature));
            assert_eq!(feature.to_string(), feature.name());
        }
        assert_eq!(Feature::from_name("max_height"), None);
    }

    #[test]
    fn test_dot() {
        let weights = Weights::new([1.0, -1.0, 0.5, 0.0, 2.0, -0.5]);
        let values = [2.0, 3.0, 4.0, 100.0, 1.0, 2.0];
        assert!((weights.dot(&values) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_copies_are_independent() {
        let original = Weights::REFERENCE;
        let mut copy = original;
        copy.as_array_mut()[0] = 10.0;
        assert_eq!(original, Weights::REFERENCE);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_serde_is_a_plain_array() {
        let json = serde_json::to_string(&Weights::new([1.0, 2.0, 3.0, 4.0, 5.0, 6.0])).unwrap();
        assert_eq!(json, "[1.0,2.0,3.0,4.0,5.0,6.0]");
        assert!(serde_json::from_str::<Weights>("[1.0,2.0]").is_err());
    }
}
