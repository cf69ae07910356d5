use serde::Serialize;

use crate::transform::{finite, transform};

/// One included outcome with its inputs and derived effect sizes.
///
/// Derived fields are private: they are only ever produced from the ratios by
/// [`OutcomeRecord::derive`], never set independently. A derived value may be
/// non-finite (ratio of zero); use the `*_finite` accessors when displaying or
/// plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeRecord {
    outcome_label: String,
    ratio: Option<f64>,
    lower_ci_ratio: Option<f64>,
    upper_ci_ratio: Option<f64>,
    p_value: Option<f64>,
    effect_size: Option<f64>,
    lower_ci_effect: Option<f64>,
    upper_ci_effect: Option<f64>,
}

impl OutcomeRecord {
    /// Build a record and derive its effect sizes.
    ///
    /// CI effects are derived only when both bounds are present.
    pub fn derive(
        outcome_label: impl Into<String>,
        ratio: Option<f64>,
        ci: Option<(Option<f64>, Option<f64>)>,
        p_value: Option<f64>,
    ) -> Self {
        let (lower_ci_ratio, upper_ci_ratio) = ci.unwrap_or((None, None));
        let (lower_ci_effect, upper_ci_effect) = match (lower_ci_ratio, upper_ci_ratio) {
            (Some(lower), Some(upper)) => (transform(Some(lower)), transform(Some(upper))),
            _ => (None, None),
        };
        Self {
            outcome_label: outcome_label.into(),
            ratio,
            lower_ci_ratio,
            upper_ci_ratio,
            p_value,
            effect_size: transform(ratio),
            lower_ci_effect,
            upper_ci_effect,
        }
    }

    pub fn outcome_label(&self) -> &str {
        &self.outcome_label
    }

    pub fn ratio(&self) -> Option<f64> {
        self.ratio
    }

    pub fn lower_ci_ratio(&self) -> Option<f64> {
        self.lower_ci_ratio
    }

    pub fn upper_ci_ratio(&self) -> Option<f64> {
        self.upper_ci_ratio
    }

    pub fn p_value(&self) -> Option<f64> {
        self.p_value
    }

    /// Raw derived effect size, possibly non-finite.
    pub fn effect_size(&self) -> Option<f64> {
        self.effect_size
    }

    pub fn lower_ci_effect(&self) -> Option<f64> {
        self.lower_ci_effect
    }

    pub fn upper_ci_effect(&self) -> Option<f64> {
        self.upper_ci_effect
    }

    pub fn effect_size_finite(&self) -> Option<f64> {
        finite(self.effect_size)
    }

    /// Both CI effect bounds, when both are finite.
    pub fn ci_effect_finite(&self) -> Option<(f64, f64)> {
        finite(self.lower_ci_effect).zip(finite(self.upper_ci_effect))
    }

    /// Both CI ratio bounds, when both are finite.
    pub fn ci_ratio_finite(&self) -> Option<(f64, f64)> {
        finite(self.lower_ci_ratio).zip(finite(self.upper_ci_ratio))
    }
}
