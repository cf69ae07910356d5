//! Ratio to effect size conversion (Chinn 2000).
//!
//! `d = ln(|r|) * sqrt(3) / pi * sign(r)`
//!
//! Taking the absolute value and restoring the sign keeps the map defined for
//! negative input, so a mistyped ratio degrades to a mirrored value instead of
//! NaN. A zero ratio yields a non-finite result; callers filter it with
//! [`finite`].

/// `sqrt(3) / pi`, the logit-to-standardized-difference factor.
pub const CHINN_FACTOR: f64 = 1.732_050_807_568_877_2 / std::f64::consts::PI;

/// Convert one ratio into an effect size.
pub fn effect_size(ratio: f64) -> f64 {
    ratio.abs().ln() * CHINN_FACTOR * ratio.signum()
}

/// Elementwise transform over an optional value; missing stays missing.
pub fn transform(ratio: Option<f64>) -> Option<f64> {
    ratio.map(effect_size)
}

/// Drop non-finite values.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Inverse of [`effect_size`] for positive ratios.
pub fn effect_to_ratio(effect: f64) -> f64 {
    (effect / CHINN_FACTOR).exp()
}
