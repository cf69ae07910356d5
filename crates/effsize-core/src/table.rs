//! Ordered outcome rows and their derived results.

use effsize_model::{CalculatorOptions, RawRow};
use tracing::{debug, warn};

use crate::record::OutcomeRecord;

/// Holds the current snapshot of raw rows.
///
/// Results are derived from scratch on every call to
/// [`compute_results`](Self::compute_results); no derived state is kept.
#[derive(Debug, Clone, Default)]
pub struct OutcomeTable {
    rows: Vec<RawRow>,
    include_ci: bool,
    include_p_value: bool,
}

impl OutcomeTable {
    pub fn new(options: &CalculatorOptions) -> Self {
        Self {
            rows: Vec::new(),
            include_ci: options.include_ci,
            include_p_value: options.include_p_value,
        }
    }

    /// Replace the held rows with a freshly edited set.
    pub fn add_or_replace_rows(&mut self, rows: impl IntoIterator<Item = RawRow>) {
        self.rows = rows.into_iter().collect();
        debug!(rows = self.rows.len(), "outcome rows replaced");
    }

    /// Re-read the feature flags from `options`.
    pub fn apply_options(&mut self, options: &CalculatorOptions) {
        self.include_ci = options.include_ci;
        self.include_p_value = options.include_p_value;
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Derive the ordered result records.
    ///
    /// Rows with a blank label are skipped. An unreadable ratio keeps its row
    /// with a missing effect size.
    pub fn compute_results(&self) -> Vec<OutcomeRecord> {
        let mut records = Vec::with_capacity(self.rows.len());
        let mut excluded = 0usize;
        let mut invalid = 0usize;
        for (index, row) in self.rows.iter().enumerate() {
            if row.label.trim().is_empty() {
                excluded += 1;
                continue;
            }
            if row.ratio.is_invalid() {
                invalid += 1;
            }
            let ratio = row.ratio.as_number();
            if ratio.is_some_and(|value| value <= 0.0) {
                warn!(row = index, "ratio outside the positive domain");
            }
            let ci = self
                .include_ci
                .then(|| (row.lower_ci.as_number(), row.upper_ci.as_number()));
            let p_value = if self.include_p_value {
                row.p_value.as_number()
            } else {
                None
            };
            records.push(OutcomeRecord::derive(row.label.clone(), ratio, ci, p_value));
        }
        if excluded > 0 {
            warn!(excluded, "rows without an outcome label skipped");
        }
        debug!(
            included = records.len(),
            excluded,
            invalid_ratios = invalid,
            "computed outcome results"
        );
        records
    }
}
