//! Per-session calculation pipeline.

use effsize_model::{CalculatorOptions, RawRow};
use tracing::debug_span;

use crate::layout::{ForestPlot, ForestPlotLayout};
use crate::record::OutcomeRecord;
use crate::table::OutcomeTable;

/// Results and plot layout for one snapshot of input.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub records: Vec<OutcomeRecord>,
    pub plot: ForestPlot,
}

impl Calculation {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// The only state kept between interactions: options and the current rows.
#[derive(Debug, Clone, Default)]
pub struct Session {
    options: CalculatorOptions,
    table: OutcomeTable,
}

impl Session {
    pub fn new(options: CalculatorOptions) -> Self {
        let table = OutcomeTable::new(&options);
        Self { options, table }
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: CalculatorOptions) {
        self.table.apply_options(&options);
        self.options = options;
    }

    pub fn table(&self) -> &OutcomeTable {
        &self.table
    }

    pub fn add_or_replace_rows(&mut self, rows: impl IntoIterator<Item = RawRow>) {
        self.table.add_or_replace_rows(rows);
    }

    /// Run the whole pipeline against the current rows.
    pub fn recalculate(&self) -> Calculation {
        let _span = debug_span!("recalculate", rows = self.table.len()).entered();
        let records = self.table.compute_results();
        let plot = ForestPlotLayout::build(&records, &self.options);
        Calculation { records, plot }
    }
}
