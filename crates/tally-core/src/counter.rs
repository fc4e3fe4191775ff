//! Monotonic counters.

use std::sync::Arc;

use crate::desc::{Descriptor, MetricKind, Opts};
use crate::error::Result;
use crate::family::{CounterCell, Family};

/// Counter without variable labels.
#[derive(Debug, Clone)]
pub struct Counter {
    family: Arc<Family<CounterCell>>,
    cell: Arc<CounterCell>,
}

impl Counter {
    pub fn new(opts: Opts) -> Result<Self> {
        let family = Arc::new(Family::new(Descriptor::new(opts, MetricKind::Counter, &[])?));
        let cell = family.series(&[])?;
        Ok(Self { family, cell })
    }

    pub fn inc(&self) {
        self.cell.add(1);
    }

    pub fn inc_by(&self, v: u64) {
        self.cell.add(v);
    }

    pub fn get(&self) -> u64 {
        self.cell.get()
    }

    pub fn desc(&self) -> &Descriptor {
        self.family.desc()
    }

    pub(crate) fn family(&self) -> Arc<Family<CounterCell>> {
        Arc::clone(&self.family)
    }
}

/// Counter partitioned by variable labels; one series per label-value combination.
#[derive(Debug, Clone)]
pub struct CounterVec {
    family: Arc<Family<CounterCell>>,
}

impl CounterVec {
    pub fn new(opts: Opts, label_names: &[&str]) -> Result<Self> {
        let desc = Descriptor::new(opts, MetricKind::Counter, label_names)?;
        Ok(Self {
            family: Arc::new(Family::new(desc)),
        })
    }

    /// Bind a label-value combination, creating it at zero if unseen.
    /// Values are given in the order of the label names passed to `new`.
    pub fn with_label_values(&self, label_values: &[&str]) -> Result<LabeledCounter> {
        Ok(LabeledCounter {
            cell: self.family.series(label_values)?,
        })
    }

    pub fn inc(&self, label_values: &[&str]) -> Result<()> {
        self.inc_by(label_values, 1)
    }

    pub fn inc_by(&self, label_values: &[&str], v: u64) -> Result<()> {
        self.family.series(label_values)?.add(v);
        Ok(())
    }

    /// Current value; 0 for a combination that was never incremented.
    pub fn get(&self, label_values: &[&str]) -> Result<u64> {
        Ok(self
            .family
            .peek(label_values)?
            .map(|cell| cell.get())
            .unwrap_or(0))
    }

    pub fn desc(&self) -> &Descriptor {
        self.family.desc()
    }

    pub(crate) fn family(&self) -> Arc<Family<CounterCell>> {
        Arc::clone(&self.family)
    }
}

/// One series of a `CounterVec`.
#[derive(Debug, Clone)]
pub struct LabeledCounter {
    cell: Arc<CounterCell>,
}

impl LabeledCounter {
    pub fn inc(&self) {
        self.cell.add(1);
    }

    pub fn inc_by(&self, v: u64) {
        self.cell.add(v);
    }

    pub fn get(&self) -> u64 {
        self.cell.get()
    }
}
