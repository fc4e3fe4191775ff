//! Label-keyed series storage shared by counters and gauges.
//!
//! Every label-value combination owns one atomic cell. Cells are created on
//! first use and live as long as the family; handles keep an `Arc` to their
//! cell so the hot path is a single atomic op.

use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::desc::Descriptor;
use crate::error::Result;
use crate::sample::{Sample, SampleValue};

pub(crate) trait Cell: Default + Send + Sync + 'static {
    fn sample(&self) -> SampleValue;
}

#[derive(Debug, Default)]
pub(crate) struct CounterCell(AtomicU64);

impl CounterCell {
    /// Saturates at `u64::MAX`; a counter never wraps back toward zero.
    pub(crate) fn add(&self, v: u64) {
        let _ = self
            .0
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |cur| {
                Some(cur.saturating_add(v))
            });
    }

    pub(crate) fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

impl Cell for CounterCell {
    fn sample(&self) -> SampleValue {
        SampleValue::Counter(self.get())
    }
}

/// f64 stored as raw bits. Zero bits decode to `0.0`, so `Default` is correct.
#[derive(Debug, Default)]
pub(crate) struct GaugeCell(AtomicU64);

impl GaugeCell {
    pub(crate) fn set(&self, v: f64) {
        self.0.store(v.to_bits(), Ordering::Relaxed);
    }

    pub(crate) fn add(&self, delta: f64) {
        let mut current = self.0.load(Ordering::Relaxed);
        loop {
            let next = (f64::from_bits(current) + delta).to_bits();
            match self
                .0
                .compare_exchange_weak(current, next, Ordering::Relaxed, Ordering::Relaxed)
            {
                Ok(_) => return,
                Err(actual) => current = actual,
            }
        }
    }

    pub(crate) fn get(&self) -> f64 {
        f64::from_bits(self.0.load(Ordering::Relaxed))
    }
}

impl Cell for GaugeCell {
    fn sample(&self) -> SampleValue {
        SampleValue::Gauge(self.get())
    }
}

#[derive(Debug)]
pub(crate) struct Family<C> {
    desc: Descriptor,
    series: DashMap<Vec<String>, Arc<C>>,
}

impl<C: Cell> Family<C> {
    /// Unlabelled families get their single series up front so they export 0
    /// before the first update.
    pub(crate) fn new(desc: Descriptor) -> Self {
        let series = DashMap::new();
        if desc.variable_labels.is_empty() {
            series.insert(Vec::new(), Arc::new(C::default()));
        }
        Self { desc, series }
    }

    pub(crate) fn desc(&self) -> &Descriptor {
        &self.desc
    }

    /// Cell for `label_values`, created at zero on first use.
    pub(crate) fn series(&self, label_values: &[&str]) -> Result<Arc<C>> {
        self.desc.check_label_values(label_values.len())?;
        let key = owned_key(label_values);
        if let Some(cell) = self.series.get(&key) {
            return Ok(Arc::clone(cell.value()));
        }
        let cell = self
            .series
            .entry(key)
            .or_insert_with(|| Arc::new(C::default()));
        Ok(Arc::clone(cell.value()))
    }

    /// Like `series` but never creates a combination.
    pub(crate) fn peek(&self, label_values: &[&str]) -> Result<Option<Arc<C>>> {
        self.desc.check_label_values(label_values.len())?;
        Ok(self
            .series
            .get(&owned_key(label_values))
            .map(|cell| Arc::clone(cell.value())))
    }

    /// Every observed combination exactly once, sorted by label values.
    pub(crate) fn samples(&self) -> Vec<Sample> {
        let mut samples: Vec<Sample> = self
            .series
            .iter()
            .map(|entry| Sample {
                label_values: entry.key().clone(),
                value: entry.value().sample(),
            })
            .collect();
        samples.sort_by(|a, b| a.label_values.cmp(&b.label_values));
        samples
    }
}

fn owned_key(label_values: &[&str]) -> Vec<String> {
    label_values.iter().map(|v| (*v).to_string()).collect()
}
