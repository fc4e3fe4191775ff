//! Gauges: values that can be set arbitrarily.

use std::sync::Arc;

use crate::desc::{Descriptor, MetricKind, Opts};
use crate::error::Result;
use crate::family::{Family, GaugeCell};

#[derive(Debug, Clone)]
pub struct Gauge {
    family: Arc<Family<GaugeCell>>,
    cell: Arc<GaugeCell>,
}

impl Gauge {
    pub fn new(opts: Opts) -> Result<Self> {
        let family = Arc::new(Family::new(Descriptor::new(opts, MetricKind::Gauge, &[])?));
        let cell = family.series(&[])?;
        Ok(Self { family, cell })
    }

    pub fn set(&self, v: f64) {
        self.cell.set(v);
    }

    pub fn add(&self, delta: f64) {
        self.cell.add(delta);
    }

    pub fn get(&self) -> f64 {
        self.cell.get()
    }

    pub fn desc(&self) -> &Descriptor {
        self.family.desc()
    }

    pub(crate) fn family(&self) -> Arc<Family<GaugeCell>> {
        Arc::clone(&self.family)
    }
}
