//! Process-wide metric registry.
//!
//! The registry is an explicit object: callers construct it at startup and
//! pass it to whatever needs to register or export metrics. Names are unique
//! across counters and gauges; export follows registration order.

use std::sync::{Arc, PoisonError, RwLock};

use crate::counter::{Counter, CounterVec};
use crate::desc::{Descriptor, MetricKind, Opts};
use crate::error::{Result, TallyError};
use crate::family::{CounterCell, Family, GaugeCell};
use crate::gauge::Gauge;
use crate::sample::MetricFamily;
use crate::text;

/// A registrable metric family. Built from any counter or gauge handle.
#[derive(Debug, Clone)]
pub struct Metric(Inner);

#[derive(Debug, Clone)]
enum Inner {
    Counter(Arc<Family<CounterCell>>),
    Gauge(Arc<Family<GaugeCell>>),
}

impl Metric {
    pub fn desc(&self) -> &Descriptor {
        match &self.0 {
            Inner::Counter(f) => f.desc(),
            Inner::Gauge(f) => f.desc(),
        }
    }

    fn collect(&self) -> MetricFamily {
        let samples = match &self.0 {
            Inner::Counter(f) => f.samples(),
            Inner::Gauge(f) => f.samples(),
        };
        MetricFamily {
            desc: self.desc().clone(),
            samples,
        }
    }
}

impl From<Counter> for Metric {
    fn from(c: Counter) -> Self {
        Metric(Inner::Counter(c.family()))
    }
}

impl From<CounterVec> for Metric {
    fn from(c: CounterVec) -> Self {
        Metric(Inner::Counter(c.family()))
    }
}

impl From<Gauge> for Metric {
    fn from(g: Gauge) -> Self {
        Metric(Inner::Gauge(g.family()))
    }
}

#[derive(Debug, Default)]
pub struct Registry {
    metrics: RwLock<Vec<Metric>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a metric. Fails without modifying the registry when the name is taken.
    pub fn register(&self, metric: impl Into<Metric>) -> Result<()> {
        let metric = metric.into();
        let mut metrics = self.metrics.write().unwrap_or_else(PoisonError::into_inner);
        let name = &metric.desc().name;
        if metrics.iter().any(|m| &m.desc().name == name) {
            return Err(TallyError::DuplicateName(name.clone()));
        }
        metrics.push(metric);
        Ok(())
    }

    pub fn register_counter(&self, opts: Opts) -> Result<Counter> {
        let counter = Counter::new(opts)?;
        self.register(counter.clone())?;
        Ok(counter)
    }

    pub fn register_counter_vec(&self, opts: Opts, label_names: &[&str]) -> Result<CounterVec> {
        let counter = CounterVec::new(opts, label_names)?;
        self.register(counter.clone())?;
        Ok(counter)
    }

    pub fn register_gauge(&self, opts: Opts) -> Result<Gauge> {
        let gauge = Gauge::new(opts)?;
        self.register(gauge.clone())?;
        Ok(gauge)
    }

    /// Add 1 to the counter series for `label_values`.
    pub fn increment(&self, name: &str, label_values: &[&str]) -> Result<()> {
        self.increment_by(name, label_values, 1)
    }

    pub fn increment_by(&self, name: &str, label_values: &[&str], delta: u64) -> Result<()> {
        match self.lookup(name)?.0 {
            Inner::Counter(family) => {
                family.series(label_values)?.add(delta);
                Ok(())
            }
            Inner::Gauge(_) => Err(TallyError::KindMismatch {
                name: name.to_string(),
                expected: MetricKind::Counter,
            }),
        }
    }

    /// Set the gauge series for `label_values`.
    pub fn set(&self, name: &str, label_values: &[&str], value: f64) -> Result<()> {
        match self.lookup(name)?.0 {
            Inner::Gauge(family) => {
                family.series(label_values)?.set(value);
                Ok(())
            }
            Inner::Counter(_) => Err(TallyError::KindMismatch {
                name: name.to_string(),
                expected: MetricKind::Gauge,
            }),
        }
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<String> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|m| m.desc().name.clone())
            .collect()
    }

    /// Collect every family that has at least one sample, in registration order.
    pub fn snapshot(&self) -> Vec<MetricFamily> {
        let metrics = self.metrics.read().unwrap_or_else(PoisonError::into_inner);
        metrics
            .iter()
            .map(Metric::collect)
            .filter(|family| !family.samples.is_empty())
            .collect()
    }

    /// Render the current snapshot in the Prometheus text format.
    pub fn export(&self) -> String {
        text::render(&self.snapshot())
    }

    fn lookup(&self, name: &str) -> Result<Metric> {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .find(|m| m.desc().name == name)
            .cloned()
            .ok_or_else(|| TallyError::UnknownMetric(name.to_string()))
    }
}
