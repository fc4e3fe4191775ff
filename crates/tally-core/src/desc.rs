//! Metric descriptors and name validation.

use crate::error::{Result, TallyError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKind {
    Counter,
    Gauge,
}

impl MetricKind {
    /// Value of the `# TYPE` line.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
        }
    }
}

/// Name, help, and constant labels of a metric before it is built.
#[derive(Debug, Clone)]
pub struct Opts {
    pub name: String,
    pub help: String,
    pub const_labels: Vec<(String, String)>,
}

impl Opts {
    pub fn new(name: impl Into<String>, help: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: help.into(),
            const_labels: Vec::new(),
        }
    }

    /// Attach a label whose value is fixed for every sample of the metric.
    pub fn const_label(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.const_labels.push((name.into(), value.into()));
        self
    }
}

/// Validated, immutable description of a metric family.
#[derive(Debug, Clone, PartialEq)]
pub struct Descriptor {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub variable_labels: Vec<String>,
    pub const_labels: Vec<(String, String)>,
}

impl Descriptor {
    pub(crate) fn new(opts: Opts, kind: MetricKind, variable_labels: &[&str]) -> Result<Self> {
        if !is_valid_metric_name(&opts.name) {
            return Err(TallyError::InvalidName(format!("metric name {:?}", opts.name)));
        }

        let mut seen: Vec<&str> = Vec::with_capacity(opts.const_labels.len() + variable_labels.len());
        let label_names = opts
            .const_labels
            .iter()
            .map(|(k, _)| k.as_str())
            .chain(variable_labels.iter().copied());
        for label in label_names {
            if !is_valid_label_name(label) {
                return Err(TallyError::InvalidName(format!(
                    "label {label:?} on metric {}",
                    opts.name
                )));
            }
            if seen.contains(&label) {
                return Err(TallyError::InvalidName(format!(
                    "duplicate label {label:?} on metric {}",
                    opts.name
                )));
            }
            seen.push(label);
        }

        Ok(Self {
            name: opts.name,
            help: opts.help,
            kind,
            variable_labels: variable_labels.iter().map(|l| (*l).to_string()).collect(),
            const_labels: opts.const_labels,
        })
    }

    pub(crate) fn check_label_values(&self, got: usize) -> Result<()> {
        let expected = self.variable_labels.len();
        if got != expected {
            return Err(TallyError::LabelCardinality {
                name: self.name.clone(),
                expected,
                got,
            });
        }
        Ok(())
    }
}

/// `[a-zA-Z_:][a-zA-Z0-9_:]*`
fn is_valid_metric_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == ':' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == ':')
}

/// `[a-zA-Z_][a-zA-Z0-9_]*`, with the `__` prefix reserved.
fn is_valid_label_name(name: &str) -> bool {
    if name.starts_with("__") {
        return false;
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
