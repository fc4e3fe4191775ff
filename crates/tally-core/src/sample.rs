//! Point-in-time view of registered metrics, consumed by the text renderer.

use crate::desc::Descriptor;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    Counter(u64),
    Gauge(f64),
}

/// One label-value combination and its value at collection time.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Values for `Descriptor::variable_labels`, in schema order.
    pub label_values: Vec<String>,
    pub value: SampleValue,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub desc: Descriptor,
    pub samples: Vec<Sample>,
}
