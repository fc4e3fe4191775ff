//! Prometheus text exposition format (version 0.0.4).

use std::fmt::Write;

use crate::sample::{MetricFamily, Sample, SampleValue};

/// Content type served with `render` output.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render families as `# HELP`, `# TYPE`, then one line per sample.
pub fn render(families: &[MetricFamily]) -> String {
    let mut out = String::new();
    for family in families {
        let desc = &family.desc;
        let _ = writeln!(out, "# HELP {} {}", desc.name, escape_help(&desc.help));
        let _ = writeln!(out, "# TYPE {} {}", desc.name, desc.kind.as_str());
        for sample in &family.samples {
            render_sample(&mut out, family, sample);
        }
    }
    out
}

fn render_sample(out: &mut String, family: &MetricFamily, sample: &Sample) {
    let desc = &family.desc;
    let labels = desc
        .const_labels
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .chain(
            desc.variable_labels
                .iter()
                .map(String::as_str)
                .zip(sample.label_values.iter().map(String::as_str)),
        )
        .map(|(k, v)| format!("{}=\"{}\"", k, escape_label_value(v)))
        .collect::<Vec<_>>();

    out.push_str(&desc.name);
    if !labels.is_empty() {
        let _ = write!(out, "{{{}}}", labels.join(","));
    }
    let _ = writeln!(out, " {}", format_value(sample.value));
}

fn format_value(value: SampleValue) -> String {
    match value {
        SampleValue::Counter(v) => v.to_string(),
        SampleValue::Gauge(v) if v.is_nan() => "NaN".to_string(),
        SampleValue::Gauge(v) if v.is_infinite() => {
            let sign = if v > 0.0 { '+' } else { '-' };
            format!("{sign}Inf")
        }
        SampleValue::Gauge(v) if v.fract() == 0.0 && v.abs() < 1e15 => format!("{v:.0}"),
        SampleValue::Gauge(v) => v.to_string(),
    }
}

fn escape_help(v: &str) -> String {
    v.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}
