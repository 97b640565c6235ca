//! Telemetry reshaping: raw per-metric sample records into chart-ready
//! datasets.
//!
//! The metrics store returns, per metric, an ordered list of samples where
//! each sample is a timestamp plus one or more named series components
//! (`degrees` for the temperature metrics, `x`/`y`/`z` for the IMU ones).
//! Charts want the transpose: one label list and one value list per series.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One telemetry reading: an absolute timestamp plus the sample's series
/// components, flattened into the same JSON object by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    pub time: String,
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

/// Chart-ready dataset for one metric.
///
/// Invariant: every series in `series` has exactly `labels.len()` values,
/// and the i-th value of each series belongs to the i-th label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartDataset {
    pub labels: Vec<String>,
    pub series: BTreeMap<String, Vec<f64>>,
}

impl ChartDataset {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TelemetryError {
    /// A sample carries a different series key set than the first sample of
    /// the metric. Accepting it would leave the series misaligned with the
    /// label axis, so the whole metric is rejected instead.
    #[error("metric {metric}: sample {index} has series keys [{found}], expected [{expected}]")]
    InconsistentKeys {
        metric: String,
        index: usize,
        expected: String,
        found: String,
    },
}

/// Normalize an RFC3339-ish instant to the display form used on chart axes
/// (`2020-01-01T00:00:00Z` -> `2020-01-01 00:00:00`).
fn display_timestamp(time: &str) -> String {
    time.trim_end_matches('Z').replacen('T', " ", 1)
}

fn key_list(keys: impl Iterator<Item = impl AsRef<str>>) -> String {
    keys.map(|k| k.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Reshape one metric's samples into a [`ChartDataset`].
///
/// Order-preserving and pure. Series are created lazily on first key
/// occurrence, which with the key-set validation below means at the first
/// sample. Samples whose key set differs from the first sample's produce
/// [`TelemetryError::InconsistentKeys`] rather than silently misaligned
/// series.
pub fn reshape(metric: &str, samples: &[MetricSample]) -> Result<ChartDataset, TelemetryError> {
    let mut dataset = ChartDataset::default();
    let Some(first) = samples.first() else {
        return Ok(dataset);
    };

    for (index, sample) in samples.iter().enumerate() {
        if !sample.values.keys().eq(first.values.keys()) {
            return Err(TelemetryError::InconsistentKeys {
                metric: metric.to_string(),
                index,
                expected: key_list(first.values.keys()),
                found: key_list(sample.values.keys()),
            });
        }

        dataset.labels.push(display_timestamp(&sample.time));
        for (key, value) in &sample.values {
            dataset.series.entry(key.clone()).or_default().push(*value);
        }
    }

    Ok(dataset)
}

/// Dataset for the grayscale processing histogram: bin index labels and a
/// single `pixels` series, rendered through the same chart path as the
/// telemetry metrics.
pub fn histogram_dataset(counts: &[f64]) -> ChartDataset {
    let mut series = BTreeMap::new();
    series.insert("pixels".to_string(), counts.to_vec());
    ChartDataset {
        labels: (0..counts.len()).map(|bin| bin.to_string()).collect(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(time: &str, values: &[(&str, f64)]) -> MetricSample {
        MetricSample {
            time: time.to_string(),
            values: values
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        }
    }

    #[test]
    fn empty_input_yields_empty_dataset() {
        let dataset = reshape("cpu-temp", &[]).unwrap();
        assert!(dataset.labels.is_empty());
        assert!(dataset.series.is_empty());
    }

    #[test]
    fn single_series_metric() {
        let samples = vec![
            sample("2020-01-01T00:00:00Z", &[("degrees", 36.5)]),
            sample("2020-01-01T00:00:01Z", &[("degrees", 37.0)]),
        ];
        let dataset = reshape("cpu-temp", &samples).unwrap();
        assert_eq!(
            dataset.labels,
            vec!["2020-01-01 00:00:00", "2020-01-01 00:00:01"]
        );
        assert_eq!(dataset.series["degrees"], vec![36.5, 37.0]);
    }

    #[test]
    fn multi_series_metric_keeps_lengths_aligned() {
        let samples = vec![
            sample("2021-06-01T10:00:00Z", &[("x", 1.0), ("y", 2.0), ("z", 3.0)]),
            sample("2021-06-01T10:00:05Z", &[("x", 1.5), ("y", 2.5), ("z", 3.5)]),
            sample("2021-06-01T10:00:10Z", &[("x", 2.0), ("y", 3.0), ("z", 4.0)]),
        ];
        let dataset = reshape("magnetometer", &samples).unwrap();
        assert_eq!(dataset.labels.len(), 3);
        for values in dataset.series.values() {
            assert_eq!(values.len(), dataset.labels.len());
        }
        assert_eq!(dataset.series["y"], vec![2.0, 2.5, 3.0]);
    }

    #[test]
    fn order_is_preserved() {
        let samples = vec![
            sample("2020-01-01T00:00:09Z", &[("degrees", 9.0)]),
            sample("2020-01-01T00:00:03Z", &[("degrees", 3.0)]),
            sample("2020-01-01T00:00:07Z", &[("degrees", 7.0)]),
        ];
        let dataset = reshape("camera-temp", &samples).unwrap();
        assert_eq!(dataset.labels[1], "2020-01-01 00:00:03");
        assert_eq!(dataset.series["degrees"], vec![9.0, 3.0, 7.0]);
    }

    #[test]
    fn missing_key_is_rejected() {
        let samples = vec![
            sample("2021-06-01T10:00:00Z", &[("x", 1.0), ("y", 2.0), ("z", 3.0)]),
            sample("2021-06-01T10:00:05Z", &[("x", 1.5), ("z", 3.5)]),
        ];
        let err = reshape("magnetometer", &samples).unwrap_err();
        match err {
            TelemetryError::InconsistentKeys { metric, index, .. } => {
                assert_eq!(metric, "magnetometer");
                assert_eq!(index, 1);
            }
        }
    }

    #[test]
    fn extra_key_is_rejected() {
        let samples = vec![
            sample("2021-06-01T10:00:00Z", &[("degrees", 20.0)]),
            sample("2021-06-01T10:00:05Z", &[("degrees", 21.0), ("spurious", 1.0)]),
        ];
        assert!(reshape("cpu-temp", &samples).is_err());
    }

    #[test]
    fn histogram_dataset_is_aligned() {
        let counts: Vec<f64> = (0..256).map(|v| v as f64).collect();
        let dataset = histogram_dataset(&counts);
        assert_eq!(dataset.labels.len(), 256);
        assert_eq!(dataset.series["pixels"].len(), 256);
        assert_eq!(dataset.labels[255], "255");
    }
}
