//! Chart series: labelled values ready for rendering.

use serde::Serialize;

/// How a series is meant to be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    HorizontalBar,
    Pie,
    Doughnut,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: u64,
}

/// A titled list of labelled values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    /// Dataset label (legend entry), if any.
    pub label: Option<String>,
    pub points: Vec<SeriesPoint>,
}

impl ChartSeries {
    pub fn new(kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            label: None,
            points: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn push(&mut self, label: impl Into<String>, value: u64) {
        self.points.push(SeriesPoint {
            label: label.into(),
            value,
        });
    }

    /// Add `value` to the point labelled `label`, creating it at the end if absent.
    ///
    /// Labels keep the order in which they were first seen.
    pub fn accumulate(&mut self, label: &str, value: u64) {
        match self.points.iter_mut().find(|p| p.label == label) {
            Some(point) => point.value += value,
            None => self.push(label, value),
        }
    }

    pub fn total(&self) -> u64 {
        self.points.iter().map(|p| p.value).sum()
    }

    pub fn max_value(&self) -> u64 {
        self.points.iter().map(|p| p.value).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
