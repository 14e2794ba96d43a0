use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{ExportError, ExportResult};

/// Host-provided chart capability.
///
/// The chart itself stays opaque: the core never inspects or mutates it
/// beyond asking the host to serialize it as SVG. A resolved chart is valid
/// only for the duration of the export call that resolved it.
pub trait ChartExporter {
    /// Opaque host-resident chart handle.
    type Chart;

    /// Currently selected chart, if any.
    fn active_chart(&mut self) -> Option<Self::Chart>;

    /// Serializes `chart` as SVG markup at `path`.
    ///
    /// Implementations fail with [`ExportError::ChartExport`] when the chart
    /// cannot be serialized or the path is unwritable.
    fn export_chart_to_svg(&mut self, chart: &Self::Chart, path: &Path) -> ExportResult<()>;
}

/// In-memory exporter whose single "chart" is pre-rendered SVG markup.
///
/// Used by tests and headless consumers that already hold SVG bytes and want
/// the rest of the pipeline (format dispatch, scratch handling, decoding,
/// page rendering) unchanged.
#[derive(Debug, Default)]
pub struct StaticChartExporter {
    markup: Option<String>,
    export_calls: usize,
}

impl StaticChartExporter {
    /// Exporter holding one chart with the given SVG markup.
    #[must_use]
    pub fn new(markup: impl Into<String>) -> Self {
        Self {
            markup: Some(markup.into()),
            export_calls: 0,
        }
    }

    /// Exporter with no active chart.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of times the host was asked to serialize a chart.
    #[must_use]
    pub fn export_calls(&self) -> usize {
        self.export_calls
    }
}

impl ChartExporter for StaticChartExporter {
    type Chart = ();

    fn active_chart(&mut self) -> Option<Self::Chart> {
        self.markup.as_ref().map(|_| ())
    }

    fn export_chart_to_svg(&mut self, _chart: &Self::Chart, path: &Path) -> ExportResult<()> {
        self.export_calls += 1;
        let markup = self.markup.as_deref().ok_or(ExportError::NoActiveChart)?;
        fs::write(path, markup).map_err(|err| ExportError::ChartExport {
            reason: format!("cannot write svg to {}: {err}", path.display()),
        })?;
        debug!(path = %path.display(), bytes = markup.len(), "wrote static chart markup");
        Ok(())
    }
}
