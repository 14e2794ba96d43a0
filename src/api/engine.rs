use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{ExportOutcome, ExportRequest, OutputFormat};
use crate::decode::Picture;
use crate::error::{ExportError, ExportResult};
use crate::host::ChartExporter;
use crate::oplog::{NullOperationLog, OperationLog};
use crate::render::{PageRenderer, PdfPageRenderer};
use crate::scratch::ScratchArtifact;

use super::ExportEngineConfig;

/// Main orchestration facade consumed by host applications.
///
/// `ExportEngine` sequences one export request at a time: format dispatch
/// from the destination extension, chart resolution, SVG passthrough or the
/// scratch-decode-render PDF pipeline, and terminal log summaries. Scratch
/// artifacts are released on every exit path.
pub struct ExportEngine<H: ChartExporter, R: PageRenderer = PdfPageRenderer> {
    host: H,
    renderer: R,
    log: Box<dyn OperationLog>,
    config: ExportEngineConfig,
}

impl<H: ChartExporter> ExportEngine<H> {
    /// Engine with the default PDF backend.
    pub fn new(host: H, config: ExportEngineConfig) -> Self {
        Self::with_renderer(host, PdfPageRenderer::new(), config)
    }
}

impl<H: ChartExporter, R: PageRenderer> ExportEngine<H, R> {
    pub fn with_renderer(host: H, renderer: R, config: ExportEngineConfig) -> Self {
        Self {
            host,
            renderer,
            log: Box::new(NullOperationLog),
            config,
        }
    }

    /// Installs the process-wide operation log sink.
    ///
    /// Defaults to [`NullOperationLog`]; the sink is fire-and-forget and
    /// never affects the pipeline's outcome.
    pub fn set_operation_log(&mut self, log: Box<dyn OperationLog>) {
        self.log = log;
    }

    #[must_use]
    pub fn config(&self) -> &ExportEngineConfig {
        &self.config
    }

    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[must_use]
    pub fn into_host(self) -> H {
        self.host
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Exports the host's active chart to `destination`.
    pub fn export_to(&mut self, destination: impl Into<PathBuf>) -> ExportResult<ExportOutcome> {
        self.export(&ExportRequest::new(destination))
    }

    /// Runs one export request to completion.
    ///
    /// Failures are terminal for the attempt; nothing here retries, and
    /// scratch cleanup has already run by the time the result is returned.
    pub fn export(&mut self, request: &ExportRequest) -> ExportResult<ExportOutcome> {
        let outcome = self.run(request);
        match &outcome {
            Ok(ok) => {
                debug!(
                    format = %ok.format,
                    byte_size = ok.byte_size,
                    destination = %ok.destination.display(),
                    "chart export succeeded"
                );
                self.log.success(&ok.destination, ok.byte_size);
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "chart export failed");
                self.log.failure(err);
            }
        }
        outcome
    }

    fn run(&mut self, request: &ExportRequest) -> ExportResult<ExportOutcome> {
        let destination = request.destination.as_path();

        // Pure validation first: nothing below runs for an unsupported path.
        let format = OutputFormat::from_path(destination)?;

        self.log.begin(&format!("export to {format}"));
        self.log
            .line(&format!("output: {}", destination.display()));

        let chart = self.host.active_chart().ok_or(ExportError::NoActiveChart)?;

        match format {
            OutputFormat::Svg => self.export_svg(&chart, destination),
            OutputFormat::Pdf => self.export_pdf(&chart, destination),
        }
    }

    fn export_svg(&mut self, chart: &H::Chart, destination: &Path) -> ExportResult<ExportOutcome> {
        self.log.line("exporting chart directly to svg...");
        self.host.export_chart_to_svg(chart, destination)?;
        let byte_size = file_byte_size(destination)?;
        self.log.line("svg export completed");

        Ok(ExportOutcome {
            format: OutputFormat::Svg,
            destination: destination.to_path_buf(),
            byte_size,
        })
    }

    fn export_pdf(&mut self, chart: &H::Chart, destination: &Path) -> ExportResult<ExportOutcome> {
        let scratch = match &self.config.scratch_dir {
            Some(dir) => ScratchArtifact::acquire_in(dir, "svg"),
            None => ScratchArtifact::acquire("svg"),
        };

        let outcome = self.pdf_pipeline(chart, scratch.path().to_path_buf(), destination);

        // Runs whether the pipeline succeeded or not; `Drop` covers unwinds.
        match scratch.release() {
            Ok(()) => self.log.line("removed scratch svg"),
            Err(err) => {
                // Cleanup failure is reported but never outranks the result.
                warn!(error = %err, "failed to remove scratch svg");
                self.log
                    .line(&format!("failed to remove scratch svg: {err}"));
            }
        }

        outcome
    }

    fn pdf_pipeline(
        &mut self,
        chart: &H::Chart,
        scratch_path: PathBuf,
        destination: &Path,
    ) -> ExportResult<ExportOutcome> {
        self.log.line("step 1: exporting chart to scratch svg...");
        self.host.export_chart_to_svg(chart, &scratch_path)?;
        let scratch_bytes = file_byte_size(&scratch_path)?;
        self.log.line(&format!(
            "  scratch svg: {} ({scratch_bytes} bytes)",
            scratch_path.display()
        ));

        self.log.line("step 2: decoding svg...");
        let picture = Picture::decode_file(&scratch_path, &self.config.decode_options())?;
        let bounds = picture.bounds();
        self.log.line(&format!(
            "  picture bounds: {:.1} x {:.1}",
            bounds.width, bounds.height
        ));

        self.log.line("step 3: rendering pdf page...");
        let byte_size = self
            .renderer
            .render_single_page(&picture, bounds, destination)?;
        self.log.line("pdf rendering completed");

        Ok(ExportOutcome {
            format: OutputFormat::Pdf,
            destination: destination.to_path_buf(),
            byte_size,
        })
    }
}

fn file_byte_size(path: &Path) -> ExportResult<u64> {
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|err| ExportError::filesystem(path, err))
}
