//! The export state machine.
//!
//! ```text
//! Idle → Gating → Capturing → Assembling → Saved
//!          │          │            │
//!          └──────────┴────────────┴──→ Failed
//! Gating → Idle   (pay prompt declined)
//! ```
//!
//! `ExportPipeline::try_begin` hands out at most one `ExportPermit` at a time.
//! The holder runs the pipeline and keeps the permit until it has applied the
//! gating update, so two exports never interleave on chrome visibility or on
//! the free-export counter.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, error, info, warn};

use crate::export::chrome::ChromeGuard;
use crate::export::gating::{evaluate, record_success, GateDecision, GatingState, PromptKind};
use crate::export::pagination::{plan, PageFormat};
use crate::export::pdf::PageAssembler;
use crate::export::raster::{Bitmap, CaptureOptions, Rasterizer};
use crate::export::sink::{ExportSink, EXPORT_FILE_NAME};
use crate::export::ExportError;
use crate::layout::{measure, LayoutTree};
use crate::models::resume::ResumeDocument;
use crate::models::template::TemplateId;
use crate::templates::render_preview;

/// Delay between hiding chrome and capturing.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    Idle,
    Gating,
    Capturing,
    Assembling,
    Saved,
    Failed,
}

impl ExportState {
    pub fn can_transition_to(self, next: ExportState) -> bool {
        use ExportState::*;
        matches!(
            (self, next),
            (Idle, Gating)
                | (Gating, Capturing)
                | (Gating, Idle)
                | (Gating, Failed)
                | (Capturing, Assembling)
                | (Capturing, Failed)
                | (Assembling, Saved)
                | (Assembling, Failed)
        )
    }
}

/// Asks the user whether to pay for an export that gating did not let through.
pub trait PaymentPrompt: Send + Sync {
    fn confirm(&self, kind: PromptKind) -> bool;
}

/// A prompt whose answer was given up front, as with the HTTP
/// `confirm_payment` flag.
#[derive(Debug, Clone, Copy)]
pub struct PresetAnswer(pub bool);

impl PaymentPrompt for PresetAnswer {
    fn confirm(&self, _kind: PromptKind) -> bool {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct SavedExport {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
    pub pages: usize,
    /// True when the export went through a confirmed pay prompt.
    pub paid: bool,
    /// Gating state after this export, as `record_success` computes it.
    pub gating_after: GatingState,
}

#[derive(Debug)]
pub enum ExportOutcome {
    Saved(SavedExport),
    /// The user declined the pay prompt. Not an error.
    Declined(PromptKind),
    Failed(ExportError),
}

/// Result of one pipeline run plus every state it passed through.
#[derive(Debug)]
pub struct ExportRun {
    pub outcome: ExportOutcome,
    pub states: Vec<ExportState>,
}

#[derive(Debug, Error)]
#[error("an export is already in progress")]
pub struct ExportBusy;

struct Tracker {
    state: ExportState,
    states: Vec<ExportState>,
}

impl Tracker {
    fn new() -> Self {
        Tracker {
            state: ExportState::Idle,
            states: vec![ExportState::Idle],
        }
    }

    fn advance(&mut self, next: ExportState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal export transition {:?} -> {:?}",
            self.state,
            next
        );
        info!(from = ?self.state, to = ?next, "export state");
        self.state = next;
        self.states.push(next);
    }

    fn fail(mut self, error: ExportError) -> ExportRun {
        error!(state = ?self.state, error = %error, "export failed");
        self.advance(ExportState::Failed);
        ExportRun {
            outcome: ExportOutcome::Failed(error),
            states: self.states,
        }
    }
}

pub struct ExportPipeline {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn PageAssembler>,
    sink: Option<ExportSink>,
    settle_delay: Duration,
    format: PageFormat,
    in_flight: Mutex<()>,
}

impl ExportPipeline {
    pub fn new(rasterizer: Arc<dyn Rasterizer>, assembler: Arc<dyn PageAssembler>) -> Self {
        ExportPipeline {
            rasterizer,
            assembler,
            sink: None,
            settle_delay: DEFAULT_SETTLE_DELAY,
            format: PageFormat::A4_PORTRAIT,
            in_flight: Mutex::new(()),
        }
    }

    pub fn with_sink(mut self, sink: ExportSink) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Claims the pipeline, or reports that another export holds it.
    pub fn try_begin(&self) -> Result<ExportPermit<'_>, ExportBusy> {
        match self.in_flight.try_lock() {
            Ok(guard) => Ok(ExportPermit {
                pipeline: self,
                _guard: guard,
            }),
            Err(_) => {
                warn!("export rejected: another export is in flight");
                Err(ExportBusy)
            }
        }
    }

    /// Hides chrome, waits for the settle delay, captures. Chrome is restored
    /// before this returns, whatever the outcome.
    ///
    /// Rasterizing is CPU-bound, so it runs on the blocking pool against a
    /// snapshot of the hidden tree; a panicking rasterizer becomes a capture error.
    pub(crate) async fn capture(&self, tree: &mut LayoutTree) -> Result<Bitmap, ExportError> {
        let options = CaptureOptions::for_layout(&measure(tree));
        let guard = ChromeGuard::hide(tree);
        tokio::time::sleep(self.settle_delay).await;

        let snapshot = guard.tree().clone();
        let rasterizer = Arc::clone(&self.rasterizer);
        let joined =
            tokio::task::spawn_blocking(move || rasterizer.rasterize(&snapshot, &options)).await;
        drop(guard);

        match joined {
            Ok(bitmap) => bitmap,
            Err(e) => Err(ExportError::Capture(format!("rasterizer task failed: {e}"))),
        }
    }

    async fn assemble(&self, bitmap: &Bitmap) -> Result<(Vec<u8>, usize), ExportError> {
        let page_plan = plan(bitmap.width, bitmap.height, self.format);
        let mut document = self.assembler.begin(self.format);
        let image = document.embed_image(bitmap)?;
        for placement in &page_plan.placements {
            if placement.page > 0 {
                document.add_page();
            }
            document.place_image(
                image,
                placement.x_mm,
                placement.y_mm,
                placement.width_mm,
                placement.height_mm,
            )?;
        }
        let pages = document.page_count();
        let bytes = document.finish()?;
        if let Some(sink) = &self.sink {
            sink.save(&bytes).await?;
        }
        debug!(pages, image_height_mm = page_plan.image_height_mm, "export assembled");
        Ok((bytes, pages))
    }
}

/// Exclusive right to run one export.
pub struct ExportPermit<'a> {
    pipeline: &'a ExportPipeline,
    _guard: MutexGuard<'a, ()>,
}

impl ExportPermit<'_> {
    /// Runs one export of `document` laid out with `template`. Gating is
    /// evaluated from scratch on every run.
    pub async fn run(
        &self,
        document: &ResumeDocument,
        template: TemplateId,
        gating: GatingState,
        prompt: &dyn PaymentPrompt,
    ) -> ExportRun {
        let pipeline = self.pipeline;
        let mut tracker = Tracker::new();

        tracker.advance(ExportState::Gating);
        let paid = match evaluate(template, &gating) {
            GateDecision::Allow => false,
            GateDecision::PromptRequired(kind) => {
                if !prompt.confirm(kind) {
                    info!(template = template.as_str(), ?kind, "pay prompt declined");
                    tracker.advance(ExportState::Idle);
                    return ExportRun {
                        outcome: ExportOutcome::Declined(kind),
                        states: tracker.states,
                    };
                }
                true
            }
        };

        tracker.advance(ExportState::Capturing);
        let mut tree = render_preview(template, document);
        let bitmap = match pipeline.capture(&mut tree).await {
            Ok(bitmap) => bitmap,
            Err(e) => return tracker.fail(e),
        };

        tracker.advance(ExportState::Assembling);
        let (bytes, pages) = match pipeline.assemble(&bitmap).await {
            Ok(assembled) => assembled,
            Err(e) => return tracker.fail(e),
        };

        tracker.advance(ExportState::Saved);
        info!(template = template.as_str(), pages, paid, "export complete");
        ExportRun {
            outcome: ExportOutcome::Saved(SavedExport {
                file_name: EXPORT_FILE_NAME,
                bytes,
                pages,
                paid,
                gating_after: record_success(template, &gating),
            }),
            states: tracker.states,
        }
    }
}
