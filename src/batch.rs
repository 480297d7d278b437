//! Sequential batch generation over a list of specs.

use std::path::PathBuf;

use crate::badge::BadgeSpec;
use crate::error::{BadgeError, Result};
use crate::render::{BadgeRenderer, RenderedBadge};
use crate::text::TextRasterizer;

/// What the batch does when one badge fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failing badge and return its error. Badges
    /// already written stay on disk.
    #[default]
    FailFast,
    /// Render every badge and report all failures at the end.
    CollectAll,
}

/// A badge that could not be generated.
#[derive(Debug)]
pub struct BadgeFailure {
    pub path: PathBuf,
    pub error: BadgeError,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<RenderedBadge>,
    pub failures: Vec<BadgeFailure>,
}

impl BatchReport {
    /// Returns true when every badge was written.
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renders specs one after another, in order.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use badge_renderer::{BadgeCatalog, BadgeRenderer, BatchDriver, FailurePolicy};
///
/// let specs = BadgeCatalog::builtin().expand(Path::new("icons"))?;
/// let driver = BatchDriver::new(BadgeRenderer::with_system_font(None)?)
///     .with_policy(FailurePolicy::CollectAll);
/// let report = driver.run(&specs)?;
/// println!("{} written, {} failed", report.written.len(), report.failures.len());
/// # Ok::<(), badge_renderer::BadgeError>(())
/// ```
pub struct BatchDriver<T> {
    renderer: BadgeRenderer<T>,
    policy: FailurePolicy,
}

impl<T: TextRasterizer> BatchDriver<T> {
    /// Creates a driver with the [`FailurePolicy::FailFast`] policy.
    pub fn new(renderer: BadgeRenderer<T>) -> Self {
        Self {
            renderer,
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn renderer(&self) -> &BadgeRenderer<T> {
        &self.renderer
    }

    /// Renders and writes each spec.
    ///
    /// Under [`FailurePolicy::FailFast`] the first error is returned as is.
    /// Under [`FailurePolicy::CollectAll`] this only returns `Ok`; failures
    /// are listed in the report.
    pub fn run(&self, specs: &[BadgeSpec]) -> Result<BatchReport> {
        let mut report = BatchReport::default();

        for (i, spec) in specs.iter().enumerate() {
            log::debug!("[{}/{}] rendering {}", i + 1, specs.len(), spec.output_path.display());

            match self.renderer.render_to_file(spec) {
                Ok(rendered) => report.written.push(rendered),
                Err(error) => match self.policy {
                    FailurePolicy::FailFast => {
                        log::error!("{} failed: {error}", spec.output_path.display());
                        return Err(error);
                    }
                    FailurePolicy::CollectAll => {
                        log::warn!("{} failed: {error}", spec.output_path.display());
                        report.failures.push(BadgeFailure {
                            path: spec.output_path.clone(),
                            error,
                        });
                    }
                },
            }
        }

        log::info!(
            "generated {} badge(s), {} failure(s)",
            report.written.len(),
            report.failures.len()
        );
        Ok(report)
    }
}
