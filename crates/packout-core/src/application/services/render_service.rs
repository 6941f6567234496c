//! Render Service - main application orchestrator.
//!
//! This service coordinates the whole `render` workflow:
//! 1. Reject an output path that is an existing file
//! 2. Load the pack
//! 3. Render parent and dependent templates into an ordered batch
//! 4. Optionally render the output template (failure is reported, not fatal)
//! 5. Dispatch the batch to disk and terminal

use std::path::PathBuf;

use tracing::{info, instrument, warn};

use crate::{
    application::{
        ApplicationError, RenderError,
        ports::{Filesystem, LineSource, PackRenderer, PackSource, Presenter},
        services::dispatcher::{DispatchReport, OutputDispatcher},
    },
    domain::{
        CONTEXT_PACK_NAME, CONTEXT_PACK_PATH, CONTEXT_PACK_REF, CONTEXT_REGISTRY_NAME,
        ErrorContext, NameStyle, OutputBatch, PackRequest, RenderContext, Session,
    },
    error::PackoutResult,
};

/// Message shown when the output template fails to render.
pub const OUTPUT_TEMPLATE_ERROR_MESSAGE: &str = "failed to render output template";

/// Everything one `render` invocation needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub pack: PackRequest,
    /// Write renders below this directory as well as to the terminal.
    pub to_dir: Option<PathBuf>,
    pub render_output_template: bool,
    pub variables: RenderContext,
    pub name_style: NameStyle,
    /// Whether overwrite prompts may be shown.
    pub interactive: bool,
}

impl RenderRequest {
    pub fn new(pack: PackRequest) -> Self {
        Self {
            pack,
            to_dir: None,
            render_output_template: false,
            variables: RenderContext::new(),
            name_style: NameStyle::default(),
            interactive: false,
        }
    }

    /// Diagnostic context describing the requested pack.
    pub fn error_context(&self) -> ErrorContext {
        let mut ctx = ErrorContext::new().with(CONTEXT_PACK_NAME, self.pack.name.as_str());
        if let Some(registry) = &self.pack.registry {
            ctx.add(CONTEXT_REGISTRY_NAME, registry.as_str());
        }
        if !self.pack.is_path() {
            ctx.add(CONTEXT_PACK_REF, self.pack.resolved_ref());
        }
        ctx
    }
}

/// Main render service.
pub struct RenderService {
    source: Box<dyn PackSource>,
    renderer: Box<dyn PackRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl RenderService {
    /// Create a new render service with the given adapters.
    pub fn new(
        source: Box<dyn PackSource>,
        renderer: Box<dyn PackRenderer>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            source,
            renderer,
            filesystem,
        }
    }

    /// Render a pack and dispatch the results.
    ///
    /// Setup errors and an empty render are returned before anything is
    /// written or shown. After that only fatal render errors (cancellation,
    /// a broken terminal) are returned; everything else is reported through
    /// `presenter` and processing continues.
    #[instrument(skip_all, fields(pack = %request.pack))]
    pub fn render(
        &self,
        request: &RenderRequest,
        session: &mut Session,
        input: &mut dyn LineSource,
        presenter: &mut dyn Presenter,
    ) -> PackoutResult<DispatchReport> {
        let mut context = request.error_context();

        // 1. Fail fast when --to-dir names a file
        if let Some(dir) = &request.to_dir {
            if self.filesystem.exists(dir) && !self.filesystem.is_dir(dir) {
                return Err(ApplicationError::DestinationNotDirectory { path: dir.clone() }.into());
            }
        }

        // 2. Load pack
        let pack = self.source.load(&request.pack)?;
        context.add(CONTEXT_PACK_PATH, pack.path.display().to_string());
        info!(pack = %pack.name, dependencies = pack.dependencies.len(), "Pack loaded");

        // 3. Render templates; an empty result is a hard error
        let output = self.renderer.render(&pack, &request.variables)?;
        let mut batch = OutputBatch::assemble(&output, request.name_style)?;

        // 4. Output template
        if request.render_output_template {
            match self
                .renderer
                .render_output_template(&pack, &request.variables)
            {
                Ok(content) => batch.push_output_template(content),
                Err(e) => {
                    warn!(error = %e, "output template failed to render");
                    presenter
                        .report(OUTPUT_TEMPLATE_ERROR_MESSAGE, &e, &context)
                        .map_err(|source| RenderError::Presentation { source })?;
                }
            }
        }

        // 5. Dispatch
        let report = OutputDispatcher::new(self.filesystem.as_ref(), input, presenter).dispatch(
            &batch,
            request.to_dir.as_deref(),
            session,
            request.interactive,
            &context,
        )?;

        info!(
            presented = report.presented,
            written = report.written.len(),
            skipped = report.skipped.len(),
            failed = report.failed,
            "Render completed"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{
        FakeFilesystem, RecordingPresenter, ScriptedInput, Shown,
    };
    use crate::domain::{DomainError, Pack, RenderOutput};
    use crate::error::PackoutError;
    use std::path::Path;
    use std::sync::Arc;

    struct FixedSource(Option<Pack>);

    impl PackSource for FixedSource {
        fn load(&self, request: &PackRequest) -> PackoutResult<Pack> {
            self.0.clone().ok_or_else(|| {
                ApplicationError::PackNotFound {
                    name: request.name.clone(),
                    searched: PathBuf::from("/cache"),
                }
                .into()
            })
        }
    }

    struct FixedRenderer {
        output: RenderOutput,
        outputs_tpl: Option<String>,
    }

    impl PackRenderer for FixedRenderer {
        fn render(&self, _pack: &Pack, _context: &RenderContext) -> PackoutResult<RenderOutput> {
            Ok(self.output.clone())
        }

        fn render_output_template(
            &self,
            _pack: &Pack,
            _context: &RenderContext,
        ) -> PackoutResult<String> {
            self.outputs_tpl.clone().ok_or_else(|| {
                ApplicationError::RenderingFailed {
                    reason: "no outputs.tpl".into(),
                }
                .into()
            })
        }
    }

    /// Shares one fake filesystem between the service and the test body.
    struct SharedFs(Arc<FakeFilesystem>);

    impl Filesystem for SharedFs {
        fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
            self.0.create_dir_all(path)
        }
        fn write_file(&self, path: &Path, content: &str) -> std::io::Result<()> {
            self.0.write_file(path, content)
        }
        fn exists(&self, path: &Path) -> bool {
            self.0.exists(path)
        }
        fn is_dir(&self, path: &Path) -> bool {
            self.0.is_dir(path)
        }
    }

    fn one_job_output() -> RenderOutput {
        let mut output = RenderOutput::new();
        output.add_parent("app/templates/job.nomad.tpl", "job");
        output
    }

    fn service(
        output: RenderOutput,
        outputs_tpl: Option<&str>,
        fs: Arc<FakeFilesystem>,
    ) -> RenderService {
        RenderService::new(
            Box::new(FixedSource(Some(Pack::new("app", "/packs/app")))),
            Box::new(FixedRenderer {
                output,
                outputs_tpl: outputs_tpl.map(str::to_owned),
            }),
            Box::new(SharedFs(fs)),
        )
    }

    fn request() -> RenderRequest {
        RenderRequest::new(PackRequest::new("app", None, None).unwrap())
    }

    #[test]
    fn renders_to_terminal_and_appends_output_template() {
        let fs = Arc::new(FakeFilesystem::default());
        let svc = service(one_job_output(), Some("outputs"), fs.clone());
        let mut presenter = RecordingPresenter::default();
        let mut req = request();
        req.render_output_template = true;

        let report = svc
            .render(
                &req,
                &mut Session::new(),
                &mut ScriptedInput::new(&[]),
                &mut presenter,
            )
            .unwrap();

        assert_eq!(report.presented, 2);
        assert_eq!(presenter.rendered(), ["app/job.nomad", "outputs.tpl"]);
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn output_template_failure_is_reported_first_then_renders_continue() {
        let fs = Arc::new(FakeFilesystem::default());
        let svc = service(one_job_output(), None, fs);
        let mut presenter = RecordingPresenter::default();
        let mut req = request();
        req.render_output_template = true;

        svc.render(
            &req,
            &mut Session::new(),
            &mut ScriptedInput::new(&[]),
            &mut presenter,
        )
        .unwrap();

        assert!(matches!(
            &presenter.events[0],
            Shown::Error { message, .. } if message == OUTPUT_TEMPLATE_ERROR_MESSAGE
        ));
        assert_eq!(presenter.rendered(), ["app/job.nomad"]);
    }

    #[test]
    fn zero_renders_is_an_error_even_with_output_template() {
        let fs = Arc::new(FakeFilesystem::default());
        let svc = service(RenderOutput::new(), Some("outputs"), fs);
        let mut presenter = RecordingPresenter::default();
        let mut req = request();
        req.render_output_template = true;

        let err = svc
            .render(
                &req,
                &mut Session::new(),
                &mut ScriptedInput::new(&[]),
                &mut presenter,
            )
            .unwrap_err();

        assert!(matches!(
            err,
            PackoutError::Domain(DomainError::NoTemplatesRendered)
        ));
        assert!(presenter.events.is_empty());
    }

    #[test]
    fn to_dir_that_is_a_file_fails_before_loading() {
        let fs = Arc::new(FakeFilesystem::default().with_file("/out", "not a dir"));
        let svc = service(one_job_output(), None, fs);
        let mut req = request();
        req.to_dir = Some(PathBuf::from("/out"));

        let err = svc
            .render(
                &req,
                &mut Session::new(),
                &mut ScriptedInput::new(&[]),
                &mut RecordingPresenter::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            PackoutError::Application(ApplicationError::DestinationNotDirectory { .. })
        ));
    }

    #[test]
    fn missing_pack_is_not_found() {
        let svc = RenderService::new(
            Box::new(FixedSource(None)),
            Box::new(FixedRenderer {
                output: one_job_output(),
                outputs_tpl: None,
            }),
            Box::new(SharedFs(Arc::new(FakeFilesystem::default()))),
        );

        let err = svc
            .render(
                &request(),
                &mut Session::new(),
                &mut ScriptedInput::new(&[]),
                &mut RecordingPresenter::default(),
            )
            .unwrap_err();
        assert_eq!(err.category(), crate::error::ErrorCategory::NotFound);
    }

    #[test]
    fn existing_file_non_interactive_still_succeeds() {
        let fs = Arc::new(FakeFilesystem::default().with_file("/out/app/job.nomad", "old"));
        let svc = service(one_job_output(), None, fs.clone());
        let mut presenter = RecordingPresenter::default();
        let mut req = request();
        req.to_dir = Some(PathBuf::from("/out"));

        let report = svc
            .render(
                &req,
                &mut Session::new(),
                &mut ScriptedInput::new(&[]),
                &mut presenter,
            )
            .unwrap();

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(presenter.rendered(), ["app/job.nomad"]);
        assert_eq!(presenter.errors(), 1);
        assert_eq!(fs.read("/out/app/job.nomad").as_deref(), Some("old"));
    }

    #[test]
    fn pre_seeded_session_overwrites_without_prompt() {
        let fs = Arc::new(FakeFilesystem::default().with_file("/out/app/job.nomad", "old"));
        let svc = service(one_job_output(), None, fs.clone());
        let mut input = ScriptedInput::new(&[]);
        let mut req = request();
        req.to_dir = Some(PathBuf::from("/out"));
        req.interactive = true;

        svc.render(
            &req,
            &mut Session::with_auto_approve(true),
            &mut input,
            &mut RecordingPresenter::default(),
        )
        .unwrap();

        assert_eq!(fs.read("/out/app/job.nomad").as_deref(), Some("job"));
        assert_eq!(input.prompts, 0);
    }

    #[test]
    fn error_context_lists_pack_details() {
        let req = RenderRequest::new(
            PackRequest::new("redis", Some("community".into()), Some("v2".into())).unwrap(),
        );
        let ctx = req.error_context();
        assert_eq!(ctx.get(CONTEXT_PACK_NAME), Some("redis"));
        assert_eq!(ctx.get(CONTEXT_REGISTRY_NAME), Some("community"));
        assert_eq!(ctx.get(CONTEXT_PACK_REF), Some("v2"));
    }
}
