//! Integration tests for packout-core.
//!
//! Drives the public API end to end with in-test port implementations.

use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::Mutex;

use packout_core::application::ApplicationError;
use packout_core::domain::OUTPUT_TEMPLATE_NAME;
use packout_core::prelude::*;

#[derive(Default)]
struct MapFs {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<Vec<PathBuf>>,
}

impl Filesystem for MapFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.dirs.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.lock().unwrap().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().iter().any(|d| d == path)
    }
}

/// Filesystem handle the test keeps after the service takes ownership.
#[derive(Clone, Default)]
struct SharedFs(std::sync::Arc<MapFs>);

impl Filesystem for SharedFs {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        self.0.create_dir_all(path)
    }
    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        self.0.write_file(path, content)
    }
    fn exists(&self, path: &Path) -> bool {
        self.0.exists(path)
    }
    fn is_dir(&self, path: &Path) -> bool {
        self.0.is_dir(path)
    }
}

struct StaticSource(Pack);

impl PackSource for StaticSource {
    fn load(&self, _request: &PackRequest) -> PackoutResult<Pack> {
        Ok(self.0.clone())
    }
}

/// Renders `<pack>/templates/<file>` and `<pack>/<dep>/templates/<file>`.
struct SubstitutingRenderer;

impl PackRenderer for SubstitutingRenderer {
    fn render(&self, pack: &Pack, context: &RenderContext) -> PackoutResult<RenderOutput> {
        let mut output = RenderOutput::new();
        for t in &pack.templates {
            output.add_parent(
                format!("{}/templates/{}", pack.name, t.file_name),
                context.render(&t.source),
            );
        }
        for dep in &pack.dependencies {
            for t in &dep.templates {
                output.add_dependent(
                    format!("{}/{}/templates/{}", pack.name, dep.name, t.file_name),
                    context.render(&t.source),
                );
            }
        }
        Ok(output)
    }

    fn render_output_template(
        &self,
        pack: &Pack,
        context: &RenderContext,
    ) -> PackoutResult<String> {
        pack.output_template
            .as_deref()
            .map(|s| context.render(s))
            .ok_or_else(|| {
                ApplicationError::RenderingFailed {
                    reason: "pack has no output template".into(),
                }
                .into()
            })
    }
}

struct Answers(VecDeque<&'static str>);

impl LineSource for Answers {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.0
            .pop_front()
            .map(str::to_owned)
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}

#[derive(Clone, Default)]
struct Transcript(Rc<RefCell<Vec<String>>>);

impl Presenter for Transcript {
    fn present(&mut self, render: &Render) -> io::Result<()> {
        self.0
            .borrow_mut()
            .push(format!("{}:\n\n{}", render.name, render.content));
        Ok(())
    }

    fn report(
        &mut self,
        message: &str,
        error: &dyn std::error::Error,
        _context: &ErrorContext,
    ) -> io::Result<()> {
        self.0.borrow_mut().push(format!("{message}: {error}"));
        Ok(())
    }
}

fn example_pack() -> Pack {
    Pack::new("example", "/packs/example")
        .with_template("web.nomad.tpl", "job \"{{ name }}\" {}")
        .with_template("api.nomad.tpl", "job \"api\" {}")
        .with_output_template("deployed {{ name }}")
        .with_dependency(Pack::new("redis", "/packs/example/deps/redis").with_template(
            "redis.nomad.tpl",
            "job \"redis\" {}",
        ))
}

fn service(fs: SharedFs) -> RenderService {
    RenderService::new(
        Box::new(StaticSource(example_pack())),
        Box::new(SubstitutingRenderer),
        Box::new(fs),
    )
}

fn request() -> RenderRequest {
    let mut request = RenderRequest::new(PackRequest::new("./example", None, None).unwrap());
    request.variables.insert("name", "web");
    request
}

#[test]
fn test_full_render_to_terminal() {
    let fs = SharedFs::default();
    let transcript = Transcript::default();
    let mut presenter = transcript.clone();
    let mut req = request();
    req.render_output_template = true;

    let report = service(fs.clone())
        .render(
            &req,
            &mut Session::new(),
            &mut Answers(VecDeque::new()),
            &mut presenter,
        )
        .unwrap();

    assert_eq!(report.presented, 4);
    let lines = transcript.0.borrow();
    assert_eq!(lines[0], "example/redis/redis.nomad:\n\njob \"redis\" {}");
    assert_eq!(lines[1], "example/api.nomad:\n\njob \"api\" {}");
    assert_eq!(lines[2], "example/web.nomad:\n\njob \"web\" {}");
    assert_eq!(lines[3], format!("{OUTPUT_TEMPLATE_NAME}:\n\ndeployed web"));
    assert!(fs.0.files.lock().unwrap().is_empty());
}

#[test]
fn test_full_render_to_directory() {
    let fs = SharedFs::default();
    let mut req = request();
    req.to_dir = Some(PathBuf::from("/out"));
    req.render_output_template = true;

    let report = service(fs.clone())
        .render(
            &req,
            &mut Session::new(),
            &mut Answers(VecDeque::new()),
            &mut Transcript::default(),
        )
        .unwrap();

    assert_eq!(report.written.len(), 4);
    let files = fs.0.files.lock().unwrap();
    assert!(files.contains_key(Path::new("/out/example/redis/redis.nomad")));
    assert!(files.contains_key(Path::new("/out/example/web.nomad")));
    assert_eq!(
        files.get(Path::new("/out/outputs.tpl")).map(String::as_str),
        Some("deployed web")
    );
}

#[test]
fn test_overwrite_all_answer() {
    let fs = SharedFs::default();
    fs.write_file(Path::new("/out/example/redis/redis.nomad"), "old")
        .unwrap();
    fs.write_file(Path::new("/out/example/web.nomad"), "old")
        .unwrap();
    let mut req = request();
    req.to_dir = Some(PathBuf::from("/out"));
    req.interactive = true;
    let mut session = Session::new();

    service(fs.clone())
        .render(
            &req,
            &mut session,
            &mut Answers(VecDeque::from(["a"])),
            &mut Transcript::default(),
        )
        .unwrap();

    assert!(session.is_auto_approved());
    let files = fs.0.files.lock().unwrap();
    assert_eq!(
        files
            .get(Path::new("/out/example/web.nomad"))
            .map(String::as_str),
        Some("job \"web\" {}")
    );
}

#[test]
fn test_end_of_input_cancels() {
    let fs = SharedFs::default();
    fs.write_file(Path::new("/out/example/redis/redis.nomad"), "old")
        .unwrap();
    let mut req = request();
    req.to_dir = Some(PathBuf::from("/out"));
    req.interactive = true;

    let err = service(fs)
        .render(
            &req,
            &mut Session::new(),
            &mut Answers(VecDeque::new()),
            &mut Transcript::default(),
        )
        .unwrap_err();

    assert!(err.is_cancelled());
}
