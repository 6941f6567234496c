//! Hand-rolled port doubles shared by the service tests.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::application::ports::{Filesystem, LineSource, Presenter};
use crate::domain::{ErrorContext, Render};

/// Filesystem kept in memory; directories are implied by `create_dir_all`.
#[derive(Debug, Default)]
pub struct FakeFilesystem {
    files: Mutex<BTreeMap<PathBuf, String>>,
    dirs: Mutex<BTreeSet<PathBuf>>,
}

impl FakeFilesystem {
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn with_dir(self, path: impl Into<PathBuf>) -> Self {
        self.dirs.lock().unwrap().insert(path.into());
        self
    }

    pub fn read(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn file_count(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn dir_count(&self) -> usize {
        self.dirs.lock().unwrap().len()
    }
}

impl Filesystem for FakeFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut dirs = self.dirs.lock().unwrap();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
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
        self.files.lock().unwrap().contains_key(path) || self.is_dir(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.lock().unwrap().contains(path)
    }
}

/// Answers prompts from a fixed script; running dry reads as an interrupt.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    pub prompts: usize,
}

impl ScriptedInput {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: 0,
        }
    }
}

impl LineSource for ScriptedInput {
    fn read_line(&mut self, _prompt: &str) -> io::Result<String> {
        self.prompts += 1;
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::from(io::ErrorKind::Interrupted))
    }
}

/// One observable event on the presenter, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shown {
    Render(String),
    Error { message: String, context: ErrorContext },
}

#[derive(Debug, Default)]
pub struct RecordingPresenter {
    pub events: Vec<Shown>,
}

impl RecordingPresenter {
    pub fn rendered(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Shown::Render(name) => Some(name.as_str()),
                Shown::Error { .. } => None,
            })
            .collect()
    }

    pub fn errors(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Shown::Error { .. }))
            .count()
    }
}

impl Presenter for RecordingPresenter {
    fn present(&mut self, render: &Render) -> io::Result<()> {
        self.events.push(Shown::Render(render.name.clone()));
        Ok(())
    }

    fn report(
        &mut self,
        message: &str,
        _error: &dyn std::error::Error,
        context: &ErrorContext,
    ) -> io::Result<()> {
        self.events.push(Shown::Error {
            message: message.to_string(),
            context: context.clone(),
        });
        Ok(())
    }
}
