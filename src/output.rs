use crate::error::Res;
use crate::utils;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// The directory rendered charts are written to. Each `chart` run starts from an empty directory
/// so that charts from a previous workbook never mix with the current ones.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct OutputDir {
    path: PathBuf,
}

impl OutputDir {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the directory and its contents, then creates it again, empty.
    pub fn reset(&self) -> Res<()> {
        utils::remove_dir_all(&self.path)
            .context("Unable to clear the output directory")?;
        self.ensure()
    }

    /// Creates the directory if it does not exist.
    pub fn ensure(&self) -> Res<()> {
        utils::make_dir(&self.path)
    }

    /// The chart files currently in the directory, sorted by file name. A missing directory has
    /// no charts.
    pub fn charts(&self) -> Res<Vec<PathBuf>> {
        if !self.path.is_dir() {
            return Ok(Vec::new());
        }
        let mut files = utils::list_files(&self.path)?;
        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }
}

/// Returns `path` if it names an existing directory.
pub(crate) fn existing_dir(path: &Path) -> Option<PathBuf> {
    path.is_dir().then(|| path.to_path_buf())
}

#[test]
fn reset_clears_previous_charts() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let out = OutputDir::new(tempdir.path().join("output"));
    out.ensure().unwrap();
    std::fs::write(out.path().join("old-expenses.png"), "x").unwrap();
    out.reset().unwrap();
    assert!(out.path().is_dir());
    assert!(out.charts().unwrap().is_empty());
}

#[test]
fn reset_creates_missing_dir() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let out = OutputDir::new(tempdir.path().join("a").join("b"));
    out.reset().unwrap();
    assert!(out.path().is_dir());
}

#[test]
fn charts_sorted_by_name() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let out = OutputDir::new(tempdir.path());
    for name in ["March-expenses.png", "January-deposits.png", "February-expenses.png"] {
        std::fs::write(out.path().join(name), "x").unwrap();
    }
    std::fs::create_dir(out.path().join("nested")).unwrap();
    let names: Vec<String> = out
        .charts()
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "February-expenses.png",
            "January-deposits.png",
            "March-expenses.png"
        ]
    );
}

#[test]
fn charts_of_missing_dir_is_empty() {
    let tempdir = tempfile::TempDir::new().unwrap();
    let out = OutputDir::new(tempdir.path().join("nope"));
    assert!(out.charts().unwrap().is_empty());
}

#[test]
fn existing_dir_check() {
    let tempdir = tempfile::TempDir::new().unwrap();
    assert!(existing_dir(tempdir.path()).is_some());
    assert!(existing_dir(&tempdir.path().join("nope")).is_none());
}
