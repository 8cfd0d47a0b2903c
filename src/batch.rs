//! Batch runs over a directory tree of instance files.
//!
//! Every regular file under the input directory is loaded and solved with
//! one engine. The summary for `<input>/a/b/kpfs_1.txt` run with `grasp`
//! lands in `<output>/a/b/kpfs_1_grasp.txt`. A file that fails to load or
//! whose summary cannot be written is reported and skipped; the rest of the
//! batch still runs.

use std::fs;
use std::path::{Path, PathBuf};

use crate::engine::Engine;
use crate::error::{Error, Result};
use crate::instance::Instance;
use crate::result::KpfsResult;
use crate::trace::NullTrace;

/// A solved instance and where its summary went.
#[derive(Debug, Clone)]
pub struct BatchEntry {
    /// Instance file.
    pub instance: PathBuf,
    /// Summary file written for it.
    pub summary: PathBuf,
    /// Best result found.
    pub result: KpfsResult,
}

/// Outcome of [`run_batch`].
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Instances solved, in path order.
    pub completed: Vec<BatchEntry>,
    /// Instances skipped, with the reason.
    pub failed: Vec<(PathBuf, Error)>,
}

/// Lists every regular file under `root`, recursively, sorted by path.
pub fn instance_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let read_dir = |source| Error::ReadDir {
            path: dir.clone(),
            source,
        };
        for entry in fs::read_dir(&dir).map_err(read_dir)? {
            let path = entry.map_err(read_dir)?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.is_file() {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

/// Summary destination for `instance` (a file under `input`).
pub fn summary_path(input: &Path, output: &Path, instance: &Path, engine: Engine) -> PathBuf {
    let relative = instance.strip_prefix(input).unwrap_or(instance);
    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output
        .join(relative)
        .with_file_name(format!("{stem}_{}.txt", engine.name()))
}

/// Writes a run summary, creating parent directories as needed.
pub fn write_summary(
    path: &Path,
    instance: &Instance,
    engine: Engine,
    result: &KpfsResult,
) -> Result<()> {
    let write_err = |source| Error::WriteSummary {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }
    let text = format!(
        "Engine: {engine}\nCapacity: {}\n{result}\n",
        instance.capacity()
    );
    fs::write(path, text).map_err(write_err)
}

/// Solves every instance under `input` with `engine`, writing one summary
/// per instance under `output`.
///
/// Only a failure to list `input` aborts the batch.
pub fn run_batch(
    engine: Engine,
    input: &Path,
    output: &Path,
    seed: Option<u64>,
) -> Result<BatchReport> {
    let files = instance_files(input)?;
    log::info!(
        "batch: {} instance files under {}, engine {engine}",
        files.len(),
        input.display()
    );

    let mut report = BatchReport::default();
    for path in files {
        let solved = Instance::load(&path).and_then(|instance| {
            let result = engine.run(&instance, seed, &mut NullTrace);
            let summary = summary_path(input, output, &path, engine);
            write_summary(&summary, &instance, engine, &result)?;
            Ok((summary, result))
        });
        match solved {
            Ok((summary, result)) => {
                log::debug!("{}: objective {}", path.display(), result.objective_value);
                report.completed.push(BatchEntry {
                    instance: path,
                    summary,
                    result,
                });
            }
            Err(err) => {
                log::warn!("skipping {}: {err}", path.display());
                report.failed.push((path, err));
            }
        }
    }

    Ok(report)
}
