use crate::PerfError;
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

const GZIP_SUFFIX: &str = ".gz";

/// Decompressed siblings produced for one directory scan.
///
/// The files are a transient cache: dropping the guard removes every path it
/// produced, so cleanup happens on every exit path out of the scan that
/// acquired it. A failed removal is logged and otherwise ignored.
pub struct ScratchFiles {
    produced: Vec<PathBuf>,
}

impl ScratchFiles {
    pub fn paths(&self) -> &[PathBuf] {
        &self.produced
    }

    pub fn len(&self) -> usize {
        self.produced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.produced.is_empty()
    }
}

impl Drop for ScratchFiles {
    fn drop(&mut self) {
        for path in self.produced.drain(..) {
            if let Err(e) = fs::remove_file(&path) {
                eprintln!(
                    "[perftab] warning: could not remove scratch file {}: {}",
                    path.display(),
                    e
                );
            }
        }
    }
}

/// Ensure every gzip-compressed artifact directly in `dir` has a decompressed
/// sibling with the `.gz` suffix stripped, overwriting any stale sibling.
/// Corrupt archives are skipped with a warning and treated as absent results.
pub fn decompress_dir(dir: &Path) -> Result<ScratchFiles, PerfError> {
    let mut produced = Vec::new();

    if !dir.is_dir() {
        return Ok(ScratchFiles { produced });
    }

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        let Some(stem) = name.strip_suffix(GZIP_SUFFIX) else {
            continue;
        };
        if stem.is_empty() {
            continue;
        }

        let target = dir.join(stem);
        match inflate(&path, &target) {
            Ok(()) => produced.push(target),
            Err(e) => {
                eprintln!(
                    "[perftab] warning: skipping corrupt archive {}: {}",
                    path.display(),
                    e
                );
                // Don't leave a partially written sibling behind.
                let _ = fs::remove_file(&target);
            }
        }
    }

    Ok(ScratchFiles { produced })
}

fn inflate(src: &Path, dst: &Path) -> Result<(), PerfError> {
    let mut decoder = GzDecoder::new(File::open(src)?);
    let mut out = File::create(dst)?;
    io::copy(&mut decoder, &mut out)?;
    Ok(())
}
