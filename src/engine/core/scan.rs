use crate::error::{Error, Result};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Visit the direct children of `root` that are not directories.
///
/// Sub-directories are reported once and pruned, so output directories created by
/// earlier runs are never walked into. An error returned by `on_file` stops the walk.
pub fn scan_streaming<F>(root: &Path, mut on_file: F) -> Result<()>
where
    F: FnMut(PathBuf) -> Result<()>,
{
    let mut entries = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = entries.next() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                let source = e
                    .into_io_error()
                    .unwrap_or_else(|| io::Error::other("walk failed at root"));
                return Err(Error::RootPathUnreadable {
                    path: root.to_path_buf(),
                    source,
                });
            }
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        if entry.depth() == 0 {
            continue;
        }

        debug!(path = %entry.path().display(), "considering");
        if entry.file_type().is_dir() {
            debug!(path = %entry.path().display(), "ignoring sub-directory");
            entries.skip_current_dir();
            continue;
        }

        on_file(entry.into_path())?;
    }

    Ok(())
}

/// Collect candidate files under `root`
pub fn scan(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    scan_streaming(root, |path| {
        files.push(path);
        Ok(())
    })?;
    Ok(files)
}
