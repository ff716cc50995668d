//! Lazy, ordered traversal of the input tree.
//!
//! Every non-directory entry under the root is yielded, depth first, with
//! siblings in file-name order so two runs over the same tree visit files in
//! the same sequence. Symlinks are never followed during traversal. A link to
//! a directory is dropped like the directory itself; any other link is
//! yielded, and reading it later follows the link like any other open.
//!
//! ```text
//! input/
//! ├── a.png          → yielded 1st
//! ├── nested/
//! │   └── b.jpg      → yielded 2nd
//! ├── output/        → pruned when it is the output directory
//! └── z.txt          → yielded 3rd (sniffing decides later)
//! ```

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

#[derive(Error, Debug)]
#[error("cannot walk {path}")]
pub struct WalkError {
    pub path: PathBuf,
    #[source]
    pub source: walkdir::Error,
}

/// Iterate over every file below `root`.
///
/// `exclude` is a canonicalized directory to prune, typically the output
/// directory when it sits inside the input tree. The root itself is never
/// pruned.
pub fn walk_files(
    root: &Path,
    exclude: Option<&Path>,
) -> impl Iterator<Item = Result<PathBuf, WalkError>> + use<> {
    let root_path = root.to_path_buf();
    let exclude = exclude.map(Path::to_path_buf);

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |entry| !is_excluded(entry, exclude.as_deref()))
        .filter_map(move |entry| match entry {
            Ok(entry) if is_directory(&entry) => None,
            Ok(entry) => Some(Ok(entry.into_path())),
            Err(source) => Some(Err(WalkError {
                path: source
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| root_path.clone()),
                source,
            })),
        })
}

/// Directories, including symlinks that resolve to one.
fn is_directory(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() || (entry.path_is_symlink() && entry.path().is_dir())
}

fn is_excluded(entry: &DirEntry, exclude: Option<&Path>) -> bool {
    let Some(exclude) = exclude else {
        return false;
    };
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .path()
            .canonicalize()
            .is_ok_and(|resolved| resolved == exclude)
}
