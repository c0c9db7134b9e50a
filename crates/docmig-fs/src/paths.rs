//! Path comparison that survives `.` and `..` components, relative paths and
//! symlinked ancestors.

use std::path::{Component, Path, PathBuf};

use normpath::PathExt;

/// Remove `.` components and fold `..` into the preceding component.
///
/// Purely lexical: symlinks are not consulted. `..` above the root is dropped,
/// leading `..` of a relative path are kept.
pub fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

/// Join a possibly relative `path` onto `base` and clean the result.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    clean(&base.join(path))
}

/// Absolute, cleaned form of `path` with its longest existing ancestor
/// normalized by the filesystem.
///
/// Paths that do not exist yet (a backup directory before the first run)
/// still resolve through a symlinked parent the same way existing ones do.
pub fn resolve(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).map_or_else(|_| clean(path), |p| clean(&p));
    for ancestor in absolute.ancestors() {
        let Ok(normalized) = ancestor.normalize() else {
            continue;
        };
        return match absolute.strip_prefix(ancestor) {
            Ok(rest) if !rest.as_os_str().is_empty() => normalized.as_path().join(rest),
            _ => normalized.into_path_buf(),
        };
    }
    absolute
}

/// Whether `path` is `root` or lies below it, after [`resolve`].
pub fn is_within(path: &Path, root: &Path) -> bool {
    resolve(path).starts_with(resolve(root))
}
