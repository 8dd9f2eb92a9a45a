//! Adding and removing user files inside a generated topology tree.
//!
//! Imports never overwrite: a file or folder whose name already exists in
//! the target directory is rejected, as is copying a folder into itself.
//! Symlinks inside an imported folder are recreated as links. Removals are
//! confined to a root directory and act on the named entry itself; a
//! symlink is unlinked, never followed.

use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors raised by workspace operations that callers may want to match on
#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("'{name}' already exists in {target}")]
    AlreadyExists { name: String, target: String },

    #[error("Path has no file name: {path}")]
    NoFileName { path: String },

    #[error("Path not found: {path}")]
    NotFound { path: String },

    #[error("{path} is not inside {root}")]
    OutsideRoot { path: String, root: String },

    #[error("Cannot copy {source_dir} into its own subtree {target}")]
    TargetInsideSource { source_dir: String, target: String },
}

/// What an import or removal acted on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Folder,
    Link,
}

fn not_found(path: &Path) -> WorkspaceError {
    WorkspaceError::NotFound {
        path: path.display().to_string(),
    }
}

#[cfg(unix)]
fn copy_symlink(source: &Path, dest: &Path) -> Result<()> {
    let link_target = fs::read_link(source)
        .wrap_err_with(|| format!("Failed to read link '{}'", source.display()))?;
    std::os::unix::fs::symlink(&link_target, dest)
        .wrap_err_with(|| format!("Failed to recreate link '{}'", dest.display()))
}

#[cfg(not(unix))]
fn copy_symlink(source: &Path, _dest: &Path) -> Result<()> {
    warn!("Skipping symlink {:?}: links are only recreated on unix", source);
    Ok(())
}

fn copy_dir_recursive(source: &Path, dest: &Path) -> Result<()> {
    fs::create_dir_all(dest)
        .wrap_err_with(|| format!("Failed to create directory '{}'", dest.display()))?;
    for entry in fs::read_dir(source)
        .wrap_err_with(|| format!("Failed to read directory '{}'", source.display()))?
    {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        let file_type = entry.file_type()?;
        if file_type.is_symlink() {
            copy_symlink(&entry.path(), &target)?;
        } else if file_type.is_dir() {
            copy_dir_recursive(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).wrap_err_with(|| {
                format!("Failed to copy '{}'", entry.path().display())
            })?;
        }
    }
    Ok(())
}

/// Copy a file, or a folder recursively, into `target_dir` under its own
/// base name. Returns the destination path.
///
/// A failed folder copy removes what it had copied so far.
pub fn import_path(source: &Path, target_dir: &Path) -> Result<(PathBuf, EntryKind)> {
    if !source.exists() {
        return Err(not_found(source).into());
    }
    let name = source.file_name().ok_or_else(|| WorkspaceError::NoFileName {
        path: source.display().to_string(),
    })?;

    let dest = target_dir.join(name);
    if fs::symlink_metadata(&dest).is_ok() {
        return Err(WorkspaceError::AlreadyExists {
            name: name.to_string_lossy().to_string(),
            target: target_dir.display().to_string(),
        }
        .into());
    }

    let kind = if source.is_dir() {
        let source_dir = fs::canonicalize(source).map_err(|_| not_found(source))?;
        let target = fs::canonicalize(target_dir).map_err(|_| not_found(target_dir))?;
        if target.starts_with(&source_dir) {
            return Err(WorkspaceError::TargetInsideSource {
                source_dir: source_dir.display().to_string(),
                target: target.display().to_string(),
            }
            .into());
        }

        if let Err(err) = copy_dir_recursive(source, &dest) {
            if let Err(cleanup) = fs::remove_dir_all(&dest) {
                warn!("Failed to clean up partial import {:?}: {}", dest, cleanup);
            }
            return Err(err);
        }
        EntryKind::Folder
    } else {
        fs::copy(source, &dest)
            .wrap_err_with(|| format!("Failed to copy '{}'", source.display()))?;
        EntryKind::File
    };

    info!("Imported {:?} {:?} into {:?}", kind, name, target_dir);
    Ok((dest, kind))
}

/// Check that `path` is `root` itself or lies beneath it and return its
/// absolute form.
///
/// `root` and the parent of `path` are resolved through symlinks and `..`;
/// the final component of `path` is kept as named, so a symlink resolves to
/// the link itself rather than to what it points at.
pub fn ensure_within(path: &Path, root: &Path) -> Result<PathBuf> {
    fs::symlink_metadata(path).map_err(|_| not_found(path))?;
    let root = fs::canonicalize(root).map_err(|_| not_found(root))?;

    let resolved = match path.file_name() {
        Some(name) => {
            let parent = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            fs::canonicalize(parent).map_err(|_| not_found(parent))?.join(name)
        }
        None => fs::canonicalize(path).map_err(|_| not_found(path))?,
    };

    if !resolved.starts_with(&root) {
        return Err(WorkspaceError::OutsideRoot {
            path: resolved.display().to_string(),
            root: root.display().to_string(),
        }
        .into());
    }
    Ok(resolved)
}

/// Delete a file, folder or symlink that lives inside `root`.
pub fn remove_path(path: &Path, root: &Path) -> Result<EntryKind> {
    let resolved = ensure_within(path, root)?;
    let file_type = fs::symlink_metadata(&resolved)
        .wrap_err_with(|| format!("Failed to inspect '{}'", resolved.display()))?
        .file_type();

    let kind = if file_type.is_symlink() {
        fs::remove_file(&resolved)
            .wrap_err_with(|| format!("Failed to delete link '{}'", resolved.display()))?;
        EntryKind::Link
    } else if file_type.is_dir() {
        fs::remove_dir_all(&resolved)
            .wrap_err_with(|| format!("Failed to delete folder '{}'", resolved.display()))?;
        EntryKind::Folder
    } else {
        fs::remove_file(&resolved)
            .wrap_err_with(|| format!("Failed to delete file '{}'", resolved.display()))?;
        EntryKind::File
    };

    info!("Deleted {:?} {:?}", kind, resolved);
    Ok(kind)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_import_file() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let file = src.path().join("setup.sh");
        fs::write(&file, "#!/bin/sh\n").unwrap();

        let (dest, kind) = import_path(&file, dst.path()).unwrap();
        assert_eq!(kind, EntryKind::File);
        assert_eq!(dest, dst.path().join("setup.sh"));
        assert_eq!(fs::read_to_string(dest).unwrap(), "#!/bin/sh\n");
    }

    #[test]
    fn test_import_folder_recursively() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let folder = src.path().join("web");
        fs::create_dir_all(folder.join("conf/nested")).unwrap();
        fs::write(folder.join("Dockerfile"), "FROM alpine\n").unwrap();
        fs::write(folder.join("conf/nested/site.conf"), "listen 80;\n").unwrap();

        let (dest, kind) = import_path(&folder, dst.path()).unwrap();
        assert_eq!(kind, EntryKind::Folder);
        assert_eq!(fs::read_to_string(dest.join("Dockerfile")).unwrap(), "FROM alpine\n");
        assert!(dest.join("conf/nested/site.conf").is_file());
    }

    #[test]
    fn test_import_refuses_overwrite() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let file = src.path().join("notes.txt");
        fs::write(&file, "new").unwrap();
        fs::write(dst.path().join("notes.txt"), "old").unwrap();

        let err = import_path(&file, dst.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkspaceError>(),
            Some(WorkspaceError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(dst.path().join("notes.txt")).unwrap(), "old");
    }

    #[test]
    fn test_import_missing_source() {
        let dst = TempDir::new().unwrap();
        let err = import_path(&dst.path().join("nope"), dst.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkspaceError>(),
            Some(WorkspaceError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_inside_root() {
        let root = TempDir::new().unwrap();
        let file = root.path().join("a.txt");
        let folder = root.path().join("sub");
        fs::write(&file, "x").unwrap();
        fs::create_dir_all(folder.join("deep")).unwrap();

        assert_eq!(remove_path(&file, root.path()).unwrap(), EntryKind::File);
        assert_eq!(remove_path(&folder, root.path()).unwrap(), EntryKind::Folder);
        assert!(!file.exists());
        assert!(!folder.exists());
    }

    #[test]
    fn test_remove_refuses_outside_root() {
        let root = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        let victim = other.path().join("keep.txt");
        fs::write(&victim, "x").unwrap();

        let err = remove_path(&victim, root.path()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkspaceError>(),
            Some(WorkspaceError::OutsideRoot { .. })
        ));
        assert!(victim.exists());
    }

    #[test]
    fn test_remove_refuses_dot_dot_escape() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("project");
        fs::create_dir_all(&root).unwrap();
        let sibling = parent.path().join("sibling.txt");
        fs::write(&sibling, "x").unwrap();

        assert!(remove_path(&root.join("../sibling.txt"), &root).is_err());
        assert!(sibling.exists());
    }

    #[test]
    fn test_prefix_named_sibling_is_outside() {
        let parent = TempDir::new().unwrap();
        let root = parent.path().join("lab");
        let sibling = parent.path().join("lab-old");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&sibling).unwrap();

        assert!(ensure_within(&sibling, &root).is_err());
        assert!(ensure_within(&root, &root).is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_symlink_keeps_target() {
        let root = TempDir::new().unwrap();
        let data = root.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("keep.txt"), "x").unwrap();
        let link = root.path().join("link");
        std::os::unix::fs::symlink(&data, &link).unwrap();

        assert_eq!(remove_path(&link, root.path()).unwrap(), EntryKind::Link);
        assert!(fs::symlink_metadata(&link).is_err());
        assert!(data.join("keep.txt").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_remove_link_pointing_outside_root() {
        let root = TempDir::new().unwrap();
        let other = TempDir::new().unwrap();
        fs::write(other.path().join("keep.txt"), "x").unwrap();
        let link = root.path().join("outside");
        std::os::unix::fs::symlink(other.path(), &link).unwrap();

        // The link lives inside the root, so removing it is allowed
        assert_eq!(remove_path(&link, root.path()).unwrap(), EntryKind::Link);
        assert!(other.path().join("keep.txt").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_import_folder_recreates_symlinks() {
        let src = TempDir::new().unwrap();
        let dst = TempDir::new().unwrap();
        let folder = src.path().join("site");
        fs::create_dir_all(folder.join("real")).unwrap();
        fs::write(folder.join("real/index.html"), "<p/>").unwrap();
        std::os::unix::fs::symlink("real", folder.join("current")).unwrap();

        let (dest, _) = import_path(&folder, dst.path()).unwrap();
        let copied = dest.join("current");
        assert!(fs::symlink_metadata(&copied).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&copied).unwrap(), PathBuf::from("real"));
        assert_eq!(fs::read_to_string(copied.join("index.html")).unwrap(), "<p/>");
    }

    #[test]
    fn test_import_folder_into_itself_is_refused() {
        let src = TempDir::new().unwrap();
        let folder = src.path().join("web");
        let inner = folder.join("sub");
        fs::create_dir_all(&inner).unwrap();

        let err = import_path(&folder, &inner).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkspaceError>(),
            Some(WorkspaceError::TargetInsideSource { .. })
        ));
        assert!(!inner.join("web").exists());
    }
}
