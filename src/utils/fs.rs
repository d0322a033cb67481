use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;
use crate::utils::{ConverterError, ConverterResult, ImageFormat};

/// Default root of the output tree, relative to the working directory
pub const DEFAULT_OUTPUT_ROOT: &str = "converted";

/// Fallback output name for inputs without a usable file stem
const FALLBACK_STEM: &str = "output";

/// File stem an input's outputs are named after.
///
/// Stems that aren't valid UTF-8 are converted lossily.
pub fn input_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy())
        .filter(|s| !s.is_empty())
        .map(|s| s.into_owned())
        .unwrap_or_else(|| FALLBACK_STEM.to_string())
}

/// `<root>/<FORMAT>[/<subdir>]/<stem>.<ext>`
pub fn output_path(root: &Path, format: ImageFormat, subdir: Option<&str>, stem: &str) -> PathBuf {
    let mut dir = root.join(format.dir_name());
    if let Some(subdir) = subdir {
        dir.push(subdir);
    }
    dir.join(format!("{stem}.{}", format.extension()))
}

/// Creates the parent directory of `path` if it is missing.
///
/// Safe to call repeatedly for the same directory.
pub fn ensure_parent_dir(path: &Path) -> ConverterResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| {
            ConverterError::io(format!("Cannot create output directory {}: {e}", parent.display()))
        })?;
    }
    Ok(())
}

/// Recursively deletes the output tree.
///
/// Returns `false` without touching anything when `root` does not exist.
pub async fn clear_output_dir(root: impl AsRef<Path>) -> ConverterResult<bool> {
    let root = root.as_ref();
    if !dir_exists(root).await {
        debug!("Nothing to clear at {}", root.display());
        return Ok(false);
    }
    fs::remove_dir_all(root)
        .await
        .map_err(|e| ConverterError::io(format!("Failed to clear {}: {e}", root.display())))?;
    Ok(true)
}

/// Check if directory exists
pub async fn dir_exists(path: impl AsRef<Path>) -> bool {
    fs::metadata(path.as_ref())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
}

/// Whether any regular file lives somewhere under `root`.
pub async fn contains_files(root: impl AsRef<Path>) -> bool {
    let mut pending = vec![root.as_ref().to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(mut entries) = fs::read_dir(&dir).await else {
            continue;
        };
        while let Ok(Some(entry)) = entries.next_entry().await {
            match entry.file_type().await {
                Ok(t) if t.is_file() => return true,
                Ok(t) if t.is_dir() => pending.push(entry.path()),
                _ => {}
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_flat_and_nested_paths() {
        let root = Path::new("converted");
        assert_eq!(
            output_path(root, ImageFormat::WEBP, None, "photo"),
            Path::new("converted/WEBP/photo.webp")
        );
        assert_eq!(
            output_path(root, ImageFormat::JPEG, Some("16-9"), "photo"),
            Path::new("converted/JPEG/16-9/photo.jpeg")
        );
        assert_eq!(
            output_path(root, ImageFormat::PNG, Some("base"), "photo"),
            Path::new("converted/PNG/base/photo.png")
        );
    }

    #[test]
    fn stem_drops_only_last_extension() {
        assert_eq!(input_stem(Path::new("/tmp/my.photo.jpg")), "my.photo");
        assert_eq!(input_stem(Path::new("/")), "output");
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_stem_is_replaced_lossily() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new("/tmp").join(OsStr::from_bytes(b"caf\xe9.png"));
        assert_eq!(input_stem(&path), "caf\u{FFFD}");
    }

    #[tokio::test]
    async fn clear_missing_root_is_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("converted");
        assert!(!clear_output_dir(&root).await.unwrap());
        assert!(!root.exists());
        assert!(tmp.path().exists());
    }

    #[tokio::test]
    async fn contains_files_walks_nested_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("PNG").join("base");
        std::fs::create_dir_all(&nested).unwrap();
        assert!(!contains_files(tmp.path()).await);
        std::fs::write(nested.join("a.png"), b"x").unwrap();
        assert!(contains_files(tmp.path()).await);
    }
}
