//! Exclusion-aware recursive copy of decompiled sources.

use std::path::Path;

use tracing::{debug, trace, warn};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::ExclusionSet;
use crate::infrastructure::traits::{EntryKind, FileSystem};

/// Counters from one exclusion-aware copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub excluded: usize,
}

/// Depth-first copy of `src` into `dst`, skipping files whose full source
/// path contains any exclusion pattern.
///
/// Directories are always mirrored, even when every file inside is excluded.
/// Symbolic links are skipped, so link cycles cannot recurse.
pub fn copy_excluding(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
    exclusions: &ExclusionSet,
) -> ApplicationResult<CopyStats> {
    let mut stats = CopyStats::default();
    fs.create_dir_all(dst)
        .with_path_context("create directory", dst)?;
    walk(fs, src, dst, exclusions, &mut stats)?;
    debug!(
        "copy_excluding: {} -> {} (copied={}, excluded={})",
        src.display(),
        dst.display(),
        stats.copied,
        stats.excluded
    );
    Ok(stats)
}

fn walk(
    fs: &dyn FileSystem,
    src: &Path,
    dst: &Path,
    exclusions: &ExclusionSet,
    stats: &mut CopyStats,
) -> ApplicationResult<()> {
    for entry in fs.read_dir(src).with_path_context("read directory", src)? {
        let Some(name) = entry.file_name() else {
            continue;
        };
        let target = dst.join(name);

        match fs.entry_kind(&entry).with_path_context("stat", &entry)? {
            EntryKind::Dir => {
                fs.create_dir_all(&target)
                    .with_path_context("create directory", &target)?;
                walk(fs, &entry, &target, exclusions, stats)?;
            }
            EntryKind::Symlink => {
                warn!("skipping symlink: {}", entry.display());
            }
            EntryKind::File | EntryKind::Other => {
                if exclusions.matches(&entry) {
                    trace!("excluded: {}", entry.display());
                    stats.excluded += 1;
                } else {
                    fs.copy(&entry, &target)
                        .with_path_context("copy file", &entry)?;
                    stats.copied += 1;
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::traits::RealFileSystem;
    use tempfile::TempDir;

    /// Patterns match the full path, so the temp dir itself must not contain them.
    fn temp_dir_without(patterns: &[&str]) -> TempDir {
        loop {
            let temp = TempDir::new().unwrap();
            let path = temp.path().to_string_lossy().into_owned();
            if !patterns.iter().any(|p| path.contains(p)) {
                return temp;
            }
        }
    }

    fn write(path: &Path, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn given_patterns_when_copying_then_only_unmatched_files_are_copied() {
        // Arrange
        let temp = temp_dir_without(&["Ad", "Tracker"]);
        let src = temp.path().join("smali");
        let dst = temp.path().join("java");
        write(&src.join("x/AdView.smali"), "ad");
        write(&src.join("x/TrackerUtil.smali"), "tracker");
        write(&src.join("x/Main.smali"), "main");

        // Act
        let stats = copy_excluding(
            &RealFileSystem,
            &src,
            &dst,
            &ExclusionSet::from_patterns(["Ad", "Tracker"]),
        )
        .unwrap();

        // Assert
        assert_eq!(stats, CopyStats { copied: 1, excluded: 2 });
        assert!(dst.join("x/Main.smali").exists());
        assert!(!dst.join("x/AdView.smali").exists());
        assert!(!dst.join("x/TrackerUtil.smali").exists());
    }

    #[test]
    fn given_empty_exclusions_when_copying_then_everything_is_copied() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("smali");
        let dst = temp.path().join("java");
        write(&src.join("a/b/c/Deep.smali"), "deep");
        write(&src.join("Top.smali"), "top");

        let stats = copy_excluding(&RealFileSystem, &src, &dst, &ExclusionSet::default()).unwrap();

        assert_eq!(stats.copied, 2);
        assert_eq!(
            std::fs::read_to_string(dst.join("a/b/c/Deep.smali")).unwrap(),
            "deep"
        );
    }

    #[cfg(unix)]
    #[test]
    fn given_pattern_matching_directory_when_copying_then_files_below_are_excluded() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("smali");
        let dst = temp.path().join("java");
        write(&src.join("com/ads/Banner.smali"), "b");
        write(&src.join("com/app/Main.smali"), "m");

        copy_excluding(
            &RealFileSystem,
            &src,
            &dst,
            &ExclusionSet::from_patterns(["/ads/"]),
        )
        .unwrap();

        assert!(dst.join("com/ads").is_dir());
        assert!(!dst.join("com/ads/Banner.smali").exists());
        assert!(dst.join("com/app/Main.smali").exists());
    }

    #[test]
    fn given_missing_source_when_copying_then_fails() {
        let temp = TempDir::new().unwrap();
        let result = copy_excluding(
            &RealFileSystem,
            &temp.path().join("nope"),
            &temp.path().join("java"),
            &ExclusionSet::default(),
        );
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn given_symlink_cycle_when_copying_then_link_is_skipped() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("smali");
        let dst = temp.path().join("java");
        write(&src.join("x/Main.smali"), "m");
        std::os::unix::fs::symlink(&src, src.join("x/loop")).unwrap();

        let stats = copy_excluding(&RealFileSystem, &src, &dst, &ExclusionSet::default()).unwrap();

        assert_eq!(stats.copied, 1);
        assert!(!dst.join("x/loop").exists());
    }
}
