//! Output layout for the install-time build.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::config::InstallConfig;
use crate::error::InstallError;
use crate::platform::Platform;

/// Paths the build reads from and writes to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildLayout {
    /// Working directory for the build command.
    pub root: PathBuf,
    pub output_dir: PathBuf,
    pub executable: PathBuf,
    /// Passed to the toolchain verbatim, relative to `root`.
    pub entry_point: String,
}

impl BuildLayout {
    pub fn new(root: &Path, config: &InstallConfig, platform: Platform) -> Self {
        let output_dir = resolve_root_path(root, &config.output_dir);
        let executable = output_dir.join(platform.executable_name(&config.binary_name));

        Self {
            root: root.to_path_buf(),
            output_dir,
            executable,
            entry_point: config.entry_point.clone(),
        }
    }

    /// Create the output directory (and missing parents) if it is absent.
    pub fn ensure_output_dir(&self) -> Result<(), InstallError> {
        if self.output_dir.is_dir() {
            return Ok(());
        }

        fs::create_dir_all(&self.output_dir).map_err(|source| InstallError::OutputDirectory {
            path: self.output_dir.clone(),
            source,
        })?;
        debug!(path = %self.output_dir.display(), "created output directory");
        Ok(())
    }
}

fn resolve_root_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn executable_lands_in_output_dir() {
        let config = InstallConfig::default();
        let layout = BuildLayout::new(Path::new("/pkg"), &config, Platform::Unix);
        assert_eq!(layout.output_dir, PathBuf::from("/pkg/bin"));
        assert_eq!(layout.executable, PathBuf::from("/pkg/bin/viren"));

        let layout = BuildLayout::new(Path::new("/pkg"), &config, Platform::Windows);
        assert_eq!(layout.executable, PathBuf::from("/pkg/bin/viren.exe"));
    }

    #[test]
    fn absolute_output_dir_is_not_rebased() {
        let temp = tempfile::tempdir().unwrap();
        let config = InstallConfig {
            output_dir: temp.path().join("out"),
            ..InstallConfig::default()
        };
        let layout = BuildLayout::new(Path::new("pkg"), &config, Platform::Unix);
        assert_eq!(layout.output_dir, temp.path().join("out"));
    }

    #[test]
    fn ensure_output_dir_creates_nested_directories() {
        let temp = tempfile::tempdir().unwrap();
        let config = InstallConfig {
            output_dir: PathBuf::from("target/bin"),
            ..InstallConfig::default()
        };
        let layout = BuildLayout::new(temp.path(), &config, Platform::current());

        assert!(!layout.output_dir.exists());
        layout.ensure_output_dir().unwrap();
        assert!(layout.output_dir.is_dir());
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let temp = tempfile::tempdir().unwrap();
        let layout = BuildLayout::new(temp.path(), &InstallConfig::default(), Platform::Unix);

        layout.ensure_output_dir().unwrap();
        fs::write(&layout.executable, b"previous build").unwrap();
        layout.ensure_output_dir().unwrap();

        assert!(layout.executable.is_file());
    }

    #[test]
    fn ensure_output_dir_fails_when_path_is_a_file() {
        let temp = tempfile::tempdir().unwrap();
        fs::write(temp.path().join("bin"), b"not a directory").unwrap();
        let layout = BuildLayout::new(temp.path(), &InstallConfig::default(), Platform::Unix);

        let err = layout.ensure_output_dir().unwrap_err();
        assert!(matches!(err, InstallError::OutputDirectory { .. }));
    }
}
