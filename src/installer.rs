//! The install-time build sequence.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::build::BuildCommand;
use crate::config::{self, InstallConfig};
use crate::error::InstallError;
use crate::layout::BuildLayout;
use crate::output;
use crate::platform::Platform;
use crate::preflight::{check_toolchain, resolve_toolchain};

pub struct Installer {
    config: InstallConfig,
    layout: BuildLayout,
}

impl Installer {
    pub fn new(config: InstallConfig, root: &Path) -> Self {
        Self::for_platform(config, root, Platform::current())
    }

    pub fn for_platform(config: InstallConfig, root: &Path, platform: Platform) -> Self {
        let layout = BuildLayout::new(root, &config, platform);
        Self { config, layout }
    }

    pub fn layout(&self) -> &BuildLayout {
        &self.layout
    }

    /// Ensure the output directory, check the toolchain, then build.
    ///
    /// Returns the path of the produced executable.
    pub fn run(&self) -> Result<PathBuf, InstallError> {
        self.layout.ensure_output_dir()?;

        output::info("Building Viren binary...");

        let toolchain = resolve_toolchain(&self.config.toolchain);
        check_toolchain(&toolchain)?;

        let command = BuildCommand::from_layout(&toolchain, &self.layout, &self.config);
        output::info(&format!("Executing: {}", command.display()));
        command.run()?;

        info!(executable = %self.layout.executable.display(), "build finished");
        output::info("Build successful!");
        Ok(self.layout.executable.clone())
    }
}

/// Entry point used by the `viren-postinstall` binary.
///
/// Resolves the project root and configuration from the environment and
/// runs the installer.
pub fn run_from_env() -> Result<PathBuf, InstallError> {
    let root = config::project_root().map_err(|e| InstallError::Config {
        path: PathBuf::from("."),
        source: e.into(),
    })?;
    let config = InstallConfig::load(&root)?;
    info!(root = %root.display(), toolchain = %config.toolchain, "starting install-time build");

    Installer::new(config, &root).run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_toolchain_still_creates_output_dir() {
        let temp = tempfile::tempdir().unwrap();
        let config = InstallConfig {
            toolchain: "definitely_not_a_real_command_12345".into(),
            ..InstallConfig::default()
        };
        let installer = Installer::new(config, temp.path());

        let err = installer.run().unwrap_err();
        assert!(matches!(err, InstallError::ToolchainUnavailable { .. }));
        assert!(installer.layout().output_dir.is_dir());
        assert!(!installer.layout().executable.exists());
    }

    #[test]
    fn layout_follows_platform() {
        let installer = Installer::for_platform(
            InstallConfig::default(),
            Path::new("/pkg"),
            Platform::Windows,
        );
        assert_eq!(
            installer.layout().executable.file_name().unwrap(),
            "viren.exe"
        );
    }

    #[cfg(unix)]
    #[test]
    fn successful_build_returns_executable() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempfile::tempdir().unwrap();
        let script = temp.path().join("fake-go");
        // argv: build -ldflags "-s -w" -o <out> <entry>
        std::fs::write(
            &script,
            "#!/bin/sh\nif [ \"$1\" = build ]; then : > \"$5\"; fi\nexit 0\n",
        )
        .unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let config = InstallConfig {
            toolchain: script.display().to_string(),
            ..InstallConfig::default()
        };
        let installer = Installer::new(config, temp.path());

        let exe = installer.run().unwrap();
        assert_eq!(exe, temp.path().join("bin").join("viren"));
        assert!(exe.is_file());

        // A second run over the existing directory and binary still succeeds.
        installer.run().unwrap();
    }
}
