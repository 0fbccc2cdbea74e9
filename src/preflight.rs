//! Preflight checks for the install-time build.
//!
//! Validates that the Go toolchain responds before the build is attempted,
//! so a missing toolchain produces a remediation hint instead of a cryptic
//! launch error.
//!
//! # Example
//!
//! ```rust,no_run
//! use viren_postinstall::preflight::{check_toolchain, resolve_toolchain};
//!
//! let go = resolve_toolchain("go");
//! if let Err(e) = check_toolchain(&go) {
//!     eprintln!("{}", e);
//! }
//! ```

use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::InstallError;

/// A toolchain program as it will be invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Name as configured (`go`, `/opt/go/bin/go`, ...).
    pub name: String,
    /// Absolute path when the program was found on `PATH`, else the bare name.
    pub program: PathBuf,
}

impl Toolchain {
    pub fn command(&self) -> Command {
        Command::new(&self.program)
    }
}

/// Locate `name` on `PATH`.
///
/// Resolution failure is not an error here; the bare name is kept and
/// [`check_toolchain`] decides whether the toolchain is usable.
pub fn resolve_toolchain(name: &str) -> Toolchain {
    let program = match which::which(name) {
        Ok(path) => {
            debug!(toolchain = name, path = %path.display(), "resolved toolchain");
            path
        }
        Err(e) => {
            debug!(toolchain = name, error = %e, "toolchain not resolved on PATH");
            PathBuf::from(name)
        }
    };

    Toolchain {
        name: name.to_string(),
        program,
    }
}

/// Run `<toolchain> version` with all output discarded.
///
/// Any launch failure or non-zero exit means the toolchain is unavailable.
pub fn check_toolchain(toolchain: &Toolchain) -> Result<(), InstallError> {
    let status = toolchain
        .command()
        .arg("version")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map_err(|e| InstallError::ToolchainUnavailable {
            program: toolchain.name.clone(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(InstallError::ToolchainUnavailable {
            program: toolchain.name.clone(),
            reason: format!("`{} version` exited with {}", toolchain.name, status),
        });
    }

    debug!(toolchain = %toolchain.name, "toolchain responded to version query");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolvable_toolchain_keeps_bare_name() {
        let toolchain = resolve_toolchain("definitely_not_a_real_command_12345");
        assert_eq!(
            toolchain.program,
            PathBuf::from("definitely_not_a_real_command_12345")
        );
    }

    #[test]
    fn missing_toolchain_is_unavailable() {
        let toolchain = resolve_toolchain("definitely_not_a_real_command_12345");
        let err = check_toolchain(&toolchain).unwrap_err();
        match &err {
            InstallError::ToolchainUnavailable { program, .. } => {
                assert_eq!(program, "definitely_not_a_real_command_12345");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains("Go is required"));
    }

    #[cfg(unix)]
    #[test]
    fn toolchain_exiting_nonzero_is_unavailable() {
        // `false` ignores its arguments and always fails.
        let toolchain = resolve_toolchain("false");
        let err = check_toolchain(&toolchain).unwrap_err();
        assert!(matches!(err, InstallError::ToolchainUnavailable { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn responsive_toolchain_passes() {
        // `true` ignores its arguments and always succeeds.
        let toolchain = resolve_toolchain("true");
        assert!(toolchain.program.is_absolute());
        check_toolchain(&toolchain).unwrap();
    }
}
