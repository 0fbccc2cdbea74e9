//! Install-time builder for the `viren` executable.
//!
//! Runs as a package manager's `postinstall` hook and compiles `viren` with
//! the Go toolchain instead of shipping a prebuilt binary:
//!
//! - **Layout** - Output directory and platform-specific executable name
//! - **Preflight** - Verifies the Go toolchain responds before building
//! - **Build** - Runs `go build`, streaming the toolchain's output
//! - **Output** - Colored status lines for the person watching the install
//!
//! # Sequence
//!
//! ```text
//! ensure <root>/bin ──> go version ──> go build -o bin/viren[.exe] ./cmd/viren/main.go
//!                           │                     │
//!                           └── fail: exit 1      └── fail: exit 1
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use viren_postinstall::{InstallConfig, Installer};
//!
//! let root = Path::new(".");
//! let config = InstallConfig::load(root)?;
//! let exe = Installer::new(config, root).run()?;
//! println!("built {}", exe.display());
//! # Ok::<(), viren_postinstall::InstallError>(())
//! ```

pub mod build;
pub mod config;
pub mod error;
pub mod installer;
pub mod layout;
pub mod output;
pub mod platform;
pub mod preflight;

pub use config::InstallConfig;
pub use error::InstallError;
pub use installer::{run_from_env, Installer};
pub use platform::Platform;
