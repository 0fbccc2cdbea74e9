//! The `go build` invocation.

use std::collections::VecDeque;
use std::ffi::OsString;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::config::InstallConfig;
use crate::error::InstallError;
use crate::layout::BuildLayout;
use crate::preflight::Toolchain;

/// Number of trailing stderr lines kept for the failure message.
const STDERR_TAIL_LINES: usize = 20;

/// A fully-resolved build command.
#[derive(Debug, Clone)]
pub struct BuildCommand {
    toolchain: Toolchain,
    ldflags: String,
    output: PathBuf,
    entry_point: String,
    working_dir: PathBuf,
}

impl BuildCommand {
    pub fn from_layout(
        toolchain: &Toolchain,
        layout: &BuildLayout,
        config: &InstallConfig,
    ) -> Self {
        Self {
            toolchain: toolchain.clone(),
            ldflags: config.ldflags.clone(),
            output: layout.executable.clone(),
            entry_point: layout.entry_point.clone(),
            working_dir: layout.root.clone(),
        }
    }

    /// Arguments passed to the toolchain, excluding the program itself.
    pub fn args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["build".into()];
        if !self.ldflags.is_empty() {
            args.push("-ldflags".into());
            args.push(self.ldflags.clone().into());
        }
        args.push("-o".into());
        args.push(self.output.clone().into_os_string());
        args.push(self.entry_point.clone().into());
        args
    }

    /// Shell-style rendering of the command, for the `Executing:` line.
    pub fn display(&self) -> String {
        let mut line = format!("{} build", self.toolchain.name);
        if !self.ldflags.is_empty() {
            line.push_str(&format!(" -ldflags \"{}\"", self.ldflags));
        }
        line.push_str(&format!(
            " -o \"{}\" {}",
            self.output.display(),
            self.entry_point
        ));
        line
    }

    /// Run the build, streaming its output.
    ///
    /// Stdout is inherited. Stderr is forwarded line by line as it arrives
    /// and its tail is kept so a failure can report what the toolchain said.
    pub fn run(&self) -> Result<(), InstallError> {
        let mut cmd = self.toolchain.command();
        cmd.args(self.args())
            .current_dir(&self.working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped());
        debug!(command = ?cmd, "spawning build");

        let mut child = cmd.spawn().map_err(|e| InstallError::BuildFailed {
            detail: format!("could not launch `{}`: {}", self.toolchain.name, e),
        })?;

        let tail = match child.stderr.take() {
            Some(stderr) => forward_stderr(BufReader::new(stderr), &mut io::stderr()),
            None => VecDeque::new(),
        };

        let status = child.wait().map_err(|e| InstallError::BuildFailed {
            detail: format!("waiting for `{}`: {}", self.toolchain.name, e),
        })?;

        if !status.success() {
            return Err(InstallError::BuildFailed {
                detail: failure_detail(&self.display(), status, &tail),
            });
        }

        Ok(())
    }
}

/// Copy `reader` to `sink` line by line, returning the last lines seen.
fn forward_stderr<R: BufRead>(mut reader: R, sink: &mut dyn Write) -> VecDeque<String> {
    let mut tail = VecDeque::with_capacity(STDERR_TAIL_LINES);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let _ = sink.write_all(&buf);
                let _ = sink.flush();

                let line = String::from_utf8_lossy(&buf).trim_end().to_string();
                if tail.len() == STDERR_TAIL_LINES {
                    tail.pop_front();
                }
                tail.push_back(line);
            }
            Err(e) => {
                debug!(error = %e, "stopped reading build stderr");
                break;
            }
        }
    }

    tail
}

fn failure_detail(command: &str, status: ExitStatus, tail: &VecDeque<String>) -> String {
    let mut detail = format!("Command failed: {command} ({status})");
    let output = tail
        .iter()
        .filter(|line| !line.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");
    if !output.is_empty() {
        detail.push('\n');
        detail.push_str(&output);
    }
    detail
}
