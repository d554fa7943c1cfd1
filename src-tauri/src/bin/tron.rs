//! Command-line entry: runs the `tron-shell` GUI binary that sits next to this
//! executable with the same arguments and exits with its status.

use std::{
    env,
    ffi::OsString,
    path::{Path, PathBuf},
    process::{self, Command, ExitStatus},
};

const SHELL_BINARY_NAME: &str = "tron-shell";

fn shell_binary_path(current_exe: &Path) -> Option<PathBuf> {
    current_exe
        .parent()
        .map(|dir| dir.join(format!("{SHELL_BINARY_NAME}{}", env::consts::EXE_SUFFIX)))
}

/// Signal-terminated children have no code and map to 1.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

fn run_shell(shell: &Path, args: &[OsString]) -> Result<i32, String> {
    if !shell.is_file() {
        return Err(format!("GUI shell not found at {}", shell.display()));
    }

    let status = Command::new(shell)
        .args(args)
        .status()
        .map_err(|error| format!("Failed to start {}: {error}", shell.display()))?;
    Ok(exit_code(status))
}

fn launch(args: &[OsString]) -> Result<i32, String> {
    let current_exe =
        env::current_exe().map_err(|error| format!("Failed to locate tron executable: {error}"))?;
    let shell = shell_binary_path(&current_exe)
        .ok_or_else(|| format!("Cannot resolve directory of {}", current_exe.display()))?;
    run_shell(&shell, args)
}

fn main() {
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    match launch(&args) {
        Ok(code) => process::exit(code),
        Err(error) => {
            eprintln!("tron: {error}");
            process::exit(1);
        }
    }
}
