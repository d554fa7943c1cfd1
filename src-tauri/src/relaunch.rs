use std::ffi::OsString;

use tauri::{AppHandle, Manager};

use crate::{
    append_shutdown_log,
    launch_args::{append_option, strip_option},
};

/// Arguments for the next launch with `flag` flipped: removed when it is in
/// effect now, appended otherwise.
pub(crate) fn toggled_relaunch_args(args: &[String], flag: &str, currently_set: bool) -> Vec<String> {
    if currently_set {
        strip_option(args, flag)
    } else {
        append_option(args, flag)
    }
}

/// Restarts the shell with the same arguments except for `flag`. Never returns.
pub(crate) fn relaunch_with_toggled_flag(
    app_handle: &AppHandle,
    raw_args: &[String],
    flag: &str,
    currently_set: bool,
) -> ! {
    let next_args = toggled_relaunch_args(raw_args, flag, currently_set);
    append_shutdown_log(&format!("relaunching with arguments {next_args:?}"));

    let mut env = app_handle.env();
    let program = env.args_os.first().cloned();
    env.args_os = program
        .into_iter()
        .chain(next_args.into_iter().map(OsString::from))
        .collect();

    app_handle.cleanup_before_exit();
    tauri::process::restart(&env)
}
