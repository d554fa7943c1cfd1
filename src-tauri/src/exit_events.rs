use std::path::Path;

use tauri::{AppHandle, Manager};

use crate::{append_shutdown_log, reset_profile, LaunchContext, ResetState};

/// Removes the profile when a reset was confirmed. Returns whether anything
/// was deleted.
pub(crate) fn exit_cleanup(reset_scheduled: bool, user_data_dir: &Path) -> Result<bool, String> {
    if !reset_scheduled {
        return Ok(false);
    }
    reset_profile::delete_user_data_dir(user_data_dir)?;
    Ok(true)
}

pub(crate) fn handle_exit_event(app_handle: &AppHandle) {
    let reset_scheduled = app_handle.state::<ResetState>().is_scheduled();
    let user_data_dir = app_handle.state::<LaunchContext>().user_data_dir.clone();

    match exit_cleanup(reset_scheduled, &user_data_dir) {
        Ok(true) => append_shutdown_log(&format!("deleted {}", user_data_dir.display())),
        Ok(false) => append_shutdown_log("shell exiting"),
        Err(error) => {
            append_shutdown_log(&format!("reset failed: {error}"));
            eprintln!("tron reset failed: {error}");
            std::process::exit(1);
        }
    }
}
