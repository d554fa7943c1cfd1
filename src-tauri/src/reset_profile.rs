use std::{fs, path::Path};

use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};

use crate::{append_desktop_log, append_shutdown_log, LaunchContext, ResetState};

pub(crate) fn reset_prompt(user_data_dir: &Path) -> String {
    format!("Delete {} and quit?", user_data_dir.display())
}

/// Confirms, then quits; the profile is removed once the runtime exits.
pub(crate) fn confirm_reset_and_quit(app_handle: &AppHandle) {
    let app_handle = app_handle.clone();
    tauri::async_runtime::spawn(async move {
        let user_data_dir = app_handle.state::<LaunchContext>().user_data_dir.clone();
        let confirmed = app_handle
            .dialog()
            .message(reset_prompt(&user_data_dir))
            .title("Reset and Quit")
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .blocking_show();
        if !confirmed {
            append_desktop_log("reset cancelled");
            return;
        }

        app_handle.state::<ResetState>().schedule();
        for (label, window) in app_handle.webview_windows() {
            if let Err(error) = window.clear_all_browsing_data() {
                append_desktop_log(&format!("failed to clear browsing data of {label}: {error}"));
            }
        }
        append_shutdown_log(&format!(
            "reset confirmed; {} will be deleted on exit",
            user_data_dir.display()
        ));
        app_handle.exit(0);
    });
}

pub(crate) fn delete_user_data_dir(user_data_dir: &Path) -> Result<(), String> {
    fs::remove_dir_all(user_data_dir)
        .map_err(|error| format!("Failed to delete {}: {error}", user_data_dir.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_prompt_names_the_profile_directory() {
        let prompt = reset_prompt(Path::new("/data/tron/github.com"));
        assert_eq!(prompt, "Delete /data/tron/github.com and quit?");
    }

    #[test]
    fn delete_user_data_dir_removes_nested_contents() {
        let temp = tempfile::tempdir().expect("temp dir");
        let profile = temp.path().join("tron").join("localhost_3000");
        fs::create_dir_all(profile.join("Local Storage")).expect("profile dirs");
        fs::write(profile.join("Cookies"), b"session").expect("cookie file");

        delete_user_data_dir(&profile).expect("delete profile");

        assert!(!profile.exists());
        assert!(temp.path().join("tron").exists());
    }

    #[test]
    fn delete_user_data_dir_reports_missing_directory() {
        let temp = tempfile::tempdir().expect("temp dir");
        let error = delete_user_data_dir(&temp.path().join("missing"))
            .expect_err("missing directory");
        assert!(error.starts_with("Failed to delete"));
    }
}
