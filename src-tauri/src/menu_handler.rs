use tauri::{AppHandle, Manager};

use crate::{
    append_desktop_log, downloads, external_url,
    menu_actions::{action_from_menu_id, ContextMenuAction, MenuAction},
    relaunch, reset_profile,
    window_actions::{self, log_action_result},
    ContextMenuState, LaunchContext, HIDE_TITLE_BAR_ARG, NO_FRAME_ARG,
};

pub(crate) fn handle_menu_event(app_handle: &AppHandle, menu_id: &str) {
    let Some(action) = action_from_menu_id(menu_id) else {
        return;
    };

    match action {
        MenuAction::ToggleTitleBar => {
            let launch = app_handle.state::<LaunchContext>();
            relaunch::relaunch_with_toggled_flag(
                app_handle,
                &launch.raw_args,
                HIDE_TITLE_BAR_ARG,
                launch.options.is_title_bar_hidden(),
            )
        }
        MenuAction::ToggleFrame => {
            let launch = app_handle.state::<LaunchContext>();
            relaunch::relaunch_with_toggled_flag(
                app_handle,
                &launch.raw_args,
                NO_FRAME_ARG,
                launch.options.is_frameless(),
            )
        }
        MenuAction::ResetAndQuit => reset_profile::confirm_reset_and_quit(app_handle),
        MenuAction::Context(action) => handle_context_action(app_handle, action),
        window_action => handle_window_action(app_handle, window_action),
    }
}

fn handle_window_action(app_handle: &AppHandle, action: MenuAction) {
    let Some(window) = window_actions::focused_window(app_handle) else {
        append_desktop_log(&format!("menu action {action:?} ignored: no window"));
        return;
    };

    match action {
        MenuAction::OpenInBrowser => log_action_result(
            "open in browser",
            window_actions::open_current_page_in_browser(&window),
        ),
        MenuAction::CopyLink => log_action_result(
            "copy link",
            window_actions::copy_current_link(app_handle, &window),
        ),
        MenuAction::Resize { width, height } => log_action_result(
            "resize",
            window_actions::resize_and_center(&window, width, height),
        ),
        MenuAction::ToggleAlwaysOnTop => {
            match window_actions::toggle_always_on_top(&window) {
                Ok(enabled) => append_desktop_log(&format!(
                    "always on top for {}: {enabled}",
                    window.label()
                )),
                Err(error) => append_desktop_log(&format!("toggle always on top failed: {error}")),
            }
        }
        MenuAction::SetOpacity { percent } => log_action_result(
            "set opacity",
            window_actions::set_opacity_percent(&window, percent),
        ),
        _ => {}
    }
}

fn handle_context_action(app_handle: &AppHandle, action: ContextMenuAction) {
    let Some(target) = app_handle.state::<ContextMenuState>().current() else {
        append_desktop_log(&format!("context action {action:?} ignored: no target"));
        return;
    };
    let Some(window) = app_handle.get_webview_window(&target.window_label) else {
        append_desktop_log(&format!(
            "context action {action:?} ignored: window {} is gone",
            target.window_label
        ));
        return;
    };
    let params = &target.params;

    match action {
        ContextMenuAction::Back => {
            log_action_result("back", window_actions::navigate_history(&window, false))
        }
        ContextMenuAction::Forward => {
            log_action_result("forward", window_actions::navigate_history(&window, true))
        }
        ContextMenuAction::OpenLinkInBrowser => {
            if let Some(link) = params.link() {
                log_action_result("open link", external_url::open_in_system_browser(link));
            }
        }
        ContextMenuAction::CopyLink => {
            if let Some(link) = params.link() {
                log_action_result("copy link", window_actions::copy_text(app_handle, link));
            }
        }
        ContextMenuAction::CopyImageAddress | ContextMenuAction::CopyVideoAddress => {
            if let Some(source) = params.media_source() {
                log_action_result(
                    "copy media address",
                    window_actions::copy_text(app_handle, source),
                );
            }
        }
        ContextMenuAction::SaveImageAs => {
            if let Some(source) = params.media_source() {
                downloads::save_media_as(&window, source, "image");
            }
        }
        ContextMenuAction::CopyImage => {
            if let Some(source) = params.media_source() {
                downloads::copy_image(&window, source);
            }
        }
        ContextMenuAction::SaveVideoAs => {
            if let Some(source) = params.media_source() {
                downloads::save_media_as(&window, source, "video");
            }
        }
        ContextMenuAction::LookUpSelection => {
            #[cfg(target_os = "macos")]
            log_action_result(
                "look up",
                external_url::look_up_in_dictionary(&params.selection_text),
            );
        }
        ContextMenuAction::SearchWithGoogle => log_action_result(
            "search with google",
            external_url::google_search_url(&params.selection_text)
                .and_then(|url| external_url::open_in_system_browser(url.as_str())),
        ),
        ContextMenuAction::InspectElement => {
            #[cfg(debug_assertions)]
            window.open_devtools();
        }
    }
}
