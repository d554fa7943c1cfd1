use tauri::{AppHandle, LogicalSize, Manager, WebviewWindow};
use tauri_plugin_clipboard_manager::ClipboardExt;

use crate::{append_desktop_log, external_url, window_opacity, MAIN_WINDOW_LABEL};

/// The window Tools actions apply to: the focused one, else main, else any.
pub(crate) fn focused_window(app_handle: &AppHandle) -> Option<WebviewWindow> {
    let windows = app_handle.webview_windows();
    windows
        .values()
        .find(|window| window.is_focused().unwrap_or(false))
        .cloned()
        .or_else(|| windows.get(MAIN_WINDOW_LABEL).cloned())
        .or_else(|| windows.values().next().cloned())
}

fn current_url(window: &WebviewWindow) -> Result<String, String> {
    window
        .url()
        .map(|url| url.to_string())
        .map_err(|error| format!("Failed to read URL of window {}: {error}", window.label()))
}

pub(crate) fn open_current_page_in_browser(window: &WebviewWindow) -> Result<(), String> {
    let url = current_url(window)?;
    external_url::open_in_system_browser(&url)
}

pub(crate) fn copy_current_link(app_handle: &AppHandle, window: &WebviewWindow) -> Result<(), String> {
    let url = current_url(window)?;
    copy_text(app_handle, &url)
}

pub(crate) fn copy_text(app_handle: &AppHandle, text: &str) -> Result<(), String> {
    app_handle
        .clipboard()
        .write_text(text)
        .map_err(|error| format!("Failed to write clipboard: {error}"))
}

pub(crate) fn resize_and_center(window: &WebviewWindow, width: u32, height: u32) -> Result<(), String> {
    window
        .set_size(LogicalSize::new(f64::from(width), f64::from(height)))
        .map_err(|error| format!("Failed to resize window {}: {error}", window.label()))?;
    window
        .center()
        .map_err(|error| format!("Failed to center window {}: {error}", window.label()))
}

pub(crate) fn toggle_always_on_top(window: &WebviewWindow) -> Result<bool, String> {
    let enabled = !window.is_always_on_top().map_err(|error| {
        format!(
            "Failed to read always-on-top for window {}: {error}",
            window.label()
        )
    })?;
    window.set_always_on_top(enabled).map_err(|error| {
        format!(
            "Failed to set always-on-top for window {}: {error}",
            window.label()
        )
    })?;
    Ok(enabled)
}

pub(crate) fn set_opacity_percent(window: &WebviewWindow, percent: u8) -> Result<(), String> {
    window_opacity::set_window_opacity(window, window_opacity::percent_to_opacity(percent))
}

pub(crate) fn navigate_history(window: &WebviewWindow, forward: bool) -> Result<(), String> {
    let script = if forward {
        "history.forward()"
    } else {
        "history.back()"
    };
    window
        .eval(script)
        .map_err(|error| format!("Failed to navigate window {}: {error}", window.label()))
}

pub(crate) fn log_action_result(action: &str, result: Result<(), String>) {
    if let Err(error) = result {
        append_desktop_log(&format!("{action} failed: {error}"));
    }
}
