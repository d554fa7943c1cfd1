use tauri::{Runtime, WebviewWindow};

pub(crate) fn clamp_opacity(opacity: f64) -> f64 {
    if opacity.is_nan() {
        return 1.0;
    }
    opacity.clamp(0.0, 1.0)
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn alpha_byte(opacity: f64) -> u8 {
    (clamp_opacity(opacity) * 255.0).round() as u8
}

pub(crate) fn percent_to_opacity(percent: u8) -> f64 {
    f64::from(percent.min(100)) / 100.0
}

/// Sets whole-window translucency. Must run on the main thread.
pub(crate) fn set_window_opacity<R: Runtime>(
    window: &WebviewWindow<R>,
    opacity: f64,
) -> Result<(), String> {
    apply_native_opacity(window, clamp_opacity(opacity))
}

#[cfg(target_os = "windows")]
fn apply_native_opacity<R: Runtime>(window: &WebviewWindow<R>, opacity: f64) -> Result<(), String> {
    use windows::Win32::{
        Foundation::{COLORREF, HWND},
        UI::WindowsAndMessaging::{
            GetWindowLongW, SetLayeredWindowAttributes, SetWindowLongW, GWL_EXSTYLE, LWA_ALPHA,
            WS_EX_LAYERED,
        },
    };

    let raw_hwnd = window
        .hwnd()
        .map_err(|error| format!("Failed to read window handle: {error}"))?;
    let hwnd = HWND(raw_hwnd.0);

    let ex_style = unsafe { GetWindowLongW(hwnd, GWL_EXSTYLE) };
    let layered_style = ex_style | (WS_EX_LAYERED.0 as i32);
    if layered_style != ex_style {
        unsafe { SetWindowLongW(hwnd, GWL_EXSTYLE, layered_style) };
    }
    unsafe { SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha_byte(opacity), LWA_ALPHA) }
        .map_err(|error| format!("Failed to set window opacity: {error}"))
}

#[cfg(target_os = "macos")]
fn apply_native_opacity<R: Runtime>(window: &WebviewWindow<R>, opacity: f64) -> Result<(), String> {
    use objc2::{msg_send, runtime::AnyObject};

    let ns_window = window
        .ns_window()
        .map_err(|error| format!("Failed to read NSWindow handle: {error}"))?
        as *mut AnyObject;
    if ns_window.is_null() {
        return Err("NSWindow handle is null.".to_string());
    }
    unsafe {
        let _: () = msg_send![ns_window, setAlphaValue: opacity];
    }
    Ok(())
}

#[cfg(target_os = "linux")]
fn apply_native_opacity<R: Runtime>(window: &WebviewWindow<R>, opacity: f64) -> Result<(), String> {
    use gtk::prelude::WidgetExt;

    let gtk_window = window
        .gtk_window()
        .map_err(|error| format!("Failed to read GTK window: {error}"))?;
    gtk_window.set_opacity(opacity);
    Ok(())
}

#[cfg(not(any(target_os = "windows", target_os = "macos", target_os = "linux")))]
fn apply_native_opacity<R: Runtime>(_window: &WebviewWindow<R>, _opacity: f64) -> Result<(), String> {
    Err("Window opacity is not supported on this platform.".to_string())
}
