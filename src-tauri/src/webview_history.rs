use tauri::webview::PlatformWebview;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct HistoryState {
    pub(crate) can_go_back: bool,
    pub(crate) can_go_forward: bool,
}

/// Back/forward availability straight from the platform webview, for pages
/// whose script cannot tell. Must run inside `with_webview`.
#[cfg(target_os = "linux")]
pub(crate) fn native_history(webview: &PlatformWebview) -> Option<HistoryState> {
    use webkit2gtk::WebViewExt;

    let view = webview.inner();
    Some(HistoryState {
        can_go_back: view.can_go_back(),
        can_go_forward: view.can_go_forward(),
    })
}

#[cfg(target_os = "macos")]
pub(crate) fn native_history(webview: &PlatformWebview) -> Option<HistoryState> {
    use objc2::{msg_send, runtime::AnyObject};

    let view = webview.inner() as *mut AnyObject;
    if view.is_null() {
        return None;
    }
    unsafe {
        let can_go_back: bool = msg_send![view, canGoBack];
        let can_go_forward: bool = msg_send![view, canGoForward];
        Some(HistoryState {
            can_go_back,
            can_go_forward,
        })
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub(crate) fn native_history(_webview: &PlatformWebview) -> Option<HistoryState> {
    None
}
