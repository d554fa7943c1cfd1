use std::sync::atomic::{AtomicU64, Ordering};

use tauri::{
    webview::{NewWindowFeatures, NewWindowResponse},
    AppHandle, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder, Wry,
};
use url::Url;

use crate::{
    append_desktop_log,
    context_menu::CONTEXT_MENU_BRIDGE_SCRIPT,
    downloads,
    window_opacity,
    window_options::{apply_window_options, WindowGeometry, WindowOptions},
    LaunchContext, CHILD_WINDOW_LABEL_PREFIX, CHILD_WINDOW_OFFSET,
    MAIN_WINDOW_LABEL,
};

static NEXT_CHILD_WINDOW_ID: AtomicU64 = AtomicU64::new(1);

fn next_child_window_label() -> String {
    format!(
        "{CHILD_WINDOW_LABEL_PREFIX}{}",
        NEXT_CHILD_WINDOW_ID.fetch_add(1, Ordering::Relaxed)
    )
}

pub(crate) fn child_window_geometry(parent: WindowGeometry) -> WindowGeometry {
    WindowGeometry {
        x: parent.x + CHILD_WINDOW_OFFSET,
        y: parent.y + CHILD_WINDOW_OFFSET,
        ..parent
    }
}

fn current_geometry(window: &WebviewWindow) -> Result<WindowGeometry, String> {
    let scale_factor = window
        .scale_factor()
        .map_err(|error| format!("Failed to read scale factor: {error}"))?;
    let position = window
        .outer_position()
        .map_err(|error| format!("Failed to read window position: {error}"))?
        .to_logical::<f64>(scale_factor);
    let size = window
        .inner_size()
        .map_err(|error| format!("Failed to read window size: {error}"))?
        .to_logical::<f64>(scale_factor);

    Ok(WindowGeometry {
        x: position.x,
        y: position.y,
        width: size.width,
        height: size.height,
    })
}

pub(crate) fn create_main_window(
    app_handle: &AppHandle,
    launch: &LaunchContext,
) -> Result<WebviewWindow, String> {
    build_site_window(
        app_handle,
        launch,
        MAIN_WINDOW_LABEL,
        WebviewUrl::External(launch.url.clone()),
        &launch.options,
        None,
    )
}

/// Builds a window for the site with the shared profile, the context-menu
/// bridge and child-window handling. Loading starts asynchronously.
fn build_site_window(
    app_handle: &AppHandle,
    launch: &LaunchContext,
    label: &str,
    url: WebviewUrl,
    options: &WindowOptions,
    features: Option<NewWindowFeatures>,
) -> Result<WebviewWindow, String> {
    let mut builder = WebviewWindowBuilder::new(app_handle, label, url)
        .title(launch.window_title())
        .data_directory(launch.user_data_dir.clone())
        .initialization_script(CONTEXT_MENU_BRIDGE_SCRIPT);

    #[cfg(target_os = "macos")]
    {
        builder = builder.data_store_identifier(crate::target_url::data_store_identifier(
            &crate::target_url::profile_dir_name(&launch.host),
        ));
    }

    if let Some(features) = features {
        builder = builder.window_features(features);
    }
    builder = apply_window_options(builder, options, append_desktop_log);

    let opener_app_handle = app_handle.clone();
    let opener_label = label.to_string();
    builder = builder
        .on_document_title_changed(|window, title| {
            if let Err(error) = window.set_title(&title) {
                append_desktop_log(&format!(
                    "failed to update title of window {}: {error}",
                    window.label()
                ));
            }
        })
        .on_new_window(move |url, features| {
            open_child_window(&opener_app_handle, &opener_label, url, features)
        })
        .on_download(|_webview, event| downloads::handle_download_event(event));

    let window = builder
        .build()
        .map_err(|error| format!("Failed to create window {label}: {error}"))?;

    if let Some(opacity) = options.opacity {
        if let Err(error) = window_opacity::set_window_opacity(&window, opacity) {
            append_desktop_log(&format!("failed to apply initial opacity to {label}: {error}"));
        }
    }

    append_desktop_log(&format!("window {label} created"));
    Ok(window)
}

fn open_child_window(
    app_handle: &AppHandle,
    opener_label: &str,
    url: Url,
    features: NewWindowFeatures,
) -> NewWindowResponse<Wry> {
    let Some(opener) = app_handle.get_webview_window(opener_label) else {
        append_desktop_log(&format!(
            "new window for {url} requested by missing window {opener_label}; using platform default"
        ));
        return NewWindowResponse::Allow;
    };

    let geometry = match current_geometry(&opener) {
        Ok(parent) => child_window_geometry(parent),
        Err(error) => {
            append_desktop_log(&format!(
                "failed to read geometry of {opener_label} for child window: {error}"
            ));
            return NewWindowResponse::Allow;
        }
    };

    let launch = app_handle.state::<LaunchContext>();
    let options = launch.options.with_geometry(geometry);
    let label = next_child_window_label();
    append_desktop_log(&format!("opening {url} from {opener_label} in {label}"));

    // The platform navigates the returned webview to the requested URL itself.
    let blank = match Url::parse("about:blank") {
        Ok(blank) => blank,
        Err(error) => {
            append_desktop_log(&format!("failed to prepare child window: {error}"));
            return NewWindowResponse::Deny;
        }
    };

    match build_site_window(
        app_handle,
        &launch,
        &label,
        WebviewUrl::External(blank),
        &options,
        Some(features),
    ) {
        Ok(window) => NewWindowResponse::Create { window },
        Err(error) => {
            append_desktop_log(&format!("failed to create child window for {url}: {error}"));
            NewWindowResponse::Deny
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn child_window_geometry_offsets_position_and_keeps_size() {
        let parent = WindowGeometry {
            x: 100.0,
            y: 50.0,
            width: 1024.0,
            height: 768.0,
        };
        assert_eq!(
            child_window_geometry(parent),
            WindowGeometry {
                x: 124.0,
                y: 74.0,
                width: 1024.0,
                height: 768.0,
            }
        );
    }

    #[test]
    fn cascading_children_keep_moving_down_and_right() {
        let parent = WindowGeometry {
            x: 0.0,
            y: 0.0,
            width: 800.0,
            height: 600.0,
        };
        let grandchild = child_window_geometry(child_window_geometry(parent));
        assert_eq!((grandchild.x, grandchild.y), (48.0, 48.0));
    }

    #[test]
    fn child_window_labels_are_unique() {
        let first = next_child_window_label();
        let second = next_child_window_label();
        assert!(first.starts_with("child-"));
        assert_ne!(first, second);
    }
}
