use tauri::{
    menu::{Menu, MenuItem, MenuItemKind, PredefinedMenuItem, Submenu, HELP_SUBMENU_ID},
    AppHandle, Runtime,
};

use crate::{
    menu_actions::{
        opacity_menu_id, resize_menu_id, MENU_COPY_LINK, MENU_OPEN_IN_BROWSER,
        MENU_RESET_AND_QUIT, MENU_TOGGLE_ALWAYS_ON_TOP, MENU_TOGGLE_FRAME, MENU_TOGGLE_TITLE_BAR,
    },
    window_options::WindowOptions,
    OPACITY_PRESETS, RESIZE_PRESETS,
};

pub(crate) struct ToolsMenuLabels {
    pub(crate) title_bar: &'static str,
    pub(crate) frame: &'static str,
}

pub(crate) fn tools_menu_labels(options: &WindowOptions) -> ToolsMenuLabels {
    ToolsMenuLabels {
        title_bar: if options.is_title_bar_hidden() {
            "Enable Title Bar and Relaunch"
        } else {
            "Disable Title Bar and Relaunch"
        },
        frame: if options.is_frameless() {
            "Enable Window Frame and Relaunch"
        } else {
            "Disable Window Frame and Relaunch"
        },
    }
}

pub(crate) fn resize_label(width: u32, height: u32) -> String {
    format!("{width} × {height}")
}

pub(crate) fn opacity_percent(opacity: f64) -> u8 {
    (opacity.clamp(0.0, 1.0) * 100.0).round() as u8
}

fn menu_item<R: Runtime>(app_handle: &AppHandle<R>, id: &str, label: &str) -> Result<MenuItem<R>, String> {
    MenuItem::with_id(app_handle, id, label, true, None::<&str>)
        .map_err(|error| format!("Failed to create menu item {id}: {error}"))
}

fn separator<R: Runtime>(app_handle: &AppHandle<R>) -> Result<PredefinedMenuItem<R>, String> {
    PredefinedMenuItem::separator(app_handle)
        .map_err(|error| format!("Failed to create menu separator: {error}"))
}

fn build_resize_submenu<R: Runtime>(app_handle: &AppHandle<R>) -> Result<Submenu<R>, String> {
    let submenu = Submenu::new(app_handle, "Resize", true)
        .map_err(|error| format!("Failed to create resize menu: {error}"))?;
    for (width, height) in RESIZE_PRESETS {
        let item = menu_item(
            app_handle,
            &resize_menu_id(width, height),
            &resize_label(width, height),
        )?;
        submenu
            .append(&item)
            .map_err(|error| format!("Failed to append resize preset: {error}"))?;
    }
    Ok(submenu)
}

fn build_opacity_submenu<R: Runtime>(app_handle: &AppHandle<R>) -> Result<Submenu<R>, String> {
    let submenu = Submenu::new(app_handle, "Set Opacity", true)
        .map_err(|error| format!("Failed to create opacity menu: {error}"))?;
    for opacity in OPACITY_PRESETS {
        let percent = opacity_percent(opacity);
        let item = menu_item(app_handle, &opacity_menu_id(percent), &format!("{percent}%"))?;
        submenu
            .append(&item)
            .map_err(|error| format!("Failed to append opacity preset: {error}"))?;
    }
    Ok(submenu)
}

fn build_tools_submenu<R: Runtime>(
    app_handle: &AppHandle<R>,
    options: &WindowOptions,
) -> Result<Submenu<R>, String> {
    let labels = tools_menu_labels(options);
    let open_in_browser = menu_item(app_handle, MENU_OPEN_IN_BROWSER, "Open in Browser")?;
    let copy_link = menu_item(app_handle, MENU_COPY_LINK, "Copy Link")?;
    let resize = build_resize_submenu(app_handle)?;
    let always_on_top = menu_item(app_handle, MENU_TOGGLE_ALWAYS_ON_TOP, "Toggle Always On Top")?;
    let opacity = build_opacity_submenu(app_handle)?;
    let title_bar = menu_item(app_handle, MENU_TOGGLE_TITLE_BAR, labels.title_bar)?;
    let frame = menu_item(app_handle, MENU_TOGGLE_FRAME, labels.frame)?;

    Submenu::with_items(
        app_handle,
        "Tools",
        true,
        &[
            &open_in_browser,
            &copy_link,
            &separator(app_handle)?,
            &resize,
            &always_on_top,
            &opacity,
            &separator(app_handle)?,
            &title_bar,
            &frame,
        ],
    )
    .map_err(|error| format!("Failed to create tools menu: {error}"))
}

fn build_help_submenu<R: Runtime>(app_handle: &AppHandle<R>) -> Result<Submenu<R>, String> {
    let reset = menu_item(app_handle, MENU_RESET_AND_QUIT, "Reset and Quit")?;
    Submenu::with_id_and_items(app_handle, HELP_SUBMENU_ID, "Help", true, &[&reset])
        .map_err(|error| format!("Failed to create help menu: {error}"))
}

/// The platform default menu with its trailing Help menu replaced by Tools
/// and a Help menu carrying Reset and Quit.
pub(crate) fn build_app_menu<R: Runtime>(
    app_handle: &AppHandle<R>,
    options: &WindowOptions,
) -> Result<Menu<R>, String> {
    let menu = Menu::default(app_handle)
        .map_err(|error| format!("Failed to create default menu: {error}"))?;
    let items = menu
        .items()
        .map_err(|error| format!("Failed to read default menu: {error}"))?;
    if let Some(MenuItemKind::Submenu(last)) = items.last() {
        if last.id().as_ref() == HELP_SUBMENU_ID {
            menu.remove_at(items.len() - 1)
                .map_err(|error| format!("Failed to remove default help menu: {error}"))?;
        }
    }

    menu.append(&build_tools_submenu(app_handle, options)?)
        .map_err(|error| format!("Failed to append tools menu: {error}"))?;
    menu.append(&build_help_submenu(app_handle)?)
        .map_err(|error| format!("Failed to append help menu: {error}"))?;
    Ok(menu)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options(value: serde_json::Value) -> WindowOptions {
        let serde_json::Value::Object(map) = value else {
            panic!("expected object");
        };
        WindowOptions::from_map(map).expect("window options")
    }

    #[test]
    fn tools_labels_offer_to_disable_by_default() {
        let labels = tools_menu_labels(&WindowOptions::default());
        assert_eq!(labels.title_bar, "Disable Title Bar and Relaunch");
        assert_eq!(labels.frame, "Disable Window Frame and Relaunch");
    }

    #[test]
    fn tools_labels_offer_to_enable_when_hidden_or_frameless() {
        let labels = tools_menu_labels(&options(json!({
            "titleBarStyle": "hidden",
            "frame": false,
        })));
        assert_eq!(labels.title_bar, "Enable Title Bar and Relaunch");
        assert_eq!(labels.frame, "Enable Window Frame and Relaunch");
    }

    #[test]
    fn preset_labels_match_menu_text() {
        assert_eq!(resize_label(1280, 720), "1280 × 720");
        let percents: Vec<u8> = OPACITY_PRESETS.iter().copied().map(opacity_percent).collect();
        assert_eq!(percents, vec![25, 50, 75, 100]);
    }
}
