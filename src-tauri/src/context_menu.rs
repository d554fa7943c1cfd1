use std::borrow::Cow;

use serde::Deserialize;
use tauri::{
    menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem},
    AppHandle, Manager, Runtime, WebviewWindow,
};

use crate::{
    append_desktop_log,
    external_url::collapse_whitespace,
    menu_actions::ContextMenuAction,
    webview_history::{self, HistoryState},
    ContextMenuState, ContextMenuTarget,
};

/// Page-side half of the context menu: reports what was right-clicked.
pub(crate) const CONTEXT_MENU_BRIDGE_SCRIPT: &str = include_str!("context_menu_bridge.js");

const LOOK_UP_LABEL_MAX_CHARS: usize = 25;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MediaType {
    #[default]
    None,
    Image,
    Video,
    Audio,
    #[serde(other)]
    Other,
}

/// What the page reported about a right-click. History flags are `None`
/// when the page has no navigation API to ask.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ContextMenuParams {
    pub(crate) selection_text: String,
    pub(crate) link_url: Option<String>,
    pub(crate) is_editable: bool,
    pub(crate) media_type: MediaType,
    pub(crate) src_url: Option<String>,
    pub(crate) can_go_back: Option<bool>,
    pub(crate) can_go_forward: Option<bool>,
}

impl ContextMenuParams {
    pub(crate) fn link(&self) -> Option<&str> {
        self.link_url.as_deref().filter(|link| !link.is_empty())
    }

    pub(crate) fn media_source(&self) -> Option<&str> {
        self.src_url.as_deref().filter(|src| !src.is_empty())
    }

    fn has_selection(&self) -> bool {
        !self.selection_text.trim().is_empty()
    }

    fn needs_native_history(&self) -> bool {
        self.can_go_back.is_none() || self.can_go_forward.is_none()
    }

    /// Fills history flags the page left unknown.
    pub(crate) fn with_history(mut self, history: Option<HistoryState>) -> Self {
        if let Some(history) = history {
            self.can_go_back.get_or_insert(history.can_go_back);
            self.can_go_forward.get_or_insert(history.can_go_forward);
        }
        self
    }
}

/// Platform-dependent items of the context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ContextMenuFeatures {
    pub(crate) look_up_selection: bool,
    pub(crate) inspect_element: bool,
}

impl ContextMenuFeatures {
    pub(crate) fn current() -> Self {
        Self {
            look_up_selection: cfg!(target_os = "macos"),
            inspect_element: cfg!(debug_assertions),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ContextMenuEntry {
    Action {
        action: ContextMenuAction,
        enabled: bool,
    },
    Cut,
    Copy,
    Paste,
    Separator,
}

pub(crate) fn context_menu_entries(
    params: &ContextMenuParams,
    features: ContextMenuFeatures,
) -> Vec<ContextMenuEntry> {
    use ContextMenuEntry::{Copy, Cut, Paste, Separator};

    let action = |action, enabled| ContextMenuEntry::Action { action, enabled };
    let has_link = params.link().is_some();
    let has_source = params.media_source().is_some();
    let has_selection = params.has_selection();
    let navigation_visible = !has_selection
        && !has_link
        && !params.is_editable
        && params.media_type == MediaType::None;

    let mut entries = Vec::new();
    if navigation_visible {
        entries.push(action(
            ContextMenuAction::Back,
            params.can_go_back.unwrap_or(false),
        ));
        entries.push(action(
            ContextMenuAction::Forward,
            params.can_go_forward.unwrap_or(false),
        ));
    }
    if has_link {
        entries.push(action(ContextMenuAction::OpenLinkInBrowser, true));
    }

    entries.push(Separator);
    if features.look_up_selection && has_selection && !has_link {
        entries.push(action(ContextMenuAction::LookUpSelection, true));
    }

    entries.push(Separator);
    if has_selection {
        entries.push(action(ContextMenuAction::SearchWithGoogle, true));
    }

    entries.push(Separator);
    if params.is_editable {
        entries.push(Cut);
    }
    if params.is_editable || has_selection {
        entries.push(Copy);
    }
    if params.is_editable {
        entries.push(Paste);
    }

    entries.push(Separator);
    if params.media_type == MediaType::Image {
        entries.push(action(ContextMenuAction::SaveImageAs, has_source));
        entries.push(action(ContextMenuAction::CopyImage, has_source));
        entries.push(action(ContextMenuAction::CopyImageAddress, has_source));
    }

    entries.push(Separator);
    if params.media_type == MediaType::Video {
        entries.push(action(ContextMenuAction::SaveVideoAs, has_source));
        entries.push(action(ContextMenuAction::CopyVideoAddress, has_source));
    }

    entries.push(Separator);
    if has_link && params.media_type == MediaType::None {
        entries.push(action(ContextMenuAction::CopyLink, true));
    }

    entries.push(Separator);
    if features.inspect_element {
        entries.push(action(ContextMenuAction::InspectElement, true));
    }

    collapse_separators(entries)
}

fn collapse_separators(entries: Vec<ContextMenuEntry>) -> Vec<ContextMenuEntry> {
    let mut collapsed: Vec<ContextMenuEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        let is_separator = entry == ContextMenuEntry::Separator;
        if is_separator
            && collapsed
                .last()
                .map_or(true, |last| *last == ContextMenuEntry::Separator)
        {
            continue;
        }
        collapsed.push(entry);
    }
    if collapsed.last() == Some(&ContextMenuEntry::Separator) {
        collapsed.pop();
    }
    collapsed
}

fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}

pub(crate) fn entry_label(action: ContextMenuAction, params: &ContextMenuParams) -> Cow<'static, str> {
    match action {
        ContextMenuAction::LookUpSelection => Cow::Owned(format!(
            "Look Up “{}”",
            truncate_label(&collapse_whitespace(&params.selection_text), LOOK_UP_LABEL_MAX_CHARS)
        )),
        other => Cow::Borrowed(other.label()),
    }
}

fn build_context_menu<R: Runtime>(
    app_handle: &AppHandle<R>,
    entries: &[ContextMenuEntry],
    params: &ContextMenuParams,
) -> Result<Menu<R>, String> {
    let menu = Menu::new(app_handle)
        .map_err(|error| format!("Failed to create context menu: {error}"))?;

    for entry in entries {
        let item: Box<dyn IsMenuItem<R>> = match *entry {
            ContextMenuEntry::Action { action, enabled } => Box::new(
                MenuItem::with_id(
                    app_handle,
                    action.menu_id(),
                    entry_label(action, params),
                    enabled,
                    None::<&str>,
                )
                .map_err(|error| {
                    format!("Failed to create context menu item {}: {error}", action.menu_id())
                })?,
            ),
            ContextMenuEntry::Cut => Box::new(
                PredefinedMenuItem::cut(app_handle, None)
                    .map_err(|error| format!("Failed to create cut menu item: {error}"))?,
            ),
            ContextMenuEntry::Copy => Box::new(
                PredefinedMenuItem::copy(app_handle, None)
                    .map_err(|error| format!("Failed to create copy menu item: {error}"))?,
            ),
            ContextMenuEntry::Paste => Box::new(
                PredefinedMenuItem::paste(app_handle, None)
                    .map_err(|error| format!("Failed to create paste menu item: {error}"))?,
            ),
            ContextMenuEntry::Separator => Box::new(
                PredefinedMenuItem::separator(app_handle)
                    .map_err(|error| format!("Failed to create separator menu item: {error}"))?,
            ),
        };
        menu.append(item.as_ref())
            .map_err(|error| format!("Failed to append context menu item: {error}"))?;
    }

    Ok(menu)
}

fn popup_context_menu(webview_window: &WebviewWindow, params: ContextMenuParams) -> Result<(), String> {
    let entries = context_menu_entries(&params, ContextMenuFeatures::current());
    if entries.is_empty() {
        return Ok(());
    }

    let app_handle = webview_window.app_handle();
    let menu = build_context_menu(app_handle, &entries, &params)?;
    app_handle.state::<ContextMenuState>().replace(ContextMenuTarget {
        window_label: webview_window.label().to_string(),
        params,
    });

    webview_window
        .popup_menu(&menu)
        .map_err(|error| format!("Failed to show context menu: {error}"))
}

/// Invoked by the page bridge on right-click; runs on the main thread.
#[tauri::command]
pub(crate) fn show_context_menu(
    webview_window: WebviewWindow,
    params: ContextMenuParams,
) -> Result<(), String> {
    if !params.needs_native_history() {
        return popup_context_menu(&webview_window, params).inspect_err(|error| {
            append_desktop_log(error);
        });
    }

    let window = webview_window.clone();
    webview_window
        .with_webview(move |webview| {
            let params = params.with_history(webview_history::native_history(&webview));
            if let Err(error) = popup_context_menu(&window, params) {
                append_desktop_log(&error);
            }
        })
        .map_err(|error| format!("Failed to query webview history: {error}"))
}

#[cfg(test)]
mod tests {
    use super::ContextMenuEntry::{Copy, Cut, Paste, Separator};
    use super::*;

    const NO_EXTRAS: ContextMenuFeatures = ContextMenuFeatures {
        look_up_selection: false,
        inspect_element: false,
    };

    fn action(action: ContextMenuAction, enabled: bool) -> ContextMenuEntry {
        ContextMenuEntry::Action { action, enabled }
    }

    #[test]
    fn blank_page_shows_navigation_with_history_state() {
        let params = ContextMenuParams {
            can_go_back: Some(true),
            can_go_forward: Some(false),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::Back, true),
                action(ContextMenuAction::Forward, false),
            ]
        );
    }

    #[test]
    fn unknown_history_disables_navigation() {
        assert_eq!(
            context_menu_entries(&ContextMenuParams::default(), NO_EXTRAS),
            vec![
                action(ContextMenuAction::Back, false),
                action(ContextMenuAction::Forward, false),
            ]
        );
    }

    #[test]
    fn native_history_fills_only_unknown_flags() {
        let params = ContextMenuParams {
            can_go_back: Some(false),
            ..ContextMenuParams::default()
        };
        assert!(params.needs_native_history());

        let filled = params.with_history(Some(HistoryState {
            can_go_back: true,
            can_go_forward: true,
        }));
        assert_eq!(filled.can_go_back, Some(false));
        assert_eq!(filled.can_go_forward, Some(true));
        assert!(!filled.needs_native_history());
        assert_eq!(
            context_menu_entries(&filled, NO_EXTRAS),
            vec![
                action(ContextMenuAction::Back, false),
                action(ContextMenuAction::Forward, true),
            ]
        );
    }

    #[test]
    fn newest_entry_without_navigation_api_keeps_forward_disabled() {
        let params = ContextMenuParams::default().with_history(Some(HistoryState {
            can_go_back: true,
            can_go_forward: false,
        }));
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::Back, true),
                action(ContextMenuAction::Forward, false),
            ]
        );
    }

    #[test]
    fn link_shows_open_in_browser_and_copy_link_without_navigation() {
        let params = ContextMenuParams {
            link_url: Some("https://example.com/docs".to_string()),
            can_go_back: Some(true),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::OpenLinkInBrowser, true),
                Separator,
                action(ContextMenuAction::CopyLink, true),
            ]
        );
    }

    #[test]
    fn editable_target_shows_edit_actions_only() {
        let params = ContextMenuParams {
            is_editable: true,
            ..ContextMenuParams::default()
        };
        assert_eq!(context_menu_entries(&params, NO_EXTRAS), vec![Cut, Copy, Paste]);
    }

    #[test]
    fn selection_shows_search_and_copy() {
        let params = ContextMenuParams {
            selection_text: "hello".to_string(),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::SearchWithGoogle, true),
                Separator,
                Copy,
            ]
        );
    }

    #[test]
    fn selection_offers_look_up_where_supported_but_not_on_links() {
        let features = ContextMenuFeatures {
            look_up_selection: true,
            inspect_element: false,
        };
        let params = ContextMenuParams {
            selection_text: "ownership".to_string(),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, features),
            vec![
                action(ContextMenuAction::LookUpSelection, true),
                Separator,
                action(ContextMenuAction::SearchWithGoogle, true),
                Separator,
                Copy,
            ]
        );

        let linked = ContextMenuParams {
            link_url: Some("https://example.com".to_string()),
            ..params
        };
        assert!(!context_menu_entries(&linked, features)
            .contains(&action(ContextMenuAction::LookUpSelection, true)));
    }

    #[test]
    fn look_up_label_quotes_and_truncates_the_selection() {
        let short = ContextMenuParams {
            selection_text: "  borrow\nchecker ".to_string(),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            entry_label(ContextMenuAction::LookUpSelection, &short),
            "Look Up “borrow checker”"
        );

        let long = ContextMenuParams {
            selection_text: "a".repeat(40),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            entry_label(ContextMenuAction::LookUpSelection, &long),
            format!("Look Up “{}…”", "a".repeat(24))
        );
        assert_eq!(entry_label(ContextMenuAction::CopyImage, &long), "Copy Image");
    }

    #[test]
    fn linked_image_shows_image_actions_and_open_in_browser() {
        let params = ContextMenuParams {
            link_url: Some("https://example.com/gallery".to_string()),
            media_type: MediaType::Image,
            src_url: Some("https://example.com/cat.png".to_string()),
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::OpenLinkInBrowser, true),
                Separator,
                action(ContextMenuAction::SaveImageAs, true),
                action(ContextMenuAction::CopyImage, true),
                action(ContextMenuAction::CopyImageAddress, true),
            ]
        );
    }

    #[test]
    fn video_without_source_disables_video_actions() {
        let params = ContextMenuParams {
            media_type: MediaType::Video,
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, NO_EXTRAS),
            vec![
                action(ContextMenuAction::SaveVideoAs, false),
                action(ContextMenuAction::CopyVideoAddress, false),
            ]
        );
    }

    #[test]
    fn debug_builds_end_with_inspect_element() {
        let features = ContextMenuFeatures {
            look_up_selection: false,
            inspect_element: true,
        };
        let params = ContextMenuParams {
            is_editable: true,
            ..ContextMenuParams::default()
        };
        assert_eq!(
            context_menu_entries(&params, features),
            vec![
                Cut,
                Copy,
                Paste,
                Separator,
                action(ContextMenuAction::InspectElement, true),
            ]
        );
    }

    #[test]
    fn params_deserialize_from_bridge_payload() {
        let params: ContextMenuParams = serde_json::from_value(serde_json::json!({
            "selectionText": "",
            "linkUrl": null,
            "isEditable": false,
            "mediaType": "canvas",
            "srcUrl": null,
            "canGoBack": true,
            "canGoForward": null,
        }))
        .expect("bridge payload");
        assert_eq!(params.media_type, MediaType::Other);
        assert_eq!(params.can_go_back, Some(true));
        assert_eq!(params.can_go_forward, None);
    }
}
