pub const MENU_OPEN_IN_BROWSER: &str = "tools_open_in_browser";
pub const MENU_COPY_LINK: &str = "tools_copy_link";
pub const MENU_TOGGLE_ALWAYS_ON_TOP: &str = "tools_toggle_always_on_top";
pub const MENU_TOGGLE_TITLE_BAR: &str = "tools_toggle_title_bar";
pub const MENU_TOGGLE_FRAME: &str = "tools_toggle_frame";
pub const MENU_RESET_AND_QUIT: &str = "help_reset_and_quit";

const MENU_RESIZE_PREFIX: &str = "tools_resize_";
const MENU_OPACITY_PREFIX: &str = "tools_opacity_";

pub const CONTEXT_BACK: &str = "context_back";
pub const CONTEXT_FORWARD: &str = "context_forward";
pub const CONTEXT_OPEN_LINK_IN_BROWSER: &str = "context_open_link_in_browser";
pub const CONTEXT_COPY_LINK: &str = "context_copy_link";
pub const CONTEXT_COPY_IMAGE_ADDRESS: &str = "context_copy_image_address";
pub const CONTEXT_SAVE_IMAGE_AS: &str = "context_save_image_as";
pub const CONTEXT_COPY_VIDEO_ADDRESS: &str = "context_copy_video_address";
pub const CONTEXT_SAVE_VIDEO_AS: &str = "context_save_video_as";
pub const CONTEXT_COPY_IMAGE: &str = "context_copy_image";
pub const CONTEXT_LOOK_UP_SELECTION: &str = "context_look_up_selection";
pub const CONTEXT_SEARCH_WITH_GOOGLE: &str = "context_search_with_google";
pub const CONTEXT_INSPECT_ELEMENT: &str = "context_inspect_element";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuAction {
    Back,
    Forward,
    OpenLinkInBrowser,
    CopyLink,
    CopyImage,
    CopyImageAddress,
    SaveImageAs,
    CopyVideoAddress,
    SaveVideoAs,
    LookUpSelection,
    SearchWithGoogle,
    InspectElement,
}

impl ContextMenuAction {
    pub fn menu_id(self) -> &'static str {
        match self {
            Self::Back => CONTEXT_BACK,
            Self::Forward => CONTEXT_FORWARD,
            Self::OpenLinkInBrowser => CONTEXT_OPEN_LINK_IN_BROWSER,
            Self::CopyLink => CONTEXT_COPY_LINK,
            Self::CopyImage => CONTEXT_COPY_IMAGE,
            Self::CopyImageAddress => CONTEXT_COPY_IMAGE_ADDRESS,
            Self::SaveImageAs => CONTEXT_SAVE_IMAGE_AS,
            Self::CopyVideoAddress => CONTEXT_COPY_VIDEO_ADDRESS,
            Self::SaveVideoAs => CONTEXT_SAVE_VIDEO_AS,
            Self::LookUpSelection => CONTEXT_LOOK_UP_SELECTION,
            Self::SearchWithGoogle => CONTEXT_SEARCH_WITH_GOOGLE,
            Self::InspectElement => CONTEXT_INSPECT_ELEMENT,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Back => "Back",
            Self::Forward => "Forward",
            Self::OpenLinkInBrowser => "Open in Browser",
            Self::CopyLink => "Copy Link",
            Self::CopyImage => "Copy Image",
            Self::CopyImageAddress => "Copy Image Address",
            Self::SaveImageAs => "Save Image As…",
            Self::CopyVideoAddress => "Copy Video Address",
            Self::SaveVideoAs => "Save Video As…",
            Self::LookUpSelection => "Look Up",
            Self::SearchWithGoogle => "Search with Google",
            Self::InspectElement => "Inspect Element",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    OpenInBrowser,
    CopyLink,
    Resize { width: u32, height: u32 },
    ToggleAlwaysOnTop,
    SetOpacity { percent: u8 },
    ToggleTitleBar,
    ToggleFrame,
    ResetAndQuit,
    Context(ContextMenuAction),
}

pub fn resize_menu_id(width: u32, height: u32) -> String {
    format!("{MENU_RESIZE_PREFIX}{width}x{height}")
}

pub fn opacity_menu_id(percent: u8) -> String {
    format!("{MENU_OPACITY_PREFIX}{percent}")
}

pub fn action_from_menu_id(menu_id: &str) -> Option<MenuAction> {
    let action = match menu_id {
        MENU_OPEN_IN_BROWSER => MenuAction::OpenInBrowser,
        MENU_COPY_LINK => MenuAction::CopyLink,
        MENU_TOGGLE_ALWAYS_ON_TOP => MenuAction::ToggleAlwaysOnTop,
        MENU_TOGGLE_TITLE_BAR => MenuAction::ToggleTitleBar,
        MENU_TOGGLE_FRAME => MenuAction::ToggleFrame,
        MENU_RESET_AND_QUIT => MenuAction::ResetAndQuit,
        CONTEXT_BACK => MenuAction::Context(ContextMenuAction::Back),
        CONTEXT_FORWARD => MenuAction::Context(ContextMenuAction::Forward),
        CONTEXT_OPEN_LINK_IN_BROWSER => MenuAction::Context(ContextMenuAction::OpenLinkInBrowser),
        CONTEXT_COPY_LINK => MenuAction::Context(ContextMenuAction::CopyLink),
        CONTEXT_COPY_IMAGE_ADDRESS => MenuAction::Context(ContextMenuAction::CopyImageAddress),
        CONTEXT_SAVE_IMAGE_AS => MenuAction::Context(ContextMenuAction::SaveImageAs),
        CONTEXT_COPY_VIDEO_ADDRESS => MenuAction::Context(ContextMenuAction::CopyVideoAddress),
        CONTEXT_SAVE_VIDEO_AS => MenuAction::Context(ContextMenuAction::SaveVideoAs),
        CONTEXT_COPY_IMAGE => MenuAction::Context(ContextMenuAction::CopyImage),
        CONTEXT_LOOK_UP_SELECTION => MenuAction::Context(ContextMenuAction::LookUpSelection),
        CONTEXT_SEARCH_WITH_GOOGLE => MenuAction::Context(ContextMenuAction::SearchWithGoogle),
        CONTEXT_INSPECT_ELEMENT => MenuAction::Context(ContextMenuAction::InspectElement),
        _ => return parameterized_action(menu_id),
    };
    Some(action)
}

fn parameterized_action(menu_id: &str) -> Option<MenuAction> {
    if let Some(size) = menu_id.strip_prefix(MENU_RESIZE_PREFIX) {
        let (width, height) = size.split_once('x')?;
        return Some(MenuAction::Resize {
            width: width.parse().ok()?,
            height: height.parse().ok()?,
        });
    }

    let percent = menu_id.strip_prefix(MENU_OPACITY_PREFIX)?.parse::<u8>().ok()?;
    (percent <= 100).then_some(MenuAction::SetOpacity { percent })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn action_from_menu_id_maps_fixed_tools_actions() {
        assert_eq!(
            action_from_menu_id(MENU_OPEN_IN_BROWSER),
            Some(MenuAction::OpenInBrowser)
        );
        assert_eq!(action_from_menu_id(MENU_COPY_LINK), Some(MenuAction::CopyLink));
        assert_eq!(
            action_from_menu_id(MENU_TOGGLE_ALWAYS_ON_TOP),
            Some(MenuAction::ToggleAlwaysOnTop)
        );
        assert_eq!(
            action_from_menu_id(MENU_TOGGLE_TITLE_BAR),
            Some(MenuAction::ToggleTitleBar)
        );
        assert_eq!(action_from_menu_id(MENU_TOGGLE_FRAME), Some(MenuAction::ToggleFrame));
        assert_eq!(
            action_from_menu_id(MENU_RESET_AND_QUIT),
            Some(MenuAction::ResetAndQuit)
        );
    }

    #[test]
    fn context_action_ids_round_trip() {
        for action in [
            ContextMenuAction::Back,
            ContextMenuAction::Forward,
            ContextMenuAction::OpenLinkInBrowser,
            ContextMenuAction::CopyLink,
            ContextMenuAction::CopyImageAddress,
            ContextMenuAction::SaveImageAs,
            ContextMenuAction::CopyVideoAddress,
            ContextMenuAction::SaveVideoAs,
            ContextMenuAction::CopyImage,
            ContextMenuAction::LookUpSelection,
            ContextMenuAction::SearchWithGoogle,
            ContextMenuAction::InspectElement,
        ] {
            assert_eq!(
                action_from_menu_id(action.menu_id()),
                Some(MenuAction::Context(action))
            );
        }
    }

    #[test]
    fn action_from_menu_id_parses_resize_and_opacity_presets() {
        assert_eq!(
            action_from_menu_id(&resize_menu_id(1280, 720)),
            Some(MenuAction::Resize {
                width: 1280,
                height: 720
            })
        );
        assert_eq!(
            action_from_menu_id(&opacity_menu_id(75)),
            Some(MenuAction::SetOpacity { percent: 75 })
        );
    }

    #[test]
    fn action_from_menu_id_rejects_malformed_or_unknown_ids() {
        assert_eq!(action_from_menu_id("unknown-menu"), None);
        assert_eq!(action_from_menu_id("tools_resize_800"), None);
        assert_eq!(action_from_menu_id("tools_resize_axb"), None);
        assert_eq!(action_from_menu_id("tools_opacity_150"), None);
    }
}
