pub const APP_NAME: &str = "tron";

pub const DEFAULT_TARGET: &str = "example.com";
pub const DEFAULT_WINDOW_WIDTH: f64 = 1024.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 768.0;

pub const MAIN_WINDOW_LABEL: &str = "main";
pub const CHILD_WINDOW_LABEL_PREFIX: &str = "child-";
pub const CHILD_WINDOW_OFFSET: f64 = 24.0;

pub const LOCAL_PROFILE_DIR: &str = "local";

pub const HIDE_TITLE_BAR_ARG: &str = "--title-bar-style=hidden";
pub const NO_FRAME_ARG: &str = "--no-frame";

pub const DESKTOP_LOG_DIR: &str = "logs";
pub const DESKTOP_LOG_FILE: &str = "desktop.log";
pub const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub const RESIZE_PRESETS: [(u32, u32); 6] = [
    (360, 720),
    (600, 800),
    (800, 600),
    (1024, 768),
    (1280, 720),
    (1920, 1080),
];
pub const OPACITY_PRESETS: [f64; 4] = [0.25, 0.5, 0.75, 1.0];
