#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_constants;
mod app_menu;
mod app_runtime;
mod app_types;
mod context_menu;
mod downloads;
mod exit_events;
mod external_url;
mod launch_args;
mod logging;
mod main_window;
mod menu_actions;
mod menu_handler;
mod relaunch;
mod reset_profile;
mod runtime_paths;
mod target_url;
mod webview_history;
mod window_actions;
mod window_opacity;
mod window_options;

pub(crate) use app_constants::*;
pub(crate) use app_types::{ContextMenuState, ContextMenuTarget, LaunchContext, ResetState};
pub(crate) use logging::{append_desktop_log, append_shutdown_log, append_startup_log};

fn main() {
    app_runtime::run();
}
