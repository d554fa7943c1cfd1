use std::{env, ffi::OsString, path::Path};

use tauri::{webview::PageLoadEvent, Manager, RunEvent};

use crate::{
    app_menu, append_desktop_log, append_startup_log, exit_events, launch_args, logging,
    main_window, menu_handler, runtime_paths, target_url,
    window_options::WindowOptions,
    ContextMenuState, LaunchContext, ResetState, DESKTOP_LOG_FILE,
};

/// Everything the shell needs from its command line, or the reason it
/// cannot start.
pub(crate) fn resolve_launch_context(
    raw_args: Vec<String>,
    app_data_dir: Option<&Path>,
) -> Result<LaunchContext, String> {
    let parsed = launch_args::parse_launch_args(&raw_args);
    let url = target_url::parse_target_url(parsed.target())?;
    let host = target_url::url_host(&url);
    let app_data_dir =
        app_data_dir.ok_or_else(|| "Cannot resolve the application data directory.".to_string())?;
    let user_data_dir = target_url::user_data_dir(app_data_dir, &host);
    let options = WindowOptions::from_map(parsed.options)?;

    Ok(LaunchContext {
        url,
        host,
        user_data_dir,
        options,
        raw_args,
    })
}

/// Command-line arguments as UTF-8, or the first one that is not.
pub(crate) fn utf8_args<I>(args: I) -> Result<Vec<String>, String>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| format!("Argument {arg:?} is not valid UTF-8."))
        })
        .collect()
}

fn exit_with_startup_error(error: &str) -> ! {
    append_startup_log(&format!("startup failed: {error}"));
    eprintln!("tron startup failed: {error}");
    std::process::exit(1);
}

pub(crate) fn run() {
    logging::init_desktop_log(logging::resolve_desktop_log_path(
        runtime_paths::default_app_root_dir(),
        DESKTOP_LOG_FILE,
    ));
    append_startup_log("shell process starting");

    let raw_args = match utf8_args(env::args_os().skip(1)) {
        Ok(raw_args) => raw_args,
        Err(error) => exit_with_startup_error(&error),
    };
    let app_data_dir = runtime_paths::default_app_data_dir();
    let launch = match resolve_launch_context(raw_args, app_data_dir.as_deref()) {
        Ok(launch) => launch,
        Err(error) => exit_with_startup_error(&error),
    };
    append_startup_log(&format!(
        "target {} (profile {})",
        launch.url,
        launch.user_data_dir.display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .manage(launch)
        .manage(ResetState::default())
        .manage(ContextMenuState::default())
        .invoke_handler(tauri::generate_handler![
            crate::context_menu::show_context_menu,
        ])
        .on_menu_event(|app_handle, event| {
            menu_handler::handle_menu_event(app_handle, event.id().as_ref());
        })
        .on_page_load(|webview, payload| match payload.event() {
            PageLoadEvent::Started => append_desktop_log(&format!(
                "page-load started in {}: {}",
                webview.label(),
                payload.url()
            )),
            PageLoadEvent::Finished => append_desktop_log(&format!(
                "page-load finished in {}: {}",
                webview.label(),
                payload.url()
            )),
        })
        .setup(|app| {
            let app_handle = app.handle().clone();
            let launch = app_handle.state::<LaunchContext>().inner().clone();

            match app_menu::build_app_menu(&app_handle, &launch.options) {
                Ok(menu) => {
                    if let Err(error) = app_handle.set_menu(menu) {
                        append_startup_log(&format!("failed to attach menu: {error}"));
                    }
                }
                Err(error) => append_startup_log(&format!("failed to build menu: {error}")),
            }

            if let Err(error) = main_window::create_main_window(&app_handle, &launch) {
                append_startup_log(&format!("startup failed: {error}"));
                eprintln!("tron startup failed: {error}");
                app_handle.exit(1);
            }
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| {
            if let RunEvent::Exit = event {
                exit_events::handle_exit_event(app_handle);
            }
        });
}
