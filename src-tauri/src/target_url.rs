use std::path::{Path, PathBuf};

use url::Url;
use uuid::Uuid;

use crate::{APP_NAME, LOCAL_PROFILE_DIR};

pub(crate) fn normalize_target_url(target: &str) -> String {
    if target.contains("://") {
        return target.to_string();
    }

    let scheme = if target.starts_with("localhost") {
        "http"
    } else {
        "https"
    };
    format!("{scheme}://{target}")
}

pub(crate) fn parse_target_url(target: &str) -> Result<Url, String> {
    let normalized = normalize_target_url(target);
    Url::parse(&normalized).map_err(|error| format!("Invalid target URL '{normalized}': {error}"))
}

/// Host as a browser reports it: the port is only included when it is not the
/// scheme default. Hostless URLs such as `file:///...` report an empty host.
pub(crate) fn url_host(url: &Url) -> String {
    let Some(host) = url.host_str().filter(|host| !host.is_empty()) else {
        return String::new();
    };
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}

/// Directory name of the webview profile for `host`. Hostless targets share
/// one profile instead of the application data root.
pub(crate) fn profile_dir_name(host: &str) -> String {
    if host.is_empty() {
        LOCAL_PROFILE_DIR.to_string()
    } else {
        host.replace(':', "_")
    }
}

pub(crate) fn user_data_dir(app_data_dir: &Path, host: &str) -> PathBuf {
    app_data_dir.join(APP_NAME).join(profile_dir_name(host))
}

/// Stable per-host identifier for webviews that isolate profiles by id
/// instead of by directory.
#[cfg_attr(not(target_os = "macos"), allow(dead_code))]
pub(crate) fn data_store_identifier(host: &str) -> [u8; 16] {
    Uuid::new_v5(&Uuid::NAMESPACE_DNS, host.as_bytes()).into_bytes()
}
