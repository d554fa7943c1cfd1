use std::process::{Command, Stdio};

use url::Url;

const BROWSER_SCHEMES: [&str; 2] = ["http", "https"];
const GOOGLE_SEARCH_URL: &str = "https://www.google.com/search";

/// A web address the system browser may be asked to show. Local files and
/// custom protocol handlers are refused.
pub(crate) fn browser_url(raw_url: &str) -> Result<Url, String> {
    let url = Url::parse(raw_url.trim())
        .map_err(|error| format!("Cannot open '{raw_url}' in the browser: {error}"))?;
    if BROWSER_SCHEMES.contains(&url.scheme()) {
        Ok(url)
    } else {
        Err(format!(
            "Cannot open '{url}' in the browser: only http and https pages are handed off."
        ))
    }
}

/// Google results page for `text`, with whitespace runs collapsed.
pub(crate) fn google_search_url(text: &str) -> Result<Url, String> {
    let query = collapse_whitespace(text);
    if query.is_empty() {
        return Err("Nothing to search for.".to_string());
    }
    Url::parse_with_params(GOOGLE_SEARCH_URL, [("q", query.as_str())])
        .map_err(|error| format!("Failed to build search URL: {error}"))
}

pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub(crate) fn open_in_system_browser(raw_url: &str) -> Result<(), String> {
    spawn_system_opener(&browser_url(raw_url)?)
}

/// Shows `text` in the macOS Dictionary.
#[cfg(target_os = "macos")]
pub(crate) fn look_up_in_dictionary(text: &str) -> Result<(), String> {
    let word = collapse_whitespace(text);
    if word.is_empty() {
        return Err("Nothing to look up.".to_string());
    }
    let encoded = url::form_urlencoded::byte_serialize(word.as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    let url = Url::parse(&format!("dict://{encoded}"))
        .map_err(|error| format!("Failed to build dictionary URL: {error}"))?;
    spawn_system_opener(&url)
}

fn detached(command: &mut Command) -> &mut Command {
    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
}

#[cfg(target_os = "macos")]
fn spawn_system_opener(url: &Url) -> Result<(), String> {
    detached(Command::new("open").arg(url.as_str()))
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'open': {error}"))
}

#[cfg(target_os = "windows")]
fn spawn_system_opener(url: &Url) -> Result<(), String> {
    detached(Command::new("rundll32").args(["url.dll,FileProtocolHandler", url.as_str()]))
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'rundll32': {error}"))
}

#[cfg(all(unix, not(target_os = "macos")))]
fn spawn_system_opener(url: &Url) -> Result<(), String> {
    detached(Command::new("xdg-open").arg(url.as_str()))
        .spawn()
        .map(|_| ())
        .map_err(|error| format!("Failed to run 'xdg-open': {error}"))
}

#[cfg(not(any(target_os = "macos", target_os = "windows", unix)))]
fn spawn_system_opener(_url: &Url) -> Result<(), String> {
    Err("Opening external URLs is not supported on this platform.".to_string())
}
