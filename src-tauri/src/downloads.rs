use std::fs;

use tauri::{image::Image, webview::DownloadEvent, Manager, WebviewWindow};
use tauri_plugin_clipboard_manager::ClipboardExt;
use tauri_plugin_dialog::DialogExt;
use url::Url;

use crate::{append_desktop_log, LaunchContext};

/// Page-initiated downloads are left to the platform; only log them.
pub(crate) fn handle_download_event(event: DownloadEvent<'_>) -> bool {
    match event {
        DownloadEvent::Requested { url, destination } => {
            append_desktop_log(&format!(
                "download requested: {url} -> {}",
                destination.display()
            ));
        }
        DownloadEvent::Finished { url, path, success } => {
            let target = path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "<unknown>".to_string());
            append_desktop_log(&format!(
                "download finished: {url} -> {target} (success: {success})"
            ));
        }
        _ => {}
    }
    true
}

pub(crate) fn suggested_file_name(url: &Url, fallback: &str) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            segment
                .chars()
                .map(|ch| match ch {
                    '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                    _ => ch,
                })
                .collect()
        })
        .unwrap_or_else(|| fallback.to_string())
}

fn parse_downloadable_url(raw_url: &str) -> Result<Url, String> {
    let parsed = Url::parse(raw_url).map_err(|error| format!("Invalid media URL: {error}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(format!("Saving '{scheme}:' media is not supported.")),
    }
}

/// Headers that let a media fetch reuse the page's session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SessionHeaders {
    pub(crate) cookie: Option<String>,
    pub(crate) referer: Option<String>,
    pub(crate) user_agent: Option<String>,
}

pub(crate) fn cookie_header<'a>(
    cookies: impl IntoIterator<Item = (&'a str, &'a str)>,
) -> Option<String> {
    let header = cookies
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| format!("{name}={value}"))
        .collect::<Vec<_>>()
        .join("; ");
    (!header.is_empty()).then_some(header)
}

/// Must not run on the main thread: reading cookies blocks on the webview.
fn session_headers(window: &WebviewWindow, url: &Url) -> SessionHeaders {
    let cookie = match window.cookies_for_url(url.clone()) {
        Ok(cookies) => cookie_header(
            cookies
                .iter()
                .map(|cookie| (cookie.name(), cookie.value())),
        ),
        Err(error) => {
            append_desktop_log(&format!("cookies for {url} unavailable: {error}"));
            None
        }
    };
    let user_agent = window
        .app_handle()
        .state::<LaunchContext>()
        .options
        .user_agent
        .clone();

    SessionHeaders {
        cookie,
        referer: window.url().ok().map(String::from),
        user_agent,
    }
}

async fn fetch_media(url: &Url, headers: &SessionHeaders) -> Result<Vec<u8>, String> {
    let mut request = reqwest::Client::new().get(url.as_str());
    if let Some(cookie) = &headers.cookie {
        request = request.header(reqwest::header::COOKIE, cookie);
    }
    if let Some(referer) = &headers.referer {
        request = request.header(reqwest::header::REFERER, referer);
    }
    if let Some(user_agent) = &headers.user_agent {
        request = request.header(reqwest::header::USER_AGENT, user_agent);
    }

    let response = request
        .send()
        .await
        .map_err(|error| format!("Failed to request {url}: {error}"))?
        .error_for_status()
        .map_err(|error| format!("Server rejected {url}: {error}"))?;
    let body = response
        .bytes()
        .await
        .map_err(|error| format!("Failed to read {url}: {error}"))?;
    Ok(body.to_vec())
}

/// Asks for a destination, then fetches the media there in the background.
pub(crate) fn save_media_as(window: &WebviewWindow, raw_url: &str, fallback_name: &str) {
    let url = match parse_downloadable_url(raw_url) {
        Ok(url) => url,
        Err(error) => {
            append_desktop_log(&format!("save as skipped for {raw_url}: {error}"));
            return;
        }
    };

    let window = window.clone();
    let file_name = suggested_file_name(&url, fallback_name);
    tauri::async_runtime::spawn(async move {
        let app_handle = window.app_handle();
        let mut dialog = app_handle.dialog().file().set_file_name(&file_name);
        if let Ok(download_dir) = app_handle.path().download_dir() {
            dialog = dialog.set_directory(download_dir);
        }

        let Some(chosen) = dialog.blocking_save_file() else {
            append_desktop_log(&format!("save as cancelled for {url}"));
            return;
        };
        let destination = match chosen.into_path() {
            Ok(path) => path,
            Err(error) => {
                append_desktop_log(&format!("save as destination is not a local path: {error}"));
                return;
            }
        };

        let headers = session_headers(&window, &url);
        let result = fetch_media(&url, &headers).await.and_then(|body| {
            fs::write(&destination, &body)
                .map(|()| body.len())
                .map_err(|error| format!("Failed to write {}: {error}", destination.display()))
        });
        match result {
            Ok(bytes) => append_desktop_log(&format!(
                "saved {url} to {} ({bytes} bytes)",
                destination.display()
            )),
            Err(error) => append_desktop_log(&format!("save as failed: {error}")),
        }
    });
}

/// Decodes any supported image format into straight RGBA pixels.
pub(crate) fn decode_rgba(bytes: &[u8]) -> Result<Image<'static>, String> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|error| format!("Failed to decode image: {error}"))?
        .to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Image::new_owned(rgba.into_raw(), width, height))
}

/// Fetches the image with the page's session and puts its pixels on the clipboard.
pub(crate) fn copy_image(window: &WebviewWindow, raw_url: &str) {
    let url = match parse_downloadable_url(raw_url) {
        Ok(url) => url,
        Err(error) => {
            append_desktop_log(&format!("copy image skipped for {raw_url}: {error}"));
            return;
        }
    };

    let window = window.clone();
    tauri::async_runtime::spawn(async move {
        let headers = session_headers(&window, &url);
        let result = fetch_media(&url, &headers)
            .await
            .and_then(|body| decode_rgba(&body))
            .and_then(|image| {
                window
                    .app_handle()
                    .clipboard()
                    .write_image(&image)
                    .map_err(|error| format!("Failed to write clipboard: {error}"))
            });
        match result {
            Ok(()) => append_desktop_log(&format!("copied image {url}")),
            Err(error) => append_desktop_log(&format!("copy image failed: {error}")),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(raw: &str) -> Url {
        Url::parse(raw).expect("test url")
    }

    #[test]
    fn suggested_file_name_uses_last_path_segment() {
        assert_eq!(
            suggested_file_name(&url("https://cdn.example.com/media/cat.png?size=2"), "image"),
            "cat.png"
        );
    }

    #[test]
    fn suggested_file_name_falls_back_for_directory_urls() {
        assert_eq!(
            suggested_file_name(&url("https://example.com/videos/"), "video"),
            "video"
        );
        assert_eq!(suggested_file_name(&url("https://example.com"), "image"), "image");
    }

    #[test]
    fn suggested_file_name_replaces_reserved_characters() {
        assert_eq!(
            suggested_file_name(&url("https://example.com/a:b*c.jpg"), "image"),
            "a_b_c.jpg"
        );
    }

    #[test]
    fn parse_downloadable_url_rejects_inline_sources() {
        assert!(parse_downloadable_url("https://example.com/a.png").is_ok());
        assert!(parse_downloadable_url("data:image/png;base64,AAAA").is_err());
        assert!(parse_downloadable_url("blob:https://example.com/uuid").is_err());
    }

    #[test]
    fn cookie_header_joins_session_cookies() {
        assert_eq!(
            cookie_header([("sid", "abc123"), ("", "orphan"), ("theme", "dark")]),
            Some("sid=abc123; theme=dark".to_string())
        );
        assert_eq!(cookie_header(Vec::<(&str, &str)>::new()), None);
    }

    #[test]
    fn decode_rgba_expands_png_pixels() {
        let mut source = image::RgbImage::new(2, 1);
        source.put_pixel(1, 0, image::Rgb([255, 0, 0]));
        let mut png = std::io::Cursor::new(Vec::new());
        source
            .write_to(&mut png, image::ImageFormat::Png)
            .expect("encode png");

        let decoded = decode_rgba(png.get_ref()).expect("decode png");
        assert_eq!((decoded.width(), decoded.height()), (2, 1));
        assert_eq!(decoded.rgba(), &[0, 0, 0, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn decode_rgba_rejects_non_images() {
        assert!(decode_rgba(b"<html>not an image</html>").is_err());
    }
}
