use serde::Deserialize;
use serde_json::{Map, Value};
use tauri::{Manager, Runtime, WebviewWindowBuilder};

use crate::{DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH};

/// Window-creation options read from the command line. Keys follow the
/// camelCase spelling produced by `launch_args`; anything unrecognized lands
/// in `extra` and is reported, not rejected.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WindowOptions {
    pub(crate) width: Option<f64>,
    pub(crate) height: Option<f64>,
    pub(crate) x: Option<f64>,
    pub(crate) y: Option<f64>,
    pub(crate) min_width: Option<f64>,
    pub(crate) min_height: Option<f64>,
    pub(crate) max_width: Option<f64>,
    pub(crate) max_height: Option<f64>,
    pub(crate) title: Option<String>,
    pub(crate) frame: Option<bool>,
    pub(crate) title_bar_style: Option<String>,
    pub(crate) resizable: Option<bool>,
    pub(crate) maximizable: Option<bool>,
    pub(crate) minimizable: Option<bool>,
    pub(crate) closable: Option<bool>,
    pub(crate) always_on_top: Option<bool>,
    pub(crate) fullscreen: Option<bool>,
    pub(crate) focus: Option<bool>,
    pub(crate) kiosk: Option<bool>,
    pub(crate) center: Option<bool>,
    pub(crate) show: Option<bool>,
    pub(crate) skip_taskbar: Option<bool>,
    pub(crate) has_shadow: Option<bool>,
    pub(crate) transparent: Option<bool>,
    pub(crate) background_color: Option<String>,
    pub(crate) user_agent: Option<String>,
    pub(crate) opacity: Option<f64>,
    #[serde(flatten)]
    pub(crate) extra: Map<String, Value>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct WindowGeometry {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

impl WindowOptions {
    pub(crate) fn from_map(options: Map<String, Value>) -> Result<Self, String> {
        serde_json::from_value(Value::Object(options))
            .map_err(|error| format!("Invalid window option: {error}"))
    }

    pub(crate) fn is_title_bar_hidden(&self) -> bool {
        self.title_bar_style.as_deref() == Some("hidden")
    }

    pub(crate) fn is_frameless(&self) -> bool {
        self.frame == Some(false)
    }

    /// Same options, placed at `geometry` instead of wherever the originals put
    /// the window.
    pub(crate) fn with_geometry(&self, geometry: WindowGeometry) -> Self {
        Self {
            width: Some(geometry.width),
            height: Some(geometry.height),
            x: Some(geometry.x),
            y: Some(geometry.y),
            center: None,
            ..self.clone()
        }
    }
}

pub(crate) fn parse_hex_color(raw: &str) -> Option<(u8, u8, u8, u8)> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |index: usize, width: usize| {
        let digits = &hex[index * width..(index + 1) * width];
        let value = u8::from_str_radix(digits, 16).ok()?;
        Some(if width == 1 { value * 17 } else { value })
    };

    match hex.len() {
        3 => Some((channel(0, 1)?, channel(1, 1)?, channel(2, 1)?, 255)),
        6 => Some((channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, 255)),
        8 => Some((channel(0, 2)?, channel(1, 2)?, channel(2, 2)?, channel(3, 2)?)),
        _ => None,
    }
}

pub(crate) fn apply_window_options<'a, R, M, F>(
    mut builder: WebviewWindowBuilder<'a, R, M>,
    options: &WindowOptions,
    log: F,
) -> WebviewWindowBuilder<'a, R, M>
where
    R: Runtime,
    M: Manager<R>,
    F: Fn(&str),
{
    builder = builder.inner_size(
        options.width.unwrap_or(DEFAULT_WINDOW_WIDTH),
        options.height.unwrap_or(DEFAULT_WINDOW_HEIGHT),
    );

    match (options.x, options.y) {
        (Some(x), Some(y)) => builder = builder.position(x, y),
        (None, None) => {}
        _ => log("ignoring window position: both x and y are required"),
    }

    if options.min_width.is_some() || options.min_height.is_some() {
        builder = builder.min_inner_size(
            options.min_width.unwrap_or(0.0),
            options.min_height.unwrap_or(0.0),
        );
    }
    match (options.max_width, options.max_height) {
        (Some(width), Some(height)) => builder = builder.max_inner_size(width, height),
        (None, None) => {}
        _ => log("ignoring maximum window size: both maxWidth and maxHeight are required"),
    }

    if let Some(title) = &options.title {
        builder = builder.title(title);
    }
    if options.is_frameless() {
        builder = builder.decorations(false);
    }
    builder = apply_title_bar_style(builder, options.title_bar_style.as_deref(), &log);

    if let Some(resizable) = options.resizable {
        builder = builder.resizable(resizable);
    }
    if let Some(maximizable) = options.maximizable {
        builder = builder.maximizable(maximizable);
    }
    if let Some(minimizable) = options.minimizable {
        builder = builder.minimizable(minimizable);
    }
    if let Some(closable) = options.closable {
        builder = builder.closable(closable);
    }
    if let Some(always_on_top) = options.always_on_top {
        builder = builder.always_on_top(always_on_top);
    }
    if options.fullscreen.unwrap_or(false) || options.kiosk.unwrap_or(false) {
        builder = builder.fullscreen(true);
    }
    if options.center.unwrap_or(false) {
        builder = builder.center();
    }
    if let Some(focus) = options.focus {
        builder = builder.focused(focus);
    }
    if let Some(show) = options.show {
        builder = builder.visible(show);
    }
    if let Some(skip_taskbar) = options.skip_taskbar {
        builder = builder.skip_taskbar(skip_taskbar);
    }
    if let Some(has_shadow) = options.has_shadow {
        builder = builder.shadow(has_shadow);
    }

    if let Some(transparent) = options.transparent {
        #[cfg(not(target_os = "macos"))]
        {
            builder = builder.transparent(transparent);
        }
        #[cfg(target_os = "macos")]
        {
            if transparent {
                log("ignoring transparent: not supported on macOS");
            }
        }
    }

    if let Some(raw_color) = &options.background_color {
        match parse_hex_color(raw_color) {
            Some((red, green, blue, alpha)) => {
                builder = builder.background_color(tauri::window::Color(red, green, blue, alpha));
            }
            None => log(&format!("ignoring backgroundColor '{raw_color}': expected #RRGGBB")),
        }
    }
    if let Some(user_agent) = &options.user_agent {
        builder = builder.user_agent(user_agent);
    }

    for key in options.extra.keys() {
        log(&format!("passing through unrecognized window option '{key}'"));
    }

    builder
}

fn apply_title_bar_style<'a, R, M, F>(
    builder: WebviewWindowBuilder<'a, R, M>,
    style: Option<&str>,
    log: F,
) -> WebviewWindowBuilder<'a, R, M>
where
    R: Runtime,
    M: Manager<R>,
    F: Fn(&str),
{
    match style {
        None | Some("default") => builder,
        #[cfg(target_os = "macos")]
        Some("hidden") | Some("hiddenInset") => builder
            .title_bar_style(tauri::TitleBarStyle::Overlay)
            .hidden_title(true),
        #[cfg(not(target_os = "macos"))]
        Some("hidden") | Some("hiddenInset") => builder.decorations(false),
        Some(other) => {
            log(&format!("ignoring unknown titleBarStyle '{other}'"));
            builder
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn options_from(value: Value) -> WindowOptions {
        let Value::Object(map) = value else {
            panic!("expected an object");
        };
        WindowOptions::from_map(map).expect("valid options")
    }

    #[test]
    fn from_map_reads_known_keys_and_keeps_extras() {
        let options = options_from(json!({
            "width": 800,
            "height": 600.5,
            "frame": false,
            "titleBarStyle": "hidden",
            "webSecurity": false,
        }));
        assert_eq!(options.width, Some(800.0));
        assert_eq!(options.height, Some(600.5));
        assert!(options.is_frameless());
        assert!(options.is_title_bar_hidden());
        assert_eq!(options.extra.get("webSecurity"), Some(&json!(false)));
    }

    #[test]
    fn from_map_rejects_mistyped_values() {
        let Value::Object(map) = json!({ "width": "wide" }) else {
            unreachable!();
        };
        assert!(WindowOptions::from_map(map).is_err());
    }

    #[test]
    fn hidden_inset_is_not_treated_as_hidden_title_bar() {
        let options = options_from(json!({ "titleBarStyle": "hiddenInset" }));
        assert!(!options.is_title_bar_hidden());
        assert!(!options.is_frameless());
    }

    #[test]
    fn with_geometry_overrides_placement_and_keeps_the_rest() {
        let options = options_from(json!({
            "width": 1024,
            "height": 768,
            "center": true,
            "alwaysOnTop": true,
            "userAgent": "Custom/1.0",
        }));
        let child = options.with_geometry(WindowGeometry {
            x: 124.0,
            y: 74.0,
            width: 640.0,
            height: 480.0,
        });
        assert_eq!(child.x, Some(124.0));
        assert_eq!(child.y, Some(74.0));
        assert_eq!(child.width, Some(640.0));
        assert_eq!(child.height, Some(480.0));
        assert_eq!(child.center, None);
        assert_eq!(child.always_on_top, Some(true));
        assert_eq!(child.user_agent.as_deref(), Some("Custom/1.0"));
    }

    #[test]
    fn parse_hex_color_accepts_short_long_and_alpha_forms() {
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255, 255)));
        assert_eq!(parse_hex_color("#1e90ff"), Some((30, 144, 255, 255)));
        assert_eq!(parse_hex_color("#00000080"), Some((0, 0, 0, 128)));
        assert_eq!(parse_hex_color("1e90ff"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("#zzzzzz"), None);
    }
}
