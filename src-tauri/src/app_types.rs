use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
};

use url::Url;

use crate::{context_menu::ContextMenuParams, window_options::WindowOptions};

/// Everything the shell derived from its command line before the first window
/// exists. Shared read-only by every window and menu callback.
#[derive(Debug, Clone)]
pub(crate) struct LaunchContext {
    pub(crate) url: Url,
    pub(crate) host: String,
    pub(crate) user_data_dir: PathBuf,
    pub(crate) options: WindowOptions,
    pub(crate) raw_args: Vec<String>,
}

impl LaunchContext {
    /// Initial window title: the host, or the whole URL for hostless targets.
    pub(crate) fn window_title(&self) -> String {
        if self.host.is_empty() {
            self.url.to_string()
        } else {
            self.host.clone()
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct ResetState {
    delete_on_exit: AtomicBool,
}

impl ResetState {
    pub(crate) fn schedule(&self) {
        self.delete_on_exit.store(true, Ordering::Release);
    }

    pub(crate) fn is_scheduled(&self) -> bool {
        self.delete_on_exit.load(Ordering::Acquire)
    }
}

/// Context of the most recent right-click, kept until one of its menu items is
/// chosen. Only one popup menu can be open at a time.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ContextMenuTarget {
    pub(crate) window_label: String,
    pub(crate) params: ContextMenuParams,
}

#[derive(Debug, Default)]
pub(crate) struct ContextMenuState {
    target: Mutex<Option<ContextMenuTarget>>,
}

impl ContextMenuState {
    pub(crate) fn replace(&self, target: ContextMenuTarget) {
        if let Ok(mut guard) = self.target.lock() {
            *guard = Some(target);
        }
    }

    pub(crate) fn current(&self) -> Option<ContextMenuTarget> {
        self.target.lock().ok().and_then(|guard| guard.clone())
    }
}
