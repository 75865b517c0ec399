//! Presentation boundary: the core only asks for lines, links and flag
//! changes to be shown; it never renders anything itself.

use std::sync::{Arc, Mutex};

/// Output sink of the terminal
pub trait Console: Send + Sync {
    fn emit_line(&self, text: &str);

    fn emit_link(&self, label: &str, url: &str);

    /// Input lock toggled by the execution guard
    fn set_locked(&self, _locked: bool) {}

    /// Busy indicator toggled by the execution guard
    fn set_loading(&self, _loading: bool) {}
}

/// Something a [`BufferedConsole`] was asked to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Line(String),
    Link { label: String, url: String },
    Locked(bool),
    Loading(bool),
}

/// Console that records everything in memory. Clones share the buffer.
#[derive(Debug, Clone, Default)]
pub struct BufferedConsole {
    events: Arc<Mutex<Vec<Emission>>>,
}

impl BufferedConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: Emission) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }

    /// Everything recorded so far, in order
    pub fn events(&self) -> Vec<Emission> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Only the text lines
    pub fn lines(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Emission::Line(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Only the links, as `(label, url)`
    pub fn links(&self) -> Vec<(String, String)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Emission::Link { label, url } => Some((label, url)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clear();
    }
}

impl Console for BufferedConsole {
    fn emit_line(&self, text: &str) {
        self.push(Emission::Line(text.to_string()));
    }

    fn emit_link(&self, label: &str, url: &str) {
        self.push(Emission::Link {
            label: label.to_string(),
            url: url.to_string(),
        });
    }

    fn set_locked(&self, locked: bool) {
        self.push(Emission::Locked(locked));
    }

    fn set_loading(&self, loading: bool) {
        self.push(Emission::Loading(loading));
    }
}
