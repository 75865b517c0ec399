//! Terminal rendering: styled output lines and a spinner while a command
//! is in flight.

use crate::terminal::Console;
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// Spinner shown while a guarded command runs
pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(template) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(template);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

pub fn print_error(message: &str) {
    let _ = Term::stderr().write_line(&format!("{} {}", style("✗").red().bold(), message));
}

pub fn print_info(message: &str) {
    let _ = Term::stdout().write_line(&format!("{} {}", style("ℹ").blue().bold(), message));
}

/// Print the prompt without a newline
pub fn print_prompt(prompt: &str) -> io::Result<()> {
    let term = Term::stdout();
    term.write_str(&style(prompt).green().bold().to_string())?;
    term.flush()
}

/// Echo a scripted command line as if it had been typed
pub fn echo_command(prompt: &str, line: &str) {
    let _ = Term::stdout().write_line(&format!("{}{}", style(prompt).green().bold(), line));
}

/// [`Console`] writing to stdout
pub struct TermConsole {
    term: Term,
    spinner: Mutex<Option<ProgressBar>>,
    locked: AtomicBool,
}

impl TermConsole {
    pub fn new() -> Self {
        Self {
            term: Term::stdout(),
            spinner: Mutex::new(None),
            locked: AtomicBool::new(false),
        }
    }

    /// Whether a command currently holds the input lock
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    fn write(&self, text: &str) {
        let spinner = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        match spinner.as_ref() {
            Some(pb) => pb.suspend(|| {
                let _ = self.term.write_line(text);
            }),
            None => {
                let _ = self.term.write_line(text);
            }
        }
    }
}

impl Default for TermConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TermConsole {
    fn emit_line(&self, text: &str) {
        self.write(text);
    }

    fn emit_link(&self, label: &str, url: &str) {
        self.write(&format!(
            "{} {}",
            style(label).blue().underlined(),
            style(url).dim()
        ));
    }

    fn set_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::SeqCst);
    }

    fn set_loading(&self, loading: bool) {
        let mut spinner = self
            .spinner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if loading {
            if spinner.is_none() && self.term.is_term() {
                *spinner = Some(self::spinner("Processing..."));
            }
        } else if let Some(pb) = spinner.take() {
            pb.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lock_flag_follows_guard() {
        let console = TermConsole::new();
        assert!(!console.is_locked());
        console.set_locked(true);
        assert!(console.is_locked());
        console.set_locked(false);
        assert!(!console.is_locked());
    }

    #[test]
    fn test_loading_toggle_without_tty() {
        let console = TermConsole::new();
        console.set_loading(true);
        console.set_loading(false);
        assert!(console.spinner.lock().unwrap().is_none());
    }
}
