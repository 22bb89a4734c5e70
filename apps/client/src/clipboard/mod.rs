//! Clipboard backends and the copy button handler.
//!
//! `SystemClipboard` talks to the platform clipboard through `arboard`.
//! `Osc52Clipboard` is the legacy path: it asks the terminal to set the
//! clipboard with an OSC 52 escape sequence written to an invisible surface.

pub mod copy;

use std::io::{IsTerminal, Write};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::Engine;
use thiserror::Error;

pub use copy::{copy_output, CopyOutcome};

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard not available: {0}")]
    Unavailable(String),

    #[error("Clipboard operation failed: {0}")]
    Failed(String),
}

#[async_trait]
pub trait ClipboardBackend: Send + Sync {
    fn name(&self) -> &'static str;

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}

/// A blocking platform clipboard handle.
pub trait PlatformClipboard: Send + 'static {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError>;
}

impl PlatformClipboard for arboard::Clipboard {
    fn set_text(&mut self, text: String) -> Result<(), ClipboardError> {
        arboard::Clipboard::set_text(self, text).map_err(|e| ClipboardError::Failed(e.to_string()))
    }
}

fn open_arboard() -> Result<arboard::Clipboard, ClipboardError> {
    arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))
}

/// Platform clipboard via `arboard`. The blocking calls run off the async
/// executor.
///
/// The handle is opened on first use and held until the backend is dropped:
/// on X11 and Wayland the copied text is served by this process, and only
/// dropping the last handle hands it over to a clipboard manager.
pub struct SystemClipboard<C = arboard::Clipboard> {
    open: fn() -> Result<C, ClipboardError>,
    handle: Arc<Mutex<Option<C>>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::with_opener(open_arboard)
    }
}

impl Default for SystemClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: PlatformClipboard> SystemClipboard<C> {
    fn with_opener(open: fn() -> Result<C, ClipboardError>) -> Self {
        Self {
            open,
            handle: Arc::new(Mutex::new(None)),
        }
    }
}

#[async_trait]
impl<C: PlatformClipboard> ClipboardBackend for SystemClipboard<C> {
    fn name(&self) -> &'static str {
        "system"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let text = text.to_string();
        let open = self.open;
        let handle = Arc::clone(&self.handle);
        tokio::task::spawn_blocking(move || {
            let mut held = handle
                .lock()
                .map_err(|_| ClipboardError::Failed("clipboard handle poisoned".to_string()))?;
            if held.is_none() {
                *held = Some(open()?);
            }
            match held.as_mut() {
                Some(clipboard) => clipboard.set_text(text),
                None => Err(ClipboardError::Unavailable("no clipboard handle".to_string())),
            }
        })
        .await
        .map_err(|e| ClipboardError::Failed(e.to_string()))?
    }
}

/// Legacy fallback: OSC 52 written to a terminal sink, wrapped for tmux
/// passthrough when needed.
pub struct Osc52Clipboard<W> {
    sink: Mutex<W>,
    wrap_for_tmux: bool,
}

impl<W: Write + Send> Osc52Clipboard<W> {
    pub fn new(sink: W, wrap_for_tmux: bool) -> Self {
        Self {
            sink: Mutex::new(sink),
            wrap_for_tmux,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.sink.into_inner() {
            Ok(sink) => sink,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Osc52Clipboard<std::io::Stderr> {
    /// Targets stderr so stdout stays clean for the letter itself.
    /// `None` when stderr is not a terminal.
    pub fn stderr() -> Option<Self> {
        let stderr = std::io::stderr();
        if !stderr.is_terminal() {
            return None;
        }
        Some(Self::new(stderr, std::env::var_os("TMUX").is_some()))
    }
}

/// `ESC ] 52 ; c ; <base64> BEL`, optionally inside a tmux DCS passthrough.
pub fn osc52_sequence(text: &str, wrap_for_tmux: bool) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text);
    let sequence = format!("\x1b]52;c;{encoded}\x07");
    if wrap_for_tmux {
        format!("\x1bPtmux;\x1b{}\x1b\\", sequence.replace('\x1b', "\x1b\x1b"))
    } else {
        sequence
    }
}

#[async_trait]
impl<W: Write + Send> ClipboardBackend for Osc52Clipboard<W> {
    fn name(&self) -> &'static str {
        "osc52"
    }

    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let sequence = osc52_sequence(text, self.wrap_for_tmux);
        let mut sink = self
            .sink
            .lock()
            .map_err(|_| ClipboardError::Failed("terminal sink poisoned".to_string()))?;
        sink.write_all(sequence.as_bytes())
            .and_then(|_| sink.flush())
            .map_err(|e| ClipboardError::Failed(e.to_string()))
    }
}

/// Primary and fallback backends handed to the copy handler.
#[derive(Clone, Default)]
pub struct ClipboardBackends {
    pub primary: Option<Arc<dyn ClipboardBackend>>,
    pub fallback: Option<Arc<dyn ClipboardBackend>>,
}

impl ClipboardBackends {
    /// System clipboard first, OSC 52 on stderr when it is a terminal.
    pub fn platform() -> Self {
        Self {
            primary: Some(Arc::new(SystemClipboard::new())),
            fallback: Osc52Clipboard::stderr()
                .map(|backend| Arc::new(backend) as Arc<dyn ClipboardBackend>),
        }
    }
}
