//! Spoken feedback.
//!
//! The core only decides *what* to say and when to stay quiet. Speaking is
//! left to a [`Narrator`] supplied by the host.

use std::time::{Duration, Instant};

/// Default window in which a repeated announcement is dropped.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Something that can speak a short phrase.
pub trait Narrator {
    fn announce(&mut self, text: &str);
}

impl<N: Narrator + ?Sized> Narrator for Box<N> {
    fn announce(&mut self, text: &str) {
        (**self).announce(text);
    }
}

/// Narrator that writes announcements to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNarrator;

impl Narrator for LogNarrator {
    fn announce(&mut self, text: &str) {
        log::info!("Narration: {text}");
    }
}

/// Wraps a narrator and drops an announcement identical to the previous one
/// made within the debounce window.
#[derive(Debug)]
pub struct Announcer<N> {
    inner: N,
    debounce: Duration,
    last: Option<(String, Instant)>,
}

impl<N: Narrator> Announcer<N> {
    pub fn new(inner: N) -> Self {
        Self::with_debounce(inner, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(inner: N, debounce: Duration) -> Self {
        Self {
            inner,
            debounce,
            last: None,
        }
    }

    /// Announce `text` now. Returns whether it was passed on.
    pub fn say(&mut self, text: &str) -> bool {
        self.say_at(text, Instant::now())
    }

    /// Announce `text` as if at `now`.
    pub fn say_at(&mut self, text: &str, now: Instant) -> bool {
        if let Some((last_text, at)) = &self.last {
            if last_text == text && now.saturating_duration_since(*at) < self.debounce {
                log::debug!("Dropping repeated announcement: {text}");
                return false;
            }
        }
        self.inner.announce(text);
        self.last = Some((text.to_string(), now));
        true
    }

    pub fn inner(&self) -> &N {
        &self.inner
    }
}
