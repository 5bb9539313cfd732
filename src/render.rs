//! Terminal presentation of results and notices.
//!
//! Everything here is cosmetic: nothing feeds back into the request/response
//! contract. Rendering functions return strings so callers decide where they
//! go; the typed reply runs as its own task and can be cancelled at any time.

use std::io::{self, Write};
use std::time::Duration;

use colored::{ColoredString, Colorize};
use tokio::task::{AbortHandle, JoinHandle};

use crate::prefs::Preferences;
use crate::types::{AnalysisResult, Category, Notice, NoticeLevel};

/// Terminal palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn from_prefs(prefs: &Preferences) -> Self {
        if prefs.dark_mode {
            Self::Dark
        } else {
            Self::Light
        }
    }

    fn label(&self, text: &str) -> ColoredString {
        match self {
            Self::Light => text.bold(),
            Self::Dark => text.bright_white().bold(),
        }
    }

    fn muted(&self, text: &str) -> ColoredString {
        match self {
            Self::Light => text.dimmed(),
            Self::Dark => text.bright_black(),
        }
    }

    fn category(&self, category: Category, text: &str) -> ColoredString {
        match (self, category) {
            (Self::Light, Category::Productive) => text.green().bold(),
            (Self::Light, Category::Unproductive) => text.yellow().bold(),
            (Self::Dark, Category::Productive) => text.bright_green().bold(),
            (Self::Dark, Category::Unproductive) => text.bright_yellow().bold(),
        }
    }

    fn level(&self, level: NoticeLevel, text: &str) -> ColoredString {
        match (self, level) {
            (Self::Light, NoticeLevel::Info) => text.blue(),
            (Self::Light, NoticeLevel::Success) => text.green(),
            (Self::Light, NoticeLevel::Warning) => text.yellow(),
            (Self::Light, NoticeLevel::Danger) => text.red(),
            (Self::Dark, NoticeLevel::Info) => text.bright_cyan(),
            (Self::Dark, NoticeLevel::Success) => text.bright_green(),
            (Self::Dark, NoticeLevel::Warning) => text.bright_yellow(),
            (Self::Dark, NoticeLevel::Danger) => text.bright_red(),
        }
    }
}

/// Horizontal confidence meter, e.g. `[██████░░░░]`.
///
/// The value is clamped to 0–100 for drawing only.
pub fn confidence_meter(confidence: f64, width: usize) -> String {
    let ratio = if confidence.is_finite() {
        confidence.clamp(0.0, 100.0) / 100.0
    } else {
        0.0
    };
    let filled = ((ratio * width as f64).round() as usize).min(width);
    format!("[{}{}]", "█".repeat(filled), "░".repeat(width - filled))
}

/// Classification, confidence and metadata, without the suggested reply.
pub fn render_summary(result: &AnalysisResult, theme: Theme, bar_width: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        theme.label("Classification:"),
        theme.category(result.category(), &result.classification)
    ));
    out.push_str(&format!(
        "{}     {} {}\n",
        theme.label("Confidence:"),
        result.confidence_label(),
        theme.muted(&confidence_meter(result.confidence, bar_width))
    ));
    if let Some(len) = result.text_length.filter(|n| *n > 0) {
        out.push_str(&format!(
            "{}    {}\n",
            theme.label("Text length:"),
            theme.muted(&format!("{len} characters"))
        ));
    }
    if let Some(ts) = &result.analysis_timestamp {
        out.push_str(&format!(
            "{}    {}\n",
            theme.label("Analysed at:"),
            theme.muted(ts)
        ));
    }
    out
}

/// Heading printed before the suggested reply.
pub fn reply_heading(theme: Theme) -> String {
    format!("\n{}\n", theme.label("Suggested reply:"))
}

/// Full result: summary followed by the suggested reply.
pub fn render_result(result: &AnalysisResult, theme: Theme, bar_width: usize) -> String {
    format!(
        "{}{}{}\n",
        render_summary(result, theme, bar_width),
        reply_heading(theme),
        result.response
    )
}

/// One-line notice tagged with its level.
pub fn render_notice(notice: &Notice, theme: Theme) -> String {
    let tag = format!("[{}]", notice.level);
    format!("{} {}", theme.level(notice.level, &tag).bold(), notice.message)
}

/// Write `text` one character per `delay`. A zero delay writes it at once.
pub async fn typewrite<W: Write>(text: &str, delay: Duration, out: &mut W) -> io::Result<()> {
    if delay.is_zero() {
        out.write_all(text.as_bytes())?;
        return out.flush();
    }

    let mut ticks = tokio::time::interval(delay);
    let mut buf = [0u8; 4];
    for ch in text.chars() {
        ticks.tick().await;
        out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
        out.flush()?;
    }
    Ok(())
}

/// A typed reveal running as its own task.
pub struct Typewriter {
    handle: JoinHandle<io::Result<()>>,
}

impl Typewriter {
    /// Type `text` to stdout.
    pub fn spawn(text: String, delay: Duration) -> Self {
        Self::spawn_with(text, delay, io::stdout())
    }

    /// Type `text` to the given writer.
    pub fn spawn_with<W>(text: String, delay: Duration, mut out: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let handle = tokio::spawn(async move { typewrite(&text, delay, &mut out).await });
        Self { handle }
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }

    /// Handle that cancels the task without owning it.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Wait for the task. Returns `false` if it was cancelled before finishing.
    pub async fn finish(self) -> io::Result<bool> {
        match self.handle.await {
            Ok(result) => result.map(|()| true),
            Err(e) if e.is_cancelled() => Ok(false),
            Err(e) => Err(io::Error::other(e)),
        }
    }
}
