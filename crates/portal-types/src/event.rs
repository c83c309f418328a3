//! Platform-agnostic shell events.
//!
//! Every host maps its native browser-surface callbacks, hardware buttons,
//! connectivity sensor and picker results to [`ShellEvent`]. The lifecycle
//! core never sees raw platform callbacks.

use serde::{Deserialize, Serialize};

/// A navigation the browser surface is about to commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationIntent {
    /// Target URL, exactly as reported by the surface.
    pub url: String,
}

impl NavigationIntent {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Outcome of a media selection prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MediaSelection {
    /// The user picked an item; `uri` is a local resource handle.
    Picked { uri: String },
    /// The user dismissed the picker.
    Cancelled,
}

/// A platform-agnostic shell event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ShellEvent {
    /// The surface started loading a page.
    LoadStarted,
    /// The surface finished loading a page successfully.
    LoadFinished,
    /// Generic load failure reported by the surface.
    LoadFailed { description: String },
    /// The page responded with an HTTP error status.
    HttpError { status: u16, description: String },
    /// History changed inside the surface.
    NavigationStateChanged {
        can_go_back: bool,
        url: Option<String>,
    },
    /// The surface asks whether it may commit a navigation.
    NavigationRequested(NavigationIntent),
    /// The page asked to download a file.
    DownloadRequested { url: String },
    /// Connectivity sensor transition.
    ConnectivityChanged { online: bool },
    /// Hardware back button pressed.
    HardwareBack,
    /// User pressed retry on the error view.
    RetryRequested,
    /// User answered the currently displayed prompt.
    PromptAnswered { accepted: bool },
    /// String posted by page script over the message channel.
    PageMessage { data: String },
    /// Result of a gallery permission request.
    MediaPermission { granted: bool },
    /// Result of the media selection prompt.
    MediaPicked { selection: MediaSelection },
}

impl ShellEvent {
    /// Short stable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::LoadStarted => "load-start",
            Self::LoadFinished => "load-end",
            Self::LoadFailed { .. } => "error",
            Self::HttpError { .. } => "http-error",
            Self::NavigationStateChanged { .. } => "nav-state",
            Self::NavigationRequested(_) => "navigate",
            Self::DownloadRequested { .. } => "download",
            Self::ConnectivityChanged { online: true } => "online",
            Self::ConnectivityChanged { online: false } => "offline",
            Self::HardwareBack => "back",
            Self::RetryRequested => "retry",
            Self::PromptAnswered { .. } => "prompt-answer",
            Self::PageMessage { .. } => "message",
            Self::MediaPermission { .. } => "permission",
            Self::MediaPicked { .. } => "picked",
        }
    }
}
