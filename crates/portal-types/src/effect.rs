//! Effects emitted by the lifecycle core and the user-facing texts they carry.
//!
//! The core never touches the platform directly. Each transition yields a
//! list of [`Effect`]s which the shell runtime executes against the
//! platform services in order.

use serde::Serialize;

use crate::config::PickerOptions;
use crate::error::Result;

// ---------------------------------------------------------------------------
// Error causes
// ---------------------------------------------------------------------------

/// Why the persistent error view is displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorCause {
    /// Generic load failure from the browser surface.
    Load { description: String },
    /// HTTP error status returned by the page.
    Http { status: u16, description: String },
    /// The device went offline.
    Offline,
}

impl ErrorCause {
    /// One-line message for the in-place error view.
    pub fn message(&self) -> String {
        match self {
            Self::Load { description } => format!("Failed to load page: {description}"),
            Self::Http {
                status,
                description,
            } if description.is_empty() => format!("HTTP error {status}"),
            Self::Http {
                status,
                description,
            } => format!("HTTP error {status}: {description}"),
            Self::Offline => "No internet connection".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Notices and prompts
// ---------------------------------------------------------------------------

/// A modal, dismiss-only notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// Gallery access was denied.
    PermissionRequired,
    /// A navigation was refused by the allow-list.
    DomainBlocked { url: String },
    /// The page failed to load.
    LoadFailed { description: String },
    /// The page answered with an HTTP error status.
    HttpError { status: u16, description: String },
    /// Connectivity was lost.
    Offline,
}

impl Notice {
    pub fn title(&self) -> &'static str {
        match self {
            Self::PermissionRequired => "Permission required",
            Self::DomainBlocked { .. } => "Navigation blocked",
            Self::LoadFailed { .. } => "Load error",
            Self::HttpError { .. } => "HTTP error",
            Self::Offline => "No connection",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::PermissionRequired => {
                "This app needs access to your gallery to upload files.".to_string()
            },
            Self::DomainBlocked { url } => format!("{url} is not an allowed address."),
            Self::LoadFailed { description } => description.clone(),
            Self::HttpError {
                status,
                description,
            } => format!("The server responded with {status} {description}")
                .trim_end()
                .to_string(),
            Self::Offline => "Check your internet connection and try again.".to_string(),
        }
    }
}

impl From<&ErrorCause> for Notice {
    fn from(cause: &ErrorCause) -> Self {
        match cause {
            ErrorCause::Load { description } => Self::LoadFailed {
                description: description.clone(),
            },
            ErrorCause::Http {
                status,
                description,
            } => Self::HttpError {
                status: *status,
                description: description.clone(),
            },
            ErrorCause::Offline => Self::Offline,
        }
    }
}

/// A yes/no question awaiting a `PromptAnswered` event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Prompt {
    /// Shown on hardware back with no history left.
    ConfirmExit,
    /// Shown when the page requests a download.
    ConfirmDownload { url: String },
}

impl Prompt {
    pub fn title(&self) -> &'static str {
        match self {
            Self::ConfirmExit => "Exit app",
            Self::ConfirmDownload { .. } => "Download requested",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::ConfirmExit => "Do you really want to exit?",
            Self::ConfirmDownload { .. } => "Do you want to download the file?",
        }
    }

    /// Labels for the (accept, decline) buttons.
    pub fn buttons(&self) -> (&'static str, &'static str) {
        match self {
            Self::ConfirmExit => ("Yes", "No"),
            Self::ConfirmDownload { .. } => ("Download", "Cancel"),
        }
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// An imperative command for the platform, produced by a transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    ShowLoading,
    HideLoading,
    ShowErrorView { cause: ErrorCause },
    HideErrorView,
    ShowNotice { notice: Notice },
    Prompt { prompt: Prompt },
    /// Let the surface commit the navigation.
    AllowNavigation { url: String },
    /// Keep the surface where it is.
    BlockNavigation { url: String },
    Reload,
    GoBack,
    ExitProcess,
    RequestMediaPermission,
    LaunchMediaPicker { options: PickerOptions },
    /// Hand the selected resource to the upload collaborator.
    SubmitUpload { uri: String },
    /// User accepted a download; only logged.
    StartDownload { url: String },
}

impl Effect {
    /// Short stable name, used in log lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ShowLoading => "show-loading",
            Self::HideLoading => "hide-loading",
            Self::ShowErrorView { .. } => "show-error-view",
            Self::HideErrorView => "hide-error-view",
            Self::ShowNotice { .. } => "notice",
            Self::Prompt { .. } => "prompt",
            Self::AllowNavigation { .. } => "allow-navigation",
            Self::BlockNavigation { .. } => "block-navigation",
            Self::Reload => "reload",
            Self::GoBack => "go-back",
            Self::ExitProcess => "exit",
            Self::RequestMediaPermission => "request-media-permission",
            Self::LaunchMediaPicker { .. } => "launch-media-picker",
            Self::SubmitUpload { .. } => "submit-upload",
            Self::StartDownload { .. } => "start-download",
        }
    }

    /// Encode as one line of JSON for the driver's effect stream.
    pub fn to_json_line(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
