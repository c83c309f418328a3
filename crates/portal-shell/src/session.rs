//! Session state owned by the lifecycle controller.

use portal_types::effect::{ErrorCause, Prompt};

/// What the user currently sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationState {
    /// Loading indicator over the surface.
    Loading,
    /// The page is displayed.
    Ready,
    /// Persistent error view with a retry button.
    Error,
    /// The first navigation was refused by the allow-list.
    Blocked,
}

/// Progress of the single upload slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    /// Waiting for the gallery permission answer.
    AwaitingPermission,
    /// Waiting for the user to pick or cancel.
    AwaitingSelection,
}

impl UploadPhase {
    pub fn is_in_flight(self) -> bool {
        self != Self::Idle
    }
}

/// Everything the controller tracks for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub presentation: PresentationState,
    /// Mirrors the surface's history depth.
    pub can_go_back: bool,
    /// Last connectivity reported by the monitor.
    pub online: bool,
    /// Cause behind the error view. Set only while `presentation` is `Error`.
    pub error: Option<ErrorCause>,
    pub upload: UploadPhase,
    /// Prompt awaiting an answer, if any.
    pub pending_prompt: Option<Prompt>,
    /// Last URL reported by a navigation-state change.
    pub current_url: Option<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            presentation: PresentationState::Loading,
            can_go_back: false,
            online: true,
            error: None,
            upload: UploadPhase::Idle,
            pending_prompt: None,
            current_url: None,
        }
    }

    pub fn is_error_displayed(&self) -> bool {
        self.error.is_some()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_loading_without_history() {
        let s = SessionState::new();
        assert_eq!(s.presentation, PresentationState::Loading);
        assert!(!s.can_go_back);
        assert!(s.online);
        assert!(!s.is_error_displayed());
        assert_eq!(s.upload, UploadPhase::Idle);
        assert!(s.pending_prompt.is_none());
    }

    #[test]
    fn upload_in_flight() {
        assert!(!UploadPhase::Idle.is_in_flight());
        assert!(UploadPhase::AwaitingPermission.is_in_flight());
        assert!(UploadPhase::AwaitingSelection.is_in_flight());
    }
}
