//! Lifecycle controller: the state machine behind what the user sees.
//!
//! [`transition`] is a total function from (state, event) to (state,
//! effects). [`LifecycleController`] owns the [`SessionState`] and applies
//! transitions one event at a time.
//!
//! - `Loading` -> `Ready` on the first successful load.
//! - Load failure, HTTP error or connectivity loss -> `Error` from any state.
//! - `Error` stays until the user retries, which re-enters `Loading` and
//!   reloads the surface.
//! - A navigation denied before anything was displayed -> `Blocked`.

use portal_types::config::{PickerOptions, ShellConfig};
use portal_types::effect::{Effect, ErrorCause, Notice, Prompt};
use portal_types::event::{MediaSelection, NavigationIntent, ShellEvent};

use crate::gate::{AllowList, NavigationGate, Verdict};
use crate::session::{PresentationState, SessionState, UploadPhase};

// -----------------------------------------------------------------------
// ShellPolicy
// -----------------------------------------------------------------------

/// Fixed inputs to every transition, built once from configuration.
#[derive(Debug, Clone)]
pub struct ShellPolicy {
    pub gate: NavigationGate,
    /// Page message that triggers the upload flow.
    pub upload_message: String,
    pub picker: PickerOptions,
}

impl ShellPolicy {
    pub fn from_config(config: &ShellConfig) -> Self {
        Self {
            gate: NavigationGate::new(AllowList::new(config.allowed_domains.iter().cloned())),
            upload_message: config.upload_message.clone(),
            picker: config.picker.clone(),
        }
    }
}

// -----------------------------------------------------------------------
// Transition
// -----------------------------------------------------------------------

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: SessionState,
    pub effects: Vec<Effect>,
}

/// Apply `event` to `state`.
pub fn transition(state: &SessionState, event: &ShellEvent, policy: &ShellPolicy) -> Transition {
    let mut next = state.clone();
    let mut effects = Vec::new();

    match event {
        ShellEvent::LoadStarted => {
            log::debug!("Load started ({:?})", next.presentation);
        },
        ShellEvent::LoadFinished => {
            if next.presentation == PresentationState::Error {
                log::debug!("Load finished while error view is up -- waiting for retry");
            } else {
                enter(&mut next, PresentationState::Ready);
                next.error = None;
                effects.push(Effect::HideLoading);
                effects.push(Effect::HideErrorView);
            }
        },
        ShellEvent::LoadFailed { description } => {
            log::warn!("Surface load failed: {description}");
            fail(
                &mut next,
                &mut effects,
                ErrorCause::Load {
                    description: description.clone(),
                },
            );
        },
        ShellEvent::HttpError {
            status,
            description,
        } => {
            log::warn!("HTTP error {status}: {description}");
            fail(
                &mut next,
                &mut effects,
                ErrorCause::Http {
                    status: *status,
                    description: description.clone(),
                },
            );
        },
        ShellEvent::ConnectivityChanged { online } => {
            next.online = *online;
            if *online {
                log::info!("Back online -- waiting for retry");
            } else {
                fail(&mut next, &mut effects, ErrorCause::Offline);
            }
        },
        ShellEvent::RetryRequested => {
            if next.presentation == PresentationState::Error {
                enter(&mut next, PresentationState::Loading);
                next.error = None;
                effects.push(Effect::HideErrorView);
                effects.push(Effect::ShowLoading);
                effects.push(Effect::Reload);
            } else {
                log::debug!("Retry ignored in {:?}", next.presentation);
            }
        },
        ShellEvent::NavigationStateChanged { can_go_back, url } => {
            next.can_go_back = *can_go_back;
            if let Some(url) = url {
                next.current_url = Some(url.clone());
            }
        },
        ShellEvent::NavigationRequested(intent) => {
            navigation_requested(&mut next, &mut effects, intent, &policy.gate);
        },
        ShellEvent::DownloadRequested { url } => {
            ask(
                &mut next,
                &mut effects,
                Prompt::ConfirmDownload { url: url.clone() },
            );
        },
        ShellEvent::HardwareBack => {
            if next.can_go_back {
                effects.push(Effect::GoBack);
            } else {
                ask(&mut next, &mut effects, Prompt::ConfirmExit);
            }
        },
        ShellEvent::PromptAnswered { accepted } => {
            prompt_answered(&mut next, &mut effects, *accepted);
        },
        ShellEvent::PageMessage { data } => {
            if *data != policy.upload_message {
                log::debug!("Ignoring page message {data:?}");
            } else if next.upload.is_in_flight() {
                log::warn!("Upload already in progress ({:?}) -- ignoring trigger", next.upload);
            } else {
                next.upload = UploadPhase::AwaitingPermission;
                effects.push(Effect::RequestMediaPermission);
            }
        },
        ShellEvent::MediaPermission { granted } => {
            if next.upload != UploadPhase::AwaitingPermission {
                log::debug!("Stray permission result ({:?})", next.upload);
            } else if *granted {
                next.upload = UploadPhase::AwaitingSelection;
                effects.push(Effect::LaunchMediaPicker {
                    options: policy.picker.clone(),
                });
            } else {
                log::info!("Gallery permission denied");
                next.upload = UploadPhase::Idle;
                effects.push(Effect::ShowNotice {
                    notice: Notice::PermissionRequired,
                });
            }
        },
        ShellEvent::MediaPicked { selection } => {
            if next.upload != UploadPhase::AwaitingSelection {
                log::debug!("Stray picker result ({:?})", next.upload);
            } else {
                next.upload = UploadPhase::Idle;
                match selection {
                    MediaSelection::Picked { uri } => {
                        effects.push(Effect::SubmitUpload { uri: uri.clone() });
                    },
                    MediaSelection::Cancelled => log::info!("File selection cancelled"),
                }
            }
        },
    }

    Transition {
        state: next,
        effects,
    }
}

fn enter(state: &mut SessionState, presentation: PresentationState) {
    if state.presentation != presentation {
        log::info!("Presentation {:?} -> {:?}", state.presentation, presentation);
        state.presentation = presentation;
    }
}

fn fail(state: &mut SessionState, effects: &mut Vec<Effect>, cause: ErrorCause) {
    enter(state, PresentationState::Error);
    effects.push(Effect::HideLoading);
    effects.push(Effect::ShowNotice {
        notice: Notice::from(&cause),
    });
    effects.push(Effect::ShowErrorView {
        cause: cause.clone(),
    });
    state.error = Some(cause);
}

/// A newer prompt replaces one still waiting for an answer.
fn ask(state: &mut SessionState, effects: &mut Vec<Effect>, prompt: Prompt) {
    if let Some(previous) = state.pending_prompt.replace(prompt.clone()) {
        log::debug!("Prompt {previous:?} superseded");
    }
    effects.push(Effect::Prompt { prompt });
}

fn navigation_requested(
    state: &mut SessionState,
    effects: &mut Vec<Effect>,
    intent: &NavigationIntent,
    gate: &NavigationGate,
) {
    let url = intent.url.clone();
    match gate.evaluate(intent) {
        Verdict::Allow => effects.push(Effect::AllowNavigation { url }),
        Verdict::Deny => {
            log::warn!("Blocked navigation to {url}");
            if state.presentation == PresentationState::Loading {
                enter(state, PresentationState::Blocked);
                effects.push(Effect::HideLoading);
            }
            effects.push(Effect::BlockNavigation { url: url.clone() });
            effects.push(Effect::ShowNotice {
                notice: Notice::DomainBlocked { url },
            });
        },
    }
}

fn prompt_answered(state: &mut SessionState, effects: &mut Vec<Effect>, accepted: bool) {
    let Some(prompt) = state.pending_prompt.take() else {
        log::debug!("Prompt answer with no prompt pending");
        return;
    };
    if !accepted {
        log::debug!("Prompt {prompt:?} declined");
        return;
    }
    match prompt {
        Prompt::ConfirmExit => effects.push(Effect::ExitProcess),
        Prompt::ConfirmDownload { url } => effects.push(Effect::StartDownload { url }),
    }
}

// -----------------------------------------------------------------------
// LifecycleController
// -----------------------------------------------------------------------

/// Owns the session state and feeds it through [`transition`].
#[derive(Debug, Clone)]
pub struct LifecycleController {
    state: SessionState,
    policy: ShellPolicy,
}

impl LifecycleController {
    pub fn new(policy: ShellPolicy) -> Self {
        Self {
            state: SessionState::new(),
            policy,
        }
    }

    /// Apply one event and return the effects to execute.
    pub fn dispatch(&mut self, event: &ShellEvent) -> Vec<Effect> {
        let Transition { state, effects } = transition(&self.state, event, &self.policy);
        self.state = state;
        effects
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn presentation(&self) -> PresentationState {
        self.state.presentation
    }

    pub fn can_go_back(&self) -> bool {
        self.state.can_go_back
    }

    pub fn policy(&self) -> &ShellPolicy {
        &self.policy
    }
}
