//! Shell runtime: single-threaded event queue driving the lifecycle
//! controller and executing its effects against the platform.

use std::collections::VecDeque;

use portal_platform::{ConnectivityMonitor, Platform};
use portal_types::config::{ShellConfig, SurfaceSettings};
use portal_types::effect::Effect;
use portal_types::error::Result;
use portal_types::event::{NavigationIntent, ShellEvent};

use crate::lifecycle::{LifecycleController, ShellPolicy};
use crate::session::PresentationState;

/// Owns the controller, the platform and the pending event queue.
///
/// Host callbacks either [`push`](Self::push) events for the next
/// [`run_pending`](Self::run_pending) pass, or use the synchronous hooks
/// ([`should_start_load`](Self::should_start_load),
/// [`handle_back`](Self::handle_back)) when the host needs an answer
/// immediately.
pub struct ShellRuntime<P: Platform> {
    controller: LifecycleController,
    platform: P,
    monitor: ConnectivityMonitor,
    queue: VecDeque<ShellEvent>,
    executed: Vec<Effect>,
    start_url: String,
    surface: SurfaceSettings,
    exit_requested: bool,
}

impl<P: Platform> ShellRuntime<P> {
    pub fn new(config: &ShellConfig, platform: P) -> Self {
        Self {
            controller: LifecycleController::new(ShellPolicy::from_config(config)),
            platform,
            monitor: ConnectivityMonitor::new(),
            queue: VecDeque::new(),
            executed: Vec::new(),
            start_url: config.start_url.clone(),
            surface: config.surface.clone(),
            exit_requested: false,
        }
    }

    /// Configure the surface and load the start URL if the gate allows it.
    pub fn start(&mut self) -> Result<()> {
        log::info!("Starting shell at {}", self.start_url);
        self.platform.apply_settings(&self.surface)?;
        if self.surface.start_in_loading_state {
            self.platform.set_loading(true)?;
        }
        let intent = NavigationIntent::new(self.start_url.clone());
        if self.should_start_load(&intent) {
            self.platform.load_url(&intent.url)?;
        }
        Ok(())
    }

    /// Queue an event for the next [`run_pending`](Self::run_pending).
    pub fn push(&mut self, event: ShellEvent) {
        self.queue.push_back(event);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Drain the queue in order. Returns the number of events handled.
    ///
    /// Events still queued after an exit was executed are dropped.
    pub fn run_pending(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.queue.pop_front() {
            if self.exit_requested {
                log::debug!("Exit requested -- dropping {} queued events", self.queue.len() + 1);
                self.queue.clear();
                break;
            }
            self.dispatch(&event);
            handled += 1;
        }
        handled
    }

    /// Apply one event immediately and execute its effects.
    pub fn dispatch(&mut self, event: &ShellEvent) -> Vec<Effect> {
        log::debug!("Event: {}", event.name());
        let effects = self.controller.dispatch(event);
        for effect in &effects {
            self.execute(effect);
        }
        self.executed.extend(effects.iter().cloned());
        effects
    }

    /// Synchronous gate hook for surfaces that ask before committing a
    /// navigation.
    pub fn should_start_load(&mut self, intent: &NavigationIntent) -> bool {
        self.dispatch(&ShellEvent::NavigationRequested(intent.clone()))
            .iter()
            .any(|e| matches!(e, Effect::AllowNavigation { .. }))
    }

    /// Synchronous hardware-back hook. Always reports the press as handled
    /// so the host never runs its default back behavior.
    pub fn handle_back(&mut self) -> bool {
        self.dispatch(&ShellEvent::HardwareBack);
        true
    }

    /// Sample connectivity and queue a transition event if it changed.
    pub fn poll_connectivity(&mut self) {
        if let Some(event) = self.monitor.sample(&self.platform) {
            self.push(event);
        }
    }

    fn execute(&mut self, effect: &Effect) {
        let result = match effect {
            Effect::ShowLoading => self.platform.set_loading(true),
            Effect::HideLoading => self.platform.set_loading(false),
            Effect::ShowErrorView { cause } => self.platform.show_error_view(cause),
            Effect::HideErrorView => self.platform.hide_error_view(),
            Effect::ShowNotice { notice } => self.platform.show_notice(notice),
            Effect::Prompt { prompt } => self.platform.show_prompt(prompt),
            // The verdict is returned to the surface by `should_start_load`.
            Effect::AllowNavigation { .. } | Effect::BlockNavigation { .. } => Ok(()),
            Effect::Reload => self.platform.reload(),
            Effect::GoBack => self.platform.go_back(),
            Effect::ExitProcess => {
                self.exit_requested = true;
                self.platform.exit()
            },
            Effect::RequestMediaPermission => self.platform.request_permission(),
            Effect::LaunchMediaPicker { options } => self.platform.launch(options),
            Effect::SubmitUpload { uri } => self.platform.submit(uri),
            Effect::StartDownload { url } => {
                log::info!("Downloading file: {url}");
                Ok(())
            },
        };
        if let Err(e) = result {
            log::warn!("Effect {} failed: {e}", effect.name());
        }
    }

    /// Take every effect executed since the last call.
    pub fn take_executed(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.executed)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn presentation(&self) -> PresentationState {
        self.controller.presentation()
    }

    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }
}
