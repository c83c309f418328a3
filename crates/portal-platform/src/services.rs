//! Platform service traits and headless desktop implementation.

use portal_types::config::{PickerOptions, SurfaceSettings};
use portal_types::effect::{ErrorCause, Notice, Prompt};
use portal_types::error::{PortalError, Result};

// ---------------------------------------------------------------------------
// Browser surface
// ---------------------------------------------------------------------------

/// Imperative side of the embedded browser surface.
///
/// Load, error and history events travel the other way, as
/// [`portal_types::event::ShellEvent`]s pushed by the host.
pub trait BrowserSurface {
    /// Apply engine settings before the first load.
    fn apply_settings(&mut self, settings: &SurfaceSettings) -> Result<()>;

    /// Start loading `url`.
    fn load_url(&mut self, url: &str) -> Result<()>;

    /// Reload the current page.
    fn reload(&mut self) -> Result<()>;

    /// Step one entry back in the surface history.
    fn go_back(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Shell chrome
// ---------------------------------------------------------------------------

/// The shell's own UI around the surface: loading indicator, persistent
/// error view, modal notices and yes/no prompts.
pub trait ShellUi {
    fn set_loading(&mut self, visible: bool) -> Result<()>;

    fn show_error_view(&mut self, cause: &ErrorCause) -> Result<()>;

    fn hide_error_view(&mut self) -> Result<()>;

    /// Show a dismiss-only notice.
    fn show_notice(&mut self, notice: &Notice) -> Result<()>;

    /// Show a yes/no prompt. The answer comes back as a
    /// `PromptAnswered` event.
    fn show_prompt(&mut self, prompt: &Prompt) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Connectivity
// ---------------------------------------------------------------------------

/// Abstraction over the platform connectivity sensor.
pub trait ConnectivityService {
    /// Whether the device currently has a usable connection.
    fn is_online(&self) -> Result<bool>;
}

// ---------------------------------------------------------------------------
// Media picker
// ---------------------------------------------------------------------------

/// Abstraction over the platform gallery picker.
///
/// Both calls only start the flow. The results arrive as
/// `MediaPermission` and `MediaPicked` events.
pub trait MediaPicker {
    /// Ask the user for gallery access.
    fn request_permission(&mut self) -> Result<()>;

    /// Open the selection prompt.
    fn launch(&mut self, options: &PickerOptions) -> Result<()>;
}

/// Receives selected resources for upload.
pub trait UploadService {
    fn submit(&mut self, uri: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Process control
// ---------------------------------------------------------------------------

/// Abstraction over process lifetime.
pub trait ProcessControl {
    /// Terminate the application.
    fn exit(&mut self) -> Result<()>;
}

// ---------------------------------------------------------------------------
// Unified platform trait
// ---------------------------------------------------------------------------

/// Aggregate trait providing access to all platform services.
pub trait Platform:
    BrowserSurface + ShellUi + ConnectivityService + MediaPicker + UploadService + ProcessControl
{
}

// ---------------------------------------------------------------------------
// Headless implementation
// ---------------------------------------------------------------------------

/// Platform implementation without a GUI host.
///
/// Every call is logged and mirrored into plain fields so a driver can
/// inspect what a real host would be showing. Connectivity is whatever the
/// driver last set with [`HeadlessPlatform::set_online`].
#[derive(Debug)]
pub struct HeadlessPlatform {
    online: bool,
    current_url: Option<String>,
    settings: Option<SurfaceSettings>,
    loading: bool,
    error_view: Option<ErrorCause>,
    last_notice: Option<Notice>,
    last_prompt: Option<Prompt>,
    uploads: Vec<String>,
    exited: bool,
}

impl HeadlessPlatform {
    pub fn new() -> Self {
        Self {
            online: true,
            current_url: None,
            settings: None,
            loading: false,
            error_view: None,
            last_notice: None,
            last_prompt: None,
            uploads: Vec::new(),
            exited: false,
        }
    }

    pub fn set_online(&mut self, online: bool) {
        self.online = online;
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn settings(&self) -> Option<&SurfaceSettings> {
        self.settings.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error_view(&self) -> Option<&ErrorCause> {
        self.error_view.as_ref()
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.last_notice.as_ref()
    }

    pub fn last_prompt(&self) -> Option<&Prompt> {
        self.last_prompt.as_ref()
    }

    pub fn uploads(&self) -> &[String] {
        &self.uploads
    }

    pub fn has_exited(&self) -> bool {
        self.exited
    }
}

impl Default for HeadlessPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl BrowserSurface for HeadlessPlatform {
    fn apply_settings(&mut self, settings: &SurfaceSettings) -> Result<()> {
        log::debug!("surface settings: {settings:?}");
        self.settings = Some(settings.clone());
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        log::info!("surface: load {url}");
        self.current_url = Some(url.to_string());
        Ok(())
    }

    fn reload(&mut self) -> Result<()> {
        let Some(url) = self.current_url.as_deref() else {
            return Err(PortalError::Surface("reload with no page loaded".into()));
        };
        log::info!("surface: reload {url}");
        Ok(())
    }

    fn go_back(&mut self) -> Result<()> {
        log::info!("surface: go back");
        Ok(())
    }
}

impl ShellUi for HeadlessPlatform {
    fn set_loading(&mut self, visible: bool) -> Result<()> {
        self.loading = visible;
        Ok(())
    }

    fn show_error_view(&mut self, cause: &ErrorCause) -> Result<()> {
        log::info!("error view: {}", cause.message());
        self.error_view = Some(cause.clone());
        Ok(())
    }

    fn hide_error_view(&mut self) -> Result<()> {
        self.error_view = None;
        Ok(())
    }

    fn show_notice(&mut self, notice: &Notice) -> Result<()> {
        log::info!("notice: {} -- {}", notice.title(), notice.message());
        self.last_notice = Some(notice.clone());
        Ok(())
    }

    fn show_prompt(&mut self, prompt: &Prompt) -> Result<()> {
        let (yes, no) = prompt.buttons();
        log::info!(
            "prompt: {} -- {} [{yes}/{no}]",
            prompt.title(),
            prompt.message()
        );
        self.last_prompt = Some(prompt.clone());
        Ok(())
    }
}

impl ConnectivityService for HeadlessPlatform {
    fn is_online(&self) -> Result<bool> {
        Ok(self.online)
    }
}

impl MediaPicker for HeadlessPlatform {
    fn request_permission(&mut self) -> Result<()> {
        log::info!("picker: requesting gallery permission");
        Ok(())
    }

    fn launch(&mut self, options: &PickerOptions) -> Result<()> {
        log::info!(
            "picker: selecting {:?} (editing: {}, quality: {})",
            options.media,
            options.allows_editing,
            options.quality
        );
        Ok(())
    }
}

impl UploadService for HeadlessPlatform {
    fn submit(&mut self, uri: &str) -> Result<()> {
        log::info!("upload: selected file {uri}");
        self.uploads.push(uri.to_string());
        Ok(())
    }
}

impl ProcessControl for HeadlessPlatform {
    fn exit(&mut self) -> Result<()> {
        if self.exited {
            return Err(PortalError::Platform("process is already exiting".into()));
        }
        log::info!("process: exit requested");
        self.exited = true;
        Ok(())
    }
}

impl Platform for HeadlessPlatform {}

// ---------------------------------------------------------------------------
// In-module tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    /// Sensor that fails every sample.
    struct BrokenSensor;

    impl ConnectivityService for BrokenSensor {
        fn is_online(&self) -> Result<bool> {
            Err(PortalError::Platform("sensor unavailable".into()))
        }
    }

    #[test]
    fn headless_starts_online_and_idle() {
        let p = HeadlessPlatform::new();
        assert!(p.is_online().unwrap());
        assert!(p.current_url().is_none());
        assert!(!p.is_loading());
        assert!(p.error_view().is_none());
        assert!(!p.has_exited());
    }

    #[test]
    fn headless_tracks_surface_calls() {
        let mut p = HeadlessPlatform::new();
        p.apply_settings(&SurfaceSettings::default()).unwrap();
        p.load_url("https://example.com").unwrap();
        p.reload().unwrap();
        p.go_back().unwrap();
        assert_eq!(p.current_url(), Some("https://example.com"));
        assert_eq!(p.settings(), Some(&SurfaceSettings::default()));
    }

    #[test]
    fn headless_error_view_show_and_hide() {
        let mut p = HeadlessPlatform::new();
        p.show_error_view(&ErrorCause::Offline).unwrap();
        assert_eq!(p.error_view(), Some(&ErrorCause::Offline));
        p.hide_error_view().unwrap();
        assert!(p.error_view().is_none());
    }

    #[test]
    fn headless_records_notice_and_prompt() {
        let mut p = HeadlessPlatform::new();
        p.show_notice(&Notice::PermissionRequired).unwrap();
        p.show_prompt(&Prompt::ConfirmExit).unwrap();
        assert_eq!(p.last_notice(), Some(&Notice::PermissionRequired));
        assert_eq!(p.last_prompt(), Some(&Prompt::ConfirmExit));
    }

    #[test]
    fn headless_connectivity_follows_setter() {
        let mut p = HeadlessPlatform::new();
        p.set_online(false);
        assert!(!p.is_online().unwrap());
        p.set_online(true);
        assert!(p.is_online().unwrap());
    }

    #[test]
    fn headless_upload_and_exit() {
        let mut p = HeadlessPlatform::new();
        p.request_permission().unwrap();
        p.launch(&PickerOptions::default()).unwrap();
        p.submit("file:///photos/1.jpg").unwrap();
        p.exit().unwrap();
        assert_eq!(p.uploads(), ["file:///photos/1.jpg".to_string()]);
        assert!(p.has_exited());
    }

    #[test]
    fn headless_reload_without_page_is_surface_error() {
        let mut p = HeadlessPlatform::new();
        let err = p.reload().unwrap_err();
        assert!(matches!(err, PortalError::Surface(_)));
        p.load_url("https://example.com").unwrap();
        assert!(p.reload().is_ok());
    }

    #[test]
    fn headless_second_exit_is_platform_error() {
        let mut p = HeadlessPlatform::new();
        p.exit().unwrap();
        let err = p.exit().unwrap_err();
        assert_eq!(format!("{err}"), "platform error: process is already exiting");
        assert!(p.has_exited());
    }

    #[test]
    fn broken_sensor_reports_platform_error() {
        let err = BrokenSensor.is_online().unwrap_err();
        assert_eq!(format!("{err}"), "platform error: sensor unavailable");
    }
}
