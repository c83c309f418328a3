//! Platform service abstractions for portal.
//!
//! The embedded browser surface, the shell chrome (notices, prompts, error
//! view), the connectivity sensor, the media picker and process control are
//! external collaborators. This crate defines the traits the shell runtime
//! drives them through, a headless desktop implementation, and the
//! connectivity monitor that turns sensor samples into shell events.

pub mod monitor;
pub mod services;

pub use monitor::ConnectivityMonitor;
pub use services::{
    BrowserSurface, ConnectivityService, HeadlessPlatform, MediaPicker, Platform,
    ProcessControl, ShellUi, UploadService,
};
