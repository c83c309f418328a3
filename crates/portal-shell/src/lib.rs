//! Navigation gate and lifecycle controller for the portal web shell.
//!
//! The shell hosts one remote web application in an embedded browser
//! surface. Every host callback becomes a [`ShellEvent`], the
//! [`LifecycleController`] folds it into the [`SessionState`] and returns
//! the effects to perform, and the [`ShellRuntime`] executes them against a
//! [`portal_platform::Platform`].
//!
//! [`ShellEvent`]: portal_types::event::ShellEvent

pub mod gate;
pub mod lifecycle;
pub mod runtime;
pub mod session;

pub use gate::{AllowList, NavigationGate, Verdict};
pub use lifecycle::{LifecycleController, ShellPolicy, Transition, transition};
pub use runtime::ShellRuntime;
pub use session::{PresentationState, SessionState, UploadPhase};
