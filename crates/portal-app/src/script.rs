//! Line-oriented event script read by the headless driver.

use portal_types::error::{PortalError, Result};
use portal_types::event::{MediaSelection, NavigationIntent, ShellEvent};

/// One parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptCommand {
    /// Queue an event for the runtime.
    Event(ShellEvent),
    /// Ask the gate synchronously, then load the URL if allowed.
    Navigate(NavigationIntent),
    /// Synchronous hardware-back hook.
    Back,
    /// Flip the headless connectivity sensor and poll the monitor.
    Connectivity(bool),
}

/// Parse one line. Blank lines and `#` comments yield `None`.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<ScriptCommand>> {
    let line = line.trim_start();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    // `payload` keeps everything after the single separator character.
    let (word, payload) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = payload.trim();
    let err = |message: String| PortalError::Script {
        line: line_no,
        message,
    };

    let cmd = match word {
        "load-start" => ScriptCommand::Event(ShellEvent::LoadStarted),
        "load-end" => ScriptCommand::Event(ShellEvent::LoadFinished),
        "error" => ScriptCommand::Event(ShellEvent::LoadFailed {
            description: rest.to_string(),
        }),
        "http-error" => {
            let (status, description) = match rest.split_once(char::is_whitespace) {
                Some((s, d)) => (s, d.trim()),
                None => (rest, ""),
            };
            let status = status
                .parse::<u16>()
                .map_err(|_| err(format!("invalid HTTP status '{status}'")))?;
            ScriptCommand::Event(ShellEvent::HttpError {
                status,
                description: description.to_string(),
            })
        },
        "nav-state" => {
            let (flag, url) = match rest.split_once(char::is_whitespace) {
                Some((f, u)) => (f, Some(u.trim().to_string())),
                None => (rest, None),
            };
            let can_go_back = parse_bool(flag)
                .ok_or_else(|| err(format!("expected true|false, got '{flag}'")))?;
            ScriptCommand::Event(ShellEvent::NavigationStateChanged { can_go_back, url })
        },
        "navigate" => {
            ScriptCommand::Navigate(NavigationIntent::new(required(rest, "navigate", &err)?))
        },
        "back" => ScriptCommand::Back,
        "online" => ScriptCommand::Connectivity(true),
        "offline" => ScriptCommand::Connectivity(false),
        "retry" => ScriptCommand::Event(ShellEvent::RetryRequested),
        "message" => ScriptCommand::Event(ShellEvent::PageMessage {
            data: payload.to_string(),
        }),
        "permission" => {
            let granted = match rest {
                "granted" => true,
                "denied" => false,
                other => return Err(err(format!("expected granted|denied, got '{other}'"))),
            };
            ScriptCommand::Event(ShellEvent::MediaPermission { granted })
        },
        "picked" => ScriptCommand::Event(ShellEvent::MediaPicked {
            selection: MediaSelection::Picked {
                uri: required(rest, "picked", &err)?,
            },
        }),
        "pick-cancelled" => ScriptCommand::Event(ShellEvent::MediaPicked {
            selection: MediaSelection::Cancelled,
        }),
        "confirm" => ScriptCommand::Event(ShellEvent::PromptAnswered { accepted: true }),
        "cancel" => ScriptCommand::Event(ShellEvent::PromptAnswered { accepted: false }),
        "download" => ScriptCommand::Event(ShellEvent::DownloadRequested {
            url: required(rest, "download", &err)?,
        }),
        other => return Err(err(format!("unknown command '{other}'"))),
    };
    Ok(Some(cmd))
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

fn required(rest: &str, command: &str, err: &impl Fn(String) -> PortalError) -> Result<String> {
    if rest.is_empty() {
        return Err(err(format!("'{command}' needs an argument")));
    }
    Ok(rest.to_string())
}
