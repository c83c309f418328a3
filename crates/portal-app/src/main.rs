//! Portal headless driver.
//!
//! Resolves the shell configuration, starts the runtime against the
//! headless platform, then reads an event script from stdin (one command per
//! line) and writes every executed effect to stdout as a JSON line.
//! Stops at end of input or once the user confirms the exit prompt.

mod script;

use std::io::{self, BufRead, Write};

use anyhow::Result;

use portal_platform::{BrowserSurface, HeadlessPlatform};
use portal_shell::ShellRuntime;
use portal_types::config::ShellConfig;
use portal_types::effect::Effect;

use script::ScriptCommand;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ShellConfig::resolve()?;
    log::info!(
        "Starting portal ({} allowed domains)",
        config.allowed_domains.len()
    );

    let mut runtime = ShellRuntime::new(&config, HeadlessPlatform::new());
    runtime.start()?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    emit(&mut out, runtime.take_executed())?;

    for (idx, line) in io::stdin().lock().lines().enumerate() {
        let line = line?;
        let cmd = match script::parse_line(idx + 1, &line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(e) => {
                log::warn!("{e}");
                continue;
            },
        };

        match cmd {
            ScriptCommand::Event(event) => runtime.push(event),
            ScriptCommand::Navigate(intent) => {
                if runtime.should_start_load(&intent)
                    && let Err(e) = runtime.platform_mut().load_url(&intent.url)
                {
                    log::warn!("Load of {} failed: {e}", intent.url);
                }
            },
            ScriptCommand::Back => {
                runtime.handle_back();
            },
            ScriptCommand::Connectivity(online) => {
                runtime.platform_mut().set_online(online);
                runtime.poll_connectivity();
            },
        }
        runtime.run_pending();
        emit(&mut out, runtime.take_executed())?;

        if runtime.exit_requested() {
            log::info!("Exit confirmed -- stopping");
            break;
        }
    }

    log::info!("Shell stopped in {:?}", runtime.presentation());
    Ok(())
}

fn emit(out: &mut impl Write, effects: Vec<Effect>) -> Result<()> {
    for effect in &effects {
        writeln!(out, "{}", effect.to_json_line()?)?;
    }
    out.flush()?;
    Ok(())
}
