//! Arrow kernel runner (default binary).
//!
//! Starts in the demo menu. The terminal is switched to raw mode and the
//! alternate screen for the whole run, so log output goes to the file named by
//! `ARROW_LOG_FILE` instead of the screen.

use std::fs::File;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

use arrow_kernel::demo;
use arrow_kernel::engine::{audio_for, Engine, EngineConfig};
use arrow_kernel::input::{KeyTracker, TerminalInput};
use arrow_kernel::term::TerminalPresenter;

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    init_logging(&config)?;
    log::info!("starting with {:?}", config);

    let mut presenter = TerminalPresenter::new();
    let mut input = TerminalInput::with_tracker(KeyTracker::with_key_release_timeout(
        config.key_release_timeout,
    ));

    let result = presenter
        .enter()
        .and_then(|_| input.enter())
        .and_then(|_| run(&config, &mut input, &mut presenter));

    // Always try to restore terminal state.
    let _ = input.exit();
    let _ = presenter.exit();

    if let Err(err) = &result {
        log::error!("stopped with error: {:#}", err);
    }
    result
}

fn run(config: &EngineConfig, input: &mut TerminalInput, presenter: &mut TerminalPresenter) -> Result<()> {
    let mut engine = Engine::from_config(config, audio_for(config.audio), input, presenter);
    engine.set_scene(demo::initial_scene());
    engine.run()
}

fn init_logging(config: &EngineConfig) -> Result<()> {
    match &config.log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("cannot create log file {}", path))?;
            Builder::from_env(Env::default().default_filter_or("info"))
                .target(Target::Pipe(Box::new(file)))
                .init();
        }
        None => Builder::from_env(Env::default().default_filter_or("off")).init(),
    }
    Ok(())
}
