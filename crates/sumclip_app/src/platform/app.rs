use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use sumclip_core::{update, AppState, Msg, RenderModel};
use sumclip_engine::EngineHandle;
use sumclip_logging::{sumclip_info, sumclip_warn};

use super::config::{AppConfig, CONFIG_FILENAME, ENV_BACKEND_URL};
use super::effects::EffectRunner;
use super::logging;
use super::ui::input::{parse_command, Command, HELP};
use super::ui::render::{render, ImageDisplay};

const ENGINE_POLL: Duration = Duration::from_millis(50);

pub fn run_app() -> Result<()> {
    let config_path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILENAME));
    let config = AppConfig::load(&config_path)?
        .with_backend_override(std::env::var(ENV_BACKEND_URL).ok());

    logging::initialize(
        config.log_destination,
        sumclip_logging::level_from_name(&config.log_level),
    );
    sumclip_info!("sumclip starting, backend {}", config.backend_url);

    let engine = EngineHandle::new(config.fetch_settings()).context("starting fetch engine")?;
    let runner = EffectRunner::new(engine, config.image_dir.clone());

    let (input_tx, input_rx) = mpsc::channel::<Command>();
    spawn_input_reader(input_tx)?;

    println!("{HELP}");
    let mut dashboard = Dashboard::new(runner);
    dashboard.dispatch(Msg::DashboardOpened);

    loop {
        while let Ok(command) = input_rx.try_recv() {
            if !dashboard.handle_command(command) {
                dashboard.dispatch(Msg::Teardown);
                sumclip_info!("sumclip shutting down");
                return Ok(());
            }
        }
        if let Some(msg) = dashboard.runner.next_message(ENGINE_POLL) {
            dashboard.dispatch(msg);
        }
    }
}

/// Reads stdin on its own thread; end of input counts as `quit`.
fn spawn_input_reader(tx: mpsc::Sender<Command>) -> Result<()> {
    thread::Builder::new()
        .name("sumclip-input".to_string())
        .spawn(move || {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let Ok(line) = line else { break };
                match parse_command(&line) {
                    Ok(command) => {
                        if tx.send(command).is_err() {
                            return;
                        }
                    }
                    Err(message) => println!("{message}"),
                }
            }
            let _ = tx.send(Command::Quit);
        })
        .context("spawning input reader")?;
    Ok(())
}

struct Dashboard {
    state: AppState,
    runner: EffectRunner,
}

impl Dashboard {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
        }
    }

    /// Returns `false` when the user asked to quit.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Menu(menu) => self.dispatch(Msg::MenuSelected(menu)),
            Command::Tab(tab_ref) => {
                let menu = self.state.selection().menu();
                match tab_ref.resolve(menu) {
                    Some(tab) => self.dispatch(Msg::TabSelected(tab)),
                    None => println!("no such tab in {}", menu.label()),
                }
            }
            Command::Reset => {
                self.dispatch(Msg::SessionReset);
                self.dispatch(Msg::DashboardOpened);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return false,
        }
        true
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.runner.run(effects);

        if state.consume_dirty() && !state.is_closed() {
            let view = state.view();
            let image = match view.render {
                RenderModel::Image(blob) => state.blobs().get(blob).map(|handle| ImageDisplay {
                    blob,
                    byte_len: handle.bytes().len(),
                    path: self.runner.show_image(handle),
                }),
                _ => None,
            };
            print_lines(&render(&view, image.as_ref()));
        }
        self.state = state;
    }
}

fn print_lines(lines: &[String]) {
    let mut out = io::stdout().lock();
    for line in lines {
        if let Err(err) = writeln!(out, "{line}") {
            sumclip_warn!("Failed to write to stdout: {}", err);
            return;
        }
    }
    let _ = out.flush();
}
