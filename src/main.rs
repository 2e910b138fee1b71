use std::io;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::time::Duration;

use crossterm::event;
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;

use k8s_dojo::app::theme::UiTheme;
use k8s_dojo::app::App;
use k8s_dojo::core::InputEvent;
use k8s_dojo::kernel::services::adapters::{
    load_settings, resolve_shell, resolve_state_path, AppMessage, AsyncRuntime, Collaborators,
    JsonCompletionStore, KindProvisioner, KubectlEngine,
};
use k8s_dojo::kernel::services::ports::{supported_versions, ScenarioEngine};
use k8s_dojo::kernel::AppState;
use k8s_dojo::terminal::TerminalSession;
use k8s_dojo::tui::{install_termination_signals, TerminalGuard};

mod logging;

/// Upper bound between redraws, so the header timer keeps ticking.
const REDRAW_INTERVAL: Duration = Duration::from_secs(1);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(250);

fn main() -> io::Result<()> {
    let logging = logging::init();
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_dir = ?logging.as_ref().map(|guard| guard.log_dir().to_path_buf()),
        "k8s-dojo starting"
    );

    let settings = load_settings();
    let shell = resolve_shell(&settings, std::env::var("SHELL").ok());

    let engine = Arc::new(KubectlEngine::new());
    let scenarios = engine.catalog();
    let services = Collaborators {
        provisioner: Arc::new(KindProvisioner::new(settings.cluster_name.clone())),
        engine,
        completions: Arc::new(JsonCompletionStore::new(resolve_state_path(&settings))),
    };

    let (tx, rx) = mpsc::channel();
    let runtime = AsyncRuntime::new(tx.clone(), services)?;

    let mut theme = UiTheme::default();
    theme.adapt_to_terminal_capabilities();

    let output_tx = tx.clone();
    let session = TerminalSession::new(
        shell,
        Arc::new(move || {
            let _ = output_tx.send(AppMessage::TerminalOutput);
        }),
    )
    .with_palette(theme.terminal_palette());

    let state = AppState::new(supported_versions(), scenarios, settings.cluster_name.clone());
    let mut app = App::new(state, session, runtime, settings, theme);

    let guard = TerminalGuard::new()?;
    let signal_tx = tx.clone();
    install_termination_signals(guard.restorer(), move |signal| {
        let _ = signal_tx.send(AppMessage::Terminate {
            exit_code: signal.exit_code(),
        });
    })?;
    spawn_input_thread(tx);

    let (width, height) = crossterm::terminal::size()?;
    app.set_viewport(Rect::new(0, 0, width, height));

    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let result = run(&mut terminal, &mut app, &rx);

    drop(terminal);
    drop(guard);
    app.into_runtime().shutdown_background();
    tracing::info!("k8s-dojo stopped");

    match result? {
        Some(code) => std::process::exit(code),
        None => Ok(()),
    }
}

/// Runs until the store reports teardown finished. Returns the exit code of the
/// termination signal that ended the run, if any.
fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &Receiver<AppMessage>,
) -> io::Result<Option<i32>> {
    let mut exit_code = None;
    terminal.draw(|frame| app.render(frame))?;

    while !app.should_exit() {
        let mut redraw = match rx.recv_timeout(REDRAW_INTERVAL) {
            Ok(msg) => handle(app, msg, &mut exit_code),
            Err(RecvTimeoutError::Timeout) => true,
            Err(RecvTimeoutError::Disconnected) => break,
        };
        while !app.should_exit() {
            match rx.try_recv() {
                Ok(msg) => redraw |= handle(app, msg, &mut exit_code),
                Err(_) => break,
            }
        }

        if redraw && !app.should_exit() {
            terminal.draw(|frame| app.render(frame))?;
        }
    }

    Ok(exit_code)
}

fn handle(app: &mut App, msg: AppMessage, exit_code: &mut Option<i32>) -> bool {
    if let AppMessage::Terminate { exit_code: code } = &msg {
        exit_code.get_or_insert(*code);
    }
    app.handle_message(msg)
}

fn spawn_input_thread(tx: Sender<AppMessage>) {
    std::thread::spawn(move || loop {
        match event::poll(INPUT_POLL_INTERVAL) {
            Ok(true) => match event::read() {
                Ok(event) => {
                    let Some(input) = InputEvent::from_crossterm(event) else {
                        continue;
                    };
                    if tx.send(AppMessage::Input(input)).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    tracing::error!(%error, "reading terminal input failed");
                    break;
                }
            },
            Ok(false) => {}
            Err(error) => {
                tracing::error!(%error, "polling terminal input failed");
                break;
            }
        }
    });
}
