//! The embedded shell: one child process on a pseudo-terminal.
//!
//! The main loop owns the I/O handles (pty master, writer, child, credential file).
//! Only the emulator grid and the running flag are shared with the reader thread,
//! behind one mutex that is never held across a read, a write or a notification.

use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use ratatui::text::{Line, Span};
use ratatui::style::Style;
use tempfile::TempPath;

use super::emulator::{Emulator, DEFAULT_COLS, DEFAULT_ROWS};
use super::palette::{self, TerminalPalette};

/// How long `stop` waits for the reader thread before moving on.
pub const STOP_GRACE: Duration = Duration::from_millis(500);

const READ_BUFFER_SIZE: usize = 4096;
const CREDENTIAL_ENV: &str = "KUBECONFIG";
const BANNER: &str = "Terminal ready. Use kubectl commands below:";
const CLOSED_BANNER: &str = "Terminal closed";

const SHELL_ENV: &[(&str, &str)] = &[
    ("TERM", "xterm-256color"),
    ("PS1", "$ "),
    ("EDITOR", "vim"),
    ("KUBE_EDITOR", "vim -c 'syntax on'"),
    ("VIMINIT", "syntax on"),
];

/// Called whenever the grid may have changed. Must not block.
pub type OutputNotifier = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("failed to write credential file: {0}")]
    Credential(#[from] io::Error),
    #[error("failed to open pty: {0}")]
    Pty(String),
    #[error("failed to spawn {shell}: {reason}")]
    Spawn { shell: String, reason: String },
}

struct Shared {
    emulator: Emulator,
    running: bool,
    /// Bumped on every spawn so a lingering reader never touches a newer session.
    generation: u64,
}

struct PtyHandles {
    master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    child: Box<dyn Child + Send + Sync>,
    reader: JoinHandle<()>,
    reader_done: mpsc::Receiver<()>,
}

pub struct TerminalSession {
    shell: String,
    shared: Arc<Mutex<Shared>>,
    notify: OutputNotifier,
    pty: Option<PtyHandles>,
    credential: Option<TempPath>,
    focused: bool,
    cols: u16,
    rows: u16,
    palette: TerminalPalette,
}

impl TerminalSession {
    pub fn new(shell: impl Into<String>, notify: OutputNotifier) -> Self {
        Self {
            shell: shell.into(),
            shared: Arc::new(Mutex::new(Shared {
                emulator: Emulator::default(),
                running: false,
                generation: 0,
            })),
            notify,
            pty: None,
            credential: None,
            focused: false,
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            palette: TerminalPalette::default(),
        }
    }

    pub fn with_palette(mut self, palette: TerminalPalette) -> Self {
        self.palette = palette;
        self
    }

    pub fn is_running(&self) -> bool {
        self.lock_shared().running
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// `(cols, rows)` of the emulator grid.
    pub fn size(&self) -> (u16, u16) {
        self.lock_shared().emulator.size()
    }

    pub fn process_id(&self) -> Option<u32> {
        self.pty.as_ref().and_then(|pty| pty.child.process_id())
    }

    pub fn credential_path(&self) -> Option<&Path> {
        self.credential.as_deref()
    }

    pub fn contents(&self) -> String {
        self.lock_shared().emulator.contents()
    }

    /// Spawns the shell unless one is already running.
    ///
    /// Failure is not returned: the session stays stopped and the notifier fires once,
    /// so callers must look at [`TerminalSession::is_running`].
    pub fn start(&mut self, credential: Option<&str>) {
        if self.is_running() {
            return;
        }
        if self.pty.is_some() || self.credential.is_some() {
            // The previous shell exited on its own; reclaim what it left behind.
            self.stop();
        }

        match self.spawn(credential) {
            Ok(pid) => {
                tracing::info!(shell = %self.shell, pid = ?pid, "terminal started");
            }
            Err(err) => {
                tracing::warn!(shell = %self.shell, error = %err, "terminal start failed");
                self.lock_shared().running = false;
                self.discard_credential();
                (self.notify)();
            }
        }
    }

    fn spawn(&mut self, credential: Option<&str>) -> Result<Option<u32>, SessionError> {
        let mut cmd = CommandBuilder::new(&self.shell);
        for (key, value) in SHELL_ENV {
            cmd.env(key, value);
        }
        if let Some(blob) = credential {
            let path = write_credential(blob)?;
            cmd.env(CREDENTIAL_ENV, path.as_os_str());
            self.credential = Some(path);
        }

        let pair = native_pty_system()
            .openpty(PtySize {
                rows: self.rows,
                cols: self.cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .map_err(|err| SessionError::Pty(err.to_string()))?;

        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|err| SessionError::Spawn {
                shell: self.shell.clone(),
                reason: err.to_string(),
            })?;
        // The reader only sees end-of-stream once the child holds the last slave handle.
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|err| SessionError::Pty(err.to_string()));
        let writer = pair
            .master
            .take_writer()
            .map_err(|err| SessionError::Pty(err.to_string()));
        let (reader, writer) = match (reader, writer) {
            (Ok(reader), Ok(writer)) => (reader, writer),
            (Err(err), _) | (_, Err(err)) => {
                terminate(child);
                return Err(err);
            }
        };

        let generation = {
            let mut shared = self.lock_shared();
            shared.generation = shared.generation.wrapping_add(1);
            shared.emulator.resize(self.cols, self.rows);
            shared.emulator.write_line(BANNER);
            shared.running = true;
            shared.generation
        };

        let (done_tx, reader_done) = mpsc::channel();
        let shared = Arc::clone(&self.shared);
        let notify = Arc::clone(&self.notify);
        let reader = thread::spawn(move || {
            read_loop(reader, shared, generation, notify);
            let _ = done_tx.send(());
        });

        let pid = child.process_id();
        self.pty = Some(PtyHandles {
            master: pair.master,
            writer,
            child,
            reader,
            reader_done,
        });
        (self.notify)();
        Ok(pid)
    }

    /// Applies a new size to the pty and the grid. The size is remembered for the next start.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        if !self.is_running() {
            return;
        }

        if let Some(pty) = &self.pty {
            if let Err(err) = pty.master.resize(PtySize {
                rows: self.rows,
                cols: self.cols,
                pixel_width: 0,
                pixel_height: 0,
            }) {
                tracing::debug!(error = %err, "pty resize failed");
            }
        }
        self.lock_shared().emulator.resize(self.cols, self.rows);
    }

    pub fn write(&mut self, bytes: &[u8]) {
        if bytes.is_empty() || !self.focused || !self.is_running() {
            return;
        }
        let Some(pty) = self.pty.as_mut() else {
            return;
        };
        if let Err(err) = pty.writer.write_all(bytes).and_then(|_| pty.writer.flush()) {
            tracing::debug!(error = %err, "pty write failed");
        }
    }

    /// Tears the session down. Safe to call any number of times.
    pub fn stop(&mut self) {
        let was_running = {
            let mut shared = self.lock_shared();
            std::mem::replace(&mut shared.running, false)
        };

        if let Some(pty) = self.pty.take() {
            let PtyHandles {
                master,
                writer,
                child,
                reader,
                reader_done,
            } = pty;
            drop(writer);
            drop(master);

            match reader_done.recv_timeout(STOP_GRACE) {
                Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                    let _ = reader.join();
                }
                Err(RecvTimeoutError::Timeout) => {
                    tracing::debug!("pty reader still blocked after grace period");
                }
            }
            terminate(child);
        }

        self.discard_credential();
        self.lock_shared().emulator = Emulator::default();

        if was_running {
            tracing::info!("terminal stopped");
        }
    }

    pub fn render(&self) -> Vec<Line<'static>> {
        let shared = self.lock_shared();
        let emulator = &shared.emulator;
        let (cols, rows) = emulator.size();
        let (cursor_x, cursor_y) = emulator.cursor();

        let mut lines = Vec::with_capacity(rows as usize);
        for y in 0..rows {
            let mut spans: Vec<Span<'static>> = Vec::new();
            let mut run = String::new();
            let mut run_style: Option<Style> = None;

            for x in 0..cols {
                let cell = emulator.cell(x, y);
                if cell.text.is_empty() {
                    continue;
                }
                let at_cursor = x == cursor_x && y == cursor_y;
                let style =
                    palette::resolve(cell.fg, cell.bg, at_cursor, self.focused, &self.palette)
                        .style();

                if run_style != Some(style) {
                    if let Some(prev) = run_style {
                        spans.push(Span::styled(std::mem::take(&mut run), prev));
                    }
                    run_style = Some(style);
                }
                run.push_str(&cell.text);
            }
            if let Some(style) = run_style {
                spans.push(Span::styled(run, style));
            }
            lines.push(Line::from(spans));
        }
        lines
    }

    fn discard_credential(&mut self) {
        if let Some(path) = self.credential.take() {
            if let Err(err) = path.close() {
                tracing::warn!(error = %err, "failed to remove credential file");
            }
        }
    }

    fn lock_shared(&self) -> MutexGuard<'_, Shared> {
        self.shared.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.stop();
    }
}

fn read_loop(
    mut reader: Box<dyn Read + Send>,
    shared: Arc<Mutex<Shared>>,
    generation: u64,
    notify: OutputNotifier,
) {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                let live = {
                    let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                    let live = state.running && state.generation == generation;
                    if live {
                        state.emulator.process(&buf[..n]);
                    }
                    live
                };
                if !live {
                    break;
                }
                notify();
            }
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::debug!(error = %err, "pty read ended");
                break;
            }
        }
    }

    {
        let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
        if state.running && state.generation == generation {
            state.running = false;
            state.emulator.write_line("");
            state.emulator.write_line(CLOSED_BANNER);
        }
    }
    notify();
}

fn write_credential(blob: &str) -> io::Result<TempPath> {
    let mut file = tempfile::Builder::new()
        .prefix("k8s-dojo-")
        .suffix(".kubeconfig")
        .tempfile()?;
    file.write_all(blob.as_bytes())?;
    file.flush()?;
    Ok(file.into_temp_path())
}

fn terminate(mut child: Box<dyn Child + Send + Sync>) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.process_id() {
            // Interactive shells ignore SIGTERM; SIGHUP is what a closed terminal delivers.
            // SAFETY: plain kill(2) on a pid we spawned and have not reaped yet.
            unsafe {
                libc::kill(pid as libc::pid_t, libc::SIGTERM);
                libc::kill(pid as libc::pid_t, libc::SIGHUP);
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = child.kill();
    }

    match child.try_wait() {
        Ok(Some(_)) => {}
        _ => {
            thread::spawn(move || {
                let _ = child.wait();
            });
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/terminal/session.rs"]
mod tests;
