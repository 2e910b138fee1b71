use super::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;

const SHELL: &str = "/bin/sh";

fn counting_notifier() -> (OutputNotifier, Arc<AtomicUsize>) {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    let notify: OutputNotifier = Arc::new(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    (notify, count)
}

fn session() -> TerminalSession {
    let (notify, _) = counting_notifier();
    TerminalSession::new(SHELL, notify)
}

fn wait_until(timeout: Duration, mut cond: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(20));
    }
    cond()
}

#[test]
fn start_writes_banner_and_marks_running() {
    let mut session = session();
    session.start(None);
    assert!(session.is_running());
    assert!(session.contents().starts_with(BANNER));
    session.stop();
}

#[test]
fn start_twice_spawns_only_once() {
    let mut session = session();
    session.start(None);
    let first = session.process_id();
    assert!(first.is_some());

    session.start(None);
    assert_eq!(session.process_id(), first);
    session.stop();
}

#[test]
fn write_after_stop_is_a_noop() {
    let mut session = session();
    session.set_focused(true);
    session.start(None);
    session.stop();

    session.write(b"echo late\r");
    assert!(!session.is_running());
    assert!(!session.contents().contains("late"));
}

#[test]
fn stop_is_idempotent_and_removes_credential() {
    let mut session = session();
    session.start(Some("apiVersion: v1\nkind: Config\n"));

    let path = session
        .credential_path()
        .map(Path::to_path_buf)
        .expect("credential path");
    assert!(path.exists());
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("k8s-dojo-"));
    assert!(name.ends_with(".kubeconfig"));
    assert_eq!(
        std::fs::read_to_string(&path).unwrap(),
        "apiVersion: v1\nkind: Config\n"
    );

    session.stop();
    assert!(!path.exists());
    assert!(session.credential_path().is_none());

    session.stop();
    assert!(!session.is_running());
    assert_eq!(session.size(), (DEFAULT_COLS, DEFAULT_ROWS));
}

#[test]
fn stop_returns_promptly_once_the_pty_closes() {
    let mut session = session();
    session.start(Some("cred"));
    let path = session.credential_path().map(Path::to_path_buf).unwrap();

    let started = Instant::now();
    session.stop();
    assert!(started.elapsed() < STOP_GRACE);
    assert!(!session.is_running());
    assert!(!path.exists());
}

/// A notifier that parks the reader thread inside its first notification until released.
struct StuckReader {
    entered: Arc<AtomicBool>,
    release: Arc<(Mutex<bool>, std::sync::Condvar)>,
}

impl StuckReader {
    fn notifier(&self) -> OutputNotifier {
        let owner = thread::current().id();
        let entered = Arc::clone(&self.entered);
        let release = Arc::clone(&self.release);
        Arc::new(move || {
            if thread::current().id() == owner {
                return;
            }
            entered.store(true, Ordering::SeqCst);
            let (lock, cvar) = &*release;
            let mut released = lock.lock().unwrap();
            while !*released {
                released = cvar.wait(released).unwrap();
            }
        })
    }

    fn release(&self) {
        let (lock, cvar) = &*self.release;
        *lock.lock().unwrap() = true;
        cvar.notify_all();
    }
}

#[test]
fn stop_gives_up_on_a_stuck_reader_after_the_grace_period() {
    let stuck = StuckReader {
        entered: Arc::new(AtomicBool::new(false)),
        release: Arc::new((Mutex::new(false), std::sync::Condvar::new())),
    };
    let mut session = TerminalSession::new(SHELL, stuck.notifier());
    session.set_focused(true);
    session.start(Some("cred"));
    let path = session.credential_path().map(Path::to_path_buf).unwrap();
    session.write(b"echo ready\r");
    assert!(wait_until(Duration::from_secs(3), || stuck
        .entered
        .load(Ordering::SeqCst)));

    let started = Instant::now();
    session.stop();
    let elapsed = started.elapsed();
    assert!(elapsed >= STOP_GRACE, "stop returned after {elapsed:?}");
    assert!(elapsed < STOP_GRACE + Duration::from_secs(1));
    assert!(!session.is_running());
    assert!(!path.exists());
    assert_eq!(session.size(), (DEFAULT_COLS, DEFAULT_ROWS));

    // The abandoned reader must not touch the next session once it wakes up.
    stuck.release();
    session.start(None);
    assert!(session.is_running());
    thread::sleep(Duration::from_millis(100));
    assert!(session.is_running());
    assert!(session.contents().starts_with(BANNER));
    session.stop();
}

#[test]
fn spawn_failure_leaves_session_stopped_and_notifies() {
    let (notify, count) = counting_notifier();
    let mut session = TerminalSession::new("/nonexistent/k8s-dojo-shell", notify);

    session.start(Some("cred"));
    assert!(!session.is_running());
    assert!(session.credential_path().is_none());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn shell_output_reaches_the_grid() {
    let (notify, count) = counting_notifier();
    let mut session = TerminalSession::new(SHELL, notify);
    session.set_focused(true);
    session.start(None);

    session.write(b"echo dojo-$((40+2))\r");
    assert!(wait_until(Duration::from_secs(3), || session
        .contents()
        .contains("dojo-42")));
    assert!(count.load(Ordering::SeqCst) >= 2);
    session.stop();
}

#[test]
fn unfocused_write_is_ignored() {
    let mut session = session();
    session.start(None);
    session.write(b"echo unfocused-$((1+1))\r");

    thread::sleep(Duration::from_millis(300));
    assert!(!session.contents().contains("unfocused-2"));
    session.stop();
}

#[test]
fn shell_exit_marks_session_closed() {
    let mut session = session();
    session.set_focused(true);
    session.start(None);
    session.write(b"exit\r");

    assert!(wait_until(Duration::from_secs(3), || !session.is_running()));
    assert!(session.contents().contains(CLOSED_BANNER));

    session.start(None);
    assert!(session.is_running());
    session.stop();
}

#[test]
fn resize_while_idle_is_applied_on_next_start() {
    let mut session = session();
    session.resize(100, 30);
    assert_eq!(session.size(), (DEFAULT_COLS, DEFAULT_ROWS));

    session.start(None);
    assert_eq!(session.size(), (100, 30));

    session.resize(60, 10);
    assert_eq!(session.size(), (60, 10));
    session.stop();
}

#[test]
fn render_produces_one_line_per_row_and_reverses_focused_cursor() {
    let mut session = session();
    session.start(None);
    session.set_focused(true);

    let lines = session.render();
    assert_eq!(lines.len(), DEFAULT_ROWS as usize);
    let reversed = lines.iter().flat_map(|line| line.spans.iter()).any(|span| {
        span.style
            .add_modifier
            .contains(ratatui::style::Modifier::REVERSED)
    });
    assert!(reversed);

    session.set_focused(false);
    let reversed = session
        .render()
        .iter()
        .flat_map(|line| line.spans.iter())
        .any(|span| {
            span.style
                .add_modifier
                .contains(ratatui::style::Modifier::REVERSED)
        });
    assert!(!reversed);
    session.stop();
}
