//! Application shell: routes messages into the store, carries out its effects and draws the result.

pub mod layout;
mod render;
pub mod theme;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::Frame;

use crate::core::event::{InputEvent, Key};
use crate::core::Command;
use crate::kernel::services::adapters::{
    AppMessage, AsyncRuntime, KeybindingContext, KeybindingService,
};
use crate::kernel::services::ports::Settings;
use crate::kernel::{Action, AppState, Effect, Store, View};
use crate::terminal::{bracketed_paste, bytes_for_key_event, TerminalSession};

use self::layout::DojoLayout;
use self::theme::UiTheme;

pub struct App {
    store: Store,
    session: TerminalSession,
    runtime: AsyncRuntime,
    keybindings: KeybindingService,
    theme: UiTheme,
    settings: Settings,
    viewport: Rect,
}

impl App {
    pub fn new(
        state: AppState,
        session: TerminalSession,
        runtime: AsyncRuntime,
        settings: Settings,
        theme: UiTheme,
    ) -> Self {
        Self {
            store: Store::new(state),
            session,
            runtime,
            keybindings: KeybindingService::new(),
            theme,
            settings,
            viewport: Rect::default(),
        }
    }

    pub fn state(&self) -> &AppState {
        self.store.state()
    }

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn should_exit(&self) -> bool {
        self.store.state().should_exit
    }

    /// Hands the runtime back so the caller can stop it without waiting on blocking work.
    pub fn into_runtime(self) -> AsyncRuntime {
        let Self {
            runtime,
            mut session,
            ..
        } = self;
        session.stop();
        runtime
    }

    /// Records the screen size and resizes the shell grid to fit its panel.
    pub fn set_viewport(&mut self, area: Rect) {
        self.viewport = area;
        self.sync_terminal_size();
    }

    /// Processes one queued message. Returns whether the screen needs a redraw.
    pub fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Input(event) => self.handle_input(event),
            AppMessage::TerminalOutput => true,
            AppMessage::Action(action) => self.dispatch(action),
            AppMessage::Terminate { exit_code } => {
                tracing::info!(exit_code, "terminating");
                self.dispatch(Action::Terminate)
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        render::render(self, frame);
    }

    fn handle_input(&mut self, event: InputEvent) -> bool {
        if let Some(&key) = event.as_key_press() {
            return self.handle_key(key);
        }
        match event {
            InputEvent::Key(_) => false,
            InputEvent::Paste(text) => {
                if self.store.state().terminal_has_focus() {
                    self.session.write(&bracketed_paste(&text));
                }
                false
            }
            InputEvent::Resize(width, height) => {
                self.set_viewport(Rect::new(0, 0, width, height));
                true
            }
            InputEvent::FocusGained | InputEvent::FocusLost => false,
        }
    }

    fn handle_key(&mut self, event: KeyEvent) -> bool {
        if self.store.state().terminal_has_focus() {
            if event.code == KeyCode::Tab {
                return self.dispatch(Action::RunCommand(Command::FocusNext));
            }
            if let Some(bytes) = bytes_for_key_event(&event) {
                self.session.write(&bytes);
            }
            return false;
        }

        let key = Key::from(event);
        match self.keybindings.resolve(self.keybinding_context(), &key) {
            Some(command) => self.dispatch(Action::RunCommand(command)),
            None => false,
        }
    }

    fn keybinding_context(&self) -> KeybindingContext {
        match self.store.state().view {
            View::VersionSelect { .. } | View::Dashboard => KeybindingContext::Navigation,
            View::Bootstrap { .. } => KeybindingContext::Global,
            View::ScenarioRunning(_) => KeybindingContext::Scenario,
            View::Success(_) => KeybindingContext::Success,
            View::ConfirmRestart { .. } | View::ConfirmQuit { .. } => KeybindingContext::Dialog,
        }
    }

    fn dispatch(&mut self, action: Action) -> bool {
        let result = self.store.dispatch(action);
        for effect in result.effects {
            self.execute(effect);
        }
        let focused = self.store.state().terminal_has_focus();
        if self.session.is_focused() != focused {
            self.session.set_focused(focused);
            return true;
        }
        result.state_changed
    }

    fn execute(&mut self, effect: Effect) {
        tracing::debug!(?effect, "effect");
        match effect {
            Effect::Provision { epoch, version } => self.runtime.provision(epoch, version),
            Effect::ScheduleBootstrapTick { epoch } => self
                .runtime
                .schedule(self.settings.progress_tick(), Action::BootstrapTick { epoch }),
            Effect::ScheduleSettle { epoch } => self
                .runtime
                .schedule(self.settings.settle_delay(), Action::BootstrapSettled { epoch }),
            Effect::LoadCompletions => self.runtime.load_completions(),
            Effect::StartScenario { run, scenario_id } => {
                self.runtime.start_scenario(run, scenario_id)
            }
            Effect::StartTerminal { credential } => {
                self.sync_terminal_size();
                self.session.start(credential.as_deref());
            }
            Effect::StopTerminal => self.session.stop(),
            Effect::ScheduleCheck { run, token } => self
                .runtime
                .schedule(self.settings.check_interval(), Action::CheckTick { run, token }),
            Effect::RunCheck { run, origin } => self.runtime.run_check(run, origin),
            Effect::MarkCompleted(scenario_id) => self.runtime.mark_completed(scenario_id),
            Effect::CleanupScenario => self.runtime.cleanup_scenario(),
            Effect::Shutdown => {
                self.session.stop();
                self.runtime.shutdown();
            }
        }
    }

    fn sync_terminal_size(&mut self) {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return;
        }
        let panel = DojoLayout::compute(self.viewport).terminal;
        let (cols, rows) = layout::terminal_grid_size(panel);
        if self.session.size() != (cols, rows) {
            self.session.resize(cols, rows);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/app/app.rs"]
mod tests;
