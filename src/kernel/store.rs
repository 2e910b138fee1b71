use crate::core::Command;
use crate::kernel::services::ports::CheckOutcome;

use super::bootstrap::{BootstrapSync, RealDoneOutcome, TickOutcome};
use super::state::{
    ConfirmChoice, FocusArea, RunningScenario, StatusLine, SuccessButton, SuccessState, View,
};
use super::{Action, AppState, CheckOrigin, Effect};

pub struct DispatchResult {
    pub effects: Vec<Effect>,
    pub state_changed: bool,
}

impl DispatchResult {
    fn unchanged() -> Self {
        Self {
            effects: Vec::new(),
            state_changed: false,
        }
    }

    fn changed(state_changed: bool) -> Self {
        Self {
            effects: Vec::new(),
            state_changed,
        }
    }

    fn effects(effects: Vec<Effect>) -> Self {
        Self {
            effects,
            state_changed: true,
        }
    }
}

/// Owns all view and focus state. Every input, timer and async result goes through `dispatch`,
/// one at a time, so nothing here is shared or locked.
pub struct Store {
    state: AppState,
}

impl Store {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn dispatch(&mut self, action: Action) -> DispatchResult {
        match action {
            Action::RunCommand(cmd) => self.dispatch_command(cmd),
            Action::ProvisionFinished { epoch, result } => self.on_provision_finished(epoch, result),
            Action::BootstrapTick { epoch } => self.on_bootstrap_tick(epoch),
            Action::BootstrapSettled { epoch } => self.on_bootstrap_settled(epoch),
            Action::CompletionsLoaded(result) => {
                match result {
                    Ok(ids) => self.state.completed = ids.into_iter().collect(),
                    Err(error) => tracing::warn!(%error, "failed to load completion state"),
                }
                self.rebuild_catalog();
                DispatchResult::changed(true)
            }
            Action::ScenarioStarted { run, result } => self.on_scenario_started(run, result),
            Action::CheckTick { run, token } => self.on_check_tick(run, token),
            Action::CheckFinished {
                run,
                origin,
                result,
            } => self.on_check_finished(run, origin, result),
            Action::Terminate => {
                if self.state.quitting {
                    DispatchResult::unchanged()
                } else {
                    self.begin_shutdown()
                }
            }
            Action::ShutdownComplete => {
                self.state.should_exit = true;
                DispatchResult::changed(true)
            }
        }
    }

    fn dispatch_command(&mut self, cmd: Command) -> DispatchResult {
        if self.state.quitting {
            return DispatchResult::unchanged();
        }

        // Global commands are intercepted first, except while the shell has focus so that
        // ctrl+c reaches it.
        if cmd == Command::Quit && !self.state.terminal_has_focus() {
            match &self.state.view {
                View::Bootstrap { .. } => return self.begin_shutdown(),
                view if view.is_modal() => {}
                _ => {
                    self.enter_modal(View::ConfirmQuit {
                        selection: ConfirmChoice::No,
                    });
                    return DispatchResult::changed(true);
                }
            }
        }
        if cmd == Command::FocusNext {
            if let View::ScenarioRunning(_) = self.state.view {
                self.state.focus = self.state.focus.next();
                return DispatchResult::changed(true);
            }
        }

        match &self.state.view {
            View::VersionSelect { .. } => self.version_select_command(cmd),
            View::Bootstrap { .. } => DispatchResult::unchanged(),
            View::Dashboard => self.dashboard_command(cmd),
            View::ScenarioRunning(_) => self.running_command(cmd),
            View::Success(_) => self.success_command(cmd),
            View::ConfirmRestart { .. } => self.confirm_restart_command(cmd),
            View::ConfirmQuit { .. } => self.confirm_quit_command(cmd),
        }
    }

    fn version_select_command(&mut self, cmd: Command) -> DispatchResult {
        let count = self.state.versions.len();
        let View::VersionSelect { selected } = &mut self.state.view else {
            return DispatchResult::unchanged();
        };
        match cmd {
            Command::Up => {
                let prev = *selected;
                *selected = selected.saturating_sub(1);
                DispatchResult::changed(prev != *selected)
            }
            Command::Down => {
                let prev = *selected;
                *selected = (*selected + 1).min(count.saturating_sub(1));
                DispatchResult::changed(prev != *selected)
            }
            Command::Select => {
                let index = *selected;
                self.begin_bootstrap(index)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn begin_bootstrap(&mut self, index: usize) -> DispatchResult {
        let Some(version) = self.state.versions.get(index).cloned() else {
            return DispatchResult::unchanged();
        };
        self.state.epoch += 1;
        let epoch = self.state.epoch;
        tracing::info!(version = %version.version, epoch, "bootstrap started");

        self.state.view = View::Bootstrap {
            epoch,
            version: version.version.clone(),
            sync: BootstrapSync::new(&version.version),
        };
        DispatchResult::effects(vec![
            Effect::Provision { epoch, version },
            Effect::ScheduleBootstrapTick { epoch },
        ])
    }

    fn on_bootstrap_tick(&mut self, epoch: u64) -> DispatchResult {
        let View::Bootstrap {
            epoch: current,
            sync,
            ..
        } = &mut self.state.view
        else {
            return DispatchResult::unchanged();
        };
        if *current != epoch {
            return DispatchResult::unchanged();
        }

        let effects = match sync.tick() {
            TickOutcome::Continue => vec![Effect::ScheduleBootstrapTick { epoch }],
            TickOutcome::Settle => vec![Effect::ScheduleSettle { epoch }],
            TickOutcome::Parked | TickOutcome::Halted => Vec::new(),
        };
        DispatchResult::effects(effects)
    }

    fn on_provision_finished(
        &mut self,
        epoch: u64,
        result: Result<String, String>,
    ) -> DispatchResult {
        let View::Bootstrap {
            epoch: current,
            version,
            sync,
        } = &mut self.state.view
        else {
            return DispatchResult::unchanged();
        };
        if *current != epoch {
            return DispatchResult::unchanged();
        }

        match result {
            Ok(credential) => {
                let outcome = sync.on_real_done(Ok(()));
                if outcome == RealDoneOutcome::Failed {
                    return DispatchResult::unchanged();
                }
                tracing::info!(version = %version, "cluster ready");
                self.state.cluster_version = Some(version.clone());
                self.state.credential = Some(credential);

                let mut effects = vec![Effect::LoadCompletions];
                if outcome == RealDoneOutcome::Settle {
                    effects.push(Effect::ScheduleSettle { epoch });
                }
                DispatchResult::effects(effects)
            }
            Err(error) => {
                tracing::error!(%error, "cluster provisioning failed");
                sync.on_real_done(Err(error));
                DispatchResult::changed(true)
            }
        }
    }

    fn on_bootstrap_settled(&mut self, epoch: u64) -> DispatchResult {
        match &self.state.view {
            View::Bootstrap {
                epoch: current,
                sync,
                ..
            } if *current == epoch && sync.finish_ready() => {
                self.state.view = View::Dashboard;
                self.state.focus = FocusArea::Sidebar;
                DispatchResult::changed(true)
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn dashboard_command(&mut self, cmd: Command) -> DispatchResult {
        if cmd != Command::Select {
            return self.catalog_command(cmd);
        }

        let Some(entry) = self.state.catalog.selected_entry() else {
            return DispatchResult::changed(self.state.catalog.toggle());
        };
        let scenario_id = entry.id.clone();
        if self.state.completed.contains(&scenario_id) {
            self.enter_modal(View::ConfirmRestart {
                scenario_id,
                selection: ConfirmChoice::No,
            });
            return DispatchResult::changed(true);
        }
        self.start_scenario(scenario_id)
    }

    /// Sidebar navigation. `Select` only folds categories here.
    fn catalog_command(&mut self, cmd: Command) -> DispatchResult {
        let catalog = &mut self.state.catalog;
        let changed = match cmd {
            Command::Up => catalog.move_up(),
            Command::Down => catalog.move_down(),
            Command::Left => catalog.collapse(),
            Command::Right => catalog.expand(),
            Command::Top => catalog.move_top(),
            Command::Bottom => catalog.move_bottom(),
            Command::Select => catalog.toggle(),
            _ => false,
        };
        DispatchResult::changed(changed)
    }

    /// Enters a fresh run. The check timer waits for the engine's start result.
    fn start_scenario(&mut self, scenario_id: String) -> DispatchResult {
        self.state.run += 1;
        let run = self.state.run;
        tracing::info!(scenario = %scenario_id, run, "scenario starting");

        self.state.previous = None;
        self.state.view = View::ScenarioRunning(RunningScenario::new(scenario_id.clone(), run));
        self.state.focus = FocusArea::Terminal;
        DispatchResult::effects(vec![
            Effect::StartScenario { run, scenario_id },
            Effect::StartTerminal {
                credential: self.state.credential.clone(),
            },
        ])
    }

    fn running_command(&mut self, cmd: Command) -> DispatchResult {
        if self.state.focus == FocusArea::Terminal {
            return DispatchResult::unchanged();
        }
        let focus = self.state.focus;
        let hint_count = match &self.state.view {
            View::ScenarioRunning(running) => self
                .state
                .scenario(&running.scenario_id)
                .map_or(0, |s| s.hints.len()),
            _ => return DispatchResult::unchanged(),
        };
        let View::ScenarioRunning(running) = &mut self.state.view else {
            return DispatchResult::unchanged();
        };

        match cmd {
            Command::Check => DispatchResult::effects(vec![Effect::RunCheck {
                run: running.run,
                origin: CheckOrigin::Manual,
            }]),
            Command::ToggleHints => {
                running.hints_visible = !running.hints_visible;
                DispatchResult::changed(true)
            }
            Command::NextHint if hint_count > 0 => {
                running.hint_index = (running.hint_index + 1) % hint_count;
                DispatchResult::changed(true)
            }
            Command::PrevHint if hint_count > 0 => {
                running.hint_index = (running.hint_index + hint_count - 1) % hint_count;
                DispatchResult::changed(true)
            }
            Command::Back => self.leave_scenario(),
            cmd if focus == FocusArea::Sidebar && cmd.is_navigation() => self.catalog_command(cmd),
            _ => DispatchResult::unchanged(),
        }
    }

    fn leave_scenario(&mut self) -> DispatchResult {
        tracing::info!("scenario abandoned");
        self.state.view = View::Dashboard;
        self.state.focus = FocusArea::Sidebar;
        DispatchResult::effects(vec![Effect::CleanupScenario, Effect::StopTerminal])
    }

    fn on_scenario_started(&mut self, run: u64, result: Result<(), String>) -> DispatchResult {
        let Some(running) = self.state.running_mut(run) else {
            return DispatchResult::unchanged();
        };
        match result {
            Ok(()) => {
                running.setup_done = true;
                running.status = Some(StatusLine::pending(
                    "Scenario started. Use kubectl in the terminal below to investigate!",
                ));
            }
            Err(error) => {
                tracing::warn!(%error, run, "scenario start failed");
                running.status = Some(StatusLine::pending(format!(
                    "Failed to start scenario: {error}"
                )));
                return DispatchResult::changed(true);
            }
        }
        DispatchResult::effects(self.arm_check().into_iter().collect())
    }

    /// Arms a new check timer for the on-screen run, superseding any older one.
    fn arm_check(&mut self) -> Option<Effect> {
        let View::ScenarioRunning(running) = &mut self.state.view else {
            return None;
        };
        self.state.next_check_token += 1;
        running.check_token = self.state.next_check_token;
        Some(Effect::ScheduleCheck {
            run: running.run,
            token: running.check_token,
        })
    }

    fn on_check_tick(&mut self, run: u64, token: u64) -> DispatchResult {
        match &mut self.state.view {
            View::ScenarioRunning(running)
                if running.run == run && token != 0 && running.check_token == token =>
            {
                running.check_token = 0;
                DispatchResult {
                    effects: vec![Effect::RunCheck {
                        run,
                        origin: CheckOrigin::Timer,
                    }],
                    state_changed: false,
                }
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn on_check_finished(
        &mut self,
        run: u64,
        origin: CheckOrigin,
        result: Result<CheckOutcome, String>,
    ) -> DispatchResult {
        let on_screen = matches!(&self.state.view, View::ScenarioRunning(r) if r.run == run);
        let Some(running) = self.state.running_mut(run) else {
            return DispatchResult::unchanged();
        };

        match result {
            Ok(outcome) => {
                running.status = Some(StatusLine {
                    text: outcome.message.clone(),
                    ok: outcome.solved,
                });
                if outcome.solved && on_screen {
                    return self.complete_scenario(outcome.message);
                }
            }
            Err(error) => {
                tracing::debug!(%error, run, "check failed");
                running.status = Some(StatusLine::pending(error));
            }
        }

        let mut effects = Vec::new();
        if origin == CheckOrigin::Timer && on_screen {
            effects.extend(self.arm_check());
        }
        DispatchResult::effects(effects)
    }

    fn complete_scenario(&mut self, message: String) -> DispatchResult {
        let View::ScenarioRunning(running) = &self.state.view else {
            return DispatchResult::unchanged();
        };
        let scenario_id = running.scenario_id.clone();
        let elapsed = running.elapsed();
        tracing::info!(scenario = %scenario_id, elapsed_ms = elapsed.as_millis() as u64, "scenario solved");

        self.state.completed.insert(scenario_id.clone());
        self.rebuild_catalog();
        self.state.view = View::Success(SuccessState {
            scenario_id: scenario_id.clone(),
            message,
            elapsed,
            button: SuccessButton::Continue,
        });
        DispatchResult::effects(vec![Effect::MarkCompleted(scenario_id)])
    }

    fn success_command(&mut self, cmd: Command) -> DispatchResult {
        let View::Success(success) = &mut self.state.view else {
            return DispatchResult::unchanged();
        };
        match cmd {
            Command::PrevButton | Command::NextButton => {
                success.button = success.button.toggle();
                DispatchResult::changed(true)
            }
            Command::Select => match success.button {
                SuccessButton::Continue => self.return_to_dashboard(),
                SuccessButton::Retry => self.retry(),
            },
            Command::ReturnMenu => self.return_to_dashboard(),
            Command::Retry => self.retry(),
            _ => DispatchResult::unchanged(),
        }
    }

    fn return_to_dashboard(&mut self) -> DispatchResult {
        let View::Success(success) = &self.state.view else {
            return DispatchResult::unchanged();
        };
        let scenario_id = success.scenario_id.clone();

        self.state.completed.insert(scenario_id.clone());
        self.rebuild_catalog();
        self.state.view = View::Dashboard;
        self.state.focus = FocusArea::Sidebar;
        DispatchResult::effects(vec![
            Effect::MarkCompleted(scenario_id),
            Effect::CleanupScenario,
            Effect::StopTerminal,
        ])
    }

    /// Restarts the same scenario with the check timer armed right away.
    fn retry(&mut self) -> DispatchResult {
        let View::Success(success) = &self.state.view else {
            return DispatchResult::unchanged();
        };
        let scenario_id = success.scenario_id.clone();
        let mut result = self.start_scenario(scenario_id);
        result.effects.extend(self.arm_check());
        result
    }

    fn confirm_restart_command(&mut self, cmd: Command) -> DispatchResult {
        let View::ConfirmRestart {
            scenario_id,
            selection,
        } = &mut self.state.view
        else {
            return DispatchResult::unchanged();
        };
        match cmd {
            Command::PrevButton | Command::NextButton => {
                *selection = selection.toggle();
                DispatchResult::changed(true)
            }
            Command::Select if *selection == ConfirmChoice::Yes => {
                let id = scenario_id.clone();
                self.start_scenario(id)
            }
            Command::Confirm => {
                let id = scenario_id.clone();
                self.start_scenario(id)
            }
            Command::Select | Command::Cancel | Command::Back | Command::Quit => {
                self.restore_previous()
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn confirm_quit_command(&mut self, cmd: Command) -> DispatchResult {
        let View::ConfirmQuit { selection } = &mut self.state.view else {
            return DispatchResult::unchanged();
        };
        match cmd {
            Command::PrevButton | Command::NextButton => {
                *selection = selection.toggle();
                DispatchResult::changed(true)
            }
            Command::Select if *selection == ConfirmChoice::Yes => self.begin_shutdown(),
            Command::Confirm => self.begin_shutdown(),
            Command::Select | Command::Cancel | Command::Back | Command::Quit => {
                self.restore_previous()
            }
            _ => DispatchResult::unchanged(),
        }
    }

    fn enter_modal(&mut self, modal: View) {
        let interrupted = std::mem::replace(&mut self.state.view, modal);
        self.state.previous = Some(Box::new(interrupted));
    }

    /// Puts back exactly the view the modal interrupted.
    fn restore_previous(&mut self) -> DispatchResult {
        self.state.view = self
            .state
            .previous
            .take()
            .map_or(View::Dashboard, |view| *view);

        // Timer ticks that fired behind the modal were dropped.
        let rearm = matches!(&self.state.view, View::ScenarioRunning(r) if r.setup_done);
        let effects = if rearm {
            self.arm_check().into_iter().collect()
        } else {
            Vec::new()
        };
        DispatchResult::effects(effects)
    }

    fn begin_shutdown(&mut self) -> DispatchResult {
        tracing::info!(view = self.state.view.name(), "shutting down");
        self.state.quitting = true;
        DispatchResult::effects(vec![Effect::Shutdown])
    }

    fn rebuild_catalog(&mut self) {
        let AppState {
            catalog,
            scenarios,
            completed,
            ..
        } = &mut self.state;
        catalog.rebuild(scenarios, completed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/store.rs"]
mod tests;
