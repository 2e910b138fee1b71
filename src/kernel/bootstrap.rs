//! Bootstrap progress: a forward-only step animation reconciled with the real provisioning result.
//!
//! Two tracks run independently. The animation is driven by `tick`, the provisioning result
//! arrives through `on_real_done`. The real track may finish the animation once it has parked,
//! never the other way around, and the percentage only moves forward.

pub const DEFAULT_TITLE: &str = "Preparing Training Environment";
pub const FINALIZING_SUBTITLE: &str = "Finalizing cluster setup...";
pub const READY_SUBTITLE: &str = "Cluster ready!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: String,
    pub complete: bool,
    pub active: bool,
}

impl ProgressStep {
    pub fn pending(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            complete: false,
            active: false,
        }
    }

    pub fn done(label: impl Into<String>) -> Self {
        Self {
            complete: true,
            ..Self::pending(label)
        }
    }
}

/// What the caller should schedule after a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Schedule the next animation tick.
    Continue,
    /// Schedule the settle delay; the view may leave once it elapses.
    Settle,
    /// Nothing to schedule; the animation is parked until the real task finishes.
    Parked,
    /// Provisioning failed; nothing is ever scheduled again.
    Halted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealDoneOutcome {
    /// The animation had already parked; schedule the settle delay.
    Settle,
    /// The animation is still running and will observe completion on its own.
    Pending,
    Failed,
}

#[derive(Debug, Clone)]
pub struct BootstrapSync {
    title: String,
    subtitle: String,
    steps: Vec<ProgressStep>,
    cursor: usize,
    percent: f64,
    real_done: bool,
    error: Option<String>,
    settling: bool,
}

impl BootstrapSync {
    /// The cluster bootstrap sequence; prerequisite checks are already complete.
    pub fn new(version: &str) -> Self {
        let steps = vec![
            ProgressStep::done("Docker detected"),
            ProgressStep::done("Kind installed"),
            ProgressStep {
                active: true,
                ..ProgressStep::pending("Pulling node image")
            },
            ProgressStep::pending("Starting control plane"),
            ProgressStep::pending("Configuring kubeconfig"),
        ];
        Self::with_steps(
            DEFAULT_TITLE,
            format!("Creating Kind cluster ({version})..."),
            steps,
            2,
        )
    }

    /// `cursor` is the next step to animate.
    pub fn with_steps(
        title: impl Into<String>,
        subtitle: impl Into<String>,
        steps: Vec<ProgressStep>,
        cursor: usize,
    ) -> Self {
        let cursor = cursor.min(steps.len());
        let percent = if steps.is_empty() {
            1.0
        } else {
            cursor as f64 / steps.len() as f64
        };
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            steps,
            cursor,
            percent,
            real_done: false,
            error: None,
            settling: false,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// In `0.0..=1.0`.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    pub fn is_real_done(&self) -> bool {
        self.real_done
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn is_parked(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.error.is_some() {
            return TickOutcome::Halted;
        }
        if self.settling {
            return TickOutcome::Parked;
        }

        if !self.is_parked() {
            if let Some(prev) = self.cursor.checked_sub(1).and_then(|i| self.steps.get_mut(i)) {
                prev.complete = true;
                prev.active = false;
            }
            if let Some(step) = self.steps.get_mut(self.cursor) {
                step.active = true;
            }
            self.set_percent((self.cursor + 1) as f64 / self.steps.len() as f64);
            self.cursor += 1;
            return TickOutcome::Continue;
        }

        if self.real_done {
            self.complete_all();
            self.settling = true;
            return TickOutcome::Settle;
        }

        self.subtitle = FINALIZING_SUBTITLE.to_string();
        TickOutcome::Parked
    }

    /// Records the provisioning result. An error, once seen, wins over everything after it.
    pub fn on_real_done(&mut self, result: Result<(), String>) -> RealDoneOutcome {
        if self.error.is_some() {
            return RealDoneOutcome::Failed;
        }
        if let Err(err) = result {
            self.error = Some(err);
            self.settling = false;
            return RealDoneOutcome::Failed;
        }
        if self.real_done {
            return RealDoneOutcome::Pending;
        }

        self.real_done = true;
        if self.is_parked() && !self.settling {
            self.complete_all();
            self.subtitle = READY_SUBTITLE.to_string();
            self.settling = true;
            return RealDoneOutcome::Settle;
        }
        RealDoneOutcome::Pending
    }

    /// Whether the settle delay may hand over to the next view.
    pub fn finish_ready(&self) -> bool {
        self.real_done && self.error.is_none() && self.settling
    }

    fn complete_all(&mut self) {
        for step in &mut self.steps {
            step.complete = true;
            step.active = false;
        }
        self.set_percent(1.0);
    }

    fn set_percent(&mut self, percent: f64) {
        self.percent = self.percent.max(percent.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/bootstrap.rs"]
mod tests;
