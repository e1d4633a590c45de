use crate::view_model::HarvestView;

/// Consecutive scroll steps without store growth before the session gives up.
pub const STAGNATION_LIMIT: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Navigating,
    AwaitingLogin,
    Collecting,
    Finished(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    TargetReached,
    Stagnated,
    LoginFailed,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestState {
    phase: Phase,
    target: usize,
    stored: usize,
    stored_before_step: usize,
    stagnant_steps: u32,
    scroll_steps: u64,
    persisted_records: usize,
    dirty: bool,
}

impl HarvestState {
    pub fn new(target: usize) -> Self {
        Self {
            target,
            ..Self::default()
        }
    }

    /// A session whose store already holds `stored` records; they count toward the target.
    pub fn resume(target: usize, stored: usize) -> Self {
        Self {
            target,
            stored,
            ..Self::default()
        }
    }

    pub fn view(&self) -> HarvestView {
        HarvestView {
            phase: self.phase,
            target: self.target,
            stored: self.stored,
            stagnant_steps: self.stagnant_steps,
            scroll_steps: self.scroll_steps,
            persisted_records: self.persisted_records,
            dirty: self.dirty,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Terminal outcome, once the session has finished.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns whether the state changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn target_reached(&self) -> bool {
        self.stored >= self.target
    }

    pub(crate) fn stagnant_steps(&self) -> u32 {
        self.stagnant_steps
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.dirty = true;
    }

    pub(crate) fn record_persisted(&mut self, new_records: usize, stored: usize) {
        self.persisted_records += new_records;
        self.stored = stored;
        self.dirty = true;
    }

    pub(crate) fn begin_step(&mut self) {
        self.stored_before_step = self.stored;
    }

    /// Growth is measured against the size seen when the step began.
    pub(crate) fn settle_step(&mut self, stored: usize) {
        self.scroll_steps += 1;
        if stored > self.stored_before_step {
            self.stagnant_steps = 0;
        } else {
            self.stagnant_steps += 1;
        }
        self.stored = stored;
        self.dirty = true;
    }
}
