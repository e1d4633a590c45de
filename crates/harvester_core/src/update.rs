use crate::{Effect, HarvestState, Msg, Outcome, Phase, STAGNATION_LIMIT};

/// Pure update function: applies a message to state and returns any effects.
///
/// Messages that do not fit the current phase are ignored, so a finished
/// session never emits further effects.
pub fn update(mut state: HarvestState, msg: Msg) -> (HarvestState, Vec<Effect>) {
    let effects = match (state.phase(), msg) {
        (Phase::Idle, Msg::Start) => {
            state.set_phase(Phase::Navigating);
            vec![Effect::NavigateHome]
        }
        (Phase::Navigating, Msg::HomeLoaded) => {
            state.set_phase(Phase::AwaitingLogin);
            vec![Effect::AwaitLogin]
        }
        (Phase::AwaitingLogin, Msg::LoginConfirmed) => {
            state.set_phase(Phase::Collecting);
            vec![Effect::OpenTarget]
        }
        (Phase::AwaitingLogin, Msg::LoginTimedOut) => finish(&mut state, Outcome::LoginFailed),
        (Phase::Collecting, Msg::TargetOpened) => next_step(&mut state),
        (
            Phase::Collecting,
            Msg::BatchPersisted {
                new_records,
                stored,
            },
        ) => {
            state.record_persisted(new_records, stored);
            Vec::new()
        }
        (Phase::Collecting, Msg::StepSettled { stored }) => {
            state.settle_step(stored);
            next_step(&mut state)
        }
        _ => Vec::new(),
    };

    (state, effects)
}

// The target check runs first, so reaching the target always wins over stagnation.
fn next_step(state: &mut HarvestState) -> Vec<Effect> {
    if state.target_reached() {
        return finish(state, Outcome::TargetReached);
    }
    if state.stagnant_steps() >= STAGNATION_LIMIT {
        return finish(state, Outcome::Stagnated);
    }
    state.begin_step();
    vec![Effect::ScrollStep]
}

fn finish(state: &mut HarvestState, outcome: Outcome) -> Vec<Effect> {
    state.set_phase(Phase::Finished(outcome));
    vec![Effect::Cleanup { outcome }]
}
