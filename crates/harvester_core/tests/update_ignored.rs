use harvester_core::{update, HarvestState, Msg};

#[test]
fn out_of_phase_messages_are_ignored() {
    let state = HarvestState::new(10);
    let (next, effects) = update(state.clone(), Msg::StepSettled { stored: 3 });

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

#[test]
fn batches_before_collecting_are_ignored() {
    let (state, _) = update(HarvestState::new(10), Msg::Start);
    let (next, effects) = update(
        state.clone(),
        Msg::BatchPersisted {
            new_records: 4,
            stored: 4,
        },
    );

    assert_eq!(next.view().stored, state.view().stored);
    assert!(effects.is_empty());
}
