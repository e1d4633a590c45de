//! Harvester core: pure harvest state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{HarvestState, Outcome, Phase, STAGNATION_LIMIT};
pub use update::update;
pub use view_model::HarvestView;
