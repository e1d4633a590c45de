use crate::Phase;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HarvestView {
    pub phase: Phase,
    pub target: usize,
    pub stored: usize,
    pub stagnant_steps: u32,
    pub scroll_steps: u64,
    pub persisted_records: usize,
    pub dirty: bool,
}
