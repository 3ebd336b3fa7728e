pub mod frontier;
pub mod search;
pub mod tick;
pub mod work;

pub use search::{search_and_claim, SearchReport};
pub use tick::{run_simulation_tick, SimulationEvent};
pub use work::{advance, return_work, try_claim, AdvanceOutcome, JobKind};
