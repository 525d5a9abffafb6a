pub mod flow;
pub mod fsm;

pub use flow::*;
pub use fsm::*;
