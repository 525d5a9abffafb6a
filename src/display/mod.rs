mod notifier;
mod state;

pub use notifier::*;
pub use state::*;
