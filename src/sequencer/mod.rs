// ABOUTME: Sequencer module — the submission queue state machine.
// ABOUTME: Pure transitions from events to effects; the controller performs the effects.

pub mod effect;
pub mod machine;
pub mod state;

pub use effect::{Effect, Event, ExchangeId};
pub use machine::Sequencer;
pub use state::Phase;
