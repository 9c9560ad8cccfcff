// ABOUTME: Sequencer phases — idle, one exchange in flight, or settling before the next queued one.
// ABOUTME: The queue itself lives beside the phase in the Sequencer.

use crate::sequencer::effect::ExchangeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    Idle,
    /// Exactly one transport call is outstanding.
    Processing { exchange: ExchangeId, text: String },
    /// The head of the queue was popped and waits out the settling delay.
    Settling { next: String },
}

impl Phase {
    /// Whether a new submission has to wait in the queue.
    pub fn is_busy(&self) -> bool {
        !matches!(self, Phase::Idle)
    }

    pub fn in_flight(&self) -> Option<ExchangeId> {
        match self {
            Phase::Processing { exchange, .. } => Some(*exchange),
            _ => None,
        }
    }
}
