// ABOUTME: Inputs and outputs of the sequencer's transition function.
// ABOUTME: Events come from the user, the transport, timers and the monitor; effects go to the controller.

use std::time::Duration;

use crate::client::TransportError;
use crate::view::TurnKind;

/// Identifies one transport call started by the sequencer. Completions
/// carrying any other id are stale and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExchangeId(pub u64);

/// Something that happened.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The user submitted input text (already taken from the input box).
    Submit(String),
    /// A transport call finished, successfully or not.
    Completed {
        exchange: ExchangeId,
        outcome: Result<String, TransportError>,
    },
    /// The settling delay before the next queued message elapsed.
    DrainDue,
    /// The connectivity monitor published a new state.
    ConnectivityChanged(bool),
}

/// Something the controller must do.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ClearInput,
    AppendTurn { kind: TurnKind, text: String },
    ShowTyping,
    HideTyping,
    ShowError(String),
    /// Start one transport call and report back with `Event::Completed`.
    Send { exchange: ExchangeId, text: String },
    /// Deliver `Event::DrainDue` after the delay.
    ScheduleDrain(Duration),
    QueueLength(usize),
    Connectivity(bool),
}
