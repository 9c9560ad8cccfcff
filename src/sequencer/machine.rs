// ABOUTME: Submission sequencer — the transition function from events to effects.
// ABOUTME: Serializes submissions so exactly one exchange is in flight and turns keep submission order.

use std::collections::VecDeque;
use std::time::Duration;

use crate::client::TransportError;
use crate::monitor::Connectivity;
use crate::sequencer::effect::{Effect, Event, ExchangeId};
use crate::sequencer::state::Phase;
use crate::view::TurnKind;

/// Owns the pipeline state: phase, FIFO queue and the exchange counter.
/// Reads the connected flag but never writes it.
pub struct Sequencer {
    connectivity: Connectivity,
    settle_delay: Duration,
    phase: Phase,
    queue: VecDeque<String>,
    last_exchange: u64,
}

impl Sequencer {
    pub fn new(connectivity: Connectivity, settle_delay: Duration) -> Self {
        Self {
            connectivity,
            settle_delay,
            phase: Phase::Idle,
            queue: VecDeque::new(),
            last_exchange: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn queued(&self) -> impl Iterator<Item = &str> {
        self.queue.iter().map(String::as_str)
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Idle with nothing waiting.
    pub fn is_quiescent(&self) -> bool {
        self.phase == Phase::Idle && self.queue.is_empty()
    }

    /// Apply one event and return the effects to perform, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::Submit(text) => self.submit(text),
            Event::Completed { exchange, outcome } => self.complete(exchange, outcome),
            Event::DrainDue => self.drain_due(),
            Event::ConnectivityChanged(connected) => self.connectivity_changed(connected),
        }
    }

    fn submit(&mut self, text: String) -> Vec<Effect> {
        let text = text.trim();
        if text.is_empty() || !self.connectivity.is_connected() {
            return Vec::new();
        }

        if self.phase.is_busy() {
            self.queue.push_back(text.to_string());
            return vec![Effect::ClearInput, Effect::QueueLength(self.queue.len())];
        }

        let mut effects = vec![Effect::ClearInput];
        if self.queue.is_empty() {
            effects.extend(self.start(text.to_string()));
        } else {
            // Held messages go first.
            self.queue.push_back(text.to_string());
            effects.extend(self.drain());
        }
        effects
    }

    fn start(&mut self, text: String) -> Vec<Effect> {
        self.last_exchange += 1;
        let exchange = ExchangeId(self.last_exchange);
        self.phase = Phase::Processing {
            exchange,
            text: text.clone(),
        };
        vec![
            Effect::AppendTurn {
                kind: TurnKind::User,
                text: text.clone(),
            },
            Effect::ShowTyping,
            Effect::Send { exchange, text },
        ]
    }

    fn complete(
        &mut self,
        exchange: ExchangeId,
        outcome: Result<String, TransportError>,
    ) -> Vec<Effect> {
        if self.phase.in_flight() != Some(exchange) {
            tracing::debug!(exchange = exchange.0, "ignoring stale completion");
            return Vec::new();
        }

        let mut effects = vec![Effect::HideTyping];
        match outcome {
            Ok(text) if text.trim().is_empty() => {
                tracing::debug!(exchange = exchange.0, "empty response, nothing to render");
            }
            Ok(text) => effects.push(Effect::AppendTurn {
                kind: TurnKind::Bot,
                text,
            }),
            // The failed text is not retried or re-queued.
            Err(e) => effects.push(Effect::ShowError(format!("Error: {e}"))),
        }
        effects.extend(self.drain());
        effects
    }

    fn drain(&mut self) -> Vec<Effect> {
        match self.queue.pop_front() {
            Some(next) => {
                self.phase = Phase::Settling { next };
                vec![
                    Effect::QueueLength(self.queue.len()),
                    Effect::ScheduleDrain(self.settle_delay),
                ]
            }
            None => {
                self.phase = Phase::Idle;
                Vec::new()
            }
        }
    }

    fn drain_due(&mut self) -> Vec<Effect> {
        let next = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Settling { next } => next,
            other => {
                self.phase = other;
                return Vec::new();
            }
        };

        if !self.connectivity.is_connected() {
            self.queue.push_front(next);
            let waiting = self.queue.len();
            tracing::info!(waiting, "server unavailable, holding queued messages");
            return vec![
                Effect::QueueLength(waiting),
                Effect::ShowError(format!(
                    "Server unavailable. {waiting} queued message(s) will be sent when the connection returns."
                )),
            ];
        }

        self.start(next)
    }

    fn connectivity_changed(&mut self, connected: bool) -> Vec<Effect> {
        let mut effects = vec![Effect::Connectivity(connected)];
        if connected && self.phase == Phase::Idle && !self.queue.is_empty() {
            effects.extend(self.drain());
        }
        effects
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::watch;

    use super::*;

    const SETTLE: Duration = Duration::from_millis(500);

    fn sequencer(connected: bool) -> (Sequencer, watch::Sender<bool>) {
        let (tx, connectivity) = Connectivity::channel(connected);
        (Sequencer::new(connectivity, SETTLE), tx)
    }

    fn sent(effects: &[Effect]) -> Option<(ExchangeId, &str)> {
        effects.iter().find_map(|e| match e {
            Effect::Send { exchange, text } => Some((*exchange, text.as_str())),
            _ => None,
        })
    }

    #[test]
    fn submit_while_idle_starts_exchange() {
        let (mut seq, _tx) = sequencer(true);
        let effects = seq.handle(Event::Submit("hello".to_string()));

        assert_eq!(
            effects,
            vec![
                Effect::ClearInput,
                Effect::AppendTurn {
                    kind: TurnKind::User,
                    text: "hello".to_string()
                },
                Effect::ShowTyping,
                Effect::Send {
                    exchange: ExchangeId(1),
                    text: "hello".to_string()
                },
            ]
        );
        assert_eq!(seq.phase().in_flight(), Some(ExchangeId(1)));
    }

    #[test]
    fn submit_trims_and_rejects_blank() {
        let (mut seq, _tx) = sequencer(true);
        assert!(seq.handle(Event::Submit("   \n ".to_string())).is_empty());
        assert!(seq.is_quiescent());

        let effects = seq.handle(Event::Submit("  hi  ".to_string()));
        assert_eq!(sent(&effects).map(|(_, t)| t), Some("hi"));
    }

    #[test]
    fn submit_while_disconnected_has_no_effects() {
        let (mut seq, _tx) = sequencer(false);
        assert!(seq.handle(Event::Submit("hello".to_string())).is_empty());
        assert!(seq.is_quiescent());
    }

    #[test]
    fn submit_while_disconnected_is_rejected_even_when_busy() {
        let (mut seq, tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        tx.send(false).unwrap();

        assert!(seq.handle(Event::Submit("b".to_string())).is_empty());
        assert_eq!(seq.queue_len(), 0);
    }

    #[test]
    fn submit_while_processing_queues_without_rendering() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));

        let effects = seq.handle(Event::Submit("b".to_string()));
        assert_eq!(effects, vec![Effect::ClearInput, Effect::QueueLength(1)]);

        let effects = seq.handle(Event::Submit("c".to_string()));
        assert_eq!(effects, vec![Effect::ClearInput, Effect::QueueLength(2)]);
        assert_eq!(seq.queued().collect::<Vec<_>>(), vec!["b", "c"]);
    }

    #[test]
    fn success_renders_bot_turn_and_returns_to_idle() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("hello".to_string()));

        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("hi".to_string()),
        });
        assert_eq!(
            effects,
            vec![
                Effect::HideTyping,
                Effect::AppendTurn {
                    kind: TurnKind::Bot,
                    text: "hi".to_string()
                },
            ]
        );
        assert!(seq.is_quiescent());
    }

    #[test]
    fn failure_shows_banner_and_drops_text() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("hello".to_string()));

        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Err(TransportError::Timeout(Duration::from_secs(30))),
        });
        assert_eq!(
            effects,
            vec![
                Effect::HideTyping,
                Effect::ShowError("Error: Request timed out after 30s".to_string()),
            ]
        );
        assert!(seq.is_quiescent());
    }

    #[test]
    fn empty_response_renders_nothing() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("hello".to_string()));
        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok(String::new()),
        });
        assert_eq!(effects, vec![Effect::HideTyping]);
    }

    #[test]
    fn stale_completion_is_ignored() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Err(TransportError::Timeout(Duration::from_secs(30))),
        });
        seq.handle(Event::Submit("b".to_string()));

        // A late answer for the first exchange must not touch the second.
        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("late".to_string()),
        });
        assert!(effects.is_empty());
        assert_eq!(seq.phase().in_flight(), Some(ExchangeId(2)));
    }

    #[test]
    fn completion_while_idle_is_ignored() {
        let (mut seq, _tx) = sequencer(true);
        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(7),
            outcome: Ok("ghost".to_string()),
        });
        assert!(effects.is_empty());
    }

    #[test]
    fn completion_drains_queue_after_settling_delay() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        seq.handle(Event::Submit("b".to_string()));

        let effects = seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("A".to_string()),
        });
        assert_eq!(
            &effects[2..],
            &[Effect::QueueLength(0), Effect::ScheduleDrain(SETTLE)]
        );
        assert_eq!(
            seq.phase(),
            &Phase::Settling {
                next: "b".to_string()
            }
        );

        let effects = seq.handle(Event::DrainDue);
        assert_eq!(
            effects,
            vec![
                Effect::AppendTurn {
                    kind: TurnKind::User,
                    text: "b".to_string()
                },
                Effect::ShowTyping,
                Effect::Send {
                    exchange: ExchangeId(2),
                    text: "b".to_string()
                },
            ]
        );
    }

    #[test]
    fn submit_during_settling_keeps_fifo_order() {
        let (mut seq, _tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        seq.handle(Event::Submit("b".to_string()));
        seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("A".to_string()),
        });

        let effects = seq.handle(Event::Submit("c".to_string()));
        assert_eq!(effects, vec![Effect::ClearInput, Effect::QueueLength(1)]);

        let effects = seq.handle(Event::DrainDue);
        assert_eq!(sent(&effects).map(|(_, t)| t), Some("b"));
        assert_eq!(seq.queued().collect::<Vec<_>>(), vec!["c"]);
    }

    #[test]
    fn drain_due_outside_settling_is_ignored() {
        let (mut seq, _tx) = sequencer(true);
        assert!(seq.handle(Event::DrainDue).is_empty());
        seq.handle(Event::Submit("a".to_string()));
        assert!(seq.handle(Event::DrainDue).is_empty());
        assert_eq!(seq.phase().in_flight(), Some(ExchangeId(1)));
    }

    #[test]
    fn drain_while_offline_holds_message_until_reconnect() {
        let (mut seq, tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        seq.handle(Event::Submit("b".to_string()));
        seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("A".to_string()),
        });

        tx.send(false).unwrap();
        let effects = seq.handle(Event::DrainDue);
        assert_eq!(effects[0], Effect::QueueLength(1));
        assert!(matches!(&effects[1], Effect::ShowError(msg) if msg.contains("unavailable")));
        assert_eq!(seq.phase(), &Phase::Idle);
        assert_eq!(seq.queued().collect::<Vec<_>>(), vec!["b"]);

        tx.send(true).unwrap();
        let effects = seq.handle(Event::ConnectivityChanged(true));
        assert_eq!(
            effects,
            vec![
                Effect::Connectivity(true),
                Effect::QueueLength(0),
                Effect::ScheduleDrain(SETTLE),
            ]
        );
        let effects = seq.handle(Event::DrainDue);
        assert_eq!(sent(&effects).map(|(_, t)| t), Some("b"));
    }

    #[test]
    fn submit_after_offline_hold_waits_behind_held_message() {
        let (mut seq, tx) = sequencer(true);
        seq.handle(Event::Submit("a".to_string()));
        seq.handle(Event::Submit("b".to_string()));
        seq.handle(Event::Completed {
            exchange: ExchangeId(1),
            outcome: Ok("A".to_string()),
        });
        tx.send(false).unwrap();
        seq.handle(Event::DrainDue);
        assert_eq!(seq.phase(), &Phase::Idle);

        // The flag is back before the controller hears about it.
        tx.send(true).unwrap();
        let effects = seq.handle(Event::Submit("c".to_string()));
        assert_eq!(
            effects,
            vec![
                Effect::ClearInput,
                Effect::QueueLength(1),
                Effect::ScheduleDrain(SETTLE),
            ]
        );
        assert_eq!(seq.phase(), &Phase::Settling { next: "b".to_string() });

        // The late notification must not start a second drain.
        assert_eq!(
            seq.handle(Event::ConnectivityChanged(true)),
            vec![Effect::Connectivity(true)]
        );

        let effects = seq.handle(Event::DrainDue);
        assert_eq!(sent(&effects).map(|(_, t)| t), Some("b"));
        seq.handle(Event::Completed {
            exchange: ExchangeId(2),
            outcome: Ok("B".to_string()),
        });
        let effects = seq.handle(Event::DrainDue);
        assert_eq!(sent(&effects).map(|(_, t)| t), Some("c"));
    }

    #[test]
    fn connectivity_change_is_forwarded() {
        let (mut seq, _tx) = sequencer(false);
        assert_eq!(
            seq.handle(Event::ConnectivityChanged(false)),
            vec![Effect::Connectivity(false)]
        );
    }

    #[test]
    fn rapid_submissions_run_one_at_a_time_in_order() {
        let (mut seq, _tx) = sequencer(true);
        let inputs = ["one", "two", "three", "four", "five"];
        let mut started = Vec::new();

        for (i, text) in inputs.iter().enumerate() {
            let effects = seq.handle(Event::Submit(text.to_string()));
            if i == 0 {
                started.push(sent(&effects).map(|(id, t)| (id, t.to_string())).unwrap());
            } else {
                assert!(sent(&effects).is_none());
            }
        }

        while let Some((exchange, _)) = started.last().cloned() {
            let effects = seq.handle(Event::Completed {
                exchange,
                outcome: Ok(format!("re: {exchange:?}")),
            });
            assert!(sent(&effects).is_none());
            if !effects.contains(&Effect::ScheduleDrain(SETTLE)) {
                break;
            }
            let effects = seq.handle(Event::DrainDue);
            started.push(sent(&effects).map(|(id, t)| (id, t.to_string())).unwrap());
        }

        let order: Vec<&str> = started.iter().map(|(_, t)| t.as_str()).collect();
        assert_eq!(order, inputs);
        assert!(seq.is_quiescent());
    }
}
