// ABOUTME: Chat controller — performs sequencer effects against a view, the transport and timers.
// ABOUTME: Async work reports back as events on a channel the owner feeds into dispatch().

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::client::Transport;
use crate::monitor::Connectivity;
use crate::sequencer::{Effect, Event, Sequencer};
use crate::session::SessionId;
use crate::view::ConversationView;

/// One conversation: session, sequencer and view. A "new chat" replaces the
/// whole controller; events still in flight for the old one land in a
/// closed channel.
pub struct ChatController<V> {
    session: SessionId,
    sequencer: Sequencer,
    transport: Arc<Transport>,
    view: V,
    events: mpsc::UnboundedSender<Event>,
}

impl<V: ConversationView> ChatController<V> {
    pub fn new(
        session: SessionId,
        transport: Arc<Transport>,
        connectivity: Connectivity,
        settle_delay: std::time::Duration,
        mut view: V,
    ) -> (Self, mpsc::UnboundedReceiver<Event>) {
        let (events, rx) = mpsc::unbounded_channel();
        view.set_connected(connectivity.is_connected());
        let controller = Self {
            session,
            sequencer: Sequencer::new(connectivity, settle_delay),
            transport,
            view,
            events,
        };
        (controller, rx)
    }

    pub fn session(&self) -> &SessionId {
        &self.session
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Feed one event through the sequencer and perform the resulting effects.
    pub fn dispatch(&mut self, event: Event) {
        for effect in self.sequencer.handle(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ClearInput => self.view.clear_input(),
            Effect::AppendTurn { kind, text } => self.view.append_turn(kind, text),
            Effect::ShowTyping => self.view.show_typing(),
            Effect::HideTyping => self.view.hide_typing(),
            Effect::ShowError(text) => self.view.show_error(text),
            Effect::QueueLength(n) => self.view.set_queued(n),
            Effect::Connectivity(connected) => self.view.set_connected(connected),
            Effect::Send { exchange, text } => {
                let transport = Arc::clone(&self.transport);
                let session = self.session.clone();
                let events = self.events.clone();
                tokio::spawn(async move {
                    let outcome = transport.send(&text, &session).await;
                    // Receiver gone means the conversation was reset.
                    let _ = events.send(Event::Completed { exchange, outcome });
                });
            }
            Effect::ScheduleDrain(delay) => {
                let events = self.events.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = events.send(Event::DrainDue);
                });
            }
        }
    }
}
