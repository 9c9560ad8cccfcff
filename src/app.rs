// ABOUTME: App orchestrator — wires together the HTTP client, connectivity monitor, controller and TUI.
// ABOUTME: Owns the terminal and runs the select! loop over keys, pipeline events and health changes.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{
    DisableBracketedPaste, EnableBracketedPaste, Event as TermEvent, EventStream, KeyEventKind,
};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use futures::StreamExt;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;
use tokio::time::{MissedTickBehavior, interval};

use crate::client::{ChatApi, HttpChatApi, Transport};
use crate::config::Config;
use crate::controller::ChatController;
use crate::markdown::{self, MarkdownRenderer};
use crate::monitor::{Connectivity, ConnectivityMonitor};
use crate::sequencer::Event;
use crate::session::SessionId;
use crate::tui::input::{InputResult, handle_key};
use crate::tui::state::TuiState;
use crate::tui::ui;

const BANNER_TICK: Duration = Duration::from_millis(250);

type Conversation = (ChatController<TuiState>, mpsc::UnboundedReceiver<Event>);

/// Raw mode plus alternate screen for the lifetime of the value.
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl TerminalGuard {
    fn init() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableBracketedPaste)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Top-level application that orchestrates all subsystems.
pub struct App {
    config: Config,
}

impl App {
    /// Create a new app with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the application until the user quits.
    pub async fn run(self) -> anyhow::Result<()> {
        let api: Arc<dyn ChatApi> = Arc::new(HttpChatApi::new(&self.config.server.base_url)?);
        let timing = &self.config.timing;

        let (monitor, connectivity) =
            ConnectivityMonitor::new(Arc::clone(&api), timing.health_interval());
        let monitor_handle = tokio::spawn(monitor.run());

        let transport = Arc::new(Transport::new(
            api,
            connectivity.clone(),
            timing.request_timeout(),
        ));
        let renderer = markdown::renderer(self.config.display.markdown);

        tracing::info!(
            server = %self.config.server.base_url,
            markdown = self.config.display.markdown,
            "starting chatline"
        );

        let mut guard = TerminalGuard::init()?;
        let result = self
            .event_loop(&mut guard.terminal, &transport, connectivity, &renderer)
            .await;
        drop(guard);

        monitor_handle.abort();

        if let Ok(ref summary) = result {
            print_exit_screen(summary);
        }
        result.map(|_| ())
    }

    fn new_conversation(
        &self,
        transport: &Arc<Transport>,
        connectivity: &Connectivity,
        renderer: &Arc<dyn MarkdownRenderer>,
    ) -> Conversation {
        let session = SessionId::generate();
        tracing::info!(session = %session, "new conversation");
        let view = TuiState::new(&session, &self.config.server.base_url, Arc::clone(renderer))
            .with_banner_ttl(self.config.timing.error_banner())
            .with_suggestions(self.config.display.suggestions.clone());
        ChatController::new(
            session,
            Arc::clone(transport),
            connectivity.clone(),
            self.config.timing.settle_delay(),
            view,
        )
    }

    async fn event_loop(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stdout>>,
        transport: &Arc<Transport>,
        connectivity: Connectivity,
        renderer: &Arc<dyn MarkdownRenderer>,
    ) -> anyhow::Result<ExitSummary> {
        let (mut controller, mut events) = self.new_conversation(transport, &connectivity, renderer);
        let mut watcher = connectivity.clone();
        let mut monitor_alive = true;
        let mut keys = EventStream::new();
        let mut tick = interval(BANNER_TICK);
        tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            terminal.draw(|frame| ui::render(frame, controller.view_mut()))?;

            tokio::select! {
                maybe_event = keys.next() => match maybe_event {
                    Some(Ok(TermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        match handle_key(controller.view_mut(), key) {
                            InputResult::None => {}
                            InputResult::Send(text) => controller.dispatch(Event::Submit(text)),
                            InputResult::NewChat => {
                                // Dropping the old receiver discards its in-flight results.
                                (controller, events) =
                                    self.new_conversation(transport, &connectivity, renderer);
                            }
                            InputResult::Quit => break,
                        }
                    }
                    Some(Ok(TermEvent::Paste(text))) => {
                        controller.view_mut().insert_str_at_cursor(&text);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                },
                Some(event) = events.recv() => controller.dispatch(event),
                changed = watcher.changed(), if monitor_alive => match changed {
                    Some(connected) => controller.dispatch(Event::ConnectivityChanged(connected)),
                    None => {
                        tracing::warn!("connectivity monitor stopped");
                        monitor_alive = false;
                    }
                },
                _ = tick.tick() => {
                    controller.view_mut().prune_banners(Instant::now());
                }
            }
        }

        Ok(ExitSummary {
            session: controller.session().clone(),
            turns: controller.view().turns.len(),
        })
    }
}

struct ExitSummary {
    session: SessionId,
    turns: usize,
}

fn print_exit_screen(summary: &ExitSummary) {
    println!();
    println!("  \x1b[1mchatline\x1b[0m session {} ended.", summary.session);
    println!("  {} turns exchanged.", summary.turns);
    println!();
}
