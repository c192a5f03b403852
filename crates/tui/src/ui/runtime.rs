//! Runtime: event loop and input routing for the terminal.
//!
//! - Owns the terminal lifecycle (raw mode, alternate screen).
//! - A dedicated thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel.
//! - Background API calls run as Tokio tasks collected in a
//!   `FuturesUnordered`; each resolves to the `Msg` carrying its result.
//! - Ticks are fast (100 ms) while work is pending or toasts are visible so
//!   expiry shows promptly, and slow (5 s) otherwise.
//! - Renders only when `App` marked itself dirty.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, Interval, MissedTickBehavior},
};
use tracing::{info, warn};
use yousmala_api::BackOfficeApi;

use crate::app::{App, Effect, Msg};
use crate::cmd::{self, PendingTask};
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

type Backend = CrosstermBackend<std::io::Stdout>;

const FAST_TICK: Duration = Duration::from_millis(100);
const IDLE_TICK: Duration = Duration::from_millis(5000);

/// Spawn the input thread and return the receiving end of its channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!("Failed to read terminal event: {}", error);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn new_ticker(period: Duration) -> Interval {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    app.mark_dirty();
    match input_event {
        Event::Key(key_event) if key_event.kind == KeyEventKind::Press => main_view.handle_key_events(app, key_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        _ => Vec::new(),
    }
}

/// Run effects until none are left, queueing background tasks as they appear.
fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    api: &Arc<dyn BackOfficeApi>,
    effects: &mut Vec<Effect>,
    pending: &mut FuturesUnordered<PendingTask>,
) {
    while !effects.is_empty() {
        let batch = cmd::run_from_effects(app, api, std::mem::take(effects));
        pending.extend(batch.pending);
        for msg in batch.immediate {
            effects.extend(main_view.handle_message(app, msg));
        }
    }
}

/// Entry point for the terminal runtime: sets up the terminal, runs the event
/// loop, and restores the terminal on exit.
pub async fn run_app(api: Arc<dyn BackOfficeApi>) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut main_view = MainView::default();
    let mut app = App::new();
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &api, &mut input_receiver).await;
    cleanup_terminal(&mut terminal)?;
    outcome
}

async fn event_loop(
    terminal: &mut Terminal<Backend>,
    app: &mut App,
    main_view: &mut MainView,
    api: &Arc<dyn BackOfficeApi>,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut pending: FuturesUnordered<PendingTask> = FuturesUnordered::new();
    let mut effects = vec![Effect::LoadReferenceData];

    let mut current_interval = IDLE_TICK;
    let mut ticker = new_ticker(current_interval);

    loop {
        process_effects(app, main_view, api, &mut effects, &mut pending);
        if app.should_quit() {
            break;
        }
        if app.take_dirty() {
            terminal.draw(|frame| {
                let area = frame.area();
                main_view.render(frame, area, app);
            })?;
        }

        let target_interval = if app.is_busy() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = new_ticker(current_interval);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(event) => effects.extend(handle_input_event(app, main_view, event)),
                    // Input channel closed; shut down cleanly.
                    None => break,
                }
            }

            Some(msg) = pending.next(), if !pending.is_empty() => {
                effects.extend(main_view.handle_message(app, msg));
            }

            _ = ticker.tick() => {
                effects.extend(main_view.handle_message(app, Msg::Tick));
            }

            _ = signal::ctrl_c() => break,
        }
    }

    for task in pending.iter() {
        task.abort();
    }
    info!("order entry terminal closed");
    Ok(())
}
