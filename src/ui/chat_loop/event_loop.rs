//! Event polling, dispatching, and UI rendering loop.
//!
//! Terminal input is read on a background task and forwarded as
//! [`UiEvent`]s. Each pass of the loop draws (rate limited), turns pending
//! events and request completions into actions, applies them under the app
//! lock, and runs the resulting commands.

use std::{
    error::Error,
    io,
    sync::Arc,
    time::{Duration, Instant},
};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::prelude::Size;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info};

use crate::core::app::{
    apply_actions, App, AppAction, AppActionContext, AppActionDispatcher, AppActionEnvelope,
    AppCommand,
};
use crate::core::chat_request::{ChatRequestService, Reply};
use crate::core::help::HelpContent;
use crate::ui::renderer::ui;

use super::keybindings::{action_for_key, action_for_mouse};
use super::lifecycle::{restore_terminal, setup_terminal, SharedTerminal};
use super::AppHandle;

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

fn context_for(term_size: Size) -> AppActionContext {
    AppActionContext {
        term_width: term_size.width,
        term_height: term_size.height,
    }
}

fn spawn_help_loader(dispatcher: AppActionDispatcher, generation: u64, ctx: AppActionContext) {
    tokio::spawn(async move {
        let content = HelpContent::load();
        dispatcher.dispatch_many([AppAction::HelpLoaded { generation, content }], ctx);
    });
}

async fn is_exit_requested(app: &AppHandle) -> bool {
    app.read(|app| app.ui.exit_requested).await
}

async fn current_terminal_size(terminal: &SharedTerminal) -> Size {
    let terminal_guard = terminal.lock().await;
    terminal_guard.size().unwrap_or_default()
}

async fn try_draw_frame(
    app: &AppHandle,
    terminal: &SharedTerminal,
    request_redraw: &mut bool,
    last_draw: &mut Instant,
    frame_duration: Duration,
) -> io::Result<()> {
    if !*request_redraw {
        return Ok(());
    }

    let now = Instant::now();
    if now.duration_since(*last_draw) < frame_duration {
        return Ok(());
    }

    let mut terminal_guard = terminal.lock().await;
    app.read(|app| terminal_guard.draw(|f| ui(f, app))).await?;
    *last_draw = now;
    *request_redraw = false;
    Ok(())
}

/// Record the terminal size and, when it changed, re-pin the transcript.
async fn track_terminal_size(app: &AppHandle, term_size: Size) -> bool {
    app.update(|app| {
        if app.ui.last_term_size == term_size {
            return false;
        }
        app.ui.last_term_size = term_size;
        let mut conversation = app.conversation();
        let available = conversation.calculate_available_height(term_size.width, term_size.height);
        conversation.update_scroll_position(available, term_size.width);
        true
    })
    .await
}

struct EventProcessingOutcome {
    events_processed: bool,
    request_redraw: bool,
}

async fn process_ui_events(
    app: &AppHandle,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
    dispatcher: &AppActionDispatcher,
    term_size: Size,
) -> EventProcessingOutcome {
    let mut outcome = EventProcessingOutcome {
        events_processed: false,
        request_redraw: false,
    };
    let ctx = context_for(term_size);

    while let Ok(ev) = event_rx.try_recv() {
        outcome.events_processed = true;
        match ev {
            UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if let Some(action) = action_for_key(&key) {
                    dispatcher.dispatch_many([action], ctx);
                }
            }
            UiEvent::Crossterm(Event::Mouse(mouse)) => {
                let area = Rect::new(0, 0, term_size.width, term_size.height);
                let (layout, can_submit) = app
                    .read(|app| (app.ui.layout(area), app.ui.can_submit()))
                    .await;
                if let Some(action) = action_for_mouse(&mouse, &layout, can_submit) {
                    dispatcher.dispatch_many([action], ctx);
                }
            }
            UiEvent::Crossterm(Event::Paste(text)) => {
                handle_paste_event(dispatcher, ctx, text);
            }
            UiEvent::Crossterm(_) => {}
        }
    }

    if outcome.events_processed {
        outcome.request_redraw = true;
    }

    outcome
}

/// Make pasted text fit the single-line draft.
pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let expanded_tabs = without_crlf.replace('\t', "    ");
    expanded_tabs
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .filter(|&c| !c.is_control())
        .collect()
}

fn handle_paste_event(dispatcher: &AppActionDispatcher, ctx: AppActionContext, text: String) {
    let sanitized_text = sanitize_pasted_text(&text);
    if sanitized_text.is_empty() {
        return;
    }

    dispatcher.dispatch_many(
        [AppAction::InsertIntoInput {
            text: sanitized_text,
        }],
        ctx,
    );
}

/// Forward request completions to the reducer. Staleness is decided there.
fn process_replies(
    dispatcher: &AppActionDispatcher,
    rx: &mut mpsc::UnboundedReceiver<(Reply, u64)>,
    ctx: AppActionContext,
) -> bool {
    let mut received_any = false;
    while let Ok((reply, request_id)) = rx.try_recv() {
        received_any = true;
        dispatcher.dispatch_many([AppAction::ReplyReceived { reply, request_id }], ctx);
    }
    received_any
}

async fn drain_action_queue(
    app: &AppHandle,
    dispatcher: &AppActionDispatcher,
    request_service: &ChatRequestService,
    action_rx: &mut mpsc::UnboundedReceiver<AppActionEnvelope>,
    ctx: AppActionContext,
) -> bool {
    let mut pending = Vec::new();
    while let Ok(envelope) = action_rx.try_recv() {
        pending.push(envelope);
    }

    if pending.is_empty() {
        return false;
    }

    let commands = app.update(|app| apply_actions(app, pending)).await;
    for cmd in commands {
        match cmd {
            AppCommand::SendQuery(params) => {
                debug!(request_id = params.request_id, "spawning chat request");
                request_service.spawn_request(params);
            }
            AppCommand::LoadHelp { generation } => {
                spawn_help_loader(dispatcher.clone(), generation, ctx);
            }
        }
    }
    true
}

fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            if let Ok(true) = event::poll(Duration::from_millis(10)) {
                match event::read() {
                    Ok(ev) => {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => {
                        continue;
                    }
                }
            } else {
                tokio::task::yield_now().await;
            }
        }
    })
}

async fn run_event_loop(
    app: &AppHandle,
    terminal: &SharedTerminal,
    event_rx: &mut mpsc::UnboundedReceiver<UiEvent>,
) -> Result<(), Box<dyn Error>> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppActionEnvelope>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    let (request_service, mut reply_rx) = ChatRequestService::new();

    const MAX_FPS: u64 = 60;
    let frame_duration = Duration::from_millis(1000 / MAX_FPS);
    let mut last_draw = Instant::now() - frame_duration;
    let mut request_redraw = true;
    let mut indicator_visible = false;

    loop {
        if is_exit_requested(app).await {
            return Ok(());
        }

        try_draw_frame(
            app,
            terminal,
            &mut request_redraw,
            &mut last_draw,
            frame_duration,
        )
        .await?;

        let term_size = current_terminal_size(terminal).await;
        if track_terminal_size(app, term_size).await {
            request_redraw = true;
        }
        let ctx = context_for(term_size);

        let event_outcome = process_ui_events(app, event_rx, &dispatcher, term_size).await;
        if event_outcome.request_redraw {
            request_redraw = true;
        }

        let received_any = process_replies(&dispatcher, &mut reply_rx, ctx);

        if drain_action_queue(app, &dispatcher, &request_service, &mut action_rx, ctx).await {
            request_redraw = true;
        }

        // The loading dots animate, so keep redrawing while a request is out
        let indicator_now = app.read(|app| app.ui.is_loading).await;
        if indicator_now || indicator_now != indicator_visible {
            request_redraw = true;
        }
        indicator_visible = indicator_now;

        let idle = !event_outcome.events_processed && !received_any && !request_redraw;
        if idle {
            tokio::time::sleep(Duration::from_millis(16)).await;
        } else if indicator_now && !event_outcome.events_processed && !received_any {
            tokio::time::sleep(frame_duration).await;
        }
    }
}

pub async fn run_chat(app: App) -> Result<(), Box<dyn Error>> {
    let endpoint = app.session.endpoint.clone();
    let app = AppHandle::new(Arc::new(Mutex::new(app)));
    info!(%endpoint, "starting chat session");

    let terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    let event_reader_handle = spawn_event_reader(event_tx);

    let result = run_event_loop(&app, &terminal, &mut event_rx).await;

    event_reader_handle.abort();
    restore_terminal(&terminal).await?;

    let transcript_len = app.read(|app| app.ui.messages.len()).await;
    info!(messages = transcript_len, "chat session ended");

    result
}
