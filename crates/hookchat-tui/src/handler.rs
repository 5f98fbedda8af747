use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use hookchat_core::SendError;
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::App;
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent, tx: &UnboundedSender<AppEvent>) {
    match event {
        AppEvent::Key(key) => handle_key(app, key, tx),
        AppEvent::Mouse(mouse) => handle_mouse(app, mouse),
        AppEvent::Resize => {}
        AppEvent::Tick => app.tick_animation(),
        AppEvent::Reply(result) => app.on_reply(result),
    }
}

fn handle_key(app: &mut App, key: KeyEvent, tx: &UnboundedSender<AppEvent>) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('u') => app.scroll_up(app.chat_height / 2),
            KeyCode::Char('d') => app.scroll_down(app.chat_height / 2),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Enter => submit(app, tx),

        KeyCode::Backspace => app.session.draft_mut().backspace(),
        KeyCode::Delete => app.session.draft_mut().delete(),
        KeyCode::Left => app.session.draft_mut().move_left(),
        KeyCode::Right => app.session.draft_mut().move_right(),
        KeyCode::Home => app.session.draft_mut().move_home(),
        KeyCode::End => app.session.draft_mut().move_end(),
        KeyCode::Char(c) => app.session.draft_mut().insert(c),

        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.page_up(),
        KeyCode::PageDown => app.page_down(),
        _ => {}
    }
}

/// Hand the draft to the session and run the webhook call in the background.
/// The outcome comes back through the event channel as `AppEvent::Reply`.
fn submit(app: &mut App, tx: &UnboundedSender<AppEvent>) {
    let Some(pending) = app.session.submit() else {
        return;
    };

    // Scroll to bottom so "AI is thinking..." is visible
    app.follow_tail = true;

    let tx = tx.clone();
    tokio::spawn(async move {
        // Run the request in its own task so a panic still resolves the send
        let result = match tokio::spawn(pending.dispatch()).await {
            Ok(result) => result,
            Err(e) => Err(SendError::TaskFailed(e.to_string())),
        };
        if tx.send(AppEvent::Reply(result)).is_err() {
            tracing::debug!("event loop gone before webhook reply arrived");
        }
    });
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let in_chat = app
        .chat_area
        .map(|r| point_in_rect(mouse.column, mouse.row, r))
        .unwrap_or(false);
    if !in_chat {
        return;
    }

    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_down(3),
        MouseEventKind::ScrollUp => app.scroll_up(3),
        _ => {}
    }
}
