use hookchat_core::{ChatSession, SendError};
use ratatui::layout::Rect;

pub struct App {
    pub should_quit: bool,
    pub session: ChatSession,
    pub title: String,

    // Chat view state, refreshed on every render
    pub chat_scroll: u16,
    pub chat_height: u16,
    pub chat_lines: u16,
    pub chat_area: Option<Rect>,
    /// Keep the view pinned to the newest message
    pub follow_tail: bool,

    pub animation_frame: u8,
}

impl App {
    pub fn new(session: ChatSession, title: &str) -> Self {
        Self {
            should_quit: false,
            session,
            title: title.to_string(),

            chat_scroll: 0,
            chat_height: 0,
            chat_lines: 0,
            chat_area: None,
            follow_tail: true,

            animation_frame: 0,
        }
    }

    /// Reconcile a finished send into the conversation
    pub fn on_reply(&mut self, result: Result<String, SendError>) {
        self.session.resolve(result);
        self.follow_tail = true;
    }

    /// Tick animation frame (called by Tick event)
    pub fn tick_animation(&mut self) {
        if self.session.is_busy() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
    }

    pub fn max_scroll(&self) -> u16 {
        self.chat_lines.saturating_sub(self.chat_height)
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.min(self.max_scroll()).saturating_sub(lines);
        self.follow_tail = self.chat_scroll >= self.max_scroll();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.chat_scroll = self.chat_scroll.saturating_add(lines).min(self.max_scroll());
        self.follow_tail = self.chat_scroll >= self.max_scroll();
    }

    pub fn page_up(&mut self) {
        self.scroll_up(self.chat_height.max(1));
    }

    pub fn page_down(&mut self) {
        self.scroll_down(self.chat_height.max(1));
    }

    /// Called by the renderer once the chat layout is known
    pub fn update_chat_layout(&mut self, total_lines: u16, visible_height: u16) {
        self.chat_lines = total_lines;
        self.chat_height = visible_height;

        if self.follow_tail {
            self.chat_scroll = self.max_scroll();
        } else {
            self.chat_scroll = self.chat_scroll.min(self.max_scroll());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hookchat_core::WebhookClient;

    fn test_app() -> App {
        let client = WebhookClient::new("http://127.0.0.1:9/webhook", "tester", None).unwrap();
        App::new(ChatSession::new(client, None), "Test Chat")
    }

    #[test]
    fn test_follow_tail_pins_scroll_to_bottom() {
        let mut app = test_app();
        app.update_chat_layout(50, 10);
        assert_eq!(app.chat_scroll, 40);

        app.update_chat_layout(55, 10);
        assert_eq!(app.chat_scroll, 45);
    }

    #[test]
    fn test_scrolling_up_releases_tail() {
        let mut app = test_app();
        app.update_chat_layout(50, 10);

        app.scroll_up(5);
        assert_eq!(app.chat_scroll, 35);
        assert!(!app.follow_tail);

        // New content does not yank the view while the user reads history
        app.update_chat_layout(60, 10);
        assert_eq!(app.chat_scroll, 35);

        app.scroll_down(100);
        assert_eq!(app.chat_scroll, 50);
        assert!(app.follow_tail);
    }

    #[test]
    fn test_reply_restores_follow_tail() {
        let mut app = test_app();
        app.update_chat_layout(50, 10);
        app.page_up();
        assert!(!app.follow_tail);

        app.session.draft_mut().set("hi");
        app.session.submit().unwrap();
        app.on_reply(Ok("hello".to_string()));

        assert!(app.follow_tail);
        assert!(!app.session.is_busy());
        assert_eq!(app.session.conversation().len(), 2);
    }

    #[test]
    fn test_short_conversation_never_scrolls() {
        let mut app = test_app();
        app.update_chat_layout(3, 10);
        assert_eq!(app.chat_scroll, 0);
        app.scroll_down(1);
        assert_eq!(app.chat_scroll, 0);
        assert!(app.follow_tail);
    }

    #[test]
    fn test_animation_only_runs_while_busy() {
        let mut app = test_app();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);

        app.session.draft_mut().set("hi");
        app.session.submit().unwrap();
        app.tick_animation();
        app.tick_animation();
        app.tick_animation();
        assert_eq!(app.animation_frame, 0);
        app.tick_animation();
        assert_eq!(app.animation_frame, 1);
    }
}
