use super::{session::SessionContext, ui_state::UiState};
use crate::core::chat_request::Reply;
use crate::core::message::Message;
use tracing::debug;

/// Mutations of the transcript and the request lifecycle that keep the
/// loading flag, request ids and scroll position consistent.
pub struct ConversationController<'a> {
    session: &'a mut SessionContext,
    ui: &'a mut UiState,
}

impl<'a> ConversationController<'a> {
    pub fn new(session: &'a mut SessionContext, ui: &'a mut UiState) -> Self {
        Self { session, ui }
    }

    /// Append the user's entry. Sending always brings the newest entry into view.
    pub fn add_user_message(&mut self, text: String) {
        self.ui.messages.push_back(Message::user(text));
        self.ui.auto_scroll = true;
    }

    /// Append a bot or error entry. Like the user's entry, it is always
    /// scrolled into view.
    pub fn add_reply(&mut self, reply: Reply) {
        self.ui.messages.push_back(reply.into_message());
        self.ui.auto_scroll = true;
    }

    /// Mark a request as in flight and return its id.
    pub fn start_request(&mut self) -> u64 {
        let request_id = self.session.next_request_id();
        self.ui.begin_loading();
        request_id
    }

    /// Settle `request_id` with `reply`. Returns false (and changes nothing)
    /// when the id is not the outstanding request.
    pub fn settle_request(&mut self, request_id: u64, reply: Reply) -> bool {
        if !self.ui.is_loading || !self.session.is_current_request(request_id) {
            debug!(
                request_id,
                current = self.session.current_request_id,
                "dropping stale reply"
            );
            return false;
        }
        self.add_reply(reply);
        self.ui.end_loading();
        true
    }

    pub fn update_scroll_position(&mut self, available_height: u16, terminal_width: u16) {
        if self.ui.auto_scroll {
            self.ui.scroll_offset = self
                .ui
                .calculate_max_scroll_offset(available_height, terminal_width);
        }
    }

    pub fn calculate_available_height(&self, term_width: u16, term_height: u16) -> u16 {
        self.ui.transcript_height(term_width, term_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::message::Sender;
    use crate::utils::test_utils::create_test_app;

    #[test]
    fn settle_appends_reply_and_clears_loading() {
        let mut app = create_test_app();
        let mut conversation = app.conversation();
        conversation.add_user_message("Hello bot".into());
        let id = conversation.start_request();
        assert!(conversation.settle_request(id, Reply::Answer("hi".into())));

        assert!(!app.ui.is_loading);
        let senders: Vec<Sender> = app.ui.messages.iter().map(|m| m.sender()).collect();
        assert_eq!(senders, vec![Sender::User, Sender::Bot]);
    }

    #[test]
    fn stale_or_unexpected_replies_are_dropped() {
        let mut app = create_test_app();
        let mut conversation = app.conversation();
        assert!(!conversation.settle_request(0, Reply::Answer("early".into())));

        let id = conversation.start_request();
        assert!(!conversation.settle_request(id + 1, Reply::Answer("wrong".into())));
        assert!(conversation.settle_request(id, Reply::Failure("boom".into())));
        assert!(!conversation.settle_request(id, Reply::Answer("twice".into())));

        assert_eq!(app.ui.messages.len(), 1);
        assert_eq!(app.ui.messages[0], Message::error("boom"));
    }

    #[test]
    fn new_entries_always_scroll_into_view() {
        let mut app = create_test_app();
        for i in 0..30 {
            app.ui.messages.push_back(Message::bot(format!("line {i}")));
        }

        let mut conversation = app.conversation();
        conversation.update_scroll_position(10, 80);
        assert_eq!(app.ui.scroll_offset, 50);

        app.ui.scroll_up(5);
        assert_eq!(app.ui.scroll_offset, 45);
        app.conversation().add_reply(Reply::Answer("late".into()));
        app.conversation().update_scroll_position(10, 80);
        assert!(app.ui.auto_scroll);
        assert_eq!(app.ui.scroll_offset, 52);

        app.ui.scroll_up(20);
        app.conversation().add_user_message("again".into());
        app.conversation().update_scroll_position(10, 80);
        assert_eq!(app.ui.scroll_offset, 54);
    }
}
