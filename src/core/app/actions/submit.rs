use tracing::{debug, info};

use super::{App, AppAction, AppActionContext, AppCommand};
use crate::core::chat_request::RequestParams;

pub(super) fn handle_submit_action(
    app: &mut App,
    action: AppAction,
    ctx: AppActionContext,
) -> Option<AppCommand> {
    match action {
        AppAction::SubmitDraft => submit_draft(app, ctx),
        AppAction::ReplyReceived { reply, request_id } => {
            let mut conversation = app.conversation();
            if conversation.settle_request(request_id, reply) {
                let available = conversation.calculate_available_height(ctx.term_width, ctx.term_height);
                conversation.update_scroll_position(available, ctx.term_width);
            }
            None
        }
        _ => unreachable!("non-submit action routed to submit handler"),
    }
}

fn submit_draft(app: &mut App, ctx: AppActionContext) -> Option<AppCommand> {
    if app.ui.is_loading {
        debug!("submit ignored while a request is in flight");
        return None;
    }
    if app.ui.get_input_text().trim().is_empty() {
        return None;
    }

    let query = app.ui.get_input_text().to_string();
    app.ui.clear_input();

    let mut conversation = app.conversation();
    conversation.add_user_message(query.clone());
    let request_id = conversation.start_request();
    let available = conversation.calculate_available_height(ctx.term_width, ctx.term_height);
    conversation.update_scroll_position(available, ctx.term_width);

    info!(request_id, chars = query.chars().count(), "submitting query");

    Some(AppCommand::SendQuery(RequestParams {
        client: app.session.client.clone(),
        endpoint: app.session.endpoint.clone(),
        query,
        request_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::chat_request::{ChatRequestService, Reply, NO_ANSWER_PLACEHOLDER};
    use crate::core::message::{Message, Sender};
    use crate::utils::test_utils::{create_test_app, spawn_stub_server, StubResponse};

    fn default_ctx() -> AppActionContext {
        AppActionContext {
            term_width: 80,
            term_height: 24,
        }
    }

    fn submit(app: &mut App, text: &str) -> Option<AppCommand> {
        app.ui.set_input_text(text.to_string());
        handle_submit_action(app, AppAction::SubmitDraft, default_ctx())
    }

    fn expect_query(command: Option<AppCommand>) -> RequestParams {
        match command {
            Some(AppCommand::SendQuery(params)) => params,
            Some(_) => panic!("unexpected app command returned for submit"),
            None => panic!("expected send query command"),
        }
    }

    fn settle(app: &mut App, request_id: u64, reply: Reply) {
        let result = handle_submit_action(
            app,
            AppAction::ReplyReceived { reply, request_id },
            default_ctx(),
        );
        assert!(result.is_none());
    }

    #[test]
    fn submit_appends_user_entry_and_starts_loading() {
        let mut app = create_test_app();
        let params = expect_query(submit(&mut app, "  Hello bot "));

        assert_eq!(params.query, "  Hello bot ");
        assert_eq!(params.endpoint, app.session.endpoint);
        assert_eq!(params.request_id, app.session.current_request_id);
        assert_eq!(app.ui.get_input_text(), "");
        assert!(app.ui.is_loading);
        assert_eq!(
            app.ui.messages.iter().collect::<Vec<_>>(),
            vec![&Message::user("  Hello bot ")]
        );
    }

    #[test]
    fn blank_submit_is_a_no_op() {
        let mut app = create_test_app();
        for draft in ["", "   ", "\t\n"] {
            assert!(submit(&mut app, draft).is_none());
            assert_eq!(app.ui.get_input_text(), draft);
            assert!(app.ui.messages.is_empty());
            assert!(!app.ui.is_loading);
        }
    }

    #[test]
    fn submit_while_loading_is_a_no_op() {
        let mut app = create_test_app();
        expect_query(submit(&mut app, "first"));

        assert!(submit(&mut app, "second").is_none());
        assert_eq!(app.ui.get_input_text(), "second");
        assert_eq!(app.ui.messages.len(), 1);
        assert!(app.ui.is_loading);
    }

    #[test]
    fn answered_submit_yields_user_then_bot() {
        let mut app = create_test_app();
        let params = expect_query(submit(&mut app, "Hello bot"));
        settle(
            &mut app,
            params.request_id,
            Reply::Answer("Mocked bot response".into()),
        );

        assert!(!app.ui.is_loading);
        assert_eq!(
            app.ui.messages.iter().cloned().collect::<Vec<_>>(),
            vec![
                Message::user("Hello bot"),
                Message::bot("Mocked bot response")
            ]
        );
    }

    #[test]
    fn failed_submit_yields_user_then_error() {
        let mut app = create_test_app();
        let params = expect_query(submit(&mut app, "X"));
        settle(&mut app, params.request_id, Reply::Failure("bad request".into()));

        assert_eq!(
            app.ui.messages.iter().cloned().collect::<Vec<_>>(),
            vec![Message::user("X"), Message::error("bad request")]
        );
        assert!(!app.ui.is_loading);
    }

    #[test]
    fn stale_reply_does_not_settle_the_current_request() {
        let mut app = create_test_app();
        let first = expect_query(submit(&mut app, "one"));
        settle(&mut app, first.request_id, Reply::Answer("a".into()));
        let second = expect_query(submit(&mut app, "two"));

        settle(&mut app, first.request_id, Reply::Answer("late".into()));
        assert!(app.ui.is_loading);
        assert_eq!(app.ui.messages.len(), 3);

        settle(&mut app, second.request_id, Reply::Answer("b".into()));
        assert!(!app.ui.is_loading);
        let senders: Vec<Sender> = app.ui.messages.iter().map(|m| m.sender()).collect();
        assert_eq!(
            senders,
            vec![Sender::User, Sender::Bot, Sender::User, Sender::Bot]
        );
    }

    #[test]
    fn reply_is_scrolled_into_view_after_user_scrolls_up() {
        let mut app = create_test_app();
        for i in 0..40 {
            app.ui.messages.push_back(Message::bot(format!("earlier {i}")));
        }
        let params = expect_query(submit(&mut app, "q"));
        app.ui.scroll_up(10);
        assert!(!app.ui.auto_scroll);

        settle(&mut app, params.request_id, Reply::Answer("a".into()));

        let ctx = default_ctx();
        let available = app
            .conversation()
            .calculate_available_height(ctx.term_width, ctx.term_height);
        assert_eq!(
            app.ui.scroll_offset,
            app.ui.calculate_max_scroll_offset(available, ctx.term_width)
        );
    }

    #[test]
    fn every_accepted_draft_adds_exactly_two_entries() {
        let mut app = create_test_app();
        let drafts = [
            "a",
            "  padded  ",
            "\tleading tab",
            "several words in one question",
            "héllo wörld",
            "日本語の質問",
            "emoji 🚀 inside",
        ];

        for (i, draft) in drafts.into_iter().enumerate() {
            let before = app.ui.messages.len();
            let params = expect_query(submit(&mut app, draft));
            assert_eq!(params.query, draft);

            let reply = if i % 2 == 0 {
                Reply::Answer(format!("answer {i}"))
            } else {
                Reply::Failure(format!("failure {i}"))
            };
            settle(&mut app, params.request_id, reply);

            assert_eq!(app.ui.messages.len(), before + 2, "draft {draft:?}");
            assert_eq!(app.ui.messages[before], Message::user(draft));
            assert!(!app.ui.is_loading);
        }
    }

    async fn round_trip(text: &str, response: StubResponse) -> Vec<Message> {
        let server = spawn_stub_server(vec![response]).await;
        let mut app = create_test_app();
        app.session.endpoint = server.url("chat");

        let (service, mut rx) = ChatRequestService::new();
        service.spawn_request(expect_query(submit(&mut app, text)));
        let (reply, request_id) = rx.recv().await.expect("reply should arrive");
        settle(&mut app, request_id, reply);
        server.finish().await;

        assert!(!app.ui.is_loading);
        app.ui.messages.iter().cloned().collect()
    }

    #[tokio::test]
    async fn hello_bot_round_trip() {
        let messages = round_trip(
            "Hello bot",
            StubResponse::json(200, r#"{"answer":"Mocked bot response"}"#),
        )
        .await;
        assert_eq!(
            messages,
            vec![
                Message::user("Hello bot"),
                Message::bot("Mocked bot response")
            ]
        );
    }

    #[tokio::test]
    async fn server_error_round_trip() {
        let messages = round_trip("X", StubResponse::json(500, r#"{"error":"bad request"}"#)).await;
        assert_eq!(
            messages,
            vec![Message::user("X"), Message::error("bad request")]
        );
    }

    #[tokio::test]
    async fn empty_answer_round_trip_uses_placeholder() {
        let messages = round_trip("X", StubResponse::json(200, "{}")).await;
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], Message::bot(NO_ANSWER_PLACEHOLDER));
    }
}
