use reqwest::StatusCode;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{ChatRequest, ChatResponse, ErrorResponse};
use crate::core::message::Message;

/// Shown as the bot's answer when a 2xx reply carries no usable `answer`.
pub const NO_ANSWER_PLACEHOLDER: &str = "Received no answer from bot.";

/// Shown when no connection to the endpoint could be made.
pub const CONNECT_FAILURE_MESSAGE: &str = "Could not connect.";

/// The settled outcome of one request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Answer(String),
    Failure(String),
}

impl Reply {
    pub fn into_message(self) -> Message {
        match self {
            Reply::Answer(text) => Message::bot(text),
            Reply::Failure(text) => Message::error(text),
        }
    }
}

/// Reduce a 2xx body to an answer. Anything that is not a JSON object with a
/// non-empty string `answer` yields the placeholder.
pub fn interpret_success(body: &[u8]) -> Reply {
    match serde_json::from_slice::<ChatResponse>(body) {
        Ok(response) => match response.answer_text() {
            Some(answer) => Reply::Answer(answer.to_string()),
            None => Reply::Answer(NO_ANSWER_PLACEHOLDER.to_string()),
        },
        Err(err) => {
            debug!(error = %err, "success body was not a JSON object");
            Reply::Answer(NO_ANSWER_PLACEHOLDER.to_string())
        }
    }
}

/// Reduce a non-2xx reply to the text shown in the transcript.
pub fn interpret_failure(status: StatusCode, body: &[u8]) -> Reply {
    let fallback = status_error_text(status);
    let text = match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(response) => response
            .error_text()
            .map(str::to_owned)
            .unwrap_or(fallback),
        Err(err) => {
            debug!(status = status.as_u16(), error = %err, "error body was not decodable");
            fallback
        }
    };
    Reply::Failure(text)
}

pub fn status_error_text(status: StatusCode) -> String {
    format!("HTTP error! Status: {}", status.as_u16())
}

/// Connection failures get a fixed message. Other transport errors show
/// reqwest's summary followed by the innermost cause, which is where the
/// useful detail lives.
pub fn describe_transport_error(err: &reqwest::Error) -> String {
    if err.is_connect() {
        return CONNECT_FAILURE_MESSAGE.to_string();
    }

    let summary = err.to_string();
    let mut cause = std::error::Error::source(err);
    let mut innermost = None;
    while let Some(source) = cause {
        innermost = Some(source);
        cause = source.source();
    }

    match innermost.map(|source| source.to_string()) {
        Some(detail) if !detail.trim().is_empty() => format!("{summary}: {detail}"),
        _ => summary,
    }
}

/// Perform the single POST and classify its settlement. Never fails: every
/// outcome is folded into a [`Reply`].
pub async fn send_query(client: &reqwest::Client, endpoint: &str, query: String) -> Reply {
    let request = ChatRequest { query };

    let response = match client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .json(&request)
        .send()
        .await
    {
        Ok(response) => response,
        Err(err) => {
            warn!(endpoint, error = %err, "chat request failed before a response arrived");
            return Reply::Failure(describe_transport_error(&err));
        }
    };

    let status = response.status();
    let body = match response.bytes().await {
        Ok(body) => body,
        Err(err) => {
            warn!(endpoint, status = status.as_u16(), error = %err, "failed to read response body");
            return Reply::Failure(describe_transport_error(&err));
        }
    };

    if status.is_success() {
        debug!(status = status.as_u16(), bytes = body.len(), "chat request succeeded");
        interpret_success(&body)
    } else {
        let reply = interpret_failure(status, &body);
        warn!(status = status.as_u16(), ?reply, "chat request returned an error status");
        reply
    }
}

pub struct RequestParams {
    pub client: reqwest::Client,
    pub endpoint: String,
    pub query: String,
    pub request_id: u64,
}

/// Runs requests on the runtime and reports each settlement, tagged with the
/// id it was issued under, over an unbounded channel.
#[derive(Clone)]
pub struct ChatRequestService {
    tx: mpsc::UnboundedSender<(Reply, u64)>,
}

impl ChatRequestService {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<(Reply, u64)>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    pub fn spawn_request(&self, params: RequestParams) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let RequestParams {
                client,
                endpoint,
                query,
                request_id,
            } = params;

            let reply = send_query(&client, &endpoint, query).await;
            let _ = tx.send((reply, request_id));
        });
    }

    #[cfg(test)]
    pub fn send_for_test(&self, reply: Reply, request_id: u64) {
        let _ = self.tx.send((reply, request_id));
    }
}
