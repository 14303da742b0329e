//! Fulfillment code hooks invoked by the intent-resolution backend.
//!
//! A hook receives the session state of an intent that is ready to be
//! fulfilled and answers with a closing dialog action plus the message the
//! user should see.

use std::collections::BTreeMap;

use tracing::info;

use lexbridge_types::fulfillment::{CodeHookEvent, CodeHookResponse};
use lexbridge_types::intent::{DialogAction, Intent, ResponseMessage, SessionState, UNKNOWN_INTENT};

/// Reply sent when a booking is handed to a human agent.
pub const BOOKING_HANDOFF_MESSAGE: &str = "This request has been forwarded to a hotel agent.";

/// Session attributes marking the conversation for human handoff.
pub fn escalate_to_human() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("handoff".to_string(), "human".to_string()),
        ("handoffReason".to_string(), "booking".to_string()),
    ])
}

/// Close the event's intent as fulfilled with a single plain-text message.
///
/// Session attributes from the event are kept; `attributes` override them
/// key by key.
pub fn close_intent(
    event: &CodeHookEvent,
    message: &str,
    attributes: BTreeMap<String, String>,
) -> CodeHookResponse {
    let name = event
        .session_state
        .intent
        .as_ref()
        .and_then(|i| i.name.clone())
        .unwrap_or_else(|| UNKNOWN_INTENT.to_string());

    let mut session_attributes = event.session_state.session_attributes.clone();
    session_attributes.extend(attributes);

    CodeHookResponse {
        session_state: SessionState {
            dialog_action: Some(DialogAction {
                kind: "Close".to_string(),
            }),
            intent: Some(Intent {
                name: Some(name),
                state: Some("Fulfilled".to_string()),
            }),
            session_attributes,
        },
        messages: vec![ResponseMessage::plain_text(message)],
    }
}

/// `BookRoom` fulfillment: bookings are not automated, so the request is
/// closed and flagged for a human agent.
pub fn book_room(event: &CodeHookEvent) -> CodeHookResponse {
    info!(
        session_id = event.session_id.as_deref().unwrap_or_default(),
        transcript = event.input_transcript.as_deref().unwrap_or_default(),
        "book-room invoked"
    );

    close_intent(event, BOOKING_HANDOFF_MESSAGE, escalate_to_human())
}
