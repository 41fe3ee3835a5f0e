//! Integration tests for [`wbot_telegram::TelegramUpdateSource`] against a mockito Bot API.
//!
//! Teloxide request path format is `/bot<token>/<Method>` (PascalCase method name, e.g. `GetUpdates`);
//! every method is a POST with a JSON body.

use mockito::Matcher;
use serde_json::json;
use wbot_core::{ConversationId, Keyboard, Payload, ReplyCommand, Update, UpdateId, UpdateSource};
use wbot_telegram::{TelegramConfig, TelegramUpdateSource};

const TEST_BOT_TOKEN: &str = "test_bot_token_12345";

fn source_for(server: &mockito::ServerGuard) -> TelegramUpdateSource {
    let mut config = TelegramConfig::with_token(TEST_BOT_TOKEN.to_string());
    config.telegram_api_url = Some(server.url());
    TelegramUpdateSource::new(config.build_bot().expect("bot builds"), 0)
}

fn text_update(update_id: i64, chat_id: i64, text: &str) -> serde_json::Value {
    json!({
        "update_id": update_id,
        "message": {
            "message_id": update_id,
            "date": 1706529600,
            "chat": {"id": chat_id, "type": "private", "first_name": "Test"},
            "from": {"id": chat_id, "is_bot": false, "first_name": "Test"},
            "text": text
        }
    })
}

/// **Test: fetch passes the cursor as offset and returns core updates sorted by id.**
///
/// **Setup:** Mock getUpdates expecting `offset: 42`, returning ids 44 then 43 (out of order) and a
/// non-message update 45.
/// **Action:** `fetch(Some(UpdateId(42)))`.
/// **Expected:** Three updates in ascending id order; 45 is `Update::other`.
#[tokio::test]
async fn test_fetch_with_cursor() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/bot{}/GetUpdates", TEST_BOT_TOKEN);
    let mock = server
        .mock("POST", path.as_str())
        .match_body(Matcher::PartialJson(json!({"offset": 42})))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "ok": true,
                "result": [
                    text_update(44, 7, "London"),
                    text_update(43, 7, "/weather"),
                    {"update_id": 45, "edited_message": {
                        "message_id": 3, "date": 1706529600, "edit_date": 1706529601,
                        "chat": {"id": 7, "type": "private", "first_name": "Test"},
                        "text": "edited"
                    }}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let updates = source_for(&server)
        .fetch(Some(UpdateId(42)))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        updates,
        vec![
            Update::message(43, 7, Payload::text("/weather")),
            Update::message(44, 7, Payload::text("London")),
            Update::other(45),
        ]
    );
}

/// **Test: Bot API error (ok=false) surfaces as a transport error.**
#[tokio::test]
async fn test_fetch_api_error() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/bot{}/GetUpdates", TEST_BOT_TOKEN);
    server
        .mock("POST", path.as_str())
        .with_status(409)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"ok": false, "error_code": 409, "description": "Conflict: terminated by other getUpdates request"}"#,
        )
        .create_async()
        .await;

    let result = source_for(&server).fetch(None).await;

    assert!(matches!(result, Err(wbot_core::WbotError::Transport(_))));
}

/// **Test: send posts chat id, text and a one-time keyboard with a location request.**
#[tokio::test]
async fn test_send_with_keyboard() {
    let mut server = mockito::Server::new_async().await;
    let path = format!("/bot{}/SendMessage", TEST_BOT_TOKEN);
    let mock = server
        .mock("POST", path.as_str())
        .match_body(Matcher::PartialJson(json!({
            "chat_id": 7,
            "text": "Select a city",
            "reply_markup": {
                "keyboard": [
                    [{"text": "London"}],
                    [{"text": "Share Location", "request_location": true}],
                    [{"text": "/end"}]
                ],
                "one_time_keyboard": true
            }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
            "ok": true,
            "result": {
                "message_id": 1,
                "date": 1706529600,
                "chat": {"id": 7, "type": "private", "first_name": "Test"},
                "from": {"id": 123456789, "is_bot": true, "first_name": "WeatherBot", "username": "weatherbot"},
                "text": "Select a city"
            }
        }"#,
        )
        .create_async()
        .await;

    let reply = ReplyCommand::text(ConversationId(7), "Select a city").with_keyboard(
        Keyboard::from_labels(["London"])
            .location_button("Share Location")
            .button("/end"),
    );
    source_for(&server).send(&reply).await.unwrap();

    mock.assert_async().await;
}
