use anyhow::Result;
use httpmock::prelude::*;
use notice_bot::core::ReplyPayload;
use notice_bot::domain::model::{AnnouncementRecord, AnnouncementTable, Locale, PublishDate, ReplyStyle};
use notice_bot::{BotError, LineConfig, LineReplySender, NoticeBot, ReplyFormatter};
use chrono::NaiveDate;
use std::time::Duration;

fn line_config(server: &MockServer) -> LineConfig {
    LineConfig {
        channel_access_token: "test-channel-token".to_string(),
        api_base: server.base_url(),
        timeout_seconds: 1,
    }
}

fn bot(style: ReplyStyle) -> NoticeBot {
    let day = |d| NaiveDate::from_ymd_opt(2025, 6, d).unwrap();
    let table = AnnouncementTable::new(vec![
        AnnouncementRecord::new(PublishDate::Valid(day(1)), "A"),
        AnnouncementRecord::new(PublishDate::Valid(day(5)), "B"),
    ]);
    NoticeBot::new(table, ReplyFormatter::new(style, Locale::ZhTw))
}

/// 文字回覆會帶著 reply token 與 bearer 金鑰送到 LINE
#[tokio::test]
async fn test_text_reply_is_posted_with_bearer_token() -> Result<()> {
    let server = MockServer::start();
    let reply_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/bot/message/reply")
            .header("Authorization", "Bearer test-channel-token")
            .json_body(serde_json::json!({
                "replyToken": "reply-token-abc",
                "messages": [{"type": "text", "text": "2025-06-05：B"}]
            }));
        then.status(200).json_body(serde_json::json!({}));
    });

    let sender = LineReplySender::new(&line_config(&server))?;
    let payload = bot(ReplyStyle::Text)
        .handle_message("reply-token-abc", "2025-06-05", &sender)
        .await?;

    reply_mock.assert();
    assert_eq!(payload, ReplyPayload::Text("2025-06-05：B".to_string()));
    Ok(())
}

#[tokio::test]
async fn test_card_reply_is_posted_as_flex_carousel() -> Result<()> {
    let server = MockServer::start();
    let reply_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v2/bot/message/reply")
            .body_contains("\"carousel\"")
            .body_contains("2025-06-01");
        then.status(200).json_body(serde_json::json!({}));
    });

    let sender = LineReplySender::new(&line_config(&server))?;
    bot(ReplyStyle::Cards)
        .handle_message("reply-token-abc", "2025-06-01~2025-06-05", &sender)
        .await?;

    reply_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_rejected_reply_is_delivery_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/bot/message/reply");
        then.status(400)
            .json_body(serde_json::json!({"message": "Invalid reply token"}));
    });

    let sender = LineReplySender::new(&line_config(&server)).unwrap();
    let err = bot(ReplyStyle::Text)
        .handle_message("expired-token", "2025-06-05", &sender)
        .await
        .unwrap_err();

    match err {
        BotError::DeliveryError { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("Invalid reply token"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// LINE 沒有回應時不會一直卡住
#[tokio::test]
async fn test_stalled_reply_api_times_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v2/bot/message/reply");
        then.status(200)
            .delay(Duration::from_secs(5))
            .json_body(serde_json::json!({}));
    });

    let sender = LineReplySender::new(&line_config(&server)).unwrap();
    let err = bot(ReplyStyle::Text)
        .handle_message("reply-token-abc", "2025-06-05", &sender)
        .await
        .unwrap_err();

    match err {
        BotError::ApiError(e) => assert!(e.is_timeout(), "{e}"),
        other => panic!("unexpected error: {other:?}"),
    }
}
