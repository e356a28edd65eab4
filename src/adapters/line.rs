use crate::config::line::LineConfig;
use crate::core::{ReplyPayload, ReplySender};
use crate::domain::model::Card;
use crate::utils::error::{BotError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

pub const REPLY_PATH: &str = "/v2/bot/message/reply";
const MAX_TEXT_CHARS: usize = 5000;
const MAX_ALT_TEXT_CHARS: usize = 400;

/// LINE Messaging API 的回覆端點
pub struct LineReplySender {
    client: Client,
    endpoint: String,
    channel_access_token: String,
}

impl LineReplySender {
    pub fn new(config: &LineConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}{}", config.api_base.trim_end_matches('/'), REPLY_PATH),
            channel_access_token: config.channel_access_token.clone(),
        })
    }
}

#[async_trait]
impl ReplySender for LineReplySender {
    async fn send(&self, destination: &str, payload: &ReplyPayload) -> Result<()> {
        let body = json!({
            "replyToken": destination,
            "messages": [line_message(payload)],
        });

        tracing::debug!("Posting reply to: {}", self.endpoint);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.channel_access_token)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("LINE reply rejected ({}): {}", status, message);
            return Err(BotError::DeliveryError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// 文字訊息或 flex 輪播
pub fn line_message(payload: &ReplyPayload) -> Value {
    match payload {
        ReplyPayload::Text(text) => json!({
            "type": "text",
            "text": truncate_chars(text, MAX_TEXT_CHARS),
        }),
        ReplyPayload::Cards { alt_text, cards } => json!({
            "type": "flex",
            "altText": truncate_chars(alt_text, MAX_ALT_TEXT_CHARS),
            "contents": {
                "type": "carousel",
                "contents": cards.iter().map(bubble).collect::<Vec<_>>(),
            },
        }),
    }
}

fn bubble(card: &Card) -> Value {
    json!({
        "type": "bubble",
        "size": "kilo",
        "body": {
            "type": "box",
            "layout": "vertical",
            "spacing": "sm",
            "contents": [
                {
                    "type": "text",
                    "text": card.header,
                    "size": "xs",
                    "color": "#8c8c8c",
                },
                {
                    "type": "text",
                    "text": card.body,
                    "weight": "bold",
                    "size": "sm",
                    "wrap": true,
                },
            ],
        },
    })
}

fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut truncated: String = text.chars().take(max - 1).collect();
    truncated.push('…');
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_message_is_truncated() {
        let long = "公".repeat(MAX_TEXT_CHARS + 10);
        let message = line_message(&ReplyPayload::Text(long));

        let text = message["text"].as_str().unwrap();
        assert_eq!(text.chars().count(), MAX_TEXT_CHARS);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn test_cards_become_carousel_bubbles() {
        let payload = ReplyPayload::Cards {
            alt_text: "2025-06-01 共 1 則公告".to_string(),
            cards: vec![Card {
                header: "2025-06-01".to_string(),
                body: "食品回收公告".to_string(),
            }],
        };

        let message = line_message(&payload);
        assert_eq!(message["type"], "flex");
        assert_eq!(message["contents"]["type"], "carousel");

        let bubbles = message["contents"]["contents"].as_array().unwrap();
        assert_eq!(bubbles.len(), 1);
        assert_eq!(bubbles[0]["body"]["contents"][0]["text"], "2025-06-01");
        assert_eq!(bubbles[0]["body"]["contents"][1]["text"], "食品回收公告");
    }

    #[test]
    fn test_endpoint_joins_base_without_double_slash() {
        let config = LineConfig {
            channel_access_token: "token".to_string(),
            api_base: "https://api.line.me/".to_string(),
            timeout_seconds: 10,
        };
        let sender = LineReplySender::new(&config).unwrap();
        assert_eq!(sender.endpoint, "https://api.line.me/v2/bot/message/reply");
    }
}
