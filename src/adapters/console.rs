use crate::core::{ReplyPayload, ReplySender};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 直接印到標準輸出，用於命令列查詢
#[derive(Debug, Clone, Default)]
pub struct ConsoleReplySender;

#[async_trait]
impl ReplySender for ConsoleReplySender {
    async fn send(&self, _destination: &str, payload: &ReplyPayload) -> Result<()> {
        println!("{}", render(payload));
        Ok(())
    }
}

pub fn render(payload: &ReplyPayload) -> String {
    match payload {
        ReplyPayload::Text(text) => text.clone(),
        ReplyPayload::Cards { alt_text, cards } => {
            let mut lines = vec![alt_text.clone()];
            lines.extend(
                cards
                    .iter()
                    .map(|card| format!("[{}] {}", card.header, card.body)),
            );
            lines.join("\n")
        }
    }
}
