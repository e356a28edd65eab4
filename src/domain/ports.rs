use crate::domain::model::{AnnouncementTable, Locale, ReplyPayload, ReplyStyle};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait AnnouncementSource: Send + Sync {
    fn load(&self) -> impl std::future::Future<Output = Result<AnnouncementTable>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn title_field(&self) -> &str;
    fn date_field(&self) -> &str;
    fn reply_style(&self) -> ReplyStyle;
    fn locale(&self) -> Locale;
    fn max_cards(&self) -> usize;
}

/// 把回覆交給外部訊息平台；`destination` 是 reply token 或頻道識別
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn send(&self, destination: &str, payload: &ReplyPayload) -> Result<()>;
}
