use crate::core::dispatcher::{dispatch, Dispatch};
use crate::core::formatter::ReplyFormatter;
use crate::core::{AnnouncementSource, ReplySender};
use crate::domain::model::{AnnouncementTable, ReplyPayload};
use crate::utils::error::Result;
use std::sync::{Arc, PoisonError, RwLock};

/// 持有公告表快照，處理每一則使用者訊息
pub struct NoticeBot {
    table: RwLock<Arc<AnnouncementTable>>,
    formatter: ReplyFormatter,
}

impl NoticeBot {
    pub fn new(table: AnnouncementTable, formatter: ReplyFormatter) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
            formatter,
        }
    }

    /// 啟動時載入一次；失敗直接回傳給呼叫端，不重試
    pub async fn load<A: AnnouncementSource>(source: &A, formatter: ReplyFormatter) -> Result<Self> {
        let table = source.load().await?;
        Ok(Self::new(table, formatter))
    }

    /// 目前的公告表。鎖只在複製指標時持有
    pub fn snapshot(&self) -> Arc<AnnouncementTable> {
        self.table
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 整張表一次換掉，進行中的查詢仍看到舊快照
    pub fn replace_table(&self, table: AnnouncementTable) {
        let fresh = Arc::new(table);
        *self.table.write().unwrap_or_else(PoisonError::into_inner) = fresh;
    }

    pub async fn reload<A: AnnouncementSource>(&self, source: &A) -> Result<usize> {
        let table = source.load().await?;
        let count = table.len();
        self.replace_table(table);
        tracing::info!("🔄 Announcement table replaced ({} records)", count);
        Ok(count)
    }

    pub fn reply_for(&self, text: &str) -> ReplyPayload {
        let table = self.snapshot();
        match dispatch(&table, text, self.formatter.locale()) {
            Dispatch::Answered { query, result } => self.formatter.format(&result, &query),
            Dispatch::InvalidFormat => self.formatter.format_invalid(),
        }
    }

    pub async fn handle_message<R: ReplySender + ?Sized>(
        &self,
        destination: &str,
        text: &str,
        sender: &R,
    ) -> Result<ReplyPayload> {
        tracing::info!("💬 Incoming message: {:?}", text);
        let payload = self.reply_for(text);
        sender.send(destination, &payload).await?;
        tracing::debug!("Reply delivered to {}", destination);
        Ok(payload)
    }
}
