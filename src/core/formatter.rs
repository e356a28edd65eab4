use crate::core::messages;
use crate::domain::model::{
    AnnouncementRecord, Card, DateRangeQuery, Locale, QueryResult, ReplyPayload, ReplyStyle,
};

/// 訊息平台輪播最多只能放 10 張卡片
pub const MAX_CAROUSEL_CARDS: usize = 10;

/// 純粹的呈現轉換：不篩選、不排序
#[derive(Debug, Clone, Copy)]
pub struct ReplyFormatter {
    style: ReplyStyle,
    locale: Locale,
    max_cards: usize,
}

impl ReplyFormatter {
    pub fn new(style: ReplyStyle, locale: Locale) -> Self {
        Self {
            style,
            locale,
            max_cards: MAX_CAROUSEL_CARDS,
        }
    }

    /// 只能調低卡片上限，不能超過平台限制
    pub fn with_max_cards(mut self, max_cards: usize) -> Self {
        self.max_cards = max_cards.clamp(1, MAX_CAROUSEL_CARDS);
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn format(&self, result: &QueryResult, query: &DateRangeQuery) -> ReplyPayload {
        match result {
            QueryResult::Empty { reason } => ReplyPayload::Text(format!(
                "{}\n{}",
                messages::queried_range(self.locale, query),
                reason
            )),
            QueryResult::Matches(records) => match self.style {
                ReplyStyle::Text => ReplyPayload::Text(plain_text(records)),
                ReplyStyle::Cards => ReplyPayload::Cards {
                    alt_text: messages::cards_alt_text(self.locale, query, records.len()),
                    cards: records
                        .iter()
                        .take(self.max_cards)
                        .map(|record| Card {
                            header: record.publish_date.to_string(),
                            body: record.title.clone(),
                        })
                        .collect(),
                },
            },
        }
    }

    pub fn format_invalid(&self) -> ReplyPayload {
        ReplyPayload::Text(messages::invalid_format(self.locale).to_string())
    }
}

fn plain_text(records: &[AnnouncementRecord]) -> String {
    records
        .iter()
        .map(|record| format!("{}：{}", record.publish_date, record.title))
        .collect::<Vec<_>>()
        .join("\n\n")
}
