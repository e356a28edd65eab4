use crate::core::query::{parse_range, run_query};
use crate::domain::model::{AnnouncementTable, DateRangeQuery, Locale, QueryResult};
use crate::utils::error::Result;

pub const RANGE_DELIMITER: char = '~';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    Answered {
        query: DateRangeQuery,
        result: QueryResult,
    },
    InvalidFormat,
}

/// 把使用者文字轉成查詢。任何失敗都收斂成單一的格式錯誤，細節只寫進日誌
pub fn dispatch(table: &AnnouncementTable, raw_text: &str, locale: Locale) -> Dispatch {
    match parse_request(raw_text) {
        Ok(query) => Dispatch::Answered {
            result: run_query(table, &query, locale),
            query,
        },
        Err(e) => {
            tracing::debug!("Rejected message {:?}: {}", raw_text, e);
            Dispatch::InvalidFormat
        }
    }
}

fn parse_request(raw_text: &str) -> Result<DateRangeQuery> {
    let (start_text, end_text) = match raw_text.split_once(RANGE_DELIMITER) {
        Some((start, end)) => (start.trim(), Some(end.trim())),
        None => (raw_text.trim(), None),
    };

    parse_range(start_text, end_text)
}
