use crate::core::messages;
use crate::domain::model::{AnnouncementTable, DateRangeQuery, Locale, QueryResult};
use crate::utils::error::{BotError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"];

// %.f 的小數秒可有可無
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%Y/%m/%dT%H:%M:%S%.f",
];

/// 把使用者或來源資料的日期字串轉成日曆日期；時間部分會被捨棄
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let text = input.trim();

    // 沒有分隔符的 YYYYMMDD
    if !text.is_empty() && text.chars().all(|c| c.is_ascii_digit()) {
        return compact_date(text).ok_or_else(|| BotError::DateParseError {
            input: input.to_string(),
        });
    }

    // 只接受西元四位數年份；民國年 (114/06/05) 會被 %Y 當成 0114 年
    if text.chars().take_while(|c| c.is_ascii_digit()).count() != 4 {
        return Err(BotError::DateParseError {
            input: input.to_string(),
        });
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return Ok(date);
        }
    }

    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(datetime.date());
        }
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(text) {
        return Ok(datetime.date_naive());
    }

    Err(BotError::DateParseError {
        input: input.to_string(),
    })
}

fn compact_date(digits: &str) -> Option<NaiveDate> {
    if digits.len() != 8 {
        return None;
    }
    let year = digits[0..4].parse().ok()?;
    let month = digits[4..6].parse().ok()?;
    let day = digits[6..8].parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}

/// 解析使用者輸入並查詢；沒有結束日期時視為單日查詢
pub fn query(
    table: &AnnouncementTable,
    start_text: &str,
    end_text: Option<&str>,
    locale: Locale,
) -> Result<QueryResult> {
    let range = parse_range(start_text, end_text)?;
    Ok(run_query(table, &range, locale))
}

/// 起訖日期轉成查詢區間；結束日期缺少或為空白時等於起始日期
pub fn parse_range(start_text: &str, end_text: Option<&str>) -> Result<DateRangeQuery> {
    let start = parse_date(start_text)?;
    let end = end_text
        .filter(|text| !text.trim().is_empty())
        .map(parse_date)
        .transpose()?;
    Ok(DateRangeQuery::new(start, end))
}

/// 兩端包含的區間篩選。start > end 時照字面執行，結果自然為空
pub fn run_query(table: &AnnouncementTable, range: &DateRangeQuery, locale: Locale) -> QueryResult {
    let matches: Vec<_> = table
        .records()
        .iter()
        .filter(|record| {
            record
                .publish_date
                .as_date()
                .is_some_and(|date| range.contains(date))
        })
        .cloned()
        .collect();

    tracing::debug!("Query {} matched {} record(s)", range, matches.len());

    if matches.is_empty() {
        QueryResult::Empty {
            reason: messages::no_titles_in_range(locale).to_string(),
        }
    } else {
        QueryResult::Matches(matches)
    }
}
