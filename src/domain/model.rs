use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 公告的發布日期；來源無法解析的日期保留原字串，永遠不會被區間查詢命中
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PublishDate {
    Valid(NaiveDate),
    Invalid(String),
}

impl PublishDate {
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            PublishDate::Valid(date) => Some(*date),
            PublishDate::Invalid(_) => None,
        }
    }
}

impl fmt::Display for PublishDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PublishDate::Valid(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            PublishDate::Invalid(raw) => write!(f, "{}", raw),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementRecord {
    pub publish_date: PublishDate,
    pub title: String,
}

impl AnnouncementRecord {
    pub fn new(publish_date: PublishDate, title: impl Into<String>) -> Self {
        Self {
            publish_date,
            title: title.into(),
        }
    }
}

/// 啟動時載入一次的公告表，保留來源順序，載入後不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnouncementTable {
    records: Vec<AnnouncementRecord>,
}

impl AnnouncementTable {
    pub fn new(records: Vec<AnnouncementRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[AnnouncementRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn summary(&self) -> TableSummary {
        let valid: Vec<NaiveDate> = self
            .records
            .iter()
            .filter_map(|r| r.publish_date.as_date())
            .collect();

        TableSummary {
            total: self.records.len(),
            invalid_dates: self.records.len() - valid.len(),
            earliest: valid.iter().min().copied(),
            latest: valid.iter().max().copied(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSummary {
    pub total: usize,
    pub invalid_dates: usize,
    pub earliest: Option<NaiveDate>,
    pub latest: Option<NaiveDate>,
}

/// 查詢區間，兩端皆包含。只給一個日期時 `end == start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeQuery {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRangeQuery {
    pub fn new(start: NaiveDate, end: Option<NaiveDate>) -> Self {
        Self {
            start,
            end: end.unwrap_or(start),
        }
    }

    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl fmt::Display for DateRangeQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single_day() {
            write!(f, "{}", self.start.format("%Y-%m-%d"))
        } else {
            write!(
                f,
                "{} ~ {}",
                self.start.format("%Y-%m-%d"),
                self.end.format("%Y-%m-%d")
            )
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryResult {
    Empty { reason: String },
    Matches(Vec<AnnouncementRecord>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub header: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplyPayload {
    Text(String),
    Cards { alt_text: String, cards: Vec<Card> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "snake_case")]
pub enum ReplyStyle {
    #[default]
    Text,
    Cards,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Locale {
    #[default]
    #[serde(rename = "zh-tw")]
    #[cfg_attr(feature = "cli", value(name = "zh-tw"))]
    ZhTw,
    #[serde(rename = "en")]
    #[cfg_attr(feature = "cli", value(name = "en"))]
    En,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_single_date_query_collapses_end() {
        let query = DateRangeQuery::new(date(2025, 6, 5), None);
        assert_eq!(query.end, query.start);
        assert!(query.is_single_day());
        assert_eq!(query.to_string(), "2025-06-05");
    }

    #[test]
    fn test_range_contains_is_inclusive() {
        let query = DateRangeQuery::new(date(2025, 6, 1), Some(date(2025, 6, 11)));
        assert!(query.contains(date(2025, 6, 1)));
        assert!(query.contains(date(2025, 6, 11)));
        assert!(!query.contains(date(2025, 5, 31)));
        assert!(!query.contains(date(2025, 6, 12)));
        assert_eq!(query.to_string(), "2025-06-01 ~ 2025-06-11");
    }

    #[test]
    fn test_table_summary_counts_invalid_dates() {
        let table = AnnouncementTable::new(vec![
            AnnouncementRecord::new(PublishDate::Valid(date(2025, 6, 5)), "B"),
            AnnouncementRecord::new(PublishDate::Invalid("N/A".to_string()), "X"),
            AnnouncementRecord::new(PublishDate::Valid(date(2025, 6, 1)), "A"),
        ]);

        let summary = table.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.invalid_dates, 1);
        assert_eq!(summary.earliest, Some(date(2025, 6, 1)));
        assert_eq!(summary.latest, Some(date(2025, 6, 5)));
    }

    #[test]
    fn test_locale_deserializes_from_config_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            locale: Locale,
            style: ReplyStyle,
        }

        let parsed: Wrapper = toml::from_str("locale = \"en\"\nstyle = \"cards\"").unwrap();
        assert_eq!(parsed.locale, Locale::En);
        assert_eq!(parsed.style, ReplyStyle::Cards);
    }
}
