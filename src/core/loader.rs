use crate::core::query::parse_date;
use crate::core::{AnnouncementSource, ConfigProvider};
use crate::domain::model::{AnnouncementRecord, AnnouncementTable, PublishDate};
use crate::utils::error::{BotError, Result};
use regex::Regex;
use reqwest::Client;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use std::time::Duration;

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern"));
static NUMERIC_ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&#([xX][0-9a-fA-F]+|[0-9]+);").expect("entity pattern"));

/// 從遠端頁面抓取公告 JSON 並轉成公告表
pub struct HttpAnnouncementSource {
    client: Client,
    url: String,
    title_field: String,
    date_field: String,
}

impl HttpAnnouncementSource {
    pub fn new<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent())
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .build()?;

        Ok(Self {
            client,
            url: config.source_url().to_string(),
            title_field: config.title_field().to_string(),
            date_field: config.date_field().to_string(),
        })
    }

    fn fetch_error(&self, message: impl Into<String>) -> BotError {
        BotError::FetchError {
            url: self.url.clone(),
            message: message.into(),
        }
    }
}

impl AnnouncementSource for HttpAnnouncementSource {
    async fn load(&self) -> Result<AnnouncementTable> {
        tracing::info!("📡 Fetching announcements from: {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;

        let status = response.status();
        tracing::debug!("Source response status: {}", status);
        if !status.is_success() {
            return Err(self.fetch_error(format!("unexpected status {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.fetch_error(e.to_string()))?;
        tracing::debug!("Received {} bytes from source", body.len());

        let payload =
            extract_json(&body).ok_or_else(|| self.fetch_error("response body contains no JSON"))?;
        let table = parse_announcements(payload, &self.title_field, &self.date_field)?;

        let summary = table.summary();
        tracing::info!(
            "✅ Loaded {} announcements ({} with invalid dates)",
            summary.total,
            summary.invalid_dates
        );
        if summary.invalid_dates > 0 {
            tracing::warn!(
                "{} announcement(s) have unparsable dates and will never match a query",
                summary.invalid_dates
            );
        }

        Ok(table)
    }
}

/// 不管外層包了什麼標記，都試著取出 JSON 本體
pub fn extract_json(body: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str(body.trim()) {
        return Some(value);
    }

    // 頁面的純文字內容
    let text = page_text(body);
    let text = text.trim();
    if let Ok(value) = serde_json::from_str(text) {
        return Some(value);
    }

    // 最外層的 [...] 或 {...}
    let open = text.find(['[', '{'])?;
    let close_char = if text[open..].starts_with('[') { ']' } else { '}' };
    let close = text.rfind(close_char)?;
    if close <= open {
        return None;
    }
    serde_json::from_str(&text[open..=close]).ok()
}

fn page_text(html: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(html, "");
    let without_tags = TAG_RE.replace_all(&without_comments, "");
    unescape_entities(&without_tags)
}

fn unescape_entities(text: &str) -> String {
    let numeric = NUMERIC_ENTITY_RE.replace_all(text, |caps: &regex::Captures| {
        let code = &caps[1];
        let parsed = match code.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse().ok(),
        };
        parsed
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    // &amp; 最後處理，避免二次解碼
    numeric
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
}

/// 把 JSON 陣列轉成公告表。欄位整欄缺少才算錯誤；單筆缺日期會標成無效日期
pub fn parse_announcements(
    payload: Value,
    title_field: &str,
    date_field: &str,
) -> Result<AnnouncementTable> {
    let rows = match payload {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(BotError::ParseError {
                message: format!("expected an array of announcements, got {}", json_kind(&other)),
            })
        }
    };

    let objects = rows
        .into_iter()
        .enumerate()
        .map(|(index, row)| match row {
            Value::Object(obj) => Ok(obj),
            other => Err(BotError::ParseError {
                message: format!("row {} is {}, not an object", index, json_kind(&other)),
            }),
        })
        .collect::<Result<Vec<_>>>()?;

    for field in [title_field, date_field] {
        if !objects.iter().any(|obj| obj.contains_key(field)) {
            return Err(BotError::ParseError {
                message: format!("field '{}' is absent from every record", field),
            });
        }
    }

    let records = objects
        .iter()
        .map(|obj| {
            AnnouncementRecord::new(
                publish_date(obj, date_field),
                field_text(obj, title_field).unwrap_or_default(),
            )
        })
        .collect();

    Ok(AnnouncementTable::new(records))
}

fn publish_date(obj: &Map<String, Value>, date_field: &str) -> PublishDate {
    let raw = field_text(obj, date_field).unwrap_or_default();
    match parse_date(&raw) {
        Ok(date) => PublishDate::Valid(date),
        Err(_) => PublishDate::Invalid(raw),
    }
}

fn field_text(obj: &Map<String, Value>, field: &str) -> Option<String> {
    match obj.get(field)? {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        other => Some(other.to_string()),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
