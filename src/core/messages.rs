use crate::domain::model::{DateRangeQuery, Locale};

pub fn no_titles_in_range(locale: Locale) -> &'static str {
    match locale {
        Locale::ZhTw => "該日期區間沒有發布任何標題。",
        Locale::En => "No titles were published in that date range.",
    }
}

pub fn invalid_format(locale: Locale) -> &'static str {
    match locale {
        Locale::ZhTw => "格式錯誤，請輸入 YYYY-MM-DD 或 YYYY-MM-DD~YYYY-MM-DD",
        Locale::En => "Invalid format. Send YYYY-MM-DD or YYYY-MM-DD~YYYY-MM-DD",
    }
}

pub fn queried_range(locale: Locale, query: &DateRangeQuery) -> String {
    match (locale, query.is_single_day()) {
        (Locale::ZhTw, true) => format!("查詢日期：{}", query),
        (Locale::ZhTw, false) => format!("查詢區間：{}", query),
        (Locale::En, true) => format!("Date: {}", query),
        (Locale::En, false) => format!("Range: {}", query),
    }
}

pub fn cards_alt_text(locale: Locale, query: &DateRangeQuery, total: usize) -> String {
    match locale {
        Locale::ZhTw => format!("{} 共 {} 則公告", query, total),
        Locale::En => format!("{} announcement(s) for {}", total, query),
    }
}
