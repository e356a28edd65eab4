pub mod bot;
pub mod dispatcher;
pub mod formatter;
pub mod loader;
pub mod messages;
pub mod query;

pub use crate::domain::model::{
    AnnouncementRecord, AnnouncementTable, DateRangeQuery, QueryResult, ReplyPayload,
};
pub use crate::domain::ports::{AnnouncementSource, ConfigProvider, ReplySender};
pub use crate::utils::error::Result;
