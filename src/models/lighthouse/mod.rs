pub mod category;
pub mod report;
pub mod score;

pub use category::{Categories, Category};
pub use report::{LighthouseResult, PageSpeedResponse};
pub use score::{AuditResult, CategoryScore, CategoryScoreSet, Strategy};
