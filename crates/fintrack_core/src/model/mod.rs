mod bucket;
mod budget;
mod health;
mod ids;
mod prediction;
mod stats;
mod transaction;

pub use bucket::{BucketMetric, CategoryTotal, PeriodBucket, metric_series};
pub use budget::{BudgetLine, BudgetReport, BudgetRollup, BudgetStatus};
pub use health::{HealthGrade, HealthScore};
pub use ids::{CategoryId, TransactionId};
pub use prediction::{ForecastModel, Prediction};
pub use stats::{TrendDirection, TrendStats};
pub use transaction::{Category, CategoryKind, Transaction, TransactionKind};
