mod category;
mod period;
mod transaction;

pub(crate) use category::{cycle_category, find_category};
pub(crate) use period::StatisticsPeriod;
pub(crate) use transaction::{local_from_millis, Transaction, TransactionType};
