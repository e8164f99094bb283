pub(crate) mod add_transaction;
pub(crate) mod overview;
pub(crate) mod statistics;
pub(crate) mod transaction_list;
