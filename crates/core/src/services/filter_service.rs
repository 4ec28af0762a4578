use crate::models::transaction::{Transaction, TransactionFilter};

/// Partitions the transaction list into the all / income / expense views.
///
/// Order-preserving and side-effect free, so applying the same filter twice
/// gives the same list.
pub struct FilterService;

impl FilterService {
    pub fn new() -> Self {
        Self
    }

    pub fn apply<'a>(
        &self,
        transactions: &'a [Transaction],
        filter: TransactionFilter,
    ) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| filter.matches(t)).collect()
    }

    /// Same as `apply`, but returns owned transactions.
    pub fn apply_owned(
        &self,
        transactions: &[Transaction],
        filter: TransactionFilter,
    ) -> Vec<Transaction> {
        self.apply(transactions, filter).into_iter().cloned().collect()
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}
