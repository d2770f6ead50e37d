//! Ordered, append-only log of the exchanges for the parameter being evaluated.

use crate::error::IndexError;
use crate::exchange::Exchange;

/// Exchanges in insertion order; index 0 is the primary request that the
/// unindexed accessors default to. Cleared between parameters and reused, so
/// the backing allocation survives across evaluations.
#[derive(Debug, Clone, Default)]
pub struct ExchangeLog {
    exchanges: Vec<Exchange>,
}

impl ExchangeLog {
    pub fn new() -> Self {
        ExchangeLog::default()
    }

    pub fn append(&mut self, exchange: Exchange) {
        self.exchanges.push(exchange);
    }

    /// Exchange at request index `idx`. An index past the end is a mismatch
    /// between the parameter definition and the captured data.
    pub fn exchange_at(&self, idx: usize) -> Result<&Exchange, IndexError> {
        self.exchanges.get(idx).ok_or(IndexError::Request {
            index: idx,
            count: self.exchanges.len(),
        })
    }

    pub fn count(&self) -> usize {
        self.exchanges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exchanges.is_empty()
    }

    pub fn clear(&mut self) {
        self.exchanges.clear();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Exchange> {
        self.exchanges.iter()
    }
}

impl<'a> IntoIterator for &'a ExchangeLog {
    type Item = &'a Exchange;
    type IntoIter = std::slice::Iter<'a, Exchange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single(byte: u8) -> Exchange {
        Exchange::builder().data([byte]).build().expect("exchange")
    }

    #[test]
    fn append_and_index() {
        let mut log = ExchangeLog::new();
        log.append(single(1));
        log.append(single(2));
        assert_eq!(log.count(), 2);
        assert_eq!(log.exchange_at(1).unwrap().data_frame(0).unwrap().byte_at(0), 2);
        assert_eq!(
            log.exchange_at(2).unwrap_err(),
            IndexError::Request { index: 2, count: 2 }
        );
    }

    #[test]
    fn clear_is_idempotent() {
        let mut log = ExchangeLog::new();
        log.append(single(1));
        log.clear();
        log.clear();
        assert!(log.is_empty());
        assert!(log.exchange_at(0).is_err());
    }
}
