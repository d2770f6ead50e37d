//! The handle decoders read bytes through and write results into.
//!
//! ## Addressing
//!
//! | Script function | Method | Reads |
//! |-----------------|--------|-------|
//! | `REQ(n)` | [`req`](EvaluationContext::req) | exchange `n` |
//! | `NUM_REQ()` | [`num_req`](EvaluationContext::num_req) | number of exchanges |
//! | `NUM_RESP(n)` | [`num_resp`](EvaluationContext::num_resp) | data frames in exchange `n` |
//! | `HEADER(i)` | [`header`](EvaluationContext::header) | header frame `i` of exchange 0 |
//! | `DATA(i)` | [`data`](EvaluationContext::data) | data frame `i` of exchange 0 |
//! | `BYTE(p)` | [`byte`](EvaluationContext::byte) | `DATA(0)` byte `p` |
//! | `BIT(p, b)` | [`bit`](EvaluationContext::bit) | `DATA(0)` bit `b` of byte `p` |
//! | `LENGTH()` | [`length`](EvaluationContext::length) | `DATA(0)` length |
//!
//! Single-response parameters use `byte`/`bit`/`length` and never touch an
//! index. Multi-frame values walk `data(i)` up to `num_resp(0)`, and
//! multi-request parameters go through `req(n)`.
//!
//! Request/frame lookups are strict ([`IndexError`]); byte/bit reads within a
//! frame are permissive and return 0 out of range.
//!
//! ```
//! use obdscript::EvaluationContext;
//!
//! let mut ctx = EvaluationContext::new();
//! ctx.load_exchange(Vec::<Vec<u8>>::new(), vec![vec![0xAA, 0xBB]]).unwrap();
//! assert_eq!(ctx.byte(1).unwrap(), 0xBB);
//! assert_eq!(ctx.byte(5).unwrap(), 0);
//! assert_eq!(ctx.bit(0, 1).unwrap(), 1);
//! assert!(ctx.req(1).is_err());
//! ```

use crate::error::{EvalError, IndexError};
use crate::exchange::Exchange;
use crate::frame::ByteFrame;
use crate::log::ExchangeLog;
use crate::sink::ResultSink;
use crate::value::{LiteralValue, NumericalValue};
use tracing::debug;

/// Exchange log plus result sink for one evaluation at a time.
///
/// Owned by whoever drives evaluation and passed to decoders by reference.
/// Parallel evaluation needs one context per worker.
#[derive(Debug, Clone, Default)]
pub struct EvaluationContext {
    log: ExchangeLog,
    sink: ResultSink,
}

impl EvaluationContext {
    pub fn new() -> Self {
        EvaluationContext::default()
    }

    // -- loader side --

    /// Build an exchange from raw byte arrays and append it. `headers` may be
    /// empty; `data` must not be.
    pub fn load_exchange<H, D>(&mut self, headers: H, data: D) -> Result<(), EvalError>
    where
        H: IntoIterator,
        H::Item: Into<ByteFrame>,
        D: IntoIterator,
        D::Item: Into<ByteFrame>,
    {
        let exchange = Exchange::new(headers, data)?;
        self.push_exchange(exchange);
        Ok(())
    }

    pub fn push_exchange(&mut self, exchange: Exchange) {
        debug!(
            request = self.log.count(),
            headers = exchange.header_count(),
            responses = exchange.response_count(),
            "exchange loaded"
        );
        self.log.append(exchange);
    }

    /// Clear the exchange log and the result sink together.
    pub fn reset_for_next_parameter(&mut self) {
        debug!(
            requests = self.log.count(),
            literals = self.sink.literals().len(),
            numericals = self.sink.numericals().len(),
            "context reset"
        );
        self.log.clear();
        self.sink.clear();
    }

    // -- script side: request level --

    pub fn req(&self, idx: usize) -> Result<&Exchange, IndexError> {
        self.log.exchange_at(idx)
    }

    pub fn num_req(&self) -> usize {
        self.log.count()
    }

    pub fn num_resp(&self, idx: usize) -> Result<usize, IndexError> {
        Ok(self.req(idx)?.response_count())
    }

    // -- script side: frame level --

    /// Header frame `idx` of the first exchange.
    pub fn header(&self, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.header_of(0, idx)
    }

    /// Data frame `idx` of the first exchange.
    pub fn data(&self, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.data_of(0, idx)
    }

    pub fn header_of(&self, req: usize, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.req(req)?.header_frame(idx)
    }

    pub fn data_of(&self, req: usize, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.req(req)?.data_frame(idx)
    }

    // -- script side: byte level, first data frame --

    pub fn byte(&self, pos: usize) -> Result<u8, IndexError> {
        Ok(self.data(0)?.byte_at(pos))
    }

    pub fn bit(&self, pos: usize, bit: u32) -> Result<u8, IndexError> {
        Ok(self.data(0)?.bit_at(pos, bit))
    }

    pub fn length(&self) -> Result<usize, IndexError> {
        Ok(self.data(0)?.len())
    }

    // -- results --

    pub fn record_literal(
        &mut self,
        value: bool,
        value_if_false: impl Into<String>,
        value_if_true: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<(), EvalError> {
        self.sink
            .record_literal(value, value_if_false, value_if_true, property)
    }

    pub fn record_numerical(
        &mut self,
        value: f64,
        min: f64,
        max: f64,
        units: impl Into<String>,
        property: impl Into<String>,
    ) -> Result<(), EvalError> {
        self.sink.record_numerical(value, min, max, units, property)
    }

    pub fn literals(&self) -> &[LiteralValue] {
        self.sink.literals()
    }

    pub fn numericals(&self) -> &[NumericalValue] {
        self.sink.numericals()
    }

    pub fn log(&self) -> &ExchangeLog {
        &self.log
    }

    pub fn sink(&self) -> &ResultSink {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut ResultSink {
        &mut self.sink
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_context_is_strict() {
        let ctx = EvaluationContext::new();
        let missing = IndexError::Request { index: 0, count: 0 };
        assert_eq!(ctx.num_req(), 0);
        assert_eq!(ctx.byte(0), Err(missing));
        assert_eq!(ctx.length(), Err(missing));
        assert_eq!(ctx.num_resp(0), Err(missing));
    }

    #[test]
    fn load_rejects_empty_data() {
        let mut ctx = EvaluationContext::new();
        let err = ctx
            .load_exchange(vec![vec![0x07, 0xE8]], Vec::<Vec<u8>>::new())
            .unwrap_err();
        assert_eq!(err, EvalError::EmptyExchange);
        assert_eq!(ctx.num_req(), 0);
    }

    #[test]
    fn header_defaults_to_first_exchange() {
        let mut ctx = EvaluationContext::new();
        ctx.load_exchange(vec![vec![0x07, 0xE8]], vec![vec![0x01]]).unwrap();
        ctx.load_exchange(vec![vec![0x07, 0xE9]], vec![vec![0x02]]).unwrap();
        assert_eq!(ctx.header(0).unwrap().as_bytes(), &[0x07, 0xE8]);
        assert_eq!(ctx.header_of(1, 0).unwrap().as_bytes(), &[0x07, 0xE9]);
        assert_eq!(ctx.byte(0).unwrap(), 0x01);
        assert_eq!(ctx.data_of(1, 0).unwrap().byte_at(0), 0x02);
    }
}
