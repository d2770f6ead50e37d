//! One request/response round: optional header frames plus one or more data frames.
//!
//! Several data frames appear when more than one device answers, or when a
//! parameter's value is split over multiple response frames.

use crate::error::{EvalError, IndexError};
use crate::frame::ByteFrame;

/// A completed exchange. Built through [`ExchangeBuilder`] (or [`Exchange::new`]),
/// then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    headers: Vec<ByteFrame>,
    data: Vec<ByteFrame>,
}

impl Exchange {
    /// Build an exchange in one step. Fails with [`EvalError::EmptyExchange`]
    /// when `data` yields no frames.
    pub fn new<H, D>(headers: H, data: D) -> Result<Self, EvalError>
    where
        H: IntoIterator,
        H::Item: Into<ByteFrame>,
        D: IntoIterator,
        D::Item: Into<ByteFrame>,
    {
        let mut builder = ExchangeBuilder::new();
        for h in headers {
            builder.push_header(h);
        }
        for d in data {
            builder.push_data(d);
        }
        builder.build()
    }

    pub fn builder() -> ExchangeBuilder {
        ExchangeBuilder::new()
    }

    /// Header frame at `idx`. Header presence depends on the protocol, so check
    /// [`has_headers`](Self::has_headers) first when it may be absent.
    pub fn header_frame(&self, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.headers.get(idx).ok_or(IndexError::Header {
            index: idx,
            count: self.headers.len(),
        })
    }

    pub fn data_frame(&self, idx: usize) -> Result<&ByteFrame, IndexError> {
        self.data.get(idx).ok_or(IndexError::Data {
            index: idx,
            count: self.data.len(),
        })
    }

    /// Number of data frames in this exchange.
    pub fn response_count(&self) -> usize {
        self.data.len()
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn has_headers(&self) -> bool {
        !self.headers.is_empty()
    }

    pub fn headers(&self) -> &[ByteFrame] {
        &self.headers
    }

    pub fn data(&self) -> &[ByteFrame] {
        &self.data
    }
}

/// First phase of exchange construction: frames are appended, then
/// [`build`](Self::build) freezes them into an [`Exchange`].
#[derive(Debug, Default)]
pub struct ExchangeBuilder {
    headers: Vec<ByteFrame>,
    data: Vec<ByteFrame>,
}

impl ExchangeBuilder {
    pub fn new() -> Self {
        ExchangeBuilder::default()
    }

    pub fn push_header(&mut self, frame: impl Into<ByteFrame>) -> &mut Self {
        self.headers.push(frame.into());
        self
    }

    pub fn push_data(&mut self, frame: impl Into<ByteFrame>) -> &mut Self {
        self.data.push(frame.into());
        self
    }

    pub fn header(mut self, frame: impl Into<ByteFrame>) -> Self {
        self.push_header(frame);
        self
    }

    pub fn data(mut self, frame: impl Into<ByteFrame>) -> Self {
        self.push_data(frame);
        self
    }

    pub fn response_count(&self) -> usize {
        self.data.len()
    }

    pub fn build(self) -> Result<Exchange, EvalError> {
        if self.data.is_empty() {
            return Err(EvalError::EmptyExchange);
        }
        Ok(Exchange {
            headers: self.headers,
            data: self.data,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_requires_data() {
        let err = Exchange::builder().header([0x07, 0xE8]).build().unwrap_err();
        assert_eq!(err, EvalError::EmptyExchange);
    }

    #[test]
    fn headers_are_optional() {
        let ex = Exchange::new(Vec::<Vec<u8>>::new(), vec![vec![0x7B]]).expect("exchange");
        assert!(!ex.has_headers());
        assert_eq!(ex.response_count(), 1);
        assert_eq!(
            ex.header_frame(0).unwrap_err(),
            IndexError::Header { index: 0, count: 0 }
        );
    }

    #[test]
    fn frames_keep_insertion_order() {
        let ex = Exchange::builder()
            .header([0x07, 0xE8])
            .header([0x07, 0xE9])
            .data([0x01])
            .data([0x02])
            .build()
            .expect("exchange");
        assert_eq!(ex.header_frame(1).unwrap().as_bytes(), &[0x07, 0xE9]);
        assert_eq!(ex.data_frame(1).unwrap().byte_at(0), 0x02);
        assert_eq!(
            ex.data_frame(2).unwrap_err(),
            IndexError::Data { index: 2, count: 2 }
        );
    }
}
