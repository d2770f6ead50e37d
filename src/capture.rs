//! Text capture loader: turns a line-oriented capture into [`ParameterFrame`]s.
//!
//! ## Format
//!
//! ```text
//! # engine coolant, two ECUs answering
//! param coolant_temp
//! 07E8: 7B
//! 07E9: 80
//!
//! # VIN spread over three frames of one response
//! param vin combined @Engine
//! 49 02 01 31 44 34 47
//! 50 30 30 52 35 35 42
//! 31 32 33 34 35 36
//! ```
//!
//! - `#` starts a comment; blank lines are ignored.
//! - `param <name> [separately|combined] [@source]` opens a parameter block;
//!   `@source` names the queried ECU (copied into the decoded results).
//! - `req` starts a new exchange in the current block. The first exchange is
//!   implicit, so a `req` directly after `param` opens it rather than adding
//!   another; every exchange needs at least one response.
//! - Any other line is one response: `[HEADER:] DATA`, both sides whitespace-separated
//!   hex tokens. Odd-length tokens are left-padded with `0` (`7E8` reads as `07 E8`).
//! - Within one exchange, either every response has a header or none does.

use crate::error::CaptureError;
use crate::eval::{ParameterFrame, ParseMode};
use crate::exchange::ExchangeBuilder;
use std::path::Path;

/// Parse capture text into parameter frames, in file order.
pub fn parse(source: &str) -> Result<Vec<ParameterFrame>, CaptureError> {
    let mut out = Vec::new();
    let mut current: Option<Block> = None;

    for (i, raw) in source.lines().enumerate() {
        let line_no = i + 1;
        let line = match raw.find('#') {
            Some(pos) => &raw[..pos],
            None => raw,
        }
        .trim();
        if line.is_empty() {
            continue;
        }

        let mut words = line.split_whitespace();
        match words.next() {
            Some("param") => {
                if let Some(block) = current.take() {
                    out.push(block.finish()?);
                }
                let name = words.next().ok_or(CaptureError::MissingName { line: line_no })?;
                let mut block = Block::new(name, line_no);
                for word in words {
                    match word.strip_prefix('@') {
                        Some(source) => block.frame.source_name = source.to_string(),
                        None => {
                            block.frame.mode = word.parse::<ParseMode>().map_err(|mode| {
                                CaptureError::UnknownMode { line: line_no, mode }
                            })?;
                        }
                    }
                }
                current = Some(block);
            }
            Some("req") => {
                let block = current
                    .as_mut()
                    .ok_or(CaptureError::ResponseOutsideParameter { line: line_no })?;
                block.next_exchange(line_no)?;
            }
            _ => {
                let block = current
                    .as_mut()
                    .ok_or(CaptureError::ResponseOutsideParameter { line: line_no })?;
                block.push_response(line, line_no)?;
            }
        }
    }

    if let Some(block) = current.take() {
        out.push(block.finish()?);
    }
    Ok(out)
}

/// Read and parse a capture file.
pub fn read_file(path: impl AsRef<Path>) -> Result<Vec<ParameterFrame>, CaptureError> {
    let text = std::fs::read_to_string(path)?;
    parse(&text)
}

/// Decode whitespace-separated hex tokens into bytes.
pub fn parse_hex_bytes(text: &str, line: usize) -> Result<Vec<u8>, CaptureError> {
    let mut out = Vec::new();
    for token in text.split_whitespace() {
        let padded;
        let even = if token.len() % 2 == 1 {
            padded = format!("0{}", token);
            padded.as_str()
        } else {
            token
        };
        let bytes = hex::decode(even).map_err(|_| CaptureError::InvalidHex {
            line,
            token: token.to_string(),
        })?;
        out.extend(bytes);
    }
    Ok(out)
}

struct Block {
    frame: ParameterFrame,
    pending: ExchangeBuilder,
    /// Header presence of the pending exchange, fixed by its first response.
    pending_has_header: Option<bool>,
    /// Line that opened the pending exchange.
    pending_line: usize,
    /// The pending exchange was opened by an explicit `req`.
    pending_explicit: bool,
}

impl Block {
    fn new(name: &str, line: usize) -> Self {
        Block {
            frame: ParameterFrame::new(name, ParseMode::default()),
            pending: ExchangeBuilder::new(),
            pending_has_header: None,
            pending_line: line,
            pending_explicit: false,
        }
    }

    fn push_response(&mut self, line: &str, line_no: usize) -> Result<(), CaptureError> {
        let (header, data) = match line.split_once(':') {
            Some((h, d)) => (Some(parse_hex_bytes(h, line_no)?), parse_hex_bytes(d, line_no)?),
            None => (None, parse_hex_bytes(line, line_no)?),
        };
        if data.is_empty() {
            return Err(CaptureError::EmptyResponse { line: line_no });
        }
        if header.as_ref().is_some_and(|h| h.is_empty()) {
            return Err(CaptureError::EmptyHeader { line: line_no });
        }
        let has_header = header.is_some();
        match self.pending_has_header {
            Some(expected) if expected != has_header => {
                return Err(CaptureError::MixedHeaders { line: line_no });
            }
            _ => self.pending_has_header = Some(has_header),
        }
        if let Some(h) = header {
            self.pending.push_header(h);
        }
        self.pending.push_data(data);
        Ok(())
    }

    fn next_exchange(&mut self, line_no: usize) -> Result<(), CaptureError> {
        // Only the implicit first exchange may be opened without flushing.
        if self.pending_explicit
            || self.pending.response_count() > 0
            || !self.frame.exchanges.is_empty()
        {
            self.flush()?;
        }
        self.pending_line = line_no;
        self.pending_explicit = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), CaptureError> {
        let builder = std::mem::take(&mut self.pending);
        self.pending_has_header = None;
        self.pending_explicit = false;
        let exchange = builder
            .build()
            .map_err(|_| CaptureError::EmptyExchange { line: self.pending_line })?;
        self.frame.exchanges.push(exchange);
        Ok(())
    }

    fn finish(mut self) -> Result<ParameterFrame, CaptureError> {
        self.flush()?;
        Ok(self.frame)
    }
}
