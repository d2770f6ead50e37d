//! Parameter evaluation: load captured exchanges into a context, run a decoder,
//! collect results, reset.
//!
//! ## Parse modes
//!
//! - [`ParseMode::Separately`] (default): the decoder runs once per response.
//!   Each run sees a single exchange whose only data frame is that response,
//!   so `BYTE`/`BIT`/`LENGTH` address it directly. Typical when several ECUs
//!   answer the same request.
//! - [`ParseMode::Combined`]: every exchange is loaded and the decoder runs
//!   once, walking frames with `REQ(n)` / `DATA(i)` / `NUM_RESP(n)`. Used for
//!   values split over several frames or requests (e.g. the VIN).
//!
//! ## Failure boundary
//!
//! [`Evaluator::evaluate_batch`] treats each parameter independently: an
//! error aborts that parameter only, is logged and recorded as a
//! [`DecodeFailure`], and the context is reset before the next one.

use crate::context::EvaluationContext;
use crate::error::EvalError;
use crate::exchange::Exchange;
use crate::frame::ByteFrame;
use crate::value::ParameterData;
use std::collections::HashMap;
use tracing::{debug, trace, warn};

#[cfg(feature = "eval_profile")]
use std::cell::RefCell;
#[cfg(feature = "eval_profile")]
use std::time::Instant;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    #[default]
    Separately,
    Combined,
}

impl std::str::FromStr for ParseMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "separately" => Ok(ParseMode::Separately),
            "combined" => Ok(ParseMode::Combined),
            other => Err(other.to_string()),
        }
    }
}

/// Captured data for one named parameter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterFrame {
    pub name: String,
    /// Name of the queried source (ECU address label), copied into results.
    pub source_name: String,
    pub mode: ParseMode,
    pub exchanges: Vec<Exchange>,
}

impl ParameterFrame {
    pub fn new(name: impl Into<String>, mode: ParseMode) -> Self {
        ParameterFrame {
            name: name.into(),
            mode,
            ..Default::default()
        }
    }

    pub fn with_source(mut self, source_name: impl Into<String>) -> Self {
        self.source_name = source_name.into();
        self
    }

    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchanges.push(exchange);
        self
    }
}

/// A parameter script: reads through the context, records results into it.
pub trait Decoder {
    fn decode(&self, ctx: &mut EvaluationContext) -> Result<(), EvalError>;
}

impl<F> Decoder for F
where
    F: Fn(&mut EvaluationContext) -> Result<(), EvalError>,
{
    fn decode(&self, ctx: &mut EvaluationContext) -> Result<(), EvalError> {
        self(ctx)
    }
}

/// Decoders looked up by parameter name.
#[derive(Default)]
pub struct DecoderRegistry {
    decoders: HashMap<String, Box<dyn Decoder>>,
}

impl DecoderRegistry {
    pub fn new() -> Self {
        DecoderRegistry::default()
    }

    /// Register `decoder` under `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, decoder: impl Decoder + 'static) {
        self.decoders.insert(name.into(), Box::new(decoder));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Decoder> {
        self.decoders.get(name).map(|d| d.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.decoders.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.decoders.keys().collect();
        names.sort();
        f.debug_struct("DecoderRegistry").field("decoders", &names).finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecodeFailure {
    pub param_name: String,
    pub error: EvalError,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub decoded: Vec<ParameterData>,
    pub failures: Vec<DecodeFailure>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Drives decoders against a single reusable [`EvaluationContext`].
#[derive(Debug, Default)]
pub struct Evaluator {
    ctx: EvaluationContext,
}

impl Evaluator {
    pub fn new() -> Self {
        Evaluator::default()
    }

    /// Evaluate one parameter. Returns one [`ParameterData`] per run: one per
    /// response in `Separately` mode, exactly one in `Combined` mode.
    ///
    /// The context is clean when this returns, on success or error.
    pub fn evaluate(
        &mut self,
        frame: &ParameterFrame,
        decoder: &(impl Decoder + ?Sized),
    ) -> Result<Vec<ParameterData>, EvalError> {
        #[cfg(feature = "eval_profile")]
        let _guard = ProfileGuard::new(&frame.name);

        self.ctx.reset_for_next_parameter();
        let result = match frame.mode {
            ParseMode::Separately => self.evaluate_separately(frame, decoder),
            ParseMode::Combined => self.evaluate_combined(frame, decoder),
        };
        self.ctx.reset_for_next_parameter();
        result
    }

    /// Evaluate every frame with the decoder registered under its name.
    /// Failures are collected per parameter; the batch always runs to the end.
    pub fn evaluate_batch<'a, I>(&mut self, frames: I, registry: &DecoderRegistry) -> BatchReport
    where
        I: IntoIterator<Item = &'a ParameterFrame>,
    {
        let mut report = BatchReport::default();
        for frame in frames {
            let outcome = match registry.get(&frame.name) {
                Some(decoder) => self.evaluate(frame, decoder),
                None => Err(EvalError::UnknownParameter(frame.name.clone())),
            };
            match outcome {
                Ok(mut data) => report.decoded.append(&mut data),
                Err(error) => {
                    warn!(param = %frame.name, %error, "parameter decode failed");
                    report.failures.push(DecodeFailure {
                        param_name: frame.name.clone(),
                        error,
                    });
                }
            }
        }
        debug!(
            decoded = report.decoded.len(),
            failed = report.failures.len(),
            "batch evaluated"
        );
        report
    }

    pub fn context(&self) -> &EvaluationContext {
        &self.ctx
    }

    fn evaluate_separately(
        &mut self,
        frame: &ParameterFrame,
        decoder: &(impl Decoder + ?Sized),
    ) -> Result<Vec<ParameterData>, EvalError> {
        let mut out = Vec::new();
        for (req, exchange) in frame.exchanges.iter().enumerate() {
            for (resp, data) in exchange.data().iter().enumerate() {
                trace!(param = %frame.name, req, resp, "evaluating response");
                let header = exchange.header_frame(resp).ok();
                let mut single = Exchange::builder().data(data.clone());
                if let Some(h) = header {
                    single = single.header(h.clone());
                }
                self.ctx.reset_for_next_parameter();
                self.ctx.push_exchange(single.build()?);
                decoder.decode(&mut self.ctx)?;
                out.push(self.snapshot(frame, header));
            }
        }
        Ok(out)
    }

    fn evaluate_combined(
        &mut self,
        frame: &ParameterFrame,
        decoder: &(impl Decoder + ?Sized),
    ) -> Result<Vec<ParameterData>, EvalError> {
        for exchange in &frame.exchanges {
            self.ctx.push_exchange(exchange.clone());
        }
        decoder.decode(&mut self.ctx)?;
        let header = frame
            .exchanges
            .first()
            .and_then(|ex| ex.header_frame(0).ok());
        Ok(vec![self.snapshot(frame, header)])
    }

    fn snapshot(&self, frame: &ParameterFrame, header: Option<&ByteFrame>) -> ParameterData {
        ParameterData {
            param_name: frame.name.clone(),
            source_name: frame.source_name.clone(),
            source_address: header.map(ByteFrame::to_hex_compact).unwrap_or_default(),
            literals: self.ctx.literals().to_vec(),
            numericals: self.ctx.numericals().to_vec(),
        }
    }
}

// --- Evaluation profiling (feature "eval_profile") ---
//
// With `eval_profile`, every Evaluator::evaluate call records its elapsed time
// under the parameter name. Use reset_eval_profile() before a run and
// get_eval_profile() after to get a name -> nanoseconds map.

#[cfg(feature = "eval_profile")]
thread_local!(static EVAL_PROFILE: RefCell<HashMap<String, u64>> = RefCell::new(HashMap::new()));

/// Resets accumulated per-parameter timings.
#[cfg(feature = "eval_profile")]
pub fn reset_eval_profile() {
    EVAL_PROFILE.with(|p| p.borrow_mut().clear());
}

/// Returns accumulated timings: parameter name → total nanoseconds.
#[cfg(feature = "eval_profile")]
pub fn get_eval_profile() -> HashMap<String, u64> {
    EVAL_PROFILE.with(|p| p.borrow().clone())
}

#[cfg(feature = "eval_profile")]
struct ProfileGuard {
    label: String,
    start: Instant,
}

#[cfg(feature = "eval_profile")]
impl ProfileGuard {
    fn new(label: &str) -> Self {
        Self { label: label.to_string(), start: Instant::now() }
    }
}

#[cfg(feature = "eval_profile")]
impl Drop for ProfileGuard {
    fn drop(&mut self) {
        let ns = self.start.elapsed().as_nanos() as u64;
        EVAL_PROFILE.with(|p| {
            *p.borrow_mut().entry(std::mem::take(&mut self.label)).or_insert(0) += ns;
        });
    }
}

#[cfg(not(feature = "eval_profile"))]
/// No-op when the `eval_profile` feature is not enabled.
pub fn reset_eval_profile() {}

#[cfg(not(feature = "eval_profile"))]
/// Returns an empty map when the `eval_profile` feature is not enabled.
pub fn get_eval_profile() -> HashMap<String, u64> {
    HashMap::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_mode_from_str() {
        assert_eq!("combined".parse::<ParseMode>(), Ok(ParseMode::Combined));
        assert_eq!("separately".parse::<ParseMode>(), Ok(ParseMode::Separately));
        assert!("both".parse::<ParseMode>().is_err());
    }

    fn noop(_: &mut EvaluationContext) -> Result<(), EvalError> {
        Ok(())
    }

    #[test]
    fn registry_debug_lists_sorted_names() {
        let mut reg = DecoderRegistry::new();
        reg.register("rpm", noop);
        reg.register("coolant", noop);
        assert!(reg.contains("rpm"));
        assert_eq!(reg.len(), 2);
        assert_eq!(
            format!("{:?}", reg),
            r#"DecoderRegistry { decoders: ["coolant", "rpm"] }"#
        );
    }
}
