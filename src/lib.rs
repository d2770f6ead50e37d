//! # obdscript — data context for OBD-II parameter decoding scripts
//!
//! Each diagnostic parameter (coolant temperature, engine RPM, VIN, ...) is
//! decoded by a small script from the raw bytes of one or more request/response
//! exchanges. This crate holds those bytes and gives scripts a fixed set of
//! accessors, then collects what the script decodes.
//!
//! ## Data model
//!
//! - [`ByteFrame`]: one header or data payload. Byte/bit reads past the end return 0.
//! - [`Exchange`]: one request round: zero or more header frames, one or more data frames.
//! - [`ExchangeLog`]: the exchanges for the parameter being evaluated, in order.
//! - [`ResultSink`]: literal and numerical records emitted by the script.
//! - [`EvaluationContext`]: log + sink, with the script accessors
//!   (`REQ`, `NUM_REQ`, `NUM_RESP`, `HEADER`, `DATA`, `BYTE`, `BIT`, `LENGTH`).
//!
//! ## Evaluation
//!
//! [`Evaluator`] runs a [`Decoder`] over a [`ParameterFrame`] in either
//! [`ParseMode`]; [`Evaluator::evaluate_batch`] isolates failures per parameter.
//! [`capture`] reads captured exchanges from text; [`builtin`] has decoders
//! for common SAE J1979 parameters.
//!
//! ## Example
//!
//! ```
//! use obdscript::{EvalError, EvaluationContext, Evaluator, Exchange, ParameterFrame, ParseMode};
//!
//! fn coolant_temp(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
//!     let celsius = f64::from(ctx.byte(0)?) - 40.0;
//!     ctx.record_numerical(celsius, -40.0, 215.0, "C", "temperature")
//! }
//!
//! let frame = ParameterFrame::new("coolant_temp", ParseMode::Separately)
//!     .with_exchange(Exchange::builder().header([0x07, 0xE8]).data([0x7B]).build().unwrap());
//!
//! let data = Evaluator::new().evaluate(&frame, &coolant_temp).unwrap();
//! assert_eq!(data[0].source_address, "07E8");
//! assert_eq!(data[0].numerical("temperature").unwrap().value, 83.0);
//! ```

pub mod builtin;
pub mod capture;
pub mod context;
pub mod dump;
pub mod error;
pub mod eval;
pub mod exchange;
pub mod frame;
pub mod log;
pub mod sink;
pub mod value;

pub use context::EvaluationContext;
pub use error::{CaptureError, EvalError, IndexError, RecordKind};
pub use eval::{
    get_eval_profile, reset_eval_profile, BatchReport, DecodeFailure, Decoder, DecoderRegistry,
    Evaluator, ParameterFrame, ParseMode,
};
pub use exchange::{Exchange, ExchangeBuilder};
pub use frame::ByteFrame;
pub use log::ExchangeLog;
pub use sink::ResultSink;
pub use value::{LiteralValue, NumericalValue, ParameterData};
