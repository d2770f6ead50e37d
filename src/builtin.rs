//! Built-in decoders for common SAE J1979 parameters.
//!
//! Mode 01 decoders expect data frames with the `41 <PID>` prefix already
//! stripped (`7B` for a coolant reply `41 05 7B`). The VIN decoder accepts its
//! frames as the ECU sent them, see [`vin`].

use crate::context::EvaluationContext;
use crate::error::EvalError;
use crate::eval::DecoderRegistry;

const VIN_LEN: usize = 17;

/// Registry with every decoder in this module under its parameter name.
pub fn registry() -> DecoderRegistry {
    let mut registry = DecoderRegistry::new();
    registry.register("coolant_temp", coolant_temp);
    registry.register("engine_rpm", engine_rpm);
    registry.register("vehicle_speed", vehicle_speed);
    registry.register("monitor_status", monitor_status);
    registry.register("supported_pids", supported_pids);
    registry.register("vin", vin);
    registry
}

/// PID 05: A - 40.
pub fn coolant_temp(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let celsius = f64::from(ctx.byte(0)?) - 40.0;
    ctx.record_numerical(celsius, -40.0, 215.0, "C", "temperature")
}

/// PID 0C: (256A + B) / 4.
pub fn engine_rpm(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    if ctx.length()? < 2 {
        return Err(EvalError::script("engine_rpm needs two data bytes"));
    }
    let rpm = f64::from(ctx.data(0)?.word(0)) / 4.0;
    ctx.record_numerical(rpm, 0.0, 16383.75, "rpm", "speed")
}

/// PID 0D: A.
pub fn vehicle_speed(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let kph = f64::from(ctx.byte(0)?);
    ctx.record_numerical(kph, 0.0, 255.0, "km/h", "speed")
}

/// PID 01: A7 = MIL, A0..A6 = number of confirmed DTCs.
pub fn monitor_status(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let mil = ctx.bit(0, 7)? == 1;
    let dtc_count = f64::from(ctx.byte(0)? & 0x7F);
    ctx.record_literal(mil, "Off", "On", "mil")?;
    ctx.record_numerical(dtc_count, 0.0, 127.0, "", "dtc_count")
}

/// PIDs 00/20/40...: one request per 32-PID range, four bitmask bytes per
/// response. Counts supported PIDs over every request and response, and
/// reports whether PID 0C (engine RPM) is among them.
pub fn supported_pids(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let mut count = 0u32;
    let mut rpm_supported = false;
    for req in 0..ctx.num_req() {
        for resp in 0..ctx.num_resp(req)? {
            let bits = ctx.data_of(req, resp)?;
            for pos in 0..4 {
                for bit in 0..8 {
                    count += u32::from(bits.bit_at(pos, bit));
                }
            }
            // PID 0C of the first range: byte 1, bit 4.
            if req == 0 && bits.bit_at(1, 4) == 1 {
                rpm_supported = true;
            }
        }
    }
    let max = 32.0 * ctx.num_req() as f64;
    ctx.record_literal(rpm_supported, "No", "Yes", "engine_rpm_supported")?;
    ctx.record_numerical(f64::from(count), 0.0, max, "", "supported_count")
}

/// Mode 09 PID 02: the 17-character VIN spread over the data frames of `REQ(0)`.
///
/// A frame starting with `49 02` carries a sequence byte after it; both are
/// skipped. Other frames are continuation payload. `00` padding is dropped.
/// Recorded as the `vin` literal (its true label is the VIN).
pub fn vin(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let mut chars = String::with_capacity(VIN_LEN);
    for i in 0..ctx.num_resp(0)? {
        let bytes = ctx.data(i)?.as_bytes();
        let payload = match bytes {
            [0x49, 0x02, _, rest @ ..] => rest,
            [0x49, 0x02] => &bytes[2..],
            _ => bytes,
        };
        for &b in payload.iter().filter(|&&b| b != 0x00) {
            if !b.is_ascii_alphanumeric() {
                return Err(EvalError::script(format!(
                    "vin: byte {:02X} is not a VIN character",
                    b
                )));
            }
            chars.push(char::from(b));
        }
    }
    if chars.len() != VIN_LEN {
        return Err(EvalError::script(format!(
            "vin: expected {} characters, got {}",
            VIN_LEN,
            chars.len()
        )));
    }
    ctx.record_literal(true, "", chars, "vin")
}
