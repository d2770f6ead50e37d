//! Capture fuzz target: feed arbitrary text to the capture loader, then replay
//! whatever parsed through a decoder that probes every accessor.
//! Neither step may panic. Build with: cargo fuzz run capture_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fn probe(ctx: &mut obdscript::EvaluationContext) -> Result<(), obdscript::EvalError> {
    let len = ctx.length()?;
    let mut acc = 0u32;
    for pos in 0..len + 2 {
        acc += u32::from(ctx.byte(pos)?) + u32::from(ctx.bit(pos, (pos % 10) as u32)?);
    }
    for req in 0..ctx.num_req() + 1 {
        let _ = ctx.num_resp(req);
        let _ = ctx.header_of(req, 0);
    }
    ctx.record_numerical(f64::from(acc), 0.0, 0.0, "", "acc")
}

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(frames) = obdscript::capture::parse(s) {
        let mut evaluator = obdscript::Evaluator::new();
        for frame in &frames {
            let _ = evaluator.evaluate(frame, &probe);
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run capture_fuzz");
}
