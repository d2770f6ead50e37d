//! Benchmark: cost of the script accessors and of evaluating a batch of
//! parameters against one reused context (reset between parameters).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use obdscript::{
    DecoderRegistry, EvalError, EvaluationContext, Evaluator, Exchange, ParameterFrame, ParseMode,
};
#[cfg(feature = "eval_profile")]
use obdscript::{get_eval_profile, reset_eval_profile};

fn engine_rpm(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let rpm = f64::from(ctx.data(0)?.word(0)) / 4.0;
    ctx.record_numerical(rpm, 0.0, 16383.75, "rpm", "speed")
}

fn sum_frames(ctx: &mut EvaluationContext) -> Result<(), EvalError> {
    let mut total = 0u32;
    for req in 0..ctx.num_req() {
        for resp in 0..ctx.num_resp(req)? {
            let frame = ctx.data_of(req, resp)?;
            for pos in 0..frame.len() {
                total += u32::from(frame.byte_at(pos));
            }
        }
    }
    ctx.record_numerical(f64::from(total), 0.0, f64::MAX, "", "sum")
}

fn batch() -> Vec<ParameterFrame> {
    let mut frames = Vec::new();
    for i in 0..64u8 {
        let ex = Exchange::builder()
            .header([0x07, 0xE8])
            .header([0x07, 0xE9])
            .data([0x1A, i])
            .data([0x0B, i])
            .build()
            .expect("exchange");
        frames.push(ParameterFrame::new("engine_rpm", ParseMode::Separately).with_exchange(ex));
    }
    let mut combined = ParameterFrame::new("sum_frames", ParseMode::Combined);
    for i in 0..8u8 {
        let ex = Exchange::builder()
            .data(vec![i; 7])
            .data(vec![i; 7])
            .data(vec![i; 7])
            .build()
            .expect("exchange");
        combined = combined.with_exchange(ex);
    }
    frames.push(combined);
    frames
}

fn bench_accessors(c: &mut Criterion) {
    let mut ctx = EvaluationContext::new();
    ctx.load_exchange(vec![vec![0x07, 0xE8]], vec![(0..=255u8).collect::<Vec<_>>()])
        .expect("load");

    c.bench_function("byte_scan_256", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for pos in 0..300 {
                acc += u32::from(ctx.byte(black_box(pos)).unwrap_or(0));
            }
            acc
        })
    });

    c.bench_function("bit_scan_256x8", |b| {
        b.iter(|| {
            let mut acc = 0u32;
            for pos in 0..256 {
                for bit in 0..8 {
                    acc += u32::from(ctx.bit(black_box(pos), bit).unwrap_or(0));
                }
            }
            acc
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let frames = batch();
    let mut registry = DecoderRegistry::new();
    registry.register("engine_rpm", engine_rpm);
    registry.register("sum_frames", sum_frames);
    let mut evaluator = Evaluator::new();

    c.bench_function("evaluate_batch_65", |b| {
        b.iter(|| {
            let report = evaluator.evaluate_batch(black_box(&frames), &registry);
            black_box(report.decoded.len())
        })
    });

    // With eval_profile feature: one batch run and per-parameter time breakdown
    #[cfg(feature = "eval_profile")]
    {
        reset_eval_profile();
        evaluator.evaluate_batch(&frames, &registry);
        let profile = get_eval_profile();
        let total_ns: u64 = profile.values().sum();
        eprintln!("evaluate_batch hotspot (eval_profile feature):");
        let mut by_label: Vec<_> = profile.into_iter().collect();
        by_label.sort_by(|a, b| b.1.cmp(&a.1));
        for (label, ns) in &by_label {
            let pct = if total_ns > 0 { *ns as f64 / total_ns as f64 * 100.0 } else { 0.0 };
            eprintln!("  {:20} {:>12} ns  {:5.1}%", label, ns, pct);
        }
        eprintln!("  {:20} {:>12} ns  100.0%", "TOTAL", total_ns);
    }
}

criterion_group!(benches, bench_accessors, bench_batch);
criterion_main!(benches);
