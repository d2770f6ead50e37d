//! Replay a text capture through the built-in SAE J1979 decoders
//! (`obdscript::builtin`).
//!
//! Usage:
//!   replay_capture [OPTIONS] FILE
//!
//! Options:
//!   --dump, -d   Print the captured exchanges before the decoded data
//!   -v, -vv      Log evaluation at debug / trace level (stderr)
//!
//! Mode 01 data lines are expected with the service/PID prefix already
//! stripped (e.g. `7B` for a coolant reply `41 05 7B`); `vin` frames are kept
//! as sent. See `obdscript::capture` for the file format. Exit code 1 if any
//! parameter failed to decode.

use anyhow::Context;
use obdscript::dump::{format_parameter_data, format_parameter_frame};
use obdscript::{builtin, capture, Evaluator};
use tracing::level_filters::LevelFilter;

fn init_logging(verbosity: usize) {
    let level = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}

fn main() -> anyhow::Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let dump = if let Some(pos) = args.iter().position(|a| a == "--dump" || a == "-d") {
        args.remove(pos);
        true
    } else {
        false
    };
    let mut verbosity = 0;
    args.retain(|a| match a.as_str() {
        "-v" => {
            verbosity += 1;
            false
        }
        "-vv" => {
            verbosity += 2;
            false
        }
        _ => true,
    });
    init_logging(verbosity);

    let path = match args.as_slice() {
        [path] => path,
        _ => anyhow::bail!("usage: replay_capture [--dump] [-v|-vv] FILE"),
    };
    let frames = capture::read_file(path).with_context(|| format!("reading capture {}", path))?;

    if dump {
        for frame in &frames {
            println!("{}", format_parameter_frame(frame));
        }
        println!();
    }

    let registry = builtin::registry();
    let report = Evaluator::new().evaluate_batch(&frames, &registry);
    for data in &report.decoded {
        println!("{}", format_parameter_data(data));
    }
    for failure in &report.failures {
        eprintln!("error: {}: {}", failure.param_name, failure.error);
    }
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}
