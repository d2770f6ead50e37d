//! Format captured exchanges and decoded parameter data for display.

use crate::eval::ParameterFrame;
use crate::exchange::Exchange;
use crate::value::{LiteralValue, NumericalValue, ParameterData};

/// Format a numeric value without a trailing `.0` for whole numbers.
pub fn format_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{}", v)
    }
}

pub fn format_numerical(n: &NumericalValue) -> String {
    let value = if n.units.is_empty() {
        format_number(n.value)
    } else {
        format!("{} {}", format_number(n.value), n.units)
    };
    let flag = if n.in_range() { "" } else { " (out of range)" };
    format!(
        "{}: {} [{}..{}]{}",
        n.property,
        value,
        format_number(n.min),
        format_number(n.max),
        flag
    )
}

pub fn format_literal(l: &LiteralValue) -> String {
    format!("{}: {}", l.property, l.label())
}

/// Multi-line dump of one exchange: `H` lines for headers, `D` lines for data.
pub fn format_exchange(exchange: &Exchange, indent: usize) -> String {
    let pad = "  ".repeat(indent);
    let mut lines = Vec::new();
    for (i, h) in exchange.headers().iter().enumerate() {
        lines.push(format!("{}H[{}] {}", pad, i, h));
    }
    for (i, d) in exchange.data().iter().enumerate() {
        lines.push(format!("{}D[{}] {}", pad, i, d));
    }
    lines.join("\n")
}

/// Dump of all captured data for a parameter.
pub fn format_parameter_frame(frame: &ParameterFrame) -> String {
    let mut lines = vec![format!("{} ({:?})", frame.name, frame.mode)];
    for (i, ex) in frame.exchanges.iter().enumerate() {
        lines.push(format!("  REQ[{}]", i));
        lines.push(format_exchange(ex, 2));
    }
    lines.join("\n")
}

/// Dump of one decoded result set.
pub fn format_parameter_data(data: &ParameterData) -> String {
    let mut head = data.param_name.clone();
    if !data.source_name.is_empty() {
        head.push_str(&format!(" @ {}", data.source_name));
    }
    if !data.source_address.is_empty() {
        head.push_str(&format!(" [{}]", data.source_address));
    }
    let mut lines = vec![head];
    for l in &data.literals {
        lines.push(format!("  {}", format_literal(l)));
    }
    for n in &data.numericals {
        lines.push(format!("  {}", format_numerical(n)));
    }
    lines.join("\n")
}
