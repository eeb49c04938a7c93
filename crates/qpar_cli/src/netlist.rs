//! A minimal, pragmatic text netlist format.
//!
//! BLIF parsing is explicitly out of scope (spec §1's Non-goals); the
//! synthesis front-end described in §6.2 only needs to supply gates, nets,
//! and model pins, so `build_qpar_nl` reads a small line-oriented format
//! instead:
//!
//! ```text
//! # comments start with '#'
//! model a b y
//! gate g and a:+ b:+ -> y
//! net n_a a -> in_a
//! ```
//!
//! - `model <name>...` declares one or more boundary pins.
//! - `gate <name> <and|or|buf> <input>:<phase> [<input>:<phase>] -> <output>`
//!   declares a gate; `<phase>` is `+` or `-`.
//! - `net <name> <source> -> <sink> [<sink>...]` declares a net.

use qpar_design::{GateInputSpec, GateSpec, NetSpec, NetlistSpec};

/// A malformed netlist source line.
#[derive(Debug, Clone, thiserror::Error)]
#[error("netlist syntax error on line {line}: {message}")]
pub struct NetlistSyntaxError {
    /// 1-based source line number.
    pub line: usize,
    /// What went wrong.
    pub message: String,
}

fn err(line: usize, message: impl Into<String>) -> NetlistSyntaxError {
    NetlistSyntaxError {
        line,
        message: message.into(),
    }
}

/// Parses the pragmatic text netlist format into a front-end-neutral
/// [`NetlistSpec`].
pub fn parse(source: &str) -> Result<NetlistSpec, NetlistSyntaxError> {
    let mut gates = Vec::new();
    let mut nets = Vec::new();
    let mut model_pins = Vec::new();

    for (index, raw_line) in source.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut tokens = line.split_whitespace();
        let keyword = tokens.next().expect("non-empty line has a first token");
        let rest: Vec<&str> = tokens.collect();

        match keyword.to_ascii_lowercase().as_str() {
            "model" => {
                if rest.is_empty() {
                    return Err(err(line_no, "`model` needs at least one pin name"));
                }
                model_pins.extend(rest.iter().map(|s| s.to_string()));
            }
            "gate" => gates.push(parse_gate(line_no, &rest)?),
            "net" => nets.push(parse_net(line_no, &rest)?),
            other => return Err(err(line_no, format!("unknown keyword {other:?}"))),
        }
    }

    Ok(NetlistSpec {
        gates,
        nets,
        model_pins,
    })
}

fn parse_gate(line: usize, rest: &[&str]) -> Result<GateSpec, NetlistSyntaxError> {
    if rest.len() < 5 {
        return Err(err(
            line,
            "`gate <name> <func> <input>:<phase>... -> <output>` needs at least a name, function, one input, and an output",
        ));
    }
    let name = rest[0].to_string();
    let func = rest[1].to_string();

    let arrow_index = rest
        .iter()
        .position(|&t| t == "->")
        .ok_or_else(|| err(line, "missing `->` before the output pin"))?;
    if arrow_index < 3 {
        return Err(err(line, "gate needs at least one input before `->`"));
    }
    let output = rest
        .get(arrow_index + 1)
        .ok_or_else(|| err(line, "missing output pin name after `->`"))?
        .to_string();
    if rest.len() != arrow_index + 2 {
        return Err(err(line, "exactly one output pin is allowed after `->`"));
    }

    let inputs = rest[2..arrow_index]
        .iter()
        .map(|token| parse_input(line, token))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GateSpec {
        name,
        func,
        inputs,
        output,
    })
}

fn parse_input(line: usize, token: &str) -> Result<GateInputSpec, NetlistSyntaxError> {
    let (name, phase) = token
        .split_once(':')
        .ok_or_else(|| err(line, format!("input {token:?} must be `name:phase`")))?;
    Ok(GateInputSpec {
        name: name.to_string(),
        phase: phase.to_string(),
    })
}

fn parse_net(line: usize, rest: &[&str]) -> Result<NetSpec, NetlistSyntaxError> {
    if rest.len() < 4 {
        return Err(err(
            line,
            "`net <name> <source> -> <sink>...` needs a name, source, `->`, and at least one sink",
        ));
    }
    let name = rest[0].to_string();
    let source = rest[1].to_string();
    if rest[2] != "->" {
        return Err(err(line, "expected `->` after the source pin"));
    }
    let sinks: Vec<String> = rest[3..].iter().map(|s| s.to_string()).collect();
    if sinks.is_empty() {
        return Err(err(line, "net needs at least one sink pin"));
    }

    Ok(NetSpec {
        name,
        source,
        sinks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_gate_netlist() {
        let source = "\
model a b y
gate g and a:+ b:+ -> y
net n_a a -> in_a
net n_y out_y -> y
";
        let spec = parse(source).unwrap();
        assert_eq!(spec.model_pins, vec!["a", "b", "y"]);
        assert_eq!(spec.gates.len(), 1);
        assert_eq!(spec.gates[0].func, "and");
        assert_eq!(spec.gates[0].inputs.len(), 2);
        assert_eq!(spec.gates[0].inputs[0].phase, "+");
        assert_eq!(spec.gates[0].output, "y");
        assert_eq!(spec.nets.len(), 2);
    }

    #[test]
    fn parses_buf_gate_with_single_input() {
        let source = "gate inv buf a:- -> y\n";
        let spec = parse(source).unwrap();
        assert_eq!(spec.gates[0].inputs.len(), 1);
        assert_eq!(spec.gates[0].inputs[0].phase, "-");
    }

    #[test]
    fn ignores_comments_and_blank_lines() {
        let source = "# a comment\n\nmodel a\n";
        let spec = parse(source).unwrap();
        assert_eq!(spec.model_pins, vec!["a"]);
    }

    #[test]
    fn net_with_multiple_sinks() {
        let source = "net n a -> x y z\n";
        let spec = parse(source).unwrap();
        assert_eq!(spec.nets[0].sinks, vec!["x", "y", "z"]);
    }

    #[test]
    fn rejects_unknown_keyword() {
        let err = parse("frobnicate a b\n").unwrap_err();
        assert_eq!(err.line, 1);
    }

    #[test]
    fn rejects_malformed_input_phase() {
        let err = parse("gate g and a b -> y\n").unwrap_err();
        assert!(err.message.contains("name:phase"));
    }

    #[test]
    fn rejects_missing_arrow() {
        let err = parse("net n a x\n").unwrap_err();
        assert!(err.message.contains("->"));
    }
}
