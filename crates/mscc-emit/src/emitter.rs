//! Quadruples → standalone Python artifact.
//!
//! The emitted file embeds the quadruple list as a literal table and a
//! fixed interpreter loop; it has no dependency on this compiler at
//! runtime.

use mscc_ir::{Op, Operand, Quad};

pub struct Emitter;

impl Emitter {
    /// Render `quads` as a complete, runnable Python program.
    pub fn emit(quads: &[Quad]) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push_str("QUADS = [\n");
        for quad in quads {
            out.push_str("    (");
            out.push_str(&opcode_str(quad.op));
            out.push_str(", ");
            out.push_str(&py_literal(&quad.arg1));
            out.push_str(", ");
            out.push_str(&py_literal(&quad.arg2));
            out.push_str(", ");
            out.push_str(&py_literal(&quad.result));
            out.push_str("),\n");
        }
        out.push_str("]\n\n");
        out.push_str(INTERPRETER);
        out
    }
}

fn opcode_str(op: Op) -> String {
    let s = match op {
        Op::Assign => "=",
        Op::Add => "+",
        Op::Sub => "-",
        Op::Mul => "*",
        Op::Div => "/",
        Op::Gt => ">",
        Op::Lt => "<",
        Op::Eq => "==",
        Op::Param => "PARAM",
        Op::Call => "CALL",
        Op::Label => "label",
        Op::JumpTrue => "jumpt",
        Op::Jump => "jump",
    };
    py_str(s)
}

fn py_literal(operand: &Operand) -> String {
    match operand {
        Operand::None => "None".to_string(),
        Operand::IntLit(v) => v.to_string(),
        Operand::Name(n) => py_str(n),
        Operand::Label(l) => py_str(l),
    }
}

fn py_str(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len() + 2);
    escaped.push('\'');
    for ch in s.chars() {
        match ch {
            '\'' => escaped.push_str("\\'"),
            '\\' => escaped.push_str("\\\\"),
            other => escaped.push(other),
        }
    }
    escaped.push('\'');
    escaped
}

const HEADER: &str = r#"#!/usr/bin/env python3
# Generated by mscc. Do not edit by hand.
import math
import struct
import sys
import time
import wave
import tempfile
import os

SAMPLE_RATE = 44100

"#;

const INTERPRETER: &str = r#"def _build_label_map(quads):
    labels = {}
    for index, (op, arg1, _arg2, _result) in enumerate(quads):
        if op == 'label':
            labels[arg1] = index
    return labels


def _resolve(operand, env):
    if operand is None:
        return None
    if isinstance(operand, int):
        return operand
    if isinstance(operand, str):
        text = operand
        if text and (text[0] in '+-' or text.isdigit()):
            try:
                return int(text)
            except ValueError:
                pass
        return env.get(operand, 0)
    return operand


def _play(freq_hz, duration_ms):
    duration_s = max(duration_ms, 0) / 1000.0
    n_samples = int(SAMPLE_RATE * duration_s)
    samples = bytearray()
    for i in range(n_samples):
        t = i / SAMPLE_RATE
        value = int(32767 * math.sin(2 * math.pi * freq_hz * t))
        samples += struct.pack('<h', value)

    fd, path = tempfile.mkstemp(suffix='.wav')
    os.close(fd)
    try:
        with wave.open(path, 'wb') as wav_file:
            wav_file.setnchannels(1)
            wav_file.setsampwidth(2)
            wav_file.setframerate(SAMPLE_RATE)
            wav_file.writeframes(bytes(samples))
        try:
            import simpleaudio
            wave_obj = simpleaudio.WaveObject.from_wave_file(path)
            play_obj = wave_obj.play()
            play_obj.wait_done()
        except ImportError:
            time.sleep(duration_s)
    finally:
        os.remove(path)


def _rest(duration_ms):
    time.sleep(max(duration_ms, 0) / 1000.0)


def run(quads):
    labels = _build_label_map(quads)
    env = {}
    params = []
    pc = 0
    while pc < len(quads):
        op, arg1, arg2, result = quads[pc]

        if op == '=':
            env[result] = _resolve(arg1, env)
        elif op in ('+', '-', '*', '/'):
            lhs = _resolve(arg1, env)
            rhs = _resolve(arg2, env)
            if op == '+':
                env[result] = lhs + rhs
            elif op == '-':
                env[result] = lhs - rhs
            elif op == '*':
                env[result] = lhs * rhs
            else:
                env[result] = int(lhs / rhs) if (lhs < 0) != (rhs < 0) else lhs // rhs
        elif op in ('>', '<', '=='):
            lhs = _resolve(arg1, env)
            rhs = _resolve(arg2, env)
            if op == '>':
                env[result] = 1 if lhs > rhs else 0
            elif op == '<':
                env[result] = 1 if lhs < rhs else 0
            else:
                env[result] = 1 if lhs == rhs else 0
        elif op == 'PARAM':
            params.append(_resolve(arg1, env))
        elif op == 'CALL':
            name = arg1
            if name == 'play':
                duration = params[-1]
                freq = params[-2]
                _play(freq, duration)
            elif name == 'rest':
                _rest(params[-1])
            params.clear()
        elif op == 'label':
            pass
        elif op == 'jumpt':
            if _resolve(arg1, env) != 0:
                pc = labels[arg2]
                continue
        elif op == 'jump':
            pc = labels[arg1]
            continue

        pc += 1


if __name__ == '__main__':
    run(QUADS)
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn build_quads(source: &str) -> Vec<Quad> {
        let tokens = mscc_lex::tokenize(source).expect("lex");
        let (program, interner) = mscc_ast::parse(tokens).expect("parse");
        let quads = mscc_ir::generate(&program, &interner).expect("generate");
        mscc_ir::optimize(quads).expect("optimize")
    }

    #[test]
    fn emitted_source_embeds_the_quadruple_table() {
        let quads = build_quads("note n = A4; int d = 500; play(n, d);");
        let source = Emitter::emit(&quads);
        assert!(source.contains("QUADS = ["));
        assert!(source.contains("'CALL'"));
        assert!(source.contains("'play'"));
        assert!(source.contains("440"));
    }

    #[test]
    fn emitted_source_defines_a_run_entry_point() {
        let quads = build_quads("rest(100);");
        let source = Emitter::emit(&quads);
        assert!(source.contains("def run(quads):"));
        assert!(source.contains("if __name__ == '__main__':"));
    }

    #[test]
    fn one_row_per_quadruple() {
        let quads = build_quads("int x = 2 + 3; rest(x);");
        let source = Emitter::emit(&quads);
        let row_count = source
            .lines()
            .filter(|line| line.trim_start().starts_with('('))
            .count();
        assert_eq!(row_count, quads.len());
    }
}
