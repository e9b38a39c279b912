//! `.call` script compiler.
//!
//! Each non-blank, non-comment line names a target address, a typed function
//! signature and its arguments. The line becomes one `CALL` record holding
//! the function selector and the ABI-encoded arguments. Every blank line
//! becomes a one-byte `PAD` record.
//!
//! # Pipeline
//!
//! source text → [`parser`] → [`selector`] + [`abi`] → [`record`] → [`Program`]
//!
//! A [`CompileContext`] is created fresh for every compile and dropped once
//! the [`Program`] is built. The first error aborts the pass with no partial
//! output.
//!
//! # Modules
//!
//! - [`parser`]: line classification, labels, addresses, signatures
//! - [`selector`]: Keccak-256 function selectors
//! - [`abi`]: 32-byte argument words
//! - [`isa`]: record opcodes
//! - [`record`]: record binary format and disassembly
//! - [`labels`]: label → record index table
//! - [`errors`]: compile error types

pub mod abi;
pub mod errors;
pub mod isa;
pub mod labels;
pub mod parser;
pub mod program;
pub mod record;
pub mod selector;

use crate::compiler::abi::encode_arguments;
use crate::compiler::errors::{CompileError, ErrorKind};
use crate::compiler::labels::LabelTable;
use crate::compiler::parser::{Instruction, Line, lines, parse_line};
use crate::compiler::record::{CallRecord, MAX_PAYLOAD_LEN, Record};
use crate::compiler::selector::Selector;
use crate::warn;
use std::ffi::OsString;
use std::fmt::Write;
use std::fs;
use std::path::{Path, PathBuf};

pub use program::Program;

/// Source extension that gets replaced when naming the output file.
pub const SOURCE_EXTENSION: &str = "call";
/// Extension of the written hex output.
pub const OUTPUT_EXTENSION: &str = "calldata";

/// Accumulates records and labels during one compile pass.
pub struct CompileContext {
    records: Vec<Record>,
    labels: LabelTable,
}

impl CompileContext {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            labels: LabelTable::new(),
        }
    }

    /// Appends a record and returns its index in the record sequence.
    fn push(&mut self, record: Record) -> usize {
        self.records.push(record);
        self.records.len() - 1
    }

    /// Classifies one physical line and emits whatever it produces.
    pub fn compile_line(&mut self, line_no: usize, raw: &str) -> Result<(), CompileError> {
        match parse_line(line_no, raw)? {
            Line::Blank => {
                self.push(Record::Pad);
            }
            Line::Comment => {}
            Line::Instruction(instr) => self.compile_instruction(line_no, &instr)?,
        }
        Ok(())
    }

    fn compile_instruction(
        &mut self,
        line_no: usize,
        instr: &Instruction<'_>,
    ) -> Result<(), CompileError> {
        let signature = &instr.signature;
        let selector = Selector::resolve(signature.name, &signature.params);

        let args: Vec<&str> = instr.args.iter().map(|t| t.text).collect();
        let words = encode_arguments(&signature.params, &args).map_err(|e| {
            let column = e
                .index
                .map(|i| instr.args[i].column)
                .unwrap_or(instr.signature_column);
            CompileError::at(line_no, column, e.kind)
        })?;

        let call = CallRecord {
            address: instr.address,
            selector,
            words,
        };
        if call.payload_len() > MAX_PAYLOAD_LEN {
            return Err(CompileError::at(
                line_no,
                instr.signature_column,
                ErrorKind::Syntax(format!(
                    "call payload of {} bytes does not fit a 4-byte length",
                    call.payload_len()
                )),
            ));
        }

        let index = self.push(Record::Call(call));
        let label = instr.label();
        if let Some(previous) = self.labels.define(label, index) {
            warn!(
                "line {}: label `{}` redefined (record {} -> {})",
                line_no, label, previous, index
            );
        }
        Ok(())
    }

    /// Consumes the context and returns the finished program.
    pub fn finish(self) -> Program {
        Program {
            records: self.records,
            labels: self.labels,
        }
    }
}

impl Default for CompileContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Compiles a whole source text.
pub fn compile(source: &str) -> Result<Program, CompileError> {
    let mut ctx = CompileContext::new();
    for (line_no, raw) in lines(source) {
        ctx.compile_line(line_no, raw)?;
    }
    Ok(ctx.finish())
}

/// Formats a compiler-style diagnostic pointing at `line`:`column`.
pub fn render_diagnostic(
    file: &str,
    source: &str,
    line: usize,
    column: usize,
    message: &str,
) -> String {
    let mut diag = String::new();
    let _ = writeln!(diag, "error: {message}");
    let _ = writeln!(diag, " --> {file}:{line}:{column}");

    if let Some(raw_line) = source.split('\n').nth(line.saturating_sub(1)) {
        let line_text = raw_line.trim_end_matches('\r');
        let underline = " ".repeat(column.saturating_sub(1));
        let _ = writeln!(diag, "  |");
        let _ = writeln!(diag, "{:>4} | {}", line, line_text);
        let _ = writeln!(diag, "  | {}^", underline);
    }

    diag
}

/// Compiles `source`, printing a diagnostic to stderr on failure.
pub fn compile_with_name(source: &str, source_name: &str) -> Result<Program, CompileError> {
    let result = compile(source);
    if let Err(err) = &result {
        match (err.location(), err.kind()) {
            (Some((line, column)), Some(kind)) => eprint!(
                "{}",
                render_diagnostic(source_name, source, line, column, &kind.to_string())
            ),
            _ => eprintln!("error: {err}"),
        }
    }
    result
}

/// Reads and compiles a `.call` file.
pub fn compile_file<P: AsRef<Path>>(path: P) -> Result<Program, CompileError> {
    let path = path.as_ref();
    let source = fs::read_to_string(path).map_err(|source| CompileError::Io {
        path: path.display().to_string(),
        source,
    })?;
    compile_with_name(&source, &path.display().to_string())
}

/// Output file for `input`: a name ending in `.call` (including a bare
/// `.call`) gets that suffix replaced by `.calldata`; anything else gets
/// `.calldata` appended.
pub fn output_path<P: AsRef<Path>>(input: P) -> PathBuf {
    let input = input.as_ref();
    let suffix = format!(".{SOURCE_EXTENSION}");
    if let Some(stem) = input
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(suffix.as_str()))
    {
        return input.with_file_name(format!("{stem}.{OUTPUT_EXTENSION}"));
    }

    let mut name = OsString::from(input.as_os_str());
    name.push(".");
    name.push(OUTPUT_EXTENSION);
    PathBuf::from(name)
}

/// Writes the program's hex text to `path`.
pub fn write_output<P: AsRef<Path>>(path: P, program: &Program) -> Result<(), CompileError> {
    let path = path.as_ref();
    fs::write(path, program.to_hex()).map_err(|source| CompileError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Compiles `input` and writes the hex next to it.
///
/// Returns the program together with the path it was written to. Nothing is
/// written when compilation fails.
pub fn run<P: AsRef<Path>>(input: P) -> Result<(Program, PathBuf), CompileError> {
    let input = input.as_ref();
    let program = compile_file(input)?;
    let output = output_path(input);
    write_output(&output, &program)?;
    Ok((program, output))
}
