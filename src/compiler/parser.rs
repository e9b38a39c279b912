//! Line classification and instruction parsing.
//!
//! # Syntax
//!
//! ```text
//! # comment
//! [label =] 0x<40 hex digits> name(type,...) arg*
//! ```
//!
//! - Blank lines are kept: each one becomes a padding record
//! - Comments start with `#` as the first non-blank character
//! - A label is `[A-Za-z0-9_]+` followed by `=`; without one, the function
//!   name is used
//! - Tokens are separated by whitespace, so a signature cannot contain spaces

use crate::compiler::errors::{CompileError, ErrorKind};
use crate::types::address::Address;

const COMMENT_CHAR: char = '#';
const LABEL_SEPARATOR: char = '=';

/// A whitespace-delimited piece of a source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// 1-based column offset in the line.
    pub column: usize,
}

/// Parsed `name(type,...)` signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature<'a> {
    pub name: &'a str,
    /// Type tags as written. They are resolved per argument when encoding.
    pub params: Vec<&'a str>,
}

/// One parsed instruction line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction<'a> {
    /// Explicit `label =` prefix, if any.
    pub label: Option<&'a str>,
    pub address: Address,
    pub signature: Signature<'a>,
    /// Column of the signature token, for diagnostics.
    pub signature_column: usize,
    pub args: Vec<Token<'a>>,
}

impl<'a> Instruction<'a> {
    /// The label this instruction registers: explicit, or the function name.
    pub fn label(&self) -> &'a str {
        self.label.unwrap_or(self.signature.name)
    }
}

/// Classification of a single physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    Comment,
    Instruction(Instruction<'a>),
}

/// Splits `source` into physical lines, 1-based line numbers attached.
///
/// Splits on `\n` only, so text ending in a newline has a final empty line.
pub fn lines(source: &str) -> impl Iterator<Item = (usize, &str)> {
    source.split('\n').enumerate().map(|(i, line)| (i + 1, line))
}

/// Classifies and parses one line. `line_no` is 1-based.
pub fn parse_line(line_no: usize, raw: &str) -> Result<Line<'_>, CompileError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(Line::Blank);
    }
    if trimmed.starts_with(COMMENT_CHAR) {
        return Ok(Line::Comment);
    }

    let start = raw.len() - raw.trim_start().len();
    let (label, body_start) = match split_label(trimmed) {
        Some((label, rest_offset)) => (Some(label), start + rest_offset),
        None => (None, start),
    };

    let tokens = tokenize(raw, body_start);
    if tokens.len() < 2 {
        return Err(CompileError::at(
            line_no,
            start + 1,
            ErrorKind::Syntax(trimmed.to_string()),
        ));
    }

    let address = Address::parse(tokens[0].text).ok_or_else(|| {
        CompileError::at(
            line_no,
            tokens[0].column,
            ErrorKind::InvalidAddress(tokens[0].text.to_string()),
        )
    })?;

    let signature = parse_signature(tokens[1].text)
        .map_err(|kind| CompileError::at(line_no, tokens[1].column, kind))?;

    Ok(Line::Instruction(Instruction {
        label,
        address,
        signature,
        signature_column: tokens[1].column,
        args: tokens[2..].to_vec(),
    }))
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn is_ident(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_ident_byte)
}

/// Recognizes `ident = rest` at the start of `text`.
///
/// Returns the label and the byte offset of `rest` within `text`. `rest`
/// must be non-empty.
fn split_label(text: &str) -> Option<(&str, usize)> {
    let ident_len = text.bytes().take_while(|&b| is_ident_byte(b)).count();
    if ident_len == 0 {
        return None;
    }

    let rest = text[ident_len..]
        .trim_start()
        .strip_prefix(LABEL_SEPARATOR)?
        .trim_start();
    if rest.is_empty() {
        return None;
    }

    Some((&text[..ident_len], text.len() - rest.len()))
}

/// Splits `line[start..]` on whitespace, keeping 1-based columns.
fn tokenize(line: &str, start: usize) -> Vec<Token<'_>> {
    let mut out = Vec::with_capacity(4);
    let mut token_start: Option<usize> = None;

    for (i, c) in line[start..].char_indices() {
        let i = start + i;
        match (c.is_whitespace(), token_start) {
            (true, Some(s)) => {
                out.push(Token {
                    text: &line[s..i],
                    column: s + 1,
                });
                token_start = None;
            }
            (false, None) => token_start = Some(i),
            _ => {}
        }
    }

    if let Some(s) = token_start {
        out.push(Token {
            text: &line[s..],
            column: s + 1,
        });
    }

    out
}

/// Parses `name(type1,type2,...)`.
///
/// The parameter list may be empty and must not contain parentheses; the
/// closing `)` must end the token. Type tags are not checked here.
pub fn parse_signature(token: &str) -> Result<Signature<'_>, ErrorKind> {
    let invalid = || ErrorKind::InvalidFunctionSignature(token.to_string());

    let (name, rest) = token.split_once('(').ok_or_else(invalid)?;
    let list = rest.strip_suffix(')').ok_or_else(invalid)?;
    if !is_ident(name) || list.contains(['(', ')']) {
        return Err(invalid());
    }

    let params = if list.is_empty() {
        Vec::new()
    } else {
        list.split(',').map(str::trim).collect()
    };

    Ok(Signature { name, params })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_utils::utils::{ADDR_1, ADDR_2, TRANSFER_LINE};

    fn instruction(line: &str) -> Instruction<'_> {
        match parse_line(1, line).unwrap() {
            Line::Instruction(instr) => instr,
            other => panic!("expected instruction, got {other:?}"),
        }
    }

    fn error_kind(line: &str) -> ErrorKind {
        parse_line(1, line).unwrap_err().kind().unwrap().clone()
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse_line(1, "").unwrap(), Line::Blank);
        assert_eq!(parse_line(1, "   \t\r").unwrap(), Line::Blank);
        assert_eq!(parse_line(1, "# note").unwrap(), Line::Comment);
        assert_eq!(parse_line(1, "    #indented").unwrap(), Line::Comment);
    }

    #[test]
    fn lines_keep_trailing_empty_line() {
        let collected: Vec<_> = lines("a\n\nb\n").collect();
        assert_eq!(collected, vec![(1, "a"), (2, ""), (3, "b"), (4, "")]);
        assert_eq!(lines("").count(), 1);
    }

    #[test]
    fn parses_labeled_transfer() {
        let instr = instruction(TRANSFER_LINE);
        assert_eq!(instr.label, Some("transfer"));
        assert_eq!(instr.label(), "transfer");
        assert_eq!(instr.address, Address([0x11; 20]));
        assert_eq!(instr.signature.name, "transfer");
        assert_eq!(instr.signature.params, vec!["address", "uint256"]);
        let args: Vec<_> = instr.args.iter().map(|t| t.text).collect();
        assert_eq!(args, vec![ADDR_2, "1000"]);
    }

    #[test]
    fn label_defaults_to_function_name() {
        let line = format!("{ADDR_1} approve(address,uint) {ADDR_2} 5");
        let instr = instruction(&line);
        assert_eq!(instr.label, None);
        assert_eq!(instr.label(), "approve");
    }

    #[test]
    fn label_spacing_variants() {
        let line = format!("x1={ADDR_1} ping()");
        assert_eq!(instruction(&line).label, Some("x1"));

        let line = format!("  step_2   =   {ADDR_1} ping()");
        assert_eq!(instruction(&line).label, Some("step_2"));
    }

    #[test]
    fn split_label_requires_rest() {
        assert_eq!(split_label("a = b"), Some(("a", 4)));
        assert_eq!(split_label("a ="), None);
        assert_eq!(split_label("= b"), None);
        assert_eq!(split_label("a-b = c"), None);
        assert_eq!(split_label("ab c"), None);
    }

    #[test]
    fn tokenize_tracks_columns() {
        let tokens = tokenize("  ab \t cd e", 0);
        assert_eq!(
            tokens,
            vec![
                Token { text: "ab", column: 3 },
                Token { text: "cd", column: 8 },
                Token { text: "e", column: 11 },
            ]
        );
    }

    #[test]
    fn columns_point_into_raw_line() {
        let line = format!("  lbl = {ADDR_1} ping() 7");
        let instr = instruction(&line);
        assert_eq!(instr.signature_column, 3 + 6 + 42 + 1);
        assert_eq!(instr.args[0].column, 3 + 6 + 42 + 1 + 7);
    }

    #[test]
    fn too_few_tokens_is_syntax_error() {
        assert!(matches!(error_kind(ADDR_1), ErrorKind::Syntax(_)));
        assert!(matches!(error_kind("lbl = ping()"), ErrorKind::Syntax(_)));

        let err = parse_line(7, "  lonely").unwrap_err();
        assert_eq!(err.location(), Some((7, 3)));
    }

    #[test]
    fn empty_label_rest_is_parsed_as_instruction() {
        // "a =" is not a label; tokens are "a" and "=", so the address fails.
        assert_eq!(error_kind("a ="), ErrorKind::InvalidAddress("a".into()));
    }

    #[test]
    fn invalid_addresses() {
        for addr in [
            "0x1234",
            "1111111111111111111111111111111111111111",
            "0x111111111111111111111111111111111111111g",
            "0x11111111111111111111111111111111111111111",
            "0X1111111111111111111111111111111111111111",
        ] {
            let line = format!("{addr} ping()");
            assert_eq!(error_kind(&line), ErrorKind::InvalidAddress(addr.into()));
        }
    }

    #[test]
    fn address_is_case_insensitive() {
        let line = "0xABCDEF0000000000000000000000000000abcdef ping()";
        let instr = instruction(line);
        assert_eq!(instr.address.0[0], 0xab);
        assert_eq!(instr.address.0[19], 0xef);
    }

    #[test]
    fn signature_shapes() {
        let sig = parse_signature("ping()").unwrap();
        assert_eq!(sig.name, "ping");
        assert!(sig.params.is_empty());

        let sig = parse_signature("set(bytes32,address,uint)").unwrap();
        assert_eq!(sig.params, vec!["bytes32", "address", "uint"]);
    }

    #[test]
    fn malformed_signatures() {
        for sig in [
            "ping",
            "ping(",
            "(uint)",
            "ping()x",
            "pi-ng()",
            "ping((uint))",
            "ping((uint)",
            "ping(uint))",
        ] {
            assert_eq!(
                parse_signature(sig),
                Err(ErrorKind::InvalidFunctionSignature(sig.into())),
                "{sig}"
            );
        }
    }

    #[test]
    fn signature_with_space_is_split_and_rejected() {
        let line = format!("{ADDR_1} f(address, uint256) {ADDR_2} 1");
        assert_eq!(
            error_kind(&line),
            ErrorKind::InvalidFunctionSignature("f(address,".into())
        );
    }

    #[test]
    fn unknown_type_tags_are_kept_as_written() {
        assert_eq!(parse_signature("f(bool)").unwrap().params, vec!["bool"]);
        assert_eq!(parse_signature("f(uint,)").unwrap().params, vec!["uint", ""]);
        assert_eq!(
            parse_signature("f(uint8,address)").unwrap().params,
            vec!["uint8", "address"]
        );

        let line = format!("{ADDR_1} setFlag(bool) 1");
        assert_eq!(instruction(&line).signature.params, vec!["bool"]);
    }
}
