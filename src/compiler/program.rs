//! Output of a successful compile pass.

use crate::compiler::labels::LabelTable;
use crate::compiler::record::Record;
use crate::types::encoding::{Encode, EncodeSink};
use crate::types::hex;
use std::fmt;

/// Compiled records plus the label table that indexes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub(crate) records: Vec<Record>,
    pub(crate) labels: LabelTable,
}

impl Program {
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn labels(&self) -> &LabelTable {
        &self.labels
    }

    /// `0x` followed by the lowercase hex of the whole record stream.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.to_bytes()))
    }
}

impl Encode for Program {
    fn encode<S: EncodeSink>(&self, out: &mut S) {
        self.records.encode(out);
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
