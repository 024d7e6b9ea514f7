use std::path::PathBuf;
use thiserror::Error;

pub type Vcf2BedpeResult<T> = std::result::Result<T, Vcf2BedpeError>;

#[derive(Debug, Error)]
pub enum Vcf2BedpeError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Invalid POS {value:?} in VCF record: {line}")]
    MalformedPosition { value: String, line: String },
    #[error("Expected at least {expected} columns in VCF record, found {found}: {line}")]
    MissingColumns {
        expected: usize,
        found: usize,
        line: String,
    },
    #[error("Invalid INFO field, {field:?}")]
    UnknownInfoField { field: String },
    #[error("Invalid sample name, {sample:?}")]
    UnknownSample { sample: String },
    #[error("{field} missing in VCF record {id} at {chrom}:{pos}")]
    MissingInfoField {
        field: String,
        id: String,
        chrom: String,
        pos: i64,
    },
    #[error("Invalid {field} value {value:?}: {reason}")]
    InvalidInfoValue {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Malformed BND ALT {alt:?}: {reason}")]
    MalformedBreakendAlt { alt: String, reason: String },
    #[error("Invalid gzip header: {}", path.display())]
    InvalidGzipHeader { path: PathBuf },
}

impl Vcf2BedpeError {
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

#[macro_export]
macro_rules! vcf2bedpe_error {
    ($($arg:tt)*) => {
        $crate::error::Vcf2BedpeError::message(format!($($arg)*))
    };
}
