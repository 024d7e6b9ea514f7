use std::fmt;

/// Value of the `SVTYPE` INFO field. Only `BND` changes how a record is
/// converted; other types are kept so they can be written back verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvType {
    INSERTION,
    DELETION,
    INVERSION,
    DUPLICATION,
    CNV,
    BND,
    Other(String),
}

impl SvType {
    pub fn from_u8(bytes: &[u8]) -> Self {
        match bytes {
            b"INS" => SvType::INSERTION,
            b"DEL" => SvType::DELETION,
            b"INV" => SvType::INVERSION,
            b"DUP" => SvType::DUPLICATION,
            b"CNV" => SvType::CNV,
            b"BND" => SvType::BND,
            _ => SvType::Other(String::from_utf8_lossy(bytes).into_owned()),
        }
    }

    pub fn is_breakend(&self) -> bool {
        matches!(self, SvType::BND)
    }
}

impl From<&str> for SvType {
    fn from(s: &str) -> Self {
        Self::from_u8(s.as_bytes())
    }
}

impl fmt::Display for SvType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvType::INSERTION => write!(f, "INS"),
            SvType::DELETION => write!(f, "DEL"),
            SvType::INVERSION => write!(f, "INV"),
            SvType::DUPLICATION => write!(f, "DUP"),
            SvType::CNV => write!(f, "CNV"),
            SvType::BND => write!(f, "BND"),
            SvType::Other(s) => write!(f, "{s}"),
        }
    }
}
