pub const BEDPE_FILE_FORMAT: &str = "BEDPE";
pub const MISSING_INFO: &str = "MISSING";
pub const EMPTY_INFO: &str = ".";
pub const MISSING_VALUE: &str = ".";

/// Number of fixed VCF columns up to and including INFO.
pub const VCF_FIXED_COLUMNS: usize = 8;
pub const VCF_FORMAT_COLUMN: usize = 8;

pub const BEDPE_COLUMNS: [&str; 14] = [
    "#CHROM_A", "START_A", "END_A", "CHROM_B", "START_B", "END_B", "ID", "QUAL", "STRAND_A",
    "STRAND_B", "TYPE", "FILTER", "INFO_A", "INFO_B",
];

pub const INFO_SVTYPE: &str = "SVTYPE";
pub const INFO_POS: &str = "POS";
pub const INFO_END: &str = "END";
pub const INFO_EVENT: &str = "EVENT";
pub const INFO_SECONDARY: &str = "SECONDARY";
pub const INFO_STRANDS: &str = "STRANDS";
pub const INFO_CIPOS: &str = "CIPOS";
pub const INFO_CIEND: &str = "CIEND";

pub const FORMAT_GT: &str = "GT";

pub const DEFAULT_STRANDS: [u8; 2] = *b"++";
