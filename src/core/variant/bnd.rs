use super::Variant;
use crate::{error::Vcf2BedpeError, utils::util::Result};

/// Mate location and adjacency strands decoded from a BND ALT allele.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakendAlt {
    pub mate_contig: String,
    pub mate_pos: i64,
    pub strands: [u8; 2],
}

impl BreakendAlt {
    /// Decodes `t[p[`, `t]p]`, `]p]t` and `[p[t` ALT alleles.
    ///
    /// The delimiter is `]` whenever the allele contains one, otherwise `[`.
    /// The second strand follows the delimiter (`]` is `+`, `[` is `-`) and
    /// the first strand is `-` when the bracket precedes the reference base.
    ///
    /// ```text
    /// N[2:22222[  -> +-
    /// ]2:22222]N  -> -+
    /// N]2:22222]  -> ++
    /// [2:22222[N  -> --
    /// ```
    pub fn parse(alt: &str) -> Result<Self> {
        let malformed = |reason: &str| Vcf2BedpeError::MalformedBreakendAlt {
            alt: alt.to_string(),
            reason: reason.to_string(),
        };

        let (delimiter, second_strand) = if alt.contains(']') {
            (']', b'+')
        } else if alt.contains('[') {
            ('[', b'-')
        } else {
            return Err(malformed("missing '[' or ']'"));
        };
        let first_strand = if alt.starts_with(['[', ']']) {
            b'-'
        } else {
            b'+'
        };

        let open = alt
            .find(delimiter)
            .ok_or_else(|| malformed("missing opening bracket"))?;
        let close = alt[open + 1..]
            .find(delimiter)
            .map(|rel| rel + open + 1)
            .ok_or_else(|| malformed("missing closing bracket"))?;
        let mate = &alt[open + 1..close];
        if mate.is_empty() {
            return Err(malformed("empty mate location"));
        }
        let (mate_contig, mate_pos) = mate
            .rsplit_once(':')
            .ok_or_else(|| malformed("mate does not look like contig:pos"))?;
        let mate_pos: i64 = mate_pos
            .parse()
            .map_err(|e| malformed(&format!("invalid mate position {mate_pos:?}: {e}")))?;

        Ok(BreakendAlt {
            mate_contig: mate_contig.to_string(),
            mate_pos,
            strands: [first_strand, second_strand],
        })
    }
}

impl Variant<'_> {
    pub fn breakend_alt(&self) -> Result<BreakendAlt> {
        BreakendAlt::parse(&self.alt)
    }
}
