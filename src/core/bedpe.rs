use crate::{
    constants::*,
    core::variant::{FieldValue, Variant},
    error::Vcf2BedpeError,
    utils::util::Result,
};
use std::{fmt, mem};

/// Closed coordinate interval around one side of an event. Bounds may be
/// negative before output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: i64,
    pub end: i64,
}

impl Interval {
    pub fn point(pos: i64) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Applies optional `[low, high]` confidence offsets to `anchor`, then
    /// shifts both bounds left by one when the side's strand is `-`.
    ///
    /// Returns `None` when a bound does not fit in an `i64`.
    pub fn around(anchor: i64, offsets: Option<[i64; 2]>, strand: Option<u8>) -> Option<Self> {
        let [low, high] = offsets.unwrap_or([0, 0]);
        let shift = i64::from(strand == Some(b'-'));
        Some(Self {
            start: anchor.checked_add(low)?.checked_sub(shift)?,
            end: anchor.checked_add(high)?.checked_sub(shift)?,
        })
    }
}

/// Builds one side's interval from `anchor` and the confidence field `ci_field`.
fn side_interval(
    variant: &Variant,
    anchor: i64,
    ci_field: &str,
    strand: Option<u8>,
) -> Result<Interval> {
    let offsets = variant.info_offsets(ci_field)?;
    Interval::around(anchor, offsets, strand).ok_or_else(|| Vcf2BedpeError::InvalidInfoValue {
        field: ci_field.to_string(),
        value: variant.info_str(ci_field).unwrap_or_default(),
        reason: format!("interval around {anchor} overflows"),
    })
}

/// One output row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BedpeRecord {
    pub chrom_a: String,
    pub interval_a: Interval,
    pub chrom_b: String,
    pub interval_b: Interval,
    pub id: String,
    pub qual: String,
    pub strands: [u8; 2],
    pub svtype: String,
    pub filter: String,
    pub info_a: String,
    pub info_b: String,
    pub trailing_columns: Vec<String>,
}

impl BedpeRecord {
    /// Converts a single-line (non-BND) event; both sides share the record's chromosome.
    pub fn from_variant(variant: &Variant) -> Result<Self> {
        let end = variant.info_i64(INFO_END)?;
        let strands = if variant.has_info(INFO_STRANDS) {
            let value = variant.info_str(INFO_STRANDS)?;
            match value.as_bytes() {
                [o1, o2, ..] => [*o1, *o2],
                _ => {
                    return Err(Vcf2BedpeError::InvalidInfoValue {
                        field: INFO_STRANDS.to_string(),
                        value,
                        reason: "expected at least two strand characters".to_string(),
                    })
                }
            }
        } else {
            DEFAULT_STRANDS
        };

        Ok(BedpeRecord {
            chrom_a: variant.chrom.clone(),
            interval_a: side_interval(variant, variant.pos, INFO_CIPOS, None)?,
            chrom_b: variant.chrom.clone(),
            interval_b: side_interval(variant, end, INFO_CIEND, None)?,
            id: variant.id.clone(),
            qual: variant.qual_text().to_string(),
            strands,
            svtype: variant.info_str(INFO_SVTYPE)?,
            filter: variant.filter.clone(),
            info_a: variant.info_string(),
            info_b: EMPTY_INFO.to_string(),
            trailing_columns: variant.trailing_columns().to_vec(),
        })
    }

    /// Converts a breakend event from its primary and secondary records.
    ///
    /// Either half may be missing, never both. Coordinates and strands are
    /// derived from the ALT of the primary, or of the secondary when the
    /// primary never arrived; in that case the sides are swapped afterwards so
    /// side A still describes the primary's end. The mate position is written
    /// back into the deriving record as `END`.
    pub fn from_breakends(primary: Option<Variant>, secondary: Option<Variant>) -> Result<Self> {
        let primary_missing = primary.is_none();
        let (mut source, mate) = match (primary, secondary) {
            (Some(primary), secondary) => (primary, secondary),
            (None, Some(secondary)) => (secondary, None),
            (None, None) => {
                return Err(crate::vcf2bedpe_error!(
                    "Cannot convert a breakend event without primary or secondary record"
                ))
            }
        };

        let id = source.event_id()?;
        let bnd = source.breakend_alt()?;
        source.set_info(INFO_END, FieldValue::Integer(bnd.mate_pos))?;
        let [o1, o2] = bnd.strands;

        let mut record = BedpeRecord {
            chrom_a: source.chrom.clone(),
            interval_a: side_interval(&source, source.pos, INFO_CIPOS, Some(o1))?,
            chrom_b: bnd.mate_contig,
            interval_b: side_interval(&source, bnd.mate_pos, INFO_CIEND, Some(o2))?,
            id,
            qual: source.qual_text().to_string(),
            strands: bnd.strands,
            svtype: source.info_str(INFO_SVTYPE)?,
            filter: source.filter.clone(),
            info_a: source.info_string(),
            info_b: mate.as_ref().map_or_else(
                || MISSING_INFO.to_string(),
                |secondary| secondary.info_string(),
            ),
            trailing_columns: source.trailing_columns().to_vec(),
        };

        if primary_missing {
            record.swap_sides();
            record.info_b = mem::replace(&mut record.info_a, MISSING_INFO.to_string());
        }
        Ok(record)
    }

    fn swap_sides(&mut self) {
        mem::swap(&mut self.chrom_a, &mut self.chrom_b);
        mem::swap(&mut self.interval_a, &mut self.interval_b);
        self.strands.swap(0, 1);
    }
}

impl fmt::Display for BedpeRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
            self.chrom_a,
            self.interval_a.start.max(0),
            self.interval_a.end.max(0),
            self.chrom_b,
            self.interval_b.start.max(0),
            self.interval_b.end.max(0),
            self.id,
            self.qual,
            self.strands[0] as char,
            self.strands[1] as char,
            self.svtype,
            self.filter,
            self.info_a,
            self.info_b
        )?;
        for column in &self.trailing_columns {
            write!(f, "\t{column}")?;
        }
        Ok(())
    }
}
