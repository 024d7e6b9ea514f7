mod bnd;
mod genotype;

#[cfg(test)]
pub(crate) mod test_utils;

pub use bnd::BreakendAlt;
pub use genotype::Genotype;

use crate::{
    constants::*,
    core::{
        header::{HeaderDescriptor, ValueType},
        svtype::SvType,
    },
    error::Vcf2BedpeError,
    utils::util::Result,
};
use std::{
    collections::{HashMap, HashSet},
    fmt,
};

/// A typed INFO or FORMAT value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Flag,
    Integer(i64),
    Float(f64),
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{s}"),
            FieldValue::Flag => Ok(()),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(x) => write!(f, "{x:.2}"),
        }
    }
}

/// One VCF data line, interpreted against a `HeaderDescriptor`.
#[derive(Debug, Clone)]
pub struct Variant<'h> {
    header: &'h HeaderDescriptor,
    pub chrom: String,
    pub pos: i64,
    pub id: String,
    pub ref_allele: String,
    pub alt: String,
    pub qual: Option<f64>,
    qual_text: String,
    pub filter: String,
    info: HashMap<String, FieldValue>,
    genotypes: Vec<Genotype>,
    active_formats: HashSet<String>,
    trailing_columns: Vec<String>,
}

impl<'h> Variant<'h> {
    pub fn from_line(line: &str, header: &'h HeaderDescriptor) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let columns: Vec<&str> = line.split('\t').collect();
        if columns.len() < VCF_FIXED_COLUMNS {
            return Err(Vcf2BedpeError::MissingColumns {
                expected: VCF_FIXED_COLUMNS,
                found: columns.len(),
                line: line.to_string(),
            });
        }

        let chrom = columns[0].to_string();
        let pos: i64 = columns[1]
            .parse()
            .map_err(|_| Vcf2BedpeError::MalformedPosition {
                value: columns[1].to_string(),
                line: line.to_string(),
            })?;
        let qual = match columns[5] {
            MISSING_VALUE => None,
            q => match q.parse::<f64>() {
                Ok(q) => Some(q),
                Err(_) => {
                    log::debug!("Non-numeric QUAL {q:?} at {chrom}:{pos}");
                    None
                }
            },
        };

        let mut info = Self::parse_info(columns[7]);
        info.insert(INFO_POS.to_string(), FieldValue::Integer(pos));

        let format_ids: Vec<&str> = columns
            .get(VCF_FORMAT_COLUMN)
            .map(|f| f.split(':').collect())
            .unwrap_or_default();
        let mut active_formats = HashSet::new();
        let mut genotypes = Vec::with_capacity(header.samples.len());
        for (idx, sample) in header.samples.iter().enumerate() {
            let mut genotype = Genotype::new(sample);
            if let Some(values) = columns.get(VCF_FORMAT_COLUMN + 1 + idx) {
                for (field, value) in format_ids.iter().zip(values.split(':')) {
                    let value = FieldValue::from(value);
                    if !genotype.set_format(header, &mut active_formats, field, value) {
                        log::trace!("Dropping undeclared FORMAT field {field} at {chrom}:{pos}");
                    }
                }
            }
            genotypes.push(genotype);
        }

        Ok(Variant {
            header,
            pos,
            id: columns[2].to_string(),
            ref_allele: columns[3].to_string(),
            alt: columns[4].to_string(),
            qual,
            qual_text: columns[5].to_string(),
            filter: columns[6].to_string(),
            info,
            genotypes,
            active_formats,
            trailing_columns: columns[VCF_FORMAT_COLUMN.min(columns.len())..]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            chrom,
        })
    }

    fn parse_info(column: &str) -> HashMap<String, FieldValue> {
        column
            .split(';')
            .filter(|token| !token.is_empty() && *token != MISSING_VALUE)
            .map(|token| match token.split_once('=') {
                Some((key, value)) => (key.to_string(), FieldValue::from(value)),
                None => (token.to_string(), FieldValue::Flag),
            })
            .collect()
    }

    /// QUAL column exactly as it appeared in the input.
    pub fn qual_text(&self) -> &str {
        &self.qual_text
    }

    /// FORMAT and sample columns exactly as they appeared in the input.
    pub fn trailing_columns(&self) -> &[String] {
        &self.trailing_columns
    }

    pub fn info(&self, field: &str) -> Option<&FieldValue> {
        self.info.get(field)
    }

    pub fn has_info(&self, field: &str) -> bool {
        self.info.contains_key(field)
    }

    /// Sets an INFO value; `field` must be declared in the header.
    pub fn set_info(&mut self, field: &str, value: FieldValue) -> Result<()> {
        if self.header.info_decl(field).is_none() {
            return Err(Vcf2BedpeError::UnknownInfoField {
                field: field.to_string(),
            });
        }
        self.info.insert(field.to_string(), value);
        Ok(())
    }

    fn missing_info(&self, field: &str) -> Vcf2BedpeError {
        Vcf2BedpeError::MissingInfoField {
            field: field.to_string(),
            id: self.id.clone(),
            chrom: self.chrom.clone(),
            pos: self.pos,
        }
    }

    pub fn info_str(&self, field: &str) -> Result<String> {
        match self.info(field) {
            None => Err(self.missing_info(field)),
            Some(FieldValue::Flag) => Err(Vcf2BedpeError::InvalidInfoValue {
                field: field.to_string(),
                value: String::new(),
                reason: "expected a value, found a flag".to_string(),
            }),
            Some(value) => Ok(value.to_string()),
        }
    }

    pub fn info_i64(&self, field: &str) -> Result<i64> {
        match self.info(field) {
            None => Err(self.missing_info(field)),
            Some(FieldValue::Integer(i)) => Ok(*i),
            Some(FieldValue::String(s)) => {
                s.parse().map_err(|e| Vcf2BedpeError::InvalidInfoValue {
                    field: field.to_string(),
                    value: s.clone(),
                    reason: format!("{e}"),
                })
            }
            Some(other) => Err(Vcf2BedpeError::InvalidInfoValue {
                field: field.to_string(),
                value: other.to_string(),
                reason: "expected an integer".to_string(),
            }),
        }
    }

    /// Parses a two-value confidence interval field such as `CIPOS=-10,10`.
    pub fn info_offsets(&self, field: &str) -> Result<Option<[i64; 2]>> {
        if !self.has_info(field) {
            return Ok(None);
        }
        let value = self.info_str(field)?;
        let invalid = |reason: String| Vcf2BedpeError::InvalidInfoValue {
            field: field.to_string(),
            value: value.clone(),
            reason,
        };
        let (lo, hi) = value
            .split_once(',')
            .ok_or_else(|| invalid("expected two comma-separated offsets".to_string()))?;
        let lo: i64 = lo.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let hi: i64 = hi.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        Ok(Some([lo, hi]))
    }

    pub fn svtype(&self) -> Result<SvType> {
        Ok(SvType::from(self.info_str(INFO_SVTYPE)?.as_str()))
    }

    pub fn is_secondary(&self) -> bool {
        self.has_info(INFO_SECONDARY)
    }

    pub fn event_id(&self) -> Result<String> {
        self.info_str(INFO_EVENT)
    }

    pub fn genotype(&self, sample: &str) -> Result<&Genotype> {
        self.genotypes
            .iter()
            .find(|g| g.sample == sample)
            .ok_or_else(|| Vcf2BedpeError::UnknownSample {
                sample: sample.to_string(),
            })
    }

    /// Declared INFO fields present on this record, in declaration order.
    pub fn info_string(&self) -> String {
        self.header
            .info
            .iter()
            .filter_map(|decl| {
                let value = self.info.get(&decl.id)?;
                if decl.value_type == ValueType::Flag || *value == FieldValue::Flag {
                    Some(decl.id.clone())
                } else {
                    Some(format!("{}={}", decl.id, value))
                }
            })
            .collect::<Vec<_>>()
            .join(";")
    }

    pub fn format_string(&self) -> String {
        self.header
            .formats
            .iter()
            .filter(|decl| self.active_formats.contains(&decl.id))
            .map(|decl| decl.id.as_str())
            .collect::<Vec<_>>()
            .join(":")
    }

    /// Re-serializes the record as a VCF data line.
    pub fn var_string(&self) -> String {
        let qual = self
            .qual
            .map_or_else(|| MISSING_VALUE.to_string(), |q| format!("{q:.2}"));
        let mut columns = vec![
            self.chrom.clone(),
            self.pos.to_string(),
            self.id.clone(),
            self.ref_allele.clone(),
            self.alt.clone(),
            qual,
            self.filter.clone(),
            self.info_string(),
        ];
        if !self.header.samples.is_empty() {
            columns.push(self.format_string());
            columns.extend(
                self.genotypes
                    .iter()
                    .map(|g| g.gt_string(self.header, &self.active_formats)),
            );
        }
        columns.join("\t")
    }
}

impl fmt::Display for Variant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "(id: {}, {}:{}, alt: {})", self.id, self.chrom, self.pos, self.alt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::variant::test_utils::{sv_header, SV_HEADER};

    #[test]
    fn parses_fixed_columns_and_injects_pos() {
        let header = sv_header();
        let line = "1\t100\tid1\tN\t<DEL>\t60\tPASS\tSVTYPE=DEL;END=500;IMPRECISE\tGT:SU\t0/1:5\t0/0:0";
        let v = Variant::from_line(line, &header).unwrap();
        assert_eq!(v.chrom, "1");
        assert_eq!(v.pos, 100);
        assert_eq!(v.id, "id1");
        assert_eq!(v.alt, "<DEL>");
        assert_eq!(v.qual, Some(60.0));
        assert_eq!(v.qual_text(), "60");
        assert_eq!(v.info("POS"), Some(&FieldValue::Integer(100)));
        assert_eq!(v.info("IMPRECISE"), Some(&FieldValue::Flag));
        assert_eq!(v.info_i64("END").unwrap(), 500);
        assert_eq!(v.svtype().unwrap(), SvType::DELETION);
        assert_eq!(
            v.trailing_columns(),
            &["GT:SU".to_string(), "0/1:5".into(), "0/0:0".into()]
        );
    }

    #[test]
    fn non_numeric_position_is_fatal() {
        let header = sv_header();
        let err = Variant::from_line("1\tabc\tid1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL", &header)
            .unwrap_err();
        assert!(matches!(err, Vcf2BedpeError::MalformedPosition { .. }));
    }

    #[test]
    fn non_numeric_quality_is_kept_verbatim() {
        let header = sv_header();
        let v = Variant::from_line("1\t100\tid1\tN\t<DEL>\t60a\tPASS\tSVTYPE=DEL", &header)
            .unwrap();
        assert_eq!(v.qual, None);
        assert_eq!(v.qual_text(), "60a");
        assert!(v.var_string().contains("\t.\tPASS\t"));
    }

    #[test]
    fn short_line_is_fatal() {
        let header = sv_header();
        let err = Variant::from_line("1\t100\tid1", &header).unwrap_err();
        assert!(matches!(
            err,
            Vcf2BedpeError::MissingColumns { found: 3, .. }
        ));
    }

    #[test]
    fn set_info_rejects_undeclared_fields() {
        let header = sv_header();
        let mut v =
            Variant::from_line("1\t100\tid1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;END=200", &header)
                .unwrap();
        v.set_info("END", FieldValue::Integer(300)).unwrap();
        assert_eq!(v.info_i64("END").unwrap(), 300);
        let err = v.set_info("NOPE", FieldValue::Integer(1)).unwrap_err();
        assert!(matches!(err, Vcf2BedpeError::UnknownInfoField { ref field } if field == "NOPE"));
    }

    #[test]
    fn missing_and_malformed_info_values() {
        let header = sv_header();
        let v = Variant::from_line(
            "1\t100\tid1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL;CIPOS=-10;CIEND=-5,x",
            &header,
        )
        .unwrap();
        assert!(matches!(
            v.info_i64("END").unwrap_err(),
            Vcf2BedpeError::MissingInfoField { .. }
        ));
        assert!(v.info_offsets("CIPOS").is_err());
        assert!(v.info_offsets("CIEND").is_err());
        assert_eq!(v.info_offsets("CILEN").unwrap(), None);
    }

    #[test]
    fn unknown_sample_is_an_error() {
        let header = sv_header();
        let v = Variant::from_line(
            "1\t100\tid1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL\tGT\t0/1\t1/1",
            &header,
        )
        .unwrap();
        assert_eq!(
            v.genotype("S2").unwrap().format("GT"),
            Some(&FieldValue::from("1/1"))
        );
        assert!(matches!(
            v.genotype("S3").unwrap_err(),
            Vcf2BedpeError::UnknownSample { .. }
        ));
    }

    #[test]
    fn info_string_follows_header_order_and_skips_undeclared() {
        let header = sv_header();
        let v = Variant::from_line(
            "1\t100\tid1\tN\t<DEL>\t.\tPASS\tEND=200;FOO=bar;IMPRECISE;SVTYPE=DEL",
            &header,
        )
        .unwrap();
        assert_eq!(v.info("FOO"), Some(&FieldValue::from("bar")));
        assert_eq!(v.info_string(), "SVTYPE=DEL;POS=100;END=200;IMPRECISE");
    }

    #[test]
    fn var_string_formats_qual_and_genotypes() {
        let header = sv_header();
        let v = Variant::from_line(
            "1\t100\tid1\tN\t<DEL>\t7.5\tPASS\tSVTYPE=DEL;END=200\tSU:GT:XX\t3:0/1:9\t0/0",
            &header,
        )
        .unwrap();
        assert_eq!(v.format_string(), "GT:SU");
        assert_eq!(
            v.var_string(),
            "1\t100\tid1\tN\t<DEL>\t7.50\tPASS\tSVTYPE=DEL;POS=100;END=200\tGT:SU\t0/1:3\t.:0/0"
        );

        let missing_qual =
            Variant::from_line("1\t100\tid1\tN\t<DEL>\t.\tPASS\tSVTYPE=DEL\tGT\t0/1\t0/0", &header)
                .unwrap();
        assert!(missing_qual.var_string().contains("\t.\tPASS\t"));
        assert!(SV_HEADER.contains("##FORMAT=<ID=SU"));
    }
}
