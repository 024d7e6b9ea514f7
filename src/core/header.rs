use crate::{
    constants::{BEDPE_COLUMNS, BEDPE_FILE_FORMAT, FORMAT_GT, INFO_POS, INFO_SVTYPE},
    utils::util::{split_unquoted, strip_quotes, Result},
};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Integer,
    Float,
    Flag,
    Character,
    String,
}

impl ValueType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Integer" => ValueType::Integer,
            "Float" => ValueType::Float,
            "Flag" => ValueType::Flag,
            "Character" => ValueType::Character,
            _ => ValueType::String,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Integer => write!(f, "Integer"),
            ValueType::Float => write!(f, "Float"),
            ValueType::Flag => write!(f, "Flag"),
            ValueType::Character => write!(f, "Character"),
            ValueType::String => write!(f, "String"),
        }
    }
}

/// An `##INFO` or `##FORMAT` declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDecl {
    pub id: String,
    pub number: String,
    pub value_type: ValueType,
    pub description: String,
}

impl FieldDecl {
    pub fn new(id: &str, number: &str, value_type: ValueType, description: &str) -> Self {
        Self {
            id: id.to_string(),
            number: number.to_string(),
            value_type,
            description: strip_quotes(description).to_string(),
        }
    }

    fn header_line(&self, kind: &str) -> String {
        format!(
            "##{kind}=<ID={},Number={},Type={},Description=\"{}\">",
            self.id, self.number, self.value_type, self.description
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AltDecl {
    pub id: String,
    pub description: String,
}

/// Metadata needed to interpret and re-emit VCF record fields.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderDescriptor {
    pub file_format: String,
    pub reference: String,
    pub info: Vec<FieldDecl>,
    pub alts: Vec<AltDecl>,
    pub formats: Vec<FieldDecl>,
    pub misc: Vec<String>,
    pub samples: Vec<String>,
}

impl Default for HeaderDescriptor {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderDescriptor {
    pub fn new() -> Self {
        let mut header = Self {
            file_format: BEDPE_FILE_FORMAT.to_string(),
            reference: String::new(),
            info: Vec::new(),
            alts: Vec::new(),
            formats: Vec::new(),
            misc: Vec::new(),
            samples: Vec::new(),
        };
        header.add_format(FORMAT_GT, "1", ValueType::String, "Genotype");
        header
    }

    pub fn from_lines<I, S>(lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut header = Self::new();
        for line in lines {
            header.add_line(line.as_ref())?;
        }
        Ok(header)
    }

    /// Consumes one `##` meta line or the `#CHROM` column line.
    pub fn add_line(&mut self, line: &str) -> Result<()> {
        let line = line.trim_end_matches(['\r', '\n']);
        if let Some(meta) = line.strip_prefix("##") {
            let (key, value) = meta.split_once('=').unwrap_or((meta, ""));
            match key {
                "fileformat" => self.file_format = value.to_string(),
                "reference" => self.reference = value.to_string(),
                "fileDate" => {}
                "INFO" => {
                    let decl = Self::parse_field_decl(line, value)?;
                    let is_svtype = decl.id == INFO_SVTYPE;
                    self.push_info(decl);
                    if is_svtype {
                        self.add_info(
                            INFO_POS,
                            "1",
                            ValueType::Integer,
                            "Position of the variant described in this record",
                        );
                    }
                }
                "ALT" => {
                    let attrs = Self::parse_structured(line, value)?;
                    let id = Self::required_attr(line, &attrs, "ID")?;
                    let description = Self::attr(&attrs, "Description").unwrap_or_default();
                    self.add_alt(id, description);
                }
                "FORMAT" => {
                    let decl = Self::parse_field_decl(line, value)?;
                    self.push_format(decl);
                }
                _ => self.misc.push(line.to_string()),
            }
        } else if line.starts_with('#') {
            self.samples = line.split('\t').skip(9).map(str::to_string).collect();
        }
        Ok(())
    }

    pub fn add_info(&mut self, id: &str, number: &str, value_type: ValueType, description: &str) {
        self.push_info(FieldDecl::new(id, number, value_type, description));
    }

    pub fn add_format(&mut self, id: &str, number: &str, value_type: ValueType, description: &str) {
        self.push_format(FieldDecl::new(id, number, value_type, description));
    }

    pub fn add_alt(&mut self, id: &str, description: &str) {
        if self.alts.iter().any(|a| a.id == id) {
            log::trace!("Ignoring duplicate ALT declaration {id}");
            return;
        }
        self.alts.push(AltDecl {
            id: id.to_string(),
            description: strip_quotes(description).to_string(),
        });
    }

    fn push_info(&mut self, decl: FieldDecl) {
        if self.info_decl(&decl.id).is_some() {
            log::trace!("Ignoring duplicate INFO declaration {}", decl.id);
            return;
        }
        self.info.push(decl);
    }

    fn push_format(&mut self, decl: FieldDecl) {
        if self.format_decl(&decl.id).is_some() {
            log::trace!("Ignoring duplicate FORMAT declaration {}", decl.id);
            return;
        }
        self.formats.push(decl);
    }

    pub fn info_decl(&self, id: &str) -> Option<&FieldDecl> {
        self.info.iter().find(|d| d.id == id)
    }

    pub fn format_decl(&self, id: &str) -> Option<&FieldDecl> {
        self.formats.iter().find(|d| d.id == id)
    }

    pub fn has_sample(&self, name: &str) -> bool {
        self.samples.iter().any(|s| s == name)
    }

    fn parse_structured<'a>(line: &str, value: &'a str) -> Result<Vec<(&'a str, &'a str)>> {
        let inner = value
            .strip_prefix('<')
            .and_then(|v| v.strip_suffix('>'))
            .ok_or_else(|| crate::vcf2bedpe_error!("Malformed header line: {line}"))?;
        Ok(split_unquoted(inner, ',')
            .into_iter()
            .filter_map(|attr| attr.split_once('='))
            .collect())
    }

    fn attr<'a>(attrs: &[(&'a str, &'a str)], key: &str) -> Option<&'a str> {
        attrs.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
    }

    fn required_attr<'a>(line: &str, attrs: &[(&'a str, &'a str)], key: &str) -> Result<&'a str> {
        Self::attr(attrs, key)
            .ok_or_else(|| crate::vcf2bedpe_error!("{key} missing in header line: {line}"))
    }

    fn parse_field_decl(line: &str, value: &str) -> Result<FieldDecl> {
        let attrs = Self::parse_structured(line, value)?;
        Ok(FieldDecl::new(
            Self::required_attr(line, &attrs, "ID")?,
            Self::attr(&attrs, "Number").unwrap_or("."),
            ValueType::from_tag(Self::attr(&attrs, "Type").unwrap_or("String")),
            Self::attr(&attrs, "Description").unwrap_or_default(),
        ))
    }

    /// Meta lines of the BEDPE output, stamped with `file_date` (`YYYYMMDD`).
    pub fn meta_lines(&self, file_date: &str) -> Vec<String> {
        let mut lines = vec![
            format!("##fileformat={}", self.file_format),
            format!("##fileDate={file_date}"),
            format!("##reference={}", self.reference),
        ];
        lines.extend(self.info.iter().map(|d| d.header_line("INFO")));
        lines.extend(
            self.alts
                .iter()
                .map(|a| format!("##ALT=<ID={},Description=\"{}\">", a.id, a.description)),
        );
        lines.extend(self.formats.iter().map(|d| d.header_line("FORMAT")));
        lines.extend(self.misc.iter().cloned());
        lines
    }

    pub fn bedpe_column_line(&self) -> String {
        let mut columns: Vec<&str> = BEDPE_COLUMNS.to_vec();
        if !self.samples.is_empty() {
            columns.push("FORMAT");
            columns.extend(self.samples.iter().map(String::as_str));
        }
        columns.join("\t")
    }
}
