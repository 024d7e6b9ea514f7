use crate::{core::header::HeaderDescriptor, utils::util::Result};
use std::io::BufRead;

/// Line-oriented VCF reader. The header is consumed up front; data lines are
/// then handed out one at a time.
pub struct VcfReader<R: BufRead> {
    reader: R,
    pending: Option<String>,
    pub line_number: usize,
}

impl<R: BufRead> VcfReader<R> {
    /// Reads all `#` lines into a `HeaderDescriptor`. The header is returned
    /// separately so records can borrow it while the reader keeps advancing.
    pub fn new(mut reader: R) -> Result<(Self, HeaderDescriptor)> {
        let mut header = HeaderDescriptor::new();
        let mut line_number = 0;
        let mut pending = None;
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            line_number += 1;
            if line.starts_with('#') {
                header
                    .add_line(&line)
                    .map_err(|e| crate::vcf2bedpe_error!("Error at VCF line {line_number}: {e}"))?;
            } else {
                pending = Some(line.clone());
                break;
            }
        }
        log::debug!(
            "Read VCF header: {} INFO, {} ALT, {} FORMAT declarations, {} samples",
            header.info.len(),
            header.alts.len(),
            header.formats.len(),
            header.samples.len()
        );
        Ok((
            VcfReader {
                reader,
                pending,
                line_number,
            },
            header,
        ))
    }

    /// Next non-empty data line without its line terminator.
    pub fn next_line(&mut self) -> Result<Option<String>> {
        if let Some(line) = self.pending.take() {
            let line = line.trim_end_matches(['\r', '\n']);
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }
}
