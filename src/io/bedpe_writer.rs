use crate::{
    core::{bedpe::BedpeRecord, header::HeaderDescriptor},
    utils::util::Result,
};
use flate2::{write::GzEncoder, Compression};
use std::{
    fs::File,
    io::{self, BufWriter, Write},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputType {
    Bedpe { is_uncompressed: bool },
}

impl OutputType {
    pub fn from_path(path: Option<&str>) -> Self {
        let is_uncompressed = !path.is_some_and(|p| {
            let p = p.to_lowercase();
            p.ends_with(".gz") || p.ends_with(".bgz")
        });
        OutputType::Bedpe { is_uncompressed }
    }
}

enum Sink {
    Plain(BufWriter<Box<dyn Write>>),
    Gzip(GzEncoder<BufWriter<File>>),
}

/// BEDPE output to a file (plain or gzip, by extension) or standard output.
pub struct BedpeWriter {
    sink: Sink,
}

impl BedpeWriter {
    pub fn new(output: Option<&str>) -> Result<Self> {
        let output_type = OutputType::from_path(output);
        log::trace!("{:?}", &output_type);
        let sink = match (output, output_type) {
            (Some(path), OutputType::Bedpe { is_uncompressed }) => {
                let file = File::create(path).map_err(|e| {
                    crate::vcf2bedpe_error!("Failed to create output file {path}: {e}")
                })?;
                if is_uncompressed {
                    Sink::Plain(BufWriter::new(Box::new(file) as Box<dyn Write>))
                } else {
                    Sink::Gzip(GzEncoder::new(BufWriter::new(file), Compression::default()))
                }
            }
            (None, _) => Sink::Plain(BufWriter::new(Box::new(io::stdout()) as Box<dyn Write>)),
        };
        Ok(BedpeWriter { sink })
    }

    pub fn finish(self) -> Result<()> {
        match self.sink {
            Sink::Plain(mut writer) => writer.flush()?,
            Sink::Gzip(encoder) => {
                encoder.finish()?.flush()?;
            }
        }
        log::trace!("Writer: output finalized");
        Ok(())
    }
}

impl Write for BedpeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.sink {
            Sink::Plain(writer) => writer.write(buf),
            Sink::Gzip(encoder) => encoder.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.sink {
            Sink::Plain(writer) => writer.flush(),
            Sink::Gzip(encoder) => encoder.flush(),
        }
    }
}

/// Writes the BEDPE meta lines and column header.
pub fn write_header<W: Write>(
    writer: &mut W,
    header: &HeaderDescriptor,
    file_date: &str,
) -> Result<()> {
    for line in header.meta_lines(file_date) {
        writeln!(writer, "{line}")?;
    }
    writeln!(writer, "{}", header.bedpe_column_line())?;
    Ok(())
}

pub fn write_record<W: Write>(writer: &mut W, record: &BedpeRecord) -> Result<()> {
    writeln!(writer, "{record}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::MultiGzDecoder;
    use std::{fs, io::Read};
    use tempfile::Builder;

    #[test]
    fn output_type_follows_extension() {
        assert_eq!(
            OutputType::from_path(Some("out.bedpe.gz")),
            OutputType::Bedpe {
                is_uncompressed: false
            }
        );
        assert_eq!(
            OutputType::from_path(Some("out.bedpe")),
            OutputType::Bedpe {
                is_uncompressed: true
            }
        );
        assert_eq!(
            OutputType::from_path(None),
            OutputType::Bedpe {
                is_uncompressed: true
            }
        );
    }

    #[test]
    fn header_ends_with_column_line() -> Result<()> {
        let header = HeaderDescriptor::new();
        let mut out = Vec::new();
        write_header(&mut out, &header, "20261019")?;
        let text = String::from_utf8(out).expect("header should be UTF-8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "##fileformat=BEDPE");
        assert_eq!(lines[1], "##fileDate=20261019");
        assert_eq!(
            *lines.last().unwrap(),
            "#CHROM_A\tSTART_A\tEND_A\tCHROM_B\tSTART_B\tEND_B\tID\tQUAL\tSTRAND_A\tSTRAND_B\tTYPE\tFILTER\tINFO_A\tINFO_B"
        );
        Ok(())
    }

    #[test]
    fn gzip_output_round_trips() -> Result<()> {
        let dir = Builder::new().prefix("vcf2bedpe_writer_").tempdir()?;
        let path = dir.path().join("out.bedpe.gz");
        let path_str = path.to_string_lossy().into_owned();
        let mut writer = BedpeWriter::new(Some(&path_str))?;
        writeln!(writer, "#CHROM_A")?;
        writer.finish()?;

        let mut text = String::new();
        MultiGzDecoder::new(fs::File::open(&path)?).read_to_string(&mut text)?;
        assert_eq!(text, "#CHROM_A\n");
        Ok(())
    }
}
