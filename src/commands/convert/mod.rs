mod pairing;

pub use pairing::{BreakendPairer, PairingStats};

use crate::{
    cli::ConvertArgs,
    constants::BEDPE_FILE_FORMAT,
    core::variant::Variant,
    io::{
        bedpe_writer::{write_header, write_record, BedpeWriter},
        readers::open_input,
        vcf_reader::VcfReader,
    },
    utils::util::Result,
};
use std::io::{BufRead, Write};

pub fn convert(args: ConvertArgs) -> Result<()> {
    let input = open_input(args.input.as_deref())?;
    let mut writer = BedpeWriter::new(args.output.as_deref())?;

    let stats = convert_stream(input, &mut writer)?;
    writer.finish()?;

    log::info!(
        "Converted {} VCF records into {} BEDPE rows ({} single-line, {} breakend pairs)",
        stats.records,
        stats.rows(),
        stats.single_line,
        stats.pairs
    );
    let orphans = stats.orphan_primaries + stats.orphan_secondaries;
    if orphans > 0 {
        log::warn!(
            "{} breakend events were missing one half ({} without secondary, {} without primary)",
            orphans,
            stats.orphan_primaries,
            stats.orphan_secondaries
        );
    }
    Ok(())
}

/// Converts a whole VCF stream into BEDPE, header included.
pub fn convert_stream<R: BufRead, W: Write>(input: R, output: &mut W) -> Result<PairingStats> {
    let (mut reader, mut header) = VcfReader::new(input)?;
    header.file_format = BEDPE_FILE_FORMAT.to_string();
    let file_date = chrono::Local::now().format("%Y%m%d").to_string();
    write_header(output, &header, &file_date)?;

    let header = header;
    let mut pairer = BreakendPairer::new();
    while let Some(line) = reader.next_line()? {
        let converted = Variant::from_line(&line, &header).and_then(|v| pairer.push(v));
        match converted {
            Ok(Some(row)) => write_record(output, &row)?,
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to convert VCF line {}", reader.line_number);
                return Err(e);
            }
        }
        if reader.line_number % 100_000 == 0 {
            log::debug!(
                "Processed {} lines, {} breakend halves pending",
                reader.line_number,
                pairer.pending()
            );
        }
    }

    for row in pairer.finish()? {
        write_record(output, &row)?;
    }
    output.flush()?;
    Ok(pairer.stats)
}
