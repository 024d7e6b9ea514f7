use crate::{error::Vcf2BedpeError, utils::util::Result};
use flate2::read::MultiGzDecoder;
use std::{
    fs::File,
    io::{self, BufRead, BufReader, IsTerminal},
    path::Path,
};

fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".gzip") || path_str.ends_with(".bgz")
}

pub fn open_vcf_reader(path: &Path) -> Result<Box<dyn BufRead>> {
    let file = File::open(path)
        .map_err(|error| crate::vcf2bedpe_error!("Failed to open file {}: {error}", path.display()))?;
    if is_gzipped(path) {
        let gz_decoder = MultiGzDecoder::new(file);
        if gz_decoder.header().is_some() {
            Ok(Box::new(BufReader::new(gz_decoder)))
        } else {
            Err(Vcf2BedpeError::InvalidGzipHeader {
                path: path.to_path_buf(),
            })
        }
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Opens `path`, or standard input when no path is given. An interactive
/// terminal on standard input is refused.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => open_vcf_reader(path),
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                return Err(crate::vcf2bedpe_error!(
                    "No input VCF given and standard input is a terminal; use --input or pipe a VCF"
                ));
            }
            log::debug!("Reading VCF from standard input");
            Ok(Box::new(stdin.lock()))
        }
    }
}
