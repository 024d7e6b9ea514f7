pub mod cli;
pub mod commands;
pub mod error;

pub mod core {
    pub mod bedpe;
    pub mod header;
    pub mod svtype;
    pub mod variant;
}

pub mod io {
    pub mod bedpe_writer;
    pub mod readers;
    pub mod vcf_reader;
}

pub mod utils {
    pub mod util;
    pub mod util_intern;
}

pub mod constants;

pub use constants::*;
