use super::Variant;
use crate::core::header::HeaderDescriptor;

pub const SV_HEADER: &str = "\
##fileformat=VCFv4.2
##source=LUMPY
##INFO=<ID=SVTYPE,Number=1,Type=String,Description=\"Type of structural variant\">
##INFO=<ID=END,Number=1,Type=Integer,Description=\"End position of the variant described in this record\">
##INFO=<ID=STRANDS,Number=.,Type=String,Description=\"Strand orientation of the adjacency in BEDPE format (DEL:+-, DUP:-+, INV:++/--)\">
##INFO=<ID=IMPRECISE,Number=0,Type=Flag,Description=\"Imprecise structural variation\">
##INFO=<ID=CIPOS,Number=2,Type=Integer,Description=\"Confidence interval around POS for imprecise variants\">
##INFO=<ID=CIEND,Number=2,Type=Integer,Description=\"Confidence interval around END for imprecise variants\">
##INFO=<ID=EVENT,Number=1,Type=String,Description=\"ID of event associated to breakend\">
##INFO=<ID=SECONDARY,Number=0,Type=Flag,Description=\"Secondary breakend in a multi-line variants\">
##ALT=<ID=DEL,Description=\"Deletion\">
##FORMAT=<ID=SU,Number=1,Type=Integer,Description=\"Number of pieces of evidence supporting the variant\">
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tS1\tS2";

pub fn sv_header() -> HeaderDescriptor {
    HeaderDescriptor::from_lines(SV_HEADER.lines()).expect("test header should parse")
}

pub fn variant<'h>(header: &'h HeaderDescriptor, line: &str) -> Variant<'h> {
    Variant::from_line(line, header).expect("test record should parse")
}
