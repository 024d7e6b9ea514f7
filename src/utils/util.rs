use crate::error::Vcf2BedpeResult;
use std::{fmt::Display, sync::Once};

pub type Result<T> = Vcf2BedpeResult<T>;

#[allow(unused)]
static INIT_LOG: Once = Once::new();

#[allow(unused)]
pub fn init_logger() {
    INIT_LOG.call_once(|| {
        env_logger::builder()
            .filter_level(log::LevelFilter::Trace)
            .is_test(true)
            .init();
    });
}

pub fn handle_error_and_exit(err: impl Display) -> ! {
    log::error!("{err}");
    std::process::exit(1);
}

/// Splits `s` on `sep` only where the separator is outside double quotes.
pub fn split_unquoted(s: &str, sep: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;
    for (idx, c) in s.char_indices() {
        if c == '"' {
            in_quotes = !in_quotes;
        } else if c == sep && !in_quotes {
            fields.push(&s[start..idx]);
            start = idx + c.len_utf8();
        }
    }
    fields.push(&s[start..]);
    fields
}

pub fn strip_quotes(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('"') && s.ends_with('"') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}
