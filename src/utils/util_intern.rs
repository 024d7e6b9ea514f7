use super::util::Result;

pub fn readable_size(bytes: usize) -> (f64, &'static str) {
    const UNITS: [(f64, &str); 4] = [
        (1.0, "B"),
        (1024.0, "KiB"),
        (1024.0 * 1024.0, "MiB"),
        (1024.0 * 1024.0 * 1024.0, "GiB"),
    ];

    let value = bytes as f64;
    let (scale, unit) = UNITS
        .iter()
        .rev()
        .find(|(scale, _)| value >= *scale)
        .copied()
        .unwrap_or(UNITS[0]);
    (value / scale, unit)
}

#[cfg(target_os = "macos")]
pub fn peak_memory_usage() -> Result<usize> {
    unsafe {
        let mut rusage: libc::rusage = std::mem::zeroed();
        let retval = libc::getrusage(libc::RUSAGE_SELF, &mut rusage as *mut _);
        match retval {
            0 => Ok(rusage.ru_maxrss as usize),
            _ => Err(crate::vcf2bedpe_error!("libc::getrusage call failed")),
        }
    }
}

#[cfg(not(target_os = "macos"))]
pub fn peak_memory_usage() -> Result<usize> {
    Err(crate::vcf2bedpe_error!(
        "No peak_memory_usage implementation for this OS"
    ))
}
