use clap::Parser;
use std::time;
use vcf2bedpe::{
    cli::{init_verbose, Cli, Command, FULL_VERSION},
    commands::convert,
    utils::util::{handle_error_and_exit, Result},
};

#[cfg(target_os = "macos")]
use vcf2bedpe::utils::util_intern::{peak_memory_usage, readable_size};

fn runner() -> Result<()> {
    let cli = Cli::parse();
    init_verbose(&cli);
    log::trace!("CLI options set: {:?}", cli);

    log::info!(
        "Running {}-{} [{}]",
        env!("CARGO_PKG_NAME"),
        &**FULL_VERSION,
        cli.command.name()
    );

    let start_timer = time::Instant::now();
    match cli.command {
        Command::Convert(args) => {
            log::trace!("Convert arguments: {:#?}", args);
            convert(args)?
        }
    }
    log::info!("Total execution time: {:.2?}", start_timer.elapsed());

    #[cfg(target_os = "macos")]
    {
        let (size, unit) = readable_size(peak_memory_usage()?);
        log::info!("Peak memory use: {:.2} {}", size, unit);
    }

    log::info!("{} end", env!("CARGO_PKG_NAME"));
    Ok(())
}

fn main() {
    if let Err(e) = runner() {
        handle_error_and_exit(e);
    }
}
