use clap::Args;

use crate::error::Result;
use crate::utils::{format_hex_dump, read_der};

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the DER, PEM or Base64 file. If not specified, reads from stdin
    file: Option<String>,
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let der_bytes = read_der(config.file.as_deref())?;
    print!("{}", format_hex_dump(&der_bytes));
    Ok(())
}
