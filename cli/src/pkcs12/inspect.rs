use clap::Args;
use hako_der::Mode;
use hako_pkcs12::{Pkcs12, WalkOptions, Walker, standard_registry};

use crate::error::Result;
use crate::output::OutputFormat;
use crate::utils::read_der;

#[derive(Args)]
pub(crate) struct Config {
    /// Path to the PFX file (DER, PEM or Base64). If not specified, reads from stdin
    pub(crate) file: Option<String>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub(crate) output: OutputFormat,

    /// Accept BER input; the structure is normalised to DER
    #[arg(long)]
    pub(crate) ber: bool,

    /// Skip re-encoding each layer and comparing it with the input
    #[arg(long)]
    pub(crate) no_verify: bool,
}

impl Config {
    fn walk_options(&self) -> WalkOptions {
        let mode = if self.ber { Mode::Ber } else { Mode::Der };
        WalkOptions::default()
            .with_mode(mode)
            .with_round_trip(!self.no_verify)
    }
}

pub(crate) fn execute(config: Config) -> Result<()> {
    let der_bytes = read_der(config.file.as_deref())?;
    let pkcs12 = Walker::new(standard_registry())
        .options(config.walk_options())
        .walk(&der_bytes)?;
    print!("{}", render(&pkcs12, config.output)?);
    Ok(())
}

fn render(pkcs12: &Pkcs12, output: OutputFormat) -> Result<String> {
    match output {
        OutputFormat::Text => Ok(pkcs12.to_string()),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(pkcs12)?;
            json.push('\n');
            Ok(json)
        }
    }
}
