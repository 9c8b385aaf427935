pub(crate) mod inspect;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum Pkcs12Commands {
    /// Inspect the structure of a PKCS#12 (PFX) file
    Inspect {
        #[command(flatten)]
        config: inspect::Config,
    },
}
