pub(crate) mod dump;
pub(crate) mod tree;

use clap::Subcommand;

#[derive(Subcommand)]
pub(crate) enum DerCommands {
    /// Print a hexadecimal dump of DER data
    Dump {
        #[command(flatten)]
        config: dump::Config,
    },
    /// Print the tag-length-value structure of DER data
    Tree {
        #[command(flatten)]
        config: tree::Config,
    },
}
