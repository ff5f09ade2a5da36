use clap::Subcommand;
use std::path::PathBuf;

pub mod convert;
pub mod md5;
pub mod validate;

#[derive(Subcommand)]
pub enum Commands {
    /// Convert a .modinfo manifest into a .civ5proj project and .civ5sln solution
    #[command(name = "modinfo2proj")]
    ModinfoToProj {
        /// Source manifest, named `[(N) ]Name (v X).modinfo`
        source: PathBuf,

        /// Do not create or update the solution file
        #[arg(long)]
        no_solution: bool,

        /// Output directory (defaults to the manifest's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Convert a .civ5proj project into a versioned .modinfo manifest
    #[command(name = "proj2modinfo")]
    ProjToModinfo {
        /// Source project, named `Name.civ5proj`
        source: PathBuf,

        /// Version of the written manifest (defaults to the project's ModVersion)
        #[arg(long = "mod-version")]
        mod_version: Option<String>,

        /// Existing manifest to carry content hashes forward from
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Do not recompute content hashes from disk
        #[arg(long)]
        no_hash: bool,

        /// Output directory (defaults to the project's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Validate a .modinfo, .civ5proj or .civ5sln file
    Validate {
        /// File to validate (format detected from the extension)
        source: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute the MD5 hashes of every imported file in a manifest
    #[command(name = "update-md5")]
    UpdateMd5 {
        /// Manifest to update
        source: PathBuf,

        /// Write the updated manifest here instead of in place
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying operation fails or validation finds
    /// errors.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::ModinfoToProj {
                source,
                no_solution,
                output,
                quiet,
            } => convert::modinfo_to_proj(source, *no_solution, output.as_deref(), *quiet),
            Commands::ProjToModinfo {
                source,
                mod_version,
                manifest,
                no_hash,
                output,
                quiet,
            } => convert::proj_to_modinfo(
                source,
                mod_version.as_deref(),
                manifest.as_deref(),
                *no_hash,
                output.as_deref(),
                *quiet,
            ),
            Commands::Validate { source, json } => validate::execute(source, *json),
            Commands::UpdateMd5 {
                source,
                output,
                quiet,
            } => md5::execute(source, output.as_deref(), *quiet),
        }
    }
}
