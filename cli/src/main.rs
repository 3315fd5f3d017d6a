use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::Level;

use ebml_registry_compiler::{
    compile_registry_file, write_registry, CompileOptions, EmitOptions, IdDecoding, Target,
};
use ebml_registry_compiler::emit::DEFAULT_REGISTRY_NAME;
use ebml_registry_compiler::error::RegistryError;

#[derive(Parser)]
#[command(name = "ebml-regc")]
#[command(about = "Generate a typed element registry from an EBML schema document", long_about = None)]
struct Cli {
    /// Schema document listing the `<element>` definitions
    schema: PathBuf,

    /// Write the registry to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Language of the generated registry
    #[arg(long, default_value_t = Target::Rust)]
    target: Target,

    /// Name of the generated registry type
    #[arg(long, default_value = DEFAULT_REGISTRY_NAME)]
    registry_name: String,

    /// Keep the leading byte of every element id (by default it is dropped)
    #[arg(long)]
    full_ids: bool,

    /// Fail if two elements decode to the same binary id
    #[arg(long)]
    unique_ids: bool,

    /// Log more detail to stderr (repeat for more)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), RegistryError> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    let options = CompileOptions {
        id_decoding: if cli.full_ids {
            IdDecoding::Full
        } else {
            IdDecoding::DropLeadingByte
        },
        check_duplicate_ids: cli.unique_ids,
        emit: EmitOptions {
            target:        cli.target,
            registry_name: cli.registry_name,
        },
    };

    // The registry is only written once it has been generated completely.
    let registry = compile_registry_file(&cli.schema, &options)?;
    write_registry(&registry, cli.output.as_deref())
}

fn setup_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
