use clap::{Parser, Subcommand};
use std::path::PathBuf;

use abi_rpc_gen::{cmds, Target};

#[derive(Parser)]
#[command(name = "abi-rpc-gen")]
#[command(about = "Polaris RPC binding generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /* Generate Polaris binding files from an IR document */
    Codegen {
        /* Path to the IR JSON document */
        #[arg(short = 'p', long = "ir", value_name = "FILE", required = true)]
        ir: PathBuf,

        /* Target language flavor for the emitted bindings */
        #[arg(short = 't', long = "target", value_enum, required = true)]
        target: Target,

        /* Base name shared by the six emitted file names */
        #[arg(short = 'b', long = "base-name", value_name = "NAME", required = true)]
        base_name: String,

        /* Output directory for generated code */
        #[arg(short = 'o', long = "output-dir", value_name = "DIR", default_value = ".")]
        output_dir: PathBuf,

        /* Enable verbose output */
        #[arg(short = 'v', long = "verbose")]
        verbose: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Codegen { ir, target, base_name, output_dir, verbose } => {
            cmds::codegen::run(ir, target, base_name, output_dir, verbose)?;
        }
    }

    Ok(())
}
