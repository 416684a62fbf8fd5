/* Codegen command - generate the Polaris binding files from an IR document */

use std::path::PathBuf;

use crate::error::TargetNotImplemented;
use crate::{driver, ir, Target};

pub fn run(
    ir_path: PathBuf,
    target: Target,
    base_name: String,
    output_dir: PathBuf,
    verbose: bool,
) -> anyhow::Result<()> {
    if verbose {
        println!("Polaris RPC Binding Generator");
        println!("=============================\n");
        println!("[~] Configuration:");
        println!("  Target: {:?}", target);
        println!("  Base name: {}", base_name);
        println!("  Output directory: {}", output_dir.display());
        println!("  IR document: {}", ir_path.display());
        println!();
    }

    if !matches!(target, Target::NdkCpp) {
        return Err(TargetNotImplemented { target }.into());
    }

    if verbose {
        println!("[~] Loading IR document...");
    }

    let document = ir::load_document(&ir_path)?;

    if verbose {
        println!(
            "[~] Loaded {} enum(s), {} struct(s), {} union(s), {} interface(s)",
            document.enums.len(),
            document.structs.len(),
            document.unions.len(),
            document.interfaces.len()
        );
        println!("\n[*] Starting code generation for {:?}...", target);
    }

    let generated = driver::generate(&document, &base_name, &output_dir, verbose)?;

    if verbose {
        println!("[✓] Generated {} file(s):", generated.paths.len());
        for path in &generated.paths {
            println!("    - {}", path.display());
        }
    }

    println!("[✓] Code generation complete!");
    Ok(())
}
