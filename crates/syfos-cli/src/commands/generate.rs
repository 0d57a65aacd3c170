use crate::cli::GenerateArgs;
use crate::config::PartialSyfosConfig;
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use std::path::{Path, PathBuf};
use syfos::{
    core::io::csv::{write_force_volume_to_path, write_metadata_to_path},
    engine::progress::ProgressReporter,
    workflows,
};
use tracing::info;

pub fn run(args: GenerateArgs, quiet: bool) -> Result<()> {
    let partial_config = PartialSyfosConfig::load(args.config.as_deref())?;
    info!("Merging configuration from file and CLI arguments...");
    let final_config = partial_config.merge_with_generate_args(&args)?;

    let progress_handler = if quiet {
        CliProgressHandler::hidden()
    } else {
        CliProgressHandler::new()
    };
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!("Synthesizing force volume...");
    info!("Invoking the core synthesis workflow...");
    let result = workflows::synthesize::run(&final_config, &reporter)?;

    info!(
        curves = result.force_volume.len(),
        samples = result.force_volume.ideal().len(),
        seed = result.seed,
        "Workflow finished."
    );

    write_force_volume_to_path(&result.force_volume, &args.output)?;
    println!(
        "✓ Force volume ({} curves, {} samples each) written to: {}",
        result.force_volume.len(),
        result.force_volume.ideal().len(),
        args.output.display()
    );

    let metadata_path = args
        .metadata
        .clone()
        .unwrap_or_else(|| default_metadata_path(&args.output));
    write_metadata_to_path(&result.metadata, &metadata_path)?;
    println!("✓ Metadata written to: {}", metadata_path.display());
    println!(
        "  E_tot = {:e} Pa, jtc = {:e} m, A = {:e} J, seed = {}",
        result.metadata.etot, result.metadata.jtc, result.metadata.hamaker, result.seed
    );

    Ok(())
}

/// `dir/volume.csv` becomes `dir/volume_metadata.csv`.
fn default_metadata_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| "force_volume".to_string());
    output.with_file_name(format!("{}_metadata.csv", stem))
}
