use crate::cli::AnalyzeArgs;
use crate::config::PartialSyfosConfig;
use crate::error::Result;
use syfos::{
    core::io::csv::{
        read_curve_from_path, write_approach_series_to_path, write_contact_series_to_path,
    },
    workflows::{self, analyze::ParameterEstimate},
};
use tracing::info;

pub fn run(args: AnalyzeArgs) -> Result<()> {
    let partial_config = PartialSyfosConfig::load(args.config.as_deref())?;
    let material = partial_config.merge_with_analyze_args(&args)?;

    info!(
        "Loading curve '{}'/'{}' from {:?}",
        args.x_column, args.y_column, &args.input
    );
    let curve = read_curve_from_path(&args.input, &args.x_column, &args.y_column)?;

    println!("Analyzing curve with {} samples...", curve.len());
    let result = workflows::analyze::run(&curve, &material)?;

    println!(
        "Approach segment: {} samples, contact segment: {} samples",
        result.approach.len(),
        result.contact.len()
    );
    println!(
        "{:<24} {:>14} {:>14} {:>10} {:>8}",
        "Parameter", "Expected", "Mean", "Deviation", "Samples"
    );
    let rows = [
        ("approach k_c (N/m)", result.approach_summary.spring_constant),
        ("approach R (m)", result.approach_summary.radius),
        ("approach A (J)", result.approach_summary.hamaker),
        ("contact k_c (N/m)", result.contact_summary.spring_constant),
        ("contact R (m)", result.contact_summary.radius),
        ("contact E_tot (Pa)", result.contact_summary.reduced_modulus),
    ];
    for (label, estimate) in rows {
        println!("{}", format_estimate(label, &estimate));
    }

    if let Some(path) = &args.approach_output {
        write_approach_series_to_path(&result.approach, path)?;
        println!("✓ Approach parameters written to: {}", path.display());
    }
    if let Some(path) = &args.contact_output {
        write_contact_series_to_path(&result.contact, path)?;
        println!("✓ Contact parameters written to: {}", path.display());
    }

    Ok(())
}

fn format_estimate(label: &str, estimate: &ParameterEstimate) -> String {
    let mean = estimate
        .mean
        .map_or_else(|| "-".to_string(), |mean| format!("{:.4e}", mean));
    let deviation = estimate
        .relative_deviation()
        .map_or_else(|| "-".to_string(), |d| format!("{:.2}%", d * 100.0));
    format!(
        "{:<24} {:>14.4e} {:>14} {:>10} {:>8}",
        label, estimate.expected, mean, deviation, estimate.samples
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use crate::commands::generate;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn format_estimate_marks_missing_mean() {
        let estimate = ParameterEstimate {
            expected: 1.0,
            mean: None,
            samples: 0,
        };
        let line = format_estimate("contact k_c (N/m)", &estimate);
        assert!(line.starts_with("contact k_c (N/m)"));
        assert!(line.trim_end().ends_with('0'));
        assert!(line.contains(" - "));
    }

    #[test]
    fn run_analyzes_a_generated_force_volume() {
        let dir = tempdir().unwrap();
        let volume = dir.path().join("volume.csv");
        let approach = dir.path().join("approach.csv");
        let contact = dir.path().join("contact.csv");

        let cli = Cli::parse_from([
            "syfos",
            "generate",
            "-o",
            volume.to_str().unwrap(),
            "--seed",
            "3",
        ]);
        let Commands::Generate(args) = cli.command else {
            panic!("Expected 'generate' subcommand");
        };
        generate::run(args, true).unwrap();

        let cli = Cli::parse_from([
            "syfos",
            "analyze",
            "-i",
            volume.to_str().unwrap(),
            "--approach-output",
            approach.to_str().unwrap(),
            "--contact-output",
            contact.to_str().unwrap(),
        ]);
        let Commands::Analyze(args) = cli.command else {
            panic!("Expected 'analyze' subcommand");
        };
        run(args).unwrap();

        let approach_csv = fs::read_to_string(approach).unwrap();
        assert!(approach_csv.starts_with("true_distance,force,spring_constant,radius,hamaker"));
        let contact_csv = fs::read_to_string(contact).unwrap();
        assert!(contact_csv.starts_with("deformation,force,spring_constant,radius,reduced_modulus"));
        assert!(contact_csv.lines().count() > 100);
    }

    #[test]
    fn run_reports_missing_column() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("curve.csv");
        fs::write(&input, "z,d\n0.0,0.0\n").unwrap();

        let cli = Cli::parse_from(["syfos", "analyze", "-i", input.to_str().unwrap()]);
        let Commands::Analyze(args) = cli.command else {
            panic!("Expected 'analyze' subcommand");
        };
        let err = run(args).unwrap_err();
        assert!(err.to_string().contains("ideal_curve_x_values"));
    }
}
