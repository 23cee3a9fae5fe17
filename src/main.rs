//! Command-line entry point.

mod cli;

use std::fs;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::{error, info};

use capex_estimator::adapters::{JsonReportExporter, YamlCatalogReader};
use capex_estimator::application::{
    AssessRiskCommand, AssessRiskHandler, EstimateProjectCommand, EstimateProjectHandler,
    EstimateProjectResult, ExportReportCommand, ExportReportHandler,
};
use capex_estimator::config::AppConfig;
use capex_estimator::ports::CatalogReader;
use cli::Cli;

fn main() -> ExitCode {
    let args = Cli::parse();
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }
    config.logging.init();

    match run(&config, &args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!(%message, "Estimation failed");
            eprintln!("{}", message);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &AppConfig, args: &Cli) -> Result<(), String> {
    let catalog = YamlCatalogReader::new(&config.data.dir)
        .with_files(config.data.catalog_files())
        .load_catalog()
        .map_err(|e| e.to_string())?;
    let catalog = Arc::new(catalog);

    let request = fs::read_to_string(&args.request)
        .map_err(|e| format!("Failed to read {}: {}", args.request.display(), e))?;
    let command: EstimateProjectCommand = serde_yaml::from_str(&request)
        .map_err(|e| format!("Invalid request {}: {}", args.request.display(), e))?;

    let result = EstimateProjectHandler::new(catalog.clone())
        .handle(command)
        .map_err(|e| e.to_string())?;
    print_comparison(&result);

    if args.risk {
        let cmd = AssessRiskCommand::from_estimate(&result).map_err(|e| e.to_string())?;
        let risk = AssessRiskHandler::new(config.risk.simulator())
            .handle(cmd)
            .map_err(|e| e.to_string())?;

        println!();
        println!("Riesgo (Monte Carlo, sigma {:.3})", risk.summary.sigma);
        println!("  P50 {:>16.0} €", risk.summary.p50);
        println!("  P80 {:>16.0} €", risk.summary.p80);
        println!("  P90 {:>16.0} €", risk.summary.p90);
        println!("Factores con más peso:");
        for driver in risk.drivers.iter().take(3) {
            println!("  {:<16} {:.2}", driver.factor, driver.value);
        }
    }

    if args.export {
        let Some(dir) = &config.report.output_dir else {
            return Err("Report export requested but CAPEX__REPORT__OUTPUT_DIR is not set".to_string());
        };
        let exported = ExportReportHandler::new(catalog, Arc::new(JsonReportExporter::new(dir)))
            .handle(
                &result,
                ExportReportCommand {
                    scenario: args.scenario,
                    notes: Vec::new(),
                },
            )
            .map_err(|e| e.to_string())?;
        info!(report_id = %exported.report_id, "Report written");
        println!();
        println!("Informe: {}", exported.path.display());
    }

    Ok(())
}

fn print_comparison(result: &EstimateProjectResult) {
    println!("{} - {}", result.title, result.module_label);
    println!("Superficie de referencia: {:.0} {}", result.area_ref, result.measurement);
    println!();
    println!(
        "{:<8} {:>14} {:>10} {:>14} {:>8}",
        "Escenario", "Total €", "€/m²", "Directo €", "Calib."
    );
    for row in &result.comparison {
        let per_area = if row.eur_m2.is_nan() {
            "n/d".to_string()
        } else {
            format!("{:.0}", row.eur_m2)
        };
        println!(
            "{:<8} {:>14.0} {:>10} {:>14.0} {:>8.3}",
            row.label, row.total_eur, per_area, row.direct_eur, row.calib_factor
        );
    }
}
