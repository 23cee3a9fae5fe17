use std::path::PathBuf;

use clap::Parser;

use capex_estimator::domain::foundation::Scenario;

#[derive(Debug, Parser)]
#[command(
    name = "capex-estimator",
    about = "Parametric construction CAPEX estimation across low, mid and high scenarios",
    version
)]
pub struct Cli {
    /// Project request (YAML).
    pub request: PathBuf,

    /// Run the Monte Carlo risk overlay on the mid-scenario total.
    #[arg(long)]
    pub risk: bool,

    /// Write a JSON report to the configured output directory.
    #[arg(long)]
    pub export: bool,

    /// Scenario written to the exported report.
    #[arg(long, default_value = "mid")]
    pub scenario: Scenario,
}
