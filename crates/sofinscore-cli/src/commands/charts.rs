use clap::Args;

use sofinscore_core::charts::{self, PortfolioCharts};

/// Arguments for the portfolio overview charts
#[derive(Args)]
pub struct ChartsArgs {
    /// Seed for the synthetic score distribution (fresh draw when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn run_charts(args: ChartsArgs) -> Result<PortfolioCharts, Box<dyn std::error::Error>> {
    Ok(charts::render_charts(args.seed)?)
}
