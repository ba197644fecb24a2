use clap::Args;
use std::path::Path;

use sofinscore_core::applicant::ApplicantInput;
use sofinscore_core::dashboard::{self, DashboardView};
use sofinscore_core::model::AssetCache;

use super::evaluate::{resolve_applicant, ApplicantArgs};
use crate::OutputFormat;

/// Arguments for the full dashboard page
#[derive(Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub applicant: ApplicantArgs,

    /// Press "Évaluer le Dossier": score the applicant instead of showing the prompt
    #[arg(long)]
    pub evaluate: bool,

    /// Seed for the synthetic score distribution (fresh draw when omitted)
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The page is a display tree or a terminal rendering; it has no flat form.
pub fn check_output(format: &OutputFormat) -> Result<(), String> {
    match format {
        OutputFormat::Json | OutputFormat::Table => Ok(()),
        other => Err(format!(
            "dashboard supports --output json or table, not {other:?}"
        )),
    }
}

/// Render the page. Asset failures come back as a halted view, not an error.
pub fn run_dashboard(
    args: DashboardArgs,
    models_dir: &Path,
    cache: &AssetCache,
) -> Result<DashboardView, Box<dyn std::error::Error>> {
    let assets = cache.get_or_load(models_dir);
    let applicant = match assets {
        Ok(_) => resolve_applicant(&args.applicant)?,
        Err(_) => ApplicantInput::default(),
    };
    Ok(dashboard::render_page(
        assets,
        &applicant,
        args.evaluate,
        args.seed,
    )?)
}

/// Process exit status for a rendered page: 1 when it halted.
pub fn exit_code(view: &DashboardView) -> i32 {
    if view.is_halted() {
        1
    } else {
        0
    }
}
