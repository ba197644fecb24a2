use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

use sofinscore_core::applicant::{self, ApplicantInput, CreditHistory};
use sofinscore_core::decision;
use sofinscore_core::model::AssetCache;

use crate::input;

/// Credit history as offered by the selector.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum HistoryArg {
    /// Bon (Pas de défaut)
    Good,
    /// Mauvais (Défauts passés)
    Bad,
}

impl From<HistoryArg> for CreditHistory {
    fn from(h: HistoryArg) -> Self {
        match h {
            HistoryArg::Good => CreditHistory::Good,
            HistoryArg::Bad => CreditHistory::Bad,
        }
    }
}

/// The four applicant controls
#[derive(Args)]
pub struct ApplicantArgs {
    /// Path to JSON applicant file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Monthly income in EUR (500 - 20000)
    #[arg(long, alias = "revenu", default_value_t = applicant::DEFAULT_MONTHLY_INCOME)]
    pub income: Decimal,

    /// Applicant age (18 - 90)
    #[arg(
        long,
        default_value_t = applicant::DEFAULT_AGE,
        value_parser = clap::value_parser!(u32).range(applicant::MIN_AGE as i64..=applicant::MAX_AGE as i64)
    )]
    pub age: u32,

    /// Requested loan amount in EUR (1000 - 100000)
    #[arg(long, alias = "montant", default_value_t = applicant::DEFAULT_LOAN_AMOUNT)]
    pub loan_amount: Decimal,

    /// Credit history
    #[arg(long, value_enum, default_value_t = HistoryArg::Bad)]
    pub credit_history: HistoryArg,
}

/// Arguments for a single evaluation
#[derive(Args)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub applicant: ApplicantArgs,
}

/// Build the applicant from `--input`, piped JSON, or the individual flags.
/// Stdin is only read when no file was given.
pub fn resolve_applicant(
    args: &ApplicantArgs,
) -> Result<ApplicantInput, Box<dyn std::error::Error>> {
    let piped = match args.input {
        Some(_) => None,
        None => input::stdin::read_stdin()?,
    };
    applicant_from(args, piped)
}

fn applicant_from(
    args: &ApplicantArgs,
    piped: Option<ApplicantInput>,
) -> Result<ApplicantInput, Box<dyn std::error::Error>> {
    let applicant: ApplicantInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = piped {
        data
    } else {
        applicant::collect_input(
            args.income,
            args.age,
            args.loan_amount,
            args.credit_history.into(),
        )?
    };
    applicant.validate()?;
    Ok(applicant)
}

/// Score one applicant. The model files are loaded before any control is
/// read, so a missing model is reported ahead of bad input.
pub fn run_evaluate(
    args: EvaluateArgs,
    models_dir: &Path,
    cache: &AssetCache,
) -> Result<Value, Box<dyn std::error::Error>> {
    let bundle = cache.get_or_load(models_dir)?;
    let applicant = resolve_applicant(&args.applicant)?;
    let result = decision::evaluate(bundle, &applicant)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use sofinscore_core::ScoringError;
    use std::path::PathBuf;
    use tempfile::TempDir;

    pub(crate) fn fixtures_dir() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../sofinscore-core/tests/fixtures")
    }

    pub(crate) fn flags(income: Decimal) -> ApplicantArgs {
        ApplicantArgs {
            input: None,
            income,
            age: 35,
            loan_amount: dec!(15000),
            credit_history: HistoryArg::Good,
        }
    }

    /// Write `applicant` to a JSON file and point `--input` at it.
    pub(crate) fn from_file(applicant: &ApplicantInput) -> (TempDir, ApplicantArgs) {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("applicant.json");
        std::fs::write(&path, serde_json::to_string(applicant).unwrap()).unwrap();
        let mut args = flags(applicant::DEFAULT_MONTHLY_INCOME);
        args.input = Some(path.to_str().unwrap().to_string());
        (tmp, args)
    }

    pub(crate) fn reference_applicant() -> ApplicantInput {
        ApplicantInput {
            credit_history: CreditHistory::Good,
            ..ApplicantInput::default()
        }
    }

    #[test]
    fn test_missing_models_reported_before_bad_input() {
        let tmp = tempfile::tempdir().unwrap();
        let args = EvaluateArgs {
            applicant: flags(dec!(100)),
        };
        let err = run_evaluate(args, &tmp.path().join("models"), &AssetCache::new()).unwrap_err();
        let scoring = err.downcast_ref::<ScoringError>().expect("scoring error");
        assert!(scoring.is_asset_failure(), "{scoring}");
    }

    #[test]
    fn test_out_of_range_flag_rejected() {
        let err = applicant_from(&flags(dec!(100)), None).unwrap_err();
        let scoring = err.downcast_ref::<ScoringError>().expect("scoring error");
        assert!(matches!(scoring, ScoringError::InvalidInput { field, .. } if field == "monthly_income"));
    }

    #[test]
    fn test_evaluate_scores_input_file() {
        let (_tmp, applicant) = from_file(&reference_applicant());
        let value = run_evaluate(
            EvaluateArgs { applicant },
            &fixtures_dir(),
            &AssetCache::new(),
        )
        .unwrap();
        assert_eq!(value["result"]["decision"], "Approved");
        assert_eq!(value["result"]["reliability_score"], "80.0");
        assert_eq!(value["result"]["features"]["debt_ratio"], 0.5);
    }

    #[test]
    fn test_input_file_wins_over_piped_and_flags() {
        let file_applicant = ApplicantInput {
            age: 50,
            ..reference_applicant()
        };
        let piped = ApplicantInput {
            age: 60,
            ..reference_applicant()
        };
        let (_tmp, args) = from_file(&file_applicant);
        assert_eq!(applicant_from(&args, Some(piped)).unwrap().age, 50);
    }

    #[test]
    fn test_piped_json_wins_over_flags() {
        let piped = ApplicantInput {
            age: 60,
            ..reference_applicant()
        };
        assert_eq!(applicant_from(&flags(dec!(3000)), Some(piped)).unwrap().age, 60);
    }

    #[test]
    fn test_flags_used_without_file_or_pipe() {
        let applicant = applicant_from(&flags(dec!(3000)), None).unwrap();
        assert_eq!(applicant.monthly_income, dec!(3000));
        assert_eq!(applicant.credit_history, CreditHistory::Good);
    }

    #[test]
    fn test_piped_json_is_range_checked() {
        let piped = ApplicantInput {
            age: 12,
            ..reference_applicant()
        };
        assert!(applicant_from(&flags(dec!(3000)), Some(piped)).is_err());
    }

    #[test]
    fn test_missing_input_file_reported() {
        let mut args = flags(dec!(3000));
        args.input = Some("no-such-applicant.json".into());
        let err = applicant_from(&args, None).unwrap_err();
        assert!(err.to_string().contains("Applicant file not found"));
    }
}
