//! Page model for the advisor dashboard.
//!
//! Every interaction re-renders the whole page from the current controls,
//! so rendering is a pure function from (assets, controls, button state)
//! to a `DashboardView`. Front ends only have to draw the tree.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::applicant::{self, ApplicantInput};
use crate::charts::{render_charts, PortfolioCharts};
use crate::decision::{self, Decision, PredictionResult, Tone};
use crate::features::compute_features;
use crate::model::ModelBundle;
use crate::ScoringResult;

pub const PAGE_TITLE: &str = "SofinScore - Dashboard Décisionnel";
pub const APP_TITLE: &str = "SofinScore : Outil d'Aide à la Décision Crédit";
pub const EVALUATE_LABEL: &str = "Évaluer le Dossier";
pub const RESULT_HEADING: &str = "Résultat de l'Analyse";
pub const CHARTS_HEADING: &str = "Aperçu Statistique du Portefeuille";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub page_title: String,
    pub body: PageBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PageBody {
    /// Assets failed to load; nothing else is drawn.
    Halted { error: String },
    Ready {
        header: Header,
        sidebar: Sidebar,
        result: ResultPanel,
        charts: ChartsPanel,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub title: String,
    pub description: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sidebar {
    pub header: String,
    pub hint: String,
    pub controls: Vec<ControlView>,
    pub action: String,
}

/// One operator control with its current value and allowed range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlView {
    pub key: String,
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResultPanel {
    Idle {
        message: String,
        tone: Tone,
    },
    Scored {
        heading: String,
        score_label: String,
        score_value: String,
        probability_line: String,
        decision: Decision,
        banner: String,
        tone: Tone,
        note: String,
        prediction: PredictionResult,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartsPanel {
    pub heading: String,
    #[serde(flatten)]
    pub charts: PortfolioCharts,
}

impl DashboardView {
    pub fn halted(error: impl std::fmt::Display) -> Self {
        Self {
            page_title: PAGE_TITLE.into(),
            body: PageBody::Halted {
                error: format!("Erreur de chargement des modèles : {error}"),
            },
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self.body, PageBody::Halted { .. })
    }

    /// The prediction shown on the page, if the button was pressed.
    pub fn prediction(&self) -> Option<&PredictionResult> {
        match &self.body {
            PageBody::Ready {
                result: ResultPanel::Scored { prediction, .. },
                ..
            } => Some(prediction),
            _ => None,
        }
    }
}

/// Result area: the scored panel, or the idle prompt before evaluation.
pub fn render_result(result: Option<&PredictionResult>, models_dir: &Path) -> ResultPanel {
    match result {
        None => ResultPanel::Idle {
            message: format!(
                "Utilisez le panneau de gauche pour remplir les données du client \
                 et cliquez sur '{EVALUATE_LABEL}'."
            ),
            tone: Tone::Info,
        },
        Some(p) => ResultPanel::Scored {
            heading: RESULT_HEADING.into(),
            score_label: "Score de Fiabilité".into(),
            score_value: format!("{:.1}/100", p.reliability_score),
            probability_line: format!("Probabilité de défaut : {:.2}%", p.default_probability_pct),
            decision: p.decision,
            banner: p.decision.banner(),
            tone: p.decision.tone(),
            note: format!(
                "Note technique : Ce score est calculé en temps réel via le modèle \
                 Random Forest stocké dans `{}`.",
                models_dir.display()
            ),
            prediction: p.clone(),
        },
    }
}

/// Render the whole page for one interaction.
///
/// An asset failure halts the page with the raw error; out-of-range
/// controls are reported as an error to the caller.
pub fn render_page(
    assets: ScoringResult<&ModelBundle>,
    input: &ApplicantInput,
    evaluate: bool,
    seed: Option<u64>,
) -> ScoringResult<DashboardView> {
    let bundle = match assets {
        Ok(b) => b,
        Err(e) => {
            tracing::warn!(error = %e, "dashboard halted");
            return Ok(DashboardView::halted(e));
        }
    };
    input.validate()?;

    let prediction = if evaluate {
        Some(decision::predict(bundle, &compute_features(input)))
    } else {
        None
    };

    Ok(DashboardView {
        page_title: PAGE_TITLE.into(),
        body: PageBody::Ready {
            header: header(),
            sidebar: sidebar(input),
            result: render_result(prediction.as_ref(), &bundle.source),
            charts: ChartsPanel {
                heading: CHARTS_HEADING.into(),
                charts: render_charts(seed)?,
            },
        },
    })
}

fn header() -> Header {
    Header {
        title: APP_TITLE.into(),
        description: "Cette interface simule l'outil utilisé par les conseillers Sofinco \
                      pour évaluer un risque de crédit en temps réel."
            .into(),
        bullets: vec![
            "Modèle : Random Forest (Scoring de risque)".into(),
            "Statut : Démonstration technique (End-to-End)".into(),
        ],
    }
}

fn sidebar(input: &ApplicantInput) -> Sidebar {
    Sidebar {
        header: "Paramètres du Client".into(),
        hint: "Modifiez les curseurs pour tester le score.".into(),
        controls: vec![
            ControlView {
                key: "monthly_income".into(),
                label: "Revenu mensuel (€)".into(),
                value: input.monthly_income.to_string(),
                min: Some(applicant::MIN_MONTHLY_INCOME),
                max: Some(applicant::MAX_MONTHLY_INCOME),
                step: Some(applicant::MONTHLY_INCOME_STEP),
            },
            ControlView {
                key: "age".into(),
                label: "Âge du client".into(),
                value: input.age.to_string(),
                min: Some(Decimal::from(applicant::MIN_AGE)),
                max: Some(Decimal::from(applicant::MAX_AGE)),
                step: Some(Decimal::ONE),
            },
            ControlView {
                key: "loan_amount".into(),
                label: "Montant du prêt demandé (€)".into(),
                value: input.loan_amount.to_string(),
                min: Some(applicant::MIN_LOAN_AMOUNT),
                max: Some(applicant::MAX_LOAN_AMOUNT),
                step: Some(applicant::LOAN_AMOUNT_STEP),
            },
            ControlView {
                key: "credit_history".into(),
                label: "Historique de crédit".into(),
                value: input.credit_history.label().into(),
                min: None,
                max: None,
                step: None,
            },
        ],
        action: EVALUATE_LABEL.into(),
    }
}
