//! Terminal rendering of the dashboard page.

use colored::Colorize;
use std::fmt::Write;
use tabled::{builder::Builder, Table};

use sofinscore_core::charts::{DecisionVolume, PortfolioCharts, ScoreDistribution};
use sofinscore_core::dashboard::{DashboardView, PageBody, ResultPanel, Sidebar};
use sofinscore_core::decision::Tone;

const BAR_WIDTH: usize = 40;

pub fn print_page(view: &DashboardView) {
    print!("{}", page_to_string(view));
}

pub fn print_charts(charts: &PortfolioCharts) {
    print!("{}", charts_to_string(charts));
}

pub fn page_to_string(view: &DashboardView) -> String {
    let mut out = String::new();
    match &view.body {
        PageBody::Halted { error } => {
            let _ = writeln!(out, "{}", error.red().bold());
        }
        PageBody::Ready {
            header,
            sidebar,
            result,
            charts,
        } => {
            let _ = writeln!(out, "{}", header.title.bold());
            let _ = writeln!(out, "{}", header.description);
            for bullet in &header.bullets {
                let _ = writeln!(out, "  * {}", bullet);
            }
            divider(&mut out);
            write_sidebar(&mut out, sidebar);
            divider(&mut out);
            write_result(&mut out, result);
            divider(&mut out);
            let _ = writeln!(out, "{}", charts.heading.bold());
            out.push_str(&charts_to_string(&charts.charts));
        }
    }
    out
}

pub fn charts_to_string(charts: &PortfolioCharts) -> String {
    let mut out = String::new();
    write_distribution(&mut out, &charts.score_distribution);
    out.push('\n');
    write_volumes(&mut out, &charts.decision_volumes);
    out
}

fn divider(out: &mut String) {
    let _ = writeln!(out, "{}", "─".repeat(60).dimmed());
}

fn write_sidebar(out: &mut String, sidebar: &Sidebar) {
    let _ = writeln!(out, "{}", sidebar.header.bold());
    let _ = writeln!(out, "{}", sidebar.hint.dimmed());

    let mut builder = Builder::default();
    builder.push_record(["Paramètre", "Valeur", "Plage"]);
    for control in &sidebar.controls {
        let range = match (control.min, control.max) {
            (Some(min), Some(max)) => format!("{} – {}", min, max),
            _ => String::new(),
        };
        builder.push_record([control.label.clone(), control.value.clone(), range]);
    }
    let _ = writeln!(out, "{}", Table::from(builder));
}

fn write_result(out: &mut String, result: &ResultPanel) {
    match result {
        ResultPanel::Idle { message, tone } => {
            let _ = writeln!(out, "{}", toned(message, *tone));
        }
        ResultPanel::Scored {
            heading,
            score_label,
            score_value,
            probability_line,
            banner,
            tone,
            note,
            ..
        } => {
            let _ = writeln!(out, "{}", heading.bold());
            let _ = writeln!(out, "{}: {}", score_label, score_value.bold());
            let _ = writeln!(out, "{}", probability_line);
            let _ = writeln!(out, "{}", toned(banner, *tone).bold());
            let _ = writeln!(out, "{}", toned(note, Tone::Info));
        }
    }
}

fn toned(text: &str, tone: Tone) -> colored::ColoredString {
    match tone {
        Tone::Success => text.green(),
        Tone::Warning => text.yellow(),
        Tone::Error => text.red(),
        Tone::Info => text.blue(),
    }
}

fn write_distribution(out: &mut String, dist: &ScoreDistribution) {
    let _ = writeln!(
        out,
        "{} (n={}, mean {:.1}, std {:.1})",
        dist.title,
        dist.samples.len(),
        dist.sample_mean,
        dist.sample_std_dev
    );
    let peak = dist.histogram.iter().map(|b| b.count).max().unwrap_or(0);
    for bin in &dist.histogram {
        let _ = writeln!(
            out,
            "{:>6.1} – {:>6.1} | {} {}",
            bin.lower,
            bin.upper,
            bar(bin.count, peak).cyan(),
            bin.count
        );
    }
}

fn write_volumes(out: &mut String, volumes: &[DecisionVolume]) {
    let _ = writeln!(out, "Volume par Catégorie");
    let peak = volumes.iter().map(|v| v.volume).max().unwrap_or(0);
    let width = volumes.iter().map(|v| v.label.chars().count()).max().unwrap_or(0);
    for v in volumes {
        let padding = width - v.label.chars().count();
        let _ = writeln!(
            out,
            "{}{} | {} {}",
            v.label,
            " ".repeat(padding),
            toned(&bar(v.volume, peak), v.category.tone()),
            v.volume
        );
    }
}

fn bar(count: u32, peak: u32) -> String {
    if peak == 0 {
        return String::new();
    }
    let len = (count as usize * BAR_WIDTH + peak as usize / 2) / peak as usize;
    "█".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofinscore_core::charts::decision_volumes;

    #[test]
    fn test_bar_scales_to_peak() {
        assert_eq!(bar(750, 750).chars().count(), BAR_WIDTH);
        assert_eq!(bar(150, 750).chars().count(), 8);
        assert_eq!(bar(0, 750), "");
        assert_eq!(bar(3, 0), "");
    }

    #[test]
    fn test_halted_page_prints_only_the_error() {
        colored::control::set_override(false);
        let view = DashboardView::halted("No such file or directory");
        let text = page_to_string(&view);
        assert_eq!(
            text,
            "Erreur de chargement des modèles : No such file or directory\n"
        );
    }

    #[test]
    fn test_volume_chart_lists_every_category() {
        colored::control::set_override(false);
        let mut out = String::new();
        write_volumes(&mut out, &decision_volumes());
        assert!(out.contains("Approuvés"));
        assert!(out.contains("Revue Manuelle"));
        assert!(out.contains("Refusés"));
        assert!(out.lines().nth(1).unwrap().ends_with("750"));
    }
}
