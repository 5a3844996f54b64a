//! Console rendering of analysis results.

use egfr_cohort::{
    comparison::{Comparison, CrossTab},
    normality::NormalityCheck,
    outcome::Outcome,
    profile::{Profile, Share},
};
use egfr_stats::{
    contingency::{ChiSquare, FisherExact},
    descriptive::DescriptiveStats,
    mann_whitney::MannWhitneyU,
};

/// Significance level used to flag p-values in the console output.
const ALPHA: f64 = 0.05;

const LABEL_WIDTH: usize = 16;
const COLUMN_WIDTH: usize = 22;

pub(crate) fn fmt_percentage(value: Option<f64>) -> String {
    value.map_or_else(|| "n/a".to_owned(), |p| format!("{p:.2}%"))
}

pub(crate) fn fmt_p_value(p: f64) -> String {
    let text = if p < 1e-4 {
        format!("{p:.2e}")
    } else {
        format!("{p:.4}")
    };
    if p < ALPHA { format!("{text} *") } else { text }
}

fn fmt_odds_ratio(value: f64) -> String {
    if value.is_nan() {
        "n/a".to_owned()
    } else if value.is_infinite() {
        "inf".to_owned()
    } else {
        format!("{value:.3}")
    }
}

fn fmt_count(count: usize, percentage: Option<f64>) -> String {
    format!("{count} ({})", fmt_percentage(percentage))
}

fn print_heading(title: &str) {
    println!("{title}");
    println!("{}", "=".repeat(title.chars().count()));
}

pub(crate) fn print_comparison(comparison: &Comparison) {
    print_heading(&format!("{} vs {}", comparison.first, comparison.second));
    println!(
        "Patients: {} vs {}",
        comparison.first_size, comparison.second_size
    );
    println!();

    match &comparison.mann_whitney {
        Outcome::Computed(MannWhitneyU {
            statistic,
            p_value,
            method,
            ..
        }) => println!(
            "Age, Mann-Whitney U: U = {statistic:.1}, p = {} ({method})",
            fmt_p_value(*p_value)
        ),
        Outcome::Unavailable { reason } => println!("Age, Mann-Whitney U: unavailable ({reason})"),
    }
    println!();

    print_cross_tab("Sex", &comparison.by_sex);
    println!();
    print_cross_tab("Smoking", &comparison.by_smoking);
    println!();
}

fn print_cross_tab(title: &str, tab: &CrossTab) {
    println!(
        "  {:<LABEL_WIDTH$} {:>COLUMN_WIDTH$} {:>COLUMN_WIDTH$}",
        title,
        tab.columns[0].label(),
        tab.columns[1].label(),
    );
    println!("  {}", "-".repeat(LABEL_WIDTH + 2 * (COLUMN_WIDTH + 1)));
    for (row, group) in tab.rows.iter().enumerate() {
        let cells = (0..2)
            .map(|col| {
                #[expect(clippy::cast_possible_truncation)]
                let count = tab.table.get(row, col) as usize;
                fmt_count(count, tab.column_percentage(row, col))
            })
            .collect::<Vec<_>>();
        println!(
            "  {:<LABEL_WIDTH$} {:>COLUMN_WIDTH$} {:>COLUMN_WIDTH$}",
            group.label(),
            cells[0],
            cells[1],
        );
    }

    match &tab.fisher {
        Outcome::Computed(FisherExact {
            odds_ratio,
            p_value,
        }) => println!(
            "  Fisher exact: odds ratio = {}, p = {}",
            fmt_odds_ratio(*odds_ratio),
            fmt_p_value(*p_value)
        ),
        Outcome::Unavailable { reason } => println!("  Fisher exact: unavailable ({reason})"),
    }
    match &tab.chi_square {
        Outcome::Computed(ChiSquare {
            statistic,
            p_value,
            dof,
            yates_corrected,
            ..
        }) => println!(
            "  Chi-square:   chi2 = {statistic:.3}, dof = {dof}, p = {}{}",
            fmt_p_value(*p_value),
            if *yates_corrected { " (Yates)" } else { "" }
        ),
        Outcome::Unavailable { reason } => println!("  Chi-square:   unavailable ({reason})"),
    }
}

pub(crate) fn print_normality_table(checks: &[NormalityCheck]) {
    print_heading("Shapiro-Wilk normality of age");
    println!(
        "  {:<24} {:>6} {:>10} {:>12}  {}",
        "Subgroup", "n", "W", "p", "Distribution"
    );
    println!("  {}", "-".repeat(72));
    for check in checks {
        match &check.shapiro {
            Outcome::Computed(sw) => println!(
                "  {:<24} {:>6} {:>10.4} {:>12}  {}",
                check.subgroup.label(),
                check.n,
                sw.statistic,
                fmt_p_value(sw.p_value),
                if sw.p_value < ALPHA {
                    "non-normal"
                } else {
                    "normal"
                },
            ),
            Outcome::Unavailable { reason } => println!(
                "  {:<24} {:>6} {:>10} {:>12}  {reason}",
                check.subgroup.label(),
                check.n,
                "-",
                "-",
            ),
        }
    }
    println!();
}

pub(crate) fn print_profile(profile: &Profile) {
    print_heading(&format!("Profile: {}", profile.subgroup));
    println!("Patients: {}", profile.total);

    match &profile.ages {
        Some(DescriptiveStats {
            min,
            max,
            mean,
            median,
            std_dev,
            ..
        }) => {
            println!("Age: mean {mean:.2}, median {median:.1}, range {min:.0}-{max:.0}");
            if !std_dev.is_nan() {
                println!("     standard deviation {std_dev:.2}");
            }
        }
        None => println!("Age: no patients"),
    }

    println!("Age bands:");
    for band in &profile.age_bands {
        println!(
            "  {:<8} {:>16}",
            band.label(),
            fmt_count(band.count, band.percentage)
        );
    }

    let print_share = |label: &str, share: &Share| {
        println!(
            "  {label:<16} {:>16}",
            fmt_count(share.count, share.percentage)
        );
    };
    println!("Sex:");
    print_share("Men", &profile.men);
    print_share("Women", &profile.women);
    println!("Smoking:");
    print_share("Smokers", &profile.smokers);
    print_share("Non-smokers", &profile.non_smokers);
    print_share("Unknown", &profile.unknown_smoking);
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fmt_percentage() {
        assert_eq!(fmt_percentage(Some(25.0)), "25.00%");
        assert_eq!(fmt_percentage(Some(100.0 / 3.0)), "33.33%");
        assert_eq!(fmt_percentage(None), "n/a");
    }

    #[test]
    fn test_fmt_p_value() {
        assert_eq!(fmt_p_value(0.5), "0.5000");
        assert_eq!(fmt_p_value(0.0123), "0.0123 *");
        assert_eq!(fmt_p_value(0.000_012), "1.20e-5 *");
    }

    #[test]
    fn test_fmt_odds_ratio() {
        assert_eq!(fmt_odds_ratio(f64::NAN), "n/a");
        assert_eq!(fmt_odds_ratio(f64::INFINITY), "inf");
        assert_eq!(fmt_odds_ratio(2.5), "2.500");
    }
}
