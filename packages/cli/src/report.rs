//! Plain-text rendering of command results.

use std::fmt::Write as _;

use flood_risk_analytics_models::{DatasetSummary, NeighborhoodRank, RiskLevelCounts};
use flood_risk_convert::ConversionReport;
use flood_risk_generate::{GenerateConfig, GeneratedDataset};
use flood_risk_neighborhood_models::Neighborhood;
use flood_risk_risk::{RateBreakdown, RiskIndex};

pub fn generated(config: &GenerateConfig, dataset: &GeneratedDataset) -> String {
    let occurrences: u64 = dataset.rows.iter().map(|r| u64::from(r.occurrences)).sum();
    format!(
        "Generated {} rows ({} days ending {}, seed {}) with {occurrences} occurrences\n\
         Wrote {} bytes to {}",
        dataset.written.rows,
        config.n_days,
        config.end_date,
        config.seed,
        dataset.written.bytes,
        dataset.written.path.display()
    )
}

pub fn converted(report: &ConversionReport) -> String {
    let mut out = format!(
        "Converted {} rows ({} dates x {} neighborhoods)\n\
         Tide days backfilled with mean: {}\n\
         Rainfall cells read as 0.0 mm: {}\n",
        report.rows,
        report.dates,
        report.neighborhoods,
        report.tide_days_backfilled,
        report.rainfall_cells_filled
    );
    if !report.unmapped_stations.is_empty() {
        let _ = writeln!(
            out,
            "Unmapped stations dropped: {}",
            report.unmapped_stations.join(", ")
        );
    }
    let _ = write!(
        out,
        "Wrote {} bytes to {}",
        report.written.bytes,
        report.written.path.display()
    );
    out
}

pub fn summary(summary: &DatasetSummary, levels: &RiskLevelCounts) -> String {
    format!(
        "Rows:              {}\n\
         Neighborhoods:     {}\n\
         Days:              {} ({} to {})\n\
         Occurrences:       {} total, {:.2} per row\n\
         Rainfall (mm):     mean {:.2}, std {:.2}, max {:.2}\n\
         Tide (m):          mean {:.3}, std {:.3}, min {:.3}, max {:.3}\n\
         Vulnerability:     mean {:.3}\n\
         Risk levels:       low {}, moderate {}, high {}",
        summary.rows,
        summary.neighborhoods,
        summary.days,
        summary.first_date,
        summary.last_date,
        summary.total_occurrences,
        summary.mean_occurrences,
        summary.rainfall_mm.mean,
        summary.rainfall_mm.std_dev,
        summary.rainfall_mm.max,
        summary.tide_m.mean,
        summary.tide_m.std_dev,
        summary.tide_m.min,
        summary.tide_m.max,
        summary.mean_vulnerability,
        levels.low,
        levels.moderate,
        levels.high
    )
}

pub fn ranking(ranked: &[NeighborhoodRank]) -> String {
    let mut out = format!(
        "{:>4}  {:<20} {:<14} {:>11} {:>6} {:>9} {:>7} {:>8}\n",
        "RANK", "NAME", "CATEGORY", "OCCURRENCES", "VULN", "RAIN (mm)", "TIDE (m)", "SCORE"
    );
    out.push_str(&"-".repeat(86));
    for entry in ranked {
        let _ = write!(
            out,
            "\n{:>4}  {:<20} {:<14} {:>11} {:>6.2} {:>9.2} {:>7.3} {:>8.2}",
            entry.rank,
            entry.neighborhood,
            entry.category.to_string(),
            entry.total_occurrences,
            entry.vulnerability,
            entry.mean_rainfall_mm,
            entry.mean_tide_m,
            entry.score
        );
    }
    out
}

pub fn score(
    neighborhood: &Neighborhood,
    rain: f64,
    tide: f64,
    rate: &RateBreakdown,
    index: &RiskIndex,
) -> String {
    format!(
        "{} ({}), rain {rain} mm, tide {tide} m\n\
         Occurrence rate λ: {:.3} (rain {:.3}, tide {:.3}, vulnerability {:.3}, density x{:.3})\n\
         Risk index:        {:.3} ({})",
        neighborhood.name,
        neighborhood.category,
        rate.rate,
        rate.rain_score,
        rate.tide_score,
        rate.vulnerability_score,
        rate.density_scale,
        index.score,
        index.level
    )
}
