//! Joins the tide and rainfall series onto the neighborhood registry.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use flood_risk_dataset_models::{DailyObservation, sort_observations};
use flood_risk_generate::{Jitter, enrich_observation};
use flood_risk_neighborhood_models::Neighborhood;
use rand::Rng;

use crate::rainfall::RainfallSeries;
use crate::tide::TideSeries;

/// Every date present in either source, ascending.
#[must_use]
pub fn union_dates(tide: &TideSeries, rainfall: &RainfallSeries) -> Vec<NaiveDate> {
    let mut dates: BTreeSet<NaiveDate> = tide.daily.keys().copied().collect();
    dates.extend(rainfall.dates());
    dates.into_iter().collect()
}

/// Builds one row per (date, neighborhood) over the union of source
/// dates.
///
/// Tide is shared by every neighborhood on a date and falls back to the
/// tide series mean; rainfall falls back to 0.0 mm. Draws are taken
/// neighborhood-major, date-minor. Rows are returned sorted by date,
/// then neighborhood name.
pub fn assemble<R: Rng + ?Sized>(
    tide: &TideSeries,
    rainfall: &RainfallSeries,
    neighborhoods: &[Neighborhood],
    jitter: &Jitter,
    rng: &mut R,
) -> Vec<DailyObservation> {
    let dates = union_dates(tide, rainfall);
    let mut rows = Vec::with_capacity(dates.len() * neighborhoods.len());

    for neighborhood in neighborhoods {
        for date in &dates {
            rows.push(enrich_observation(
                *date,
                neighborhood,
                rainfall.rainfall_or_zero(*date, &neighborhood.name),
                tide.height_or_mean(*date),
                jitter,
                rng,
            ));
        }
    }

    sort_observations(&mut rows);
    rows
}
