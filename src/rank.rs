//! # Proximity Ranker
//!
//! Orders deduplicated tour events by great-circle distance from the
//! configured reference point, with a deterministic total order: ascending
//! distance, then descending confidence, then city code. Results are
//! truncated to the configured cap and ranked 1..k; rank 1 is flagged as
//! the best value.

use crate::config::{City, RefPoint};
use crate::model::{RankedStop, TourEvent};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two (lat, lon) coordinates, in kilometers.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
}

/// City codes without a gazetteer entry are skipped, not ranked at
/// distance zero.
pub fn rank(
    events: Vec<TourEvent>,
    reference: &RefPoint,
    cap: usize,
    gazetteer: &[City],
) -> Vec<RankedStop> {
    let mut measured: Vec<(TourEvent, String, f64)> = events
        .into_iter()
        .filter_map(|ev| {
            let city = gazetteer.iter().find(|c| c.code == ev.city)?;
            let dist = haversine_km(reference.lat, reference.lon, city.lat, city.lon);
            Some((ev, city.name.clone(), dist))
        })
        .collect();

    measured.sort_by(|(a, _, da), (b, _, db)| {
        da.total_cmp(db)
            .then_with(|| b.confidence.cmp(&a.confidence))
            .then_with(|| a.city.cmp(&b.city))
    });
    measured.truncate(cap);

    measured
        .into_iter()
        .enumerate()
        .map(|(i, (event, city_name, distance_km))| RankedStop {
            event,
            city_name,
            distance_km,
            rank: (i + 1) as u32,
            best_value: i == 0,
        })
        .collect()
}
