use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, NaiveDate, Utc};
use itertools::Itertools;
use model::{track::TrackPoint, vehicle::VehicleReading, GeoPoint, Located, WithDistance};
use utility::geo::{feet_to_miles, miles_to_feet};

/// Fleet listing: fastest first, then by name.
pub fn list_vehicles(readings: Vec<VehicleReading>, active_only: bool) -> Vec<VehicleReading> {
    readings
        .into_iter()
        .filter(|reading| !active_only || reading.is_moving())
        .sorted_by(|a, b| {
            b.speed_mph
                .total_cmp(&a.speed_mph)
                .then_with(|| a.name.cmp(&b.name))
        })
        .collect()
}

/// Vehicles within `radius_miles` of `reference`, nearest first.
///
/// The whole ranking is computed here; callers truncate afterwards.
pub fn vehicles_near(
    readings: Vec<VehicleReading>,
    reference: &GeoPoint,
    radius_miles: f64,
) -> Vec<WithDistance<VehicleReading>> {
    readings
        .into_iter()
        .filter_map(|reading| reading.with_distance_to(reference))
        .filter(|near| near.distance_miles <= radius_miles)
        .sorted_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles))
        .collect()
}

/// A track point attributed to a vehicle passing the reference location.
#[derive(Debug, Clone, PartialEq)]
pub struct Pass {
    pub point: TrackPoint,
    pub distance_feet: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlowReport {
    // never empty, most recent first
    passes: Vec<Pass>,
    vehicles: BTreeSet<String>,
    pass_counts: BTreeMap<String, usize>,
}

impl PlowReport {
    fn new(mut passes: Vec<Pass>) -> Option<Self> {
        if passes.is_empty() {
            return None;
        }
        // `None < Some(_)`, so untimed passes end up last
        passes.sort_by(|a, b| b.point.observed_at.cmp(&a.point.observed_at));

        let pass_counts: BTreeMap<String, usize> = passes
            .iter()
            .map(|pass| pass.point.name.clone())
            .counts()
            .into_iter()
            .collect();
        let vehicles = pass_counts.keys().cloned().collect();

        Some(Self {
            passes,
            vehicles,
            pass_counts,
        })
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn most_recent(&self) -> &Pass {
        &self.passes[0]
    }

    pub fn vehicles(&self) -> &BTreeSet<String> {
        &self.vehicles
    }

    /// Number of passes per vehicle, ordered by vehicle name.
    pub fn pass_counts(&self) -> &BTreeMap<String, usize> {
        &self.pass_counts
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlowCheck {
    NotPlowed,
    Plowed(PlowReport),
}

impl PlowCheck {
    pub fn is_plowed(&self) -> bool {
        matches!(self, PlowCheck::Plowed(_))
    }
}

/// Whether any track sample since `since` lies within `radius_feet` of
/// `reference`.
///
/// The track is expected to be restricted to the window already; samples
/// whose known time predates `since` are dropped anyway, untimed samples
/// are kept.
pub fn was_plowed(
    track: Vec<TrackPoint>,
    reference: &GeoPoint,
    radius_feet: f64,
    since: DateTime<Utc>,
) -> PlowCheck {
    let radius_miles = feet_to_miles(radius_feet);

    let passes = track
        .into_iter()
        .filter(|point| point.observed_at.map_or(true, |observed| observed >= since))
        .filter_map(|point| point.with_distance_to(reference))
        .filter(|near| near.distance_miles <= radius_miles)
        .map(|near| Pass {
            distance_feet: miles_to_feet(near.distance_miles),
            point: near.content,
        })
        .collect::<Vec<_>>();
    log::debug!("{} track samples within {radius_feet} ft of {reference}.", passes.len());

    match PlowReport::new(passes) {
        Some(report) => PlowCheck::Plowed(report),
        None => PlowCheck::NotPlowed,
    }
}

/// Track points sharing one calendar day (UTC).
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup {
    /// `None` only when the very first point has no time.
    pub day: Option<NaiveDate>,
    pub points: Vec<TrackPoint>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrackDays {
    pub days: Vec<DayGroup>,
    pub total: usize,
    pub remaining: usize,
}

/// Split a time ordered track into day groups, keeping at most `max_points`.
///
/// The input order is preserved. A new group starts whenever a timed point
/// falls on a different date than the current group; untimed points stay in
/// the current group.
pub fn group_track_by_day(track: Vec<TrackPoint>, max_points: usize) -> TrackDays {
    let usable = track
        .into_iter()
        .filter(|point| point.location().is_some())
        .collect::<Vec<_>>();
    let total = usable.len();

    let mut days: Vec<DayGroup> = vec![];
    for point in usable.into_iter().take(max_points) {
        let day = point.observed_at.map(|observed| observed.date_naive());
        match days.last_mut() {
            Some(current) if day.is_none() || current.day == day => current.points.push(point),
            _ => days.push(DayGroup {
                day,
                points: vec![point],
            }),
        }
    }

    TrackDays {
        days,
        total,
        remaining: total.saturating_sub(max_points),
    }
}
