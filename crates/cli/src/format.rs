use chrono::{DateTime, NaiveDate, Utc};
use model::{track::TrackPoint, vehicle::VehicleReading};
use utility::geo::compass_point;

pub const MOVING: &str = "🟢 Moving";
pub const STOPPED: &str = "🔴 Stopped";

pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

fn movement(reading: &VehicleReading) -> &'static str {
    if reading.is_moving() {
        MOVING
    } else {
        STOPPED
    }
}

/// `🟢 Moving (23.0 mph)`, or `🔴 Stopped (parked)` for a zero speed.
pub fn status_line(reading: &VehicleReading) -> String {
    if reading.speed_mph > 0.0 {
        format!("{} ({:.1} mph)", movement(reading), reading.speed_mph)
    } else {
        format!("{} (parked)", movement(reading))
    }
}

/// Movement with the speed always shown, as used for nearby vehicles.
pub fn speed_line(reading: &VehicleReading) -> String {
    format!("{} ({:.1} mph)", movement(reading), reading.speed_mph)
}

pub fn coordinates(latitude: Option<f64>, longitude: Option<f64>) -> String {
    let part = |value: Option<f64>| match value {
        Some(value) => format!("{value:.5}"),
        None => "N/A".to_owned(),
    };
    format!("{}, {}", part(latitude), part(longitude))
}

pub fn heading(heading_degrees: f64) -> String {
    format!("{heading_degrees:.0}° ({})", compass_point(heading_degrees))
}

pub fn day_label(day: Option<NaiveDate>) -> String {
    match day {
        Some(day) => format!("--- {} ---", day.format("%A, %B %d")),
        None => "--- unknown date ---".to_owned(),
    }
}

pub fn clock(observed_at: Option<DateTime<Utc>>) -> String {
    match observed_at {
        Some(observed_at) => observed_at.format("%H:%M").to_string(),
        None => "??:??".to_owned(),
    }
}

pub fn track_line(point: &TrackPoint) -> String {
    format!(
        "  {}  ({})",
        clock(point.observed_at),
        coordinates(point.latitude, point.longitude)
    )
}
