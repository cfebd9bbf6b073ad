//! Display view-model derived from one fetch cycle.

use chrono::NaiveDateTime;

use crate::forecast::hourly_timeline;
use crate::model::WeatherSnapshot;

/// One cell of the hourly strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourlyEntry {
    /// `HH:MM` label.
    pub time: String,
    /// Rounded temperature, °C.
    pub temp: i32,
    pub condition: String,
}

/// One row of the daily list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyEntry {
    /// Full weekday name derived from the forecast date.
    pub weekday: String,
    pub min_temp: i32,
    pub max_temp: i32,
    pub condition: String,
}

/// Everything the presentation layer renders for one fetch cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherViewModel {
    pub location_name: String,
    /// Rounded current temperature, °C.
    pub temperature: i32,
    pub condition: String,
    pub feels_like: i32,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity_pct: u8,
    pub hourly: Vec<HourlyEntry>,
    pub daily: Vec<DailyEntry>,
}

impl WeatherViewModel {
    /// Derive the view-model. `now_hour` is the local wall-clock hour at
    /// the moment of derivation. Empty forecast days produce empty hourly
    /// and daily sections, which render as "no data".
    pub fn build(snapshot: &WeatherSnapshot, now_hour: usize) -> Self {
        let current = &snapshot.current;

        let hourly = hourly_timeline(&snapshot.days, now_hour)
            .into_iter()
            .map(|hour| HourlyEntry {
                time: hour_label(&hour.time),
                temp: round(hour.temp_c),
                condition: hour.condition.text,
            })
            .collect();

        let daily = snapshot
            .days
            .iter()
            .map(|day| DailyEntry {
                weekday: day.date.format("%A").to_string(),
                min_temp: round(day.day.mintemp_c),
                max_temp: round(day.day.maxtemp_c),
                condition: day.day.condition.text.clone(),
            })
            .collect();

        Self {
            location_name: current.location_name.clone(),
            temperature: round(current.temp_c),
            condition: current.condition.text.clone(),
            feels_like: round(current.feelslike_c),
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir.clone(),
            humidity_pct: current.humidity_pct,
            hourly,
            daily,
        }
    }
}

/// View state delivered to the presentation layer, one per fetch cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Content(WeatherViewModel),
    Error(String),
}

/// `"2026-08-05 13:00"` -> `"13:00"`; unparseable values pass through.
fn hour_label(time: &str) -> String {
    NaiveDateTime::parse_from_str(time, "%Y-%m-%d %H:%M")
        .map(|t| t.format("%H:%M").to_string())
        .unwrap_or_else(|_| time.to_string())
}

fn round(value: f64) -> i32 {
    value.round() as i32
}
