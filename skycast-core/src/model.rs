use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Geographic coordinate. Produced once per fetch cycle and never cached
/// between cycles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// `q` query value understood by weatherapi.com: `"lat,lon"`, full
    /// decimal precision.
    pub fn as_query(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// Condition descriptor as reported by the API. `code` is a small
/// positive integer enumerating condition types.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
    pub code: i32,
}

/// `location` block shared by both endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct Place {
    pub name: String,
    pub region: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub localtime: String,
}

/// `current` block. `temp_c` and `temp_f` are both reported by the API;
/// neither is derived from the other.
#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    pub temp_f: f64,
    #[serde(deserialize_with = "bool_from_int")]
    pub is_day: bool,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity: u8,
    pub feelslike_c: f64,
}

/// Body of `GET /current.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherResponse {
    pub location: Place,
    pub current: Current,
}

/// Body of `GET /forecast.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: Place,
    pub current: Current,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// One calendar day: min/max aggregate plus its hourly samples. Days
/// arrive in chronological order, unique by date.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub day: DaySummary,
    pub hour: Vec<HourSample>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaySummary {
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub condition: Condition,
}

/// One hourly sample within a day (24 per full day).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HourSample {
    pub time_epoch: i64,
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
}

/// Flattened merge of the `location` + `current` blocks, carried through
/// the pipeline as the current-conditions record.
#[derive(Debug, Clone)]
pub struct CurrentConditions {
    pub location_name: String,
    pub region: String,
    pub country: String,
    pub localtime: String,
    pub temp_c: f64,
    pub temp_f: f64,
    pub is_day: bool,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity_pct: u8,
    pub feelslike_c: f64,
}

impl From<CurrentWeatherResponse> for CurrentConditions {
    fn from(response: CurrentWeatherResponse) -> Self {
        let CurrentWeatherResponse { location, current } = response;

        Self {
            location_name: location.name,
            region: location.region,
            country: location.country,
            localtime: location.localtime,
            temp_c: current.temp_c,
            temp_f: current.temp_f,
            is_day: current.is_day,
            condition: current.condition,
            wind_kph: current.wind_kph,
            wind_dir: current.wind_dir,
            humidity_pct: current.humidity,
            feelslike_c: current.feelslike_c,
        }
    }
}

/// Merged success payload of one fetch cycle.
#[derive(Debug, Clone)]
pub struct WeatherSnapshot {
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}

/// weatherapi.com encodes `is_day` as 0/1.
fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(u8::deserialize(deserializer)? != 0)
}
