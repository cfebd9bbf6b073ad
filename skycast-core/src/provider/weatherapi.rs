use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use super::WeatherProvider;
use crate::error::NetworkError;
use crate::model::{Coordinate, CurrentWeatherResponse, ForecastResponse};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// weatherapi.com client. Base URL and key are injected; tests point the
/// base URL at a mock server.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(base_url: String, api_key: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key, base_url, http })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, NetworkError> {
        let endpoint = format!("{}/{}", self.base_url.trim_end_matches('/'), path);
        let url = Url::parse(&endpoint).map_err(|_| NetworkError::InvalidUrl)?;

        let res = self
            .http
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| NetworkError::NoData(e.to_string()))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| NetworkError::NoData(e.to_string()))?;

        if !status.is_success() {
            // The API wraps failures in {"error":{"message":...}} when it can.
            if let Ok(envelope) = serde_json::from_str::<ApiErrorEnvelope>(&body) {
                return Err(NetworkError::Server(envelope.error.message));
            }
            return Err(NetworkError::Http(status.as_u16()));
        }

        serde_json::from_str(&body).map_err(|e| NetworkError::Decoding(e.to_string()))
    }
}

#[async_trait]
impl WeatherProvider for WeatherApiClient {
    async fn current(
        &self,
        coordinate: Coordinate,
    ) -> Result<CurrentWeatherResponse, NetworkError> {
        self.get_json(
            "current.json",
            &[("key", self.api_key.clone()), ("q", coordinate.as_query())],
        )
        .await
    }

    async fn forecast(
        &self,
        coordinate: Coordinate,
        days: u8,
    ) -> Result<ForecastResponse, NetworkError> {
        let response: ForecastResponse = self
            .get_json(
                "forecast.json",
                &[
                    ("key", self.api_key.clone()),
                    ("q", coordinate.as_query()),
                    ("days", days.to_string()),
                ],
            )
            .await?;

        let received = response.forecast.forecastday.len();
        if received < usize::from(days) {
            warn!(requested = days, received, "forecast returned fewer days than requested");
        }

        Ok(response)
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const MOSCOW: Coordinate = Coordinate { latitude: 55.7558, longitude: 37.6173 };

    fn current_body() -> serde_json::Value {
        serde_json::json!({
            "location": {
                "name": "Moscow",
                "region": "Moscow City",
                "country": "Russia",
                "lat": 55.75,
                "lon": 37.62,
                "localtime": "2026-08-04 22:15"
            },
            "current": {
                "temp_c": 21.3,
                "temp_f": 70.3,
                "is_day": 1,
                "condition": { "text": "Partly cloudy", "icon": "//cdn/116.png", "code": 1003 },
                "wind_kph": 14.4,
                "wind_dir": "NW",
                "humidity": 62,
                "feelslike_c": 20.1
            }
        })
    }

    fn forecast_day(date: &str) -> serde_json::Value {
        serde_json::json!({
            "date": date,
            "day": {
                "maxtemp_c": 25.0,
                "mintemp_c": 16.2,
                "condition": { "text": "Sunny", "icon": "//cdn/113.png", "code": 1000 }
            },
            "hour": [
                {
                    "time_epoch": 1754344800i64,
                    "time": format!("{date} 00:00"),
                    "temp_c": 17.0,
                    "condition": { "text": "Clear", "icon": "//cdn/113.png", "code": 1000 }
                }
            ]
        })
    }

    fn forecast_body(dates: &[&str]) -> serde_json::Value {
        let mut body = current_body();
        body["forecast"] =
            serde_json::json!({ "forecastday": dates.iter().map(|d| forecast_day(d)).collect::<Vec<_>>() });
        body
    }

    async fn client(server: &MockServer) -> WeatherApiClient {
        WeatherApiClient::new(server.uri(), "test-key".to_string()).unwrap()
    }

    #[tokio::test]
    async fn current_builds_query_and_decodes() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .and(query_param("key", "test-key"))
            .and(query_param("q", "55.7558,37.6173"))
            .respond_with(ResponseTemplate::new(200).set_body_json(current_body()))
            .mount(&server)
            .await;

        let response = client(&server).await.current(MOSCOW).await.unwrap();

        assert_eq!(response.location.name, "Moscow");
        assert_eq!(response.current.condition.code, 1003);
        assert!(response.current.is_day);
    }

    #[tokio::test]
    async fn forecast_requests_day_count() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .and(query_param("q", "55.7558,37.6173"))
            .and(query_param("days", "7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(&[
                "2026-08-05",
                "2026-08-06",
                "2026-08-07",
            ])))
            .mount(&server)
            .await;

        let response = client(&server).await.forecast(MOSCOW, 7).await.unwrap();

        assert_eq!(response.forecast.forecastday.len(), 3);
    }

    #[tokio::test]
    async fn short_forecast_is_a_success_with_received_days() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/forecast.json"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(forecast_body(&["2026-08-05"])),
            )
            .mount(&server)
            .await;

        let response = client(&server).await.forecast(MOSCOW, 7).await.unwrap();

        assert_eq!(response.forecast.forecastday.len(), 1);
    }

    #[tokio::test]
    async fn error_envelope_maps_to_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": { "code": 2008, "message": "API key invalid" }
            })))
            .mount(&server)
            .await;

        let err = client(&server).await.current(MOSCOW).await.unwrap_err();

        assert!(matches!(err, NetworkError::Server(message) if message == "API key invalid"));
    }

    #[tokio::test]
    async fn non_envelope_failure_maps_to_http_status() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = client(&server).await.current(MOSCOW).await.unwrap_err();

        assert!(matches!(err, NetworkError::Http(502)));
    }

    #[tokio::test]
    async fn shape_mismatch_maps_to_decoding_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/current.json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "unexpected": true })),
            )
            .mount(&server)
            .await;

        let err = client(&server).await.current(MOSCOW).await.unwrap_err();

        assert!(matches!(err, NetworkError::Decoding(_)));
    }

    #[tokio::test]
    async fn malformed_base_url_maps_to_invalid_url() {
        let client =
            WeatherApiClient::new("not a url".to_string(), "test-key".to_string()).unwrap();

        let err = client.current(MOSCOW).await.unwrap_err();

        assert!(matches!(err, NetworkError::InvalidUrl));
    }
}
