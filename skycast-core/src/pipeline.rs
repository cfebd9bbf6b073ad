//! Fetch-cycle orchestration.
//!
//! One cycle: resolve a location, fetch current conditions and the
//! forecast concurrently, derive the view-model. View states are
//! published through a watch channel with this pipeline as the single
//! writer; the presentation layer holds receivers.

use std::sync::Arc;

use chrono::{Local, Timelike};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::location::LocationResolver;
use crate::model::WeatherSnapshot;
use crate::provider::WeatherProvider;
use crate::view::{ViewState, WeatherViewModel};

pub struct WeatherPipeline {
    resolver: LocationResolver,
    provider: Arc<dyn WeatherProvider>,
    forecast_days: u8,
    state: watch::Sender<ViewState>,
}

impl WeatherPipeline {
    pub fn new(
        resolver: LocationResolver,
        provider: Arc<dyn WeatherProvider>,
        forecast_days: u8,
    ) -> Self {
        let (state, _) = watch::channel(ViewState::Idle);

        Self { resolver, provider, forecast_days, state }
    }

    /// Subscribe to view-state updates for this pipeline.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Run one fetch cycle. Publishes Loading, then Content or Error;
    /// also returns the outcome for sequential callers. Retrying is
    /// calling this again: the whole cycle restarts, location resolution
    /// included.
    pub async fn refresh(&self) -> Result<WeatherViewModel, FetchError> {
        self.state.send_replace(ViewState::Loading);

        match self.fetch_cycle().await {
            Ok(view) => {
                self.state.send_replace(ViewState::Content(view.clone()));
                Ok(view)
            }
            Err(err) => {
                warn!(%err, "fetch cycle failed");
                self.state.send_replace(ViewState::Error(err.user_message()));
                Err(err)
            }
        }
    }

    async fn fetch_cycle(&self) -> Result<WeatherViewModel, FetchError> {
        let coordinate = self.resolver.resolve().await?;
        debug!(lat = coordinate.latitude, lon = coordinate.longitude, "resolved location");

        // Fork both requests before awaiting either; first failure wins
        // and no partial result is delivered.
        let (current, forecast) = tokio::try_join!(
            self.provider.current(coordinate),
            self.provider.forecast(coordinate, self.forecast_days),
        )?;

        let snapshot = WeatherSnapshot {
            current: current.into(),
            days: forecast.forecast.forecastday,
        };

        let now_hour = Local::now().hour() as usize;
        Ok(WeatherViewModel::build(&snapshot, now_hour))
    }
}
