//! Weather gateway — current temperature by city via OpenWeatherMap.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::GatewayError;

const OPENWEATHER_URL: &str = "http://api.openweathermap.org/data/2.5/weather";

/// Source of the current temperature for a city.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Current temperature in °C. Never panics; any failure surfaces as
    /// [`GatewayError::Unavailable`] for the caller to recover from.
    async fn fetch_temperature(&self, city: &str) -> Result<f64, GatewayError>;
}

/// OpenWeatherMap client.
pub struct OpenWeatherGateway {
    api_key: SecretString,
    base_url: String,
    timeout: Duration,
    client: reqwest::Client,
}

impl OpenWeatherGateway {
    pub fn new(api_key: SecretString, timeout: Duration) -> Self {
        Self {
            api_key,
            base_url: OPENWEATHER_URL.to_string(),
            timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl WeatherGateway for OpenWeatherGateway {
    async fn fetch_temperature(&self, city: &str) -> Result<f64, GatewayError> {
        let resp = self
            .client
            .get(&self.base_url)
            .timeout(self.timeout)
            .query(&[
                ("q", city),
                ("appid", self.api_key.expose_secret()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| GatewayError::unavailable("weather", e))?;

        if !resp.status().is_success() {
            return Err(GatewayError::unavailable(
                "weather",
                format!("status {}", resp.status()),
            ));
        }

        let data: serde_json::Value = resp
            .json()
            .await
            .map_err(|e| GatewayError::unavailable("weather", e))?;

        parse_temperature(&data)
            .ok_or_else(|| GatewayError::unavailable("weather", "missing main.temp field"))
    }
}

/// Pull the metric temperature out of an OpenWeatherMap response body.
fn parse_temperature(data: &serde_json::Value) -> Option<f64> {
    data.get("main")?.get("temp")?.as_f64()
}
