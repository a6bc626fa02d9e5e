use reqwest::Client;

use super::UpstreamError;

pub const WEATHER_API: &str = "https://api.openweathermap.org/data/2.5";

const SERVICE: &str = "Weather";

/// OpenWeatherMap current-conditions client. The payload is passed through
/// to the dashboard verbatim, so no response model is defined here.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    #[must_use]
    pub fn with_shared_client(
        client: Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn current(&self, city: &str) -> Result<serde_json::Value, UpstreamError> {
        let url = format!(
            "{}/weather?q={}&units=metric&appid={}",
            self.base_url,
            urlencoding::encode(city),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| UpstreamError::Transport { service: SERVICE, source })?;

        if !response.status().is_success() {
            return Err(UpstreamError::Status {
                service: SERVICE,
                status: response.status(),
            });
        }

        response
            .json()
            .await
            .map_err(|source| UpstreamError::Decode { service: SERVICE, source })
    }
}
