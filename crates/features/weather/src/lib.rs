//! The `weather` feature: `GET {endpoint}/{city}?format={format}` against wttr.in.
mod error;

pub use crate::error::{WeatherError, WeatherErrorExt};

use reqwest::{Client, StatusCode};
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::trace;
use url::Url;
use wsb_kernel::domain::config::WeatherConfig;
use wsb_kernel::prelude::*;

pub const WEATHER: &str = "weather";

#[must_use]
pub fn register(directory: Directory, config: &WeatherConfig) -> Directory {
    let config = config.clone();
    directory.register(WEATHER, move || WeatherProvider::new(&config))
}

#[derive(Debug)]
pub struct WeatherProvider {
    city: String,
    format: String,
    endpoint: String,
    timeout: Duration,
    client: OnceCell<Client>,
}

impl WeatherProvider {
    #[must_use]
    pub fn new(config: &WeatherConfig) -> Self {
        Self {
            city: config.city.trim().to_owned(),
            format: config.format.trim().to_owned(),
            endpoint: config.endpoint.clone(),
            timeout: config.timeout(),
            client: OnceCell::new(),
        }
    }

    /// The request URL: city as a path segment, format as a query parameter.
    ///
    /// # Errors
    /// [`WeatherError::EmptyCity`] without a city; [`WeatherError::Url`] or
    /// [`WeatherError::Endpoint`] for a malformed endpoint.
    pub fn request_url(&self) -> Result<Url, WeatherError> {
        if self.city.is_empty() {
            return Err(WeatherError::EmptyCity { context: None });
        }

        let mut url = Url::parse(&self.endpoint).context(self.endpoint.clone())?;
        url.path_segments_mut()
            .map_err(|()| WeatherError::Endpoint {
                endpoint: self.endpoint.clone(),
                context: None,
            })?
            .pop_if_empty()
            .push(&self.city);
        url.query_pairs_mut().append_pair("format", &self.format);
        Ok(url)
    }

    async fn client(&self) -> Result<&Client, WeatherError> {
        self.client
            .get_or_try_init(|| async {
                Client::builder()
                    .timeout(self.timeout)
                    .build()
                    .context("Failed to build HTTP client")
            })
            .await
    }

    async fn query(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        let url = self.request_url()?;
        let client = self.client().await?;

        trace!(%url, "Requesting weather");
        let response =
            deadline.guard(client.get(url).send()).await?.map_err(WeatherError::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(WeatherError::Status { status, context: None }.into());
        }

        let body = deadline.guard(response.text()).await?.map_err(WeatherError::from)?;
        Ok(body.trim().to_owned())
    }
}

#[async_trait]
impl Provider for WeatherProvider {
    fn name(&self) -> &str {
        WEATHER
    }

    async fn fetch(&self, deadline: &Deadline) -> Result<String, ProviderError> {
        deadline.check()?;
        self.query(deadline).await
    }
}
