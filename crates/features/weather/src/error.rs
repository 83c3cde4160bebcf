use std::borrow::Cow;
use wsb_kernel::provider::ProviderError;

#[wsb_derive::wsb_error]
pub enum WeatherError {
    #[error("HTTP request failed{}: {source}", format_context(.context))]
    Http { source: reqwest::Error, context: Option<Cow<'static, str>> },

    #[error("Invalid endpoint{}: {source}", format_context(.context))]
    Url { source: url::ParseError, context: Option<Cow<'static, str>> },

    #[error("Endpoint \"{endpoint}\" cannot carry a path{}", format_context(.context))]
    Endpoint { endpoint: String, context: Option<Cow<'static, str>> },

    #[error("bad status {status}{}", format_context(.context))]
    Status { status: reqwest::StatusCode, context: Option<Cow<'static, str>> },

    #[error("city cannot be empty, try it with --feature-weather-city{}", format_context(.context))]
    EmptyCity { context: Option<Cow<'static, str>> },
}

impl From<WeatherError> for ProviderError {
    fn from(err: WeatherError) -> Self {
        Self::Remote { source: Box::new(err), context: None }
    }
}
