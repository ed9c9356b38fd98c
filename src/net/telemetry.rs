// PiezoWatch - Telemetry Reporter
//
// Builds the ThingSpeak-style update URL for an alarm value and issues one
// GET through an `HttpTransport`.  A single attempt per call; retrying is the
// caller's business.

use anyhow::{bail, Context};

use crate::config::{TelemetryConfig, TELEMETRY_FIELD};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// Blocking HTTP GET.  The connection is released before returning.
pub trait HttpTransport {
    fn get(&mut self, url: &str) -> anyhow::Result<HttpResponse>;
}

pub struct TelemetryReporter<T> {
    config: TelemetryConfig,
    transport: T,
}

impl<T: HttpTransport> TelemetryReporter<T> {
    pub fn new(config: TelemetryConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn report_url(&self, value: u16) -> String {
        format!(
            "{}?api_key={}&{}={}",
            self.config.endpoint, self.config.api_key, TELEMETRY_FIELD, value
        )
    }

    /// Send `value`.  Returns the response body on a 2xx answer; transport
    /// errors and any other status are errors.
    pub fn report(&mut self, value: u16) -> anyhow::Result<String> {
        let url = self.report_url(value);
        let response = self
            .transport
            .get(&url)
            .with_context(|| format!("GET {} failed", self.config.endpoint))?;

        if !(200..300).contains(&response.status) {
            bail!(
                "telemetry endpoint answered HTTP {} ({})",
                response.status,
                response.body.trim()
            );
        }
        log::debug!("Telemetry HTTP {} ({} bytes)", response.status, response.body.len());
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::ScriptedTransport;
    use std::time::Duration;

    fn config() -> TelemetryConfig {
        TelemetryConfig {
            endpoint: "https://api.thingspeak.com/update".into(),
            api_key: "KEY123".into(),
            timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn url_carries_key_and_raw_value() {
        let reporter = TelemetryReporter::new(config(), ScriptedTransport::default());
        assert_eq!(
            reporter.report_url(35_000),
            "https://api.thingspeak.com/update?api_key=KEY123&field1=35000"
        );
    }

    #[test]
    fn success_returns_body() {
        let mut transport = ScriptedTransport::default();
        transport.push_ok("42");
        let mut reporter = TelemetryReporter::new(config(), transport);

        assert_eq!(reporter.report(31_000).unwrap(), "42");
        assert_eq!(
            reporter.transport().requests(),
            ["https://api.thingspeak.com/update?api_key=KEY123&field1=31000"]
        );
    }

    #[test]
    fn non_success_status_is_an_error() {
        let mut transport = ScriptedTransport::default();
        transport.push_status(500, "oops");
        let mut reporter = TelemetryReporter::new(config(), transport);

        let err = reporter.report(31_000).unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
    }

    #[test]
    fn transport_error_is_wrapped() {
        let mut transport = ScriptedTransport::default();
        transport.push_err("dns lookup failed");
        let mut reporter = TelemetryReporter::new(config(), transport);

        let err = reporter.report(31_000).unwrap_err();
        assert!(format!("{err:#}").contains("dns lookup failed"));
    }
}
