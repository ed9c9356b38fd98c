// PiezoWatch - ESP-IDF HTTP(S) Transport
//
// One short-lived connection per request; TLS roots come from the ESP-IDF
// certificate bundle.

use std::time::Duration;

use anyhow::anyhow;
use embedded_svc::http::client::Client;
use embedded_svc::http::{Method, Status};
use embedded_svc::io::Read;
use esp_idf_svc::http::client::{Configuration as HttpClientConfiguration, EspHttpConnection};

use super::telemetry::{HttpResponse, HttpTransport};
use crate::config::MAX_RESPONSE_BODY;

pub struct EspTransport {
    timeout: Duration,
}

impl EspTransport {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl HttpTransport for EspTransport {
    fn get(&mut self, url: &str) -> anyhow::Result<HttpResponse> {
        let http_conf = HttpClientConfiguration {
            timeout: Some(self.timeout),
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            ..Default::default()
        };
        let mut client = Client::wrap(EspHttpConnection::new(&http_conf)?);
        let request = client.request(Method::Get, url, &[])?;
        let mut response = request.submit().map_err(|e| anyhow!("{e:?}"))?;
        let status = response.status();

        // Bodies are tiny ("entry id" for ThingSpeak); anything past the
        // buffer is dropped with the connection.
        let mut body = [0_u8; MAX_RESPONSE_BODY];
        let mut len = 0;
        while len < body.len() {
            let read = response.read(&mut body[len..]).map_err(|e| anyhow!("{e:?}"))?;
            if read == 0 {
                break;
            }
            len += read;
        }

        Ok(HttpResponse {
            status,
            body: String::from_utf8_lossy(&body[..len]).into_owned(),
        })
    }
}
