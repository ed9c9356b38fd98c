// PiezoWatch - Wi-Fi Station Bring-Up
//
// Starts association, then polls the station interface until DHCP hands out
// an address.  With the default config this blocks forever on bad
// credentials or a missing AP.

use std::thread;

use anyhow::{anyhow, Context};
use embedded_svc::wifi::{AuthMethod, ClientConfiguration, Configuration};
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::hal::modem::Modem;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::EspWifi;

use super::poll_until;
use crate::config::NetworkConfig;

pub fn connect_wifi(
    modem: Modem,
    sys_loop: EspSystemEventLoop,
    nvs: Option<EspDefaultNvsPartition>,
    config: &NetworkConfig,
) -> anyhow::Result<EspWifi<'static>> {
    let mut wifi = EspWifi::new(modem, sys_loop, nvs)?;

    let auth_method = if config.password.is_empty() {
        AuthMethod::None
    } else {
        AuthMethod::WPA2Personal
    };

    wifi.set_configuration(&Configuration::Client(ClientConfiguration {
        ssid: config
            .ssid
            .as_str()
            .try_into()
            .map_err(|_| anyhow!("wifi ssid too long"))?,
        password: config
            .password
            .as_str()
            .try_into()
            .map_err(|_| anyhow!("wifi password too long"))?,
        auth_method,
        ..Default::default()
    }))?;

    wifi.start()?;
    wifi.connect()?;
    log::info!("Wi-Fi started, associating with `{}`", config.ssid);

    let attempts = poll_until(
        config.max_attempts,
        config.poll_interval,
        thread::sleep,
        |attempt| match wifi.is_up() {
            Ok(true) => true,
            Ok(false) => {
                log::info!("Connecting to Wi-Fi... (attempt {})", attempt);
                false
            }
            Err(e) => {
                log::warn!("Wi-Fi status query failed on attempt {}: {}", attempt, e);
                false
            }
        },
    )
    .with_context(|| format!("Wi-Fi association with `{}` failed", config.ssid))?;

    let ip_info = wifi.sta_netif().get_ip_info()?;
    log::info!(
        "Connected to Wi-Fi after {} poll(s): ip={} gateway={} mask={:?} dns={:?}",
        attempts,
        ip_info.ip,
        ip_info.subnet.gateway,
        ip_info.subnet.mask,
        ip_info.dns
    );

    Ok(wifi)
}
