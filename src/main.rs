// PiezoWatch - Firmware Entry Point
//
// Boot sequence:
//   1. Configure the piezo ADC, both LEDs and the buzzer (silent).
//   2. Bring up Wi-Fi and block until the station has an address.
//   3. Run the monitor loop forever.
//
// Built for the host, the same loop runs against a simulated board fed with
// readings from the command line.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    device::run()
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    simulator::run()
}

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_hal::gpio::{OutputPin, PinDriver};
    use esp_idf_hal::ledc::{config::TimerConfig, LedcDriver, LedcTimerDriver};
    use esp_idf_hal::prelude::*;
    use esp_idf_svc::eventloop::EspSystemEventLoop;
    use esp_idf_svc::nvs::EspDefaultNvsPartition;

    use piezowatch::config::*;
    use piezowatch::drivers::board::EspBoard;
    use piezowatch::drivers::buzzer::Buzzer;
    use piezowatch::drivers::indicator::Indicator;
    use piezowatch::drivers::piezo::PiezoSensor;
    use piezowatch::net::http::EspTransport;
    use piezowatch::net::telemetry::TelemetryReporter;
    use piezowatch::net::wifi::connect_wifi;
    use piezowatch::tasks::monitor::Monitor;

    pub fn run() -> anyhow::Result<()> {
        // Link esp-idf-sys runtime patches and initialise logging.
        esp_idf_svc::sys::link_patches();
        esp_idf_svc::log::EspLogger::initialize_default();
        log::info!("PiezoWatch firmware starting…");

        // ---- Peripherals --------------------------------------------------
        let peripherals = Peripherals::take()?;
        let sys_loop = EspSystemEventLoop::take()?;
        let nvs = EspDefaultNvsPartition::take()?;

        let sensor = PiezoSensor::new()?;
        let led1 = Indicator::new(
            PinDriver::output(peripherals.pins.gpio3.downgrade_output())?,
            PIN_LED1,
        );
        let led2 = Indicator::new(
            PinDriver::output(peripherals.pins.gpio4.downgrade_output())?,
            PIN_LED2,
        );

        // Buzzer: LEDC timer 0 / channel 0 on GPIO5.  `Buzzer` retunes timer 0
        // directly, so keep this pairing.
        let timer = LedcTimerDriver::new(
            peripherals.ledc.timer0,
            &TimerConfig::default().frequency(ALARM_TONE_HZ.Hz().into()),
        )?;
        let channel = LedcDriver::new(peripherals.ledc.channel0, timer, peripherals.pins.gpio5)?;
        let buzzer = Buzzer::new(channel)?;
        log::info!(
            "Outputs ready: LED1=GPIO{} LED2=GPIO{} buzzer=GPIO{}",
            PIN_LED1,
            PIN_LED2,
            PIN_BUZZER
        );

        let board = EspBoard::new(sensor, led1, led2, buzzer);

        // ---- Network ------------------------------------------------------
        // Held for the program lifetime; dropping it tears the station down.
        let _wifi = connect_wifi(
            peripherals.modem,
            sys_loop,
            Some(nvs),
            &NetworkConfig::default(),
        )?;

        // ---- Monitor ------------------------------------------------------
        let telemetry = TelemetryConfig::default();
        let transport = EspTransport::new(telemetry.timeout);
        let reporter = TelemetryReporter::new(telemetry, transport);

        let mut monitor = Monitor::new(board, reporter, MonitorConfig::default());
        monitor.run()
    }
}

#[cfg(not(target_os = "espidf"))]
mod simulator {
    use anyhow::Context;

    use piezowatch::config::{MonitorConfig, TelemetryConfig};
    use piezowatch::net::telemetry::TelemetryReporter;
    use piezowatch::sim::{ScriptedTransport, SimulatedBoard};
    use piezowatch::tasks::monitor::Monitor;

    /// Quiet, one excursion, quiet, a repeat of the same value, quiet.
    const DEMO_READINGS: [u16; 9] = [10_000, 35_000, 36_000, 34_000, 5_000, 35_000, 31_000, 2_000, 0];

    pub fn run() -> anyhow::Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = std::env::args().skip(1).collect();
        let readings: Vec<u16> = if args.is_empty() {
            DEMO_READINGS.to_vec()
        } else {
            args.iter()
                .map(|a| {
                    a.parse::<u16>()
                        .with_context(|| format!("`{a}` is not a reading in 0..=65535"))
                })
                .collect::<anyhow::Result<_>>()?
        };
        log::info!("Simulating {} reading(s)", readings.len());

        let reporter = TelemetryReporter::new(TelemetryConfig::default(), ScriptedTransport::default());
        let mut monitor = Monitor::new(
            SimulatedBoard::new(readings),
            reporter,
            MonitorConfig::default(),
        );

        while !monitor.board().is_exhausted() {
            monitor.step();
        }

        log::info!(
            "Simulation finished: {:?}, last reported value {:?}",
            monitor.stats(),
            monitor.last_sent_value()
        );
        Ok(())
    }
}
