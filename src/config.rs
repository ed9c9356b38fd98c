// PiezoWatch - Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V)

use std::time::Duration;

// ---------------------------------------------------------------------------
// GPIO Pin Definitions (Xiao ESP32-C3 pinout)
// ---------------------------------------------------------------------------
pub const PIN_PIEZO_ADC: i32 = 2;   // D0/A0 - Piezo sensor (ADC1 channel 2)
pub const PIN_LED1: i32 = 3;        // D1    - Indicator LED 1
pub const PIN_LED2: i32 = 4;        // D2    - Indicator LED 2
pub const PIN_BUZZER: i32 = 5;      // D3    - Buzzer (LEDC PWM)

// ---------------------------------------------------------------------------
// ADC
// ---------------------------------------------------------------------------
pub const ADC_NATIVE_MAX: u32 = 4095;  // 12-bit oneshot reading
pub const ADC_SCALED_MAX: u32 = 65535; // reported range

// ---------------------------------------------------------------------------
// Alarm
// ---------------------------------------------------------------------------
pub const THRESHOLD_VALUE: u16 = 30_000;
pub const ALARM_TONE_HZ: u32 = 1_000;
pub const ALARM_DUTY: u16 = 32_768; // 50 % of the 16-bit duty range

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const BLINK_INTERVAL_MS: u64 = 100;      // LED half-cycle while alarmed
pub const POLL_INTERVAL_MS: u64 = 100;       // top-level loop delay
pub const WIFI_POLL_INTERVAL_MS: u64 = 1_000; // association poll
pub const HTTP_TIMEOUT_MS: u64 = 10_000;

// ---------------------------------------------------------------------------
// Telemetry
// ---------------------------------------------------------------------------
pub const DEFAULT_TELEMETRY_URL: &str = "https://api.thingspeak.com/update";
pub const TELEMETRY_FIELD: &str = "field1";
pub const MAX_RESPONSE_BODY: usize = 512;

/// Station credentials and the association polling policy.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    pub ssid: String,
    pub password: String,
    pub poll_interval: Duration,
    /// `None` keeps polling until the station gets an address.
    pub max_attempts: Option<u32>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            ssid: option_env!("WIFI_SSID").unwrap_or("ABCDE").to_string(),
            password: option_env!("WIFI_PASS").unwrap_or("").to_string(),
            poll_interval: Duration::from_millis(WIFI_POLL_INTERVAL_MS),
            max_attempts: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            endpoint: option_env!("TELEMETRY_URL")
                .unwrap_or(DEFAULT_TELEMETRY_URL)
                .to_string(),
            api_key: option_env!("THINGSPEAK_API_KEY")
                .unwrap_or("XXXXXXXXXXXXXXXX")
                .to_string(),
            timeout: Duration::from_millis(HTTP_TIMEOUT_MS),
        }
    }
}

/// Tunables for the monitor loop.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Readings strictly above this value raise the alarm.
    pub threshold: u16,
    pub blink_interval: Duration,
    pub poll_interval: Duration,
    pub tone_hz: u32,
    pub tone_duty: u16,
    /// Upper bound on full blink cycles per excursion. `None` blinks until
    /// the reading falls back to the threshold.
    pub max_blink_cycles: Option<u32>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            threshold: THRESHOLD_VALUE,
            blink_interval: Duration::from_millis(BLINK_INTERVAL_MS),
            poll_interval: Duration::from_millis(POLL_INTERVAL_MS),
            tone_hz: ALARM_TONE_HZ,
            tone_duty: ALARM_DUTY,
            max_blink_cycles: None,
        }
    }
}
