fn main() {
    // Host builds (tests, simulator) have no ESP-IDF environment to export.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }

    for var in ["WIFI_SSID", "WIFI_PASS", "THINGSPEAK_API_KEY", "TELEMETRY_URL"] {
        println!("cargo:rerun-if-env-changed={var}");
    }
}
