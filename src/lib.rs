// PiezoWatch - Library Root
//
// Hardware-independent pieces (config, monitor loop, telemetry, polling) plus
// the ESP-IDF drivers, which only build for the device.  The binary in
// `main.rs` wires them together.

pub mod config;
pub mod drivers;
pub mod events;
pub mod net;
#[cfg(not(target_os = "espidf"))]
pub mod sim;
pub mod tasks;
