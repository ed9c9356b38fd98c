// PiezoWatch - Peripheral Drivers
//
// The monitor loop only talks to the `Board` trait.  The ESP-IDF drivers
// below implement it on the real hardware; `crate::sim` implements it on the
// host.

use std::time::Duration;

use crate::events::Led;

pub mod piezo;

#[cfg(target_os = "espidf")]
pub mod board;
#[cfg(target_os = "espidf")]
pub mod buzzer;
#[cfg(target_os = "espidf")]
pub mod indicator;

/// Everything the monitor loop needs from the hardware.
///
/// Peripheral faults are not surfaced here: implementations log them and
/// carry on, so every call is infallible from the loop's point of view.
pub trait Board {
    /// One raw sample scaled to the full `u16` range.
    fn read_sensor(&mut self) -> u16;

    fn set_led(&mut self, led: Led, on: bool);

    /// Change the buzzer tone.  Does not touch the duty cycle.
    fn set_buzzer_frequency(&mut self, hz: u32);

    /// Duty as a fraction of `u16::MAX`; zero silences the buzzer.
    fn set_buzzer_duty(&mut self, duty: u16);

    /// Block the calling thread.
    fn delay(&mut self, duration: Duration);
}
