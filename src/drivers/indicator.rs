// PiezoWatch - Indicator LED Driver
//
// Plain GPIO output.  Write failures are logged and otherwise ignored.

use esp_idf_hal::gpio::{AnyOutputPin, Level, Output, PinDriver};

pub struct Indicator<'d> {
    pin: PinDriver<'d, AnyOutputPin, Output>,
    gpio: i32,
}

impl<'d> Indicator<'d> {
    pub fn new(pin: PinDriver<'d, AnyOutputPin, Output>, gpio: i32) -> Self {
        Self { pin, gpio }
    }

    pub fn set(&mut self, on: bool) {
        if let Err(e) = self.pin.set_level(Level::from(on)) {
            log::warn!("GPIO{} write failed: {}", self.gpio, e);
        }
    }
}
