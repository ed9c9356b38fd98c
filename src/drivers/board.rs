// PiezoWatch - ESP32-C3 Board
//
// Bundles the four peripherals behind the `Board` trait.

use std::thread;
use std::time::Duration;

use super::buzzer::Buzzer;
use super::indicator::Indicator;
use super::piezo::PiezoSensor;
use super::Board;
use crate::events::Led;

pub struct EspBoard<'d> {
    sensor: PiezoSensor,
    led1: Indicator<'d>,
    led2: Indicator<'d>,
    buzzer: Buzzer<'d>,
}

impl<'d> EspBoard<'d> {
    pub fn new(sensor: PiezoSensor, led1: Indicator<'d>, led2: Indicator<'d>, buzzer: Buzzer<'d>) -> Self {
        Self { sensor, led1, led2, buzzer }
    }
}

impl Board for EspBoard<'_> {
    fn read_sensor(&mut self) -> u16 {
        self.sensor.read()
    }

    fn set_led(&mut self, led: Led, on: bool) {
        match led {
            Led::One => self.led1.set(on),
            Led::Two => self.led2.set(on),
        }
    }

    fn set_buzzer_frequency(&mut self, hz: u32) {
        self.buzzer.set_frequency(hz);
    }

    fn set_buzzer_duty(&mut self, duty: u16) {
        self.buzzer.set_duty(duty);
    }

    fn delay(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
