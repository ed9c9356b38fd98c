// PiezoWatch - Buzzer Driver
//
// Passive buzzer on an LEDC channel bound to LEDC timer 0 (low-speed mode,
// the only mode the ESP32-C3 has).  The tone is changed on the timer, the
// volume/on-off on the channel duty.

use esp_idf_hal::ledc::LedcDriver;
use esp_idf_sys::esp;

pub struct Buzzer<'d> {
    channel: LedcDriver<'d>,
    max_duty: u32,
}

impl<'d> Buzzer<'d> {
    /// Wrap a configured LEDC channel and make sure it starts silent.
    pub fn new(mut channel: LedcDriver<'d>) -> anyhow::Result<Self> {
        let max_duty = channel.get_max_duty();
        channel.set_duty(0)?;
        Ok(Self { channel, max_duty })
    }

    pub fn set_frequency(&mut self, hz: u32) {
        let ret = esp!(unsafe {
            esp_idf_sys::ledc_set_freq(
                esp_idf_sys::ledc_mode_t_LEDC_LOW_SPEED_MODE,
                esp_idf_sys::ledc_timer_t_LEDC_TIMER_0,
                hz,
            )
        });
        if let Err(e) = ret {
            log::warn!("Buzzer frequency {} Hz rejected: {}", hz, e);
        }
    }

    /// `duty` is a fraction of `u16::MAX`, rescaled to the timer resolution.
    pub fn set_duty(&mut self, duty: u16) {
        let scaled = (u64::from(duty) * u64::from(self.max_duty) / u64::from(u16::MAX)) as u32;
        if let Err(e) = self.channel.set_duty(scaled) {
            log::warn!("Buzzer duty {} rejected: {}", scaled, e);
        }
    }
}
