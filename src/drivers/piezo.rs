// PiezoWatch - Piezo Sensor (ADC) Driver
//
// One-shot reads on ADC1 via the raw ESP-IDF API, scaled from the native
// 12-bit range to the full u16 range the threshold is expressed in.

use crate::config::*;

/// Stretch a native ADC sample onto `0..=u16::MAX`.  Out-of-range input
/// (shouldn't happen) clamps to full scale.
pub fn scale_to_u16(raw: u16) -> u16 {
    let raw = u32::from(raw).min(ADC_NATIVE_MAX);
    (raw * ADC_SCALED_MAX / ADC_NATIVE_MAX) as u16
}

#[cfg(target_os = "espidf")]
pub use device::PiezoSensor;

#[cfg(target_os = "espidf")]
mod device {
    use anyhow::Context;
    use esp_idf_sys::esp;

    use super::scale_to_u16;
    use crate::config::*;

    pub struct PiezoSensor {
        handle: esp_idf_sys::adc_oneshot_unit_handle_t,
        channel: esp_idf_sys::adc_channel_t,
    }

    impl PiezoSensor {
        /// Claim ADC1 and configure the piezo channel
        /// (GPIO2 / ADC1_CHANNEL_2, 11 dB attenuation, 0–3.3 V range).
        pub fn new() -> anyhow::Result<Self> {
            let mut handle: esp_idf_sys::adc_oneshot_unit_handle_t = core::ptr::null_mut();
            let channel = esp_idf_sys::adc_channel_t_ADC_CHANNEL_2;

            unsafe {
                let unit_cfg = esp_idf_sys::adc_oneshot_unit_init_cfg_t {
                    unit_id: esp_idf_sys::adc_unit_t_ADC_UNIT_1,
                    ulp_mode: esp_idf_sys::adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
                    ..core::mem::zeroed()
                };
                esp!(esp_idf_sys::adc_oneshot_new_unit(&unit_cfg, &mut handle))
                    .context("ADC unit init failed")?;

                let chan_cfg = esp_idf_sys::adc_oneshot_chan_cfg_t {
                    atten: esp_idf_sys::adc_atten_t_ADC_ATTEN_DB_11,
                    bitwidth: esp_idf_sys::adc_bitwidth_t_ADC_BITWIDTH_12,
                };
                esp!(esp_idf_sys::adc_oneshot_config_channel(handle, channel, &chan_cfg))
                    .context("ADC channel config failed")?;
            }

            log::info!("Piezo sensor on GPIO{} (ADC1 ch2)", PIN_PIEZO_ADC);
            Ok(Self { handle, channel })
        }

        /// A failed conversion reads as 0, which the loop treats as idle.
        pub fn read(&mut self) -> u16 {
            let mut raw: i32 = 0;
            let ret = unsafe { esp_idf_sys::adc_oneshot_read(self.handle, self.channel, &mut raw) };
            if ret != esp_idf_sys::ESP_OK {
                log::warn!("ADC read failed ({})", ret);
                return 0;
            }
            scale_to_u16(raw.clamp(0, ADC_NATIVE_MAX as i32) as u16)
        }
    }

    impl Drop for PiezoSensor {
        fn drop(&mut self) {
            unsafe {
                esp_idf_sys::adc_oneshot_del_unit(self.handle);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaling_covers_full_range() {
        assert_eq!(scale_to_u16(0), 0);
        assert_eq!(scale_to_u16(4095), u16::MAX);
        assert_eq!(scale_to_u16(2048), 32_775);
    }

    #[test]
    fn scaling_clamps_overrange_input() {
        assert_eq!(scale_to_u16(5000), u16::MAX);
        assert_eq!(scale_to_u16(u16::MAX), u16::MAX);
    }

    #[test]
    fn default_threshold_sits_near_mid_scale() {
        // 30000 / 65535 of 4095 ≈ 1874 counts; 1875 is the first alarming one.
        assert!(scale_to_u16(1874) <= THRESHOLD_VALUE);
        assert!(scale_to_u16(1875) > THRESHOLD_VALUE);
    }
}
