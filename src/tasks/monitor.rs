// PiezoWatch - Monitor Task
//
// The whole device behaviour: sample the piezo, and while it is above the
// threshold sound the buzzer and alternate the two LEDs.  When the excursion
// ends, report the value that started it unless that exact value was already
// reported successfully.  Runs on the main thread forever.

use crate::config::MonitorConfig;
use crate::drivers::Board;
use crate::events::{Excursion, Led, MonitorState, ReportOutcome, RunStats, Step};
use crate::net::telemetry::{HttpTransport, TelemetryReporter};

pub struct Monitor<B, T> {
    board: B,
    reporter: TelemetryReporter<T>,
    config: MonitorConfig,
    /// Only set after the endpoint accepted the value.
    last_sent_value: Option<u16>,
    stats: RunStats,
}

impl<B: Board, T: HttpTransport> Monitor<B, T> {
    pub fn new(board: B, reporter: TelemetryReporter<T>, config: MonitorConfig) -> Self {
        Self {
            board,
            reporter,
            config,
            last_sent_value: None,
            stats: RunStats::default(),
        }
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn reporter(&self) -> &TelemetryReporter<T> {
        &self.reporter
    }

    pub fn last_sent_value(&self) -> Option<u16> {
        self.last_sent_value
    }

    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Loop forever.  There is no exit path; the device runs until reset.
    pub fn run(&mut self) -> ! {
        log::info!(
            "Monitor started (threshold {}, blink {:?}, poll {:?})",
            self.config.threshold,
            self.config.blink_interval,
            self.config.poll_interval
        );
        loop {
            self.step();
        }
    }

    /// One top-level iteration, including the trailing poll delay.
    pub fn step(&mut self) -> Step {
        self.stats.iterations += 1;

        let value = self.board.read_sensor();
        log::info!("Sensor value: {}", value);

        let step = match MonitorState::classify(value, self.config.threshold) {
            MonitorState::Alarm => Step::Alarm(self.run_excursion(value)),
            MonitorState::Idle => {
                self.silence();
                Step::Idle { value }
            }
        };

        self.board.delay(self.config.poll_interval);
        step
    }

    fn run_excursion(&mut self, alarm_value: u16) -> Excursion {
        self.stats.excursions += 1;
        log::warn!(
            "Alarm: {} above threshold {}",
            alarm_value,
            self.config.threshold
        );

        // Tone is set once and keeps sounding through the whole blink phase.
        self.board.set_buzzer_frequency(self.config.tone_hz);
        self.board.set_buzzer_duty(self.config.tone_duty);

        let (blink_cycles, exit_value) = self.blink_while_alarmed();
        let report = self.report(alarm_value);

        log::info!(
            "Excursion over: value={} cycles={} exit={} | {:?}",
            alarm_value,
            blink_cycles,
            exit_value,
            self.stats
        );

        Excursion {
            alarm_value,
            blink_cycles,
            exit_value,
            report,
        }
    }

    /// Alternate the LEDs until a fresh sample is back at or below the
    /// threshold.  Returns the completed cycles and the sample that ended it.
    fn blink_while_alarmed(&mut self) -> (u32, u16) {
        let mut cycles: u32 = 0;
        loop {
            let sample = self.board.read_sensor();
            if sample <= self.config.threshold {
                return (cycles, sample);
            }
            if let Some(max) = self.config.max_blink_cycles {
                if cycles >= max {
                    log::warn!("Blink bound of {} cycles hit at {}", max, sample);
                    return (cycles, sample);
                }
            }

            self.board.set_led(Led::One, true);
            self.board.set_led(Led::Two, false);
            self.board.delay(self.config.blink_interval);
            self.board.set_led(Led::One, false);
            self.board.set_led(Led::Two, true);
            self.board.delay(self.config.blink_interval);
            cycles = cycles.saturating_add(1);
        }
    }

    fn report(&mut self, value: u16) -> ReportOutcome {
        if self.last_sent_value == Some(value) {
            log::info!("Value {} already reported, skipping", value);
            return ReportOutcome::Suppressed;
        }

        match self.reporter.report(value) {
            Ok(body) => {
                log::info!("Data sent to telemetry endpoint: {}", body.trim());
                self.last_sent_value = Some(value);
                self.stats.reports_sent += 1;
                ReportOutcome::Sent(body)
            }
            Err(e) => {
                log::warn!("Error sending data to telemetry endpoint: {:#}", e);
                self.stats.reports_failed += 1;
                ReportOutcome::Failed(format!("{e:#}"))
            }
        }
    }

    fn silence(&mut self) {
        self.board.set_led(Led::One, false);
        self.board.set_led(Led::Two, false);
        self.board.set_buzzer_duty(0);
    }
}
