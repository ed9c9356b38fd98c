// PiezoWatch - Host Simulation
//
// Stand-ins for the board and the HTTP client so the monitor loop runs on a
// desktop: the simulator binary and the unit tests both drive it through
// these.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Duration;

use anyhow::anyhow;

use crate::drivers::Board;
use crate::events::Led;
use crate::net::telemetry::{HttpResponse, HttpTransport};

/// Everything the loop did to the simulated hardware, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardEvent {
    Read(u16),
    Led(Led, bool),
    Frequency(u32),
    Duty(u16),
    Delay(Duration),
    /// A GET issued by a `ScriptedTransport` sharing the board's log.
    Request(String),
}

/// Ordered event log shared between a board and a transport.
pub type EventLog = Rc<RefCell<Vec<BoardEvent>>>;

/// Replays a fixed list of readings.  Once the list runs out every read
/// returns 0, which ends any excursion.
#[derive(Debug, Default)]
pub struct SimulatedBoard {
    readings: VecDeque<u16>,
    events: EventLog,
}

impl SimulatedBoard {
    pub fn new(readings: impl IntoIterator<Item = u16>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            ..Default::default()
        }
    }

    pub fn push_readings(&mut self, readings: impl IntoIterator<Item = u16>) {
        self.readings.extend(readings);
    }

    pub fn is_exhausted(&self) -> bool {
        self.readings.is_empty()
    }

    /// Handle to the event log, for a transport to record into.
    pub fn event_log(&self) -> EventLog {
        Rc::clone(&self.events)
    }

    pub fn events(&self) -> Vec<BoardEvent> {
        self.events.borrow().clone()
    }

    pub fn take_events(&mut self) -> Vec<BoardEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    /// Last level written to `led`, if any.
    pub fn led_level(&self, led: Led) -> Option<bool> {
        self.events.borrow().iter().rev().find_map(|e| match *e {
            BoardEvent::Led(l, on) if l == led => Some(on),
            _ => None,
        })
    }

    pub fn buzzer_duty(&self) -> Option<u16> {
        self.events.borrow().iter().rev().find_map(|e| match *e {
            BoardEvent::Duty(d) => Some(d),
            _ => None,
        })
    }

    fn record(&self, event: BoardEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl Board for SimulatedBoard {
    fn read_sensor(&mut self) -> u16 {
        let value = self.readings.pop_front().unwrap_or(0);
        self.record(BoardEvent::Read(value));
        value
    }

    fn set_led(&mut self, led: Led, on: bool) {
        self.record(BoardEvent::Led(led, on));
    }

    fn set_buzzer_frequency(&mut self, hz: u32) {
        self.record(BoardEvent::Frequency(hz));
    }

    fn set_buzzer_duty(&mut self, duty: u16) {
        self.record(BoardEvent::Duty(duty));
    }

    fn delay(&mut self, duration: Duration) {
        self.record(BoardEvent::Delay(duration));
    }
}

/// Answers GETs from a queue of canned results and records every URL.
/// With the queue empty it answers `200 "1"`, like a ThingSpeak update that
/// created entry 1.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: VecDeque<Result<HttpResponse, String>>,
    requests: Vec<String>,
    log: Option<EventLog>,
}

impl ScriptedTransport {
    /// Also record each GET as `BoardEvent::Request` in `log`, interleaved
    /// with whatever the board writes there.
    pub fn with_event_log(mut self, log: EventLog) -> Self {
        self.log = Some(log);
        self
    }

    pub fn push_ok(&mut self, body: &str) {
        self.push_status(200, body);
    }

    pub fn push_status(&mut self, status: u16, body: &str) {
        self.responses.push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_err(&mut self, message: &str) {
        self.responses.push_back(Err(message.to_string()));
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }
}

impl HttpTransport for ScriptedTransport {
    fn get(&mut self, url: &str) -> anyhow::Result<HttpResponse> {
        log::info!("GET {}", url);
        self.requests.push(url.to_string());
        if let Some(log) = &self.log {
            log.borrow_mut().push(BoardEvent::Request(url.to_string()));
        }
        match self.responses.pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(anyhow!(message)),
            None => Ok(HttpResponse {
                status: 200,
                body: "1".to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_records_into_board_log_in_order() {
        let mut board = SimulatedBoard::new([31_000]);
        let mut transport = ScriptedTransport::default().with_event_log(board.event_log());

        board.read_sensor();
        transport.get("https://telemetry.test/update?field1=31000").unwrap();
        board.delay(Duration::from_millis(5));

        assert_eq!(
            board.events(),
            [
                BoardEvent::Read(31_000),
                BoardEvent::Request("https://telemetry.test/update?field1=31000".into()),
                BoardEvent::Delay(Duration::from_millis(5)),
            ]
        );
        assert_eq!(transport.requests(), ["https://telemetry.test/update?field1=31000"]);
    }

    #[test]
    fn unwired_transport_leaves_board_log_alone() {
        let mut board = SimulatedBoard::new(Vec::<u16>::new());
        let mut transport = ScriptedTransport::default();

        let response = transport.get("https://telemetry.test/update").unwrap();
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "1");
        assert!(board.events().is_empty());
        assert_eq!(board.read_sensor(), 0);
    }
}
