use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};

/// Nominal duration of one animation frame. Every `Event::Tick` stands for one
/// frame of this length; per-game step pacing on top of the frame cadence is
/// [`crate::clock::StepClock`]'s job.
pub const FRAME_MS: u64 = 16;

pub enum Event {
    Key(KeyEvent),
    Tick,
}

/// Background pump merging keyboard input and the frame clock into a single
/// channel, so the main loop sees a strictly serialized stream of events.
pub struct EventPump {
    rx: mpsc::Receiver<Event>,
}

impl EventPump {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        let frame = Duration::from_millis(FRAME_MS);

        thread::spawn(move || loop {
            if event::poll(frame).unwrap_or(false) {
                if let Ok(crossterm::event::Event::Key(key)) = event::read() {
                    if key.kind == KeyEventKind::Press && tx.send(Event::Key(key)).is_err() {
                        return;
                    }
                }
            } else if tx.send(Event::Tick).is_err() {
                return;
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> io::Result<Event> {
        self.rx
            .recv()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
    }
}
