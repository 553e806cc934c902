//! Spinner shown on the submit control while a request is in flight.

use std::time::Duration;

const FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
const FRAME_DURATION: Duration = Duration::from_millis(100);

pub(crate) fn spinner_frame(elapsed: Duration) -> char {
    let step = elapsed.as_millis() / FRAME_DURATION.as_millis();
    FRAMES[(step % FRAMES.len() as u128) as usize]
}
