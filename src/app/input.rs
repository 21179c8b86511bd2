// Terminal input is blocking, so it is read on its own thread and forwarded
// into the async event loop.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::app::events::AppEvent;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct InputPump {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputPump {
    pub fn spawn(tx: UnboundedSender<AppEvent>) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();
        let thread = thread::spawn(move || {
            while !flag.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(false) => continue,
                    Ok(true) => {}
                    Err(e) => {
                        warn!("Input poll failed: {}", e);
                        break;
                    }
                }
                match event::read() {
                    Ok(ev) => {
                        if tx.send(AppEvent::Input(ev)).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        warn!("Input read failed: {}", e);
                        break;
                    }
                }
            }
            debug!("Input pump stopped");
        });
        Self { stop, thread: Some(thread) }
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
