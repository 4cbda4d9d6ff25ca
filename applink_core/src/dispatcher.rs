use crate::manager::AppManager;
use crate::protocol::MobileInbound;
use applink_protocol::hmi::HmiCommand;
use crossbeam_channel::{select, Receiver};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

const IDLE_POLL: Duration = Duration::from_millis(25);

// Single consumer over both inbound queues. Thread confinement of the
// manager is what serializes every table mutation.
pub struct Dispatcher {
    manager: AppManager,
    mobile_rx: Receiver<MobileInbound>,
    hmi_rx: Receiver<HmiCommand>,
    prefer_mobile: bool,
}

impl Dispatcher {
    pub fn new(
        manager: AppManager,
        mobile_rx: Receiver<MobileInbound>,
        hmi_rx: Receiver<HmiCommand>,
    ) -> Self {
        Self {
            manager,
            mobile_rx,
            hmi_rx,
            prefer_mobile: true,
        }
    }

    pub fn manager(&self) -> &AppManager {
        &self.manager
    }

    // Handles at most one queued item, alternating which queue goes first.
    pub fn pump(&mut self) -> bool {
        let mobile_first = self.prefer_mobile;
        self.prefer_mobile = !self.prefer_mobile;
        if mobile_first {
            self.pump_mobile() || self.pump_hmi()
        } else {
            self.pump_hmi() || self.pump_mobile()
        }
    }

    pub fn drain(&mut self) {
        loop {
            let mobile = self.pump_mobile();
            let hmi = self.pump_hmi();
            if !mobile && !hmi {
                break;
            }
        }
    }

    fn pump_mobile(&mut self) -> bool {
        match self.mobile_rx.try_recv() {
            Ok(item) => {
                self.manager.handle_mobile(item);
                true
            }
            Err(_) => false,
        }
    }

    fn pump_hmi(&mut self) -> bool {
        match self.hmi_rx.try_recv() {
            Ok(item) => {
                self.manager.handle_hmi(item);
                true
            }
            Err(_) => false,
        }
    }

    pub fn spawn(self) -> DispatcherHandle {
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_for_thread = Arc::clone(&shutdown);
        let join_handle = thread::spawn(move || self.run(shutdown_for_thread));
        DispatcherHandle {
            shutdown,
            join_handle: Mutex::new(Some(join_handle)),
        }
    }

    fn run(mut self, shutdown: Arc<AtomicBool>) {
        while !shutdown.load(Ordering::Relaxed) {
            if self.pump() {
                continue;
            }
            // Idle: block briefly so shutdown stays responsive.
            select! {
                recv(self.mobile_rx) -> item => match item {
                    Ok(item) => self.manager.handle_mobile(item),
                    Err(_) => break,
                },
                recv(self.hmi_rx) -> item => match item {
                    Ok(item) => self.manager.handle_hmi(item),
                    Err(_) => break,
                },
                default(IDLE_POLL) => {}
            }
        }
        // Refuse nothing that is already queued: drain, then stop. In-flight
        // HMI requests without a response yet are simply abandoned.
        self.drain();
    }
}

pub struct DispatcherHandle {
    shutdown: Arc<AtomicBool>,
    join_handle: Mutex<Option<JoinHandle<()>>>,
}

impl DispatcherHandle {
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
        if let Ok(mut handle) = self.join_handle.lock() {
            if let Some(handle) = handle.take() {
                let _ = handle.join();
            }
        }
    }
}

impl Drop for DispatcherHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
