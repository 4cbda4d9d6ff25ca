#![allow(dead_code)]

use applink_core::{
    AppManager, ConnectionHandler, DeviceHandle, DeviceInfo, Dispatcher, FileStore,
    FileStoreError, MobileInbound, MobileOutbound, HMI_IN_CAP, HMI_OUT_CAP, MOBILE_IN_CAP,
    MOBILE_OUT_CAP,
};
use applink_protocol::hmi::{HmiCommand, HmiOutbound, HmiRequestPayload};
use applink_protocol::{RpcNotification, RpcRequest, RpcResponse};
use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct MockConnection {
    pub devices: Vec<DeviceInfo>,
    pub discoveries: Arc<Mutex<u32>>,
    pub connects: Arc<Mutex<Vec<DeviceHandle>>>,
}

impl ConnectionHandler for MockConnection {
    fn device_list(&self) -> Vec<DeviceInfo> {
        self.devices.clone()
    }

    fn start_devices_discovery(&self) {
        *self.discoveries.lock().unwrap() += 1;
    }

    fn connect_to_device(&self, handle: DeviceHandle) {
        self.connects.lock().unwrap().push(handle);
    }
}

pub struct MockFileStore {
    quota: u64,
    files: Mutex<BTreeMap<(String, String), Vec<u8>>>,
}

impl MockFileStore {
    pub fn new(quota: u64) -> Self {
        Self {
            quota,
            files: Mutex::new(BTreeMap::new()),
        }
    }
}

impl FileStore for MockFileStore {
    fn free_space(&self) -> u64 {
        let used: u64 = self
            .files
            .lock()
            .unwrap()
            .values()
            .map(|bytes| bytes.len() as u64)
            .sum();
        self.quota.saturating_sub(used)
    }

    fn write(&self, dir: &str, name: &str, bytes: &[u8]) -> Result<(), FileStoreError> {
        let mut files = self.files.lock().unwrap();
        let key = (dir.to_string(), name.to_string());
        if files.contains_key(&key) {
            return Err(FileStoreError::AlreadyExists(name.to_string()));
        }
        files.insert(key, bytes.to_vec());
        Ok(())
    }

    fn remove(&self, dir: &str, name: &str) -> Result<(), FileStoreError> {
        let mut files = self.files.lock().unwrap();
        files
            .remove(&(dir.to_string(), name.to_string()))
            .map(|_| ())
            .ok_or_else(|| FileStoreError::NotFound(name.to_string()))
    }

    fn list(&self, dir: &str) -> Result<Vec<String>, FileStoreError> {
        let files = self.files.lock().unwrap();
        let names: Vec<String> = files
            .keys()
            .filter(|(d, _)| d == dir)
            .map(|(_, name)| name.clone())
            .collect();
        if names.is_empty() {
            return Err(FileStoreError::NotFound(dir.to_string()));
        }
        Ok(names)
    }
}

pub struct Harness {
    pub dispatcher: Dispatcher,
    pub mobile_in: Sender<MobileInbound>,
    pub hmi_in: Sender<HmiCommand>,
    pub mobile_out: Receiver<MobileOutbound>,
    pub hmi_out: Receiver<HmiOutbound>,
    pub discoveries: Arc<Mutex<u32>>,
    pub connects: Arc<Mutex<Vec<DeviceHandle>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_quota(4096)
    }

    pub fn with_quota(quota: u64) -> Self {
        let (mobile_out_tx, mobile_out_rx) = bounded(MOBILE_OUT_CAP);
        let (hmi_out_tx, hmi_out_rx) = bounded(HMI_OUT_CAP);
        let (mobile_in_tx, mobile_in_rx) = bounded(MOBILE_IN_CAP);
        let (hmi_in_tx, hmi_in_rx) = bounded(HMI_IN_CAP);

        let connection = MockConnection {
            devices: vec![DeviceInfo {
                handle: 1,
                name: "BT-Device".to_string(),
            }],
            ..MockConnection::default()
        };
        let discoveries = Arc::clone(&connection.discoveries);
        let connects = Arc::clone(&connection.connects);
        let manager = AppManager::new(
            mobile_out_tx,
            hmi_out_tx,
            Box::new(connection),
            Box::new(MockFileStore::new(quota)),
            1,
        );
        Self {
            dispatcher: Dispatcher::new(manager, mobile_in_rx, hmi_in_rx),
            mobile_in: mobile_in_tx,
            hmi_in: hmi_in_tx,
            mobile_out: mobile_out_rx,
            hmi_out: hmi_out_rx,
            discoveries,
            connects,
        }
    }

    pub fn open_session(&mut self, session_key: u32) {
        self.mobile_in
            .send(MobileInbound::SessionOpened {
                session_key,
                device: 1,
            })
            .unwrap();
        self.run();
    }

    pub fn send_request(&mut self, session_key: u32, correlation_id: u32, request: RpcRequest) {
        self.mobile_in
            .send(MobileInbound::Request {
                session_key,
                correlation_id,
                request,
            })
            .unwrap();
        self.run();
    }

    pub fn send_hmi(&mut self, command: HmiCommand) {
        self.hmi_in.send(command).unwrap();
        self.run();
    }

    pub fn run(&mut self) {
        self.dispatcher.drain();
    }

    pub fn next_mobile(&self) -> MobileOutbound {
        self.mobile_out.try_recv().expect("expected a mobile message")
    }

    pub fn next_response(&self) -> (u32, u32, RpcResponse) {
        match self.next_mobile() {
            MobileOutbound::Response {
                session_key,
                correlation_id,
                response,
            } => (session_key, correlation_id, response),
            other => panic!("expected a response, got: {other:?}"),
        }
    }

    pub fn next_notification(&self) -> (u32, RpcNotification) {
        match self.next_mobile() {
            MobileOutbound::Notification {
                session_key,
                notification,
            } => (session_key, notification),
            other => panic!("expected a notification, got: {other:?}"),
        }
    }

    pub fn next_hmi(&self) -> HmiOutbound {
        self.hmi_out.try_recv().expect("expected a bus message")
    }

    pub fn next_hmi_request(&self) -> (u32, HmiRequestPayload) {
        match self.next_hmi() {
            HmiOutbound::Request(request) => (request.id, request.payload),
            other => panic!("expected a bus request, got: {other:?}"),
        }
    }

    pub fn no_mobile_traffic(&self) {
        match self.mobile_out.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(msg) => panic!("unexpected mobile message: {msg:?}"),
            Err(e) => panic!("mobile channel broken: {e:?}"),
        }
    }

    pub fn no_hmi_traffic(&self) {
        match self.hmi_out.try_recv() {
            Err(TryRecvError::Empty) => {}
            Ok(msg) => panic!("unexpected bus message: {msg:?}"),
            Err(e) => panic!("bus channel broken: {e:?}"),
        }
    }

    pub fn drain_mobile(&self) -> Vec<MobileOutbound> {
        let mut out = Vec::new();
        while let Ok(msg) = self.mobile_out.try_recv() {
            out.push(msg);
        }
        out
    }

    pub fn drain_hmi(&self) -> Vec<HmiOutbound> {
        let mut out = Vec::new();
        while let Ok(msg) = self.hmi_out.try_recv() {
            out.push(msg);
        }
        out
    }
}
