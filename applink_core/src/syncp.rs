use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use std::collections::HashMap;
use std::io::Write;
use std::net::TcpStream;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use thiserror::Error;

const POST_QUEUE_CAP: usize = 32;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
const WRITE_TIMEOUT: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum SyncPError {
    #[error("post queue is full")]
    QueueFull,
    #[error("post workers are stopped")]
    Stopped,
}

// Opaque sync-P relay state: per-app encoded lines pushed by mobile, plus the
// raw payload slot last pushed by the HMI.
#[derive(Debug, Default)]
pub struct SyncPBuffer {
    encoded: HashMap<String, Vec<String>>,
    raw: Vec<String>,
}

impl SyncPBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_encoded(&mut self, app_name: &str, mut lines: Vec<String>) {
        self.encoded
            .entry(app_name.to_string())
            .or_default()
            .append(&mut lines);
    }

    pub fn encoded_for(&self, app_name: &str) -> &[String] {
        self.encoded
            .get(app_name)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    // Drains the app's staged lines; a SendData upload consumes them.
    pub fn take_encoded(&mut self, app_name: &str) -> Vec<String> {
        self.encoded.remove(app_name).unwrap_or_default()
    }

    pub fn set_raw(&mut self, lines: Vec<String>) {
        self.raw = lines;
    }

    pub fn raw(&self) -> &[String] {
        &self.raw
    }

    pub fn drop_app(&mut self, app_name: &str) {
        self.encoded.remove(app_name);
    }
}

#[derive(Debug, Clone)]
pub struct PostJob {
    pub host: String,
    pub port: u16,
    pub delay: Duration,
    pub lines: Vec<String>,
}

// "host:port" split at the first colon; a missing or unparsable port falls
// back to 80. Trailing path segments after the digits are ignored.
pub fn parse_url(url: &str) -> (String, u16) {
    let Some(pos) = url.find(':') else {
        return (url.to_string(), 80);
    };
    let host = url[..pos].to_string();
    let digits: String = url[pos + 1..]
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    let port = digits.parse().unwrap_or(80);
    (host, port)
}

// Fixed worker pool for the deferred side-channel sends; bounded queue,
// fire-and-forget, failures only logged.
pub struct PostPool {
    tx: Option<Sender<PostJob>>,
    handles: Vec<JoinHandle<()>>,
}

impl PostPool {
    pub fn new(workers: usize) -> Self {
        let (tx, rx) = bounded::<PostJob>(POST_QUEUE_CAP);
        let handles = (0..workers.max(1))
            .map(|_| {
                let rx = rx.clone();
                thread::spawn(move || run_worker(rx))
            })
            .collect();
        Self {
            tx: Some(tx),
            handles,
        }
    }

    pub fn submit(&self, job: PostJob) -> Result<(), SyncPError> {
        let Some(tx) = self.tx.as_ref() else {
            return Err(SyncPError::Stopped);
        };
        match tx.try_send(job) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SyncPError::QueueFull),
            Err(TrySendError::Disconnected(_)) => Err(SyncPError::Stopped),
        }
    }

    pub fn shutdown(&mut self) {
        self.tx.take();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

impl Drop for PostPool {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn run_worker(rx: Receiver<PostJob>) {
    while let Ok(job) = rx.recv() {
        thread::sleep(job.delay);
        send_lines(&job);
    }
}

fn send_lines(job: &PostJob) {
    let addr = format!("{}:{}", job.host, job.port);
    let stream = match std::net::ToSocketAddrs::to_socket_addrs(&addr) {
        Ok(mut addrs) => match addrs.next() {
            Some(addr) => TcpStream::connect_timeout(&addr, CONNECT_TIMEOUT),
            None => {
                log::error!("sync-P post: no address for {addr}");
                return;
            }
        },
        Err(e) => {
            log::error!("sync-P post: cannot resolve {addr}: {e}");
            return;
        }
    };
    let mut stream = match stream {
        Ok(s) => s,
        Err(e) => {
            log::error!("sync-P post: connect to {addr} failed: {e}");
            return;
        }
    };
    let _ = stream.set_write_timeout(Some(WRITE_TIMEOUT));
    for line in &job.lines {
        if let Err(e) = stream.write_all(line.as_bytes()) {
            log::error!("sync-P post: write to {addr} failed: {e}");
            return;
        }
    }
    log::debug!("sync-P post: {} lines sent to {addr}", job.lines.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_parsing() {
        assert_eq!(parse_url("example.com:8080"), ("example.com".to_string(), 8080));
        assert_eq!(parse_url("example.com"), ("example.com".to_string(), 80));
        assert_eq!(parse_url("example.com:"), ("example.com".to_string(), 80));
        assert_eq!(
            parse_url("example.com:8080/path"),
            ("example.com".to_string(), 8080)
        );
        assert_eq!(parse_url("example.com:nope"), ("example.com".to_string(), 80));
    }

    #[test]
    fn buffer_keeps_per_app_lines_separate() {
        let mut buffer = SyncPBuffer::new();
        buffer.append_encoded("Radio", vec!["a".to_string()]);
        buffer.append_encoded("Radio", vec!["b".to_string()]);
        buffer.append_encoded("Nav", vec!["c".to_string()]);

        assert_eq!(buffer.encoded_for("Radio"), ["a", "b"]);
        assert_eq!(buffer.encoded_for("Nav"), ["c"]);
        assert!(buffer.encoded_for("Phone").is_empty());

        buffer.drop_app("Radio");
        assert!(buffer.encoded_for("Radio").is_empty());
    }

    #[test]
    fn taking_encoded_lines_drains_them() {
        let mut buffer = SyncPBuffer::new();
        buffer.append_encoded("Radio", vec!["a".to_string(), "b".to_string()]);

        assert_eq!(buffer.take_encoded("Radio"), vec!["a", "b"]);
        assert!(buffer.take_encoded("Radio").is_empty());
        assert!(buffer.take_encoded("Nav").is_empty());
    }

    #[test]
    fn raw_slot_is_replaced_not_appended() {
        let mut buffer = SyncPBuffer::new();
        buffer.set_raw(vec!["x".to_string()]);
        buffer.set_raw(vec!["y".to_string()]);
        assert_eq!(buffer.raw(), ["y"]);
    }

    #[test]
    fn submit_after_shutdown_reports_stopped() {
        let mut pool = PostPool::new(1);
        pool.shutdown();
        assert!(matches!(
            pool.submit(PostJob {
                host: "localhost".to_string(),
                port: 80,
                delay: Duration::ZERO,
                lines: vec![],
            }),
            Err(SyncPError::Stopped)
        ));
    }
}
