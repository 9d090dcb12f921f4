use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::constants::{DEFAULT_ORIGIN, DEFAULT_SEND_INTERVAL_SECS, IDLE_SLEEP_MS};
use crate::error::{LinkError, LinkResult};
use crate::interface::DeviceInterface;
use crate::line::LineBuffer;
use crate::message::OutgoingMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkState {
    Closed,
    Open,
    Running,
}

#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Prefix of every outgoing line
    pub origin: String,
    /// `None` makes the monitor receive-only
    pub send_interval: Option<Duration>,
    /// Pause between polls when nothing arrived
    pub idle_sleep: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        MonitorConfig {
            origin: DEFAULT_ORIGIN.to_owned(),
            send_interval: Some(Duration::from_secs(DEFAULT_SEND_INTERVAL_SECS)),
            idle_sleep: Duration::from_millis(IDLE_SLEEP_MS),
        }
    }
}

impl MonitorConfig {
    pub fn receive_only() -> Self {
        MonitorConfig {
            send_interval: None,
            ..Default::default()
        }
    }
}

/// Drives one open device: transmits on a fixed cadence and prints every
/// received line. Owns the device; it is released by [`LinkMonitor::close`]
/// or when the monitor goes out of scope, whichever comes first.
pub struct LinkMonitor<D: DeviceInterface> {
    device: Option<D>,
    config: MonitorConfig,
    state: LinkState,
    counter: u64,
    last_send: Option<Instant>,
    lines: LineBuffer,
}

impl<D: DeviceInterface> LinkMonitor<D> {
    pub fn new(device: D, config: MonitorConfig) -> Self {
        LinkMonitor {
            device: Some(device),
            config,
            state: LinkState::Open,
            counter: 0,
            last_send: None,
            lines: LineBuffer::new(),
        }
    }

    pub fn state(&self) -> LinkState {
        self.state
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Number of messages written so far
    pub fn sent_count(&self) -> u64 {
        self.counter
    }

    pub fn device(&self) -> Option<&D> {
        self.device.as_ref()
    }

    /// Arm the transmit timer. The first message goes out one interval after `now`.
    pub fn start(&mut self, now: Instant) -> LinkResult<()> {
        if self.device.is_none() {
            return Err(LinkError::PortIo("port is closed".to_owned()));
        }
        self.last_send = Some(now);
        self.state = LinkState::Running;
        debug!("Link running");
        Ok(())
    }

    /// One pass of the loop: send if the interval elapsed, then drain any
    /// buffered input. Returns true if bytes were received.
    pub fn poll<W: Write>(&mut self, now: Instant, out: &mut W) -> LinkResult<bool> {
        if self.transmit_due(now) {
            self.transmit(now, out)?;
        }
        self.receive(out)
    }

    /// Poll until `running` is cleared or an I/O error occurs
    pub fn run<W: Write>(&mut self, running: &AtomicBool, out: &mut W) -> LinkResult<()> {
        self.start(Instant::now())?;

        let result = self.run_loop(running, out);
        if self.state == LinkState::Running {
            self.state = LinkState::Open;
        }
        result
    }

    fn run_loop<W: Write>(&mut self, running: &AtomicBool, out: &mut W) -> LinkResult<()> {
        while running.load(Ordering::SeqCst) {
            if !self.poll(Instant::now(), out)? {
                std::thread::sleep(self.config.idle_sleep);
            }
        }
        info!("Stop requested after {} messages", self.counter);
        Ok(())
    }

    /// Release the port. Returns false if it was already released.
    pub fn close(&mut self) -> bool {
        match self.device.take() {
            Some(mut device) => {
                if let Err(e) = device.flush_buffers() {
                    debug!("Flush before close failed: {}", e);
                }
                drop(device);
                self.state = LinkState::Closed;
                true
            }
            None => false,
        }
    }

    fn device_mut(&mut self) -> LinkResult<&mut D> {
        self.device
            .as_mut()
            .ok_or_else(|| LinkError::PortIo("port is closed".to_owned()))
    }

    fn transmit_due(&self, now: Instant) -> bool {
        match (self.config.send_interval, self.last_send) {
            (Some(interval), Some(last)) => now.saturating_duration_since(last) >= interval,
            _ => false,
        }
    }

    fn transmit<W: Write>(&mut self, now: Instant, out: &mut W) -> LinkResult<()> {
        let message = OutgoingMessage::new(&self.config.origin, self.counter);
        self.device_mut()?.send(&message.to_bytes())?;
        console(out, format_args!("[Outgoing DATA] {}", message.text()))?;

        self.counter += 1;
        self.last_send = Some(now);
        Ok(())
    }

    fn receive<W: Write>(&mut self, out: &mut W) -> LinkResult<bool> {
        let device = self.device_mut()?;
        if device.bytes_available()? == 0 {
            return Ok(false);
        }

        let chunk = device.receive()?;
        for line in self.lines.push(&chunk) {
            console(out, format_args!("[Incoming DATA] {}", line))?;
        }
        Ok(!chunk.is_empty())
    }
}

fn console<W: Write>(out: &mut W, line: std::fmt::Arguments) -> LinkResult<()> {
    writeln!(out, "{}", line).map_err(|e| LinkError::Console(e.to_string()))
}
