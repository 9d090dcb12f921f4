use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::Parser;
use tracing::debug;
use uartlink::{
    DeviceInterface, LinkError, LinkMonitor, MonitorConfig, PortConfig, SerialPortDevice,
    constants::{DEFAULT_BAUD_RATE, DEFAULT_ORIGIN, DEFAULT_SEND_INTERVAL_SECS, DEFAULT_SERIAL_PORT},
};

#[derive(Parser, Debug, Clone)]
pub(crate) struct MonitorOptions {
    /// Serial port
    #[clap(short, long, default_value = DEFAULT_SERIAL_PORT)]
    port: String,

    /// Baud rate
    #[clap(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud: u32,

    /// Seconds between outgoing messages
    #[clap(short, long, default_value_t = DEFAULT_SEND_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Only print incoming lines, never transmit
    #[clap(short, long, default_value_t = false)]
    receive_only: bool,

    /// Prefix of outgoing messages
    #[clap(short, long, default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Debug logging on stderr
    #[clap(short, long, default_value_t = false)]
    pub(crate) verbose: bool,
}

impl MonitorOptions {
    fn port_config(&self) -> PortConfig {
        PortConfig::new(self.port.clone(), self.baud)
    }

    fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            origin: self.origin.clone(),
            send_interval: (!self.receive_only).then(|| Duration::from_secs(self.interval)),
            ..Default::default()
        }
    }
}

pub(crate) fn handle_monitor(opts: MonitorOptions) -> ExitCode {
    let running = Arc::new(AtomicBool::new(true));
    let flag = Arc::clone(&running);
    if let Err(e) = ctrlc::set_handler(move || flag.store(false, Ordering::SeqCst)) {
        eprintln!("Failed to set Ctrl+C handler: {}", e);
        return ExitCode::from(1);
    }

    let device = match SerialPortDevice::open(opts.port_config()) {
        Ok(device) => device,
        Err(e) => {
            report_error(&mut std::io::stderr(), &e);
            return ExitCode::from(1);
        }
    };

    let config = opts.monitor_config();
    print_banner(&mut std::io::stdout(), device.config(), &config);

    let mut monitor = LinkMonitor::new(device, config);
    let status = run_session(
        &mut monitor,
        &running,
        &mut std::io::stdout(),
        &mut std::io::stderr(),
    );
    ExitCode::from(status)
}

/// Run until stopped, then release the port. Returns the process exit status.
fn run_session<D, W, E>(
    monitor: &mut LinkMonitor<D>,
    running: &AtomicBool,
    out: &mut W,
    err: &mut E,
) -> u8
where
    D: DeviceInterface,
    W: Write,
    E: Write,
{
    let result = monitor.run(running, out);

    match &result {
        Ok(()) => notice(out, "\n\nExiting..."),
        Err(e) => report_error(err, e),
    }

    if monitor.close() {
        notice(out, "Serial port closed");
    }
    debug!("Sent {} messages", monitor.sent_count());

    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

fn notice<W: Write>(out: &mut W, text: &str) {
    if let Err(e) = writeln!(out, "{}", text) {
        debug!("Could not write to console: {}", e);
    }
}

fn print_banner<W: Write>(out: &mut W, port: &PortConfig, config: &MonitorConfig) {
    let mode = match config.send_interval {
        Some(interval) => format!(
            "Bidirectional UART communication, sending every {}s...",
            interval.as_secs()
        ),
        None => "Listening for UART data...".to_owned(),
    };
    let banner = format!(
        "UART opened on {} at {} baud\n{}\nPress Ctrl+C to exit\n{}",
        port.port,
        port.baud,
        mode,
        "-".repeat(50)
    );
    notice(out, &banner);
}

/// Port failures get the wiring checklist, anything else just the message
fn report_error<W: Write>(out: &mut W, e: &LinkError) {
    match e {
        LinkError::PortUnavailable(_) | LinkError::PortIo(_) => {
            notice(out, &format!("Serial port error: {}", e));
            notice(
                out,
                "\nTroubleshooting tips:\n\
                 1. Enable UART: sudo raspi-config -> Interface Options -> Serial Port\n\
                 \x20  - Disable serial console, enable serial port hardware\n\
                 2. Check connections: TX->RX, RX->TX, GND->GND\n\
                 3. Verify port: ls -l /dev/serial* (or run `uartlink ports`)",
            );
        }
        _ => notice(out, &format!("Error: {}", e)),
    }
}
