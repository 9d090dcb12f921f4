use tracing::{debug, trace};

use super::DeviceInterface;
use crate::constants::{DEFAULT_BAUD_RATE, DEFAULT_SERIAL_PORT, MAX_READ_CHUNK, SERIAL_TIMEOUT_MS};

use crate::error::{LinkError, LinkResult};
use serialport::{DataBits, FlowControl, Parity, SerialPortType, StopBits};
use std::io::{Read, Write};
use std::time::Duration;

pub type ComPort = String;
pub type BaudRate = u32;

/// Line settings of the UART. Fixed once the port is open.
#[derive(Debug, Clone)]
pub struct PortConfig {
    pub port: ComPort,
    pub baud: BaudRate,
    pub data_bits: DataBits,
    pub parity: Parity,
    pub stop_bits: StopBits,
    pub flow_control: FlowControl,
    pub timeout: Duration,
}

impl Default for PortConfig {
    fn default() -> Self {
        PortConfig {
            port: DEFAULT_SERIAL_PORT.to_owned(),
            baud: DEFAULT_BAUD_RATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
            flow_control: FlowControl::None,
            timeout: Duration::from_millis(SERIAL_TIMEOUT_MS),
        }
    }
}

impl PortConfig {
    pub fn new(port: impl Into<ComPort>, baud: BaudRate) -> Self {
        PortConfig {
            port: port.into(),
            baud,
            ..Default::default()
        }
    }
}

/// Serial port device_interface layer. The handle is released when this is dropped.
pub struct SerialPortDevice {
    serial_port: Box<dyn serialport::SerialPort>,
    config: PortConfig,
}

impl SerialPortDevice {
    pub fn open(config: PortConfig) -> LinkResult<SerialPortDevice> {
        let serial_port = serialport::new(config.port.as_str(), config.baud)
            .data_bits(config.data_bits)
            .parity(config.parity)
            .stop_bits(config.stop_bits)
            .flow_control(config.flow_control)
            .timeout(config.timeout)
            .open()
            .map_err(|e| LinkError::PortUnavailable(format!("{}: {}", config.port, e)))?;

        debug!("Opened {} at {} baud", config.port, config.baud);
        Ok(SerialPortDevice {
            serial_port,
            config,
        })
    }

    pub fn config(&self) -> &PortConfig {
        &self.config
    }
}

impl DeviceInterface for SerialPortDevice {
    fn send(&mut self, data: &[u8]) -> LinkResult<()> {
        self.serial_port
            .write_all(data)
            .map_err(|e| LinkError::PortIo(format!("write failed: {}", e)))?;
        trace!("Sent bytes {:?}", data);
        Ok(())
    }

    fn bytes_available(&mut self) -> LinkResult<usize> {
        let pending = self
            .serial_port
            .bytes_to_read()
            .map_err(|e| LinkError::PortIo(format!("could not query input buffer: {}", e)))?;
        Ok(pending as usize)
    }

    fn receive(&mut self) -> LinkResult<Vec<u8>> {
        let pending = self.bytes_available()?.min(MAX_READ_CHUNK);
        if pending == 0 {
            return Ok(Vec::new());
        }

        let mut buffer = vec![0; pending];
        let size = self
            .serial_port
            .read(&mut buffer)
            // Timeout error is fine, just continue
            .or_else(|e| {
                if e.kind() == std::io::ErrorKind::TimedOut {
                    Ok(0)
                } else {
                    Err(e)
                }
            })
            .map_err(|e| LinkError::PortIo(format!("read failed: {}", e)))?;

        buffer.truncate(size);
        trace!("Received bytes {:?}", buffer);
        Ok(buffer)
    }

    fn flush_buffers(&mut self) -> LinkResult<()> {
        self.serial_port
            .flush()
            .map_err(|e| LinkError::PortIo(format!("Failed to flush output buffer, {}", e)))?;

        Ok(())
    }
}

impl Drop for SerialPortDevice {
    fn drop(&mut self) {
        debug!("Closing {}", self.config.port);
    }
}

/// A serial port as reported by the OS
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortListing {
    pub name: String,
    pub description: String,
}

/// Enumerate serial ports known to the OS
pub fn available_ports() -> LinkResult<Vec<PortListing>> {
    let ports = serialport::available_ports().map_err(|e| {
        LinkError::Configuration(format!("Could not get available ports. Err {:?}", e))
    })?;

    Ok(ports
        .into_iter()
        .map(|port| {
            let description = match port.port_type {
                SerialPortType::UsbPort(info) => {
                    let product = info.product.unwrap_or_default();
                    format!("USB {:04x}:{:04x} {}", info.vid, info.pid, product)
                        .trim_end()
                        .to_owned()
                }
                SerialPortType::PciPort => "PCI".to_owned(),
                SerialPortType::BluetoothPort => "Bluetooth".to_owned(),
                SerialPortType::Unknown => "Unknown".to_owned(),
            };
            PortListing {
                name: port.port_name,
                description,
            }
        })
        .collect())
}
