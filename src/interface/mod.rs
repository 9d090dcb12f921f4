pub mod serialport;

use crate::error::LinkResult;

pub use self::serialport::{PortConfig, SerialPortDevice, available_ports};

/// Byte-level access to the remote end of the link
pub trait DeviceInterface {
    /// Write all bytes to the device
    fn send(&mut self, data: &[u8]) -> LinkResult<()>;

    /// Number of received bytes waiting in the input buffer
    fn bytes_available(&mut self) -> LinkResult<usize>;

    /// Read whatever is currently buffered, without waiting for more
    fn receive(&mut self) -> LinkResult<Vec<u8>>;

    /// Flush pending output
    fn flush_buffers(&mut self) -> LinkResult<()>;
}
