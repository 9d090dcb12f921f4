pub use error::{LinkError, LinkResult};
pub use interface::{DeviceInterface, PortConfig, SerialPortDevice};
pub use monitor::{LinkMonitor, LinkState, MonitorConfig};

pub mod constants;
pub mod error;
pub mod interface;
pub mod line;
pub mod message;
pub mod monitor;
