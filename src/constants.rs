pub const DEFAULT_SERIAL_PORT: &str = "/dev/serial0";
pub const DEFAULT_BAUD_RATE: u32 = 115200;
pub const SERIAL_TIMEOUT_MS: u64 = 1000;

pub const DEFAULT_SEND_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_ORIGIN: &str = "RPi->STM32";

pub(crate) const IDLE_SLEEP_MS: u64 = 10;
pub(crate) const MAX_READ_CHUNK: usize = 1024;
pub(crate) const MAX_LINE_LENGTH: usize = 64 * 1024;
