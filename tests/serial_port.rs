#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;
    use std::time::{Duration, Instant};

    use uartlink::{
        DeviceInterface, LinkError, LinkMonitor, LinkState, MonitorConfig, PortConfig,
        SerialPortDevice,
    };

    #[test]
    fn test_missing_device_is_unavailable() {
        let config = PortConfig::new("/dev/uartlink-no-such-device", 115200);

        match SerialPortDevice::open(config) {
            Err(LinkError::PortUnavailable(msg)) => {
                assert!(msg.contains("/dev/uartlink-no-such-device"))
            }
            Err(e) => panic!("unexpected error {:?}", e),
            Ok(_) => panic!("opened a device that does not exist"),
        }
    }

    #[test]
    fn test_default_config_matches_pi_uart() {
        let config = PortConfig::default();
        assert_eq!(config.port, "/dev/serial0");
        assert_eq!(config.baud, 115200);
        assert_eq!(config.data_bits, serialport::DataBits::Eight);
        assert_eq!(config.parity, serialport::Parity::None);
        assert_eq!(config.stop_bits, serialport::StopBits::One);
        assert_eq!(config.timeout, Duration::from_secs(1));
    }

    /// Needs TX and RX of the UART bridged with a jumper
    #[test]
    #[ignore]
    fn test_loopback_on_serial0() {
        let device = SerialPortDevice::open(PortConfig::default()).unwrap();
        let mut monitor = LinkMonitor::new(
            device,
            MonitorConfig {
                send_interval: Some(Duration::from_millis(100)),
                ..Default::default()
            },
        );
        assert_eq!(monitor.state(), LinkState::Open);

        let mut out = Vec::new();
        let start = Instant::now();
        monitor.start(start).unwrap();
        while start.elapsed() < Duration::from_millis(550) {
            if !monitor.poll(Instant::now(), &mut out).unwrap() {
                std::thread::sleep(Duration::from_millis(10));
            }
        }

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("[Outgoing DATA] RPi->STM32: Message 0"));
        assert!(printed.contains("[Incoming DATA] RPi->STM32: Message 0"));

        let running = AtomicBool::new(false);
        monitor.run(&running, &mut Vec::new()).unwrap();
        assert!(monitor.close());
        assert_eq!(monitor.state(), LinkState::Closed);
    }

    #[test]
    #[ignore]
    fn test_device_flush() {
        let mut device = SerialPortDevice::open(PortConfig::default()).unwrap();
        device.send(b"ping\n").unwrap();
        device.flush_buffers().unwrap();
    }
}
