#[cfg(test)]
mod tests {
    use std::process::Command;

    #[test]
    fn test_missing_port_exits_with_checklist() {
        let output = Command::new(env!("CARGO_BIN_EXE_uartlink"))
            .args(["monitor", "--port", "/dev/uartlink-no-such-device"])
            .output()
            .unwrap();

        assert_eq!(output.status.code(), Some(1));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Serial port error"));
        assert!(stderr.contains("/dev/uartlink-no-such-device"));
        assert!(stderr.contains("raspi-config"));

        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(!stdout.contains("UART opened"));
        assert!(!stdout.contains("Serial port closed"));
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let output = Command::new(env!("CARGO_BIN_EXE_uartlink"))
            .args(["monitor", "--interval", "0"])
            .output()
            .unwrap();

        assert!(!output.status.success());
    }
}
