use uartlink::{LinkResult, interface::available_ports};

pub(crate) fn handle_ports() -> LinkResult<()> {
    let ports = available_ports()?;
    if ports.is_empty() {
        println!("No serial ports found");
        return Ok(());
    }

    for port in ports {
        println!("{:<24} {}", port.name, port.description);
    }
    Ok(())
}
