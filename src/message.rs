/// A counter-tagged line headed for the device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    text: String,
}

impl OutgoingMessage {
    pub fn new(origin: &str, counter: u64) -> Self {
        OutgoingMessage {
            text: format!("{}: Message {}", origin, counter),
        }
    }

    /// Line as shown on the console, without terminator
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Wire representation, newline terminated
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.text.len() + 1);
        bytes.extend_from_slice(self.text.as_bytes());
        bytes.push(b'\n');
        bytes
    }
}
