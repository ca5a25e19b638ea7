//! WAP Push envelope handling.
//!
//! A connectionless WSP Push PDU starts with a transaction ID, the PDU type
//! and the length of the push headers. The MMS PDU follows the headers.

use thiserror::Error;

/// WSP PDU type of a Push.
const PUSH_PDU_TYPE: u8 = 0x06;

/// Shortest packet that can carry push headers and an MMS PDU.
const MIN_PACKET_LEN: usize = 6;

/// Error unwrapping a WAP Push packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The packet is not a WSP Push carrying a payload.
    #[error("invalid packet")]
    InvalidPacket,
}

/// Returns the payload of a WAP Push packet.
///
/// # Errors
///
/// Returns [`EnvelopeError::InvalidPacket`] if the packet is too short, is
/// not a Push, or its header length points past the end of the packet.
pub fn unwrap_push(packet: &[u8]) -> Result<&[u8], EnvelopeError> {
    if packet.len() < MIN_PACKET_LEN || packet[1] != PUSH_PDU_TYPE {
        return Err(EnvelopeError::InvalidPacket);
    }
    let start = usize::from(packet[2]) + 3;
    if start >= packet.len() {
        return Err(EnvelopeError::InvalidPacket);
    }
    tracing::debug!(header_len = packet[2], payload_len = packet.len() - start, "unwrapped wap push");
    Ok(&packet[start..])
}
