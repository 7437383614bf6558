use crate::flp_event::FlpEvent;
use crate::flp_file_header::EVENT_DATA_OFFSET;
use crate::flp_parser::FlpFile;

/// Serialize a parsed (possibly patched) file back to bytes.
///
/// Everything is emitted verbatim from the preserved framing; the only field
/// ever regenerated is the event-data length. In particular the outer header
/// is never reconstructed from its decoded fields, so non-canonical but
/// valid header bytes survive unchanged.
pub fn serialize(file: &FlpFile) -> Vec<u8> {
    let events_len: usize = file
        .events
        .iter()
        .map(FlpEvent::serialized_len)
        .sum::<usize>()
        + file.trailing.len();

    let mut out = Vec::with_capacity(EVENT_DATA_OFFSET + events_len);
    out.extend_from_slice(file.header.raw());
    out.extend_from_slice(&file.data_chunk_header[..4]);
    out.extend_from_slice(&(events_len as u32).to_le_bytes());

    for event in &file.events {
        event.write_into(&mut out);
    }
    out.extend_from_slice(&file.trailing);

    out
}
