use crate::flp_event::FlpEvent;
use crate::flp_parser::FlpFile;

/// Verdict a patch callback returns for each event.
///
/// `Keep` re-emits the original framing and payload verbatim, which is what
/// makes conservative round trips possible: the serializer never has to
/// guess whether a payload was "really" touched. `Payload` swaps the payload
/// under the same id, rebuilding the VLI size prefix only when the original
/// event carried one. `Event` replaces the event wholesale (typically with
/// a synthesized `FlpEvent`, whose framing the serializer regenerates).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventPatch {
    Keep,
    Payload(Vec<u8>),
    Event(FlpEvent),
}

/// Apply `f` to every event, producing a new file.
///
/// Patching is infallible: the transform is pure, untouched events are
/// carried over as-is, and the event-data length field is recomputed at
/// serialization time.
pub fn patch<F>(file: &FlpFile, mut f: F) -> FlpFile
where
    F: FnMut(&FlpEvent, usize) -> EventPatch,
{
    let events = file
        .events
        .iter()
        .enumerate()
        .map(|(index, event)| match f(event, index) {
            EventPatch::Keep => event.clone(),
            EventPatch::Payload(payload) => event.with_payload(payload),
            EventPatch::Event(replacement) => replacement,
        })
        .collect();

    FlpFile {
        header: file.header.clone(),
        data_chunk_header: file.data_chunk_header,
        events,
        trailing: file.trailing.clone(),
        version: file.version.clone(),
        use_unicode: file.use_unicode,
    }
}
