//! JSON-friendly per-event summaries for the dump tool.

use serde::Serialize;
use serde_json::Value;

use crate::event_table;
use crate::flp_event::FlpEvent;

/// What `flp_dump` prints for one event.
#[derive(Debug, Serialize)]
pub struct EventSummary {
    pub index: usize,
    /// Absolute file offset of the event's first framing byte.
    pub offset: usize,
    pub id: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    pub kind: &'static str,
    pub payload_len: usize,
    /// Decoded value where the kind allows one: a number for the fixed
    /// kinds, a string for text. Opaque payloads are omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

pub fn summarize(
    event: &FlpEvent,
    index: usize,
    offset: usize,
    use_unicode: bool,
) -> EventSummary {
    use event_table::EventKind::*;

    let value = match event.kind {
        U8 => event.u8().ok().map(Value::from),
        I8 => event.i8().ok().map(Value::from),
        U16 => event.u16().ok().map(Value::from),
        I16 => event.i16().ok().map(Value::from),
        U32 => event.u32().ok().map(Value::from),
        I32 => event.i32().ok().map(Value::from),
        F32 => event.f32().ok().map(|v| Value::from(f64::from(v))),
        Text => event.text(use_unicode).ok().map(Value::from),
        Data | Unknown => None,
    };

    EventSummary {
        index,
        offset,
        id: event.id,
        name: event_table::event_name(event.id),
        kind: event.kind.as_str(),
        payload_len: event.payload().len(),
        value,
    }
}
