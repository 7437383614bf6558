//! The wrapper sub-format carried inside `PluginParams` (event 213) payloads.
//!
//! The container core only delivers the raw payload; this module peels the
//! nested record structure off it: a 4-byte LE marker whose value is
//! ignored, then repeated `{u32 sub-id, u64 size (low/high u32), bytes}`
//! records. Two of the sub-ids carry UTF-8 strings naming the plugin and
//! its vendor.

use crate::err::DeserializationResult;
use crate::utils::byte_cursor::ByteCursor;

/// Sub-id of the UTF-8 plugin name record.
pub const SUB_ID_NAME: u32 = 57;
/// Sub-id of the UTF-8 vendor name record.
pub const SUB_ID_VENDOR: u32 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrapperRecord<'a> {
    pub sub_id: u32,
    pub data: &'a [u8],
}

/// Split a `PluginParams` payload into its wrapper records.
///
/// Fails with `EndOfBuffer` when a record head or body is truncated; the
/// caller decides whether that matters (container parsing never does).
pub fn wrapper_records(payload: &[u8]) -> DeserializationResult<Vec<WrapperRecord<'_>>> {
    let mut cursor = ByteCursor::new(payload);
    let _marker = cursor.u32("wrapper marker")?;

    let mut records = Vec::new();
    while cursor.remaining() > 0 {
        let sub_id = cursor.u32("wrapper record sub-id")?;
        let size_low = cursor.u32("wrapper record size (low)")?;
        let size_high = cursor.u32("wrapper record size (high)")?;
        let size = u64::from(size_high) << 32 | u64::from(size_low);

        let data = cursor.take_bytes(size as usize, "wrapper record data")?;
        records.push(WrapperRecord { sub_id, data });
    }

    Ok(records)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginIdentity {
    pub name: Option<String>,
    pub vendor: Option<String>,
}

/// Extract the plugin and vendor names from a `PluginParams` payload, if the
/// wrapper parses at all.
pub fn plugin_identity(payload: &[u8]) -> Option<PluginIdentity> {
    let records = wrapper_records(payload).ok()?;

    let mut identity = PluginIdentity::default();
    for record in records {
        match record.sub_id {
            SUB_ID_NAME => identity.name = Some(utf8_z(record.data)),
            SUB_ID_VENDOR => identity.vendor = Some(utf8_z(record.data)),
            _ => {}
        }
    }
    Some(identity)
}

fn utf8_z(bytes: &[u8]) -> String {
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    String::from_utf8_lossy(&bytes[..end]).into_owned()
}
