//! Typed accessors over a parsed file.
//!
//! Everything here is a thin wrapper over event lookup; nothing is cached
//! and nothing is validated beyond what the events themselves carry.

use crate::event_table::ids;
use crate::flp_parser::FlpFile;
use crate::plugin_data::{self, PluginIdentity};

pub struct Project<'a> {
    file: &'a FlpFile,
}

impl<'a> Project<'a> {
    pub fn new(file: &'a FlpFile) -> Self {
        Project { file }
    }

    fn text_event(&self, id: u8) -> Option<String> {
        self.file.find_first(id)?.text(self.file.use_unicode()).ok()
    }

    pub fn title(&self) -> Option<String> {
        self.text_event(ids::TITLE)
    }

    pub fn comment(&self) -> Option<String> {
        self.text_event(ids::COMMENT)
    }

    pub fn url(&self) -> Option<String> {
        self.text_event(ids::URL)
    }

    pub fn genre(&self) -> Option<String> {
        self.text_event(ids::GENRE)
    }

    pub fn author(&self) -> Option<String> {
        self.text_event(ids::AUTHOR)
    }

    /// Tempo in BPM. Recent projects store thousandths in `FineTempo`;
    /// ancient ones only have the coarse word-sized `Tempo`.
    pub fn tempo(&self) -> Option<f64> {
        if let Some(event) = self.file.find_first(ids::FINE_TEMPO) {
            if let Ok(millibpm) = event.u32() {
                return Some(f64::from(millibpm) / 1000.0);
            }
        }

        self.file
            .find_first(ids::TEMPO)
            .and_then(|event| event.u16().ok())
            .map(f64::from)
    }

    /// Name/vendor pairs for every plugin wrapper in the project, in event
    /// order. Wrappers that fail to parse are skipped.
    pub fn plugins(&self) -> Vec<PluginIdentity> {
        self.file
            .find_all(ids::PLUGIN_PARAMS)
            .filter_map(|event| plugin_data::plugin_identity(event.payload()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flp_event::{FlpEvent, encode_text_payload};
    use crate::flp_parser::parse;
    use crate::flp_writer::serialize;

    fn file_with_events(events: &[FlpEvent]) -> FlpFile {
        let mut stream = Vec::new();
        for event in events {
            event.write_into(&mut stream);
        }

        let mut buf = Vec::new();
        buf.extend_from_slice(b"FLhd");
        buf.extend_from_slice(&6u32.to_le_bytes());
        buf.extend_from_slice(&0i16.to_le_bytes());
        buf.extend_from_slice(&4u16.to_le_bytes());
        buf.extend_from_slice(&96u16.to_le_bytes());
        buf.extend_from_slice(b"FLdt");
        buf.extend_from_slice(&(stream.len() as u32).to_le_bytes());
        buf.extend_from_slice(&stream);

        parse(&buf).unwrap()
    }

    #[test]
    fn reads_metadata_with_the_detected_encoding() {
        let file = file_with_events(&[
            FlpEvent::new(ids::VERSION, encode_text_payload("20.8.3", false)),
            FlpEvent::new(ids::TITLE, encode_text_payload("Night Drive", true)),
            FlpEvent::new(ids::AUTHOR, encode_text_payload("someone", true)),
            FlpEvent::new(ids::FINE_TEMPO, 140_500u32.to_le_bytes().to_vec()),
        ]);
        assert!(file.use_unicode());

        let project = Project::new(&file);
        assert_eq!(project.title().as_deref(), Some("Night Drive"));
        assert_eq!(project.author().as_deref(), Some("someone"));
        assert_eq!(project.tempo(), Some(140.5));
        assert_eq!(project.comment(), None);
    }

    #[test]
    fn falls_back_to_the_coarse_tempo() {
        let file = file_with_events(&[FlpEvent::new(ids::TEMPO, 130u16.to_le_bytes().to_vec())]);
        assert_eq!(Project::new(&file).tempo(), Some(130.0));
    }

    #[test]
    fn round_trips_through_serialize() {
        let file = file_with_events(&[
            FlpEvent::new(ids::VERSION, encode_text_payload("12.3", false)),
            FlpEvent::new(ids::TITLE, encode_text_payload("Loop", true)),
        ]);
        let bytes = serialize(&file);
        let reparsed = parse(&bytes).unwrap();
        assert_eq!(Project::new(&reparsed).title().as_deref(), Some("Loop"));
    }
}
