//! Reader for a whole demo chunk: `program_count(u16)` followed by programs.

use super::cursor::ByteCursor;
use super::decoder::{DecodeOptions, Decoder, RawProgram};
use super::error::DecodeError;
use super::program::DemoProgram;
use crate::assets::LocalizationSource;
use crate::text::LocalizedStrings;

/// A program in the chunk that could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("demo program #{index}{}: {source}", demo_label(.demo_id))]
pub struct ArchiveError {
    /// Position of the program in the chunk.
    pub index: usize,
    /// Header id, when the header itself was readable.
    pub demo_id: Option<u16>,
    #[source]
    pub source: DecodeError,
}

fn demo_label(demo_id: &Option<u16>) -> String {
    demo_id.map(|id| format!(" (id {id})")).unwrap_or_default()
}

/// Every program of one demo chunk.
///
/// A program whose payload fails to decode is recorded in `errors` and the
/// reader moves on to the next one, since the header already gave its size.
/// A truncated header leaves the rest of the chunk unaddressable, so reading
/// stops there.
#[derive(Debug, Clone, Default)]
pub struct DemoArchive {
    pub declared_programs: u16,
    pub programs: Vec<DemoProgram>,
    pub errors: Vec<ArchiveError>,
}

impl DemoArchive {
    /// Decode a chunk. Only an unreadable program count fails outright.
    pub fn decode(bytes: &[u8], decoder: &Decoder<'_>) -> Result<Self, DecodeError> {
        let mut cursor = ByteCursor::new(bytes);
        let declared_programs = cursor.read_u16_le()?;
        let mut archive = Self {
            declared_programs,
            ..Self::default()
        };

        for index in 0..usize::from(declared_programs) {
            let raw = match RawProgram::read(&mut cursor) {
                Ok(raw) => raw,
                Err(source) => {
                    tracing::warn!(index, error = %source, "Demo chunk truncated");
                    archive.errors.push(ArchiveError {
                        index,
                        demo_id: None,
                        source,
                    });
                    break;
                }
            };

            match decoder.decode_raw(&raw) {
                Ok(decoded) => archive.programs.push(decoded.into_program()),
                Err(source) => {
                    tracing::warn!(
                        index,
                        demo_id = raw.demo_id,
                        error = %source,
                        "Failed to decode demo program"
                    );
                    archive.errors.push(ArchiveError {
                        index,
                        demo_id: Some(raw.demo_id),
                        source,
                    });
                }
            }
        }

        Ok(archive)
    }

    /// Fetch the localized strings once, then decode the chunk with them.
    pub async fn load(
        bytes: &[u8],
        options: DecodeOptions,
        localization: &dyn LocalizationSource,
        table: &str,
    ) -> Result<Self, DecodeError> {
        let strings = localization.strings(table).await.map(LocalizedStrings::new);
        if strings.is_none() {
            tracing::info!(table, "Localized strings unavailable, demo text stays raw");
        }
        let decoder = Decoder::new(options).with_strings(strings.as_ref());
        Self::decode(bytes, &decoder)
    }

    pub fn program(&self, demo_id: u16) -> Option<&DemoProgram> {
        self.programs.iter().find(|p| p.demo_id == demo_id)
    }

    pub fn is_complete(&self) -> bool {
        self.errors.is_empty() && self.programs.len() == usize::from(self.declared_programs)
    }
}
