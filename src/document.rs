/*! Annotated document and sample types.

A [Document] is the unit delivered by the annotation pipeline: an ad with a
year, a language and a flat list of positioned, zone-tagged tokens.
An [ExtractedSample] is the unit we emit: the windowed zone text along with
year/source/language metadata, one JSON line per sample.
!*/
use oxilangtag::LanguageTag;
use serde::{Deserialize, Serialize};

/// A single token or inter-token space.
///
/// Positions are monotonically increasing within a document but may have
/// gaps. The zone code groups into families of ten (`zone / 10 * 10`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub position: u32,
    pub zone: u32,
    #[serde(default)]
    pub text: String,
}

impl Token {
    /// Zone family of this token (61, 65, 69 all belong to family 60).
    pub fn zone_family(&self) -> u32 {
        self.zone / 10 * 10
    }
}

/// Language-tagged token sequence of an ad.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    pub language: LanguageTag<String>,
    pub tokens: Vec<Token>,
}

/// An annotated ad as read from an archive.
///
/// `id` is the archive-local identifier; the globally unique form is
/// obtained through [Document::qualified_id].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub year: u16,
    pub content: Content,
}

impl Document {
    /// Source-prefixed identifier, unique across the whole corpus.
    pub fn qualified_id(&self, source: &str) -> String {
        format!("{}-{}", source, self.id)
    }

    pub fn language(&self) -> &LanguageTag<String> {
        &self.content.language
    }

    pub fn tokens(&self) -> &[Token] {
        &self.content.tokens
    }
}

/// Metadata attached to an emitted sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleMetadata {
    pub year: u16,
    pub source: String,
    pub lang: LanguageTag<String>,
}

/// The output unit: extracted text plus metadata, serialized as one
/// JSON line (non-ASCII kept literal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedSample {
    pub id: String,
    pub text: String,
    pub meta: SampleMetadata,
}
