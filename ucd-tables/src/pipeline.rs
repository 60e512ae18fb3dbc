/// Wires UCD source files to their parsers and the table emitter.
use std::path::PathBuf;

use crate::emit_js::{emit, OutputLayout, BIDI_CLASS_PREFIX};
use crate::model::{code_point_map, CategoryMap, DirectoryIndex, TableType, TypeSelector};
use crate::parse;
use crate::source::{read_source, source_path};
use crate::Error;

/// The UCD files this tool knows how to turn into tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKind {
    Database,
    Scripts,
    Blocks,
    Properties,
    DerivedCoreProperties,
    CaseFolding,
    BidiMirroring,
    BidiBrackets,
}

impl SourceKind {
    pub const ALL: [SourceKind; 8] = [
        SourceKind::Database,
        SourceKind::Scripts,
        SourceKind::Blocks,
        SourceKind::Properties,
        SourceKind::DerivedCoreProperties,
        SourceKind::CaseFolding,
        SourceKind::BidiMirroring,
        SourceKind::BidiBrackets,
    ];

    pub fn parse(s: &str) -> Option<SourceKind> {
        SourceKind::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// The `<type>` part of `<version>-<type>.txt`.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Database => "database",
            SourceKind::Scripts => "scripts",
            SourceKind::Blocks => "blocks",
            SourceKind::Properties => "properties",
            SourceKind::DerivedCoreProperties => "derived-core-properties",
            SourceKind::CaseFolding => "case-folding",
            SourceKind::BidiMirroring => "bidi-mirroring",
            SourceKind::BidiBrackets => "bidi-brackets",
        }
    }

    /// How categories parsed from this source map to table types.
    pub fn selector(&self) -> TypeSelector {
        match self {
            SourceKind::Database => TypeSelector::ByCategory(database_table),
            SourceKind::Scripts => TypeSelector::Fixed(TableType::Scripts),
            SourceKind::Blocks => TypeSelector::Fixed(TableType::Blocks),
            SourceKind::Properties | SourceKind::DerivedCoreProperties => {
                TypeSelector::Fixed(TableType::BinaryProperties)
            }
            SourceKind::CaseFolding => TypeSelector::Fixed(TableType::CaseFolding),
            SourceKind::BidiMirroring => TypeSelector::Fixed(TableType::BidiMirroring),
            SourceKind::BidiBrackets => TypeSelector::Fixed(TableType::BidiBrackets),
        }
    }

    /// Parse the contents of this source into a category batch.
    pub fn parse_text(&self, text: &str) -> Result<CategoryMap, parse::ParseError> {
        match self {
            SourceKind::Database => Ok(parse::parse_unicode_data(text)?.into_category_map()),
            SourceKind::Scripts
            | SourceKind::Blocks
            | SourceKind::Properties
            | SourceKind::DerivedCoreProperties => {
                Ok(code_point_map(parse::parse_property_ranges(text)?))
            }
            SourceKind::CaseFolding => parse::parse_case_folding(text),
            SourceKind::BidiMirroring => parse::parse_bidi_mirroring(text),
            SourceKind::BidiBrackets => parse::parse_bidi_brackets(text),
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn database_table(category: &str) -> TableType {
    if category.starts_with(BIDI_CLASS_PREFIX) {
        TableType::BidiClasses
    } else {
        TableType::Categories
    }
}

/// One generation run.
#[derive(Debug, Clone)]
pub struct Config {
    pub version: String,
    pub data_dir: PathBuf,
    pub out_dir: PathBuf,
    /// Sources to process; all of them when empty.
    pub sources: Vec<SourceKind>,
}

impl Config {
    fn selected_sources(&self) -> Vec<SourceKind> {
        if self.sources.is_empty() {
            return SourceKind::ALL.to_vec();
        }
        let mut sources = self.sources.clone();
        sources.sort();
        sources.dedup();
        sources
    }
}

/// Read, parse and emit every selected source. Missing sources are skipped.
/// Returns the merged manifest of everything written.
pub fn run(config: &Config) -> Result<DirectoryIndex, Error> {
    let layout = OutputLayout::new(&config.out_dir, &config.version);
    let mut manifest = DirectoryIndex::new();

    for kind in config.selected_sources() {
        let Some(text) = read_source(&config.data_dir, &config.version, kind.as_str())
            .map_err(|source| Error::Read {
                path: source_path(&config.data_dir, &config.version, kind.as_str()),
                source,
            })?
        else {
            tracing::warn!(source = %kind, version = %config.version, "source file missing, skipping");
            continue;
        };

        let map = kind
            .parse_text(&text)
            .map_err(|source| Error::Parse { kind, source })?;
        tracing::info!(source = %kind, categories = map.len(), "parsed source");

        if let Some(written) = emit(&layout, &map, kind.selector())? {
            manifest.merge(&written);
        }
    }

    Ok(manifest)
}
