/// Data model shared by the parsers and the emitter: table types, category
/// maps, the type selector and the returned manifest.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::util;

/// The kinds of tables written under `unicode-<version>/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TableType {
    Categories,
    Scripts,
    Blocks,
    BinaryProperties,
    BidiClasses,
    BidiMirroring,
    BidiBrackets,
    CaseFolding,
}

impl TableType {
    pub fn parse(s: &str) -> Option<TableType> {
        match s {
            "categories" => Some(TableType::Categories),
            "scripts" => Some(TableType::Scripts),
            "blocks" => Some(TableType::Blocks),
            "binary-properties" => Some(TableType::BinaryProperties),
            "bidi-classes" => Some(TableType::BidiClasses),
            "bidi-mirroring" => Some(TableType::BidiMirroring),
            "bidi-brackets" => Some(TableType::BidiBrackets),
            "case-folding" => Some(TableType::CaseFolding),
            _ => None,
        }
    }

    /// Directory name of this table type.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableType::Categories => "categories",
            TableType::Scripts => "scripts",
            TableType::Blocks => "blocks",
            TableType::BinaryProperties => "binary-properties",
            TableType::BidiClasses => "bidi-classes",
            TableType::BidiMirroring => "bidi-mirroring",
            TableType::BidiBrackets => "bidi-brackets",
            TableType::CaseFolding => "case-folding",
        }
    }

    /// Bidi tables get a consolidated `Map` index keyed by code point.
    pub fn is_bidi(&self) -> bool {
        matches!(
            self,
            TableType::BidiClasses | TableType::BidiMirroring | TableType::BidiBrackets
        )
    }

    /// Returns true if `category` of this type feeds the consolidated
    /// `index.js` reverse lookup.
    pub fn has_index_entry(&self, category: &str) -> bool {
        self.is_bidi() || (*self == TableType::Categories && is_general_category(category))
    }

    /// Bidi mirroring is only ever written as an index.
    pub fn writes_categories(&self) -> bool {
        *self != TableType::BidiMirroring
    }
}

impl std::fmt::Display for TableType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-letter general category values such as `Lu` or `Nd`.
fn is_general_category(name: &str) -> bool {
    let b = name.as_bytes();
    b.len() == 2 && b[0].is_ascii_uppercase() && b[1].is_ascii_lowercase()
}

/// One category's payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Ordered code points belonging to the category.
    CodePoints(Vec<u32>),
    /// Case folding: source code point -> one or more target code points.
    Folding(BTreeMap<u32, Vec<u32>>),
}

impl Category {
    /// The code points this category covers: folding sources for folding tables.
    pub fn code_points(&self) -> Vec<u32> {
        match self {
            Category::CodePoints(cps) => cps.clone(),
            Category::Folding(map) => map.keys().copied().collect(),
        }
    }
}

impl From<Vec<u32>> for Category {
    fn from(cps: Vec<u32>) -> Self {
        Category::CodePoints(cps)
    }
}

/// Category name -> payload, in name order.
pub type CategoryMap = BTreeMap<String, Category>;

/// Builds a [`CategoryMap`] of plain code point lists.
pub fn code_point_map(map: BTreeMap<String, Vec<u32>>) -> CategoryMap {
    map.into_iter()
        .map(|(name, cps)| (name, Category::CodePoints(cps)))
        .collect()
}

/// Builds a [`CategoryMap`] of case folding tables.
pub fn folding_map(map: BTreeMap<String, BTreeMap<u32, Vec<u32>>>) -> CategoryMap {
    map.into_iter()
        .map(|(name, folds)| (name, Category::Folding(folds)))
        .collect()
}

/// Resolves the table type of each category in a batch.
#[derive(Debug, Clone, Copy)]
pub enum TypeSelector {
    /// Every category in the batch has this type.
    Fixed(TableType),
    /// The type is derived from the category name.
    ByCategory(fn(&str) -> TableType),
}

impl TypeSelector {
    pub fn resolve(&self, category: &str) -> TableType {
        match self {
            TypeSelector::Fixed(t) => *t,
            TypeSelector::ByCategory(f) => f(category),
        }
    }
}

impl From<TableType> for TypeSelector {
    fn from(t: TableType) -> Self {
        TypeSelector::Fixed(t)
    }
}

/// Manifest of what an emit run wrote: table type -> category names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DirectoryIndex {
    tables: BTreeMap<TableType, Vec<String>>,
}

impl DirectoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, table: TableType, category: &str) {
        util::append(&mut self.tables, table, category.to_string());
    }

    /// Make sure `table` is listed, even when none of its categories were written.
    pub fn ensure(&mut self, table: TableType) {
        self.tables.entry(table).or_default();
    }

    pub fn get(&self, table: TableType) -> Option<&[String]> {
        self.tables.get(&table).map(Vec::as_slice)
    }

    pub fn tables(&self) -> impl Iterator<Item = TableType> + '_ {
        self.tables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Merge another manifest into this one.
    pub fn merge(&mut self, other: &DirectoryIndex) {
        util::extend(&mut self.tables, &other.tables);
    }
}
