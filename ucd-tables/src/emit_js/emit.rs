/// Table emitter: writes `code-points.js`, `regex.js` and `symbols.js` for
/// every category of a batch, then one consolidated `index.js` per table type
/// that keeps a reverse lookup.
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::index::AuxiliaryIndex;
use super::layout::OutputLayout;
use super::regex::{to_pattern, MAX_CODE_POINT};
use super::writer::LiteralWriter;
use crate::model::{Category, CategoryMap, DirectoryIndex, TableType, TypeSelector};

/// Bidi class categories arrive as `Bidi_<class>`; files use the bare class.
pub const BIDI_CLASS_PREFIX: &str = "Bidi_";

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{table}: code point U+{code_point:04X} belongs to both '{first}' and '{second}'")]
    DuplicateOwner {
        table: TableType,
        code_point: u32,
        first: String,
        second: String,
    },
    #[error("{table}: category '{category}' has the wrong shape for this table type")]
    ShapeMismatch { table: TableType, category: String },
    #[error("category '{category}': {code_point:#X} is above U+10FFFF")]
    InvalidCodePoint { category: String, code_point: u32 },
}

/// Write every category of `map` under `layout`, resolving each category's
/// table type with `selector`.
///
/// Returns the manifest of written categories per table type, or `None` for
/// an empty map. Rerunning with the same input rewrites identical bytes.
pub fn emit(
    layout: &OutputLayout,
    map: &CategoryMap,
    selector: TypeSelector,
) -> Result<Option<DirectoryIndex>, EmitError> {
    if map.is_empty() {
        return Ok(None);
    }

    for (name, category) in map {
        if let Some(code_point) = first_invalid(category) {
            return Err(EmitError::InvalidCodePoint {
                category: name.clone(),
                code_point,
            });
        }
    }

    let mut manifest = DirectoryIndex::new();
    let mut aux = AuxiliaryIndex::new();

    for (name, category) in map {
        let table = selector.resolve(name);
        let label = match table {
            TableType::BidiClasses => name.strip_prefix(BIDI_CLASS_PREFIX).unwrap_or(name),
            _ => name.as_str(),
        };

        let is_folding = matches!(category, Category::Folding(_));
        if is_folding != (table == TableType::CaseFolding) {
            return Err(EmitError::ShapeMismatch {
                table,
                category: name.clone(),
            });
        }

        if table.has_index_entry(label) {
            aux.claim(table, label, &category.code_points())
                .map_err(|c| EmitError::DuplicateOwner {
                    table,
                    code_point: c.code_point,
                    first: c.first,
                    second: c.second,
                })?;
        }

        if !table.writes_categories() {
            continue;
        }

        manifest.record(table, label);
        let dir = layout.category_dir(table, label);
        write_category(&dir, category)?;
        tracing::debug!(table = %table, category = label, "wrote category tables");
    }

    let indexed: Vec<TableType> = aux.tables().collect();
    for table in indexed {
        manifest.ensure(table);
        let Some(source) = aux.render(table) else {
            continue;
        };
        let dir = layout.table_dir(table);
        create_dir(&dir)?;
        write_file(&dir.join("index.js"), &source)?;
        tracing::info!(
            table = %table,
            entries = aux.owners(table).map_or(0, BTreeMap::len),
            "wrote index"
        );
    }

    Ok(Some(manifest))
}

/// The first value in `category`, source or fold target, that is not a code point.
fn first_invalid(category: &Category) -> Option<u32> {
    match category {
        Category::CodePoints(cps) => cps.iter().copied().find(|cp| *cp > MAX_CODE_POINT),
        Category::Folding(folds) => folds
            .iter()
            .flat_map(|(from, to)| std::iter::once(from).chain(to))
            .copied()
            .find(|cp| *cp > MAX_CODE_POINT),
    }
}

fn write_category(dir: &Path, category: &Category) -> Result<(), EmitError> {
    create_dir(dir)?;
    match category {
        Category::CodePoints(cps) => {
            let mut w = LiteralWriter::module_exports();
            w.number_array(cps);
            write_file(&dir.join("code-points.js"), &w.finish())?;

            let regex = format!("module.exports=/{}/", to_pattern(cps));
            write_file(&dir.join("regex.js"), &regex)?;

            let mut w = LiteralWriter::module_exports();
            w.symbol_array(cps);
            write_file(&dir.join("symbols.js"), &w.finish())?;
        }
        Category::Folding(folds) => {
            write_file(&dir.join("code-points.js"), &folding_code_points(folds))?;
            write_file(&dir.join("symbols.js"), &folding_symbols(folds))?;
        }
    }
    Ok(())
}

/// `{"65":97,"223":[115,115]}`: single targets as numbers, multiple as arrays.
fn folding_code_points(folds: &BTreeMap<u32, Vec<u32>>) -> String {
    let mut w = LiteralWriter::module_exports();
    w.raw("{");
    for (i, (from, to)) in folds.iter().enumerate() {
        if i > 0 {
            w.raw(",");
        }
        w.raw(&format!("\"{from}\":"));
        match to.as_slice() {
            [single] => w.number(*single),
            many => w.number_array(many),
        }
    }
    w.raw("}");
    w.finish()
}

/// `{"A":"a","\xDF":"ss"}`: source character to folded string.
fn folding_symbols(folds: &BTreeMap<u32, Vec<u32>>) -> String {
    let mut w = LiteralWriter::module_exports();
    w.raw("{");
    for (i, (from, to)) in folds.iter().enumerate() {
        if i > 0 {
            w.raw(",");
        }
        w.string_of([*from]);
        w.raw(":");
        w.string_of(to.iter().copied());
    }
    w.raw("}");
    w.finish()
}

fn create_dir(path: &Path) -> Result<(), EmitError> {
    std::fs::create_dir_all(path).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), EmitError> {
    std::fs::write(path, contents).map_err(|source| EmitError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn folds() -> BTreeMap<u32, Vec<u32>> {
        let mut folds = BTreeMap::new();
        folds.insert(0x41, vec![0x61]);
        folds.insert(0xDF, vec![0x73, 0x73]);
        folds
    }

    #[test]
    fn test_folding_code_points() {
        assert_eq!(
            folding_code_points(&folds()),
            r#"module.exports={"65":97,"223":[115,115]}"#
        );
    }

    #[test]
    fn test_folding_symbols() {
        assert_eq!(
            folding_symbols(&folds()),
            r#"module.exports={"A":"a","\xDF":"ss"}"#
        );
    }

    #[test]
    fn test_empty_map_emits_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "15.1.0");
        let result = emit(
            &layout,
            &CategoryMap::new(),
            TypeSelector::Fixed(TableType::Scripts),
        )
        .unwrap();
        assert!(result.is_none());
        assert!(!layout.version_dir().exists());
    }

    #[test]
    fn test_shape_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "15.1.0");
        let mut map = CategoryMap::new();
        map.insert("C".into(), Category::CodePoints(vec![65]));
        let err = emit(&layout, &map, TypeSelector::Fixed(TableType::CaseFolding)).unwrap_err();
        assert!(matches!(err, EmitError::ShapeMismatch { .. }));
    }

    #[test]
    fn test_rejects_values_above_max_code_point() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "15.1.0");
        let mut map = CategoryMap::new();
        map.insert("A".into(), Category::CodePoints(vec![0x41]));
        map.insert("X".into(), Category::CodePoints(vec![0x41, 0x110000]));
        let err = emit(&layout, &map, TypeSelector::Fixed(TableType::Scripts)).unwrap_err();
        match err {
            EmitError::InvalidCodePoint {
                category,
                code_point,
            } => {
                assert_eq!(category, "X");
                assert_eq!(code_point, 0x110000);
            }
            other => panic!("expected InvalidCodePoint, got {other:?}"),
        }
        // nothing is written once any category is invalid
        assert!(!layout.version_dir().exists());
    }

    #[test]
    fn test_rejects_fold_target_above_max_code_point() {
        let dir = tempfile::tempdir().unwrap();
        let layout = OutputLayout::new(dir.path(), "15.1.0");
        let mut folds = BTreeMap::new();
        folds.insert(0x41, vec![0x61, 0x200000]);
        let mut map = CategoryMap::new();
        map.insert("F".into(), Category::Folding(folds));
        let err = emit(&layout, &map, TypeSelector::Fixed(TableType::CaseFolding)).unwrap_err();
        assert!(matches!(
            err,
            EmitError::InvalidCodePoint {
                code_point: 0x200000,
                ..
            }
        ));
    }

    #[test]
    fn test_io_error_carries_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let layout = OutputLayout::new(&blocker, "15.1.0");
        let mut map = CategoryMap::new();
        map.insert("Latin".into(), Category::CodePoints(vec![65]));
        match emit(&layout, &map, TypeSelector::Fixed(TableType::Scripts)) {
            Err(EmitError::Io { path, .. }) => assert!(path.starts_with(&blocker)),
            other => panic!("expected Io error, got {other:?}"),
        }
    }
}
