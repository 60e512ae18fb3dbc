/// Reverse lookup tables (code point -> owning category) collected while
/// categories are written, and rendered as one `index.js` per table type.
use std::collections::BTreeMap;

use super::writer::LiteralWriter;
use crate::model::TableType;

/// A code point was claimed by two categories of the same table type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub code_point: u32,
    pub first: String,
    pub second: String,
}

/// Per-type owner maps for one emit run.
#[derive(Debug, Default)]
pub struct AuxiliaryIndex {
    owners: BTreeMap<TableType, BTreeMap<u32, String>>,
}

impl AuxiliaryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `label` as the owner of every code point in `code_points`.
    /// Repeating a code point within the same category is not a conflict.
    pub fn claim(
        &mut self,
        table: TableType,
        label: &str,
        code_points: &[u32],
    ) -> Result<(), Conflict> {
        let owners = self.owners.entry(table).or_default();
        for &cp in code_points {
            if let Some(first) = owners.get(&cp) {
                if first == label {
                    continue;
                }
                return Err(Conflict {
                    code_point: cp,
                    first: first.clone(),
                    second: label.to_string(),
                });
            }
            owners.insert(cp, label.to_string());
        }
        Ok(())
    }

    pub fn tables(&self) -> impl Iterator<Item = TableType> + '_ {
        self.owners.keys().copied()
    }

    pub fn owners(&self, table: TableType) -> Option<&BTreeMap<u32, String>> {
        self.owners.get(&table)
    }

    /// Source of `<table>/index.js`, or `None` if nothing was claimed for it.
    pub fn render(&self, table: TableType) -> Option<String> {
        let owners = self.owners.get(&table)?;
        Some(if table.is_bidi() {
            render_map(owners)
        } else {
            render_positional(owners)
        })
    }
}

/// `module.exports=new Map([[cp,"label"],...])`
fn render_map(owners: &BTreeMap<u32, String>) -> String {
    let mut w = LiteralWriter::module_exports();
    w.raw("new Map([");
    for (i, (cp, label)) in owners.iter().enumerate() {
        if i > 0 {
            w.raw(",");
        }
        w.raw("[");
        w.number(*cp);
        w.raw(",");
        w.string(label);
        w.raw("]");
    }
    w.raw("])");
    w.finish()
}

/// `var x=[...];module.exports=new Map(x.entries())`, where array position is
/// the code point. Unowned positions up to the highest owned code point are
/// left as holes.
fn render_positional(owners: &BTreeMap<u32, String>) -> String {
    let mut w = LiteralWriter::new();
    w.raw("var x=[");
    let mut prev: Option<u32> = None;
    for (&cp, label) in owners {
        let commas = match prev {
            None => cp,
            Some(p) => cp - p,
        };
        for _ in 0..commas {
            w.raw(",");
        }
        w.string(label);
        prev = Some(cp);
    }
    w.raw("];module.exports=new Map(x.entries())");
    w.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claim_rejects_second_owner() {
        let mut aux = AuxiliaryIndex::new();
        aux.claim(TableType::BidiClasses, "L", &[65, 66]).unwrap();
        aux.claim(TableType::BidiBrackets, "Open", &[65]).unwrap();
        let err = aux.claim(TableType::BidiClasses, "R", &[67, 66]).unwrap_err();
        assert_eq!(
            err,
            Conflict {
                code_point: 66,
                first: "L".into(),
                second: "R".into(),
            }
        );
    }

    #[test]
    fn test_claim_repeated_code_point_same_owner() {
        let mut aux = AuxiliaryIndex::new();
        aux.claim(TableType::Categories, "Lu", &[65, 65]).unwrap();
        aux.claim(TableType::Categories, "Lu", &[65, 66]).unwrap();
        assert_eq!(
            aux.render(TableType::Categories).unwrap(),
            format!(
                r#"var x=[{}"Lu","Lu"];module.exports=new Map(x.entries())"#,
                ",".repeat(65)
            )
        );
    }

    #[test]
    fn test_render_bidi_map() {
        let mut aux = AuxiliaryIndex::new();
        aux.claim(TableType::BidiBrackets, "Open", &[40]).unwrap();
        aux.claim(TableType::BidiBrackets, "Close", &[41]).unwrap();
        assert_eq!(
            aux.render(TableType::BidiBrackets).unwrap(),
            r#"module.exports=new Map([[40,"Open"],[41,"Close"]])"#
        );
    }

    #[test]
    fn test_render_positional_dense() {
        let mut aux = AuxiliaryIndex::new();
        aux.claim(TableType::Categories, "Lu", &[1]).unwrap();
        aux.claim(TableType::Categories, "Cc", &[0]).unwrap();
        assert_eq!(
            aux.render(TableType::Categories).unwrap(),
            r#"var x=["Cc","Lu"];module.exports=new Map(x.entries())"#
        );
    }

    #[test]
    fn test_render_positional_holes() {
        let mut aux = AuxiliaryIndex::new();
        aux.claim(TableType::Categories, "Lu", &[2]).unwrap();
        aux.claim(TableType::Categories, "Ll", &[4]).unwrap();
        // [ <hole>, <hole>, "Lu", <hole>, "Ll" ]
        assert_eq!(
            aux.render(TableType::Categories).unwrap(),
            r#"var x=[,,"Lu",,"Ll"];module.exports=new Map(x.entries())"#
        );
    }

    #[test]
    fn test_render_unknown_table() {
        assert_eq!(AuxiliaryIndex::new().render(TableType::Scripts), None);
    }
}
