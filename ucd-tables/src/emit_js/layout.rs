/// Where generated tables land on disk:
/// `<root>/unicode-<version>/<type>/<category>/`.
use std::path::{Path, PathBuf};

use crate::model::TableType;

#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    version: String,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>, version: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            version: version.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// `<root>/unicode-<version>`
    pub fn version_dir(&self) -> PathBuf {
        self.root.join(format!("unicode-{}", self.version))
    }

    pub fn table_dir(&self, table: TableType) -> PathBuf {
        self.version_dir().join(table.as_str())
    }

    pub fn category_dir(&self, table: TableType, category: &str) -> PathBuf {
        self.table_dir(table).join(category)
    }
}
