//! Rewrites package imports of the staged sources into relative imports.
//!
//! solc is invoked without remappings, so `import "@openzeppelin/..."` only resolves once it
//! points at the package copied next to the contracts: `import "./@openzeppelin/..."`.

use crate::SOURCE_EXTENSION;
use eyre::Result;
use std::{
    borrow::Cow,
    path::{Path, PathBuf},
};
use wrap3_common::fs;

/// The import prefix that is rewritten.
pub const PACKAGE_IMPORT: &str = r#"import "@openzeppelin"#;

/// What [`PACKAGE_IMPORT`] is rewritten to.
pub const RELATIVE_IMPORT: &str = r#"import "./@openzeppelin"#;

/// Outcome of [`rewrite_imports`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Number of source files read.
    pub scanned: usize,
    /// Number of source files that contained a package import and were written back.
    pub rewritten: usize,
}

/// Replaces every occurrence of [`PACKAGE_IMPORT`] in `source`.
///
/// This is a plain substring replacement, occurrences inside comments or strings are rewritten
/// as well. Applying it twice yields the same result as applying it once.
pub fn rewrite_source(source: &str) -> Cow<'_, str> {
    if source.contains(PACKAGE_IMPORT) {
        Cow::Owned(source.replace(PACKAGE_IMPORT, RELATIVE_IMPORT))
    } else {
        Cow::Borrowed(source)
    }
}

/// Returns every file below `dir`, at any depth, with `.sol` in its name.
pub fn contract_files(dir: &Path) -> Result<Vec<PathBuf>> {
    Ok(fs::files_with_name_containing(dir, SOURCE_EXTENSION)?)
}

/// Rewrites the imports of a single file in place.
///
/// Returns `true` if the file changed.
pub fn rewrite_file(path: &Path) -> Result<bool> {
    let source = fs::read_to_string(path)?;
    match rewrite_source(&source) {
        Cow::Owned(rewritten) => {
            fs::write(path, rewritten)?;
            trace!(?path, "rewrote imports");
            Ok(true)
        }
        Cow::Borrowed(_) => Ok(false),
    }
}

/// Rewrites the imports of all contract files below `dir`.
pub fn rewrite_imports(dir: &Path) -> Result<RewriteSummary> {
    let mut summary = RewriteSummary::default();
    for file in contract_files(dir)? {
        summary.scanned += 1;
        if rewrite_file(&file)? {
            summary.rewritten += 1;
        }
    }
    debug!(?dir, ?summary, "rewrote package imports");
    Ok(summary)
}
