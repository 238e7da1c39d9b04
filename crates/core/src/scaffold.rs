//! Migration file scaffolding
//!
//! Creates the empty `<version>_<name>.up.sql` / `<version>_<name>.down.sql`
//! pair that the migration engine picks up. Existing files are never
//! reopened or truncated: scaffolding onto an existing path is an error.

use chrono::Utc;
use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// The two halves of one freshly created migration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationPair {
    /// Unix timestamp shared by both files
    pub version: i64,
    /// Normalized migration name
    pub name: String,
    pub up: PathBuf,
    pub down: PathBuf,
}

impl MigrationPair {
    fn new(dir: &Path, version: i64, name: String) -> Self {
        let up = dir.join(format!("{}_{}.up.sql", version, name));
        let down = dir.join(format!("{}_{}.down.sql", version, name));
        Self {
            version,
            name,
            up,
            down,
        }
    }
}

/// Replace every space with an underscore.
pub fn normalize_name(raw_name: &str) -> CoreResult<String> {
    if raw_name.trim().is_empty() {
        return Err(CoreError::InvalidName {
            name: raw_name.to_string(),
            reason: "name cannot be empty".to_string(),
        });
    }

    if raw_name.contains(['/', '\\']) {
        return Err(CoreError::InvalidName {
            name: raw_name.to_string(),
            reason: "name cannot contain path separators".to_string(),
        });
    }

    Ok(raw_name.replace(' ', "_"))
}

/// Create an empty migration pair in `dir`, versioned with the current time.
pub fn scaffold(dir: impl AsRef<Path>, raw_name: &str) -> CoreResult<MigrationPair> {
    scaffold_at(dir, raw_name, Utc::now().timestamp())
}

/// Create an empty migration pair in `dir` with an explicit version.
///
/// The `up` file is created first. If the `down` file then fails, the `up`
/// file is left in place and reported through [`CoreError::PartialScaffold`].
pub fn scaffold_at(dir: impl AsRef<Path>, raw_name: &str, version: i64) -> CoreResult<MigrationPair> {
    let name = normalize_name(raw_name)?;
    let pair = MigrationPair::new(dir.as_ref(), version, name);

    create_empty(&pair.up).map_err(|source| CoreError::Scaffold {
        path: pair.up.clone(),
        source,
    })?;

    if let Err(source) = create_empty(&pair.down) {
        return Err(CoreError::PartialScaffold {
            created: pair.up.clone(),
            path: pair.down.clone(),
            source,
        });
    }

    Ok(pair)
}

fn create_empty(path: &Path) -> io::Result<()> {
    OpenOptions::new().write(true).create_new(true).open(path)?;
    debug!(path = %path.display(), "created migration file");
    Ok(())
}
