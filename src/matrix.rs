use std::fs;
use std::path::Path;
use serde::Deserialize;
use crate::configuration::{Configuration, Flags};
use crate::error::{Error, Result};
use crate::registry::Registry;




#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixFile {
    #[serde(default)]
    configuration: Vec<MatrixEntry>,
}




#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct MatrixEntry {
    name: String,
    #[serde(default)]
    debug: bool,
    #[serde(default)]
    optimize: bool,
    #[serde(default)]
    mpi: bool,
    #[serde(default)]
    openmp: bool,
    #[serde(default)]
    hdf5: bool,
    #[serde(default)]
    petsc: bool,
    #[serde(default)]
    valgrind: bool,
}




// ============================================================================
impl From<MatrixEntry> for Configuration {
    fn from(entry: MatrixEntry) -> Self {
        let flags = Flags {
            debug: entry.debug,
            optimize: entry.optimize,
            mpi: entry.mpi,
            openmp: entry.openmp,
            hdf5: entry.hdf5,
            petsc: entry.petsc,
            valgrind: entry.valgrind,
        };
        Configuration::new(entry.name, flags)
    }
}




/**
 * Parse a TOML test matrix. Each `[[configuration]]` table names a
 * configuration and sets any of its flags; unset flags are off. Entries are
 * registered in file order, so a repeated name replaces the earlier one.
 */
pub fn parse(text: &str, path: &Path) -> Result<Registry> {
    let file: MatrixFile = toml::from_str(text).map_err(|e| Error::Matrix {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(file
        .configuration
        .into_iter()
        .map(Configuration::from)
        .collect())
}

pub fn load(path: &Path) -> Result<Registry> {
    let text = fs::read_to_string(path).map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    parse(&text, path)
}
