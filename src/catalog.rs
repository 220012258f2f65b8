use crate::configuration::{Configuration, Flags};
use crate::registry::Registry;

/// The one configuration the nightly run builds unless told otherwise.
pub const DEFAULT_ENABLED: &str = "basic-debug";




/**
 * A named configuration in the nightly catalog, and whether it runs by
 * default.
 */
#[derive(Clone, Debug)]
pub struct Entry {
    pub name: String,
    pub flags: Flags,
    pub enabled: bool,
}




/**
 * The full nightly matrix. Each family is built with default compiler
 * settings ("normal"), in debug mode, and optimized.
 */
pub fn nightly() -> Vec<Entry> {
    let families: [(&str, Flags); 11] = [
        ("basic", Flags::none()),
        ("omp", Flags::none().openmp()),
        ("hdf5", Flags::none().hdf5()),
        ("omp-hdf5", Flags::none().openmp().hdf5()),
        ("mpi", Flags::none().mpi()),
        ("mpi-omp", Flags::none().mpi().openmp()),
        ("phdf5", Flags::none().mpi().hdf5()),
        ("phdf5-omp", Flags::none().mpi().hdf5().openmp()),
        ("petsc", Flags::none().petsc().mpi()),
        ("phdf5-petsc", Flags::none().mpi().hdf5().petsc()),
        ("omp-phdf5-petsc", Flags::none().openmp().mpi().hdf5().petsc()),
    ];
    let variants: [(&str, fn(Flags) -> Flags); 3] = [
        ("normal", |f| f),
        ("debug", Flags::debug),
        ("optimize", Flags::optimize),
    ];
    let mut entries = Vec::with_capacity(families.len() * variants.len());

    for (family, flags) in families.iter() {
        for (variant, apply) in variants.iter() {
            let name = format!("{}-{}", family, variant);
            entries.push(Entry {
                enabled: name == DEFAULT_ENABLED,
                flags: apply(*flags),
                name,
            });
        }
    }
    entries
}

/**
 * Build a registry from the catalog: every entry when `all` is set,
 * otherwise only the enabled ones.
 */
pub fn registry(all: bool) -> Registry {
    nightly()
        .into_iter()
        .filter(|entry| all || entry.enabled)
        .map(|entry| Configuration::new(entry.name, entry.flags))
        .collect()
}
