//! Nightly-matrix drives the nightly regression run of a separately built
//! Fortran transport code. It walks an ordered list of build configurations
//! (debug, optimized, OpenMP, MPI, HDF5, PETSc and their combinations), and
//! for each one writes a CTest dashboard script that configures, builds,
//! tests and submits that variant. The build tree is wiped before and after
//! every configuration so no state leaks from one variant to the next.

pub mod catalog;
pub mod configuration;
pub mod driver;
pub mod error;
pub mod matrix;
pub mod registry;
pub mod script;
pub mod settings;
pub mod template;
pub mod toolchain;

pub use error::{Error, Result};
