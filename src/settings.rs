use std::env;
use std::path::{Path, PathBuf};
use crate::error::{Error, Result};
use crate::script::SCRIPT_FILE_NAME;
use crate::template::RenderContext;

/// Site label reported to the dashboard unless overridden.
pub const DEFAULT_HOST_NAME: &str = "bryan laptop";




/**
 * Install locations of the compilers and libraries the code under test is
 * built against. They are handed to CTest through the environment.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct CompilerPaths {
    pub fortran: String,
    pub mpi_dir: PathBuf,
    pub hdf5_dir: PathBuf,
    pub phdf5_dir: PathBuf,
    pub petsc_dir: PathBuf,
}

impl Default for CompilerPaths {
    fn default() -> Self {
        Self {
            fortran: "gfortran".to_string(),
            mpi_dir: "/opt/mpich/3.0.4-gnu".into(),
            hdf5_dir: "/opt/hdf5/1.8.12-gnu".into(),
            phdf5_dir: "/opt/phdf5/1.8.12-gnu".into(),
            petsc_dir: "/opt/petsc/3.4.3-gnu".into(),
        }
    }
}




/**
 * Values fixed for the whole nightly run.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub source_dir: PathBuf,
    pub build_dir: PathBuf,
    pub host_name: String,
    pub script_path: PathBuf,
    pub run_ctest: bool,
    pub compilers: CompilerPaths,
}




// ============================================================================
impl Settings {

    /**
     * Settings for a run started from the given directory: sources are
     * expected in `../src` and the build goes to `build`, both relative to
     * it. The script is written to the process working directory.
     */
    pub fn from_working_dir(pwd: &Path) -> Self {
        Self {
            source_dir: pwd.join("../src"),
            build_dir: pwd.join("build"),
            host_name: DEFAULT_HOST_NAME.to_string(),
            script_path: SCRIPT_FILE_NAME.into(),
            run_ctest: false,
            compilers: CompilerPaths::default(),
        }
    }

    /**
     * A render context seeded with the run-wide placeholders. The per
     * configuration ones are filled in by the driver.
     */
    pub fn render_context(&self) -> RenderContext {
        RenderContext::new()
            .with("source_dir", self.source_dir.to_string_lossy())
            .with("build_dir", self.build_dir.to_string_lossy())
            .with("host_name", self.host_name.as_str())
    }
}




/**
 * The directory the run was started from: `PWD` as set by the shell, or the
 * process working directory if that is not set.
 */
pub fn working_dir() -> Result<PathBuf> {
    match env::var_os("PWD") {
        Some(pwd) if !pwd.is_empty() => Ok(PathBuf::from(pwd)),
        _ => env::current_dir().map_err(|e| Error::io("reading the working directory", e)),
    }
}
