//! The external programs a nightly run hands work to: `rm` for resetting the
//! build tree and `ctest` for running the dashboard script. They are reached
//! through the `Toolchain` trait so the driver can be exercised without them.

use std::path::Path;
use std::process::{Command, ExitStatus};
use log::{info, warn};
use crate::configuration::Configuration;
use crate::error::{Error, Result};
use crate::settings::Settings;

/// Environment variables handed to one CTest invocation, in a fixed order.
pub type Environment = Vec<(String, String)>;




/// Interface to the programs the nightly driver runs.
///
pub trait Toolchain {
    /// Must be implemented to remove the directory tree at `path` if it
    /// exists. Succeeds whether or not the path was there to begin with.
    fn remove_tree(&self, path: &Path) -> Result<()>;

    /// Must be implemented to run the dashboard script at `script` with the
    /// extra environment `env`. Returns the exit code, if there was one; a
    /// failing test run is not an error here.
    fn run_ctest(&self, script: &Path, env: &Environment) -> Result<Option<i32>>;
}




/**
 * Runs the real programs found on `PATH`. The CTest executable can be
 * swapped, e.g. for a specific CMake install.
 */
#[derive(Clone, Debug)]
pub struct SystemToolchain {
    ctest: String,
}




// ============================================================================
impl SystemToolchain {

    pub fn new() -> Self {
        Self::with_ctest("ctest")
    }

    pub fn with_ctest(program: impl Into<String>) -> Self {
        Self { ctest: program.into() }
    }

    fn status(program: &str, command: &mut Command) -> Result<ExitStatus> {
        command.status().map_err(|source| Error::Spawn {
            program: program.to_string(),
            source,
        })
    }
}

impl Default for SystemToolchain {
    fn default() -> Self {
        Self::new()
    }
}

impl Toolchain for SystemToolchain {

    fn remove_tree(&self, path: &Path) -> Result<()> {
        let status = Self::status("rm", Command::new("rm").arg("-rf").arg(path))?;

        if !status.success() {
            warn!("rm -rf {} exited with {}", path.display(), status);
        }
        Ok(())
    }

    fn run_ctest(&self, script: &Path, env: &Environment) -> Result<Option<i32>> {
        let mut command = Command::new(&self.ctest);
        command.arg("-S").arg(script);

        for (key, value) in env {
            command.env(key, value);
        }
        info!("{} -S {}", self.ctest, script.display());
        let status = Self::status(&self.ctest, &mut command)?;

        if !status.success() {
            warn!("{} exited with {}", self.ctest, status);
        }
        Ok(status.code())
    }
}




/**
 * The compiler environment for one configuration. MPI builds use the MPI
 * Fortran wrapper; HDF5 builds point at the parallel HDF5 install when MPI
 * is on and the serial one otherwise; PETSc builds get `PETSC_DIR`.
 */
pub fn environment(settings: &Settings, configuration: &Configuration) -> Environment {
    let compilers = &settings.compilers;
    let flags = configuration.flags();
    let mut env = Vec::new();

    let fc = if flags.mpi {
        compilers.mpi_dir.join("bin").join("mpif90").to_string_lossy().into_owned()
    } else {
        compilers.fortran.clone()
    };
    env.push(("FC".to_string(), fc));

    if flags.hdf5 {
        let root = if flags.mpi { &compilers.phdf5_dir } else { &compilers.hdf5_dir };
        env.push(("HDF5_ROOT".to_string(), root.to_string_lossy().into_owned()));
    }
    if flags.petsc {
        env.push(("PETSC_DIR".to_string(), compilers.petsc_dir.to_string_lossy().into_owned()));
    }
    env
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::path::Path;
    use super::{environment, SystemToolchain, Toolchain};
    use crate::configuration::{Configuration, Flags};
    use crate::error::Error;
    use crate::settings::Settings;

    fn settings() -> Settings {
        Settings::from_working_dir(Path::new("/work/tests"))
    }

    #[test]
    fn serial_build_uses_default_fortran() {
        let env = environment(&settings(), &Configuration::new("basic-debug", Flags::none().debug()));
        assert_eq!(env, vec![("FC".to_string(), "gfortran".to_string())]);
    }

    #[test]
    fn parallel_hdf5_petsc_build() {
        let flags = Flags::none().mpi().hdf5().petsc();
        let env = environment(&settings(), &Configuration::new("phdf5-petsc-normal", flags));
        assert_eq!(
            env,
            vec![
                ("FC".to_string(), "/opt/mpich/3.0.4-gnu/bin/mpif90".to_string()),
                ("HDF5_ROOT".to_string(), "/opt/phdf5/1.8.12-gnu".to_string()),
                ("PETSC_DIR".to_string(), "/opt/petsc/3.4.3-gnu".to_string()),
            ]
        );
    }

    #[test]
    fn serial_hdf5_build() {
        let env = environment(&settings(), &Configuration::new("hdf5-normal", Flags::none().hdf5()));
        assert_eq!(env[1], ("HDF5_ROOT".to_string(), "/opt/hdf5/1.8.12-gnu".to_string()));
    }

    #[cfg(unix)]
    #[test]
    fn remove_tree_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let build = dir.path().join("build");
        std::fs::create_dir_all(build.join("CMakeFiles")).unwrap();
        std::fs::write(build.join("CMakeFiles").join("x"), b"x").unwrap();

        let toolchain = SystemToolchain::new();
        toolchain.remove_tree(&build).unwrap();
        assert!(!build.exists());
        toolchain.remove_tree(&build).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn failed_rm_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();

        // rm refuses to remove `.` and exits nonzero
        assert!(SystemToolchain::new().remove_tree(&dir.path().join(".")).is_ok());
        assert!(dir.path().exists());
    }

    #[cfg(unix)]
    #[test]
    fn failing_ctest_reports_its_exit_code() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("ctestscript.run");
        std::fs::write(&script, "ctest_start(\"Nightly\")").unwrap();

        let env = vec![("FC".to_string(), "gfortran".to_string())];
        assert_eq!(SystemToolchain::with_ctest("false").run_ctest(&script, &env).unwrap(), Some(1));
        assert_eq!(SystemToolchain::with_ctest("true").run_ctest(&script, &env).unwrap(), Some(0));
    }

    #[test]
    fn missing_ctest_is_a_spawn_error() {
        let toolchain = SystemToolchain::with_ctest("no-such-ctest-executable");
        match toolchain.run_ctest(std::path::Path::new("ctestscript.run"), &Vec::new()) {
            Err(Error::Spawn { program, .. }) => assert_eq!(program, "no-such-ctest-executable"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
