use std::cell::OnceCell;




/**
 * The build and runtime switches describing one variant of the code under
 * test. Only some of them reach the configure step; see `build_opts`.
 */
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Flags {
    pub debug: bool,
    pub optimize: bool,
    pub mpi: bool,
    pub openmp: bool,
    pub hdf5: bool,
    pub petsc: bool,
    pub valgrind: bool,
}




// ============================================================================
impl Flags {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn debug(self) -> Self {
        Self { debug: true, ..self }
    }

    pub fn optimize(self) -> Self {
        Self { optimize: true, ..self }
    }

    pub fn mpi(self) -> Self {
        Self { mpi: true, ..self }
    }

    pub fn openmp(self) -> Self {
        Self { openmp: true, ..self }
    }

    pub fn hdf5(self) -> Self {
        Self { hdf5: true, ..self }
    }

    pub fn petsc(self) -> Self {
        Self { petsc: true, ..self }
    }

    pub fn valgrind(self) -> Self {
        Self { valgrind: true, ..self }
    }
}




/**
 * Render the CMake option string for a set of flags. Each enabled option is
 * followed by a single space, in the order debug, optimize, openmp, petsc.
 * The mpi, hdf5 and valgrind switches have no CMake option and contribute
 * nothing.
 */
pub fn build_opts(flags: &Flags) -> String {
    let options = [
        (flags.debug, "-Ddebug=ON"),
        (flags.optimize, "-Doptimize=ON"),
        (flags.openmp, "-Dopenmp=ON"),
        (flags.petsc, "-Dpetsc=ON"),
    ];
    let mut result = String::new();

    for (enabled, token) in options.iter() {
        if *enabled {
            result.push_str(token);
            result.push(' ');
        }
    }
    result
}




/**
 * A named build configuration. The record is immutable; its build name and
 * option string are derived on first use and kept.
 */
#[derive(Clone, Debug)]
pub struct Configuration {
    name: String,
    flags: Flags,
    build_name: OnceCell<String>,
    build_opts: OnceCell<String>,
}




// ============================================================================
impl Configuration {

    pub fn new(name: impl Into<String>, flags: Flags) -> Self {
        Self {
            name: name.into(),
            flags,
            build_name: OnceCell::new(),
            build_opts: OnceCell::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> &Flags {
        &self.flags
    }

    /**
     * The name reported to the dashboard. This is currently the registered
     * name, unchanged.
     */
    pub fn build_name(&self) -> &str {
        self.build_name.get_or_init(|| self.name.clone())
    }

    pub fn build_opts(&self) -> &str {
        self.build_opts.get_or_init(|| build_opts(&self.flags))
    }
}
