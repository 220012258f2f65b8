use log::info;
use crate::error::Result;
use crate::registry::Registry;
use crate::script::ScriptEmitter;
use crate::settings::Settings;
use crate::template;
use crate::toolchain::{environment, Toolchain};




/**
 * What happened to one configuration during a run.
 */
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub build_name: String,
    pub build_opts: String,
    /// Exit code of `ctest`, when it was run and exited normally.
    pub ctest_exit: Option<i32>,
}




/**
 * Run the nightly matrix. For each configuration, in registration order, the
 * build directory is reset, the dashboard script is written, `ctest` is run
 * on it if enabled, and the build directory is reset again. The first error
 * aborts the run; configurations already processed are not revisited.
 */
pub fn run(settings: &Settings, registry: &Registry, toolchain: &dyn Toolchain) -> Result<Vec<Outcome>> {
    let template = template::ctest_script()?;
    let emitter = ScriptEmitter::new(&settings.script_path);
    let mut context = settings.render_context();
    let mut outcomes = Vec::with_capacity(registry.len());

    info!("{} configuration(s), site '{}'", registry.len(), settings.host_name);

    for configuration in registry.all() {
        toolchain.remove_tree(&settings.build_dir)?;

        context.set("build_name", configuration.build_name());
        context.set("build_opts", configuration.build_opts());

        info!("[{}] options '{}'", configuration.build_name(), configuration.build_opts().trim_end());
        emitter.emit(&template, &context)?;

        let ctest_exit = if settings.run_ctest {
            let env = environment(settings, configuration);
            toolchain.run_ctest(emitter.path(), &env)?
        } else {
            None
        };

        toolchain.remove_tree(&settings.build_dir)?;

        outcomes.push(Outcome {
            build_name: configuration.build_name().to_string(),
            build_opts: configuration.build_opts().to_string(),
            ctest_exit,
        });
    }
    Ok(outcomes)
}




// ============================================================================
#[cfg(test)]
mod test {

    use std::cell::RefCell;
    use std::fs;
    use std::path::{Path, PathBuf};
    use super::run;
    use crate::configuration::Flags;
    use crate::error::{Error, Result};
    use crate::registry::Registry;
    use crate::settings::Settings;
    use crate::toolchain::{Environment, Toolchain};

    #[derive(Debug, PartialEq)]
    enum Call {
        Remove(PathBuf),
        Ctest(String, Environment),
    }

    /**
     * Records the calls made by the driver; `run_ctest` captures the script
     * contents at the moment it is invoked.
     */
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<Call>>,
    }

    impl Toolchain for Recorder {
        fn remove_tree(&self, path: &Path) -> Result<()> {
            self.calls.borrow_mut().push(Call::Remove(path.to_path_buf()));
            Ok(())
        }

        fn run_ctest(&self, script: &Path, env: &Environment) -> Result<Option<i32>> {
            let text = fs::read_to_string(script).unwrap();
            self.calls.borrow_mut().push(Call::Ctest(text, env.clone()));
            Ok(Some(0))
        }
    }

    fn settings_in(dir: &Path) -> Settings {
        let mut settings = Settings::from_working_dir(Path::new("/home/nightly/tests"));
        settings.script_path = dir.join("ctestscript.run");
        settings
    }

    #[test]
    fn basic_debug_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let mut registry = Registry::new();
        registry.add("basic-debug", Flags::none().debug());

        let outcomes = run(&settings, &registry, &Recorder::default()).unwrap();
        let script = fs::read_to_string(&settings.script_path).unwrap();
        let lines: Vec<_> = script.lines().collect();

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].ctest_exit, None);
        assert!(lines.contains(&r#"set (CTEST_BUILD_NAME "basic-debug")"#));
        assert!(lines.contains(&r#"set (CTEST_BUILD_OPTIONS "-Ddebug=ON ")"#));
        assert!(lines.contains(&r#"set (CTEST_SOURCE_DIRECTORY "/home/nightly/tests/../src")"#));
        assert!(lines.contains(&r#"set(CTEST_SITE "bryan laptop")"#));
    }

    #[test]
    fn build_dir_is_reset_around_each_configuration() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let recorder = Recorder::default();
        let mut registry = Registry::new();
        registry.add("a", Flags::none());
        registry.add("b", Flags::none().openmp());

        run(&settings, &registry, &recorder).unwrap();

        let build = PathBuf::from("/home/nightly/tests/build");
        let calls = recorder.calls.into_inner();
        assert_eq!(calls, (0..4).map(|_| Call::Remove(build.clone())).collect::<Vec<_>>());
    }

    #[test]
    fn last_configuration_wins_the_script_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let mut registry = Registry::new();
        registry.add("omp-debug", Flags::none().openmp().debug());
        registry.add("basic-normal", Flags::none());

        let outcomes = run(&settings, &registry, &Recorder::default()).unwrap();
        let script = fs::read_to_string(&settings.script_path).unwrap();

        assert_eq!(outcomes[0].build_opts, "-Ddebug=ON -Dopenmp=ON ");
        assert!(script.contains(r#"set (CTEST_BUILD_NAME "basic-normal")"#));
        assert!(script.contains(r#"set (CTEST_BUILD_OPTIONS "")"#));
        assert!(!script.contains("omp-debug"));
    }

    #[test]
    fn ctest_sees_each_configurations_script() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(dir.path());
        settings.run_ctest = true;
        let recorder = Recorder::default();
        let mut registry = Registry::new();
        registry.add("basic-debug", Flags::none().debug());
        registry.add("petsc-normal", Flags::none().petsc().mpi());

        let outcomes = run(&settings, &registry, &recorder).unwrap();
        let calls = recorder.calls.into_inner();

        assert_eq!(outcomes.iter().map(|o| o.ctest_exit).collect::<Vec<_>>(), vec![Some(0), Some(0)]);
        assert_eq!(calls.len(), 6);
        match &calls[4] {
            Call::Ctest(script, env) => {
                assert!(script.contains(r#"set (CTEST_BUILD_NAME "petsc-normal")"#));
                assert!(script.contains(r#"set (CTEST_BUILD_OPTIONS "-Dpetsc=ON ")"#));
                assert!(env.contains(&("PETSC_DIR".to_string(), "/opt/petsc/3.4.3-gnu".to_string())));
            }
            other => panic!("expected a ctest call, got {:?}", other),
        }
    }

    #[test]
    fn write_failure_aborts_the_run() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = settings_in(dir.path());
        settings.script_path = dir.path().join("missing").join("ctestscript.run");
        let recorder = Recorder::default();
        let mut registry = Registry::new();
        registry.add("a", Flags::none());
        registry.add("b", Flags::none());

        assert!(matches!(run(&settings, &registry, &recorder), Err(Error::Io { .. })));
        assert_eq!(recorder.calls.into_inner().len(), 1);
    }

    #[test]
    fn empty_registry_does_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_in(dir.path());
        let recorder = Recorder::default();

        assert!(run(&settings, &Registry::new(), &recorder).unwrap().is_empty());
        assert!(recorder.calls.into_inner().is_empty());
        assert!(!settings.script_path.exists());
    }
}
