use std::path::PathBuf;
use std::process;
use clap::Parser;
use log::{error, info, LevelFilter};
use simple_logger::SimpleLogger;
use nightly_matrix::registry::Registry;
use nightly_matrix::settings::{self, Settings};
use nightly_matrix::toolchain::SystemToolchain;
use nightly_matrix::{catalog, driver, matrix, Result};

#[derive(Debug, Parser)]
#[clap(version, about = "Write and run the nightly CTest matrix")]
struct Opts {
    /// Site name reported to the dashboard
    #[clap(long, default_value = settings::DEFAULT_HOST_NAME)]
    host_name: String,

    /// Source tree of the code under test [default: $PWD/../src]
    #[clap(long)]
    source_dir: Option<PathBuf>,

    /// Build tree, wiped before and after each configuration [default: $PWD/build]
    #[clap(long)]
    build_dir: Option<PathBuf>,

    /// Where to write the dashboard script
    #[clap(long, default_value = nightly_matrix::script::SCRIPT_FILE_NAME)]
    script: PathBuf,

    /// Read configurations from a TOML matrix file instead of the built-in catalog
    #[clap(short = 'm', long)]
    matrix: Option<PathBuf>,

    /// Run every catalog configuration, not only the enabled ones
    #[clap(short = 'a', long)]
    all: bool,

    /// Run only the named configuration(s)
    #[clap(short = 'o', long = "only")]
    only: Vec<String>,

    /// Hand each script to `ctest -S`
    #[clap(long)]
    ctest: bool,

    /// Print the selected configurations and exit
    #[clap(short = 'l', long)]
    list: bool,

    #[clap(short = 'v', long)]
    verbose: bool,
}




// ============================================================================
impl Opts {

    fn registry(&self) -> Result<Registry> {
        let mut registry = match &self.matrix {
            Some(path) => matrix::load(path)?,
            None => catalog::registry(self.all || !self.only.is_empty()),
        };
        if !self.only.is_empty() {
            registry.retain_names(&self.only[..])?;
        }
        Ok(registry)
    }

    fn settings(&self) -> Result<Settings> {
        let mut settings = Settings::from_working_dir(&settings::working_dir()?);

        if let Some(dir) = &self.source_dir {
            settings.source_dir = dir.clone();
        }
        if let Some(dir) = &self.build_dir {
            settings.build_dir = dir.clone();
        }
        settings.host_name = self.host_name.clone();
        settings.script_path = self.script.clone();
        settings.run_ctest = self.ctest;
        Ok(settings)
    }
}




// ============================================================================
fn run(opts: &Opts) -> Result<()> {
    let registry = opts.registry()?;

    if opts.list {
        for configuration in registry.all() {
            println!("{:<28} {}", configuration.name(), configuration.build_opts());
        }
        return Ok(());
    }

    let settings = opts.settings()?;
    let outcomes = driver::run(&settings, &registry, &SystemToolchain::new())?;
    let failed = outcomes.iter().filter(|o| matches!(o.ctest_exit, Some(code) if code != 0)).count();

    info!("finished {} configuration(s), {} with ctest failures", outcomes.len(), failed);
    Ok(())
}

fn main() {
    let opts = Opts::parse();
    let level = if opts.verbose { LevelFilter::Debug } else { LevelFilter::Info };

    if let Err(e) = SimpleLogger::new().with_level(level).init() {
        eprintln!("{}", e);
    }
    if let Err(e) = run(&opts) {
        error!("{}", e);
        process::exit(1);
    }
}
