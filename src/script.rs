use std::fs;
use std::path::{Path, PathBuf};
use log::debug;
use crate::error::{Error, Result};
use crate::template::{RenderContext, Template};

/// File name CTest is pointed at; written in the working directory.
pub const SCRIPT_FILE_NAME: &str = "ctestscript.run";




/**
 * Renders a template and writes the result to a fixed path, replacing the
 * previous contents each time.
 */
#[derive(Clone, Debug)]
pub struct ScriptEmitter {
    path: PathBuf,
}




// ============================================================================
impl ScriptEmitter {

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /**
     * Render and write the script. The template is rendered before the file
     * is opened, so a render failure leaves any previous script untouched
     * rather than truncated.
     */
    pub fn emit(&self, template: &Template, context: &RenderContext) -> Result<()> {
        let text = template.render(context)?;

        fs::write(&self.path, text.as_bytes())
            .map_err(|e| Error::io(format!("writing {}", self.path.display()), e))?;
        debug!("wrote {} ({} bytes)", self.path.display(), text.len());
        Ok(())
    }
}

impl Default for ScriptEmitter {
    fn default() -> Self {
        Self::new(SCRIPT_FILE_NAME)
    }
}
