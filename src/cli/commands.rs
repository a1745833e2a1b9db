//! Command execution: turns a parsed [`crate::cli::parser::Commands`] variant
//! into calls against [`crate::api`], the way the teacher's own command
//! structs wrap a single `execute()` entry point per subcommand.

use crate::api::{self, ConvertOptions};
use crate::exc::Result;
use std::path::PathBuf;

pub struct ConvertCommand {
    pub input: String,
    pub output: String,
    pub title: Option<String>,
    pub tmp_dir: Option<String>,
}

impl ConvertCommand {
    pub fn execute(&self) -> Result<()> {
        let options = options_from(&self.tmp_dir);
        let title = self.title.clone().unwrap_or_else(|| "Untitled".to_string());
        let mut presentation = api::Presentation::new(&title);
        api::convert_html_file(std::path::Path::new(&self.input), &mut presentation, &options)?;
        let bytes = presentation.build()?;
        std::fs::write(&self.output, bytes)?;
        Ok(())
    }
}

pub struct BuildCommand {
    pub output: String,
    pub inputs: Vec<String>,
    pub title: Option<String>,
    pub tmp_dir: Option<String>,
}

impl BuildCommand {
    pub fn execute(&self) -> Result<()> {
        let options = options_from(&self.tmp_dir);
        let title = self.title.clone().unwrap_or_else(|| "Untitled".to_string());
        let bytes = api::build_presentation(&title, &self.inputs, &options)?;
        std::fs::write(&self.output, bytes)?;
        Ok(())
    }
}

fn options_from(tmp_dir: &Option<String>) -> ConvertOptions {
    ConvertOptions {
        tmp_dir: tmp_dir.as_ref().map(PathBuf::from).unwrap_or_else(std::env::temp_dir),
        ..ConvertOptions::default()
    }
}
