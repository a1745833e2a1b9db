//! Command-line argument parser using clap

use clap::{Parser as ClapParser, Subcommand};

#[derive(ClapParser, Debug)]
#[command(name = "html2pptx")]
#[command(about = "Convert rendered HTML slides into editable PowerPoint (.pptx) decks")]
#[command(
    long_about = "html2pptx - renders HTML slide pages in a headless browser and emits
an editable PPTX slide for each one, with faithful absolute positioning.

Examples:
  # Convert a single HTML slide to a single-slide PPTX
  html2pptx convert slide.html output.pptx

  # Build a deck from many HTML slides, in the given order
  html2pptx build deck.pptx slide1.html slide2.html slide3.html"
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert a single HTML slide file into a single-slide PPTX
    #[command(
        long_about = "Render one HTML file in a headless browser and emit a single-slide
PowerPoint file with absolute positioning matching the page's layout.

Example:
  html2pptx convert slide.html output.pptx"
    )]
    Convert {
        /// Input HTML slide file
        #[arg(value_name = "HTML", help = "Path to the rendered HTML slide file")]
        input: String,

        /// Output PPTX file
        #[arg(value_name = "OUTPUT", help = "Path to the output PPTX file")]
        output: String,

        /// Presentation title stored in docProps metadata
        #[arg(long, help = "Title stored in the PPTX's core properties")]
        title: Option<String>,

        /// Directory to write captured raster PNGs into
        #[arg(long, value_name = "DIR", help = "Directory for captured raster PNGs (default: OS temp dir)")]
        tmp_dir: Option<String>,
    },

    /// Build a PPTX deck from many HTML slide files, in document order
    #[command(
        long_about = "Render each HTML file in turn against a shared headless browser
context and append one slide per file, in the order given, into a single
PowerPoint deck.

Example:
  html2pptx build deck.pptx slide1.html slide2.html slide3.html"
    )]
    Build {
        /// Output PPTX file
        #[arg(value_name = "OUTPUT", help = "Path to the output PPTX file")]
        output: String,

        /// Input HTML slide files, in the order they should appear
        #[arg(value_name = "HTML", required = true, num_args = 1.., help = "Rendered HTML slide files, in slide order")]
        inputs: Vec<String>,

        /// Presentation title stored in docProps metadata
        #[arg(long, help = "Title stored in the PPTX's core properties")]
        title: Option<String>,

        /// Directory to write captured raster PNGs into
        #[arg(long, value_name = "DIR", help = "Directory for captured raster PNGs (default: OS temp dir)")]
        tmp_dir: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_convert() {
        let args = vec!["html2pptx", "convert", "slide.html", "out.pptx", "--title", "My Slide"];
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Convert { input, output, title, .. } => {
                assert_eq!(input, "slide.html");
                assert_eq!(output, "out.pptx");
                assert_eq!(title, Some("My Slide".to_string()));
            }
            _ => panic!("expected Convert command"),
        }
    }

    #[test]
    fn test_parse_build_with_multiple_inputs() {
        let args = vec!["html2pptx", "build", "deck.pptx", "a.html", "b.html", "c.html"];
        let cli = Cli::parse_from(args);
        match cli.command {
            Commands::Build { output, inputs, .. } => {
                assert_eq!(output, "deck.pptx");
                assert_eq!(inputs, vec!["a.html", "b.html", "c.html"]);
            }
            _ => panic!("expected Build command"),
        }
    }
}
