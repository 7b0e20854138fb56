//! Handling the gbtrace CLI
//!
//! This module handles the command line parsing as well as basic information (e.g. help dialog, version information, etc.).
use crate::{
    error::{GbtError, GbtResult},
    get_version,
};
use clap::{builder::Str, Parser};
use std::path::{Path, PathBuf};

/// Command line arguments for the gbtrace application.
#[derive(Debug, PartialEq, Eq)]
pub struct Args {
    /// file path of the scene file, which should be read in
    pub file_path: PathBuf,

    /// destination directory of the output files
    pub output_directory: PathBuf,

    /// also write the beam trees as JSON
    pub json: bool,

    /// log informational messages
    pub verbose: bool,
}

#[derive(Parser, Debug)]
#[command(author, version = Str::from(get_version()), about, long_about = None)]
pub struct PartialArgs {
    /// filepath of the scene file (.yaml) to read in
    #[arg(short, long)]
    file_path: String,

    /// destination directory of the output files. if not defined, same directory as the scene file is used
    #[arg(short, long)]
    output_directory: Option<String>,

    /// also write the beam trees as JSON file
    #[arg(long)]
    json: bool,

    /// log informational messages
    #[arg(short, long)]
    verbose: bool,
}

/// Checks if the passed file path is valid.
/// # Attributes
/// * `path`: Path to the file
/// # Returns
/// Returns True if the file path is valid, false otherwise
fn file_path_is_valid(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .is_some_and(|ext| ext == "yaml" || ext == "yml")
}
/// Gets the parent directory of the passed file path
///
/// Returns the current directory for a bare file name.
fn get_parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .map_or_else(|| PathBuf::from("."), PathBuf::from)
}
impl TryFrom<PartialArgs> for Args {
    type Error = GbtError;
    fn try_from(part_args: PartialArgs) -> GbtResult<Self> {
        let file_path = PathBuf::from(&part_args.file_path);
        if !file_path_is_valid(&file_path) {
            return Err(GbtError::Console(format!(
                "invalid scene file path: {}",
                file_path.display()
            )));
        }
        let output_directory = match part_args.output_directory {
            Some(dir) => {
                let dir = PathBuf::from(dir);
                if !dir.is_dir() {
                    return Err(GbtError::Console(format!(
                        "output directory {} does not exist",
                        dir.display()
                    )));
                }
                dir
            }
            None => get_parent_dir(&file_path),
        };
        Ok(Self {
            file_path,
            output_directory,
            json: part_args.json,
            verbose: part_args.verbose,
        })
    }
}
/// Show the CLI version information.
pub fn show_intro() {
    println!(
        "{: ^79}\n{: ^79}\n",
        "gbtrace - Gaussian beam tracing through optical benches",
        "version ".to_owned() + &get_version()
    );
}
