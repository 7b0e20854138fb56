use clap::Parser;
use gbtrace::{
    console::{show_intro, Args, PartialArgs},
    error::{GbtError, GbtResult},
    report::simulation_report,
    scene::SceneDocument,
    simulation::{Simulation, SimulationResult},
};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

fn read_scene(path: &Path) -> GbtResult<Simulation> {
    print!("\nReading scene...");
    let _ = io::stdout().flush();
    let simulation = SceneDocument::from_file(path)?.into_simulation()?;
    println!("Success");
    Ok(simulation)
}

fn create_output_file(path: &Path, f_name: &str, f_ext: &str, print_str: &str) -> GbtResult<File> {
    let mut f_path = path.to_path_buf();
    f_path.push(f_name);
    f_path.set_extension(f_ext);
    print!("Write {print_str} to {}...", f_path.display());
    let _ = io::stdout().flush();

    File::create(f_path)
        .map_err(|e| GbtError::Other(format!("{f_name} file creation failed: {e}")))
}

fn create_report_file(
    output_directory: &Path,
    f_name: &str,
    simulation: &Simulation,
    result: &SimulationResult,
) -> GbtResult<()> {
    let mut output = create_output_file(output_directory, f_name, "out", "report")?;
    write!(output, "{}", simulation_report(simulation, result))
        .map_err(|e| GbtError::Other(format!("writing report file failed: {e}")))?;
    println!("Success");
    Ok(())
}

fn create_json_file(output_directory: &Path, f_name: &str, result: &SimulationResult) -> GbtResult<()> {
    let mut output = create_output_file(output_directory, f_name, "json", "beam trees")?;
    let serialized = serde_json::to_string_pretty(result)
        .map_err(|e| GbtError::Other(format!("serialization of beam trees failed: {e}")))?;
    write!(output, "{serialized}")
        .map_err(|e| GbtError::Other(format!("writing json file failed: {e}")))?;
    println!("Success");
    Ok(())
}

fn main() -> GbtResult<()> {
    //parse CLI arguments
    let args = Args::try_from(PartialArgs::parse())?;
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            LevelFilter::Info
        } else {
            LevelFilter::Warn
        })
        .parse_default_env()
        .init();
    show_intro();

    //read scene from file and build the simulation
    let simulation = read_scene(&args.file_path)?;

    //trace all input beams
    let result = simulation.run()?;

    //write output files
    let f_name = args
        .file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("gbtrace");
    create_report_file(&args.output_directory, f_name, &simulation, &result)?;
    if args.json {
        create_json_file(&args.output_directory, f_name, &result)?;
    }
    Ok(())
}
