use std::{error::Error, process::ExitCode};

use ride_summary::App;

fn run() -> Result<String, Box<dyn Error>> {
    let app = App::from_current_dir()?;
    let dashboard = app.dashboard(None, None, None)?;

    Ok(serde_json::to_string_pretty(&dashboard)?)
}

fn main() -> ExitCode {
    match run() {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
