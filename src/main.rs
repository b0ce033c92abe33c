//! Main application entry point for AgriLog
//!
//! This module handles startup: logging, command-line options, and the GUI
//! application lifecycle.

use eframe::egui;

use agrilog::app_state::AgriLogApp;
use agrilog::config;

fn main() {
    // Install panic handler to log panics before crashing
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Program panicked: {panic_info}");
        if let Some(location) = panic_info.location() {
            eprintln!(
                "Panic occurred in file '{}' at line {}",
                location.file(),
                location.line()
            );
        }
    }));

    env_logger::init();

    let mut app_config = config::load();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--data-dir" | "-d" => {
                if i + 1 < args.len() {
                    app_config.data_dir = Some(std::path::PathBuf::from(&args[i + 1]));
                    i += 1; // consume value
                } else {
                    eprintln!("Error: --data-dir requires a value");
                    std::process::exit(1);
                }
            }
            "--technician" | "-t" => {
                if i + 1 < args.len() {
                    app_config.default_technician = args[i + 1].clone();
                    i += 1; // consume value
                } else {
                    eprintln!("Error: --technician requires a value");
                    std::process::exit(1);
                }
            }
            "--help" | "-h" => {
                println!("AgriLog - Plot Record Data Entry");
                println!();
                println!("Usage: agrilog [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --data-dir, -d <PATH>    Directory for daily CSV record files");
                println!("  --technician, -t <NAME>  Default technician name");
                println!("  --help, -h               Show this help");
                println!();
                println!("Example:");
                println!("  agrilog --data-dir /srv/records --technician \"J. Simms\"");
                std::process::exit(0);
            }
            _ => { /* ignore unknown */ }
        }
        i += 1;
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([780.0, 680.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AgriLog Data Entry",
        options,
        Box::new(move |cc| Ok(Box::new(AgriLogApp::new(cc, app_config)))),
    )
    .expect("Failed to run AgriLog application");
}
