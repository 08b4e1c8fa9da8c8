use clap::{App, Arg};
use log::{error, info, LevelFilter};
use lumen_gl::prelude::*;
use std::process;

/// Waits for every program and logs its outcome. Returns how many failed.
fn report(programs: &[ProgramEntry], resources: &Resources) -> usize {
    let mut failed = 0;
    for entry in programs {
        match resources.wait(&entry.name).as_deref() {
            Some(ResourceState::Loaded(source)) => info!(
                "{}: {} bytes vertex, {} bytes fragment",
                entry.name,
                source.vert.len(),
                source.frag.len()
            ),
            Some(ResourceState::Failed(reason)) => {
                error!("{}: {}", entry.name, reason);
                failed += 1;
            }
            Some(ResourceState::Loading) | None => {
                error!("{}: sources were never read", entry.name);
                failed += 1;
            }
        }
    }

    failed
}

fn main() {
    let clap = App::new("lumen")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Loads a shader program manifest and reads every program's sources")
        .arg(
            Arg::with_name("manifest")
                .value_name("MANIFEST")
                .required(true)
                .help("Program manifest (YAML)"),
        )
        .arg(Arg::with_name("dev").long("dev").help("Development mode"))
        .arg(
            Arg::with_name("no-color")
                .long("no-color")
                .short("c")
                .help("Don't color the console log"),
        )
        .get_matches();

    let level = if clap.is_present("dev") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    Logger::init(!clap.is_present("no-color"), level).unwrap_or_log("Logger");

    let manifest = clap.value_of("manifest").unwrap_or_default();
    let config = Config::new(manifest, MANIFEST_TEMPLATE).unwrap_or_log("Config");
    let resources = Resources::new().unwrap_or_log("Thread pool");

    for entry in config.programs() {
        resources.add_program(entry);
    }

    let failed = report(config.programs(), &resources);

    info!(
        "{} of {} programs ready",
        config.programs().len() - failed,
        config.programs().len()
    );

    if failed > 0 {
        process::exit(1);
    }
}
