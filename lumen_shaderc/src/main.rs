use clap::{App, Arg};
use log::{error, info, warn, LevelFilter};
use lumen_gl::prelude::*;
use shaderc::{CompileOptions, Compiler, Error, ShaderKind, TargetEnv};
use std::{fs, path::Path, process};

fn shader_kind(stage: ShaderStage) -> ShaderKind {
    match stage {
        ShaderStage::Vertex => ShaderKind::Vertex,
        ShaderStage::Fragment => ShaderKind::Fragment,
    }
}

fn report(file_name: &str, err: Error) {
    match err {
        Error::CompilationError(num, error) => {
            error!("{}: compilation failed with {} errors:\n{}", file_name, num, error)
        }
        Error::InternalError(error) => error!("{}: internal error:\n{}", file_name, error),
        Error::InvalidStage(error) => error!("{}: invalid stage:\n{}", file_name, error),
        Error::InvalidAssembly(error) => error!("{}: invalid assembly:\n{}", file_name, error),
        Error::NullResultObject(error) => {
            error!("{}: null result object:\n{}", file_name, error)
        }
    }
}

fn main() {
    let matches = App::new("lumen shader validator")
        .arg(
            Arg::with_name("input")
                .short("i")
                .value_name("PATH")
                .required(true)
                .help("Source code directory (Required)"),
        )
        .arg(
            Arg::with_name("output")
                .short("o")
                .value_name("PATH")
                .help("Write preprocessed sources to this directory"),
        )
        .arg(
            Arg::with_name("no-color")
                .long("no-color")
                .short("c")
                .help("Don't color the console log"),
        )
        .get_matches();

    Logger::init(!matches.is_present("no-color"), LevelFilter::Info).unwrap_or_log("Logger");

    let input = matches.value_of("input").unwrap_or_default();
    let output = matches.value_of("output");

    if let Some(output) = output {
        fs::create_dir_all(output).unwrap_or_log("Output directory");
    }

    let mut compiler = Compiler::new()
        .ok_or("shaderc is unavailable")
        .unwrap_or_log("Compiler");
    let mut comp_options = CompileOptions::new()
        .ok_or("no compile options")
        .unwrap_or_log("Compiler");
    comp_options.set_target_env(TargetEnv::OpenGLCompat, 0);

    let mut failed = 0;
    for file in fs::read_dir(input)
        .unwrap_or_log("Input directory")
        .filter_map(|file| file.ok())
    {
        if file.file_type().map(|ty| ty.is_dir()).unwrap_or(true) {
            continue;
        }

        let path = file.path();
        let stage = match ShaderStage::from_path(&path) {
            Some(stage) => stage,
            None => continue,
        };
        let file_name = file.file_name().to_string_lossy().into_owned();

        let source_text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                error!("{}: {}", file_name, err);
                failed += 1;
                continue;
            }
        };

        info!("Validating {} ({})", file_name, stage);

        let result = compiler.compile_into_spirv(
            &source_text,
            shader_kind(stage),
            &file_name,
            "main",
            Some(&comp_options),
        );

        match result {
            Ok(result) => {
                let num_warnings = result.get_num_warnings();
                if num_warnings == 0 {
                    info!("{}: ok", file_name);
                } else {
                    warn!(
                        "{}: ok with {} warnings:\n{}",
                        file_name,
                        num_warnings,
                        result.get_warning_messages(),
                    );
                }
            }
            Err(err) => {
                report(&file_name, err);
                failed += 1;
                continue;
            }
        }

        if let Some(output) = output {
            match compiler.preprocess(&source_text, &file_name, "main", Some(&comp_options)) {
                Ok(preprocessed) => {
                    fs::write(Path::new(output).join(&file_name), preprocessed.as_text())
                        .unwrap_or_log("Write preprocessed source");
                }
                Err(err) => report(&file_name, err),
            }
        }
    }

    if failed > 0 {
        error!("{} shader(s) failed validation", failed);
        process::exit(1);
    }
}
