use std::process::ExitCode;

use fernboy::RunOptions;

const USAGE: &str = "usage: fernboy <rom> [frames] [dump.rgb]";

fn parse_args(mut args: impl Iterator<Item = String>) -> Option<RunOptions> {
    let mut options = RunOptions::new(args.next()?);
    if let Some(frames) = args.next() {
        options.frames = frames.parse().ok()?;
    }
    options.dump_path = args.next().map(Into::into);
    if args.next().is_some() {
        return None;
    }
    Some(options)
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(options) = parse_args(std::env::args().skip(1)) else {
        eprintln!("{USAGE}");
        return ExitCode::from(2);
    };

    log::info!("Playing ROM path: '{}'", options.rom_path.display());
    match fernboy::run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            eprintln!("fernboy: {err:#}");
            ExitCode::from(1)
        }
    }
}
