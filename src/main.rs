use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use stampver::arguments::{Arguments, HELP_HINT, HELP_TEXT};
use stampver::io::{FsIo, IoPort};
use stampver::{pipeline, report};

fn main() -> ExitCode {
    let args = Arguments::parse();
    pretty_env_logger::env_logger::builder()
        .filter_level(if args.verbose { LevelFilter::Debug } else { LevelFilter::Info })
        .format_timestamp(None)
        .init();

    let mut io = FsIo::new(".");

    let request = match args.into_request() {
        Ok(request) => request,
        Err(error) => {
            io.write_line(&format!("error: {}", error));
            io.write_line(HELP_HINT);
            return ExitCode::FAILURE;
        }
    };

    if request.help {
        io.write_line(HELP_TEXT);
        return ExitCode::SUCCESS;
    }

    match pipeline::run(&request, &mut io) {
        Ok(records) => {
            report::emit(&records, &request, &mut io);
            ExitCode::SUCCESS
        }
        Err(error) => {
            io.write_line(&format!("error: {:#}", error));
            ExitCode::FAILURE
        }
    }
}
