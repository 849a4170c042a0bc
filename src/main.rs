use std::process::ExitCode;

use webpify::{parse_args, run, version_line, Command, USAGE};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let invocation = match parse_args(std::env::args_os().skip(1)) {
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Ok(Command::Version) => {
            println!("{}", version_line());
            return ExitCode::SUCCESS;
        }
        Ok(Command::Convert(invocation)) => invocation,
        Err(e) => {
            if e.is_usage() {
                eprintln!("Error: {}\n", e);
                println!("{}", USAGE);
            } else {
                eprintln!("Error: {}", e);
            }
            return ExitCode::FAILURE;
        }
    };

    log::debug!("{:?}", invocation);

    match run(&invocation) {
        Ok(result) => {
            println!("{}", result);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
