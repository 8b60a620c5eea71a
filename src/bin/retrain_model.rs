use std::process::ExitCode;

fn main() -> ExitCode {
    match ulasan_lib::app::run_trainer() {
        Ok(_) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
