use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    expense_core::init();
    let args: Vec<String> = env::args().skip(1).collect();
    ExitCode::from(expense_core::cli::run(&args) as u8)
}
