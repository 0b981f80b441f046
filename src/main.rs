use std::process::ExitCode;

use ember::engine::Engine;
use ember::uci;

fn main() -> ExitCode {
    let mut engine = Engine::new();
    match uci::run(&mut engine) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {e}");
            ExitCode::FAILURE
        }
    }
}
