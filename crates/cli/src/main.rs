use std::process::ExitCode;

fn main() -> ExitCode {
    match modfiles_cli::run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(2)
        }
    }
}
