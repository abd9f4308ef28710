#![forbid(unsafe_code)]

fn main() -> std::process::ExitCode {
    acctthrive_cli::main_entry()
}
