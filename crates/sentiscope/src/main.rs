#![forbid(unsafe_code)]

fn main() {
    if let Err(error) = sentiscope::run_from_env() {
        eprintln!("sentiscope: {error}");
        std::process::exit(error.exit_code());
    }
}
