use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    ExitCode::from(asl_connection_hooks::app::run(std::env::args_os()).await)
}
