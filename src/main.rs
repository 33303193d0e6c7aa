// src/main.rs

use cronrun::{cli, logging};

#[tokio::main]
async fn main() {
    let args = cli::parse();

    if let Err(err) = logging::init_logging(args.log_level) {
        eprintln!("cronrun error: {err:?}");
        std::process::exit(1);
    }

    // Fatal startup errors have already been reported on the operator log
    // sink by `run`; the exit code is all that is left to do here.
    if cronrun::run(args).await.is_err() {
        std::process::exit(1);
    }
}
