use gnc_ledger::{app, common::error::AppError};

fn main() {
    if let Err(err) = app::run(std::env::args()) {
        eprintln!("error: {err}");
        if matches!(err, AppError::Usage(_)) {
            eprintln!("\n{}", app::USAGE);
        }
        std::process::exit(1);
    }
}
