use listing_photos::Error;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = listing_photos::cli::run() {
        eprintln!("error: {e:#}");
        if let Some(Error::Blocked { .. }) = e.downcast_ref::<Error>() {
            eprintln!("hint: export browser cookies and pass them with --cookies");
        }
        std::process::exit(1);
    }
}
