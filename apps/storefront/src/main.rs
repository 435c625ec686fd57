//! # Storefront Entry Point
//!
//! Renders one page against the configured API and prints it as HTML.
//!
//! ```text
//! storefront [PATH] [CONFIG]
//!
//!   PATH    /catalog (default), /catalog/{id} or /cart
//!   CONFIG  path to storefront.toml (default: platform config dir)
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let path = args.next().unwrap_or_else(|| "/catalog".to_string());
    let config_path = args.next().map(PathBuf::from);

    match storefront::run(&path, config_path).await {
        Ok(html) => {
            println!("{}", html);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("storefront: {}", e);
            ExitCode::FAILURE
        }
    }
}
