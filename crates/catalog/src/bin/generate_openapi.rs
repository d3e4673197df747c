//! Writes the catalog OpenAPI document to `openapi/catalog.json` at the
//! workspace root, or to the path given as the first argument.
//!
//! Usage: `cargo run --bin generate_openapi [-- <out>]`

use catalog::server::openapi::ApiDoc;
use std::path::PathBuf;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let spec = ApiDoc::openapi().to_pretty_json()?;

    let out_path = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../openapi/catalog.json"),
    };
    if let Some(parent) = out_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out_path, &spec)?;

    println!("Wrote OpenAPI document to {}", out_path.display());
    Ok(())
}
