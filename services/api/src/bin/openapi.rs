//! services/api/src/bin/openapi.rs
//!
//! Generates the OpenAPI 3.0 specification for the clinic API and writes it
//! to disk, so the admin UI and docs can be built without a running server.

use api_lib::web::ApiDoc;
use utoipa::OpenApi;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Output path defaults to `openapi.json`, overridable as the first argument.
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "openapi.json".to_string());

    let spec_json = ApiDoc::openapi().to_pretty_json()?;
    std::fs::write(&path, spec_json)?;
    println!("OpenAPI specification generated at {}", path);
    Ok(())
}
