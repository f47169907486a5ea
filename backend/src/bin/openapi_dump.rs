//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use search_admin::doc::ApiDoc;
use utoipa::OpenApi;

fn main() -> io::Result<()> {
    let json = ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|err| io::Error::other(err.to_string()))?;
    writeln!(io::stdout().lock(), "{json}")
}
