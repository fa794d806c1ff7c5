//! Prints the OpenAPI document for CTF Arena Back to stdout.

use ctf_arena_back::services::documentation::ApiDoc;
use utoipa::OpenApi;

fn main() {
    let doc = ApiDoc::openapi();
    println!("{}", doc.to_pretty_json().unwrap());
}
