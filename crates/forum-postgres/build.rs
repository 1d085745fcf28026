#![forbid(unsafe_code)]

/// `embed_migrations!` cannot tell when a migration file changes, so the
/// crate is rebuilt whenever anything under the migrations directory does.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
