#![forbid(unsafe_code)]

/// `embed_migrations!` does not track the migration files themselves, so the
/// crate is rebuilt whenever the migration directory changes.
fn main() {
    println!("cargo:rerun-if-changed=./migrations");
}
