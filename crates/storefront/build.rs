//! Build script for storefront crate.
//!
//! Hashes `static/css/main.css` and copies it to
//! `static/css/derived/main.<hash>.css` so the stylesheet URL changes with
//! its content. The hash is exposed to templates as `CSS_HASH`.

use std::env;
use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    if let Err(e) = hash_css() {
        println!("cargo:warning=Could not publish hashed main.css: {e}");
        println!("cargo:rustc-env=CSS_HASH=");
    }
}

/// Hash main.css and copy to derived directory with hash in filename.
fn hash_css() -> io::Result<()> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?;
    let css_path = Path::new(&manifest_dir).join("static/css/main.css");

    println!("cargo:rerun-if-changed={}", css_path.display());

    let content = fs::read(&css_path)?;

    // First 8 hex chars of SHA256
    let digest = format!("{:x}", Sha256::digest(&content));
    let short_hash = digest.get(..8).unwrap_or(&digest);

    let derived_dir = Path::new(&manifest_dir).join("static/css/derived");
    fs::create_dir_all(&derived_dir)?;
    fs::copy(&css_path, derived_dir.join(format!("main.{short_hash}.css")))?;

    println!("cargo:rustc-env=CSS_HASH={short_hash}");
    Ok(())
}
