//! Generate `showcase.h` for C hosts.
//!
//! The header is written to `OUT_DIR`. A failure to generate it is reported
//! as a cargo warning and never fails the build of the library itself.

use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-changed=src/lib.rs");
    println!("cargo:rerun-if-changed=src/types.rs");

    let Ok(crate_dir) = env::var("CARGO_MANIFEST_DIR") else {
        return;
    };
    let Ok(out_dir) = env::var("OUT_DIR") else {
        return;
    };

    let generated = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("SHOWCASE_H")
        .with_cpp_compat(true)
        .generate();

    match generated {
        Ok(bindings) => {
            let header = PathBuf::from(out_dir).join("showcase.h");
            bindings.write_to_file(&header);
        }
        Err(e) => println!("cargo:warning=skipping showcase.h: {e}"),
    }
}
