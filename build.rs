fn main() {
    // ── libvips linking ──────────────────────────────────────────────────────
    //
    // The libvips-rs bindings crate ships no build script of its own, so the
    // link directives for the native library are emitted here.
    //
    // The VIPS_DIR environment variable points at a libvips install whose
    // `lib/` directory should be searched before the system paths.
    println!("cargo:rerun-if-env-changed=VIPS_DIR");
    println!("cargo:rerun-if-env-changed=CARGO_FEATURE_VIPS");

    if std::env::var_os("CARGO_FEATURE_VIPS").is_some() {
        link_libvips();
    }
}

fn link_libvips() {
    if let Ok(vips_dir) = std::env::var("VIPS_DIR") {
        let lib_dir = std::path::Path::new(&vips_dir).join("lib");
        if lib_dir.exists() {
            println!("cargo:rustc-link-search=native={}", lib_dir.display());
        } else {
            println!("cargo:warning=VIPS_DIR is set but '{}' does not exist", lib_dir.display());
        }
    }

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "windows" {
        // The MSVC import library is named libvips.lib; GLib symbols used
        // directly by libvips-rs must be linked as well.
        println!("cargo:rustc-link-lib=dylib=libvips");
        println!("cargo:rustc-link-lib=dylib=libglib-2.0");
        println!("cargo:rustc-link-lib=dylib=libgobject-2.0");
    } else {
        // macOS (Homebrew) and Linux (libvips-dev) both expose plain -lvips.
        println!("cargo:rustc-link-lib=dylib=vips");
        println!("cargo:rustc-link-lib=dylib=glib-2.0");
        println!("cargo:rustc-link-lib=dylib=gobject-2.0");
    }
}
