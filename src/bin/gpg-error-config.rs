// src/bin/gpg-error-config.rs

//! `gpg-error-config` compatibility shim backed by pkg-config

fn main() {
    confshim::launch::shim_main(confshim::ShimKind::GpgErrorConfig)
}
