// src/bin/gpgme-config.rs

//! `gpgme-config` compatibility shim backed by pkg-config

fn main() {
    confshim::launch::shim_main(confshim::ShimKind::GpgmeConfig)
}
