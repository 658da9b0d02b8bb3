//! Binary entrypoint for the browser-hosted header gallery.

#[cfg(all(target_arch = "wasm32", feature = "csr"))]
fn main() {
    console_error_panic_hook::set_once();
    site::mount();
}

#[cfg(not(all(target_arch = "wasm32", feature = "csr")))]
fn main() {
    eprintln!(
        "This binary is intended for the browser/WASM workflow. Build `site_app` for wasm32 with the `csr` feature and serve it with trunk."
    );
}
