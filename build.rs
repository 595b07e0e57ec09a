use std::env;

// Forwards an optional packaging-time resource root to `option_env!`.
// `config::resolve_resource_root` validates and canonicalizes it at runtime.
fn main() {
    println!("cargo:rerun-if-env-changed=SPDX_EXCEPTIONS_RESOURCES_HINT");

    if let Ok(hint) = env::var("SPDX_EXCEPTIONS_RESOURCES_HINT") {
        println!("cargo:rustc-env=SPDX_EXCEPTIONS_RESOURCES_HINT={hint}");
    }
}
