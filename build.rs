/// Build script for d3d11_bootstrap
///
/// # Shader Strategy:
/// - HLSL sources live in `shaders/` and are compiled offline with `fxc` into `.cso` bytecode
/// - The `.cso` files are loaded at runtime, nothing is compiled during the cargo build
fn main() {
    // Trigger rebuild if shader sources change
    println!("cargo:rerun-if-changed=shaders/vertex.hlsl");
    println!("cargo:rerun-if-changed=shaders/pixel.hlsl");
}
