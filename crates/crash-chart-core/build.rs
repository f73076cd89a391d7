// File: crates/crash-chart-core/build.rs
// Summary: Links the Windows system libraries Skia's raster/text backend needs.

fn main() {
    #[cfg(target_os = "windows")]
    {
        // Skia's font manager queries the registry (RegOpenKeyExW & co).
        println!("cargo:rustc-link-lib=advapi32");
    }
}
