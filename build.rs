fn main() {
    println!("cargo:rerun-if-env-changed=VFX_INDICATOR_CONFIG");

    // Only the ESP-IDF firmware build needs the sysenv propagation.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
