use std::env;

#[path = "build/variant.rs"]
mod variant;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=build/variant.rs");
    println!("cargo:rerun-if-env-changed=CARGO_ENCODED_RUSTFLAGS");
    println!("cargo:rustc-check-cfg=cfg(audio_variant, values(\"atmega8\", \"atmega1280\", \"atmega328\"))");
    println!(
        "cargo:rustc-check-cfg=cfg(audio_chip, values(\"atmega8\", \"atmega1280\", \"atmega168\", \"atmega328p\"))"
    );

    let enabled: Vec<&str> = variant::CHIPS
        .iter()
        .map(|(feature, _, _)| *feature)
        .filter(|feature| env::var(format!("CARGO_FEATURE_{}", feature.to_uppercase())).is_ok())
        .collect();

    let rustflags = env::var("CARGO_ENCODED_RUSTFLAGS").unwrap_or_default();
    let target = env::var("TARGET").unwrap_or_default();
    let mcu = variant::target_mcu(&rustflags, &target);

    let (chip, layout, interrupt_chip) = variant::select(&enabled, mcu);
    if variant::conflicting(&enabled) {
        println!("cargo:warning=Several hardware variant features enabled, using `{}`", chip);
    }

    println!("cargo:rustc-cfg=audio_variant=\"{}\"", layout);
    println!("cargo:rustc-cfg=audio_chip=\"{}\"", interrupt_chip);

    if target.contains("avr") {
        println!("cargo:rustc-link-arg-bins=-mmcu={}", chip);
        println!("cargo:warning=Building PWM audio for {} ({} layout)", chip, layout);
    }
}
