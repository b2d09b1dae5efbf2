//! Hardware variant selection for `build.rs`. Also compiled into the crate's
//! unit tests.

/// `(chip, variant, chip passed to the interrupt attribute)`, in the order the
/// variant features are checked. The first enabled one wins.
pub const CHIPS: &[(&str, &str, &str)] = &[
    ("atmega8", "atmega8", "atmega8"),
    ("atmega1280", "atmega1280", "atmega1280"),
    ("atmega168", "atmega328", "atmega168"),
    ("atmega328p", "atmega328", "atmega328p"),
];

/// Layout for builds that name no known chip.
pub const DEFAULT: (&str, &str, &str) = ("atmega328p", "atmega328", "atmega328p");

/// Pick the chip from the enabled chip features, or from the target MCU when
/// no feature is enabled. Unknown and missing MCUs get [`DEFAULT`].
pub fn select(enabled: &[&str], mcu: Option<&str>) -> (&'static str, &'static str, &'static str) {
    let by_feature = CHIPS.iter().find(|(feature, _, _)| enabled.contains(feature));
    let by_mcu = || CHIPS.iter().find(|(name, _, _)| Some(*name) == mcu);
    by_feature.or_else(by_mcu).copied().unwrap_or(DEFAULT)
}

/// True when the enabled features ask for more than one layout. The ATmega168
/// and ATmega328P features share one and do not conflict.
pub fn conflicting(enabled: &[&str]) -> bool {
    let mut variants = CHIPS
        .iter()
        .filter(|(feature, _, _)| enabled.contains(feature))
        .map(|(_, variant, _)| *variant);
    match variants.next() {
        Some(first) => variants.any(|variant| variant != first),
        None => false,
    }
}

/// MCU name from `-C target-cpu=...` in the encoded rustflags, or else from
/// a custom target name such as `avr-atmega328p`.
pub fn target_mcu<'a>(encoded_rustflags: &'a str, target: &'a str) -> Option<&'a str> {
    let from_flags = encoded_rustflags
        .split('\x1f')
        .filter_map(|flag| flag.strip_prefix("target-cpu=").or_else(|| flag.strip_prefix("-Ctarget-cpu=")))
        .last();

    from_flags.or_else(|| target.rsplit('-').next().filter(|mcu| mcu.starts_with("at")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn atmega8_wins_over_everything() {
        assert_eq!(select(&["atmega8", "atmega1280", "atmega328p"], None).1, "atmega8");
        assert_eq!(select(&["atmega328p", "atmega8"], Some("atmega1280")).1, "atmega8");
    }

    #[test]
    fn atmega1280_wins_over_the_default() {
        assert_eq!(
            select(&["atmega328p", "atmega1280"], None),
            ("atmega1280", "atmega1280", "atmega1280")
        );
        assert_eq!(select(&["atmega168", "atmega1280"], None).1, "atmega1280");
    }

    #[test]
    fn atmega168_keeps_its_interrupt_chip() {
        assert_eq!(select(&["atmega168"], None), ("atmega168", "atmega328", "atmega168"));
        assert_eq!(select(&[], Some("atmega168")), ("atmega168", "atmega328", "atmega168"));
    }

    #[test]
    fn features_override_the_target_mcu() {
        assert_eq!(select(&["atmega328p"], Some("atmega8")).1, "atmega328");
    }

    #[test]
    fn mcu_selects_without_features() {
        assert_eq!(select(&[], Some("atmega8")).1, "atmega8");
        assert_eq!(select(&[], Some("atmega1280")).1, "atmega1280");
    }

    #[test]
    fn unknown_or_missing_mcu_falls_back_to_atmega328() {
        assert_eq!(select(&[], Some("atmega2560")), DEFAULT);
        assert_eq!(select(&[], Some("attiny85")), DEFAULT);
        assert_eq!(select(&[], Some("")), DEFAULT);
        assert_eq!(select(&[], None), DEFAULT);
        // Unrelated features do not count
        assert_eq!(select(&["rt"], None), DEFAULT);
    }

    #[test]
    fn conflicts_between_layouts() {
        assert!(conflicting(&["atmega8", "atmega1280"]));
        assert!(conflicting(&["atmega1280", "atmega328p"]));
        assert!(!conflicting(&["atmega168", "atmega328p"]));
        assert!(!conflicting(&["atmega8"]));
        assert!(!conflicting(&[]));
    }

    #[test]
    fn mcu_from_target_cpu_flag() {
        assert_eq!(target_mcu("-C\x1ftarget-cpu=atmega1280", "avr-unknown-gnu-atmega328"), Some("atmega1280"));
        assert_eq!(target_mcu("-Ctarget-cpu=atmega8", ""), Some("atmega8"));
    }

    #[test]
    fn mcu_from_target_name() {
        assert_eq!(target_mcu("", "avr-atmega2560"), Some("atmega2560"));
        assert_eq!(select(&[], target_mcu("", "avr-atmega2560")), DEFAULT);
        assert_eq!(target_mcu("", "x86_64-unknown-linux-gnu"), None);
        assert_eq!(target_mcu("", ""), None);
    }
}
