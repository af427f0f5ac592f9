//! Process-wide enable toggle.
//!
//! The library only ever looks at `Settings::enabled`; reading the
//! environment happens once, in the config layer, at startup.

/// Environment variable that switches metric emission on or off.
pub const ENABLE_VAR: &str = "JARMO_ENABLE";

/// Interpret a toggle value.
///
/// Empty, `0`, `false`, `no` and `off` (any case) disable. Everything
/// else enables.
pub fn parse_toggle(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty()
        || value == "0"
        || value.eq_ignore_ascii_case("false")
        || value.eq_ignore_ascii_case("no")
        || value.eq_ignore_ascii_case("off"))
}
