//! Factory patches bundled with senal.
//!
//! These reproduce the classic sampling lab set-ups and are always available
//! without external files. Each one validates and runs with nothing stuck.

use crate::Patch;

/// Array of factory patch names for external access.
pub static FACTORY_PATCH_NAMES: &[&str] = &["sampling", "switch", "noisy_sum"];

/// TOML content for factory patches.
///
/// These are embedded at compile time and always available.
static FACTORY_PATCHES_TOML: &[(&str, &str)] = &[
    ("sampling", SAMPLING_PATCH),
    ("switch", SWITCH_PATCH),
    ("noisy_sum", NOISY_SUM_PATCH),
];

/// Anti-aliasing, sample-and-hold, reconstruction.
const SAMPLING_PATCH: &str = r#"
name = "Sampling Chain"
description = "Two tones through FAA, a clocked sample-and-hold and FR"

[run]
sample_rate = 44100.0
duration = 0.05
capture_inputs = true

[[blocks]]
name = "sig"
type = "signal"
frequencies = [100.0, 300.0]
amplitude = 1.0

[[blocks]]
name = "faa"
type = "faa"
cutoff = 500.0

[[blocks]]
name = "clk"
type = "clock"
frequency = 1000.0
duty_cycle = 0.5

[[blocks]]
name = "sh"
type = "sample-hold"

[[blocks]]
name = "fr"
type = "fr"
cutoff = 500.0

[[connections]]
from = "sig"
to = "faa"

[[connections]]
from = "faa"
to = "sh"

[[connections]]
from = "clk"
to = "sh.clock"

[[connections]]
from = "sh"
to = "fr"
"#;

/// Natural sampling with an analog switch.
const SWITCH_PATCH: &str = r#"
name = "Analog Switch"
description = "A tone gated by a narrow clock, then reconstructed"

[run]
sample_rate = 44100.0
duration = 0.05
capture_inputs = true

[[blocks]]
name = "sig"
type = "signal"
frequencies = [200.0]

[[blocks]]
name = "clk"
type = "clock"
frequency = 2000.0
duty_cycle = 0.25

[[blocks]]
name = "switch"
type = "analog-switch"

[[blocks]]
name = "fr"
type = "fr"
cutoff = 1000.0

[[connections]]
from = "sig"
to = "switch.in"

[[connections]]
from = "clk"
to = "switch.clock"

[[connections]]
from = "switch"
to = "fr"
"#;

/// Tone plus noise, band-limited.
const NOISY_SUM_PATCH: &str = r#"
name = "Noisy Sum"
description = "A tone with additive white noise, band-limited by FAA"

[run]
sample_rate = 44100.0
duration = 0.1
seed = 7

[[blocks]]
name = "tone"
type = "signal"
frequencies = [440.0]

[[blocks]]
name = "hiss"
type = "noise"
peak_to_peak = 0.2

[[blocks]]
name = "mix"
type = "adder"

[[blocks]]
name = "faa"
type = "faa"
cutoff = 2000.0

[[connections]]
from = "tone"
to = "mix.in0"

[[connections]]
from = "hiss"
to = "mix.in1"

[[connections]]
from = "mix"
to = "faa"
"#;

/// Get all factory patches.
///
/// # Example
///
/// ```rust
/// use senal_config::factory_patches;
///
/// for patch in factory_patches() {
///     println!("{}: {}", patch.name, patch.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_patches() -> Vec<Patch> {
    FACTORY_PATCHES_TOML
        .iter()
        .filter_map(|(_, toml)| Patch::from_toml(toml).ok())
        .collect()
}

/// Get a factory patch by name.
///
/// Matches the internal identifier or the patch's display name,
/// case-insensitively.
///
/// # Example
///
/// ```rust
/// use senal_config::get_factory_patch;
///
/// let patch = get_factory_patch("sampling").unwrap();
/// assert_eq!(patch.name, "Sampling Chain");
/// ```
pub fn get_factory_patch(name: &str) -> Option<Patch> {
    let name_lower = name.to_lowercase();

    for (patch_name, toml) in FACTORY_PATCHES_TOML {
        if patch_name.to_lowercase() == name_lower {
            return Patch::from_toml(toml).ok();
        }
    }

    factory_patches()
        .into_iter()
        .find(|p| p.name.to_lowercase() == name_lower)
}

/// Check if a name refers to a factory patch (case-insensitive).
pub fn is_factory_patch(name: &str) -> bool {
    get_factory_patch(name).is_some()
}
