//! Configuration loading
//!
//! clock.toml is validated and encoded by the build script. The blob is
//! decoded once at boot.

use defmt::*;
use nixie_core::config::ClockConfig;

/// Encoded clock.toml (see build.rs)
const EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/clock.bin"));

/// Decode the embedded configuration, falling back to defaults
pub fn load_config() -> ClockConfig {
    let config = match postcard::from_bytes::<ClockConfig>(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(_) => {
            warn!("Embedded config failed to decode, using defaults");
            return ClockConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("Embedded config rejected ({:?}), using defaults", e);
        return ClockConfig::default();
    }

    info!(
        "Config: minute={}ms, scramble={} every {}ms, baud={}",
        config.timekeeping.minute_ms,
        config.scramble.enabled,
        config.scramble.interval_ms,
        config.link.baud
    );
    config
}
