use std::str::FromStr;

use anyhow::Context;

use crate::{spin::VelocityMode, wheel::DEFAULT_SEGMENTS};

pub const DEFAULT_WHEEL_SCALE: f32 = 0.9;
/// One-degree slices; past this the labels and the pin stop being readable
pub const MAX_SEGMENTS: usize = 360;

#[derive(Clone, Debug, PartialEq)]
pub struct WheelConfig {
    pub segments: usize,
    pub seed: Option<u64>,
    pub velocity_mode: VelocityMode,
    /// Fraction of the available width the wheel takes up
    pub wheel_scale: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            seed: None,
            velocity_mode: VelocityMode::Fixed,
            wheel_scale: DEFAULT_WHEEL_SCALE,
        }
    }
}

impl WheelConfig {
    pub const SEGMENTS: &'static str = "PRIZEWHEEL_SEGMENTS";
    pub const SEED: &'static str = "PRIZEWHEEL_SEED";
    pub const GESTURE_VELOCITY: &'static str = "PRIZEWHEEL_GESTURE_VELOCITY";
    pub const WHEEL_SCALE: &'static str = "PRIZEWHEEL_WHEEL_SCALE";

    pub fn load_from_env() -> anyhow::Result<Self> {
        Self::load_with(|key| std::env::var(key).ok())
    }

    /// Every key is optional; a key that is present has to parse
    pub fn load_with(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let mut this = Self::default();

        if let Some(segments) = parse::<usize>(&get, Self::SEGMENTS)? {
            anyhow::ensure!(
                (1..=MAX_SEGMENTS).contains(&segments),
                "`{}` must be in 1..={MAX_SEGMENTS}, got {segments}",
                Self::SEGMENTS
            );
            this.segments = segments;
        }

        this.seed = parse(&get, Self::SEED)?;

        if let Some(gesture) = parse_flag(&get, Self::GESTURE_VELOCITY)? {
            this.velocity_mode = if gesture {
                VelocityMode::Gesture
            } else {
                VelocityMode::Fixed
            };
        }

        if let Some(scale) = parse::<f32>(&get, Self::WHEEL_SCALE)? {
            anyhow::ensure!(
                scale > 0.0 && scale <= 1.0,
                "`{}` must be in (0, 1], got {scale}",
                Self::WHEEL_SCALE
            );
            this.wheel_scale = scale;
        }

        Ok(this)
    }

    pub fn rng(&self) -> fastrand::Rng {
        match self.seed {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

fn parse<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    get(key)
        .filter(|s| !s.trim().is_empty())
        .map(|s| {
            s.trim()
                .parse()
                .with_context(|| anyhow::anyhow!("cannot parse `{key}` from {s:?}"))
        })
        .transpose()
}

fn parse_flag(get: &impl Fn(&str) -> Option<String>, key: &str) -> anyhow::Result<Option<bool>> {
    let value = match get(key) {
        Some(value) if !value.trim().is_empty() => value,
        _ => return Ok(None),
    };

    match &*value.trim().to_ascii_lowercase() {
        "1" | "true" | "yes" | "on" => Ok(Some(true)),
        "0" | "false" | "no" | "off" => Ok(Some(false)),
        _ => anyhow::bail!("`{key}` should be a boolean, got {value:?}"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<WheelConfig> {
        let map = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<HashMap<_, _>>();
        WheelConfig::load_with(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(load(&[]).unwrap(), WheelConfig::default());
        assert_eq!(WheelConfig::default().segments, 10);
    }

    #[test]
    fn reads_every_key() {
        let config = load(&[
            (WheelConfig::SEGMENTS, "12"),
            (WheelConfig::SEED, " 1234 "),
            (WheelConfig::GESTURE_VELOCITY, "yes"),
            (WheelConfig::WHEEL_SCALE, "0.5"),
        ])
        .unwrap();

        assert_eq!(
            config,
            WheelConfig {
                segments: 12,
                seed: Some(1234),
                velocity_mode: VelocityMode::Gesture,
                wheel_scale: 0.5,
            }
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(load(&[(WheelConfig::SEGMENTS, "ten")]).is_err());
        assert!(load(&[(WheelConfig::SEGMENTS, "0")]).is_err());
        assert!(load(&[(WheelConfig::SEGMENTS, "361")]).is_err());
        assert!(load(&[(WheelConfig::SEGMENTS, "18446744073709551615")]).is_err());
        assert!(load(&[(WheelConfig::GESTURE_VELOCITY, "maybe")]).is_err());
        assert!(load(&[(WheelConfig::WHEEL_SCALE, "1.5")]).is_err());
    }

    #[test]
    fn segment_count_bounds() {
        assert_eq!(load(&[(WheelConfig::SEGMENTS, "1")]).unwrap().segments, 1);
        assert_eq!(
            load(&[(WheelConfig::SEGMENTS, "360")]).unwrap().segments,
            MAX_SEGMENTS
        );
    }

    #[test]
    fn blank_is_unset() {
        assert_eq!(load(&[(WheelConfig::SEED, "  ")]).unwrap().seed, None);
    }

    #[test]
    fn seeded_rng_is_stable() {
        let config = WheelConfig {
            seed: Some(9),
            ..WheelConfig::default()
        };
        assert_eq!(config.rng().u64(..), config.rng().u64(..));
    }
}
