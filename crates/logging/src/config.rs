//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// Level 0 is silent, 1 reports the traversal lifecycle and statistics,
    /// 2 adds filter rejections and coarse debug output, 3 and above enable
    /// every debug flag at increasing detail.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.info.visit = 1;
                config.info.stats = 1;
            }
            2 => {
                config.info.visit = 1;
                config.info.stats = 1;
                config.info.skip = 1;
                config.debug.walk = 1;
                config.debug.filter = 1;
            }
            3 => {
                config.info.set_all(2);
                config.debug.walk = 2;
                config.debug.filter = 2;
                config.debug.event = 1;
                config.debug.reader = 1;
            }
            _ => {
                config.info.set_all(2);
                config.debug.set_all(3);
            }
        }

        config
    }

    /// Apply a single info flag token (e.g., "skip2", "stats").
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;

        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a single debug flag token (e.g., "walk2", "filter").
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;

        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }

        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;

        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "walk2" into ("walk", 2) or "skip" into ("skip", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_zero_is_silent() {
        let config = VerbosityConfig::from_verbose_level(0);
        for flag in InfoFlag::ALL {
            assert_eq!(config.info.get(flag), 0);
        }
        for flag in DebugFlag::ALL {
            assert_eq!(config.debug.get(flag), 0);
        }
    }

    #[test]
    fn level_one_reports_lifecycle_and_stats() {
        let config = VerbosityConfig::from_verbose_level(1);
        assert_eq!(config.info.visit, 1);
        assert_eq!(config.info.stats, 1);
        assert_eq!(config.info.skip, 0);
        assert_eq!(config.debug.walk, 0);
    }

    #[test]
    fn level_two_adds_skip_and_walk() {
        let config = VerbosityConfig::from_verbose_level(2);
        assert_eq!(config.info.skip, 1);
        assert_eq!(config.debug.walk, 1);
        assert_eq!(config.debug.filter, 1);
        assert_eq!(config.debug.event, 0);
    }

    #[test]
    fn high_levels_enable_every_debug_flag() {
        let config = VerbosityConfig::from_verbose_level(9);
        for flag in DebugFlag::ALL {
            assert_eq!(config.debug.get(flag), 3);
        }
    }

    #[test]
    fn parse_flag_token_defaults_to_level_one() {
        assert_eq!(parse_flag_token("walk").unwrap(), ("walk", 1));
        assert_eq!(parse_flag_token("walk2").unwrap(), ("walk", 2));
        assert_eq!(parse_flag_token("event10").unwrap(), ("event", 10));
        assert!(parse_flag_token("").is_err());
        assert!(parse_flag_token("3").is_err());
        assert!(parse_flag_token("walk999").is_err());
    }

    #[test]
    fn apply_flags_update_single_category() {
        let mut config = VerbosityConfig::default();
        config.apply_info_flag("skip2").unwrap();
        config.apply_debug_flag("reader").unwrap();
        assert_eq!(config.info.skip, 2);
        assert_eq!(config.debug.reader, 1);
        assert_eq!(config.debug.walk, 0);

        assert!(config.apply_info_flag("bogus").is_err());
        assert!(config.apply_debug_flag("bogus3").is_err());
    }

    #[test]
    fn debug_all_token_sets_every_flag() {
        let mut config = VerbosityConfig::default();
        config.apply_debug_flag("all2").unwrap();
        for flag in DebugFlag::ALL {
            assert_eq!(config.debug.get(flag), 2);
        }
    }

    #[cfg(feature = "serde")]
    #[test]
    fn verbosity_config_serde_roundtrip() {
        let config = VerbosityConfig::from_verbose_level(3);
        let json = serde_json::to_string(&config).unwrap();
        let decoded: VerbosityConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.debug.walk, config.debug.walk);
        assert_eq!(decoded.info.skip, config.info.skip);
    }
}
