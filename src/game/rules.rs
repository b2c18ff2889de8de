use serde::Deserialize;
use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;
use thiserror::Error;

/// The policies that distinguish one flavor of the game from another
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Rules {
    /// What happens when the snake's head leaves the playing field
    pub(crate) boundary: Boundary,

    /// What happens when the snake runs into itself
    pub(crate) self_collision: SelfCollision,

    /// Number of segments at the head end of the body that are never
    /// considered when checking for self-collision
    pub(crate) safe_zone: usize,

    /// Number of segments added to the body per apple eaten
    pub(crate) growth: NonZeroU32,

    /// Points scored per apple eaten
    pub(crate) reward: NonZeroU32,

    /// Keep freshly-spawned apples at least one cell away from the far edges
    pub(crate) apple_margin: bool,

    /// Respawn the apple before drawing if it lies flush against (or beyond)
    /// the far edges, as can happen after the field shrinks
    pub(crate) reposition_stale_apple: bool,

    /// Number of segments in the body at the start of a game
    pub(crate) initial_length: NonZeroU32,

    /// Row on which the snake starts
    pub(crate) start_row: StartRow,

    /// How multiple turns between two moves are resolved
    pub(crate) turns: TurnPolicy,

    /// Whether turns are accepted while the game is paused
    pub(crate) turn_while_paused: bool,
}

impl Rules {
    /// Rules of the traditional wraparound game: the snake passes through the
    /// edges, restarts silently when it bites itself, and grows one segment
    /// per apple.
    pub(crate) const CLASSIC: Rules = Rules {
        boundary: Boundary::Wrap,
        self_collision: SelfCollision::Restart,
        safe_zone: 0,
        growth: NonZeroU32::MIN,
        reward: NonZeroU32::MIN,
        apple_margin: false,
        reposition_stale_apple: true,
        initial_length: NonZeroU32::MIN,
        start_row: StartRow::Top,
        turns: TurnPolicy::LastWins,
        turn_while_paused: true,
    };

    /// Rules of the walled game: the edges and the snake's own body are
    /// deadly, and each apple is worth more and grows the snake further.
    pub(crate) const ARCADE: Rules = Rules {
        boundary: Boundary::Lethal,
        self_collision: SelfCollision::Die,
        safe_zone: 4,
        growth: match NonZeroU32::new(2) {
            Some(n) => n,
            None => NonZeroU32::MIN,
        },
        reward: match NonZeroU32::new(10) {
            Some(n) => n,
            None => NonZeroU32::MIN,
        },
        apple_margin: true,
        reposition_stale_apple: false,
        initial_length: match NonZeroU32::new(3) {
            Some(n) => n,
            None => NonZeroU32::MIN,
        },
        start_row: StartRow::Middle,
        turns: TurnPolicy::LastWins,
        turn_while_paused: false,
    };

    pub(crate) fn initial_length(&self) -> usize {
        usize::try_from(self.initial_length.get()).unwrap_or(usize::MAX)
    }

    pub(crate) fn growth(&self) -> usize {
        usize::try_from(self.growth.get()).unwrap_or(usize::MAX)
    }
}

impl Default for Rules {
    fn default() -> Rules {
        Preset::default().rules()
    }
}

/// A named set of [`Rules`]
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Preset {
    Classic,
    #[default]
    Arcade,
}

impl Preset {
    pub(crate) fn rules(self) -> Rules {
        match self {
            Preset::Classic => Rules::CLASSIC,
            Preset::Arcade => Rules::ARCADE,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Preset::Classic => "classic",
            Preset::Arcade => "arcade",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Preset {
    type Err = ParsePresetError;

    fn from_str(s: &str) -> Result<Preset, ParsePresetError> {
        match s.to_ascii_lowercase().as_str() {
            "classic" => Ok(Preset::Classic),
            "arcade" => Ok(Preset::Arcade),
            _ => Err(ParsePresetError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown preset {0:?}; expected \"classic\" or \"arcade\"")]
pub(crate) struct ParsePresetError(String);

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum Boundary {
    /// Leaving one edge of the field re-enters at the opposite edge
    Wrap,
    /// Leaving the field kills the snake
    Lethal,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum SelfCollision {
    /// The snake dies and the game is over
    Die,
    /// The game silently starts over
    Restart,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum StartRow {
    Top,
    Middle,
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum TurnPolicy {
    /// The last turn made before a move takes effect
    LastWins,
    /// Only the first turn made between two moves is accepted
    FirstPerTick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("classic", Preset::Classic)]
    #[case("Arcade", Preset::Arcade)]
    #[case("ARCADE", Preset::Arcade)]
    fn parse_preset(#[case] s: &str, #[case] preset: Preset) {
        assert_eq!(s.parse::<Preset>(), Ok(preset));
    }

    #[test]
    fn parse_bad_preset() {
        let e = "modern".parse::<Preset>().unwrap_err();
        assert_eq!(
            e.to_string(),
            r#"unknown preset "modern"; expected "classic" or "arcade""#
        );
    }

    #[test]
    fn preset_display() {
        assert_eq!(Preset::Classic.to_string(), "classic");
        assert_eq!(format!("{:8}|", Preset::Arcade), "arcade  |");
    }

    #[test]
    fn arcade_values() {
        let rules = Preset::Arcade.rules();
        assert_eq!(rules.growth(), 2);
        assert_eq!(rules.reward.get(), 10);
        assert_eq!(rules.initial_length(), 3);
        assert_eq!(rules.safe_zone, 4);
        assert_eq!(Rules::default(), rules);
    }

    #[test]
    fn classic_values() {
        let rules = Preset::Classic.rules();
        assert_eq!(rules.growth(), 1);
        assert_eq!(rules.reward.get(), 1);
        assert_eq!(rules.initial_length(), 1);
        assert_eq!(rules.safe_zone, 0);
        assert_eq!(rules.boundary, Boundary::Wrap);
        assert_eq!(rules.self_collision, SelfCollision::Restart);
    }
}
