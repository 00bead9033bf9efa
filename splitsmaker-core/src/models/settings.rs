//! Autosplitter global settings.
//!
//! Two pairs of flags are mutually exclusive: `IntroStart`/`CreativeStart`
//! and `OrderedLiveSplit`/`OrderedAutoSplits`. Every write goes through
//! [`GlobalSettings::with_setting`] or [`GlobalSettings::normalized`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The seven boolean autosplitter flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Start the timer after the intro cinematic
    #[serde(rename = "IntroStart")]
    pub intro_start: bool,
    /// Start the timer on first movement in creative mode
    #[serde(rename = "CreativeStart")]
    pub creative_start: bool,
    /// Reset the timer on return to the main menu
    #[serde(rename = "Reset")]
    pub reset: bool,
    /// Ask to save golds on automatic reset
    #[serde(rename = "AskForGoldSave")]
    pub ask_for_gold_save: bool,
    /// Pad load removal to match speedrun.com IGT
    #[serde(rename = "SRCLoadtimes")]
    pub src_loadtimes: bool,
    /// Autosplits follow the LiveSplit segment order
    #[serde(rename = "OrderedLiveSplit")]
    pub ordered_live_split: bool,
    /// Autosplits follow their own sequence
    #[serde(rename = "OrderedAutoSplits")]
    pub ordered_auto_splits: bool,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        Self {
            intro_start: true,
            creative_start: false,
            reset: true,
            ask_for_gold_save: false,
            src_loadtimes: false,
            ordered_live_split: true,
            ordered_auto_splits: false,
        }
    }
}

/// Identifies one flag of [`GlobalSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalSettingKey {
    /// `IntroStart`
    IntroStart,
    /// `CreativeStart`
    CreativeStart,
    /// `Reset`
    Reset,
    /// `AskForGoldSave`
    AskForGoldSave,
    /// `SRCLoadtimes`
    SrcLoadtimes,
    /// `OrderedLiveSplit`
    OrderedLiveSplit,
    /// `OrderedAutoSplits`
    OrderedAutoSplits,
}

impl GlobalSettingKey {
    /// All keys in their fixed wire order
    pub const ALL: [Self; 7] = [
        Self::IntroStart,
        Self::CreativeStart,
        Self::Reset,
        Self::AskForGoldSave,
        Self::SrcLoadtimes,
        Self::OrderedLiveSplit,
        Self::OrderedAutoSplits,
    ];

    /// Returns the XML element / JSON key name
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::IntroStart => "IntroStart",
            Self::CreativeStart => "CreativeStart",
            Self::Reset => "Reset",
            Self::AskForGoldSave => "AskForGoldSave",
            Self::SrcLoadtimes => "SRCLoadtimes",
            Self::OrderedLiveSplit => "OrderedLiveSplit",
            Self::OrderedAutoSplits => "OrderedAutoSplits",
        }
    }

    /// Returns the flag this one is mutually exclusive with, if any
    #[must_use]
    pub const fn exclusive_with(self) -> Option<Self> {
        match self {
            Self::IntroStart => Some(Self::CreativeStart),
            Self::CreativeStart => Some(Self::IntroStart),
            Self::OrderedLiveSplit => Some(Self::OrderedAutoSplits),
            Self::OrderedAutoSplits => Some(Self::OrderedLiveSplit),
            Self::Reset | Self::AskForGoldSave | Self::SrcLoadtimes => None,
        }
    }

    /// Returns the tooltip shown next to the flag
    #[must_use]
    pub const fn tooltip(self) -> &'static str {
        match self {
            Self::IntroStart => "Starts the timer after the intro animation",
            Self::CreativeStart => {
                "Starts the timer when you move horizontally, jump, open your PDA or interact with the fabricator"
            }
            Self::Reset => "Resets the timer when you come back to the main menu",
            Self::AskForGoldSave => "Ask to save golds when the timer auto resets",
            Self::SrcLoadtimes => {
                "Adds time to the actual load times to match the IGT shown on Speedrun.com"
            }
            Self::OrderedLiveSplit => {
                "Auto-splits are triggered in the same order as the splits in LiveSplit"
            }
            Self::OrderedAutoSplits => "Auto-splits trigger one after another in their own sequence",
        }
    }
}

impl fmt::Display for GlobalSettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GlobalSettingKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown global setting: {s}"))
    }
}

impl GlobalSettings {
    /// Reads one flag
    #[must_use]
    pub const fn get(&self, key: GlobalSettingKey) -> bool {
        match key {
            GlobalSettingKey::IntroStart => self.intro_start,
            GlobalSettingKey::CreativeStart => self.creative_start,
            GlobalSettingKey::Reset => self.reset,
            GlobalSettingKey::AskForGoldSave => self.ask_for_gold_save,
            GlobalSettingKey::SrcLoadtimes => self.src_loadtimes,
            GlobalSettingKey::OrderedLiveSplit => self.ordered_live_split,
            GlobalSettingKey::OrderedAutoSplits => self.ordered_auto_splits,
        }
    }

    fn set_raw(&mut self, key: GlobalSettingKey, value: bool) {
        let slot = match key {
            GlobalSettingKey::IntroStart => &mut self.intro_start,
            GlobalSettingKey::CreativeStart => &mut self.creative_start,
            GlobalSettingKey::Reset => &mut self.reset,
            GlobalSettingKey::AskForGoldSave => &mut self.ask_for_gold_save,
            GlobalSettingKey::SrcLoadtimes => &mut self.src_loadtimes,
            GlobalSettingKey::OrderedLiveSplit => &mut self.ordered_live_split,
            GlobalSettingKey::OrderedAutoSplits => &mut self.ordered_auto_splits,
        };
        *slot = value;
    }

    /// Returns a copy with `key` assigned as-is, without resolving exclusive
    /// pairs; bulk writers follow up with [`Self::normalized`]
    #[must_use]
    pub fn with_raw(mut self, key: GlobalSettingKey, value: bool) -> Self {
        self.set_raw(key, value);
        self
    }

    /// Returns a copy with `key` assigned; the assigned flag wins over its
    /// exclusive partner.
    #[must_use]
    pub fn with_setting(mut self, key: GlobalSettingKey, value: bool) -> Self {
        self.set_raw(key, value);
        if value && let Some(partner) = key.exclusive_with() {
            self.set_raw(partner, false);
        }
        self.normalized()
    }

    /// Resolves conflicting pairs after a bulk assignment.
    ///
    /// `OrderedLiveSplit` and `IntroStart` win when both flags of a pair are set.
    #[must_use]
    pub const fn normalized(mut self) -> Self {
        if self.ordered_live_split && self.ordered_auto_splits {
            self.ordered_auto_splits = false;
        }
        if self.intro_start && self.creative_start {
            self.creative_start = false;
        }
        self
    }

    /// Returns true if no exclusive pair is violated
    #[must_use]
    pub const fn is_consistent(&self) -> bool {
        !(self.intro_start && self.creative_start)
            && !(self.ordered_live_split && self.ordered_auto_splits)
    }

    /// Packs the flags into a bitmask, bit `n` being `GlobalSettingKey::ALL[n]`
    #[must_use]
    pub fn to_bits(&self) -> u8 {
        GlobalSettingKey::ALL
            .into_iter()
            .enumerate()
            .fold(0u8, |bits, (index, key)| {
                if self.get(key) { bits | (1 << index) } else { bits }
            })
    }

    /// Unpacks a bitmask produced by [`Self::to_bits`]; bits above 6 are ignored
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        let mut settings = Self {
            intro_start: false,
            creative_start: false,
            reset: false,
            ask_for_gold_save: false,
            src_loadtimes: false,
            ordered_live_split: false,
            ordered_auto_splits: false,
        };
        for (index, key) in GlobalSettingKey::ALL.into_iter().enumerate() {
            settings.set_raw(key, bits & (1 << index) != 0);
        }
        settings
    }
}
