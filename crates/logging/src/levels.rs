//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Traversal lifecycle (start, finish, cancellation).
    Visit,
    /// Nodes rejected by the filter gate.
    Skip,
    /// Traversal statistics.
    Stats,
}

/// Debug flags for internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Depth-first frontier movement.
    Walk,
    /// Event dispatch to subscribers.
    Event,
    /// Filter gate decisions.
    Filter,
    /// Directory reader queries.
    Reader,
}

impl InfoFlag {
    /// Every info flag, in declaration order.
    pub const ALL: [Self; 3] = [Self::Visit, Self::Skip, Self::Stats];

    /// Token used on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Visit => "visit",
            Self::Skip => "skip",
            Self::Stats => "stats",
        }
    }
}

impl DebugFlag {
    /// Every debug flag, in declaration order.
    pub const ALL: [Self; 4] = [Self::Walk, Self::Event, Self::Filter, Self::Reader];

    /// Token used on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Walk => "walk",
            Self::Event => "event",
            Self::Filter => "filter",
            Self::Reader => "reader",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Traversal lifecycle level.
    pub visit: u8,
    /// Filter rejection level.
    pub skip: u8,
    /// Statistics level.
    pub stats: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Visit => self.visit,
            InfoFlag::Skip => self.skip,
            InfoFlag::Stats => self.stats,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Visit => self.visit = level,
            InfoFlag::Skip => self.skip = level,
            InfoFlag::Stats => self.stats = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in InfoFlag::ALL {
            self.set(flag, level);
        }
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Frontier movement level.
    pub walk: u8,
    /// Event dispatch level.
    pub event: u8,
    /// Filter gate level.
    pub filter: u8,
    /// Reader query level.
    pub reader: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Walk => self.walk,
            DebugFlag::Event => self.event,
            DebugFlag::Filter => self.filter,
            DebugFlag::Reader => self.reader,
        }
    }

    /// Set the level for a specific flag.
    pub fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Walk => self.walk = level,
            DebugFlag::Event => self.event = level,
            DebugFlag::Filter => self.filter = level,
            DebugFlag::Reader => self.reader = level,
        }
    }

    /// Set all flags to the specified level.
    pub fn set_all(&mut self, level: u8) {
        for flag in DebugFlag::ALL {
            self.set(flag, level);
        }
    }
}
