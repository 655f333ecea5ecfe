//! Macro keys exported by the macro module.
//!
//! Each key maps to one rewrite rule. The set is closed: an import of any other
//! name from the macro module is removed with the declaration and otherwise
//! ignored.

use std::fmt;

/// Kind of macro usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MacroKind {
    /// `component({...})`
    Component = 0,
    /// `functional({...})` or `functional(render)`
    Functional = 1,
    /// `type<T>()`
    Type = 2,
    /// `[EVENTS]: {...}`
    Events = 3,
    /// `[STATES]: {...}`
    States = 4,
    /// `[SCOPED_SLOTS]: {...}`
    ScopedSlots = 5,
    /// `[INJECTIONS]: {...}`
    Injections = 6,
}

impl MacroKind {
    /// Number of macro kinds.
    pub const COUNT: usize = 7;

    /// Every kind, in declaration order.
    pub const ALL: [MacroKind; Self::COUNT] = [
        Self::Component,
        Self::Functional,
        Self::Type,
        Self::Events,
        Self::States,
        Self::ScopedSlots,
        Self::Injections,
    ];

    /// Order in which rules run. `type` goes last so the props rewriter can
    /// claim the usages it handles first.
    pub const DISPATCH_ORDER: [MacroKind; Self::COUNT] = [
        Self::Component,
        Self::Functional,
        Self::Events,
        Self::States,
        Self::ScopedSlots,
        Self::Injections,
        Self::Type,
    ];

    /// Look up a macro by its exported name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "component" => Some(Self::Component),
            "functional" => Some(Self::Functional),
            "type" => Some(Self::Type),
            "EVENTS" => Some(Self::Events),
            "STATES" => Some(Self::States),
            "SCOPED_SLOTS" => Some(Self::ScopedSlots),
            "INJECTIONS" => Some(Self::Injections),
            _ => None,
        }
    }

    /// Exported name of the macro.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Functional => "functional",
            Self::Type => "type",
            Self::Events => "EVENTS",
            Self::States => "STATES",
            Self::ScopedSlots => "SCOPED_SLOTS",
            Self::Injections => "INJECTIONS",
        }
    }

    /// Keys that only appear in object property key position.
    #[inline]
    pub const fn is_key_macro(self) -> bool {
        matches!(
            self,
            Self::Events | Self::States | Self::ScopedSlots | Self::Injections
        )
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for MacroKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
