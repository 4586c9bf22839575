//! Severity filtering

use super::severity::Severity;

/// Decides whether a message passes the configured severity floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LevelGate {
    floor: Severity,
}

impl LevelGate {
    pub const fn new(floor: Severity) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> Severity {
        self.floor
    }

    /// `true` when `severity` is at least as severe as the floor.
    /// Fatal always passes.
    #[inline]
    pub fn should_emit(&self, severity: Severity) -> bool {
        severity == Severity::Fatal || severity <= self.floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_warning() {
        let gate = LevelGate::new(Severity::Warning);
        assert!(gate.should_emit(Severity::Fatal));
        assert!(gate.should_emit(Severity::Error));
        assert!(gate.should_emit(Severity::Warning));
        assert!(!gate.should_emit(Severity::Information));
        assert!(!gate.should_emit(Severity::Debug));
        assert!(!gate.should_emit(Severity::Verbose));
    }

    #[test]
    fn test_fatal_floor_only_emits_fatal() {
        let gate = LevelGate::new(Severity::Fatal);
        for severity in Severity::ALL {
            assert_eq!(gate.should_emit(severity), severity == Severity::Fatal);
        }
    }

    #[test]
    fn test_verbose_floor_emits_everything() {
        let gate = LevelGate::new(Severity::Verbose);
        assert!(Severity::ALL.iter().all(|s| gate.should_emit(*s)));
    }
}
