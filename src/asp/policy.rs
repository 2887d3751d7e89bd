//! Fixed policy modules.
//!
//! The rule text is owned by the domain and versioned with the crate; the
//! compiler only concatenates it. Callers may swap in their own revision of
//! any module.

use std::borrow::Cow;

/// Rule texts concatenated ahead of the generated facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyModules {
    /// Type checking, defaults, relaxation, output directives.
    pub main: Cow<'static, str>,
    /// Certification quotas and vetoes.
    pub core: Cow<'static, str>,
    /// Short review cycles.
    pub reciprocity: Cow<'static, str>,
    /// Follow-up of previous rotations.
    pub follow_up: Cow<'static, str>,
    /// Required skill coverage.
    pub skills: Cow<'static, str>,
    /// Meeting dates, attendance, meeting size.
    pub committee_meeting: Cow<'static, str>,
    /// Travelling costs.
    pub location: Cow<'static, str>,
    /// Which modules are active.
    pub activation: Cow<'static, str>,
}

impl Default for PolicyModules {
    fn default() -> Self {
        Self::bundled()
    }
}

impl PolicyModules {
    /// The rule set shipped with this crate.
    pub fn bundled() -> Self {
        Self {
            main: Cow::Borrowed(include_str!("policy/main.lp")),
            core: Cow::Borrowed(include_str!("policy/core.lp")),
            reciprocity: Cow::Borrowed(include_str!("policy/reciprocity.lp")),
            follow_up: Cow::Borrowed(include_str!("policy/follow_up.lp")),
            skills: Cow::Borrowed(include_str!("policy/skills.lp")),
            committee_meeting: Cow::Borrowed(include_str!("policy/committee_meeting.lp")),
            location: Cow::Borrowed(include_str!("policy/location.lp")),
            activation: Cow::Borrowed(include_str!("policy/active.lp")),
        }
    }

    /// Modules in program order.
    pub fn in_order(&self) -> [&str; 8] {
        [
            &*self.main,
            &*self.core,
            &*self.reciprocity,
            &*self.follow_up,
            &*self.skills,
            &*self.committee_meeting,
            &*self.location,
            &*self.activation,
        ]
    }

    /// Replaces the activation table.
    pub fn with_activation(mut self, text: impl Into<String>) -> Self {
        self.activation = Cow::Owned(text.into());
        self
    }

    /// Total length of the rule text.
    pub fn len(&self) -> usize {
        self.in_order().iter().map(|m| m.len()).sum()
    }

    /// Whether every module is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_modules_declared() {
        let p = PolicyModules::bundled();
        assert!(p.core.contains("declare(module, core)."));
        assert!(p.reciprocity.contains("declare(module, reciprocity)."));
        assert!(p.follow_up.contains("declare(module, followUp)."));
        assert!(p.skills.contains("declare(module, skills)."));
        assert!(p.committee_meeting.contains("declare(module, committeeMeeting)."));
        assert!(p.location.contains("declare(module, location)."));
        assert!(p.activation.contains("active(core)."));
    }

    #[test]
    fn test_parameterized_lines_left_to_compiler() {
        let p = PolicyModules::bundled();
        assert!(!p.main.contains("#const target"));
        assert!(!p.follow_up.contains("year(0.."));
    }

    #[test]
    fn test_override_activation() {
        let p = PolicyModules::bundled().with_activation("active(core).\n");
        assert_eq!(p.in_order()[7], "active(core).\n");
        assert!(!p.is_empty());
    }
}
