//! # Security Requirement Policy
//!
//! Optional tightening of the `UseSecurity` endpoint flag, applied to each
//! record alternative after it is built.
//!
//! | `require_flag` | `require_true` | Effect on alternatives declaring `UseSecurity` |
//! |---|---|---|
//! | false | any | none |
//! | true | false | `UseSecurity` becomes required; `true` and `false` both pass |
//! | true | true | `UseSecurity` becomes required and must be `true` |
//!
//! Alternatives that do not declare `UseSecurity` are returned unchanged.
//! Applying the policy twice yields the same alternative as applying it once.

use serde_json::Value;

use crate::published_nodes::{AlternativeSchema, USE_SECURITY};

/// Whether `UseSecurity` must be present, and whether it must be `true`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SecurityRequirementPolicy {
    /// Add `UseSecurity` to the required list.
    pub require_flag: bool,
    /// Constrain `UseSecurity` to the constant `true`. Only honoured
    /// together with `require_flag`.
    pub require_true: bool,
}

impl SecurityRequirementPolicy {
    /// Map the generator's `use_security` / `require_use_security` options
    /// onto a policy.
    pub fn from_options(use_security: bool, require_use_security: bool) -> Self {
        Self {
            require_flag: require_use_security,
            require_true: require_use_security && use_security,
        }
    }

    /// True if applying this policy never changes an alternative.
    pub fn is_noop(&self) -> bool {
        !self.require_flag
    }

    /// Apply the policy to one alternative, returning the tightened copy.
    pub fn apply(&self, alternative: AlternativeSchema) -> AlternativeSchema {
        if self.is_noop() || !alternative.declares(USE_SECURITY) {
            return alternative;
        }

        let alternative = alternative.with_required(USE_SECURITY);
        if !self.require_true {
            return alternative;
        }

        let mut flag = alternative
            .property(USE_SECURITY)
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        if let Value::Object(ref mut map) = flag {
            map.insert("const".to_string(), Value::Bool(true));
        }
        alternative.with_property(USE_SECURITY, flag)
    }
}
