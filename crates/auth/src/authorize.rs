//! Page access resolution.
//!
//! - No IO
//! - No panics
//! - Total: every path gets a decision

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use campusdesk_core::{DomainError, DomainResult, RoutePath};

use crate::{PermissionRule, PermissionTable, Role};

/// Outcome for paths that no rule covers.
///
/// The shipped default is [`UnmatchedPolicy::Allow`]. Flipping it to `Deny`
/// is a policy change and must be made explicitly by configuration.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnmatchedPolicy {
    #[default]
    Allow,
    Deny,
}

impl UnmatchedPolicy {
    pub fn grants(&self) -> bool {
        matches!(self, UnmatchedPolicy::Allow)
    }
}

impl core::str::FromStr for UnmatchedPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "allow" => Ok(Self::Allow),
            "deny" => Ok(Self::Deny),
            other => Err(DomainError::validation(format!(
                "unmatched policy must be `allow` or `deny`, got `{other}`"
            ))),
        }
    }
}

/// The rule that determined a decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchedRule {
    /// Position of the rule in the table (declaration order).
    pub index: usize,
    pub prefix: RoutePath,
    pub roles: BTreeSet<Role>,
}

/// What a decision was based on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DecisionBasis {
    /// The most specific matching rule.
    Rule(MatchedRule),
    /// No rule prefix covers the path; the unmatched policy applied.
    Unmatched { policy: UnmatchedPolicy },
}

/// An access decision with its explanation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessDecision {
    pub path: RoutePath,
    pub role: Role,
    pub granted: bool,
    pub basis: DecisionBasis,
}

/// Resolves (path, role) pairs against a [`PermissionTable`] using
/// longest-prefix matching over path segments.
///
/// When several rules share the longest matching prefix, the first declared
/// rule wins.
#[derive(Debug, Clone, Default)]
pub struct AccessResolver {
    table: PermissionTable,
    unmatched: UnmatchedPolicy,
}

impl AccessResolver {
    pub fn new(table: PermissionTable) -> Self {
        Self {
            table,
            unmatched: UnmatchedPolicy::default(),
        }
    }

    pub fn with_unmatched_policy(mut self, policy: UnmatchedPolicy) -> Self {
        self.unmatched = policy;
        self
    }

    pub fn table(&self) -> &PermissionTable {
        &self.table
    }

    pub fn unmatched_policy(&self) -> UnmatchedPolicy {
        self.unmatched
    }

    pub fn has_access(&self, path: &str, role: Role) -> bool {
        self.decide_path(&RoutePath::parse(path), role).granted
    }

    pub fn decide(&self, path: &str, role: Role) -> AccessDecision {
        self.decide_path(&RoutePath::parse(path), role)
    }

    pub fn decide_path(&self, path: &RoutePath, role: Role) -> AccessDecision {
        let decision = match self.most_specific(path) {
            Some((index, rule)) => AccessDecision {
                path: path.clone(),
                role,
                granted: rule.allows(role),
                basis: DecisionBasis::Rule(MatchedRule {
                    index,
                    prefix: rule.prefix.clone(),
                    roles: rule.roles.clone(),
                }),
            },
            None => AccessDecision {
                path: path.clone(),
                role,
                granted: self.unmatched.grants(),
                basis: DecisionBasis::Unmatched {
                    policy: self.unmatched,
                },
            },
        };

        tracing::debug!(
            path = %decision.path,
            role = %role,
            granted = decision.granted,
            "access decision"
        );

        decision
    }

    /// Verify that every role may view `fallback`.
    ///
    /// A guard redirecting to an unreachable fallback would loop forever, so
    /// callers run this before serving and treat failure as fatal.
    pub fn check_fallback(&self, fallback: &RoutePath) -> DomainResult<()> {
        let denied: Vec<&str> = Role::ALL
            .iter()
            .filter(|role| !self.decide_path(fallback, **role).granted)
            .map(|role| role.as_str())
            .collect();

        if denied.is_empty() {
            Ok(())
        } else {
            Err(DomainError::invariant(format!(
                "fallback path {fallback} is denied for roles: {}",
                denied.join(", ")
            )))
        }
    }

    // Strictly-greater comparison keeps the first declared rule on ties.
    fn most_specific(&self, path: &RoutePath) -> Option<(usize, &PermissionRule)> {
        let mut best: Option<(usize, &PermissionRule)> = None;
        for (index, rule) in self.table.rules().iter().enumerate() {
            if !path.starts_with(&rule.prefix) {
                continue;
            }
            match best {
                Some((_, current)) if current.prefix.depth() >= rule.prefix.depth() => {}
                _ => best = Some((index, rule)),
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes_table() -> PermissionTable {
        PermissionTable::default()
            .rule("/classes", [Role::Admin, Role::Teacher, Role::Agent])
            .rule("/classes/new", [Role::Admin])
    }

    fn payments_table() -> PermissionTable {
        PermissionTable::default()
            .rule("/", Role::ALL)
            .rule("/payments", [Role::Admin, Role::Accountant, Role::Agent])
            .rule("/payments/new", [Role::Admin, Role::Accountant])
    }

    #[test]
    fn unmatched_path_is_allowed_by_default() {
        let resolver = AccessResolver::new(classes_table());
        for role in Role::ALL {
            assert!(resolver.has_access("/reports", role));
        }

        let decision = resolver.decide("/reports", Role::Agent);
        assert_eq!(
            decision.basis,
            DecisionBasis::Unmatched {
                policy: UnmatchedPolicy::Allow
            }
        );
    }

    #[test]
    fn unmatched_policy_deny_is_opt_in() {
        let resolver =
            AccessResolver::new(classes_table()).with_unmatched_policy(UnmatchedPolicy::Deny);
        assert!(!resolver.has_access("/reports", Role::Admin));
        assert!(resolver.has_access("/classes", Role::Teacher));
    }

    #[test]
    fn most_specific_rule_wins() {
        let resolver = AccessResolver::new(classes_table());
        assert!(!resolver.has_access("/classes/new", Role::Agent));
        assert!(resolver.has_access("/classes", Role::Agent));
        assert!(resolver.has_access("/classes/new", Role::Admin));
        assert!(resolver.has_access("/classes/7/edit", Role::Teacher));
    }

    #[test]
    fn specificity_ignores_declaration_order() {
        let reversed = PermissionTable::default()
            .rule("/classes/new", [Role::Admin])
            .rule("/classes", [Role::Admin, Role::Teacher, Role::Agent]);
        let resolver = AccessResolver::new(reversed);
        assert!(!resolver.has_access("/classes/new", Role::Agent));
        assert!(resolver.has_access("/classes", Role::Agent));
    }

    #[test]
    fn first_declared_rule_wins_ties() {
        let table = PermissionTable::default()
            .rule("/students", [Role::Teacher])
            .rule("/students/", [Role::Agent]);
        let resolver = AccessResolver::new(table);

        assert!(resolver.has_access("/students/3", Role::Teacher));
        assert!(!resolver.has_access("/students/3", Role::Agent));

        let DecisionBasis::Rule(rule) = resolver.decide("/students/3", Role::Agent).basis else {
            panic!("expected a matched rule");
        };
        assert_eq!(rule.index, 0);
    }

    #[test]
    fn prefix_matching_is_segment_exact() {
        let table = PermissionTable::default().rule("/students", [Role::Admin]);
        let resolver = AccessResolver::new(table);

        for role in Role::ALL {
            assert!(resolver.has_access("/students2", role));
        }
        assert!(!resolver.has_access("/students", Role::Teacher));
        assert!(!resolver.has_access("/students/2", Role::Teacher));
    }

    #[test]
    fn dot_segments_cannot_skip_specific_rules() {
        let resolver = AccessResolver::new(crate::school::permission_table());
        assert!(!resolver.has_access("/payments/./new", Role::Agent));
        assert!(!resolver.has_access("/x/../payments/new", Role::Agent));
        assert!(!resolver.has_access("/x/../settings", Role::Teacher));
        assert!(!resolver.has_access("/../../settings", Role::Teacher));
    }

    #[test]
    fn encoded_segments_cannot_skip_specific_rules() {
        let resolver = AccessResolver::new(crate::school::permission_table());
        assert!(!resolver.has_access("/payments/%6Eew", Role::Agent));
        assert!(!resolver.has_access("/payments%2Fnew", Role::Agent));
        assert!(!resolver.has_access("/x/%2E%2E/settings", Role::Teacher));

        let decision = resolver.decide("/payments/%6Eew", Role::Agent);
        assert_eq!(decision.path.to_string(), "/payments/new");
    }

    #[test]
    fn empty_role_set_makes_path_unreachable() {
        let table = PermissionTable::default()
            .rule("/", Role::ALL)
            .rule("/archive", []);
        let resolver = AccessResolver::new(table);

        for role in Role::ALL {
            assert!(!resolver.has_access("/archive", role));
            assert!(!resolver.has_access("/archive/2019", role));
            assert!(resolver.has_access("/", role));
        }
    }

    #[test]
    fn payments_scenario() {
        let resolver = AccessResolver::new(payments_table());
        assert!(!resolver.has_access("/payments/new", Role::Agent));
        assert!(resolver.has_access("/payments/new", Role::Accountant));
        assert!(resolver.has_access("/payments", Role::Agent));
        assert!(!resolver.has_access("/payments", Role::Teacher));
    }

    #[test]
    fn decision_reports_matched_rule() {
        let resolver = AccessResolver::new(payments_table());
        let decision = resolver.decide("/payments/new?student=4", Role::Agent);

        assert!(!decision.granted);
        assert_eq!(decision.path, RoutePath::parse("/payments/new"));
        let DecisionBasis::Rule(rule) = decision.basis else {
            panic!("expected a matched rule");
        };
        assert_eq!(rule.index, 2);
        assert_eq!(rule.prefix.to_string(), "/payments/new");
    }

    #[test]
    fn check_fallback_accepts_root_open_to_all() {
        let resolver = AccessResolver::new(payments_table());
        assert!(resolver.check_fallback(&RoutePath::root()).is_ok());
    }

    #[test]
    fn check_fallback_names_denied_roles() {
        let resolver = AccessResolver::new(payments_table());
        let err = resolver
            .check_fallback(&RoutePath::parse("/payments"))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvariantViolation(
                "fallback path /payments is denied for roles: teacher".to_string()
            )
        );
    }

    #[test]
    fn check_fallback_respects_deny_policy() {
        let resolver = AccessResolver::new(PermissionTable::default())
            .with_unmatched_policy(UnmatchedPolicy::Deny);
        assert!(resolver.check_fallback(&RoutePath::root()).is_err());
    }

    #[test]
    fn unmatched_policy_parses() {
        assert_eq!("Deny".parse::<UnmatchedPolicy>().unwrap(), UnmatchedPolicy::Deny);
        assert_eq!(" allow".parse::<UnmatchedPolicy>().unwrap(), UnmatchedPolicy::Allow);
        assert!("maybe".parse::<UnmatchedPolicy>().is_err());
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        fn role() -> impl Strategy<Value = Role> {
            prop::sample::select(Role::ALL.to_vec())
        }

        fn roles() -> impl Strategy<Value = Vec<Role>> {
            prop::collection::vec(role(), 0..4)
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: with no covering rule, every role is allowed.
            #[test]
            fn unmatched_paths_default_allow(
                tail in "(/[a-z0-9]{1,6}){0,3}",
                r in role(),
            ) {
                let table = PermissionTable::default()
                    .rule("/classes", [Role::Admin])
                    .rule("/payments", [Role::Accountant]);
                let resolver = AccessResolver::new(table);
                let path = format!("/library{tail}");
                prop_assert!(resolver.has_access(&path, r));
            }

            /// Property: the longest matching prefix decides regardless of declaration order.
            #[test]
            fn longest_prefix_decides(
                general in roles(),
                specific in roles(),
                tail in "(/[a-z0-9]{1,6}){0,2}",
                r in role(),
                reversed in any::<bool>(),
            ) {
                let mut rules = vec![
                    PermissionRule::new("/classes", general),
                    PermissionRule::new("/classes/new", specific.clone()),
                ];
                if reversed {
                    rules.reverse();
                }
                let resolver = AccessResolver::new(PermissionTable::new(rules));
                let path = format!("/classes/new{tail}");
                prop_assert_eq!(resolver.has_access(&path, r), specific.contains(&r));
            }

            /// Property: `/students<suffix>` never follows a `/students` rule.
            #[test]
            fn sibling_names_do_not_match(suffix in "[a-z0-9]{1,6}", r in role()) {
                let table = PermissionTable::default().rule("/students", []);
                let resolver = AccessResolver::new(table);
                let path = format!("/students{suffix}");
                prop_assert!(resolver.has_access(&path, r));
            }

            /// Property: decisions are pure.
            #[test]
            fn decisions_are_idempotent(path in "(/[a-z]{1,8}){0,4}", r in role()) {
                let resolver = AccessResolver::new(crate::school::permission_table());
                prop_assert_eq!(resolver.decide(&path, r), resolver.decide(&path, r));
            }
        }
    }
}
