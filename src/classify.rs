// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Channel role classification.
//!
//! Roles are assigned from the channel catalogue with the ordered rule table
//! [`RULES`]. Each rule is a conjunction of an optional topic substring and an
//! optional normalized message type. For every role the first channel in
//! catalogue order that satisfies its rule wins; later matches are ignored.
//!
//! The actuator families do not map to a single channel. Their rule fixes a
//! topic prefix (everything up to and including the literal `thrusters` or
//! `fins`) from which the per-index channel names are derived.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use tracing::info;

use crate::encoding::{self, ODOMETRY, TRAJECTORY_POINT, WRENCH_STAMPED};
use crate::io::ChannelInfo;

/// Number of actuator indices probed per family.
pub const MAX_ACTUATORS: usize = 16;

/// Semantic role of a recorded channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    TrackingError,
    ReferenceTrajectory,
    AchievedOdometry,
    AmbientCurrent,
    ActuatorManagerWrench,
    DisturbanceWrench,
    /// Topic prefix of the thruster family
    ThrusterPrefix,
    /// Topic prefix of the fin family
    FinPrefix,
}

impl Role {
    /// Whether the role resolves to a topic prefix rather than a channel.
    pub fn is_prefix(&self) -> bool {
        matches!(self, Role::ThrusterPrefix | Role::FinPrefix)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::TrackingError => "tracking_error",
            Role::ReferenceTrajectory => "reference_trajectory",
            Role::AchievedOdometry => "achieved_odometry",
            Role::AmbientCurrent => "ambient_current",
            Role::ActuatorManagerWrench => "actuator_manager_wrench",
            Role::DisturbanceWrench => "disturbance_wrench",
            Role::ThrusterPrefix => "thruster_prefix",
            Role::FinPrefix => "fin_prefix",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One classification rule.
#[derive(Debug, Clone, Copy)]
pub struct RoleRule {
    pub role: Role,
    /// Required substring of the topic name
    pub name_contains: Option<&'static str>,
    /// Required normalized message type
    pub type_is: Option<&'static str>,
}

impl RoleRule {
    const fn new(role: Role, name_contains: Option<&'static str>, type_is: Option<&'static str>) -> Self {
        Self {
            role,
            name_contains,
            type_is,
        }
    }

    /// Test a channel against this rule.
    pub fn matches(&self, channel: &ChannelInfo) -> bool {
        let name_ok = self
            .name_contains
            .is_none_or(|needle| channel.topic.contains(needle));
        let type_ok = self
            .type_is
            .is_none_or(|expected| encoding::type_matches(&channel.message_type, expected));
        name_ok && type_ok
    }

    /// Value recorded for a matching channel: the topic, or the family
    /// prefix for prefix roles.
    fn resolve(&self, topic: &str) -> String {
        match (self.role.is_prefix(), self.name_contains) {
            (true, Some(literal)) => match topic.find(literal) {
                Some(pos) => topic[..pos + literal.len()].to_string(),
                None => topic.to_string(),
            },
            _ => topic.to_string(),
        }
    }
}

/// Classification rules in precedence order.
pub const RULES: &[RoleRule] = &[
    RoleRule::new(Role::TrackingError, Some("error"), Some(TRAJECTORY_POINT)),
    RoleRule::new(Role::ReferenceTrajectory, Some("reference"), None),
    RoleRule::new(Role::AchievedOdometry, None, Some(ODOMETRY)),
    RoleRule::new(Role::AmbientCurrent, Some("current_velocity"), None),
    RoleRule::new(Role::ActuatorManagerWrench, Some("thruster_manager"), Some(WRENCH_STAMPED)),
    RoleRule::new(Role::DisturbanceWrench, Some("wrench_perturbation"), None),
    RoleRule::new(Role::ThrusterPrefix, Some("thrusters"), None),
    RoleRule::new(Role::FinPrefix, Some("fins"), None),
];

/// Result of classifying a channel catalogue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RoleAssignment {
    roles: BTreeMap<Role, String>,
}

impl RoleAssignment {
    /// Channel (or prefix) assigned to a role.
    pub fn get(&self, role: Role) -> Option<&str> {
        self.roles.get(&role).map(String::as_str)
    }

    pub fn contains(&self, role: Role) -> bool {
        self.roles.contains_key(&role)
    }

    pub fn thruster_prefix(&self) -> Option<&str> {
        self.get(Role::ThrusterPrefix)
    }

    pub fn fin_prefix(&self) -> Option<&str> {
        self.get(Role::FinPrefix)
    }

    /// Assigned roles in role order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        self.roles.iter().map(|(r, c)| (*r, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}

/// Channel name of one actuator signal, e.g. `/rexrov/thrusters/3/thrust`.
pub fn indexed_channel(prefix: &str, index: usize, suffix: &str) -> String {
    format!("{prefix}/{index}/{suffix}")
}

/// Assign roles to the channels of a catalogue.
///
/// Pure and deterministic: the result only depends on the catalogue content
/// and order.
pub fn classify(catalogue: &[ChannelInfo]) -> RoleAssignment {
    let mut assignment = RoleAssignment::default();

    for channel in catalogue {
        for rule in RULES {
            if assignment.roles.contains_key(&rule.role) || !rule.matches(channel) {
                continue;
            }
            let value = rule.resolve(&channel.topic);
            info!(
                context = "classify",
                role = %rule.role,
                channel = %channel.topic,
                value = %value,
                "Role assigned"
            );
            assignment.roles.insert(rule.role, value);
        }
    }

    assignment
}
