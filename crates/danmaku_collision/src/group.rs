//! Collision groups and the group compatibility matrix
//!
//! Every registered shape carries a [`CollisionGroup`] tagging *why* it
//! exists (enemy shot, player graze ring, item magnet, ...). The
//! [`CollisionMatrix`] decides which group pairs are eligible to collide
//! at all; it is consulted before any narrow-phase math runs, so an
//! ineligible pair costs one bit test. New groups collide with nothing
//! until a rule explicitly enables them.

use serde::{Deserialize, Serialize};

/// Why a registered shape exists
///
/// A closed enumeration; the matrix is sized by [`CollisionGroup::COUNT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionGroup {
    /// Shot fired by an enemy, lethal to the player
    EnemyShot,
    /// Player shot that can erase enemy shots on contact
    PlayerEraseShot,
    /// Player shot that damages but does not erase
    PlayerNonEraseShot,
    /// The player's lethal hurtbox
    Player,
    /// The player's graze ring (near-miss scoring)
    PlayerGraze,
    /// Enemy hurtbox receptive to player shots
    EnemyToShot,
    /// Enemy body lethal to the player on contact
    EnemyToPlayer,
    /// Spell / bomb effect region
    Spell,
    /// Player-owned item magnet region
    PlayerToItem,
    /// Collectible item
    Item,
}

impl CollisionGroup {
    /// Number of collision groups
    pub const COUNT: usize = 10;

    /// All groups, in matrix index order
    pub const ALL: [CollisionGroup; Self::COUNT] = [
        Self::EnemyShot,
        Self::PlayerEraseShot,
        Self::PlayerNonEraseShot,
        Self::Player,
        Self::PlayerGraze,
        Self::EnemyToShot,
        Self::EnemyToPlayer,
        Self::Spell,
        Self::PlayerToItem,
        Self::Item,
    ];

    /// Matrix row / bit index for this group
    pub fn index(self) -> usize {
        self as usize
    }

    fn bit(self) -> u16 {
        1 << self.index()
    }
}

/// Bit mask over collision groups, used to filter ad-hoc queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupMask(u16);

impl GroupMask {
    /// Matches no group
    pub const NONE: GroupMask = GroupMask(0);

    /// Matches every group
    pub const ALL: GroupMask = GroupMask((1 << CollisionGroup::COUNT) - 1);

    /// Build a mask matching exactly the given groups
    pub fn of(groups: &[CollisionGroup]) -> Self {
        Self(groups.iter().fold(0, |acc, g| acc | g.bit()))
    }

    /// Check whether a group is in the mask
    pub fn contains(self, group: CollisionGroup) -> bool {
        self.0 & group.bit() != 0
    }
}

impl From<CollisionGroup> for GroupMask {
    fn from(group: CollisionGroup) -> Self {
        Self(group.bit())
    }
}

/// The standard bullet-hell rule table
///
/// Listed one direction per pair; [`CollisionMatrix::from_rules`] mirrors
/// each entry.
pub const STANDARD_RULES: &[(CollisionGroup, CollisionGroup)] = &[
    // Enemy fire against the player side
    (CollisionGroup::EnemyShot, CollisionGroup::Player),
    (CollisionGroup::EnemyShot, CollisionGroup::PlayerGraze),
    (CollisionGroup::EnemyToPlayer, CollisionGroup::Player),
    (CollisionGroup::EnemyToPlayer, CollisionGroup::PlayerGraze),
    // Player fire against enemy hurtboxes
    (CollisionGroup::PlayerEraseShot, CollisionGroup::EnemyToShot),
    (CollisionGroup::PlayerNonEraseShot, CollisionGroup::EnemyToShot),
    // Shot erasure
    (CollisionGroup::PlayerEraseShot, CollisionGroup::EnemyShot),
    (CollisionGroup::Spell, CollisionGroup::EnemyShot),
    (CollisionGroup::Spell, CollisionGroup::EnemyToShot),
    // Item flow
    (CollisionGroup::Item, CollisionGroup::Player),
    (CollisionGroup::Item, CollisionGroup::PlayerToItem),
];

/// Symmetric boolean matrix over group pairs
///
/// Built once at startup and read-only afterwards; `can_collide` is a
/// single bit test. Stored as one bit row per group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionMatrix {
    rows: [u16; CollisionGroup::COUNT],
}

impl CollisionMatrix {
    /// Matrix with every pair disabled
    pub fn empty() -> Self {
        Self {
            rows: [0; CollisionGroup::COUNT],
        }
    }

    /// Build a matrix from a rule table, mirroring each pair
    pub fn from_rules(rules: &[(CollisionGroup, CollisionGroup)]) -> Self {
        let mut matrix = Self::empty();
        for &(a, b) in rules {
            matrix.enable(a, b);
        }
        matrix
    }

    /// The standard bullet-hell rule set ([`STANDARD_RULES`])
    pub fn standard() -> Self {
        Self::from_rules(STANDARD_RULES)
    }

    /// Enable collision between two groups, in both orderings
    pub fn enable(&mut self, a: CollisionGroup, b: CollisionGroup) {
        self.rows[a.index()] |= b.bit();
        self.rows[b.index()] |= a.bit();
    }

    /// Can shapes tagged with these groups ever collide?
    pub fn can_collide(&self, a: CollisionGroup, b: CollisionGroup) -> bool {
        self.rows[a.index()] & b.bit() != 0
    }
}
