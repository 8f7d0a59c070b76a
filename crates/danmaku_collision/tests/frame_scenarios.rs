//! End-to-end frame scenarios
//!
//! Plays the role of the game-object lifecycle layer: registers
//! intersections the way shots/players/spells would, runs full passes,
//! and checks the delivered pairs.

use danmaku_collision::prelude::*;
use danmaku_collision::ExhaustiveIndex;

/// Game-object layer stand-in: a flat table of owners with liveness flags
struct ObjectTable {
    alive: Vec<bool>,
    /// normalized (low, high) owner index per delivered pair
    pairs: Vec<(u32, u32)>,
}

impl ObjectTable {
    fn new(count: usize) -> Self {
        Self {
            alive: vec![true; count],
            pairs: Vec::new(),
        }
    }

    fn sorted_pairs(&self) -> Vec<(u32, u32)> {
        let mut pairs = self.pairs.clone();
        pairs.sort_unstable();
        pairs.dedup();
        pairs
    }
}

impl CollisionWorld for ObjectTable {
    fn is_alive(&self, owner: OwnerId) -> bool {
        self.alive.get(owner.index as usize).copied().unwrap_or(false)
    }

    fn on_collision(&mut self, me: &HitContext, other: &HitContext) {
        let (a, b) = (me.owner.index, other.owner.index);
        self.pairs.push((a.min(b), a.max(b)));
    }
}

fn shot(x: f32, y: f32, r: f32, owner: u32) -> Intersection {
    Intersection::new(
        Shape::circle(x, y, r),
        CollisionGroup::EnemyShot,
        OwnerId::new(owner, 0),
    )
}

/// Deterministic scatter; no external RNG needed for a fixed fixture
struct Lcg(u32);

impl Lcg {
    fn next_f32(&mut self) -> f32 {
        self.0 = self.0.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.0 >> 8) as f32 / 16_777_216.0
    }
}

#[test]
fn enemy_shot_hits_player() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    detector.add(shot(0.0, 0.0, 5.0, 0)).unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(3.0, 0.0, 5.0),
            CollisionGroup::Player,
            OwnerId::new(1, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(2);
    detector.test_all_collision(&mut objects);
    assert_eq!(objects.sorted_pairs(), vec![(0, 1)]);
}

#[test]
fn enemy_shot_misses_distant_player() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    detector.add(shot(0.0, 0.0, 5.0, 0)).unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(20.0, 0.0, 5.0),
            CollisionGroup::Player,
            OwnerId::new(1, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(2);
    detector.test_all_collision(&mut objects);
    assert!(objects.pairs.is_empty());
}

#[test]
fn grid_matches_brute_force_over_scattered_shots() {
    // 1000 enemy shots over a 400x400 field plus one player circle;
    // the grid must report exactly what the exhaustive index reports
    let mut scatter = Lcg(0xDEAD_BEEF);
    let mut shots = Vec::new();
    for owner in 0..1000 {
        let x = scatter.next_f32() * 400.0 - 200.0;
        let y = scatter.next_f32() * 400.0 - 200.0;
        shots.push(shot(x, y, 4.0, owner));
    }
    let player = Intersection::new(
        Shape::circle(0.0, 0.0, 8.0),
        CollisionGroup::Player,
        OwnerId::new(1000, 0),
    );

    let run = |mut detector: CollisionDetector| {
        for s in &shots {
            detector.add(*s).unwrap();
        }
        detector.add(player).unwrap();
        let mut objects = ObjectTable::new(1001);
        detector.test_all_collision(&mut objects);
        objects.sorted_pairs()
    };

    let grid_pairs = run(CollisionDetector::new(
        CollisionMatrix::standard(),
        GridConfig::default(),
    ));
    let brute_pairs = run(CollisionDetector::with_index(
        CollisionMatrix::standard(),
        Box::new(ExhaustiveIndex::new()),
    ));
    assert_eq!(grid_pairs, brute_pairs);

    // and both agree with a direct n^2 sweep over the same geometry
    let player_shape = Shape::circle(0.0, 0.0, 8.0);
    let mut reference: Vec<(u32, u32)> = shots
        .iter()
        .filter(|s| s.shape.overlaps(&player_shape))
        .map(|s| (s.owner.index, 1000))
        .collect();
    reference.sort_unstable();
    assert_eq!(grid_pairs, reference);
}

#[test]
fn temporary_spell_region_lasts_exactly_one_pass() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    detector.add(shot(10.0, 0.0, 4.0, 0)).unwrap();

    // one-shot "erase shots here" region, registered via the scripted API
    detector
        .add_temporary(Intersection::new(
            Shape::circle(0.0, 0.0, 30.0),
            CollisionGroup::Spell,
            OwnerId::new(1, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(2);
    detector.test_all_collision(&mut objects);
    assert_eq!(objects.sorted_pairs(), vec![(0, 1)]);

    detector.test_all_collision(&mut objects);
    // no new pairs: the region is gone even though the shot remains
    assert_eq!(objects.sorted_pairs(), vec![(0, 1)]);
    assert_eq!(detector.len(), 1);
}

#[test]
fn graze_and_hit_are_independent_groups() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    // shot passes through the graze ring but not the hurtbox
    detector.add(shot(0.0, 0.0, 3.0, 0)).unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(10.0, 0.0, 2.0),
            CollisionGroup::Player,
            OwnerId::new(1, 0),
        ))
        .unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(10.0, 0.0, 8.0),
            CollisionGroup::PlayerGraze,
            OwnerId::new(2, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(3);
    detector.test_all_collision(&mut objects);
    assert_eq!(objects.sorted_pairs(), vec![(0, 2)]);
}

#[test]
fn laser_sweeps_the_player_but_spares_the_distant_one() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    detector
        .add(Intersection::new(
            Shape::capsule(-200.0, 0.0, 200.0, 0.0, 6.0),
            CollisionGroup::EnemyShot,
            OwnerId::new(0, 0),
        ))
        .unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(150.0, 2.0, 3.0),
            CollisionGroup::Player,
            OwnerId::new(1, 0),
        ))
        .unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(150.0, 40.0, 3.0),
            CollisionGroup::Player,
            OwnerId::new(2, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(3);
    detector.test_all_collision(&mut objects);
    assert_eq!(objects.sorted_pairs(), vec![(0, 1)]);
}

#[test]
fn scripted_area_query_feeds_shot_deletion() {
    let mut detector = CollisionDetector::new(CollisionMatrix::standard(), GridConfig::default());
    let mut keys = Vec::new();
    for owner in 0..10 {
        let key = detector.add(shot(owner as f32 * 10.0, 0.0, 3.0, owner)).unwrap();
        keys.push(key);
    }

    // "delete all enemy shots within this circle"
    let doomed = detector.query_circle(0.0, 0.0, 25.0, GroupMask::of(&[CollisionGroup::EnemyShot]));
    let mut owners: Vec<u32> = doomed.iter().map(|hit| hit.owner.index).collect();
    owners.sort_unstable();
    assert_eq!(owners, vec![0, 1, 2]);

    for hit in &doomed {
        detector.remove(hit.key);
    }
    assert_eq!(detector.len(), 7);

    // the removed shots no longer collide with anything
    let remaining = detector.query_circle(0.0, 0.0, 25.0, GroupMask::ALL);
    assert!(remaining.is_empty());
}

#[test]
fn config_driven_detector_behaves_like_standard() {
    let text = r#"
        rules = [["EnemyShot", "Player"]]

        [grid]
        cell_size = 16.0
    "#;
    let config: CollisionConfig = toml::from_str(text).unwrap();
    let mut detector = CollisionDetector::from_config(&config);

    detector.add(shot(0.0, 0.0, 5.0, 0)).unwrap();
    detector
        .add(Intersection::new(
            Shape::circle(3.0, 0.0, 5.0),
            CollisionGroup::Player,
            OwnerId::new(1, 0),
        ))
        .unwrap();
    // graze is not in the custom rule list, so this ring never matches
    detector
        .add(Intersection::new(
            Shape::circle(3.0, 0.0, 20.0),
            CollisionGroup::PlayerGraze,
            OwnerId::new(2, 0),
        ))
        .unwrap();

    let mut objects = ObjectTable::new(3);
    detector.test_all_collision(&mut objects);
    assert_eq!(objects.sorted_pairs(), vec![(0, 1)]);
}
