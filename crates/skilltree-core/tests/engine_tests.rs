use skilltree_core::{
    apply_experience, exp_required_for_skill_level, Achievement, Catalog, Category,
    DefaultCatalog, InvalidReason, ProgressionEngine, ProgressionError, Rarity, SkillNode,
    UnlockCondition, UnlockSweep,
};

#[test]
fn test_level_up_carry_over() {
    let mut state = DefaultCatalog.initial_state();
    state.skills.get_mut("java").unwrap().current_exp = 90;

    let outcome = apply_experience(&state, "java", 25).unwrap();
    let java = &outcome.state.skills["java"];

    assert_eq!(java.level, 2);
    assert_eq!(java.current_exp, 15);
    assert_eq!(java.max_exp, exp_required_for_skill_level(2));
    assert_eq!(java.max_exp, 120);
}

#[test]
fn test_total_exp_counts_new_thresholds() {
    let state = DefaultCatalog.initial_state();

    let outcome = apply_experience(&state, "java", 100).unwrap();

    // The threshold of the level just reached, not the 100 awarded.
    assert_eq!(outcome.state.total_exp, 120);
    assert_eq!(outcome.exp_gained, 120);
    assert_eq!(outcome.state.player_level, 2);
}

#[test]
fn test_prerequisite_gating() {
    let state = DefaultCatalog.initial_state();

    let outcome = apply_experience(&state, "java", 80).unwrap();
    assert_eq!(outcome.state.skills["java"].level, 1);
    assert!(!outcome.state.skills["spring-boot"].unlocked);
    assert!(outcome.unlocked_skills.is_empty());

    let outcome = apply_experience(&outcome.state, "java", 20).unwrap();
    assert_eq!(outcome.state.skills["java"].level, 2);
    assert_eq!(
        outcome.unlocked_skills,
        vec!["spring-cloud", "spring-boot", "juc", "jvm"]
    );
    for id in ["spring-cloud", "spring-boot", "juc", "jvm"] {
        assert!(outcome.state.skills[id].unlocked, "{id}");
    }

    // Needs spring-boot at level 2 as well.
    assert!(!outcome.state.skills["mybatis-plus"].unlocked);
    assert!(!outcome.state.skills["k8s"].unlocked);
}

#[test]
fn test_second_prerequisite_unlocks_dependent() {
    let state = DefaultCatalog.initial_state();
    let state = apply_experience(&state, "java", 100).unwrap().state;

    let outcome = apply_experience(&state, "spring-boot", 100).unwrap();
    assert_eq!(outcome.unlocked_skills, vec!["mybatis-plus"]);
}

#[test]
fn test_first_boost_achievement() {
    let state = DefaultCatalog.initial_state();

    let outcome = apply_experience(&state, "docker", 100).unwrap();

    assert_eq!(outcome.unlocked_achievements, vec!["first-boost"]);
    assert_eq!(outcome.state.unlocked_achievements, vec!["first-boost"]);
    assert!(outcome.state.achievements["first-boost"].unlocked);
    assert_eq!(outcome.unlocked_skills, vec!["k8s"]);

    // Already unlocked, so never reported again.
    let outcome = apply_experience(&outcome.state, "git", 100).unwrap();
    assert!(outcome.unlocked_achievements.is_empty());
    assert_eq!(outcome.state.unlocked_achievements, vec!["first-boost"]);
}

#[test]
fn test_achievements_unlock_in_catalog_order() {
    let state = DefaultCatalog.initial_state();

    // 100 + 120 + 144 + 172 takes java from level 1 to 5.
    let outcome = apply_experience(&state, "java", 536).unwrap();
    assert_eq!(outcome.state.skills["java"].level, 5);
    assert_eq!(outcome.state.skills["java"].current_exp, 0);
    assert_eq!(outcome.state.total_exp, 120 + 144 + 172 + 207);
    assert_eq!(outcome.state.player_level, 5);
    assert_eq!(outcome.unlocked_achievements, vec!["first-boost", "level-5"]);

    let outcome = apply_experience(&outcome.state, "golang", 536).unwrap();
    assert_eq!(outcome.state.player_level, 8);
    assert_eq!(outcome.unlocked_achievements, vec!["polyglot"]);
    assert_eq!(
        outcome.state.unlocked_achievements,
        vec!["first-boost", "level-5", "polyglot"]
    );
}

#[test]
fn test_unknown_skill_is_noop() {
    let state = DefaultCatalog.initial_state();
    let before = state.clone();

    let err = apply_experience(&state, "nonexistent-id", 10).unwrap_err();

    assert_eq!(
        err,
        ProgressionError::InvalidOperation {
            skill_id: "nonexistent-id".to_string(),
            reason: InvalidReason::UnknownSkill,
        }
    );
    assert_eq!(state, before);
}

#[test]
fn test_locked_skill_is_noop() {
    let state = DefaultCatalog.initial_state();
    let before = state.clone();

    let err = apply_experience(&state, "k8s", 50).unwrap_err();

    assert!(matches!(
        err,
        ProgressionError::InvalidOperation {
            reason: InvalidReason::LockedSkill,
            ..
        }
    ));
    assert_eq!(state, before);
}

/// a -> b -> c, where b is locked but already at level 2.
struct ChainCatalog;

fn chain_node(id: &str, prerequisite: Option<&str>, unlocked: bool, level: u32) -> SkillNode {
    SkillNode {
        id: id.to_string(),
        name: id.to_uppercase(),
        category: Category::Tools,
        level,
        current_exp: 0,
        max_exp: exp_required_for_skill_level(level),
        icon: String::new(),
        color: String::new(),
        description: String::new(),
        prerequisites: prerequisite.map(|p| vec![p.to_string()]),
        unlocked,
    }
}

impl Catalog for ChainCatalog {
    fn skills(&self) -> Vec<SkillNode> {
        vec![
            chain_node("a", None, true, 1),
            chain_node("b", Some("a"), false, 2),
            chain_node("c", Some("b"), false, 1),
        ]
    }

    fn achievements(&self) -> Vec<Achievement> {
        vec![Achievement::new(
            "any-two",
            "Any Two",
            "",
            "",
            Rarity::Common,
            UnlockCondition::AnySkillAtLeast { level: 2 },
        )]
    }
}

#[test]
fn test_single_pass_sweep_stops_after_one_pass() {
    let state = ChainCatalog.initial_state();
    let engine = ProgressionEngine::new(UnlockSweep::SinglePass);

    let outcome = engine.apply_experience(&state, "a", 100).unwrap();

    assert_eq!(outcome.unlocked_skills, vec!["b"]);
    assert!(!outcome.state.skills["c"].unlocked);

    // The next call picks up what the previous pass made eligible.
    let outcome = engine.apply_experience(&outcome.state, "a", 1).unwrap();
    assert_eq!(outcome.unlocked_skills, vec!["c"]);
}

#[test]
fn test_fixed_point_sweep_cascades() {
    let state = ChainCatalog.initial_state();
    let engine = ProgressionEngine::new(UnlockSweep::FixedPoint);

    let outcome = engine.apply_experience(&state, "a", 100).unwrap();

    assert_eq!(outcome.unlocked_skills, vec!["b", "c"]);
    assert!(outcome.state.skills["c"].unlocked);
}

#[test]
fn test_sweep_modes_agree_on_default_catalog() {
    let single = ProgressionEngine::new(UnlockSweep::SinglePass);
    let fixed = ProgressionEngine::new(UnlockSweep::FixedPoint);
    let calls = [("java", 300), ("spring-boot", 150), ("docker", 500), ("k8s", 40)];

    let mut a = DefaultCatalog.initial_state();
    let mut b = DefaultCatalog.initial_state();
    for (skill, amount) in calls {
        a = single.apply_experience(&a, skill, amount).unwrap().state;
        b = fixed.apply_experience(&b, skill, amount).unwrap().state;
    }

    assert_eq!(a, b);
}
