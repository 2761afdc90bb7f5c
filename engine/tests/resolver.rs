use surge_engine::{resolve, DieDescriptor, HealthPool, ResourcePool, SpendRequest, SurgeError};

fn noop_log(_: String) {}

fn dice_seq(seq: &[u32]) -> impl FnMut(u32) -> u32 {
    let mut i = 0usize;
    let values = seq.to_vec();
    move |_faces| {
        let result = values[i % values.len()];
        i += 1;
        result
    }
}

fn pool(total: u32, used: u32) -> ResourcePool {
    ResourcePool {
        id: "cls-fighter".into(),
        name: "Fighter".into(),
        total,
        used,
        die: DieDescriptor::new(8),
    }
}

#[test]
fn over_request_is_clamped_and_overheal_capped() {
    let res = resolve(
        &pool(4, 1),
        DieDescriptor::new(8),
        SpendRequest { count: 5, modifier_per_die: 2 },
        &HealthPool::new(10, 20),
        dice_seq(&[4, 6, 2]),
        noop_log,
    )
    .unwrap();
    assert_eq!(res.spend_count, 3);
    assert_eq!(res.rolls, vec![4, 6, 2]);
    assert_eq!(res.dice_total, 12);
    assert_eq!(res.bonus_total, 6);
    assert_eq!(res.raw_healing, 18);
    assert_eq!(res.applied_healing, 10);
    assert_eq!(res.before, 10);
    assert_eq!(res.after, 20);
    assert_eq!(res.pool_used_after, 4);
    assert_eq!(res.formula(), "3d8 + 6");
}

#[test]
fn exhausted_pool_fails_before_rolling() {
    let mut rolled = false;
    let err = resolve(
        &pool(2, 2),
        DieDescriptor::new(8),
        SpendRequest { count: 1, modifier_per_die: 0 },
        &HealthPool::new(1, 10),
        |_| {
            rolled = true;
            1
        },
        noop_log,
    )
    .unwrap_err();
    assert_eq!(err, SurgeError::NoResourceAvailable);
    assert!(!rolled);
}

#[test]
fn full_health_still_spends_dice() {
    let res = resolve(
        &pool(3, 0),
        DieDescriptor::new(10),
        SpendRequest { count: 2, modifier_per_die: 3 },
        &HealthPool::new(25, 25),
        dice_seq(&[10, 9]),
        noop_log,
    )
    .unwrap();
    assert_eq!(res.raw_healing, 25);
    assert_eq!(res.applied_healing, 0);
    assert_eq!(res.after, 25);
    assert_eq!(res.pool_used_after, 2);
}

#[test]
fn negative_modifier_can_zero_out_healing() {
    let res = resolve(
        &pool(5, 0),
        DieDescriptor::new(8),
        SpendRequest { count: 2, modifier_per_die: -1 },
        &HealthPool::new(4, 20),
        dice_seq(&[1, 1]),
        noop_log,
    )
    .unwrap();
    assert_eq!(res.dice_total, 2);
    assert_eq!(res.bonus_total, -2);
    assert_eq!(res.raw_healing, 0);
    assert_eq!(res.applied_healing, 0);
    assert_eq!(res.formula(), "2d8 - 2");
}

#[test]
fn negative_raw_healing_applies_nothing() {
    let res = resolve(
        &pool(5, 0),
        DieDescriptor::new(4),
        SpendRequest { count: 1, modifier_per_die: -3 },
        &HealthPool::new(4, 20),
        dice_seq(&[1]),
        noop_log,
    )
    .unwrap();
    assert_eq!(res.raw_healing, -2);
    assert_eq!(res.applied_healing, 0);
    assert_eq!(res.after, 4);
}

#[test]
fn zero_or_negative_request_spends_one() {
    for count in [0, -3] {
        let res = resolve(
            &pool(3, 0),
            DieDescriptor::new(6),
            SpendRequest { count, modifier_per_die: 0 },
            &HealthPool::new(1, 30),
            dice_seq(&[5]),
            noop_log,
        )
        .unwrap();
        assert_eq!(res.spend_count, 1);
        assert_eq!(res.pool_used_after, 1);
    }
}

#[test]
fn bad_preconditions_are_invalid_input() {
    let faceless = resolve(
        &pool(3, 0),
        DieDescriptor::new(0),
        SpendRequest { count: 1, modifier_per_die: 0 },
        &HealthPool::new(1, 10),
        dice_seq(&[1]),
        noop_log,
    );
    assert!(matches!(faceless, Err(SurgeError::InvalidInput(_))));

    let overfull = resolve(
        &pool(3, 0),
        DieDescriptor::new(8),
        SpendRequest { count: 1, modifier_per_die: 0 },
        &HealthPool::new(12, 10),
        dice_seq(&[1]),
        noop_log,
    );
    assert!(matches!(overfull, Err(SurgeError::InvalidInput(_))));
}

#[test]
fn resolving_twice_consumes_twice() {
    let mut p = pool(4, 0);
    let mut hp = HealthPool::new(1, 40);
    for expected_used in [2, 4] {
        let res = resolve(
            &p,
            p.die,
            SpendRequest { count: 2, modifier_per_die: 1 },
            &hp,
            dice_seq(&[3]),
            noop_log,
        )
        .unwrap();
        p.used = res.pool_used_after;
        hp.value = res.after;
        assert_eq!(p.used, expected_used);
    }
    assert_eq!(hp.value, 1 + 8 + 8);
}

#[test]
fn logs_clamped_request() {
    let mut seen = vec![];
    resolve(
        &pool(2, 1),
        DieDescriptor::new(8),
        SpendRequest { count: 3, modifier_per_die: 0 },
        &HealthPool::new(1, 10),
        dice_seq(&[2]),
        |s| seen.push(s),
    )
    .unwrap();
    assert!(seen[0].contains("asked for 3 dice, only 1 left"));
    assert!(seen.iter().any(|l| l.starts_with("[HEAL][Fighter]")));
}

#[test]
fn huge_spend_and_modifier_do_not_overflow() {
    let res = resolve(
        &pool(100_000, 0),
        DieDescriptor::new(8),
        SpendRequest { count: 100_000, modifier_per_die: 30_000 },
        &HealthPool::new(1, 10),
        |_| 1,
        noop_log,
    )
    .unwrap();
    assert_eq!(res.spend_count, 100_000);
    assert_eq!(res.dice_total, 100_000);
    assert_eq!(res.bonus_total, 3_000_000_000);
    assert_eq!(res.raw_healing, 3_000_100_000);
    assert_eq!(res.applied_healing, 9);
    assert_eq!(res.after, 10);
}

#[test]
fn huge_negative_modifier_heals_nothing() {
    let res = resolve(
        &pool(100_000, 0),
        DieDescriptor::new(8),
        SpendRequest { count: 100_000, modifier_per_die: i32::MIN },
        &HealthPool::new(1, 10),
        |_| 8,
        noop_log,
    )
    .unwrap();
    assert!(res.raw_healing < 0);
    assert_eq!(res.applied_healing, 0);
}

#[test]
fn rolls_above_i32_keep_their_value() {
    let res = resolve(
        &pool(1, 0),
        DieDescriptor::new(4_000_000_000),
        SpendRequest { count: 1, modifier_per_die: 0 },
        &HealthPool::new(1, 10),
        |_| 3_000_000_000,
        noop_log,
    )
    .unwrap();
    assert_eq!(res.dice_total, 3_000_000_000);
    assert_eq!(res.raw_healing, 3_000_000_000);
    assert_eq!(res.applied_healing, 9);
}
