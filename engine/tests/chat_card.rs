use surge_engine::chat::ChatCard;
use surge_engine::{DieDescriptor, HealingResult};

fn fighter_surge() -> HealingResult {
    HealingResult {
        spend_count: 2,
        die: DieDescriptor::new(10),
        rolls: vec![7, 3],
        dice_total: 10,
        bonus_total: 4,
        raw_healing: 14,
        applied_healing: 14,
        before: 10,
        after: 24,
        max: 38,
        pool_used_after: 3,
    }
}

#[test]
fn surge_card_text() {
    let card = ChatCard::for_surge("Sera Vance", &fighter_surge());
    assert_eq!(card.speaker, "Sera Vance");
    assert_eq!(card.formula, "2d10 + 4");
    insta::assert_snapshot!("surge_card", card.to_string().trim_end().to_string());
}

#[test]
fn wasted_healing_shows_zero_applied() {
    let mut res = fighter_surge();
    res.before = 38;
    res.after = 38;
    res.applied_healing = 0;
    let card = ChatCard::for_surge("Sera Vance", &res);
    assert_eq!(card.lines[2], "Healing: 14 → Applied: 0");
    assert_eq!(card.lines[3], "HP: 38 → 38 / 38");
}
