use std::collections::HashMap;

pub fn builtin_actors() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "wounded_fighter",
            include_str!("../content/actors/wounded_fighter.json"),
        ),
        (
            "spent_wizard",
            include_str!("../content/actors/spent_wizard.json"),
        ),
    ])
}
