use super::*;

#[test]
fn standard_order_is_back_to_front() {
    let names: Vec<&str> = LayerOrder::standard()
        .slots()
        .iter()
        .map(|s| s.as_str())
        .collect();
    assert_eq!(
        names,
        vec![
            "shoes", "bottom", "top", "outer", "bag", "necklace", "bracelet", "ring", "earring",
            "hat"
        ]
    );
}

#[test]
fn plan_follows_layer_order_not_input_order() {
    let plan = build_plan(
        View::Front,
        &LayerOrder::standard(),
        ["top_front", "shoes_front"],
    );
    let keys: Vec<String> = plan.iter().map(|k| k.to_string()).collect();
    assert_eq!(keys, vec!["shoes_front", "top_front"]);
}

#[test]
fn plan_only_takes_keys_for_the_current_view() {
    let available = ["top_back", "hat_front", "bag_back"];
    let back = build_plan(View::Back, &LayerOrder::standard(), available);
    assert_eq!(
        back,
        vec![Slot::Top.key(View::Back), Slot::Bag.key(View::Back)]
    );
    let front = build_plan(View::Front, &LayerOrder::standard(), available);
    assert_eq!(front, vec![Slot::Hat.key(View::Front)]);
}

#[test]
fn unknown_keys_and_empty_input_yield_nothing() {
    assert!(build_plan(View::Front, &LayerOrder::standard(), ["cape_front", "model"]).is_empty());
    assert!(build_plan(View::Front, &LayerOrder::standard(), std::iter::empty::<&str>()).is_empty());
}

#[test]
fn slots_outside_the_order_are_never_planned() {
    let order = LayerOrder::from_slots([Slot::Top, Slot::Shoes]).unwrap();
    assert!(!order.contains(Slot::Hat));
    let plan = build_plan(View::Front, &order, ["hat_front", "shoes_front", "top_front"]);
    assert_eq!(
        plan,
        vec![Slot::Top.key(View::Front), Slot::Shoes.key(View::Front)]
    );
}

#[test]
fn duplicate_slots_are_rejected() {
    assert!(LayerOrder::from_slots([Slot::Top, Slot::Top]).is_err());
}
