//! Property tests for the cart reducer against a simple list model.

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use proptest::prelude::*;
use storefront::cart::{CartAction, CartReducer, CartState};
use storefront::{Product, ProductId, Rating};
use storefront_core::reducer::Reducer;

fn product(id: u64) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: id as f64 + 0.5,
        description: String::new(),
        category: "misc".to_string(),
        image: String::new(),
        rating: Rating {
            rate: 3.0,
            count: 1,
        },
    }
}

fn arb_action() -> impl Strategy<Value = CartAction> {
    prop_oneof![
        4 => (0_u64..6).prop_map(|id| CartAction::AddToCart(product(id))),
        2 => (0_u64..8).prop_map(|id| CartAction::DecrementFromCart(ProductId::new(id))),
        1 => (0_u64..8).prop_map(|id| CartAction::RemoveFromCart(ProductId::new(id))),
        1 => Just(CartAction::ClearCart),
    ]
}

/// Reference model: (id, quantity) in insertion order
fn apply_model(model: &mut Vec<(u64, u64)>, action: &CartAction) {
    match action {
        CartAction::AddToCart(p) => match model.iter_mut().find(|(id, _)| *id == p.id.get()) {
            Some((_, quantity)) => *quantity += 1,
            None => model.push((p.id.get(), 1)),
        },
        CartAction::DecrementFromCart(id) => {
            if let Some(index) = model.iter().position(|(existing, _)| *existing == id.get()) {
                if model[index].1 > 1 {
                    model[index].1 -= 1;
                } else {
                    model.remove(index);
                }
            }
        },
        CartAction::RemoveFromCart(id) => model.retain(|(existing, _)| *existing != id.get()),
        CartAction::ClearCart => model.clear(),
    }
}

fn contents(state: &CartState) -> Vec<(u64, u64)> {
    state
        .items()
        .map(|item| (item.id().get(), item.quantity))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Property: the reducer agrees with the list model after every action.
    #[test]
    fn prop_matches_model(actions in prop::collection::vec(arb_action(), 0..60)) {
        let mut state = CartState::new();
        let mut model = Vec::new();

        for action in actions {
            apply_model(&mut model, &action);
            let effects = CartReducer.reduce(&mut state, action, &());
            prop_assert!(effects.is_empty());
            prop_assert_eq!(contents(&state), model.clone());
        }
    }

    /// Property: no line ever has quantity 0 and totals are sums over lines.
    #[test]
    fn prop_totals_are_consistent(actions in prop::collection::vec(arb_action(), 0..60)) {
        let mut state = CartState::new();
        for action in actions {
            CartReducer.reduce(&mut state, action, &());
        }

        prop_assert!(state.items().all(|item| item.quantity >= 1));
        prop_assert!(state.items().all(|item| state.get(item.id()) == Some(item)));

        let items: u64 = state.items().map(|item| item.quantity).sum();
        prop_assert_eq!(state.total_items(), items);

        let cost: f64 = state.items().map(|item| item.product.price * item.quantity as f64).sum();
        prop_assert!((state.total_cost() - cost).abs() < 1e-9);
    }

    /// Property: a snapshot taken mid-sequence never sees later transitions.
    #[test]
    fn prop_snapshots_are_stable(
        before in prop::collection::vec(arb_action(), 0..30),
        after in prop::collection::vec(arb_action(), 1..30),
    ) {
        let mut state = CartState::new();
        for action in before {
            CartReducer.reduce(&mut state, action, &());
        }

        let snapshot = state.clone();
        let expected = contents(&snapshot);

        for action in after {
            CartReducer.reduce(&mut state, action, &());
        }

        prop_assert_eq!(contents(&snapshot), expected);
    }
}
