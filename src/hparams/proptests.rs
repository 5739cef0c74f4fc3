//! Property-based tests for hyperparameter overrides

use super::*;
use proptest::prelude::*;

const DEFAULTS: &[(&str, HyperValue)] = &[
    ("lr", HyperValue::Float(0.1)),
    ("decay_epoch", HyperValue::Int(10)),
    ("freeze", HyperValue::Bool(true)),
];

fn arb_known_override() -> impl Strategy<Value = Overrides> {
    (
        proptest::option::of(1e-6f64..1.0),
        proptest::option::of(0i64..500),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(lr, epoch, freeze)| {
            let mut map = Overrides::new();
            if let Some(lr) = lr {
                map.insert("lr".into(), HyperValue::Float(lr));
            }
            if let Some(epoch) = epoch {
                map.insert("decay_epoch".into(), HyperValue::Int(epoch));
            }
            if let Some(freeze) = freeze {
                map.insert("freeze".into(), HyperValue::Bool(freeze));
            }
            map
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn prop_known_keys_overwrite_exactly(overrides in arb_known_override()) {
        let mut hps = HyperParams::from_table(DEFAULTS);
        let before = hps.clone();
        hps.set(&overrides).unwrap();
        for (key, value) in hps.iter() {
            match overrides.get(key) {
                Some(new) => prop_assert_eq!(value, new),
                None => prop_assert_eq!(Some(value), before.get(key)),
            }
        }
        prop_assert_eq!(hps.len(), before.len());
    }

    #[test]
    fn prop_unknown_key_never_applies(
        overrides in arb_known_override(),
        key in "[a-z]{1,12}".prop_filter("must be unknown", |k| {
            !DEFAULTS.iter().any(|(d, _)| *d == k.as_str())
        }),
    ) {
        let mut hps = HyperParams::from_table(DEFAULTS);
        let mut overrides = overrides;
        overrides.insert(key, HyperValue::Int(1));
        prop_assert!(hps.set(&overrides).is_err());
        prop_assert_eq!(hps, HyperParams::from_table(DEFAULTS));
    }
}
