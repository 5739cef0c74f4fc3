//! Tests for the modifier registry

use super::*;
use crate::hparams::{HyperParams, HyperValue};
use crate::modifier::{
    GradModifier, Modifier, ModifierState, Phase, ScheduleReport, ScheduleStep, Strategy,
};
use crate::optim::{ParamGroupSet, ScheduleTarget};
use crate::{ModifierError, Result};

#[derive(Debug, Default)]
struct Alpha;

impl Strategy for Alpha {
    const NAME: &'static str = "alpha";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[("a", HyperValue::Int(1))];

    fn modify(
        &mut self,
        _hps: &HyperParams,
        _state: &mut ModifierState,
        _target: &mut dyn ScheduleTarget,
        _step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        Ok(ScheduleReport::new())
    }
}

#[derive(Debug, Default)]
struct Beta;

impl Strategy for Beta {
    const NAME: &'static str = "beta";
    const DEFAULT_HPS: &'static [(&'static str, HyperValue)] = &[("b", HyperValue::Bool(true))];

    fn modify(
        &mut self,
        _hps: &HyperParams,
        _state: &mut ModifierState,
        _target: &mut dyn ScheduleTarget,
        _step: ScheduleStep,
    ) -> Result<ScheduleReport> {
        Ok(ScheduleReport::new())
    }
}

#[test]
fn test_duplicate_name_in_same_task_fails() {
    let mut builder = ModifierRegistry::builder();
    builder.register(Task::Track, "shared", Modifier::<Alpha>::boxed).unwrap();
    let err = builder.register(Task::Track, "shared", Modifier::<Beta>::boxed).unwrap_err();
    assert_eq!(err, ModifierError::DuplicateName { task: Task::Track, name: "shared".into() });

    // first registration survives
    let registry = builder.build();
    let m = registry.create(Task::Track, "shared").unwrap();
    assert_eq!(m.name(), "alpha");
}

#[test]
fn test_same_name_in_two_tasks_is_independent() {
    let mut builder = ModifierRegistry::builder();
    builder
        .register(Task::Track, "shared", Modifier::<Alpha>::boxed)
        .unwrap()
        .register(Task::Vos, "shared", Modifier::<Beta>::boxed)
        .unwrap();
    let registry = builder.build();

    let track = registry.resolve(Task::Track, "shared").unwrap()();
    let vos = registry.resolve(Task::Vos, "shared").unwrap()();
    assert_eq!(track.name(), "alpha");
    assert_eq!(vos.name(), "beta");
    assert_eq!(*track.get_hps(), HyperParams::from_table(Alpha::DEFAULT_HPS));
    assert_eq!(*vos.get_hps(), HyperParams::from_table(Beta::DEFAULT_HPS));
}

#[test]
fn test_unknown_strategy() {
    let mut builder = ModifierRegistry::builder();
    builder.register_strategy::<Alpha>(Task::Track).unwrap();
    let registry = builder.build();

    let err = registry.resolve(Task::Track, "gamma").unwrap_err();
    assert_eq!(
        err,
        ModifierError::UnknownStrategy {
            task: Task::Track,
            name: "gamma".into(),
            available: vec!["alpha".into()],
        }
    );
    assert!(matches!(
        registry.resolve(Task::Vos, "alpha"),
        Err(ModifierError::UnknownStrategy { .. })
    ));
}

#[test]
fn test_unknown_namespace() {
    let registry = ModifierRegistry::builtin().unwrap();
    let err = registry.resolve_by_name("detection", "step_decay").unwrap_err();
    assert_eq!(err, ModifierError::UnknownNamespace("detection".into()));
}

#[test]
fn test_resolve_by_name_accepts_aliases() {
    let registry = ModifierRegistry::builtin().unwrap();
    assert!(registry.resolve_by_name("track", "step_decay").is_ok());
    assert!(registry.resolve_by_name("tracking", "step_decay").is_ok());
    assert!(registry.resolve_by_name("segmentation", "cosine_annealing").is_ok());
    assert!(registry.resolve_by_name("VOS", "linear_warmup").is_ok());
}

#[test]
fn test_builtin_catalogs() {
    let registry = ModifierRegistry::builtin().unwrap();
    let expected = vec![
        "cosine_annealing",
        "dynamic_freezer",
        "linear_warmup",
        "step_decay",
        "warmup_cosine_decay",
    ];
    for task in Task::ALL {
        assert_eq!(registry.names(task), expected);
    }
}

#[test]
fn test_register_builtins_twice_fails() {
    let mut builder = RegistryBuilder::new();
    register_builtins(&mut builder).unwrap();
    assert!(matches!(
        register_builtins(&mut builder),
        Err(ModifierError::DuplicateName { .. })
    ));
}

#[test]
fn test_create_returns_fresh_instances() {
    let registry = ModifierRegistry::builtin().unwrap();
    let mut first = registry.create(Task::Track, "step_decay").unwrap();
    first.modify_grad(Some(&mut ParamGroupSet::new().group(1.0)), ScheduleStep::epoch(0)).unwrap();

    let second = registry.create(Task::Track, "step_decay").unwrap();
    assert_eq!(second.phase(), Phase::Constructed);
    assert_eq!(second.steps_taken(), 0);
}

#[test]
fn test_build_from_config() {
    let registry = ModifierRegistry::builtin().unwrap();
    let config = ModifierConfig::new(Task::Track, "step_decay").with_hp("lr", 1.0);
    let mut m = registry.build(&config).unwrap();

    assert_eq!(m.phase(), Phase::Active);
    assert_eq!(m.get_hps().float("lr").unwrap(), 1.0);
    let mut target = ParamGroupSet::new().group(0.0);
    let report = m.modify_grad(Some(&mut target), ScheduleStep::epoch(12)).unwrap();
    approx::assert_abs_diff_eq!(report.float("lr").unwrap(), 0.1, epsilon = 1e-12);
}

#[test]
fn test_build_rejects_unknown_key() {
    let registry = ModifierRegistry::builtin().unwrap();
    let config = ModifierConfig::new(Task::Vos, "step_decay").with_hp("momentum", 0.9);
    assert!(matches!(registry.build(&config), Err(ModifierError::KeyNotRecognized { .. })));
}

#[test]
fn test_config_from_yaml() {
    let yaml = "task: tracking\nname: dynamic_freezer\nhps:\n  regex: ^backbone\n  epoch: 5\n  freeze: false\n";
    let config = ModifierConfig::from_yaml_str(yaml).unwrap();
    assert_eq!(config.task, Task::Track);
    assert_eq!(config.name, "dynamic_freezer");
    assert_eq!(config.hps["regex"], HyperValue::from("^backbone"));
    assert_eq!(config.hps["epoch"], HyperValue::Int(5));
    assert_eq!(config.hps["freeze"], HyperValue::Bool(false));
}

#[test]
fn test_config_from_json_without_hps() {
    let config = ModifierConfig::from_json_str(r#"{"task": "vos", "name": "step_decay"}"#).unwrap();
    assert_eq!(config, ModifierConfig::new(Task::Vos, "step_decay"));
}

#[test]
fn test_config_parse_errors() {
    assert!(matches!(
        ModifierConfig::from_yaml_str("task: detection\nname: x\n"),
        Err(ModifierError::ConfigParse { .. })
    ));
    assert!(matches!(
        ModifierConfig::from_json_str("{not json"),
        Err(ModifierError::ConfigParse { .. })
    ));
}

#[test]
fn test_task_parse_and_display() {
    assert_eq!("track".parse::<Task>().unwrap(), Task::Track);
    assert_eq!("Segmentation".parse::<Task>().unwrap(), Task::Vos);
    assert_eq!(Task::Vos.to_string(), "vos");
    assert!(matches!("det".parse::<Task>(), Err(ModifierError::UnknownNamespace(_))));
}

#[test]
fn test_registry_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ModifierRegistry>();

    let registry = std::sync::Arc::new(ModifierRegistry::builtin().unwrap());
    let handles: Vec<_> = Task::ALL
        .into_iter()
        .map(|task| {
            let registry = std::sync::Arc::clone(&registry);
            std::thread::spawn(move || registry.create(task, "cosine_annealing").map(|m| m.name()))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().unwrap(), "cosine_annealing");
    }
}
