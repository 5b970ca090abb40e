use autoggle_core::{
    generate, AddressingMode, AnimationTarget, ComponentTag, GeneratedNames, GeneratorConfig,
    IconRef, SceneGraph, SceneSpec, SequenceDisambiguator, StateId, ToggleError,
    ToggleSettings, HIDDEN, SHOWN,
};
use autoggle_test_fixtures::{generator_configs, scenes};

fn names_for(object: &str) -> GeneratedNames {
    GeneratedNames::derive(
        &GeneratorConfig::default(),
        object,
        &mut SequenceDisambiguator::starting_at(0x1f),
    )
}

#[test]
fn scenario_a_single_prop_end_to_end() {
    let spec: SceneSpec = scenes::spec("single-prop").unwrap();
    let (graph, root) = SceneGraph::from_spec(&spec);
    let names = names_for("Hat");
    let settings = ToggleSettings::default();

    let gen = generate(&graph, root, &settings, &names).unwrap();
    assert_eq!(gen.mode, AddressingMode::Simple);
    assert_eq!(gen.targets.as_slice(), &[AnimationTarget::active("")]);
    assert_eq!(gen.clips.on.value(&AnimationTarget::active("")), Some(SHOWN));
    assert_eq!(gen.clips.off.value(&AnimationTarget::active("")), Some(HIDDEN));

    let cfg = &gen.config;
    assert_eq!(cfg.parameter_name, "AUToggle_Hat_0000001f");
    assert_eq!(cfg.menu_label, "Hat");
    assert_eq!(cfg.menu_entry.parameter, cfg.parameter_name);
    assert_eq!(cfg.parameter.default_value, 1.0);
    assert_eq!(cfg.marker.storage_token, names.location);
    assert_eq!(gen.state_machine().default_state, StateId::On);
}

#[test]
fn scenario_b_rigged_outfit_with_options() {
    let spec: SceneSpec = scenes::spec("rigged-outfit").unwrap();
    let (graph, root) = SceneGraph::from_spec(&spec);
    let names = names_for("Outfit");
    let settings = ToggleSettings::default()
        .with_label("Jacket")
        .with_default_state(false)
        .with_saved(false)
        .with_icon(IconRef("icons/jacket.png".into()));

    let gen = generate(&graph, root, &settings, &names).unwrap();
    assert_eq!(gen.mode, AddressingMode::PerNodeActive);
    assert_eq!(gen.targets.as_slice(), &[AnimationTarget::active("Mesh")]);
    assert!(gen.clips.on.curve(&AnimationTarget::active("Mesh/Armature")).is_none());

    let cfg = &gen.config;
    assert_eq!(cfg.menu_label, "Jacket");
    assert_eq!(cfg.menu_entry.icon, Some(IconRef("icons/jacket.png".into())));
    assert!(!cfg.menu_entry.saved);
    assert!(!cfg.menu_entry.is_default);
    assert!(cfg.menu_entry.synced);
    assert_eq!(cfg.parameter.default_value, 0.0);
    assert_eq!(gen.state_machine().default_state, StateId::Off);
    assert_eq!(gen.clips.entry_clip(cfg.default_state).name, "OFF");
}

#[test]
fn regeneration_is_stable_for_fixed_inputs() {
    let spec: SceneSpec = scenes::spec("physbone-tail").unwrap();
    let (graph, root) = SceneGraph::from_spec(&spec);
    let names = names_for("Tail");
    let settings = ToggleSettings::default();
    let a = generate(&graph, root, &settings, &names).unwrap();
    let b = generate(&graph, root, &settings, &names).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        a.config.to_json_pretty().unwrap(),
        b.config.to_json_pretty().unwrap()
    );
}

#[test]
fn custom_generator_config_shapes_names() {
    let cfg: GeneratorConfig = generator_configs::load("custom-base").unwrap();
    let names = GeneratedNames::derive(&cfg, "Hat", &mut SequenceDisambiguator::starting_at(2));
    assert_eq!(names.parameter, "Toggle_Hat_000002");
    assert_eq!(names.location, "Assets/Studio/Toggles/Toggle_Hat_000002");

    let defaults: GeneratorConfig = generator_configs::load("default").unwrap();
    assert_eq!(defaults, GeneratorConfig::default());
}

#[test]
fn unknown_root_fails_without_output() {
    let graph = SceneGraph::new();
    let err = generate(
        &graph,
        autoggle_core::NodeId(0),
        &ToggleSettings::default(),
        &names_for("x"),
    )
    .unwrap_err();
    assert_eq!(err, ToggleError::UnknownNode(autoggle_core::NodeId(0)));
}

#[test]
fn requested_addressing_reaches_the_selector() {
    let mut graph = SceneGraph::new();
    let root = graph.add_root("Lamp");
    let bulb = graph.add_child(root, "Bulb").unwrap();
    graph.attach(bulb, ComponentTag::LightSource);

    let settings = ToggleSettings::default().with_addressing(AddressingMode::PerNodeActive);
    let gen = generate(&graph, root, &settings, &names_for("Lamp")).unwrap();
    assert_eq!(gen.mode, AddressingMode::PerNodeActive);
    assert_eq!(gen.targets.as_slice(), &[AnimationTarget::active("Bulb")]);
}
