use crate::{
    ArgumentId, Arguments, ConfigError, Constructible, Container,
    Dependency, InjectError, InjectResult, InstanceOption,
    IntoConstructible, ParameterOption, ServiceInfo, Svc,
};
use std::sync::{Arc, Mutex};

struct Engine {
    petrol: String,
}

impl Engine {
    fn build(arguments: Arguments) -> InjectResult<Self> {
        Ok(Engine {
            petrol: arguments.positional_cloned(0)?,
        })
    }
}

struct Car {
    engine: Svc<Engine>,
    door_count: i32,
}

impl Car {
    fn build(arguments: Arguments) -> InjectResult<Self> {
        Ok(Car {
            engine: arguments.named("engine")?,
            door_count: arguments.named_cloned("doorCount")?,
        })
    }
}

struct Motorcycle {
    engine: Svc<Engine>,
    is_matic: bool,
}

impl Motorcycle {
    fn build(arguments: Arguments) -> InjectResult<Self> {
        Ok(Motorcycle {
            engine: arguments.positional(0)?,
            is_matic: arguments.positional_cloned(1)?,
        })
    }
}

struct Widget;

fn engine_option(petrol: &str) -> InstanceOption {
    InstanceOption::new(Constructible::new(Engine::build))
        .with_key("Engine")
        .with_parameter(ParameterOption::positional(vec![
            Dependency::concrete(petrol.to_owned()),
        ]))
}

fn vehicle_options() -> Vec<InstanceOption> {
    vec![
        engine_option("unleaded"),
        InstanceOption::new(Constructible::new(Car::build))
            .with_key("Car")
            .with_parameter(ParameterOption::destructuring(vec![
                Dependency::internal("Engine").named("engine"),
                Dependency::concrete(4i32).named("doorCount"),
            ])),
        InstanceOption::new(Constructible::new(Motorcycle::build))
            .with_key("Motorcycle")
            .with_parameter(ParameterOption::positional(vec![
                Dependency::internal("Engine"),
                Dependency::concrete(true),
            ])),
    ]
}

/// Builds a counting engine entry so tests can observe when construction
/// actually happens.
fn counted_engine_option(counter: &Arc<Mutex<i32>>) -> InstanceOption {
    let counter = Arc::clone(counter);
    InstanceOption::new(
        (move |_: Arguments| -> InjectResult<Engine> {
            *counter.lock().unwrap() += 1;
            Ok(Engine {
                petrol: String::new(),
            })
        })
        .constructible(),
    )
    .with_key("Engine")
}

#[test]
fn resolves_wired_instances() {
    let mut container = Container::with_options(vehicle_options()).unwrap();

    let car: Svc<Car> = container.get("Car").unwrap();
    assert_eq!(4, car.door_count);
    assert_eq!("unleaded", car.engine.petrol);

    let bike: Svc<Motorcycle> = container.get("Motorcycle").unwrap();
    assert!(bike.is_matic);

    // Both vehicles share the one engine singleton.
    assert!(Svc::ptr_eq(&car.engine, &bike.engine));
}

#[test]
fn only_one_instance_is_created_per_key() {
    let mut container = Container::with_options(vehicle_options()).unwrap();

    let first: Svc<Car> = container.get("Car").unwrap();
    let second: Svc<Car> = container.get("Car").unwrap();

    assert!(Svc::ptr_eq(&first, &second));
}

#[test]
fn instances_are_created_lazily() {
    let counter = Arc::new(Mutex::new(0));
    let mut container =
        Container::with_options(counted_engine_option(&counter)).unwrap();
    assert_eq!(0, *counter.lock().unwrap());

    container.get_dyn("Engine").unwrap();
    assert_eq!(1, *counter.lock().unwrap());

    container.get_dyn("Engine").unwrap();
    assert_eq!(1, *counter.lock().unwrap());
}

#[test]
fn looking_up_an_unregistered_key_fails() {
    let mut container = Container::with_options(vehicle_options()).unwrap();

    match container.get_dyn("abc") {
        Err(InjectError::KeyNotFound { ref key }) if key == "abc" => {}
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("no instance should exist for an unknown key"),
    }
}

#[test]
fn lookup_error_names_the_missing_key() {
    let mut container = Container::new();
    match container.get_dyn("abc") {
        Err(error) => {
            assert_eq!("`abc` instance not found", error.to_string());
        }
        Ok(_) => panic!("no instance should exist for an unknown key"),
    }
}

#[test]
fn dangling_internal_references_fail_with_the_missing_key() {
    // Car refers to an Engine that was never registered.
    let option = InstanceOption::new(Constructible::new(Car::build))
        .with_key("Car")
        .with_parameter(ParameterOption::destructuring(vec![
            Dependency::internal("Engine").named("engine"),
            Dependency::concrete(4i32).named("doorCount"),
        ]));

    let mut container = Container::with_options(option).unwrap();
    match container.get_dyn("Car") {
        Err(InjectError::KeyNotFound { ref key }) if key == "Engine" => {}
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the car's engine reference should dangle"),
    }
}

#[test]
fn destroying_an_instance_forces_a_rebuild() {
    let counter = Arc::new(Mutex::new(0));
    let mut container =
        Container::with_options(counted_engine_option(&counter)).unwrap();

    let first: Svc<Engine> = container.get("Engine").unwrap();
    container.destroy_instance("Engine").unwrap();

    let second: Svc<Engine> = container.get("Engine").unwrap();
    assert!(!Svc::ptr_eq(&first, &second));
    assert_eq!(2, *counter.lock().unwrap());
}

#[test]
fn destroying_an_unregistered_key_fails() {
    let mut container = Container::new();
    match container.destroy_instance("not_found") {
        Err(InjectError::KeyNotFound { ref key }) if key == "not_found" => {}
        Err(error) => Err(error).unwrap(),
        Ok(()) => panic!("nothing should have been destroyed"),
    }
}

#[test]
fn destroying_all_instances_clears_every_entry() {
    let mut container = Container::with_options(vehicle_options()).unwrap();

    let car_before: Svc<Car> = container.get("Car").unwrap();
    container.destroy_all_instances();

    let car_after: Svc<Car> = container.get("Car").unwrap();
    assert!(!Svc::ptr_eq(&car_before, &car_after));
    assert!(!Svc::ptr_eq(&car_before.engine, &car_after.engine));
}

#[test]
fn key_defaults_to_the_constructibles_declared_name() {
    let mut container = Container::with_options(InstanceOption::new(
        Constructible::new(|_: Arguments| -> InjectResult<Widget> {
            Ok(Widget)
        }),
    ))
    .unwrap();

    let _: Svc<Widget> =
        container.get(std::any::type_name::<Widget>()).unwrap();
}

#[test]
fn missing_wiring_defaults_to_empty_positional_arguments() {
    let mut container = Container::with_options(
        InstanceOption::new(Constructible::new(
            |arguments: Arguments| -> InjectResult<Widget> {
                assert!(matches!(arguments, Arguments::Positional(_)));
                assert!(arguments.is_empty());
                Ok(Widget)
            },
        ))
        .with_key("Widget"),
    )
    .unwrap();

    container.get_dyn("Widget").unwrap();
}

#[test]
fn re_registering_a_key_replaces_the_entry() {
    let mut container =
        Container::with_options(engine_option("regular")).unwrap();
    let first: Svc<Engine> = container.get("Engine").unwrap();
    assert_eq!("regular", first.petrol);

    container.register(engine_option("premium")).unwrap();
    let second: Svc<Engine> = container.get("Engine").unwrap();
    assert_eq!("premium", second.petrol);
    assert!(!Svc::ptr_eq(&first, &second));
}

#[test]
fn registers_an_array_of_options() {
    let mut container =
        Container::with_options([engine_option("unleaded")]).unwrap();
    container.get_dyn("Engine").unwrap();
}

#[test]
fn rejects_a_dependency_with_no_source() {
    let option = InstanceOption::new(Constructible::new(Engine::build))
        .with_key("Engine")
        .with_parameter(ParameterOption::positional(vec![Dependency {
            name: None,
            concrete: None,
            internal: None,
        }]));

    match Container::with_options(option) {
        Err(ConfigError::MissingDependencySource { key, index }) => {
            assert_eq!("Engine", key);
            assert_eq!(0, index);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the option should have been rejected"),
    }
}

#[test]
fn rejects_a_dependency_with_both_sources() {
    let option = InstanceOption::new(Constructible::new(Engine::build))
        .with_key("Engine")
        .with_parameter(ParameterOption::positional(vec![Dependency {
            internal: Some("Oil".to_owned()),
            ..Dependency::concrete(4i32)
        }]));

    match Container::with_options(option) {
        Err(ConfigError::ConflictingDependencySource { key, index }) => {
            assert_eq!("Engine", key);
            assert_eq!(0, index);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the option should have been rejected"),
    }
}

#[test]
fn rejects_an_unnamed_destructuring_dependency() {
    let option = InstanceOption::new(Constructible::new(Car::build))
        .with_key("Car")
        .with_parameter(ParameterOption::destructuring(vec![
            Dependency::concrete(4i32),
        ]));

    match Container::with_options(option) {
        Err(ConfigError::MissingDependencyName { key, index }) => {
            assert_eq!("Car", key);
            assert_eq!(0, index);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the option should have been rejected"),
    }
}

#[test]
fn rejects_an_empty_destructuring_field_name() {
    let option = InstanceOption::new(Constructible::new(Car::build))
        .with_key("Car")
        .with_parameter(ParameterOption::destructuring(vec![
            Dependency::concrete(4i32).named(""),
        ]));

    match Container::with_options(option) {
        Err(ConfigError::EmptyDependencyName { key, index }) => {
            assert_eq!("Car", key);
            assert_eq!(0, index);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the option should have been rejected"),
    }
}

#[test]
fn rejects_a_named_positional_dependency() {
    let option = InstanceOption::new(Constructible::new(Engine::build))
        .with_key("Engine")
        .with_parameter(ParameterOption::positional(vec![
            Dependency::concrete(4i32).named("doorCount"),
        ]));

    match Container::with_options(option) {
        Err(ConfigError::UnexpectedDependencyName { key, index, name }) => {
            assert_eq!("Engine", key);
            assert_eq!(0, index);
            assert_eq!("doorCount", name);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the option should have been rejected"),
    }
}

#[test]
fn a_malformed_option_rejects_the_whole_batch() {
    let mut container = Container::new();
    let result = container.register(vec![
        engine_option("unleaded"),
        InstanceOption::new(Constructible::new(Car::build))
            .with_key("Car")
            .with_parameter(ParameterOption::destructuring(vec![
                Dependency::concrete(4i32),
            ])),
    ]);

    match result {
        Err(ConfigError::MissingDependencyName { ref key, index: 0 })
            if key == "Car" => {}
        Err(error) => Err(error).unwrap(),
        Ok(()) => panic!("the batch should have been rejected"),
    }

    // Nothing from the rejected batch may have been stored, including the
    // well-formed engine option.
    match container.get_dyn("Engine") {
        Err(InjectError::KeyNotFound { ref key }) if key == "Engine" => {}
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the rejected batch should not have been stored"),
    }
}

#[test]
fn container_fails_fast_on_dependency_cycles() {
    struct Foo;
    struct Bar;

    let options = vec![
        InstanceOption::new(Constructible::new(
            |_: Arguments| -> InjectResult<Foo> { Ok(Foo) },
        ))
        .with_key("foo")
        .with_parameter(ParameterOption::positional(vec![
            Dependency::internal("bar"),
        ])),
        InstanceOption::new(Constructible::new(
            |_: Arguments| -> InjectResult<Bar> { Ok(Bar) },
        ))
        .with_key("bar")
        .with_parameter(ParameterOption::positional(vec![
            Dependency::internal("foo"),
        ])),
    ];

    let mut container = Container::with_options(options).unwrap();
    match container.get_dyn("foo") {
        Err(InjectError::CycleDetected { key, cycle }) => {
            assert_eq!("foo", key);
            assert_eq!(
                vec![
                    "foo".to_owned(),
                    "bar".to_owned(),
                    "foo".to_owned()
                ],
                cycle
            );
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => {
            panic!("somehow constructed an instance with a cyclic dependency")
        }
    }

    // The failed resolution must not poison the container: breaking the
    // cycle makes the same key resolvable.
    container
        .register(
            InstanceOption::new(Constructible::new(
                |_: Arguments| -> InjectResult<Bar> { Ok(Bar) },
            ))
            .with_key("bar"),
        )
        .unwrap();
    container.get_dyn("foo").unwrap();
}

#[test]
fn typed_lookup_rejects_a_mismatched_type() {
    let mut container = Container::with_options(vehicle_options()).unwrap();

    match container.get::<Car>("Engine") {
        Err(InjectError::InvalidInstanceType { key, requested }) => {
            assert_eq!("Engine", key);
            assert_eq!(ServiceInfo::of::<Car>(), requested);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("the engine entry should not resolve as a car"),
    }
}

#[test]
fn wrongly_typed_wiring_fails_at_construction() {
    let option = InstanceOption::new(Constructible::new(
        |arguments: Arguments| -> InjectResult<Widget> {
            let _power: Svc<i32> = arguments.positional(0)?;
            Ok(Widget)
        },
    ))
    .with_key("Widget")
    .with_parameter(ParameterOption::positional(vec![Dependency::concrete(
        true,
    )]));

    let mut container = Container::with_options(option).unwrap();
    match container.get_dyn("Widget") {
        Err(InjectError::ArgumentTypeMismatch { id, requested }) => {
            assert_eq!(ArgumentId::Position(0), id);
            assert_eq!(ServiceInfo::of::<i32>(), requested);
        }
        Err(error) => Err(error).unwrap(),
        Ok(_) => panic!("construction should have failed"),
    }
}

#[test]
fn zero_like_concrete_values_inject_verbatim() {
    struct Flags {
        zero: i32,
        flag: bool,
        label: String,
    }

    impl Flags {
        fn build(arguments: Arguments) -> InjectResult<Self> {
            Ok(Flags {
                zero: arguments.positional_cloned(0)?,
                flag: arguments.positional_cloned(1)?,
                label: arguments.positional_cloned(2)?,
            })
        }
    }

    let option = InstanceOption::new(Constructible::new(Flags::build))
        .with_key("Flags")
        .with_parameter(ParameterOption::positional(vec![
            Dependency::concrete(0i32),
            Dependency::concrete(false),
            Dependency::concrete(String::new()),
        ]));

    let mut container = Container::with_options(option).unwrap();
    let flags: Svc<Flags> = container.get("Flags").unwrap();
    assert_eq!(0, flags.zero);
    assert!(!flags.flag);
    assert_eq!("", flags.label);
}
