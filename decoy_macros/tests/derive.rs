use decoy::{args, Behaves, ConfigError, Double, Func, Host, Patchable, Slot, Value};

#[derive(Patchable)]
pub struct Repository {
    find: Slot,
    #[patchable(rename = "saveAll")]
    save_all: Slot,
    #[patchable(skip)]
    #[allow(dead_code)]
    connections: usize,
}

impl Repository {
    fn new() -> Self {
        Repository {
            find: Slot::new(Func::new(|args| Ok(args.first().cloned().unwrap_or_default()))),
            save_all: Slot::new(Func::noop()),
            connections: 0,
        }
    }
}

#[derive(Patchable)]
pub struct Settings<T: Send + Sync> {
    retries: Slot,
    #[patchable(skip)]
    #[allow(dead_code)]
    extra: T,
}

#[test]
fn exposes_slots_as_properties() {
    let repository = Repository::new();

    assert_eq!(repository.properties(), vec!["find", "saveAll"]);
    assert!(repository.get("find").is_some());
    assert!(repository.get("save_all").is_none());
    assert!(repository.get("connections").is_none());
}

#[test]
fn writes_replace_the_slot() {
    let repository = Repository::new();

    let previous = repository.set("find", Value::from(3)).unwrap();
    assert!(previous.as_func().is_some());
    assert_eq!(repository.get("find"), Some(Value::from(3)));
}

#[test]
fn unknown_properties_are_rejected() {
    let repository = Repository::new();

    assert_eq!(
        repository.set("connections", Value::from(1)),
        Err(ConfigError::UnknownProperty {
            property: "connections".to_string()
        })
    );
}

#[test]
fn can_be_stubbed() {
    let host = Host::new(Repository::new());
    assert_eq!(host.call("find", &args![7]), Ok(Value::from(7)));

    let stub = Double::stub_on(&host, "find").unwrap();
    stub.returns("stubbed");
    assert_eq!(host.call("find", &args![7]), Ok(Value::from("stubbed")));
    assert!(stub.called_with((7,)));

    stub.restore();
    assert_eq!(host.call("find", &args![7]), Ok(Value::from(7)));
}

#[test]
fn generics() {
    let settings = Settings {
        retries: Slot::new(3),
        extra: "unused",
    };

    assert_eq!(settings.get("retries"), Some(Value::from(3)));
    assert_eq!(settings.properties(), vec!["retries"]);
}
