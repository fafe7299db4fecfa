use decoy::{args, Behaves, Double, Fault, Func, Host, Object, Value};

#[test]
fn call_index_then_default() {
    let stub = Double::stub();
    stub.on_call(0).returns(1).on_call(1).returns(2).returns(3);

    let results: Vec<_> = (0..4).map(|_| stub.invoke(args![]).unwrap()).collect();
    assert_eq!(
        results,
        vec![Value::from(1), Value::from(2), Value::from(3), Value::from(3)]
    );
}

#[test]
fn unconfigured_stub_returns_undefined() {
    let stub = Double::stub();

    assert_eq!(stub.invoke(args![1]), Ok(Value::Undefined));
    stub.calls_through();
    assert_eq!(stub.invoke(args![1]), Ok(Value::Undefined));
}

#[test]
fn later_settings_replace_earlier_ones() {
    let stub = Double::stub();
    stub.returns(1);
    stub.throws(Fault::new("nope"));
    stub.on_second_call().returns("second").on_second_call().returns("2nd");

    assert!(stub.invoke(args![]).is_err());
    assert_eq!(stub.invoke(args![]), Ok(Value::from("2nd")));
    assert!(stub.invoke(args![]).is_err());
}

#[test]
fn arguments_and_context() {
    let stub = Double::stub();
    stub.returns_arg(1).on_first_call().returns_this();

    let this = Value::from(Host::new(Object::new()));
    assert_eq!(stub.invoke_on(this.clone(), args![]), Ok(this));
    assert_eq!(stub.invoke(args!["a", "b"]), Ok(Value::from("b")));
    assert_eq!(stub.invoke(args!["a"]), Ok(Value::Undefined));
}

#[test]
fn calls_a_fake() {
    let stub = Double::stub();
    stub.calls_fake(Func::method(|this, args| {
        Ok(Value::from(vec![this.clone(), Value::from(args.len() as i64)]))
    }));

    assert_eq!(
        stub.invoke_on(Value::from("ctx"), args![1, 2]),
        Ok(Value::from(vec![Value::from("ctx"), Value::from(2)]))
    );
}

#[test]
fn calls_through_to_the_original() {
    let original = Func::new(|args| Ok(Value::from(args.len() as i64)));
    let double = Double::wrap(original);
    double.on_first_call().returns("stubbed");

    assert_eq!(double.invoke(args![1, 2]), Ok(Value::from("stubbed")));
    assert_eq!(double.invoke(args![1, 2]), Ok(Value::from(2)));

    double.returns(0);
    assert_eq!(double.invoke(args![1, 2]), Ok(Value::from(0)));
    double.calls_through();
    assert_eq!(double.invoke(args![1, 2, 3]), Ok(Value::from(3)));
}

#[test]
fn reset_behavior_keeps_history() {
    let stub = Double::stub();
    stub.returns(1).on_first_call().returns(2);
    stub.invoke(args![]).unwrap();

    stub.reset_behavior();
    assert_eq!(stub.invoke(args![]), Ok(Value::Undefined));
    assert_eq!(stub.call_count(), 2);
}

#[test]
fn reset_history_restarts_call_indices() {
    let stub = Double::stub();
    stub.on_first_call().returns("first").returns("later");

    assert_eq!(stub.invoke(args![]), Ok(Value::from("first")));
    stub.invoke(args![Func::noop()]).unwrap();
    assert!(stub.last_callback().is_some());

    stub.reset_history();
    assert!(stub.not_called());
    assert!(stub.last_callback().is_none());
    assert_eq!(stub.invoke(args![]), Ok(Value::from("first")));
}

#[test]
fn reset_clears_everything() {
    let stub = Double::stub();
    stub.returns(1);
    stub.invoke(args![]).unwrap();

    stub.reset();
    assert!(stub.not_called());
    assert_eq!(stub.invoke(args![]), Ok(Value::Undefined));
}

#[test]
fn stubs_a_host_method() -> Result<(), decoy::Error> {
    let original = Func::new(|_| Ok(Value::from("real")));
    let host = Host::new(Object::new().with("load", original));
    let stub = Double::stub_on(&host, "load")?;

    assert_eq!(host.call("load", &[]), Ok(Value::Undefined));
    stub.returns("fake");
    assert_eq!(host.call("load", &[]), Ok(Value::from("fake")));
    assert_eq!(stub.name(), "load");

    stub.restore();
    assert_eq!(host.call("load", &[]), Ok(Value::from("real")));
    assert_eq!(stub.call_count(), 2);
    Ok(())
}

#[test]
fn clones_share_state() {
    let stub = Double::stub();
    let clone = stub.clone();
    clone.returns(5);

    assert_eq!(stub.invoke(args![]), Ok(Value::from(5)));
    assert!(clone.called_once());
}
