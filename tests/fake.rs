use decoy::{args, fake, Double, Fault, Func, Host, Object, Sandbox, Value};
use futures::executor::block_on;

#[test]
fn returns_a_value() {
    let fake = fake::returns("hello");

    fake.invoke(args![]).unwrap();
    assert_eq!(fake.call_count(), 1);
    assert_eq!(fake.invoke(args![]), Ok(Value::from("hello")));
}

#[test]
fn throws_a_fault() {
    let fake = fake::throws(Fault::new("something went wrong!"));

    let fault = fake.invoke(args![]).unwrap_err();
    assert_eq!(fault.message(), "something went wrong!");
    assert_eq!(fault.to_string(), "Error: something went wrong!");
    assert!(fake.threw());
}

#[test]
fn resolves_without_throwing() {
    let data: Value = [("message", "Resolved value")].into_iter().collect();
    let fake = fake::resolves(data.clone());

    let pending = fake.invoke(args![]).unwrap();
    let deferred = pending.as_pending().cloned().unwrap();
    assert_eq!(block_on(deferred), Ok(data));

    assert_eq!(fake.call_count(), 1);
    assert!(fake.invoke(args![]).is_ok());
}

#[test]
fn rejects_only_when_awaited() {
    let fake = fake::rejects(Fault::new("something went wrong!"));

    let pending = fake.invoke(args![]).unwrap();
    assert_eq!(fake.call_count(), 1);
    assert!(!fake.threw());

    let settled = block_on(pending.as_pending().cloned().unwrap());
    assert_eq!(settled.unwrap_err().message(), "something went wrong!");
}

#[test]
fn yields_to_the_callback() {
    let fake = fake::yields(args!["hello"]);
    let log = Double::spy();

    assert_eq!(fake.invoke(args![&log]), Ok(Value::Undefined));
    assert_eq!(fake.call_count(), 1);
    assert!(log.called_once());
    assert!(log.called_with(("hello",)));
}

#[test]
fn yields_without_a_callback() {
    let fake = fake::yields(args!["hello"]);

    let fault = fake.invoke(args![1, "two"]).unwrap_err();
    assert_eq!(fault.name(), "TypeError");
    assert_eq!(
        fault.message(),
        "fake expected to yield, but no callback was passed."
    );
}

#[test]
fn wraps_an_existing_function() {
    let demo = Func::new(|_| Ok(Value::from("demo"))).named("demoFunction");
    let fake = fake::wrap(demo);

    assert_eq!(fake.invoke(args![]), Ok(Value::from("demo")));
    assert_eq!(fake.call_count(), 1);
    assert_eq!(fake.name(), "demoFunction");
}

#[test]
fn remembers_the_last_callback() {
    let fake = fake::new();
    let first = Func::noop();
    let second = Func::noop();

    fake.invoke(args![1, 2, 5, first.clone()]).unwrap();
    fake.invoke(args![1, 2, 3, second.clone()]).unwrap();

    assert!(fake.last_callback().is_some_and(|cb| cb.ptr_eq(&second)));
    assert!(!fake.last_callback().is_some_and(|cb| cb.ptr_eq(&first)));
    assert!(fake
        .first_call()
        .unwrap()
        .callback()
        .is_some_and(|cb| cb.ptr_eq(&first)));
}

#[test]
fn last_arg_is_compared_by_identity() {
    let fake = fake::new();
    let first = Value::from(Host::new(Object::new()));
    let second = Value::from(Host::new(Object::new()));

    fake.invoke(args![1, 2, first.clone()]).unwrap();
    fake.invoke(args![1, 2, second.clone()]).unwrap();

    assert_eq!(fake.get_call(0).unwrap().last_arg(), Some(&first));
    assert_ne!(fake.get_call(0).unwrap().last_arg(), Some(&second));
    assert_eq!(fake.get_call(1).unwrap().last_arg(), Some(&second));
    assert_eq!(fake.last_call().unwrap().last_arg(), Some(&second));
}

#[test]
fn replaces_a_function_of_the_system_under_test() {
    let module = Host::new(
        Object::new().with("demoFunction", Func::new(|_| Ok(Value::from("demo")))),
    );
    let sandbox = Sandbox::new();
    let fake = fake::returns("42");

    sandbox.replace(&module, "demoFunction", &fake).unwrap();
    module.call("demoFunction", &[]).unwrap();
    assert_eq!(module.call("demoFunction", &[]), Ok(Value::from("42")));

    sandbox.restore();
    assert_eq!(module.call("demoFunction", &[]), Ok(Value::from("demo")));
    assert_eq!(fake.call_count(), 2);
}
