use super::*;
use rill_ir::StringInterner;

#[test]
fn define_then_lookup() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Env::new();
    env.define(x, Value::Number(42.0));
    assert_eq!(env.lookup(x), Some(Value::Number(42.0)));
}

#[test]
fn lookup_walks_to_parent() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = LocalCell::new(Env::new());
    parent.borrow_mut().define(x, Value::Number(1.0));

    let child = Env::child(&parent);
    assert_eq!(child.borrow().lookup(x), Some(Value::Number(1.0)));
}

#[test]
fn child_definition_shadows_parent() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = LocalCell::new(Env::new());
    parent.borrow_mut().define(x, Value::Number(1.0));

    let child = Env::child(&parent);
    child.borrow_mut().define(x, Value::Number(2.0));

    assert_eq!(child.borrow().lookup(x), Some(Value::Number(2.0)));
    // The parent's binding is untouched.
    assert_eq!(parent.borrow().lookup(x), Some(Value::Number(1.0)));
}

#[test]
fn redefinition_in_same_scope_overwrites() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Env::new();
    env.define(x, Value::Number(1.0));
    env.define(x, Value::Number(2.0));
    assert_eq!(env.lookup(x), Some(Value::Number(2.0)));
}

#[test]
fn assign_mutates_nearest_binding() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = LocalCell::new(Env::new());
    parent.borrow_mut().define(x, Value::Number(1.0));
    let child = Env::child(&parent);

    // No binding in the child: assignment reaches the parent's slot.
    child
        .borrow_mut()
        .assign(x, Value::Number(5.0))
        .expect("binding exists in parent");
    assert_eq!(parent.borrow().lookup(x), Some(Value::Number(5.0)));

    // Once the child shadows, assignment stops at the child.
    child.borrow_mut().define(x, Value::Number(10.0));
    child
        .borrow_mut()
        .assign(x, Value::Number(11.0))
        .expect("binding exists in child");
    assert_eq!(child.borrow().lookup(x), Some(Value::Number(11.0)));
    assert_eq!(parent.borrow().lookup(x), Some(Value::Number(5.0)));
}

#[test]
fn assign_to_unbound_name_fails() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let mut env = Env::new();
    assert_eq!(env.assign(x, Value::Nil), Err(UnboundAssign));
}

#[test]
fn lookup_of_unbound_name_is_none() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    assert_eq!(Env::new().lookup(x), None);
}

#[test]
fn two_handles_share_the_same_slots() {
    let interner = StringInterner::new();
    let a = interner.intern("a");

    // A closure capturing its defining scope holds a second handle to
    // the same env; both sides see mutations.
    let defining = LocalCell::new(Env::new());
    defining.borrow_mut().define(a, Value::Number(0.0));
    let captured = defining.clone();

    captured
        .borrow_mut()
        .assign(a, Value::Number(1.0))
        .expect("binding exists");
    assert_eq!(defining.borrow().lookup(a), Some(Value::Number(1.0)));
    assert!(defining.ptr_eq(&captured));
}

#[test]
fn env_outlives_its_creator_through_child_handle() {
    let interner = StringInterner::new();
    let a = interner.intern("a");

    let grandchild = {
        let parent = LocalCell::new(Env::new());
        parent.borrow_mut().define(a, Value::Number(7.0));
        let child = Env::child(&parent);
        Env::child(&child)
        // `parent` and `child` handles drop here; the chain stays alive
        // through `grandchild`.
    };
    assert_eq!(grandchild.borrow().lookup(a), Some(Value::Number(7.0)));
}

#[test]
fn binds_locally_ignores_parents() {
    let interner = StringInterner::new();
    let x = interner.intern("x");

    let parent = LocalCell::new(Env::new());
    parent.borrow_mut().define(x, Value::Nil);
    let child = Env::child(&parent);

    assert!(parent.borrow().binds_locally(x));
    assert!(!child.borrow().binds_locally(x));
}
