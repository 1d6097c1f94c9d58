use pretty_assertions::assert_eq;
use rill_ir::StringInterner;
use rill_parse::{parse, tokenize};

use crate::errors::{EvalError, EvalErrorKind};
use crate::print_handler::buffer_handler;
use crate::InterpreterBuilder;

/// Run a program against a buffer print handler, returning the run
/// outcome and everything it printed.
fn run(source: &str) -> (Result<(), EvalError>, String) {
    run_with_depth(source, crate::DEFAULT_MAX_DEPTH)
}

fn run_with_depth(source: &str, max_depth: usize) -> (Result<(), EvalError>, String) {
    let interner = StringInterner::new();
    let tokens = tokenize(source, &interner).expect("lex failure");
    let ast = parse(&tokens).expect("parse failure");
    let handler = buffer_handler();
    let mut interpreter = InterpreterBuilder::new(&interner, &ast)
        .print_handler(handler.clone())
        .max_depth(max_depth)
        .build();
    let result = interpreter.run();
    (result, handler.get_output())
}

fn run_ok(source: &str) -> String {
    let (result, output) = run(source);
    result.expect("evaluation failure");
    output
}

fn run_err(source: &str) -> EvalError {
    let (result, _) = run(source);
    result.expect_err("expected evaluation error")
}

// Recursion

#[test]
fn fib_10_is_55() {
    let output = run_ok(
        "function fib(n) {
             if (n < 2) return n;
             return fib(n - 2) + fib(n - 1);
         }
         print(fib(10));",
    );
    assert_eq!(output, "55\n");
}

#[test]
fn fib_base_cases() {
    let output = run_ok(
        "function fib(n) {
             if (n < 2) return n;
             return fib(n - 2) + fib(n - 1);
         }
         print(fib(0));
         print(fib(1));
         print(fib(2));",
    );
    assert_eq!(output, "0\n1\n1\n");
}

#[test]
fn nested_returns_unwind_only_their_own_call() {
    // The inner call's return must not terminate the outer call.
    let output = run_ok(
        "function inner() { return 1; }
         function outer() {
             inner();
             return 2;
         }
         print(outer());",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn falling_off_function_end_yields_nil() {
    let output = run_ok(
        "function noop() {}
         print(noop());",
    );
    assert_eq!(output, "nil\n");
}

#[test]
fn bare_return_yields_nil() {
    let output = run_ok(
        "function f() { return; }
         print(f());",
    );
    assert_eq!(output, "nil\n");
}

// Closures

#[test]
fn closure_counter_increments_across_calls() {
    let output = run_ok(
        "function makeClosure() {
             var a = 0;
             function inner() {
                 a = a + 1;
                 return a;
             }
             return inner;
         }
         var inner = makeClosure();
         print(inner());
         print(inner());
         print(inner());",
    );
    assert_eq!(output, "1\n2\n3\n");
}

#[test]
fn closures_from_separate_calls_are_independent() {
    let output = run_ok(
        "function makeClosure() {
             var a = 0;
             function inner() {
                 a = a + 1;
                 return a;
             }
             return inner;
         }
         var first = makeClosure();
         var second = makeClosure();
         print(first());
         print(first());
         print(second());",
    );
    assert_eq!(output, "1\n2\n1\n");
}

#[test]
fn closure_and_defining_scope_share_state_both_ways() {
    // Mutation through the defining scope is visible to the closure.
    let output = run_ok(
        "function make() {
             var a = 1;
             function get() { return a; }
             a = 10;
             return get;
         }
         print(make()());",
    );
    assert_eq!(output, "10\n");
}

#[test]
fn closure_captures_definition_env_not_call_site() {
    // `a` at the call site must not leak into the closure body.
    let output = run_ok(
        "var a = 1;
         function get() { return a; }
         function call_with_local() {
             var a = 99;
             return get();
         }
         print(call_with_local());",
    );
    assert_eq!(output, "1\n");
}

#[test]
fn demo_program_end_to_end() {
    let output = run_ok(
        "function fib(n) {
             if (n < 2) return n;
             return fib(n - 2) + fib(n - 1);
         }

         print(fib(10));

         function makeClosure() {
             var a = 0;
             function inner() {
                 a = a + 1;
                 return a;
             }
             return inner;
         }

         var inner = makeClosure();
         print(inner());
         print(inner());
         print(inner());",
    );
    assert_eq!(output, "55\n1\n2\n3\n");
}

// Scoping

#[test]
fn block_definition_shadows_without_touching_outer() {
    let output = run_ok(
        "var x = 1;
         {
             var x = 2;
             print(x);
         }
         print(x);",
    );
    assert_eq!(output, "2\n1\n");
}

#[test]
fn assignment_in_block_reaches_outer_binding() {
    let output = run_ok(
        "var x = 1;
         {
             x = 2;
         }
         print(x);",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn var_without_initializer_is_nil() {
    let output = run_ok("var x; print(x);");
    assert_eq!(output, "nil\n");
}

#[test]
fn parameters_shadow_globals() {
    let output = run_ok(
        "var n = 100;
         function f(n) { return n; }
         print(f(1));
         print(n);",
    );
    assert_eq!(output, "1\n100\n");
}

// Control flow and operators

#[test]
fn if_else_takes_the_right_branch() {
    let output = run_ok(
        "if (1 < 2) print(\"then\"); else print(\"else\");
         if (2 < 1) print(\"then\"); else print(\"else\");",
    );
    assert_eq!(output, "then\nelse\n");
}

#[test]
fn if_without_else_falls_through() {
    let output = run_ok(
        "if (false) print(1);
         print(2);",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn while_loop_counts() {
    let output = run_ok(
        "var i = 0;
         while (i < 3) {
             print(i);
             i = i + 1;
         }",
    );
    assert_eq!(output, "0\n1\n2\n");
}

#[test]
fn arithmetic_and_comparison() {
    let output = run_ok(
        "print(1 + 2 * 3);
         print(10 - 4 / 2);
         print(7 / 2);
         print(1 <= 1);
         print(2 > 3);",
    );
    assert_eq!(output, "7\n8\n3.5\ntrue\nfalse\n");
}

#[test]
fn equality_across_kinds() {
    let output = run_ok(
        "print(nil == nil);
         print(1 == 1);
         print(1 == \"1\");
         print(\"a\" == \"a\");
         print(1 != 2);",
    );
    assert_eq!(output, "true\ntrue\nfalse\ntrue\ntrue\n");
}

#[test]
fn string_concatenation() {
    let output = run_ok("print(\"foo\" + \"bar\");");
    assert_eq!(output, "foobar\n");
}

#[test]
fn unary_operators() {
    let output = run_ok(
        "print(-3);
         print(!true);
         print(!nil);
         print(!0);",
    );
    assert_eq!(output, "-3\nfalse\ntrue\nfalse\n");
}

#[test]
fn logical_operators_return_operand_values() {
    let output = run_ok(
        "print(1 and 2);
         print(nil and 2);
         print(nil or 3);
         print(1 or 2);",
    );
    assert_eq!(output, "2\nnil\n3\n1\n");
}

#[test]
fn logical_operators_short_circuit() {
    // The right operand references an unbound name; it must not be
    // evaluated when the left operand decides.
    let output = run_ok(
        "print(false and quux);
         print(true or quux);",
    );
    assert_eq!(output, "false\ntrue\n");
}

#[test]
fn closures_print_with_their_name() {
    let output = run_ok(
        "function makeClosure() {
             function inner() { return 0; }
             return inner;
         }
         print(makeClosure());",
    );
    assert_eq!(output, "<fn inner>\n");
}

// Errors

#[test]
fn undefined_variable_on_lookup() {
    let err = run_err("print(qux);");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "qux".to_string()
        }
    );
    assert!(err.span.is_some());
}

#[test]
fn undefined_variable_on_assignment() {
    // Assignment never implicitly creates a binding.
    let err = run_err("qux = 1;");
    assert_eq!(
        err.kind,
        EvalErrorKind::UndefinedVariable {
            name: "qux".to_string()
        }
    );
}

#[test]
fn calling_a_number_is_not_callable() {
    let err = run_err("var x = 3; x();");
    assert_eq!(
        err.kind,
        EvalErrorKind::NotCallable {
            type_name: "number"
        }
    );
}

#[test]
fn calling_nil_is_not_callable() {
    let err = run_err("var f; f();");
    assert_eq!(err.kind, EvalErrorKind::NotCallable { type_name: "nil" });
}

#[test]
fn arity_is_checked_at_call_time() {
    let err = run_err("function f(a, b) { return a; } f(1);");
    assert_eq!(
        err.kind,
        EvalErrorKind::ArityMismatch {
            name: "f".to_string(),
            expected: 2,
            got: 1
        }
    );
}

#[test]
fn adding_number_and_nil_is_unsupported() {
    let err = run_err("print(1 + nil);");
    assert!(matches!(
        err.kind,
        EvalErrorKind::UnsupportedOperands { .. }
    ));
}

#[test]
fn comparing_strings_with_lt_is_unsupported() {
    let err = run_err("print(\"a\" < \"b\");");
    assert!(matches!(
        err.kind,
        EvalErrorKind::UnsupportedOperands { .. }
    ));
}

#[test]
fn negating_a_string_is_unsupported() {
    let err = run_err("print(-\"a\");");
    assert!(matches!(
        err.kind,
        EvalErrorKind::UnsupportedUnaryOperand { .. }
    ));
}

#[test]
fn top_level_return_is_rejected() {
    let err = run_err("return 1;");
    assert_eq!(err.kind, EvalErrorKind::ReturnOutsideFunction);
}

#[test]
fn unbounded_recursion_overflows_the_call_stack() {
    let (result, _) = run_with_depth("function loop() { return loop(); } loop();", 64);
    let err = result.expect_err("expected stack overflow");
    assert_eq!(err.kind, EvalErrorKind::StackOverflow { limit: 64 });
}

#[test]
fn deep_but_bounded_recursion_succeeds() {
    let output = run_ok(
        "function down(n) {
             if (n < 1) return 0;
             return down(n - 1);
         }
         print(down(500));",
    );
    assert_eq!(output, "0\n");
}

#[test]
fn error_inside_nested_call_propagates_to_top() {
    // No catching construct: the failure unwinds through both frames
    // and nothing after the failing statement runs.
    let (result, output) = run(
        "function inner() { return qux; }
         function outer() { return inner(); }
         print(\"before\");
         print(outer());
         print(\"after\");",
    );
    assert!(result.is_err());
    assert_eq!(output, "before\n");
}

#[test]
fn failed_statement_stops_the_run() {
    let (result, output) = run("print(1); qux; print(2);");
    assert!(result.is_err());
    assert_eq!(output, "1\n");
}

// State isolation

#[test]
fn interpreter_globals_persist_across_top_level_statements() {
    let output = run_ok(
        "var total = 0;
         function bump() { total = total + 1; return total; }
         bump();
         bump();
         print(total);",
    );
    assert_eq!(output, "2\n");
}

#[test]
fn function_can_be_redefined() {
    let output = run_ok(
        "function f() { return 1; }
         function f() { return 2; }
         print(f());",
    );
    assert_eq!(output, "2\n");
}
