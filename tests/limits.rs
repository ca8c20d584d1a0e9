mod common;

use brickengine::{Context, Error, ErrorKind, Evaluator, Limits, RuntimeError};
use common::functions;

fn run_with(limits: Limits, source: &str) -> Result<String, Error> {
    common::init_test_logging();
    let functions = functions();
    Evaluator::new(&functions).with_limits(limits)
                              .run_script(source, &mut Context::new())
}

fn huge_memory() -> Option<u64> {
    Some(u64::MAX)
}

fn no_memory_reading() -> Option<u64> {
    None
}

#[test]
fn runaway_while_hits_iteration_ceiling() {
    let limits = Limits::default().with_max_iterations(1_000);
    let err = run_with(limits, "let n = 0; while (true) { n = n + 1 }").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
    assert!(matches!(err, Error::Runtime(RuntimeError::IterationLimit { limit: 1_000, .. })));
}

#[test]
fn body_runs_at_most_the_ceiling() {
    let limits = Limits::default().with_max_iterations(50);
    let functions = functions();
    let evaluator = Evaluator::new(&functions).with_limits(limits);
    let mut ctx = Context::new();

    assert!(evaluator.run_script("let n = 0; while true { n = n + 1 }", &mut ctx).is_err());
    assert_eq!(evaluator.run_script("n", &mut ctx).unwrap(), "50");
}

#[test]
fn loops_under_the_ceiling_finish() {
    let limits = Limits::default().with_max_iterations(10);
    assert_eq!(run_with(limits, "let i = 0; while i < 9 { i = i + 1 }; i").unwrap(), "9");
    assert_eq!(run_with(limits, "let s = 0; for let i = 0; i < 9; i = i + 1 { s = s + 1 }; s").unwrap(),
               "9");
}

#[test]
fn classic_for_checks_memory_every_pass() {
    let limits = Limits::default().with_max_memory_bytes(Some(1024))
                                  .with_memory_probe(huge_memory);
    let err = run_with(limits, "for let i = 0; i < 2; i = i + 1 { }").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::MemoryLimit { limit: 1024, .. })));
}

#[test]
fn while_checks_memory_periodically() {
    let limits = Limits::default().with_max_memory_bytes(Some(1024))
                                  .with_memory_probe(huge_memory)
                                  .with_memory_check_interval(5);

    assert!(run_with(limits, "let i = 0; while i < 3 { i = i + 1 }").is_ok());
    let err = run_with(limits, "let i = 0; while i < 10 { i = i + 1 }").unwrap_err();
    assert!(matches!(err, Error::Runtime(RuntimeError::MemoryLimit { .. })));
}

#[test]
fn memory_check_can_be_disabled() {
    let disabled = Limits::default().with_max_memory_bytes(None)
                                    .with_memory_probe(huge_memory);
    assert!(run_with(disabled, "for let i = 0; i < 3; i = i + 1 { }").is_ok());

    let unknown = Limits::default().with_max_memory_bytes(Some(1))
                                   .with_memory_probe(no_memory_reading);
    assert!(run_with(unknown, "for let i = 0; i < 3; i = i + 1 { }").is_ok());
}

#[test]
fn unbounded_recursion_hits_call_depth() {
    let limits = Limits::default().with_max_call_depth(16);
    let err = run_with(limits, "fn down(n) { return down(n + 1) }; down(0)").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::CallDepthExceeded { limit: 16, .. })));
}

#[test]
fn call_depth_is_restored_after_calls() {
    let limits = Limits::default().with_max_call_depth(3);
    let source = "fn one() { return 1 }; let s = 0; for n in [1, 2, 3, 4, 5] { s = s + one() }; s";
    assert_eq!(run_with(limits, source).unwrap(), "5");
}

#[test]
fn resource_errors_are_not_caught() {
    let limits = Limits::default().with_max_iterations(10);

    let err = run_with(limits, "let r = 0; try { while true { } } catch { r = 1 }; r").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);

    let err = run_with(limits, "fn spin() { while true { } }; spin() | 'fallback'").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
}

#[test]
fn padding_past_the_memory_ceiling_is_refused() {
    let err = run_with(Limits::default(), "let a = []; a[100000000000] = 1").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
    assert!(matches!(err, Error::Runtime(RuntimeError::ArrayTooLarge { len: 100_000_000_001, .. })));
}

#[test]
fn padding_respects_a_small_ceiling() {
    let limits = Limits::default().with_max_memory_bytes(Some(1024));

    assert_eq!(run_with(limits, "let a = []; a[3] = 1; a").unwrap(), "[null, null, null, 1]");
    assert_eq!(run_with(limits, "let a = []; a[1000] = 1").unwrap_err().kind(),
               ErrorKind::ResourceExceeded);
}

#[test]
fn unallocatable_padding_fails_without_a_ceiling() {
    let limits = Limits::default().with_max_memory_bytes(None);
    let err = run_with(limits, "let a = []; a[9007199254740991] = 1").unwrap_err();

    assert!(matches!(err, Error::Runtime(RuntimeError::ArrayTooLarge { .. })));
}

#[test]
fn oversized_padding_is_not_caught() {
    let err = run_with(Limits::default(), "try { let a = []; a[100000000000] = 1 } catch { 0 }").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ResourceExceeded);
}
