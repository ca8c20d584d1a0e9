mod common;

use std::{fs, net::Ipv4Addr};

use brickengine::{BUILTIN_FUNCTIONS, Context, ErrorKind, NativeFunction, ParamKind, Value, run_script};
use common::{functions, run};
use walkdir::WalkDir;

#[test]
fn docs_examples_work() {
    let mut count = 0;

    for entry in WalkDir::new("docs").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, code) in extract_brick_blocks(&content).into_iter().enumerate() {
            count += 1;
            if let Err(e) = run(&code) {
                panic!("Example {} in {:?} failed:\n{}\nError: {}", i + 1, path, code, e);
            }
        }
    }

    assert!(count > 0, "No brick examples found in docs");
}

fn extract_brick_blocks(content: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = String::new();

    for line in content.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```brick") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push_str(line);
            buf.push('\n');
        }
    }

    blocks
}

fn assert_output(src: &str, expected: &str) {
    match run(src) {
        Ok(out) => assert_eq!(out, expected, "script: {src}"),
        Err(e) => panic!("Script failed: {e}\nscript: {src}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) {
    match run(src) {
        Ok(out) => panic!("Script succeeded with {out:?} but was expected to fail\nscript: {src}"),
        Err(e) => assert_eq!(e.kind(), kind, "unexpected error: {e}"),
    }
}

#[test]
fn host_function_and_dotted_variable() {
    let mut ctx = Context::new();
    ctx.insert("var", Value::object([("extra", Value::from(128.0))]));

    let out = run_script("gb(1) + var.extra", &mut ctx, &functions()).unwrap();
    assert_eq!(out, "1152");
}

#[test]
fn operators_share_one_precedence_level() {
    assert_output("1 + 2 * 3", "9");
    assert_output("1 + (2 * 3)", "7");
    assert_output("10 - 4 - 3", "3");
    assert_output("12 / 4 / 3", "1");
}

#[test]
fn glued_negative_number_is_subtraction() {
    assert_output("let x = 5; x -1", "4");
    assert_output("5-3", "2");
    assert_output("-3 + 1", "-2");
}

#[test]
fn numeric_strings_take_part_in_arithmetic() {
    assert_output("'40' + 2", "42");
    assert_output("'10' == 10", "true");
    assert_failure("'ten' + 1", ErrorKind::Type);
}

#[test]
fn comparisons() {
    assert_output("2 < 3", "true");
    assert_output("3 <= 2", "false");
    assert_output("4 >= 4", "true");
    assert_output("1 != 1", "false");
}

#[test]
fn pipe_falls_back_on_error_or_falsy_value() {
    assert_output("1 / 0 | 42", "42");
    assert_output("missing | 'default'", "default");
    assert_output("0 | 5", "5");
    assert_output("'x' | 'y'", "x");
    assert_output("nope() | missing.deep | 7", "7");
}

#[test]
fn closures_capture_a_snapshot() {
    assert_output(r"
        let rate = 2
        fn scale(x) { return x * rate }
        rate = 10
        scale(3)
    ",
                  "6");
}

#[test]
fn closure_assignments_do_not_leak() {
    assert_output("let n = 1; fn bump() { n = 5; return n }; bump(); n", "1");
    assert_output("let n = 1; fn bump() { n = 5; return n }; bump()", "5");
}

#[test]
fn recursion() {
    assert_output(r"
        fn fact(n) {
            if n <= 1 { return 1 }
            return n * fact(n-1)
        }
        fact(5)
    ",
                  "120");
}

#[test]
fn missing_parameters_and_extra_arguments() {
    assert_output("fn f(a, b) { return b | 'unset' }; f(1)", "unset");
    assert_output("fn f(a) { return a }; f(1, 2, 3)", "1");
    assert_output("fn f() { 1 + 1 }; f()", "null");
}

#[test]
fn index_assignment_pads_with_null() {
    assert_output("let a = [1]; a[3] = 4; a", "[1, null, null, 4]");
    assert_output("let a = [1, 2]; a[0] = 'x'; a[0]", "x");
}

#[test]
fn index_assignment_copies_shared_arrays() {
    assert_output("let a = [1]; let b = a; b[0] = 2; a", "[1]");
}

#[test]
fn dotted_assignment_creates_objects() {
    assert_output("user.address.city = 'Oslo'; user", r#"{"address": {"city": "Oslo"}}"#);
    assert_output("let cfg = 5; cfg.mode = 'x'; cfg.mode", "x");
}

#[test]
fn object_literals_and_methods() {
    assert_output("let o = { b: 2, 'a': 1, }; o", r#"{"a": 1, "b": 2}"#);
    assert_output("let calc = { step: 3, add: fn(x) { return x + 3 } }; calc.add(1)", "4");
    assert_output("let o = {inner: {v: 1}}; o.inner.v", "1");
}

#[test]
fn try_catch() {
    assert_output("let r = 0; try { r = 1 / 0 } catch { r = 7 }; r", "7");
    assert_output("let r = 0; try { r = 1 } catch { r = 7 }; r", "1");
    assert_output("fn f() { try { return 3 } catch { return 4 } }; f()", "3");
    assert_output("fn f() { try { 1 / 0 } catch { return 4 } }; f()", "4");
    assert_failure("try { 1 / 0 } catch { nope() }", ErrorKind::Reference);
}

#[test]
fn classic_for_loops() {
    assert_output("let s = 0; for let i = 0; i < 5; i = i + 1 { s = s + i }; s", "10");
    assert_output("let s = 0; for (let i = 0; i < 3; i = i + 1) { s = s + 1 }; s", "3");
}

#[test]
fn for_each_loops() {
    assert_output("let total = 0; for n in [1, 2, 3] { total = total + n }; total", "6");
    assert_output("for n in [1, 2, 3] { }; n", "3");
    assert_output("let t = 0; for (n in [4, 5]) { t = t + n }; t", "9");
    assert_failure("for n in 5 { }", ErrorKind::Type);
}

#[test]
fn while_loops() {
    assert_output("let i = 0; while i < 3 { i = i + 1 }; i", "3");
    assert_output("fn first_over(limit) { let i = 0; while true { i = i + 1; if i > limit { return i } } }; first_over(4)",
                  "5");
}

#[test]
fn if_else_chains() {
    assert_output("let x = 5; let r = 0; if x > 10 { r = 1 } else if x > 3 { r = 2 } else { r = 3 }; r", "2");
    assert_output("let r = 0; IF 0 { r = 1 } ELSE { r = 2 }; r", "2");
    assert_output("let r = 0; if '' { r = 1 }; r", "0");
}

#[test]
fn script_result() {
    assert_output("return 5; 6", "5");
    assert_output("", "null");
    assert_output("let x = 2.6", "3");
    assert_output("['a', 1.4, true, null]", r#"["a", 1, true, null]"#);
    assert_output("0 - 0.4", "0");
    assert_output("fn named() { }", "<fn named>");
}

#[test]
fn comments_and_strings() {
    assert_output("# leading comment\n1 + 1 // trailing comment", "2");
    assert_output(r"'it\'s'", "it's");
    assert_output(r#""tab\there""#, "tab\there");
}

#[test]
fn builtin_library() {
    assert_output("upper('abc')", "ABC");
    assert_output("trim('  hi ')", "hi");
    assert_output("concat('a', 1)", "a1");
    assert_output("len([1, 2, 3])", "3");
    assert_output("push([1], 2)", "[1, 2]");
    assert_output("keys({b: 1, a: 2})", r#"["a", "b"]"#);
    assert_output("min(3, 9) + max(3, 9)", "12");
    assert_output("type(null)", "null");
    assert_output("str(3.5)", "3.5");
    assert_output("num('12') + 1", "13");
    assert_output("floor(2.9) + ceil(0.1) + abs(-3)", "6");
    assert_failure("num('x')", ErrorKind::Host);
    assert_failure("upper()", ErrorKind::Type);
    assert_failure("push(1, 2)", ErrorKind::Type);
    assert_output("len(uuid())", "36");
    assert_output("len(random_string(12))", "12");
    assert_output("random_ipv4_in('172.16.4.9/32')", "172.16.4.9");
    assert_failure("random_string(-1)", ErrorKind::Host);
    assert_failure("random_string(70000)", ErrorKind::Host);
    assert_failure("random_ipv4_in('10.0.0.0/33')", ErrorKind::Host);
    assert_failure("random_ipv4_in('10.0.0/8')", ErrorKind::Host);
}

#[test]
fn random_identifiers_are_well_formed() {
    let id = run("uuid()").unwrap();
    let groups: Vec<&str> = id.split('-').collect();
    assert_eq!(groups.iter().map(|g| g.len()).collect::<Vec<_>>(), [8, 4, 4, 4, 12]);
    assert!(id.chars().all(|c| c == '-' || c.is_ascii_hexdigit()));
    assert!(groups[2].starts_with('4'));
    assert!(groups[3].starts_with(['8', '9', 'a', 'b']));
    assert_ne!(id, run("uuid()").unwrap());

    let mac = run("random_mac()").unwrap();
    let octets: Vec<u8> = mac.split(':').map(|o| u8::from_str_radix(o, 16).unwrap()).collect();
    assert_eq!(octets.len(), 6);
    assert_eq!(octets[0] & 0x03, 0x02);

    let ip: Ipv4Addr = run("random_ipv4_in('10.20.0.0/16')").unwrap().parse().unwrap();
    assert_eq!(ip.octets()[..2], [10, 20]);
    assert!(run("random_ipv4_in('0.0.0.0/0')").unwrap().parse::<Ipv4Addr>().is_ok());

    let word = run("random_string(200)").unwrap();
    assert_eq!(word.len(), 200);
    assert!(word.chars().all(|c| c.is_ascii_alphanumeric()));
}

#[test]
fn runtime_errors() {
    assert_failure("let x = 1 / 0", ErrorKind::Arithmetic);
    assert_failure("nope(1)", ErrorKind::Reference);
    assert_failure("let x = 1; x()", ErrorKind::Type);
    assert_failure("[1][5]", ErrorKind::Range);
    assert_failure("[1][-1]", ErrorKind::Range);
    assert_failure("let s = 'a'; s.b.c", ErrorKind::Type);
}

#[test]
fn index_assignment_needs_an_array_and_a_valid_index() {
    assert_failure("let a = 5; a[0] = 1", ErrorKind::Type);
    assert_failure("a[0] = 1", ErrorKind::Type);
    assert_failure("let o = {}; o.list[0] = 1", ErrorKind::Type);
    assert_failure("let a = [1]; a[-1] = 2", ErrorKind::Range);
    assert_failure("let a = [1]; a['x'] = 2", ErrorKind::Type);
    assert_output("let a = [1]; a[0] = 2; a", "[2]");
}

#[test]
fn syntax_errors() {
    assert_failure("let = 5", ErrorKind::Syntax);
    assert_failure("let a = [1]; a[]", ErrorKind::Range);
    assert_failure("[1, 2,]", ErrorKind::Syntax);
    assert_failure("fn f( { }", ErrorKind::Syntax);
    assert_failure("while true { 1", ErrorKind::Syntax);
    assert_failure("1 + 2 = 3", ErrorKind::Syntax);
    assert_failure("let x = 1 @ 2", ErrorKind::Syntax);
    assert_failure("1 | | 2", ErrorKind::Syntax);
}

#[test]
fn nesting_is_bounded() {
    let parens = format!("{}1{}", "(".repeat(100), ")".repeat(100));
    assert_output(&parens, "1");
    assert_output(&format!("0{}", " + 1".repeat(100)), "100");

    assert_failure(&format!("{}1{}", "(".repeat(3000), ")".repeat(3000)), ErrorKind::Syntax);
    assert_failure(&format!("0{}", " + 1".repeat(20_000)), ErrorKind::Syntax);
}

#[test]
fn errors_report_their_line() {
    let err = run("let a = 1\nlet b = a / 0").unwrap_err();
    assert!(err.to_string().contains("line 2"), "{err}");

    let err = run("let a = 1\n\n\nlet = 2").unwrap_err();
    assert!(err.to_string().contains("line 4"), "{err}");
}

#[test]
fn context_is_shared_across_runs() {
    let functions = functions();
    let mut ctx = Context::new();

    run_script("let total = 40", &mut ctx, &functions).unwrap();
    let out = run_script("total + 2", &mut ctx, &functions).unwrap();

    assert_eq!(out, "42");
    assert_eq!(ctx.get("total"), Some(&Value::from(40.0)));
}

#[test]
fn dotted_native_names_win_over_variables() {
    let mut functions = functions();
    functions.register("units.kb", [ParamKind::Number], |args| {
                 Value::from(args[0].coerce_number().unwrap_or(0.0) * 1024.0)
             });
    functions.insert(NativeFunction::fallible("units.check", [ParamKind::Bool], |args| match args[0] {
                         Value::Bool(true) => Ok(Value::from("ok")),
                         _ => Err("check failed".to_owned()),
                     }));

    let mut ctx = Context::new();
    ctx.insert("units", Value::object([("kb", Value::from(1.0))]));

    assert_eq!(run_script("units.kb(2)", &mut ctx, &functions).unwrap(), "2048");
    assert_eq!(run_script("units.check(true)", &mut ctx, &functions).unwrap(), "ok");

    let err = run_script("units.check(false)", &mut ctx, &functions).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Host);
    assert!(err.to_string().contains("check failed"), "{err}");
}

#[test]
fn builtins_are_all_registered() {
    let functions = functions();
    for name in BUILTIN_FUNCTIONS {
        assert!(functions.contains(name), "{name} missing");
    }
    assert_eq!(functions.len(), BUILTIN_FUNCTIONS.len() + 1);
}

#[test]
fn closure_snapshot_ignores_later_assignments() {
    assert_output("let x = 1; fn f() { return x; } x = 2; f()", "1");
}

#[test]
fn index_assignment_then_read() {
    assert_output("let a = [1]; a[3] = 9; a", "[1, null, null, 9]");
}

#[test]
fn auto_vivified_path_reads_back() {
    assert_output(r#"user.name.first = "a"; user.name.first"#, "a");
}

#[test]
fn whole_numbers_print_without_fraction() {
    assert_output("3.0", "3");
}
