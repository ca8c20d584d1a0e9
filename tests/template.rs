mod common;

use brickengine::{Context, Error, ErrorKind, Evaluator, Functions, Value, run_template};
use common::functions;
use pretty_assertions::assert_eq;

fn render(source: &str, ctx: &mut Context) -> Result<String, Error> {
    common::init_test_logging();
    run_template(source, ctx, &functions())
}

#[test]
fn text_without_placeholders_is_unchanged() {
    let source = "Plain text with { single } braces and no placeholders.";
    assert_eq!(render(source, &mut Context::new()).unwrap(), source);
}

#[test]
fn placeholders_are_replaced() {
    let mut ctx = Context::new();
    ctx.insert("user", Value::object([("name", Value::from("Ada"))]));
    ctx.insert("disk", 1.5);

    let out = render("Hi {{user.name}}, you have {{ gb(disk) }} MB.", &mut ctx).unwrap();
    assert_eq!(out, "Hi Ada, you have 1536 MB.");
}

#[test]
fn numbers_keep_their_fraction() {
    let mut ctx = Context::new();
    assert_eq!(render("{{ 7 / 2 }} {{ 3 }} {{ [0.5, 'a'] }}", &mut ctx).unwrap(),
               r#"3.5 3 [0.5, "a"]"#);
}

#[test]
fn script_and_template_format_differently() {
    let functions = functions();
    let evaluator = Evaluator::new(&functions);

    let script = evaluator.run_script("3.5", &mut Context::new()).unwrap();
    let template = evaluator.run_template("{{ 3.5 }}", &mut Context::new()).unwrap();

    assert_eq!(script, "4");
    assert_eq!(template, "3.5");
}

#[test]
fn rendering_is_idempotent() {
    let mut ctx = Context::new();
    ctx.insert("price", 12.25);

    let once = render("Price: {{ price | 0 }}", &mut ctx).unwrap();
    let twice = render(&once, &mut ctx).unwrap();

    assert_eq!(once, "Price: 12.25");
    assert_eq!(once, twice);
}

#[test]
fn fallbacks_inside_placeholders() {
    let mut ctx = Context::new();
    assert_eq!(render("{{ missing | 'n/a' }} / {{ 1 / 0 | 'inf' }}", &mut ctx).unwrap(), "n/a / inf");
}

#[test]
fn placeholders_share_the_context() {
    let mut ctx = Context::new();
    ctx.insert("items", vec![Value::from(1.0)]);

    let out = render("{{ push(items, 2) }} then {{ len(items) }}", &mut ctx).unwrap();
    assert_eq!(out, "[1, 2] then 1");
}

#[test]
fn placeholder_errors_name_the_placeholder() {
    let err = render("ok {{ 1 / 0 }} never", &mut Context::new()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Arithmetic);
    assert!(matches!(&err, Error::Placeholder { expression, .. } if expression == "1 / 0"));
    assert!(err.to_string().starts_with("In placeholder '{{ 1 / 0 }}'"), "{err}");
}

#[test]
fn placeholder_syntax_errors() {
    let err = render("{{ 1 2 }}", &mut Context::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);

    let err = render("{{ }}", &mut Context::new()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn deeply_nested_placeholder_is_a_syntax_error() {
    let source = format!("total: {{{{ {}1{} }}}}", "(".repeat(3000), ")".repeat(3000));
    let err = render(&source, &mut Context::new()).unwrap_err();

    assert!(matches!(err, Error::Placeholder { .. }));
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn placeholders_do_not_span_lines() {
    let source = "{{ 1 +\n 2 }}";
    assert_eq!(run_template(source, &mut Context::new(), &Functions::new()).unwrap(), source);
}
