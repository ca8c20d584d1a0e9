use std::time::{Duration, Instant};

use brickengine::{
    ErrorKind, ParseError,
    ast::{BinaryOperator, Expr, ForKind, LiteralValue, ObjectEntry, Statement},
    interpreter::parser::core::{MAX_NESTING, parse_script, parse_template_expression},
};
use pretty_assertions::assert_eq;

fn number(value: f64) -> Expr {
    Expr::Literal { value: LiteralValue::Number(value),
                    line:  1, }
}

fn variable(path: &[&str]) -> Expr {
    Expr::Variable { path: path.iter().map(|s| (*s).to_owned()).collect(),
                     line: 1, }
}

fn binary(left: Expr, op: BinaryOperator, right: Expr) -> Expr {
    Expr::Binary { left: Box::new(left),
                   op,
                   right: Box::new(right),
                   line: 1 }
}

#[test]
fn binary_chains_are_left_associative() {
    let expr = parse_template_expression("1 + 2 * 3").unwrap();
    assert_eq!(expr,
               binary(binary(number(1.0), BinaryOperator::Add, number(2.0)),
                      BinaryOperator::Mul,
                      number(3.0)));
}

#[test]
fn glued_negative_becomes_subtraction() {
    let expr = parse_template_expression("x -1").unwrap();
    assert_eq!(expr, binary(variable(&["x"]), BinaryOperator::Sub, number(1.0)));
}

#[test]
fn pipe_binds_loosest() {
    let expr = parse_template_expression("a + 1 | b").unwrap();
    assert_eq!(expr,
               Expr::Pipe { preferred: Box::new(binary(variable(&["a"]), BinaryOperator::Add, number(1.0))),
                            fallback:  Box::new(variable(&["b"])),
                            line:      1, });
}

#[test]
fn suffixes_chain() {
    let expr = parse_template_expression("obj.items[0](2)").unwrap();
    assert_eq!(expr,
               Expr::Call { target:    Box::new(Expr::Index { target: Box::new(variable(&["obj", "items"])),
                                                              index:  Box::new(number(0.0)),
                                                              line:   1, }),
                            arguments: vec![number(2.0)],
                            line:      1, });
}

#[test]
fn assignments() {
    let program = parse_script("a.b = 1; list[2] = 3").unwrap();
    assert_eq!(program,
               vec![Statement::Assign { path:  vec!["a".to_owned(), "b".to_owned()],
                                        value: number(1.0),
                                        line:  1, },
                    Statement::IndexAssign { path:  vec!["list".to_owned()],
                                             index: number(2.0),
                                             value: number(3.0),
                                             line:  1, }]);
}

#[test]
fn equality_is_not_assignment() {
    let program = parse_script("a == 1").unwrap();
    assert!(matches!(program[0], Statement::Expression { .. }));
}

#[test]
fn object_methods_become_functions() {
    let expr = parse_template_expression("{ n: 1, f: fn(x) { return x } }").unwrap();
    let Expr::Object { entries, .. } = expr else {
        panic!("expected an object literal");
    };
    assert_eq!(entries[0].0, "n");
    let ObjectEntry::Function(def) = &entries[1].1 else {
        panic!("expected a method");
    };
    assert_eq!(def.params, vec!["x".to_owned()]);
    assert_eq!(def.body.len(), 1);
}

#[test]
fn nested_objects_split_double_braces() {
    let expr = parse_template_expression("{a: {b: 1}}").unwrap();
    let Expr::Object { entries, .. } = expr else {
        panic!("expected an object literal");
    };
    assert!(matches!(entries[0].1, ObjectEntry::Value(Expr::Object { .. })));
}

#[test]
fn both_for_forms() {
    let program = parse_script("for let i = 0; i < 3; i = i + 1 { } for (x in xs) { }").unwrap();
    assert!(matches!(&program[0], Statement::For { kind: ForKind::Classic { .. }, .. }));
    assert!(matches!(&program[1], Statement::For { kind: ForKind::Each { var, .. }, .. } if var == "x"));
}

#[test]
fn if_else_if_else() {
    let program = parse_script("if a { } else if b { } else if c { } else { 1 }").unwrap();
    let Statement::If { else_ifs,
                        else_block,
                        .. } = &program[0]
    else {
        panic!("expected an if statement");
    };
    assert_eq!(else_ifs.len(), 2);
    assert_eq!(else_block.as_ref().map(Vec::len), Some(1));
}

#[test]
fn bare_return() {
    let program = parse_script("fn f() { return }").unwrap();
    let Statement::Function(def) = &program[0] else {
        panic!("expected a function");
    };
    assert_eq!(def.body[0], Statement::Return { value: None, line: 1 });
}

#[test]
fn template_expression_rejects_trailing_tokens() {
    assert!(matches!(parse_template_expression("1 2"), Err(ParseError::TrailingTokens { .. })));
    assert!(parse_template_expression("1 }}").is_ok());
}

#[test]
fn error_kinds() {
    let kind = |source: &str| parse_script(source).unwrap_err().kind();

    assert_eq!(kind("a[]"), ErrorKind::Range);
    assert_eq!(kind("f(1,)"), ErrorKind::Syntax);
    assert_eq!(kind("{ 1: 2 }"), ErrorKind::Syntax);
    assert_eq!(kind("try { } 1"), ErrorKind::Syntax);
    assert!(matches!(parse_script("if x { 1"), Err(ParseError::UnterminatedBlock { .. })));
    assert!(matches!(parse_script("a + 1 = 2"), Err(ParseError::InvalidAssignmentTarget { .. })
                                               | Err(ParseError::UnexpectedToken { .. })));
    assert!(matches!(parse_script("f() = 2"), Err(ParseError::InvalidAssignmentTarget { .. })));
}

fn nested(open: &str, inner: &str, close: &str, depth: usize) -> String {
    format!("{}{inner}{}", open.repeat(depth), close.repeat(depth))
}

#[test]
fn nested_function_arguments_parse_in_linear_time() {
    let source = nested("f({m: fn() { ", "1", " }})", 25);
    let started = Instant::now();

    let program = parse_script(&source).unwrap();

    assert_eq!(program.len(), 1);
    assert!(matches!(program[0], Statement::Expression { expr: Expr::Call { .. }, .. }));
    assert!(started.elapsed() < Duration::from_secs(2), "took {:?}", started.elapsed());
}

#[test]
fn assignment_targets_are_parsed_once() {
    let program = parse_script("cfg.items[f({m: fn() { g(1) }})] = 2; cfg.items[0] + 1").unwrap();

    assert!(matches!(program[0], Statement::IndexAssign { .. }));
    assert!(matches!(program[1], Statement::Expression { expr: Expr::Binary { .. }, .. }));
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let source = nested("(", "1", ")", 3000);

    let err = parse_script(&source).unwrap_err();
    assert_eq!(err, ParseError::NestingTooDeep { limit: MAX_NESTING,
                                                 line:  1, });
    assert_eq!(err.kind(), ErrorKind::Syntax);

    assert!(matches!(parse_template_expression(&source), Err(ParseError::NestingTooDeep { .. })));
    assert!(matches!(parse_script(&nested("[", "1", "]", 3000)), Err(ParseError::NestingTooDeep { .. })));
    assert!(matches!(parse_script(&nested("if true { ", "1", " }", 3000)),
                     Err(ParseError::NestingTooDeep { .. })));
}

#[test]
fn long_chains_are_bounded() {
    for source in [format!("0{}", " + 1".repeat(20_000)),
                   format!("a{}", "[0]".repeat(20_000)),
                   format!("f{}", "()".repeat(20_000)),
                   format!("a{}", " | b".repeat(20_000))]
    {
        assert!(matches!(parse_script(&source), Err(ParseError::NestingTooDeep { .. })));
    }
}

#[test]
fn nesting_below_the_ceiling_parses() {
    assert!(parse_script(&nested("(", "1", ")", 3000)).is_err());

    assert!(parse_script(&nested("(", "1", ")", 150)).is_ok());
    assert!(parse_script(&format!("0{}", " + 1".repeat(150))).is_ok());
    assert!(parse_script(&nested("{a: ", "1", "}", 60)).is_ok());
}
