mod common;

use std::{fs, path::Path};

use brickengine::{Context, run_script, run_template};
use common::functions;
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

/// Runs every `scripts/*.bee` script and `scripts/*.tpl` template and
/// compares the output with the `.golden` file next to it.
#[test]
fn scripts_match_golden_output() {
    common::init_test_logging();
    let mut count = 0;

    for entry in WalkDir::new("scripts").max_depth(1)
                                        .into_iter()
                                        .filter_map(Result::ok)
                                        .filter(|e| {
                                            e.path()
                                             .extension()
                                             .is_some_and(|ext| ext == "bee" || ext == "tpl")
                                        })
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected = read_golden(path);

        let mut ctx = Context::new();
        let result = if path.extension().is_some_and(|ext| ext == "tpl") {
            run_template(&source, &mut ctx, &functions())
        } else {
            run_script(&source, &mut ctx, &functions())
        };

        let actual = result.unwrap_or_else(|e| panic!("{path:?} failed: {e}"));
        assert_eq!(actual.trim_end(), expected.trim_end(), "output of {path:?}");
        count += 1;
    }

    assert!(count > 0, "No scripts found in scripts/");
}

/// Every `scripts/fails/*.bee` script must be rejected, either while parsing
/// or while running.
#[test]
fn failing_scripts_are_rejected() {
    common::init_test_logging();
    let mut count = 0;

    for entry in WalkDir::new("scripts/fails").into_iter()
                                              .filter_map(Result::ok)
                                              .filter(|e| e.path().extension().is_some_and(|ext| ext == "bee"))
    {
        let path = entry.path();
        let source = fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        if let Ok(out) = run_script(&source, &mut Context::new(), &functions()) {
            panic!("{path:?} succeeded with {out:?} but was expected to fail");
        }
        count += 1;
    }

    assert!(count > 0, "No scripts found in scripts/fails/");
}

fn read_golden(path: &Path) -> String {
    let golden = path.with_extension("golden");
    fs::read_to_string(&golden).unwrap_or_else(|e| panic!("Missing golden file {golden:?}: {e}"))
}
