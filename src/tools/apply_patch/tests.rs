#![cfg(test)]

use super::model::{Op, PatchError};
use super::parsing::parse_hunks;
use super::{Applied, PatchOptions, apply, apply_with};

fn changed(text: &str) -> Applied {
    Applied {
        text: text.to_string(),
        changed: true,
    }
}

fn unchanged(text: &str) -> Applied {
    Applied {
        text: text.to_string(),
        changed: false,
    }
}

#[test]
fn replaces_one_line_with_two() {
    let out = apply("a\nb\nc\n", "@@ -2,1 +2,2 @@\n-b\n+x\n+y\n").unwrap();
    assert_eq!(out, changed("a\nx\ny\nc\n"));
}

#[test]
fn mismatching_delete_fails_and_reports_both_sides() {
    let err = apply("a\nb\nc\n", "@@ -2,1 +2,1 @@\n-z\n+x\n").unwrap_err();
    assert_eq!(
        err,
        PatchError::HunkContextMismatch {
            hunk: 1,
            line: 2,
            expected: vec!["z".into()],
            actual: vec!["b".into()],
        }
    );
    assert_eq!(
        err.to_string(),
        "hunk 1: context mismatch at line 2: expected \"z\", found \"b\""
    );
}

#[test]
fn no_newline_marker_on_final_add_strips_trailing_newline() {
    let out = apply("a\nb\nc\n", "@@ -3,1 +3,1 @@\n-c\n+d\n\\ No newline at end of file\n").unwrap();
    assert_eq!(out, changed("a\nb\nd"));
}

#[test]
fn empty_patch_is_a_no_op() {
    assert_eq!(apply("a\nb\n", "").unwrap(), unchanged("a\nb\n"));
    assert_eq!(apply("a\nb\n", "\n\n").unwrap(), unchanged("a\nb\n"));
}

#[test]
fn context_only_patch_is_a_no_op() {
    let out = apply("a\nb\nc\n", "@@ -1,2 +1,2 @@\n a\n b\n").unwrap();
    assert_eq!(out, unchanged("a\nb\nc\n"));
}

#[test]
fn reapplying_never_doubles_the_edit() {
    let src = "fn main() {\n    old();\n}\n";
    let patch = "@@ -1,3 +1,3 @@\n fn main() {\n-    old();\n+    new();\n }\n";
    let first = apply(src, patch).unwrap();
    assert!(first.changed);
    let second = apply(&first.text, patch).unwrap_err();
    assert!(matches!(second, PatchError::HunkContextMismatch { .. }));

    let additive = "@@ -1,2 +1,3 @@\n fn main() {\n+    extra();\n     new();\n";
    let grown = apply(&first.text, additive).unwrap();
    assert_eq!(grown.text, "fn main() {\n    extra();\n    new();\n}\n");
    assert!(matches!(
        apply(&grown.text, additive),
        Err(PatchError::HunkContextMismatch { .. })
    ));
}

#[test]
fn reapplying_an_append_after_context_is_a_no_op() {
    let patch = "@@ -1,1 +1,2 @@\n a\n+x\n";
    let first = apply("a\nb\n", patch).unwrap();
    assert_eq!(first, changed("a\nx\nb\n"));
    assert_eq!(apply(&first.text, patch).unwrap(), unchanged("a\nx\nb\n"));
}

#[test]
fn reapplying_a_pure_insertion_is_a_no_op() {
    let patch = "@@ -1,0 +2,1 @@\n+b\n";
    let first = apply("a\nc\n", patch).unwrap();
    assert_eq!(first, changed("a\nb\nc\n"));
    assert_eq!(apply(&first.text, patch).unwrap(), unchanged("a\nb\nc\n"));
}

#[test]
fn reapplying_any_hunk_shape_fails_or_changes_nothing() {
    let src = "alpha\nbeta\ngamma\ndelta\nepsilon\n";
    let patches = [
        "@@ -2,1 +2,1 @@\n-beta\n+BETA\n",
        "@@ -2,1 +2,2 @@\n beta\n+after beta\n",
        "@@ -2,1 +2,2 @@\n+before beta\n beta\n",
        "@@ -2,2 +2,3 @@\n beta\n+between\n gamma\n",
        "@@ -2,0 +3,2 @@\n+inserted one\n+inserted two\n",
        "@@ -0,0 +1,1 @@\n+header\n",
        "@@ -5,1 +5,2 @@\n epsilon\n+last\n",
        "@@ -3,2 +3,1 @@\n gamma\n-delta\n",
        "@@ -1,1 +1,2 @@\n alpha\n+one\n@@ -4,1 +5,2 @@\n delta\n+two\n",
        "@@ -1,2 +1,1 @@\n-alpha\n beta\n@@ -5,0 +5,1 @@\n+tail\n",
    ];
    for (i, patch) in patches.into_iter().enumerate() {
        let first = apply(src, patch).unwrap();
        assert!(first.changed, "case {i}");
        match apply(&first.text, patch) {
            Ok(again) => assert_eq!(again, unchanged(&first.text), "case {i}"),
            Err(e) => assert!(
                matches!(e, PatchError::HunkContextMismatch { .. }),
                "case {i}: {e}"
            ),
        }
    }
}

#[test]
fn insertion_past_the_end_is_a_mismatch() {
    assert!(matches!(
        apply("a\nb\n", "@@ -4,0 +5,1 @@\n+z\n"),
        Err(PatchError::HunkContextMismatch { hunk: 1, .. })
    ));
    assert_eq!(
        apply("a\nb\n", "@@ -2,0 +3,1 @@\n+z\n").unwrap(),
        changed("a\nb\nz\n")
    );
}

#[test]
fn enormous_line_numbers_are_rejected_not_wrapped() {
    let overflowing = format!("@@ -{},1 +1,1 @@\n-a\n+b\n", usize::MAX);
    assert!(matches!(
        apply("a\n", &overflowing),
        Err(PatchError::MalformedHeader { hunk: 1, line: 1, .. })
    ));

    let second = format!(
        "@@ -1,1 +1,1 @@\n-a\n+b\n@@ -{},2 +1,2 @@\n-x\n-y\n+x\n+y\n",
        usize::MAX
    );
    assert!(matches!(
        apply("a\n", &second),
        Err(PatchError::MalformedHeader { hunk: 2, .. })
    ));

    let at_the_edge = format!("@@ -{},1 +1,1 @@\n-a\n+b\n", usize::MAX - 1);
    assert!(matches!(
        apply("a\n", &at_the_edge),
        Err(PatchError::HunkContextMismatch { hunk: 1, .. })
    ));
}

#[test]
fn preserves_everything_outside_the_hunk() {
    let src: String = (1..=20).map(|n| format!("line {n}\n")).collect();
    let out = apply(&src, "@@ -10,2 +10,1 @@\n-line 10\n-line 11\n+merged\n").unwrap();
    let expected: String = (1..=20)
        .map(|n| match n {
            10 => "merged\n".to_string(),
            11 => String::new(),
            _ => format!("line {n}\n"),
        })
        .collect();
    assert_eq!(out, changed(&expected));
}

#[test]
fn tolerates_hunks_off_by_a_few_lines() {
    let src = "a\nb\nc\nd\ne\nf\n";
    // Declared at 2, really at 4.
    let out = apply(src, "@@ -2,2 +2,2 @@\n d\n-e\n+E\n").unwrap();
    assert_eq!(out, changed("a\nb\nc\nd\nE\nf\n"));
}

#[test]
fn drift_beyond_the_window_is_a_mismatch() {
    let src = "a\nb\nc\nd\ne\nf\n";
    let patch = "@@ -1,1 +1,1 @@\n-f\n+F\n";
    assert!(matches!(
        apply(src, patch),
        Err(PatchError::HunkContextMismatch { hunk: 1, line: 1, .. })
    ));
    let wide = PatchOptions { search_window: 5 };
    assert_eq!(
        apply_with(src, patch, &wide).unwrap(),
        changed("a\nb\nc\nd\ne\nF\n")
    );
}

#[test]
fn multiple_hunks_apply_in_order() {
    let src = "one\ntwo\nthree\nfour\nfive\nsix\n";
    let patch = "\
@@ -1,2 +1,2 @@
-one
+ONE
 two
@@ -5,2 +5,3 @@
 five
+five and a half
 six
";
    let out = apply(src, patch).unwrap();
    assert_eq!(
        out,
        changed("ONE\ntwo\nthree\nfour\nfive\nfive and a half\nsix\n")
    );
}

#[test]
fn failure_in_a_later_hunk_discards_earlier_ones() {
    let src = "one\ntwo\nthree\n";
    let patch = "@@ -1,1 +1,1 @@\n-one\n+ONE\n@@ -3,1 +3,1 @@\n-nope\n+NOPE\n";
    let err = apply(src, patch).unwrap_err();
    assert!(matches!(
        err,
        PatchError::HunkContextMismatch { hunk: 2, line: 3, .. }
    ));
}

#[test]
fn out_of_order_hunks_are_rejected() {
    let src = "a\nb\nc\nd\n";
    let patch = "@@ -3,1 +3,1 @@\n-c\n+C\n@@ -1,1 +1,1 @@\n-a\n+A\n";
    assert_eq!(
        apply(src, patch).unwrap_err(),
        PatchError::OutOfOrderHunk {
            hunk: 2,
            start: 1,
            previous_end: 3
        }
    );
}

#[test]
fn overlapping_hunks_are_rejected() {
    let src = "a\nb\nc\nd\n";
    let patch = "@@ -1,3 +1,3 @@\n a\n b\n-c\n+C\n@@ -2,1 +2,1 @@\n-b\n+B\n";
    assert!(matches!(
        apply(src, patch),
        Err(PatchError::OutOfOrderHunk { hunk: 2, .. })
    ));
}

#[test]
fn insert_at_top_of_file() {
    let out = apply("b\n", "@@ -0,0 +1,1 @@\n+a\n").unwrap();
    assert_eq!(out, changed("a\nb\n"));
}

#[test]
fn insert_after_a_line() {
    let out = apply("a\nc\n", "@@ -1,0 +2,1 @@\n+b\n").unwrap();
    assert_eq!(out, changed("a\nb\nc\n"));
}

#[test]
fn insert_into_empty_file_ends_with_newline() {
    let out = apply("", "@@ -0,0 +1,2 @@\n+hello\n+world\n").unwrap();
    assert_eq!(out, changed("hello\nworld\n"));
}

#[test]
fn appending_to_a_file_without_final_newline_adds_one() {
    let out = apply("a\nb", "@@ -2,1 +2,2 @@\n b\n+c\n").unwrap();
    assert_eq!(out, changed("a\nb\nc\n"));
}

#[test]
fn editing_the_middle_keeps_missing_final_newline() {
    let out = apply("a\nb\nc", "@@ -2,1 +2,1 @@\n-b\n+B\n").unwrap();
    assert_eq!(out, changed("a\nB\nc"));
}

#[test]
fn restoring_final_newline_the_unified_diff_way() {
    let patch = "@@ -1,1 +1,1 @@\n-a\n\\ No newline at end of file\n+a\n";
    let out = apply("a", patch).unwrap();
    assert_eq!(out, changed("a\n"));
}

#[test]
fn marker_on_a_context_line_at_eof() {
    let patch = "@@ -1,2 +1,2 @@\n-a\n+A\n b\n\\ No newline at end of file\n";
    let out = apply("a\nb\n", patch).unwrap();
    assert_eq!(out, changed("A\nb"));
}

#[test]
fn marker_away_from_eof_is_ignored() {
    let patch = "@@ -1,1 +1,1 @@\n-a\n+A\n\\ No newline at end of file\n";
    let out = apply("a\nb\n", patch).unwrap();
    assert_eq!(out, changed("A\nb\n"));
}

#[test]
fn deleting_everything_yields_empty_text() {
    let out = apply("a\nb\n", "@@ -1,2 +0,0 @@\n-a\n-b\n").unwrap();
    assert_eq!(out, changed(""));
}

#[test]
fn blank_lines_count_as_empty_context() {
    let src = "fn a() {}\n\nfn b() {}\n";
    let patch = "@@ -1,3 +1,3 @@\n fn a() {}\n\n-fn b() {}\n+fn c() {}\n";
    let out = apply(src, patch).unwrap();
    assert_eq!(out, changed("fn a() {}\n\nfn c() {}\n"));
}

#[test]
fn stray_trailing_blank_lines_are_dropped() {
    let out = apply("a\nb\n", "@@ -2,1 +2,1 @@\n-b\n+B\n\n\n").unwrap();
    assert_eq!(out, changed("a\nB\n"));
}

#[test]
fn crlf_patch_lines_are_normalized() {
    let out = apply("a\nb\n", "@@ -2,1 +2,1 @@\r\n-b\r\n+B\r\n").unwrap();
    assert_eq!(out, changed("a\nB\n"));
}

#[test]
fn unified_diff_file_preamble_is_tolerated() {
    let patch = "--- a/src/x.txt\n+++ b/src/x.txt\n@@ -1 +1 @@\n-a\n+b\n";
    assert_eq!(apply("a\n", patch).unwrap(), changed("b\n"));
}

#[test]
fn parse_header_with_defaults_and_section_text() {
    let hunks = parse_hunks("@@ -3 +4 @@ fn main() {\n-x\n+y\n").unwrap();
    assert_eq!(hunks.len(), 1);
    let h = &hunks[0];
    assert_eq!((h.old_start, h.old_len, h.new_start, h.new_len), (3, 1, 4, 1));
    assert_eq!(h.ops, vec![Op::Delete("x".into()), Op::Add("y".into())]);
}

#[test]
fn parse_binds_marker_to_previous_op() {
    let hunks = parse_hunks("@@ -1,1 +1,1 @@\n-a\n+b\n\\ No newline at end of file\n").unwrap();
    assert_eq!(
        hunks[0].ops,
        vec![
            Op::Delete("a".into()),
            Op::Add("b".into()),
            Op::NoNewlineAtEof
        ]
    );
}

#[test]
fn parse_errors() {
    let cases: [(&str, PatchError); 6] = [
        (
            "@@ -a,1 +1,1 @@\n-x\n+y\n",
            PatchError::MalformedHeader {
                hunk: 1,
                line: 1,
                reason: "`a,1` is not a line range".into(),
            },
        ),
        (
            "@@ -1,1 +1,1\n-x\n+y\n",
            PatchError::MalformedHeader {
                hunk: 1,
                line: 1,
                reason: "missing closing `@@`".into(),
            },
        ),
        (
            "@@ -1,2 +1,1 @@\n-x\n+y\n",
            PatchError::MalformedHeader {
                hunk: 1,
                line: 1,
                reason: "header declares 2 old and 1 new lines but the body has 1 old and 1 new"
                    .into(),
            },
        ),
        (
            "@@ -1,1 +1,1 @@\n\\ No newline at end of file\n-x\n+y\n",
            PatchError::DanglingNoNewlineMarker { hunk: 1, line: 2 },
        ),
        (
            "@@ -1,1 +1,1 @@\n-x\n*y\n",
            PatchError::UnrecognizedLine {
                hunk: 1,
                line: 3,
                text: "*y".into(),
            },
        ),
        (
            "some prose\n@@ -1,1 +1,1 @@\n-x\n+y\n",
            PatchError::UnrecognizedLine {
                hunk: 1,
                line: 1,
                text: "some prose".into(),
            },
        ),
    ];
    for (i, (patch, want)) in cases.into_iter().enumerate() {
        assert_eq!(parse_hunks(patch).unwrap_err(), want, "case {i}");
    }
}

#[test]
fn parse_error_leaves_text_untouched() {
    // The engine never hands back partial output; callers keep their original.
    let original = "a\n";
    let result = apply(original, "@@ -1,1 +1,1 @@\n-a\n\\\n\\\n+b\n");
    assert!(matches!(
        result,
        Err(PatchError::DanglingNoNewlineMarker { hunk: 1, line: 4 })
    ));
}

#[test]
fn zero_start_needs_zero_length() {
    assert!(matches!(
        parse_hunks("@@ -0,1 +1,1 @@\n-a\n+b\n"),
        Err(PatchError::MalformedHeader { .. })
    ));
}

#[test]
fn second_hunk_index_is_reported() {
    let err = parse_hunks("@@ -1,1 +1,1 @@\n-a\n+b\n@@ nonsense\n").unwrap_err();
    assert!(matches!(
        err,
        PatchError::MalformedHeader {
            hunk: 2,
            line: 4,
            ..
        }
    ));
}
