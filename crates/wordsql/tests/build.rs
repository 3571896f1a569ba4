//! End-to-end builds: search line -> SQL, values, IBL and hits.

// Integration tests live outside cfg(test)
#![allow(clippy::tests_outside_test_module)]

use std::fs;

use wordsql::{BuildResult, Config, MAX_DEPTH, SqlBuilder, like_value, replicate_data_type};

/// Lowercases and drops spaces so SQL compares independent of layout.
fn normalize(sql: &str) -> String {
    sql.replace(' ', "").to_lowercase()
}

/// Asserts every output of a build against its expected form.
fn assert_build(result: &BuildResult, sql: &str, values: &[&str], ibl: &str, hits: &[&str]) {
    assert_eq!(normalize(&result.sql), normalize(sql), "sql: {}", result.sql);
    assert_eq!(result.values, values);
    assert_eq!(result.ibl, ibl);
    assert_eq!(result.hits, hits);
}

#[test]
fn test_build_single_words() {
    let builder = SqlBuilder::new("c = ?");
    let cases: &[(&str, &str, &[&str], &str, &[&str])] = &[
        ("test", "(c = ?)", &["test"], "test", &["test"]),
        ("-test", "( not (c = ?))", &["test"], "-test", &[]),
        ("--test", "( not (not (c = ?)))", &["test"], "-(-test)", &[]),
        (r"\test", "(c = ?)", &[r"\test"], "test", &[r"\test"]),
        ("$test", "(c = ?)", &["$test"], "$test", &["$test"]),
    ];

    for &(line, sql, values, ibl, hits) in cases {
        let result = builder.build(line).unwrap();
        assert_build(&result, sql, values, ibl, hits);
    }
}

#[test]
fn test_build_phrases_and_escapes() {
    let builder = SqlBuilder::new("c = ?");
    let cases: &[(&str, &str, &[&str], &str, &[&str])] = &[
        (r#""test""#, "(c = ?)", &["test"], r#""test""#, &["test"]),
        (
            r#""test test""#,
            "(c = ?)",
            &["test test"],
            r#""test test""#,
            &["test test"],
        ),
        (r#""-test""#, "(c = ?)", &["-test"], r#""-test""#, &["-test"]),
        (
            r#""test\" test""#,
            "(c = ?)",
            &[r#"test" test"#],
            r#""test test""#,
            &[r#"test" test"#],
        ),
        (
            r#""test\"\" test""#,
            "(c = ?)",
            &[r#"test"" test"#],
            r#""test test""#,
            &[r#"test"" test"#],
        ),
        (
            r#"\\"test\""#,
            "(c = ?)",
            &[r#"\"test""#],
            "test",
            &[r#"\"test""#],
        ),
        (
            r#"\"test\"\" test\""#,
            "((c = ?) and (c = ?))",
            &[r#""test"""#, r#"test""#],
            "+test +test",
            &[r#""test"""#, r#"test""#],
        ),
    ];

    for &(line, sql, values, ibl, hits) in cases {
        let result = builder.build(line).unwrap();
        assert_build(&result, sql, values, ibl, hits);
    }
}

#[test]
fn test_build_operators() {
    let builder = SqlBuilder::new("c = ?");
    let cases: &[(&str, &str, &[&str], &str, &[&str])] = &[
        (
            "test1 test2",
            "((c = ?) and (c = ?))",
            &["test1", "test2"],
            "+test1 +test2",
            &["test1", "test2"],
        ),
        (
            " test1  test2",
            "((c = ?) and (c = ?))",
            &["test1", "test2"],
            "+test1 +test2",
            &["test1", "test2"],
        ),
        (
            "test1 OR test2",
            "((c = ?) or (c = ?))",
            &["test1", "test2"],
            "(test1 test2)",
            &["test1", "test2"],
        ),
        (
            "test1 -test2",
            "((c = ?) and ( not (c = ?)))",
            &["test1", "test2"],
            "+test1 -test2",
            &["test1"],
        ),
        (
            "test1 OR -test2",
            "((c = ?) or ( not (c = ?)))",
            &["test1", "test2"],
            "(test1 -test2)",
            &["test1"],
        ),
        (
            "test1 (test2 OR test3)",
            "((c = ?) and (((c = ?) or (c = ?))))",
            &["test1", "test2", "test3"],
            "+test1 +(((test2 test3)))",
            &["test1", "test2", "test3"],
        ),
        (
            "(test1 test2) OR test3",
            "((((c = ?) and (c = ?))) or (c = ?))",
            &["test1", "test2", "test3"],
            "((+test1 +test2) test3)",
            &["test1", "test2", "test3"],
        ),
        (
            "-(test1 test2) OR test3 test4",
            "(((not(((c=?) and (c=?)))) or (c=?)) and (c=?))",
            &["test1", "test2", "test3", "test4"],
            "+(-((+test1 +test2)) test3) +test4",
            &["test3", "test4"],
        ),
    ];

    for &(line, sql, values, ibl, hits) in cases {
        let result = builder.build(line).unwrap();
        assert_build(&result, sql, values, ibl, hits);
    }
}

#[test]
fn test_build_exact_sql_layout() {
    let result = SqlBuilder::new("c = ?").build("a -(b OR c)").unwrap();
    assert_eq!(
        result.sql,
        "( (c = ?) AND ( not ( ( (c = ?) OR (c = ?) ) ) ) )"
    );
}

#[test]
fn test_build_with_uppercase_values() {
    let builder = SqlBuilder::new("c = ?").with_value_converter(|word| word.to_uppercase());
    let result = builder.build("test").unwrap();
    assert_eq!(result.sql, "(c = ?)");
    assert_eq!(result.values, vec!["TEST"]);
    assert_eq!(result.ibl, "test");
    assert_eq!(result.hits, vec!["test"]);
}

#[test]
fn test_build_with_composite_values() {
    let builder = SqlBuilder::new("c = ? OR d = ?")
        .with_value_converter(|word| vec![word.to_owned(), word.to_uppercase()]);
    let result = builder.build("test x").unwrap();
    assert_eq!(result.values, vec![vec!["test", "TEST"], vec!["x", "X"]]);
    assert_eq!(
        replicate_data_type(result.values.len(), "text", 2),
        Some(vec!["text"; 4])
    );
}

#[test]
fn test_build_with_like_values() {
    let builder = SqlBuilder::new("body LIKE ?").with_value_converter(like_value);
    let result = builder.build("50% te*st").unwrap();
    assert_eq!(result.values, vec![r"%50\%%", "%te%st%"]);
    assert_eq!(result.hits, vec!["50%", "te", "st"]);
}

#[test]
fn test_build_converters_see_unescaped_words() {
    let builder = SqlBuilder::new("c = ?")
        .with_value_converter(|word| word.to_owned())
        .with_ibl_converter(|word| word.to_owned());

    let result = builder.build(r#""a\"b\\c""#).unwrap();
    assert_eq!(result.values, vec![r#"a"b\c"#]);
    assert_eq!(result.ibl, r#""a"b\c""#);

    let result = builder.build(r#"x\"y z\\w"#).unwrap();
    assert_eq!(result.values, vec![r#"x"y"#, r"z\w"]);
    assert_eq!(result.ibl, r#"+x"y +z\w"#);
}

#[test]
fn test_build_rejects_all_wildcards() {
    let err = SqlBuilder::new("c = ?").build("*****").unwrap_err();
    assert!(err.is_syntax());
    assert!(err.to_string().contains("wildcard"));
}

#[test]
fn test_build_rejects_malformed_lines() {
    let builder = SqlBuilder::new("c = ?");
    for line in ["", "   ", "(a", "a)", "()", "a OR", "OR a", "a -", "-", r#""""#] {
        let err = builder.build(line).unwrap_err();
        assert!(err.is_syntax(), "{line:?}: {err}");
    }
}

#[test]
fn test_build_error_points_at_query() {
    let err = SqlBuilder::new("c = ?").build("mysql (index").unwrap_err();
    let rendered = err.to_string();
    assert!(rendered.contains("mysql (index"));
    assert!(rendered.contains('^'));
}

#[test]
fn test_is_complement() {
    let builder = SqlBuilder::new("c = ?");
    let cases = [
        ("test", false),
        ("test1 OR test2", false),
        ("test1 test2", false),
        ("-test", true),
        ("-test1 test2", false),
        ("-test1 -test2", true),
        ("-test1 OR -test2", true),
        ("-test1 OR -test2 OR -test3", true),
        ("-test1 OR (test2 test3)", true),
        ("-test1 (test2 OR -test3)", true),
    ];

    for (line, expected) in cases {
        let result = builder.build(line).unwrap();
        assert_eq!(result.is_complement(), expected, "{line}");
    }
}

#[test]
fn test_builder_is_reentrant() {
    let builder = SqlBuilder::new("c = ?");
    let first = builder.build("-a").unwrap();
    let second = builder.build("a b").unwrap();
    assert!(first.is_complement());
    assert!(!second.is_complement());
    assert_eq!(builder.build("-a").unwrap(), first);
}

#[test]
fn test_deep_nesting_fails_under_a_raised_round_limit() {
    let config = Config::from_toml("[builder]\ntemplate = \"c = ?\"\nmax_rounds = 10000000\n")
        .unwrap();
    let builder = SqlBuilder::from_config(&config);

    let negations = format!("{}a", "-".repeat(200_000));
    let err = builder.build(&negations).unwrap_err();
    assert!(err.is_complexity(), "{err}");

    let groups = format!("{}a{}", "(".repeat(100_000), ")".repeat(100_000));
    assert!(builder.build(&groups).unwrap_err().is_complexity());

    let words = vec!["w"; 100_000].join(" ");
    assert!(builder.build(&words).unwrap_err().is_complexity());

    let nested = format!("{}a", "-".repeat(MAX_DEPTH - 1));
    let result = builder.build(&nested).unwrap();
    assert_eq!(result.values, vec!["a"]);
    assert!(result.is_complement());
}

#[test]
fn test_builder_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wordsql.toml");
    fs::write(
        &path,
        "[builder]\ntemplate = \"body LIKE ?\"\nvalue = \"like\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    let builder = SqlBuilder::from_config(&config);
    let result = builder.build("a_b OR c").unwrap();
    assert_eq!(result.sql, "( (body LIKE ?) OR (body LIKE ?) )");
    assert_eq!(result.values, vec![r"%a\_b%", "%c%"]);
    assert_eq!(result.ibl, "(a_b c)");
}
