fn arg(text: &str) -> MethodArg {
    MethodArg::from_text(text)
}

fn predicate(text: &str) -> Result<String, TranslateError> {
    recognize_predicate(&arg(text))
}

fn expr(source: &str) -> Box<Expr> {
    parse_source(source).unwrap().expr
}

fn chain_source(source: &str) -> String {
    extract_method_chain(source, &TranslateOptions::default())
        .unwrap()
        .source
}

#[test]
fn logical_and_binds_tighter_than_or() {
    let parsed = expr("a || b && c");
    let Expr::Bin(or) = parsed.as_ref() else {
        panic!("expected binary expression, got {parsed:?}");
    };
    assert_eq!(or.op, BinaryOp::LogicalOr);
    assert_eq!(identifier(&or.left), Some("a"));
    assert!(matches!(
        or.right.as_ref(),
        Expr::Bin(and) if and.op == BinaryOp::LogicalAnd
    ));
}

#[test]
fn recognizes_arrow_forms() {
    for source in ["p => p.a", "(p) => p.a", "(p) => { return p.a; }", "((p => (p.a)))"] {
        let parsed = parse_source(source).unwrap();
        let (param, body) = single_param_arrow(&parsed.expr).unwrap();
        assert_eq!(param, "p", "{source}");
        assert_eq!(field_path(body, param).as_deref(), Some("a"), "{source}");
    }

    for source in ["async p => p.a", "(p, q) => p.a", "({ a }) => a", "(p) => { p.a; }"] {
        assert!(single_param_arrow(&expr(source)).is_none(), "{source}");
    }
}

#[test]
fn spans_index_source_bytes() {
    let source = "dv.pages('é').where(p => p.a === 1)";
    let parsed = parse_source(source).unwrap();
    let Expr::Call(call) = parsed.expr.as_ref() else {
        panic!("expected call");
    };
    assert_eq!(parsed.slice(call.args[0].expr.span()), "p => p.a === 1");
    assert_eq!(parsed.slice(parsed.expr.span()), source);
}

#[test]
fn decodes_string_and_template_literals() {
    assert_eq!(
        chain_source(r#"dv.pages("a\nA\x42\u{1F600}\"")"#),
        "a\nAB\u{1F600}\""
    );
    assert_eq!(chain_source("dv.pages(`#3done`)"), "#3done");
    assert_eq!(
        chain_source("dv /* inline */ // trailing\n.pages('a')"),
        "a"
    );
}

#[test]
fn numeric_arguments_use_javascript_text() {
    let chain = extract_method_chain(
        "dv.pages().limit(0x1F).limit(1_000).limit(.5)",
        &TranslateOptions::default(),
    )
    .unwrap();
    let texts = chain
        .methods
        .iter()
        .map(|call| call.args[0].text.as_str())
        .collect::<Vec<_>>();
    assert_eq!(texts, vec!["31", "1000", "0.5"]);
}

#[test]
fn rejects_template_substitutions() {
    assert!(matches!(
        extract_method_chain("dv.pages(`#${tag}`)", &TranslateOptions::default()),
        Err(TranslateError::UnsupportedShape(_))
    ));
    assert!(predicate("p => p.a === `${x}`").is_err());
}

#[test]
fn accepts_single_trailing_semicolon() {
    assert!(parse_source("dv.pages();").is_ok());
    assert!(parse_source("dv.pages();;").is_err());
}

#[test]
fn rejects_leftover_tokens() {
    for source in [
        "dv.pages(\"a\")).limit(5",
        "dv.pages() dv.pages()",
        "dv.pages(",
        "dv.pages(\"#tag)",
        "",
    ] {
        assert!(
            matches!(parse_source(source), Err(TranslateError::Syntax { .. })),
            "{source}"
        );
    }
}

#[test]
fn rejects_statements() {
    for source in ["let x = dv.pages()", "dv.pages()\ndv.pages()"] {
        assert!(
            matches!(parse_source(source), Err(TranslateError::UnsupportedShape(_))),
            "{source}"
        );
    }
}

#[test]
fn bounds_nesting_depth() {
    let source = format!("{}a{}", "(".repeat(300), ")".repeat(300));
    let Err(TranslateError::Syntax { offset, message }) = parse_source(&source) else {
        panic!("expected a syntax error");
    };
    assert!(message.contains("nests deeper"), "{message}");
    assert_eq!(offset, MAX_NESTING_DEPTH);

    let negations = format!("{}a", "!".repeat(300));
    assert!(parse_source(&negations).is_err());

    // Closing a group restores its depth, so sibling groups do not add up.
    let group = format!("{}a{}", "(".repeat(30), ")".repeat(30));
    assert!(parse_source(&format!("[{group}, {group}, {group}]")).is_ok());
}

#[test]
fn bounds_token_count() {
    let source = vec!["a"; MAX_TOKENS].join(" || ");
    let Err(TranslateError::Syntax { message, .. }) = parse_source(&source) else {
        panic!("expected a syntax error");
    };
    assert!(message.contains("tokens"), "{message}");
}

#[test]
fn flattens_long_logical_runs_without_recursion() {
    let parsed = expr(&vec!["p.a"; 500].join(" && "));
    let Expr::Bin(bin) = parsed.as_ref() else {
        panic!("expected binary expression");
    };
    assert_eq!(logical_operands(bin).len(), 500);
}

#[test]
fn extracts_chain_in_application_order() {
    let chain = extract_method_chain(
        "dv.pages(\"#3done\").where(p => p.a === 1).limit(10)",
        &TranslateOptions::default(),
    )
    .unwrap();

    assert_eq!(chain.source, "#3done");
    let methods = chain
        .methods
        .iter()
        .map(|call| call.method.as_str())
        .collect::<Vec<_>>();
    assert_eq!(methods, vec!["where", "limit"]);
    assert_eq!(chain.methods[0].args[0].text, "p => p.a === 1");
    assert_eq!(chain.methods[1].args[0].text, "10");
}

#[test]
fn extracts_string_literal_method_names() {
    let chain =
        extract_method_chain("dv[\"pages\"]('books')['limit'](3)", &TranslateOptions::default())
            .unwrap();
    assert_eq!(chain.source, "books");
    assert_eq!(chain.methods[0].method, "limit");
}

#[test]
fn chain_without_root_accessor_has_empty_source() {
    let chain =
        extract_method_chain("pages.where(p => p.a)", &TranslateOptions::default()).unwrap();
    assert_eq!(chain.source, "");
    assert_eq!(chain.methods.len(), 1);
}

#[test]
fn chain_extraction_rejects_non_method_calls() {
    let options = TranslateOptions::default();
    assert!(matches!(
        extract_method_chain("pages(\"#tag\")", &options),
        Err(TranslateError::UnsupportedShape(_))
    ));
    assert!(matches!(
        extract_method_chain("dv", &options),
        Err(TranslateError::UnsupportedShape(_))
    ));
    assert!(matches!(
        extract_method_chain("dv.pages().limit(1).pages()", &options),
        Err(TranslateError::UnsupportedMethod(_))
    ));
}

#[test]
fn translates_field_comparison() {
    assert_eq!(
        predicate("page => page.fileClass === \"Tag\"").unwrap(),
        "fileClass = \"Tag\""
    );
    assert_eq!(predicate("p => p.size >= 10").unwrap(), "size >= 10");
    assert_eq!(predicate("p => p.status != 'done'").unwrap(), "status != \"done\"");
}

#[test]
fn wraps_top_level_or() {
    assert_eq!(
        predicate("p => p.a === 'x' || p.b === 'y'").unwrap(),
        "(a = \"x\" OR b = \"y\")"
    );
}

#[test]
fn keeps_and_grouping_inside_or() {
    assert_eq!(
        predicate("p => p.a === 'x' || p.b === 'y' && p.c === 'z'").unwrap(),
        "(a = \"x\" OR (b = \"y\" AND c = \"z\"))"
    );
    assert_eq!(
        predicate("p => p.a && p.b || p.c && p.d").unwrap(),
        "((a AND b) OR (c AND d))"
    );
    assert_eq!(
        predicate("t => ['#a', '#b'].every(tag => t.tags.includes(tag)) || t.pinned").unwrap(),
        "((contains(file.tags, \"#a\") AND contains(file.tags, \"#b\")) OR pinned)"
    );
}

#[test]
fn parenthesized_runs_of_one_operator_merge() {
    assert_eq!(
        predicate("p => (p.a || p.b) || (p.c)").unwrap(),
        "(a OR b OR c)"
    );
}

#[test]
fn keeps_or_grouping_inside_and() {
    assert_eq!(
        predicate("p => p.a === 'x' && (p.b > 2 || !p.c)").unwrap(),
        "a = \"x\" AND (b > 2 OR !c)"
    );
}

#[test]
fn negates_compound_conditions_with_parentheses() {
    assert_eq!(predicate("p => !(p.a === 1)").unwrap(), "!(a = 1)");
    assert_eq!(
        predicate("p => !p.file.tags.includes('#x')").unwrap(),
        "!contains(file.tags, \"#x\")"
    );
}

#[test]
fn operator_text_inside_strings_is_left_alone() {
    assert_eq!(
        predicate("p => p.title === \"a && b || c === d\"").unwrap(),
        "title = \"a && b || c === d\""
    );
}

#[test]
fn translates_includes_to_contains() {
    assert_eq!(
        predicate("page=> page.file.tags.includes('#3done')").unwrap(),
        "contains(file.tags, \"#3done\")"
    );
}

#[test]
fn rejects_unsupported_predicates() {
    for source in [
        "p => p.a + 1 > 2",
        "p => other.a === 1",
        "p => p.tags.some(t => t === 'x')",
        "p => p.a.startsWith('x')",
        "(a, b) => a.x === 1",
        "\"abc\"",
        "p => p",
    ] {
        assert!(
            matches!(predicate(source), Err(TranslateError::UnsupportedShape(_))),
            "{source}"
        );
    }
}

#[test]
fn recognizes_every_tag_membership() {
    assert_eq!(
        predicate("t => ['#a', '#b'].every(tag => t.tags.includes(tag))").unwrap(),
        "contains(file.tags, \"#a\") AND contains(file.tags, \"#b\")"
    );
}

#[test]
fn recognizes_some_tag_membership() {
    assert_eq!(
        predicate("t => ['#a', '#b'].some(tag => t.tags.includes(tag))").unwrap(),
        "(contains(file.tags, \"#a\") OR contains(file.tags, \"#b\"))"
    );
}

#[test]
fn tag_membership_composes_with_other_conditions() {
    assert_eq!(
        predicate("t => ['#a', '#b'].some(tag => t.tags.includes(tag)) && t.done === true")
            .unwrap(),
        "(contains(file.tags, \"#a\") OR contains(file.tags, \"#b\")) AND done = true"
    );
}

#[test]
fn tag_membership_requires_string_elements_and_iteration_variable() {
    for source in [
        "['#a', 1].every(tag => t.tags.includes(tag))",
        "[].every(tag => t.tags.includes(tag))",
        "['#a', , '#b'].every(tag => t.tags.includes(tag))",
        "['#a', ...more].every(tag => t.tags.includes(tag))",
        "['#a'].every(tag => t.tags.includes('#b'))",
        "['#a'].find(tag => t.tags.includes(tag))",
    ] {
        assert!(recognize_tag_membership(&expr(source)).is_none(), "{source}");
    }
}

#[test]
fn key_selector_strips_parameter() {
    assert_eq!(
        recognize_key_selector(&arg("p => p.file.name")).unwrap(),
        "file.name"
    );
    assert_eq!(
        recognize_key_selector(&arg("p => p.file['mtime']")).unwrap(),
        "file.mtime"
    );
    assert!(recognize_key_selector(&arg("p => p")).is_err());
    assert!(recognize_key_selector(&arg("p => p.file.name.toLowerCase()")).is_err());
    assert!(recognize_key_selector(&arg("p => p['my field']")).is_err());
}

#[test]
fn flat_map_selector_takes_one_field() {
    assert_eq!(recognize_flat_map_selector(&arg("p => p.tags")).unwrap(), "tags");
    assert!(recognize_flat_map_selector(&arg("p => p.file.tags")).is_err());
}

#[test]
fn quotes_dql_strings() {
    assert_eq!(quote_string("plain"), "\"plain\"");
    assert_eq!(quote_string("say \"hi\"\\"), "\"say \\\"hi\\\"\\\\\"");
}

#[test]
fn single_term_or_keeps_parentheses() {
    let or = Predicate::Or(vec![Predicate::Truthy(Operand::Field("a".to_string()))]);
    assert_eq!(or.to_fragment(), "(a)");
    let and = Predicate::all(vec![or, Predicate::Truthy(Operand::Field("b".to_string()))]);
    assert_eq!(and.to_fragment(), "(a) AND b");
}

#[test]
fn serializes_every_clause_in_order() {
    let ir = QueryIr {
        from: "\"books\"".to_string(),
        select: Some("file.name".to_string()),
        wheres: vec!["a = 1".to_string(), "(b OR c)".to_string()],
        sorts: vec![
            SortKey {
                field: "x".to_string(),
                direction: SortDirection::Asc,
            },
            SortKey {
                field: "y".to_string(),
                direction: SortDirection::Desc,
            },
        ],
        groups: vec!["g".to_string()],
        flattens: vec!["tags".to_string(), "aliases".to_string()],
        limit: Some(3),
    };

    assert_eq!(
        ir.to_query_string(),
        "LIST file.name FROM \"books\" FLATTEN tags FLATTEN aliases WHERE a = 1 AND (b OR c) \
         SORT x asc, y desc GROUP BY g LIMIT 3"
    );
}

#[test]
fn empty_ir_is_bare_list() {
    assert_eq!(QueryIr::default().to_query_string(), "LIST");
    assert_eq!(QueryIr::new("notes").to_query_string(), "LIST FROM notes");
}

#[test]
fn formats_numbers_like_javascript() {
    assert_eq!(format_js_number(10.0), "10");
    assert_eq!(format_js_number(1.5), "1.5");
    assert_eq!(format_js_number(-0.0), "0");
    assert_eq!(format_js_number(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_js_number(-2.5), "-2.5");
    assert_eq!(format_js_number(123.456), "123.456");
    assert_eq!(format_js_number(0.000001), "0.000001");
    assert_eq!(format_js_number(1e-7), "1e-7");
    assert_eq!(format_js_number(-1.5e-9), "-1.5e-9");
    assert_eq!(format_js_number(1e20), "100000000000000000000");
    assert_eq!(format_js_number(1e21), "1e+21");
    assert_eq!(format_js_number(1.2345e25), "1.2345e+25");
}

#[test]
fn dql_numbers_never_use_exponents() {
    assert_eq!(format_dql_number(1e-7), "0.0000001");
    assert_eq!(format_dql_number(1e21), "1000000000000000000000");
    assert_eq!(format_dql_number(-0.0), "0");
    assert_eq!(format_dql_number(2.0), "2");
}

#[test]
fn parses_numbers_like_javascript() {
    assert_eq!(parse_js_number(" 10 "), Some(10.0));
    assert_eq!(parse_js_number("0x10"), Some(16.0));
    assert_eq!(parse_js_number("1e2"), Some(100.0));
    assert_eq!(parse_js_number(""), None);
    assert_eq!(parse_js_number("abc"), None);
    assert_eq!(parse_js_number("Infinity"), None);
    assert_eq!(parse_js_number("inf"), None);
    assert_eq!(parse_js_number("NaN"), None);
}

#[test]
fn limit_is_truncated_and_non_negative() {
    assert_eq!(limit_value("2.9"), Some(2));
    assert_eq!(limit_value("-1"), None);
    assert_eq!(limit_value("abc"), None);
}

#[test]
fn orders_object_values_like_javascript() {
    let values = serde_json::json!({
        "b": "beta",
        "10": "ten",
        "2": "two",
        "a": "alpha",
        "01": "zero-one"
    });
    let map = values.as_object().unwrap();
    assert_eq!(
        js_object_values(map),
        vec!["two", "ten", "beta", "alpha", "zero-one"]
    );
}
