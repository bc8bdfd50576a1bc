use dataview_query_compiler_rs::model::{MethodArg, MethodCall, MethodChain, SortDirection};
use dataview_query_compiler_rs::{
    extract_method_chain, translate, translate_with_options, QueryCache, Severity,
    TranslateError, TranslateOptions,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn assert_translates(source: &str, expected: &str) {
    init_tracing();
    assert_eq!(translate(source).as_deref(), Some(expected), "{source}");
}

#[test]
fn bare_root_accessor_lists_everything() {
    assert_translates("dv.pages()", "LIST");
    assert_translates("dv.pages('')", "LIST");
    assert_translates("dv.pages('   ')", "LIST");
}

#[test]
fn root_source_becomes_from_or_tag_filter() {
    assert_translates("dv.pages(\"#3done\")", "LIST WHERE contains(file.tags, \"#3done\")");
    assert_translates("dv.pages(`#3done`)", "LIST WHERE contains(file.tags, \"#3done\")");
    assert_translates("dv.pages(\"books\")", "LIST FROM books");
    assert_translates("dv.pages('\"Projects/Active\"')", "LIST FROM \"Projects/Active\"");
}

#[test]
fn where_on_field_equality() {
    assert_translates(
        "dv.pages().where(page => page.fileClass === \"Tag\")",
        "LIST WHERE fileClass = \"Tag\"",
    );
}

#[test]
fn root_tag_filter_comes_before_chain_conditions() {
    assert_translates(
        "dv.pages(\"#3done\").where(page => page.fileClass === \"Tag\")",
        "LIST WHERE contains(file.tags, \"#3done\") AND fileClass = \"Tag\"",
    );
}

#[test]
fn or_condition_is_parenthesized() {
    assert_translates(
        "dv.pages('').where(page => page.fileClass === \"Tag\" || page.status === \"ready\")",
        "LIST WHERE (fileClass = \"Tag\" OR status = \"ready\")",
    );
}

#[test]
fn includes_becomes_contains() {
    assert_translates(
        "dv.pages('').filter(page=> page.file.tags.includes('#3done'))",
        "LIST WHERE contains(file.tags, \"#3done\")",
    );
}

#[test]
fn every_tag_membership() {
    assert_translates(
        "dv.pages('').filter(t => ['#example-tag', '#secondary-tag'].every(tag => t.tags.includes(tag)))",
        "LIST WHERE contains(file.tags, \"#example-tag\") AND contains(file.tags, \"#secondary-tag\")",
    );
}

#[test]
fn some_tag_membership() {
    assert_translates(
        "dv.pages('').filter(t => ['#example-tag', '#secondary-tag'].some(tag => t.tags.includes(tag)))",
        "LIST WHERE (contains(file.tags, \"#example-tag\") OR contains(file.tags, \"#secondary-tag\"))",
    );
}

#[test]
fn filter_then_where_keep_their_own_grouping() {
    assert_translates(
        "dv.pages('')
        .filter(t => ['#example-tag', '#secondary-tag'].some(tag => t.tags.includes(tag)))
        .where(page => page.fileClass === \"Tag\" || page.state === \"ready\")",
        "LIST WHERE (contains(file.tags, \"#example-tag\") OR contains(file.tags, \"#secondary-tag\")) \
         AND (fileClass = \"Tag\" OR state = \"ready\")",
    );
}

#[test]
fn map_sort_and_limit() {
    assert_translates(
        "dv.pages('\"Projects\"').where(p => p.status !== \"done\").sortDesc(p => p.file.mtime).map(p => p.file.name).limit(5)",
        "LIST file.name FROM \"Projects\" WHERE status != \"done\" SORT file.mtime desc LIMIT 5",
    );
}

#[test]
fn sorts_accumulate_in_call_order() {
    assert_translates(
        "dv.pages().sort(p => p.file.name).sortDesc(p => p.priority).sort(p => p.due, 'desc')",
        "LIST SORT file.name asc, priority desc, due desc",
    );
}

#[test]
fn last_map_wins() {
    assert_translates(
        "dv.pages().map(p => p.file.name).map(p => p.file.path)",
        "LIST file.path",
    );
}

#[test]
fn flat_map_adds_flatten_clauses() {
    assert_translates(
        "dv.pages('#book').flatMap(p => p.authors).where(p => p.year > 2000)",
        "LIST FLATTEN authors WHERE contains(file.tags, \"#book\") AND year > 2000",
    );
}

#[test]
fn limit_accepts_numeric_text() {
    assert_translates("dv.pages().limit(10)", "LIST LIMIT 10");
    assert_translates("dv.pages().limit('7')", "LIST LIMIT 7");
}

#[test]
fn malformed_limit_is_ignored_with_a_warning() {
    init_tracing();
    let translation = translate_with_options(
        "dv.pages().limit(\"abc\").map(p => p.file.name)",
        &TranslateOptions::default(),
    )
    .unwrap();

    assert_eq!(translation.query, "LIST file.name");
    assert_eq!(translation.ir.limit, None);
    assert_eq!(translation.messages.len(), 1);
    assert_eq!(translation.messages[0].severity, Severity::Warning);
    assert_eq!(translate("dv.pages().limit()").as_deref(), Some("LIST"));
}

#[test]
fn unsupported_methods_are_unrecognized() {
    init_tracing();
    assert_eq!(translate("dv.pages().groupBy(p => p.status)"), None);
    assert!(matches!(
        translate_with_options("dv.pages().groupBy(p => p.status)", &TranslateOptions::default()),
        Err(TranslateError::UnsupportedMethod(method)) if method == "groupBy"
    ));
}

#[test]
fn any_untranslatable_call_aborts_the_whole_chain() {
    init_tracing();
    assert_eq!(
        translate("dv.pages('#a').where(p => p.a === 1).where(p => p.a.startsWith('x'))"),
        None
    );
    assert_eq!(translate("dv.pages().map(p => p.file.name.toUpperCase())"), None);
    assert_eq!(translate("dv.pages().flatMap(p => p.file.tags)"), None);
    assert_eq!(translate("dv.pages().where(p => p.a, this)"), None);
    assert_eq!(translate("dv.pages().sort(p => p.a, 'sideways')"), None);
}

#[test]
fn malformed_input_is_unrecognized() {
    init_tracing();
    for source in [
        "",
        "dv.pages(",
        "dv.pages(\"a\")).limit(5",
        "const q = dv.pages()",
        "dv.pages().where(p => p.a ===)",
        "dv.pages(`#${tag}`)",
        "dv",
        "dv.pages",
    ] {
        assert_eq!(translate(source), None, "{source}");
    }
}

#[test]
fn syntax_errors_report_offsets() {
    let options = TranslateOptions::default();
    let err = translate_with_options("dv.pages('a')).limit(5", &options).unwrap_err();
    assert!(
        matches!(err, TranslateError::Syntax { offset: 13, .. }),
        "{err:?}"
    );

    let err = translate_with_options("dv.pages(", &options).unwrap_err();
    assert!(
        matches!(err, TranslateError::Syntax { offset, .. } if offset <= 9),
        "{err:?}"
    );
}

#[test]
fn and_inside_or_keeps_its_grouping() {
    assert_translates(
        "dv.pages().where(p => p.a === 1 || p.b === 2 && p.c === 3)",
        "LIST WHERE (a = 1 OR (b = 2 AND c = 3))",
    );
    assert_translates(
        "dv.pages().where(p => (p.a === 1 || p.b === 2) && p.c === 3)",
        "LIST WHERE (a = 1 OR b = 2) AND c = 3",
    );
}

#[test]
fn long_or_chains_translate_flat() {
    let terms = (0..100).map(|i| format!("p.n === {i}")).collect::<Vec<_>>();
    let expected = (0..100).map(|i| format!("n = {i}")).collect::<Vec<_>>();
    assert_translates(
        &format!("dv.pages().where(p => {})", terms.join(" || ")),
        &format!("LIST WHERE ({})", expected.join(" OR ")),
    );
}

#[test]
fn oversized_input_is_unrecognized_instead_of_overflowing() {
    init_tracing();
    let or_chain = format!(
        "dv.pages().where(p => {})",
        vec!["p.a === 1"; 2000].join(" || ")
    );
    assert_eq!(translate(&or_chain), None);
    assert!(matches!(
        translate_with_options(&or_chain, &TranslateOptions::default()),
        Err(TranslateError::Syntax { .. })
    ));

    let long_chain = format!("dv.pages(){}", ".limit(1)".repeat(10_000));
    assert_eq!(translate(&long_chain), None);

    let deep_negation = format!("dv.pages().where(p => {}p.a)", "!".repeat(5_000));
    assert_eq!(translate(&deep_negation), None);

    let deep_parens = format!(
        "dv.pages().where(p => {}p.a{})",
        "(".repeat(5_000),
        ")".repeat(5_000)
    );
    assert_eq!(translate(&deep_parens), None);
}

#[test]
fn number_literals_stay_decimal_in_queries() {
    assert_translates(
        "dv.pages().where(p => p.x === 0.0000001 && p.y < 1e21 && p.z > -2.5)",
        "LIST WHERE x = 0.0000001 AND y < 1000000000000000000000 AND z > -2.5",
    );
}

#[test]
fn translation_is_deterministic() {
    let source = "dv.pages('#a').where(p => p.x > 1 || p.y < 2).sort(p => p.x).limit(3)";
    let first = translate(source);
    assert!(first.is_some());
    assert_eq!(first, translate(source));
}

#[test]
fn custom_root_accessor_and_sigil() {
    let options = TranslateOptions {
        root_accessor: "notes".to_string(),
        tag_sigil: '@',
    };
    let translation = translate_with_options("vault.notes('@home').limit(2)", &options).unwrap();
    assert_eq!(
        translation.query,
        "LIST WHERE contains(file.tags, \"@home\") LIMIT 2"
    );
    assert_eq!(translate("vault.notes('@home')"), None);
}

#[test]
fn options_deserialize_with_defaults() {
    let options: TranslateOptions = serde_json::from_str(r##"{ "tagSigil": "+" }"##).unwrap();
    assert_eq!(options.root_accessor, "pages");
    assert_eq!(options.tag_sigil, '+');
}

#[test]
fn exposes_the_extracted_chain() {
    let chain = extract_method_chain(
        "dv.pages('#a').where(p => p.x === 1).limit(4)",
        &TranslateOptions::default(),
    )
    .unwrap();
    let texts = chain
        .methods
        .iter()
        .map(|call| (call.method.as_str(), call.args[0].text.as_str()))
        .collect::<Vec<_>>();
    assert_eq!(texts, vec![("where", "p => p.x === 1"), ("limit", "4")]);

    let translation =
        translate_with_options("dv.pages().sortDesc(p => p.a)", &TranslateOptions::default())
            .unwrap();
    assert_eq!(translation.ir.sorts[0].direction, SortDirection::Desc);
}

#[test]
fn serialized_chain_round_trips_text_arguments() {
    let chain = MethodChain {
        source: "#a".to_string(),
        methods: vec![MethodCall {
            method: "where".to_string(),
            args: vec![MethodArg::from_text("p => p.x === 1")],
        }],
    };
    let json = serde_json::to_value(&chain).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "source": "#a",
            "methods": [{ "method": "where", "args": [{ "text": "p => p.x === 1" }] }]
        })
    );
}

#[test]
fn cache_reuses_translations_per_field() {
    let options = TranslateOptions::default();
    let mut cache = QueryCache::new();
    assert!(cache.is_empty());

    let first = cache.get_or_translate("status", "dv.pages('#a')", &options);
    assert_eq!(first.as_deref(), Some("LIST WHERE contains(file.tags, \"#a\")"));
    assert_eq!(cache.get_or_translate("status", "dv.pages('#a')", &options), first);
    assert_eq!(cache.len(), 1);

    assert_eq!(
        cache.get_or_translate("status", "dv.pages('books')", &options).as_deref(),
        Some("LIST FROM books")
    );
    assert_eq!(cache.get_or_translate("broken", "dv.pages(", &options), None);
    assert_eq!(cache.len(), 2);

    assert!(cache.invalidate("status"));
    assert!(!cache.invalidate("status"));
    cache.clear();
    assert!(cache.is_empty());
}
