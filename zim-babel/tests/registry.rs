use zim_babel::{default_registry, dump, parse, Document, DumpOptions, FormatError, ParseOptions};

#[test]
fn test_default_formats() {
    assert_eq!(
        default_registry().list_formats(),
        vec!["html", "latex", "markdown", "plain", "rst", "wiki"]
    );
}

#[test]
fn test_aliases_resolve() {
    let registry = default_registry();
    for (alias, name) in [
        ("zim", "wiki"),
        ("MD", "markdown"),
        ("tex", "latex"),
        ("text", "plain"),
        ("reST", "rst"),
    ] {
        assert_eq!(registry.get(alias).map(|f| f.name()), Ok(name), "{alias}");
    }
}

#[test]
fn test_unknown_format() {
    let doc = Document::default();
    assert_eq!(
        dump("docx", &doc, &DumpOptions::default()),
        Err(FormatError::FormatNotFound("docx".to_string()))
    );
    assert_eq!(
        parse("docx", "text", &ParseOptions::default()),
        Err(FormatError::FormatNotFound("docx".to_string()))
    );
}

#[test]
fn test_dump_only_formats_do_not_parse() {
    for name in ["html", "latex", "markdown", "rst"] {
        assert_eq!(
            parse(name, "text", &ParseOptions::default()),
            Err(FormatError::FormatNotFound(name.to_string()))
        );
    }
    assert!(parse("plain", "text", &ParseOptions::default()).is_ok());
}

#[test]
fn test_describe() {
    let info = default_registry().describe();
    let wiki = info.iter().find(|f| f.name == "wiki").unwrap();
    assert!(wiki.parsing);
    assert!(wiki.aliases.contains(&"zim".to_string()));

    let html = info.iter().find(|f| f.name == "html").unwrap();
    assert!(!html.parsing);
    assert!(html.serialization);
    assert_eq!(html.extension, "html");
}
