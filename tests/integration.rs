use dotnet_domain::{
    ConstructKind, DomainConfig, DotNetDomain, ObjectDescription, ObjectRegistry, Resolution,
    SigPart,
};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn desc(kind: ConstructKind, sig: &str) -> ObjectDescription {
    ObjectDescription::new(kind, sig)
}

/// Document `System.IO` with a `File` class and a few members.
fn build_io(domain: &mut DotNetDomain) -> dotnet_domain::Document {
    let mut doc = domain.begin_document("api/io");
    doc.describe_nested(desc(ConstructKind::Namespace, "System.IO"), |doc| {
        doc.describe_nested(desc(ConstructKind::Class, "System.IO.File"), |doc| {
            doc.describe(
                desc(ConstructKind::Method, "System.IO.File.Open(string path, FileMode mode)")
                    .content(":param string path: File to open\n:rtype: FileStream\n"),
            );
            doc.describe(desc(ConstructKind::Property, "Length"));
            doc.reference("meth", "Open").unwrap();
        });
        doc.describe(desc(ConstructKind::Enumeration, "FileMode"));
    });
    doc.finish()
}

// -- Document pass --

#[test]
fn nested_build_registers_full_names() {
    init_logging();
    let mut domain = DotNetDomain::new(DomainConfig::default());
    build_io(&mut domain);

    let names: Vec<_> = domain.registry().iter().map(|(name, _)| name.to_string()).collect();
    assert_eq!(
        names,
        vec![
            "System.IO",
            "System.IO.File",
            "System.IO.File.Length",
            "System.IO.File.Open",
            "System.IO.FileMode",
        ]
    );
    assert_eq!(
        domain.registry().get("System.IO.FileMode").unwrap().kind,
        ConstructKind::Enumeration
    );
    assert!(domain.warnings().is_empty());
}

#[test]
fn nested_signature_omits_context_prefix() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let document = build_io(&mut domain);

    let descriptions = document.descriptions();
    let open = descriptions
        .iter()
        .find(|d| d.kind == ConstructKind::Method)
        .unwrap();
    let sig = &open.signatures[0];
    assert_eq!(sig.astext(), "Open(string path, FileMode mode)");
    assert_eq!(sig.full_name, "System.IO.File.Open");
    assert!(!sig.parts.iter().any(|p| matches!(p, SigPart::AddName(_))));
    assert_eq!(open.fields.arguments[0].type_name.as_deref(), Some("string"));
    assert_eq!(open.fields.return_type.as_deref(), Some("FileStream"));

    let class = descriptions
        .iter()
        .find(|d| d.kind == ConstructKind::Class)
        .unwrap();
    assert_eq!(class.signatures[0].astext(), "class File");
    assert_eq!(class.children.len(), 2);
}

#[test]
fn multiple_signatures_share_one_description() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe(desc(
        ConstructKind::Method,
        "Console.WriteLine()\nConsole.Write(string value)",
    ));
    let document = doc.finish();

    let sigs = &document.nodes[0].signatures;
    assert_eq!(sigs.len(), 2);
    assert!(sigs[0].first);
    assert!(!sigs[1].first);
    assert_eq!(sigs[1].ids, vec!["Console.Write"]);
    assert!(domain.registry().contains("Console.WriteLine"));
    assert!(domain.registry().contains("Console.Write"));
}

#[test]
fn last_signature_sets_nested_prefix() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe_nested(desc(ConstructKind::Interface, "NS.IReader\nNS.IStream"), |doc| {
        doc.describe(desc(ConstructKind::Method, "Read()"));
    });
    doc.finish();
    assert!(domain.registry().contains("NS.IStream.Read"));
}

#[test]
fn noindex_renders_without_registering() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe(desc(ConstructKind::Namespace, "Hidden").noindex());
    let document = doc.finish();

    assert!(domain.registry().is_empty());
    assert!(document.ids.is_empty());
    assert!(document.index_entries().is_empty());
    assert_eq!(document.nodes[0].signatures[0].astext(), "namespace Hidden");
    assert!(document.nodes[0].noindex);
}

#[test]
fn object_option_overrides_index_text() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe(desc(ConstructKind::Method, "Helpers.Run").object("Program"));
    doc.describe(desc(ConstructKind::Method, "Main"));
    let document = doc.finish();

    let texts: Vec<_> = document.index_entries().iter().map(|e| e.text.clone()).collect();
    assert_eq!(texts, vec!["Run() (Program method)", "Main() (built-in function)"]);
}

#[test]
fn malformed_signature_warns_and_is_not_registered() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe_nested(desc(ConstructKind::Class, "not valid").at_line(7), |doc| {
        assert!(doc.context().is_top_level());
    });
    let document = doc.finish();

    assert!(domain.registry().is_empty());
    assert_eq!(document.nodes[0].signatures[0].astext(), "class ");
    let warnings = domain.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].line, Some(7));
    assert_eq!(
        warnings[0].to_string(),
        "api:7: warning: malformed class signature: \"not valid\""
    );
}

// -- Duplicates --

#[test]
fn duplicate_across_documents_keeps_first() {
    let mut domain = DotNetDomain::new(DomainConfig::default());

    let mut doc = domain.begin_document("a");
    doc.describe(desc(ConstructKind::Class, "NS.Foo"));
    doc.finish();

    let mut doc = domain.begin_document("b");
    doc.describe(desc(ConstructKind::Class, "NS.Foo").at_line(3));
    let b = doc.finish();

    assert_eq!(domain.registry().get("NS.Foo").unwrap().docname, "a");
    assert_eq!(
        domain.warnings()[0].to_string(),
        "b:3: warning: duplicate object description of NS.Foo, other instance in a"
    );
    // Still anchored locally.
    assert!(b.ids.contains("NS.Foo"));
}

#[test]
fn repeated_name_in_one_document_is_anchored_once() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("a");
    doc.describe(desc(ConstructKind::Class, "NS.Foo"));
    doc.describe(desc(ConstructKind::Structure, "NS.Foo").at_line(9));
    let document = doc.finish();

    assert_eq!(document.nodes[0].signatures[0].ids, vec!["NS.Foo"]);
    assert!(document.nodes[1].signatures[0].ids.is_empty());
    assert_eq!(
        domain.registry().get("NS.Foo").unwrap().kind,
        ConstructKind::Class
    );
    let warnings = domain.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "a:9: warning: duplicate object description of NS.Foo, other instance in a"
    );
}

#[test]
fn names_sharing_a_sanitized_anchor_are_both_registered() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("a");
    doc.describe(desc(ConstructKind::Class, "NS.A$B"));
    doc.describe(desc(ConstructKind::Class, "NS.A_S_B").at_line(4));
    let document = doc.finish();

    assert!(domain.registry().contains("NS.A$B"));
    assert!(domain.registry().contains("NS.A_S_B"));
    assert_eq!(document.nodes[0].signatures[0].ids, vec!["NS.A_S_B"]);
    assert!(document.nodes[1].signatures[0].ids.is_empty());
    assert_eq!(document.nodes[1].signatures[0].names, vec!["NS.A_S_B"]);

    let warnings = domain.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(
        warnings[0].to_string(),
        "a:4: warning: anchor NS.A_S_B of NS.A_S_B is already used in this document"
    );
}

// -- Resolution pass --

#[test]
fn resolves_across_documents() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let io = build_io(&mut domain);

    let mut doc = domain.begin_document("guide/files");
    doc.reference("dn:cls", "~System.IO.File").unwrap();
    doc.reference("dn:meth", "Opening files <System.IO.File.Open()>").unwrap();
    doc.reference("dn:meth", "System.IO.File.Close").unwrap();
    let guide = doc.finish();

    let outcomes = domain.resolve_document(&guide);
    match &outcomes[0] {
        Resolution::Link(link) => {
            assert_eq!(link.title, "File");
            assert_eq!(link.docname, "api/io");
            assert_eq!(link.href("guide/files", ".html"), "../api/io.html#System.IO.File");
        }
        other => panic!("expected link, got {:?}", other),
    }
    match &outcomes[1] {
        Resolution::Link(link) => {
            assert_eq!(link.title, "Opening files");
            assert_eq!(link.name, "System.IO.File.Open");
        }
        other => panic!("expected link, got {:?}", other),
    }
    assert_eq!(
        outcomes[2],
        Resolution::Text("System.IO.File.Close".to_string())
    );

    // The reference made inside the class resolves through its namespace.
    let inner = domain.resolve_document(&io);
    match &inner[0] {
        Resolution::Link(link) => {
            assert_eq!(link.name, "System.IO.File.Open");
            assert_eq!(link.href("api/io", ".html"), "#System.IO.File.Open");
        }
        other => panic!("expected link, got {:?}", other),
    }
}

#[test]
fn search_order_between_bare_and_qualified() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe(desc(ConstructKind::Class, "Foo"));
    doc.describe_nested(desc(ConstructKind::Namespace, "NS"), |doc| {
        doc.describe(desc(ConstructKind::Class, "Foo"));
        doc.reference("cls", "Foo").unwrap();
        doc.reference("cls", ".Foo").unwrap();
    });
    let document = doc.finish();

    let outcomes = domain.resolve_document(&document);
    let names: Vec<_> = outcomes
        .iter()
        .map(|o| match o {
            Resolution::Link(link) => link.name.clone(),
            Resolution::Text(text) => text.clone(),
        })
        .collect();
    assert_eq!(names, vec!["Foo", "NS.Foo"]);
}

#[test]
fn sigil_names_link_to_sanitized_anchor() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    let mut doc = domain.begin_document("api");
    doc.describe(desc(ConstructKind::Class, "NS.Outer$Inner"));
    doc.reference("cls", "NS.Outer$Inner").unwrap();
    let document = doc.finish();

    assert!(document.ids.contains("NS.Outer_S_Inner"));
    match &domain.resolve_document(&document)[0] {
        Resolution::Link(link) => assert_eq!(link.anchor, "NS.Outer_S_Inner"),
        other => panic!("expected link, got {:?}", other),
    }
    let inventory: Vec<_> = domain.get_objects().collect();
    assert_eq!(inventory[0].anchor, "NS.Outer_S_Inner");
}

// -- Incremental rebuilds --

#[test]
fn purged_document_no_longer_resolves() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    build_io(&mut domain);

    let mut doc = domain.begin_document("index");
    doc.reference("cls", "System.IO.File").unwrap();
    let index = doc.finish();

    assert!(matches!(domain.resolve_document(&index)[0], Resolution::Link(_)));
    assert_eq!(domain.clear_doc("api/io"), 5);
    assert_eq!(
        domain.resolve_document(&index)[0],
        Resolution::Text("System.IO.File".to_string())
    );
}

#[test]
fn rereading_a_document_does_not_warn() {
    let mut domain = DotNetDomain::new(DomainConfig::default());
    build_io(&mut domain);
    build_io(&mut domain);
    assert!(domain.warnings().is_empty());
    assert_eq!(domain.registry().len(), 5);
}

#[test]
fn registry_survives_between_builds() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("doctrees").join("dn.json");

    let mut first = DotNetDomain::new(DomainConfig::default());
    build_io(&mut first);
    first.save(&path).unwrap();

    // Second build only re-reads the guide; api/io comes from the saved registry.
    let mut second = DotNetDomain::load(DomainConfig::default(), &path).unwrap();
    let mut doc = second.begin_document("guide");
    doc.reference("meth", "System.IO.File.Open").unwrap();
    let guide = doc.finish();

    match &second.resolve_document(&guide)[0] {
        Resolution::Link(link) => assert_eq!(link.docname, "api/io"),
        other => panic!("expected link, got {:?}", other),
    }
}

#[test]
fn parallel_passes_merge_first_wins() {
    let mut main = DotNetDomain::new(DomainConfig::default());
    let mut doc = main.begin_document("a");
    doc.describe(desc(ConstructKind::Structure, "NS.Point"));
    doc.finish();

    let mut worker = DotNetDomain::new(DomainConfig::default());
    let mut doc = worker.begin_document("b");
    doc.describe(desc(ConstructKind::Structure, "NS.Point"));
    doc.describe(desc(ConstructKind::Delegate, "NS.Callback"));
    doc.finish();

    let worker_registry: ObjectRegistry = worker.registry().clone();
    main.merge_domaindata(&["b"], &worker_registry);

    assert_eq!(main.registry().get("NS.Point").unwrap().docname, "a");
    assert!(main.registry().contains("NS.Callback"));
    assert_eq!(main.warnings().len(), 1);
}
