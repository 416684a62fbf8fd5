/* Black-box Driver-level tests: build a small in-memory IR Document, run it
 * through the full generation pipeline, and assert on the emitted text. */

use abi_rpc_gen::emit::{common, proxy, service};
use abi_rpc_gen::ir::{
    Arg, DeclCategory, DeclarationOrderItem, Document, EnumDecl, EnumMember, Event, InterfaceDecl,
    Member, Method, StructDecl, StructuredTypeRef, TypeRef, UnionDecl, UnionMember,
};

fn tokens(words: &[&str]) -> TypeRef {
    TypeRef::Tokens(words.iter().map(|s| s.to_string()).collect())
}

fn arg(name: Option<&str>, words: &[&str]) -> Arg {
    Arg { name: name.map(str::to_string), ty: tokens(words) }
}

#[test]
fn minimal_enum_emits_inside_namespace() {
    let doc = Document {
        module: vec!["thru".into(), "demo".into()],
        enums: vec![EnumDecl {
            name: "Color".into(),
            members: vec![
                EnumMember { name: "RED".into(), value: Some(1) },
                EnumMember { name: "GREEN".into(), value: None },
                EnumMember { name: "BLUE".into(), value: Some(5) },
            ],
        }],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Enum, name: "Color".into() }],
        ..Default::default()
    };

    let header = common::emit_common_header(&doc, "Demo").unwrap();
    assert!(header.contains("namespace thru {"));
    assert!(header.contains("namespace demo {"));
    assert!(header.contains("enum class Color {"));
    assert!(header.contains("RED = 1,"));
    assert!(header.contains("GREEN,"));
    assert!(header.contains("BLUE = 5,"));

    let impl_text = common::emit_common_impl(&doc, "Demo").unwrap();
    assert!(!impl_text.contains("Color::Serialize"));
}

#[test]
fn fire_and_forget_method_has_no_sync_or_async() {
    let interface = InterfaceDecl {
        name: "Ping".into(),
        method_list: vec![Method { method_name: "beat".into(), method_parameter: vec![], method_return: vec![] }],
        event_list: vec![],
    };
    let doc = Document {
        interfaces: vec![interface],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Interface, name: "Ping".into() }],
        ..Default::default()
    };

    let proxy_header = proxy::emit_proxy_header(&doc, "Demo").unwrap();
    assert!(proxy_header.contains("ErrorCode beat();"));
    assert!(!proxy_header.contains("beatSync"));
    assert!(!proxy_header.contains("beatAsync"));

    let service_header = service::emit_service_header(&doc, "Demo").unwrap();
    assert!(service_header.contains("RegisterbeatHandler"));

    let proxy_impl = proxy::emit_proxy_impl(&doc, "Demo").unwrap();
    assert!(!proxy_impl.contains("beat_message_decorator"));
}

#[test]
fn request_reply_emits_sync_and_async_with_aggregates() {
    let interface = InterfaceDecl {
        name: "Calc".into(),
        method_list: vec![Method {
            method_name: "add".into(),
            method_parameter: vec![arg(Some("a"), &["long"]), arg(Some("b"), &["long"])],
            method_return: vec![arg(Some("sum"), &["long"])],
        }],
        event_list: vec![],
    };
    let doc = Document {
        interfaces: vec![interface],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Interface, name: "Calc".into() }],
        ..Default::default()
    };

    let header = common::emit_common_header(&doc, "Demo").unwrap();
    assert!(header.contains("struct Calc_add_Req {"));
    assert!(header.contains("const int32_t& a;"));
    assert!(header.contains("const int32_t& b;"));
    assert!(header.contains("struct Calc_add_Resp {"));
    assert!(header.contains("const int32_t& sum;"));

    let proxy_header = proxy::emit_proxy_header(&doc, "Demo").unwrap();
    assert!(proxy_header.contains("addSync(const int32_t& a, const int32_t& b, int32_t* sum, int timeout_msec);"));
    assert!(proxy_header.contains("using addCallback = std::function<void(ErrorCode, int32_t*)>;"));
    assert!(proxy_header.contains("void addAsync(const int32_t& a, const int32_t& b, const addCallback& callback);"));
}

#[test]
fn union_tags_are_positional_with_trailing_reserved() {
    let doc = Document {
        unions: vec![UnionDecl {
            name: "V".into(),
            members: vec![
                UnionMember { name: "i".into(), ty: tokens(&["long"]), case_value: 10 },
                UnionMember { name: "s".into(), ty: tokens(&["string"]), case_value: 20 },
            ],
        }],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Union, name: "V".into() }],
        ..Default::default()
    };

    let header = common::emit_common_header(&doc, "Demo").unwrap();
    assert!(header.contains("TYPE_1 = 1,"));
    assert!(header.contains("TYPE_2 = 2,"));
    assert!(header.contains("TYPE_RESERVED = 3"));
    assert!(header.contains("Tag tag_ = Tag::TYPE_RESERVED;"));
    assert!(header.contains("explicit V(const int32_t& value)"));

    let impl_text = common::emit_common_impl(&doc, "Demo").unwrap();
    assert!(impl_text.contains("case Tag::TYPE_1:"));
    assert!(impl_text.contains("writer.Write(this->i);"));
}

#[test]
fn sequence_and_fixed_array_members() {
    let doc = Document {
        structs: vec![StructDecl {
            name: "Bag".into(),
            members: vec![
                Member {
                    name: "data".into(),
                    ty: TypeRef::Structured(Box::new(StructuredTypeRef {
                        type_name: Some(tokens(&["uint8"])),
                        sequence_size: Some(-1),
                    })),
                },
                Member {
                    name: "hash".into(),
                    ty: TypeRef::Structured(Box::new(StructuredTypeRef {
                        type_name: Some(tokens(&["uint8"])),
                        sequence_size: Some(4),
                    })),
                },
            ],
        }],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Struct, name: "Bag".into() }],
        ..Default::default()
    };

    let header = common::emit_common_header(&doc, "Demo").unwrap();
    assert!(header.contains("std::vector<uint8_t> data;"));
    assert!(header.contains("std::array<uint8_t, 4> hash;"));

    let impl_text = common::emit_common_impl(&doc, "Demo").unwrap();
    assert!(impl_text.contains("writer.Write(this->data);"));
    assert!(impl_text.contains("writer.Write(this->hash);"));
}

#[test]
fn name_id_tables_agree_between_service_and_proxy() {
    let interface = InterfaceDecl {
        name: "Topic".into(),
        method_list: vec![
            Method { method_name: "a".into(), method_parameter: vec![], method_return: vec![] },
            Method { method_name: "b".into(), method_parameter: vec![], method_return: vec![] },
        ],
        event_list: vec![Event { event_name: "x".into(), members: vec![] }],
    };
    let doc = Document {
        interfaces: vec![interface],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Interface, name: "Topic".into() }],
        ..Default::default()
    };

    let service_impl = service::emit_service_impl(&doc, "Demo").unwrap();
    let proxy_impl = proxy::emit_proxy_impl(&doc, "Demo").unwrap();

    for (id, name) in [(0, "a"), (1, "b"), (2, "x")] {
        let line = format!("name_id_map_->InsertNameId(\"{name}\", {id});");
        assert!(service_impl.contains(&line), "service missing {line}");
        assert!(proxy_impl.contains(&line), "proxy missing {line}");
    }
}

#[test]
fn unresolved_declaration_order_reference_is_fatal() {
    let json = r#"{
        "declarations_order": [
            {"category": "struct", "name": "Missing"}
        ]
    }"#;
    let doc: Document = serde_json::from_str(json).unwrap();
    let err = doc.validate().unwrap_err();
    assert!(matches!(err, abi_rpc_gen::error::IrError::UnresolvedDeclarationOrderRef { .. }));
}

#[test]
fn unimplemented_target_is_rejected_before_any_file_is_written() {
    let dir = std::env::temp_dir().join(format!("abi-rpc-gen-test-reject-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let ir_path = dir.join("doc.json");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(&ir_path, "{}").unwrap();

    let err = abi_rpc_gen::cmds::codegen::run(
        ir_path,
        abi_rpc_gen::Target::Cpp,
        "Demo".into(),
        dir.clone(),
        false,
    )
    .unwrap_err();
    assert!(err.downcast_ref::<abi_rpc_gen::error::TargetNotImplemented>().is_some());

    assert!(!dir.join("DemoCommon.h").exists());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn driver_writes_exactly_six_deterministic_files() {
    let doc = Document {
        enums: vec![EnumDecl {
            name: "Color".into(),
            members: vec![EnumMember { name: "RED".into(), value: Some(1) }],
        }],
        declarations_order: vec![DeclarationOrderItem { category: DeclCategory::Enum, name: "Color".into() }],
        ..Default::default()
    };

    let dir = std::env::temp_dir().join(format!("abi-rpc-gen-test-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);

    let first = abi_rpc_gen::driver::generate(&doc, "Demo", &dir, false).unwrap();
    assert_eq!(first.paths.len(), 6);

    let expected_suffixes = ["Common.h", "Common.cpp", "Service.h", "Service.cpp", "Proxy.h", "Proxy.cpp"];
    for (path, suffix) in first.paths.iter().zip(expected_suffixes) {
        assert_eq!(path.file_name().unwrap().to_str().unwrap(), format!("Demo{suffix}"));
    }

    let first_contents: Vec<String> = first.paths.iter().map(|p| std::fs::read_to_string(p).unwrap()).collect();
    let second = abi_rpc_gen::driver::generate(&doc, "Demo", &dir, false).unwrap();
    let second_contents: Vec<String> = second.paths.iter().map(|p| std::fs::read_to_string(p).unwrap()).collect();
    assert_eq!(first_contents, second_contents);

    let _ = std::fs::remove_dir_all(&dir);
}
