/* Declaration Emitter + Serialization Emitter: CommonHeader / CommonImpl (§4.3, §4.4). */

use crate::emit::Writer;
use crate::error::ResolveError;
use crate::ir::{DeclCategory, Document};
use crate::resolver;

pub fn emit_common_header(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    let guard = super::common_guard(doc, base_name, "COMMON");
    w.line(&format!("#ifndef {guard}"));
    w.line(&format!("#define {guard}"));
    w.blank();
    w.line("#include <memory>");
    w.line("#include <string>");
    w.line("#include <array>");
    w.line("#include <vector>");
    w.line("#include <unordered_map>");
    w.line("#include \"cpolaris.h\"");
    w.blank();
    w.line("typedef struct PolarisReadableMessage PolarisReadableMessage;");
    w.line("typedef struct PolarisRuntime PolarisRuntime;");
    w.line("typedef struct PolarisService PolarisService;");
    w.line("typedef struct PolarisSession PolarisSession;");

    w.namespace_start(&doc.module);

    emit_bytes_buffer(&mut w);
    emit_name_id_mapper(&mut w);
    emit_message_reader(&mut w);
    emit_message_writer(&mut w);

    for item in &doc.declarations_order {
        match item.category {
            DeclCategory::Enum => {
                if let Some(decl) = doc.find_enum(&item.name) {
                    emit_enum(&mut w, decl);
                }
            }
            DeclCategory::Struct => {
                if let Some(decl) = doc.find_struct(&item.name) {
                    emit_struct_decl(&mut w, decl)?;
                }
            }
            DeclCategory::Union => {
                if let Some(decl) = doc.find_union(&item.name) {
                    emit_union_decl(&mut w, decl)?;
                }
            }
            DeclCategory::Interface => {}
        }
    }

    emit_data_wrapper_structs(&mut w, doc)?;

    w.namespace_end(&doc.module);
    w.blank();
    w.line(&format!("#endif  // {guard}"));
    Ok(w.finish())
}

pub fn emit_common_impl(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    w.line(&format!("#include \"{base_name}Common.h\""));
    w.namespace_start(&doc.module);

    for item in &doc.declarations_order {
        match item.category {
            DeclCategory::Struct => {
                if let Some(decl) = doc.find_struct(&item.name) {
                    emit_struct_impl(&mut w, decl)?;
                }
            }
            DeclCategory::Union => {
                if let Some(decl) = doc.find_union(&item.name) {
                    emit_union_impl(&mut w, decl)?;
                }
            }
            _ => {}
        }
    }

    emit_message_reader_impl(&mut w);
    emit_message_writer_impl(&mut w);

    w.namespace_end(&doc.module);
    Ok(w.finish())
}

fn emit_bytes_buffer(w: &mut Writer) {
    w.blank();
    w.line("struct BytesBuffer {");
    w.line("    std::vector<uint8_t> data;");
    w.line("};");
}

fn emit_name_id_mapper(w: &mut Writer) {
    w.blank();
    w.line("class NameIdMapper {");
    w.line("public:");
    w.line("    bool FindId(const std::string& name, uint16_t* id) const {");
    w.line("        if (id == nullptr) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        auto iter = name_id_map_.find(name);");
    w.line("        if (iter == name_id_map_.end()) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        *id = iter->second;");
    w.line("        return true;");
    w.line("    }");
    w.blank();
    w.line("    bool FindName(const uint16_t id, const char** name, uint32_t* size) const {");
    w.line("        if (name == nullptr || size == nullptr) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        auto iter = id_name_map_.find(id);");
    w.line("        if (iter == id_name_map_.end()) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        *name = iter->second.c_str();");
    w.line("        *size = iter->second.size();");
    w.line("        return true;");
    w.line("    }");
    w.blank();
    w.line("    void InsertNameId(const std::string& name, uint16_t id) {");
    w.line("        name_id_map_.emplace(name, id);");
    w.line("    }");
    w.blank();
    w.line("    void InsertIdName(uint16_t id, const std::string& name) {");
    w.line("        id_name_map_.emplace(id, name);");
    w.line("    }");
    w.blank();
    w.line("private:");
    w.line("    std::unordered_map<std::string, uint16_t> name_id_map_;");
    w.line("    std::unordered_map<uint16_t, std::string> id_name_map_;");
    w.line("};");
}

fn emit_message_reader(w: &mut Writer) {
    w.blank();
    w.line("class MessageReader {");
    w.line("public:");
    w.line("    explicit MessageReader(PolarisReadableMessage* message) : message_(message) {}");
    w.blank();
    for sig in PRIMITIVE_READ_SIGS {
        w.line(&format!("    bool Read({sig});"));
    }
    w.line("    bool Read(std::string* value);");
    w.line("    bool Read(BytesBuffer* value);");
    w.blank();
    w.line("    template<typename ValueType>");
    w.line("    bool Read(std::vector<ValueType>* value) {");
    w.line("        if (value == nullptr) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        int32_t size = 0;");
    w.line("        bool flag = message_->read_vector_begin(message_, &size);");
    w.line("        if (!flag) {");
    w.line("            return flag;");
    w.line("        }");
    w.line("        uint32_t count = (uint32_t)size;");
    w.line("        while (count > 0) {");
    w.line("            count--;");
    w.line("            ValueType member;");
    w.line("            if (!Read(&member)) {");
    w.line("                break;");
    w.line("            }");
    w.line("            value->push_back(std::move(member));");
    w.line("        }");
    w.line("        message_->read_vector_end(message_);");
    w.line("        return true;");
    w.line("    }");
    w.blank();
    w.line("    template<typename ValueType, std::size_t size>");
    w.line("    bool Read(std::array<ValueType, size>* value) {");
    w.line("        if (value == nullptr) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        bool flag = message_->read_array_begin(message_);");
    w.line("        if (!flag) {");
    w.line("            return flag;");
    w.line("        }");
    w.line("        for (std::size_t index = 0; index < size; index++) {");
    w.line("            ValueType member;");
    w.line("            Read(&member);");
    w.line("            (*value)[index] = std::move(member);");
    w.line("        }");
    w.line("        message_->read_array_end(message_);");
    w.line("        return true;");
    w.line("    }");
    w.blank();
    w.line("    template<typename T>");
    w.line("    bool Read(T* value) {");
    w.line("        if (value == nullptr) {");
    w.line("            return false;");
    w.line("        }");
    w.line("        return value->Deserialize(message_);");
    w.line("    }");
    w.blank();
    w.line("private:");
    w.line("    PolarisReadableMessage* message_;");
    w.line("};");
}

fn emit_message_writer(w: &mut Writer) {
    w.blank();
    w.line("class MessageWriter {");
    w.line("public:");
    w.line("    explicit MessageWriter(PolarisWritableMessage* message) : message_(message) {}");
    w.blank();
    for sig in PRIMITIVE_WRITE_SIGS {
        w.line(&format!("    void Write({sig});"));
    }
    w.line("    void Write(const std::string& value);");
    w.line("    void Write(const BytesBuffer& value);");
    w.blank();
    w.line("    template<typename ValueType>");
    w.line("    void Write(const std::vector<ValueType>& value) {");
    w.line("        message_->write_vector_begin(message_, value.size());");
    w.line("        for (const ValueType& item : value) {");
    w.line("            Write(item);");
    w.line("        }");
    w.line("        message_->write_vector_end(message_);");
    w.line("    }");
    w.blank();
    w.line("    template<typename ValueType, std::size_t size>");
    w.line("    void Write(const std::array<ValueType, size>& value) {");
    w.line("        message_->write_array_begin(message_);");
    w.line("        for (const ValueType& item : value) {");
    w.line("            Write(item);");
    w.line("        }");
    w.line("        message_->write_array_end(message_);");
    w.line("    }");
    w.blank();
    w.line("    template<typename T>");
    w.line("    void Write(const T& value) {");
    w.line("        value.Serialize(message_);");
    w.line("    }");
    w.blank();
    w.line("private:");
    w.line("    PolarisWritableMessage* message_;");
    w.line("};");
}

const PRIMITIVE_READ_SIGS: &[&str] = &[
    "bool* value",
    "int8_t* value",
    "int16_t* value",
    "int32_t* value",
    "int64_t* value",
    "uint8_t* value",
    "uint16_t* value",
    "uint32_t* value",
    "uint64_t* value",
    "float* value",
    "double* value",
];

const PRIMITIVE_WRITE_SIGS: &[&str] = &[
    "const bool& value",
    "const int8_t& value",
    "const int16_t& value",
    "const int32_t& value",
    "const int64_t& value",
    "const uint8_t& value",
    "const uint16_t& value",
    "const uint32_t& value",
    "const uint64_t& value",
    "const float& value",
    "const double& value",
];

fn emit_enum(w: &mut Writer, decl: &crate::ir::EnumDecl) {
    w.blank();
    w.line(&format!("enum class {} {{", decl.name));
    for member in &decl.members {
        match member.value {
            Some(v) => w.line(&format!("    {} = {v},", member.name)),
            None => w.line(&format!("    {},", member.name)),
        }
    }
    w.line("};");
}

fn emit_struct_decl(w: &mut Writer, decl: &crate::ir::StructDecl) -> Result<(), ResolveError> {
    w.blank();
    w.line(&format!("struct {} final {{", decl.name));
    for member in &decl.members {
        let spelling = resolver::resolve(&member.ty)?;
        w.line(&format!("    {spelling} {};", member.name));
    }
    w.blank();
    w.line("    bool Deserialize(PolarisReadableMessage* message);");
    w.line("    void Serialize(PolarisWritableMessage* message) const;");
    w.line("};");
    Ok(())
}

fn emit_union_decl(w: &mut Writer, decl: &crate::ir::UnionDecl) -> Result<(), ResolveError> {
    let n = decl.members.len();
    let mut spellings = Vec::with_capacity(n);
    for member in &decl.members {
        spellings.push(resolver::resolve(&member.ty)?);
    }

    w.blank();
    w.line(&format!("class {} final {{", decl.name));
    w.line("public:");
    w.line("    enum Tag : uint32_t {");
    for i in 0..n {
        w.line(&format!("        TYPE_{} = {},", i + 1, i + 1));
    }
    w.line(&format!("        TYPE_RESERVED = {}", n + 1));
    w.line("    };");
    w.blank();
    w.line(&format!("    {}() = default;", decl.name));
    for (i, member) in decl.members.iter().enumerate() {
        let spelling = &spellings[i];
        w.blank();
        w.line(&format!("    explicit {}(const {spelling}& value)", decl.name));
        w.line(&format!("        : tag_(TYPE_{}), {}(value) {{}}", i + 1, member.name));
    }
    for (i, member) in decl.members.iter().enumerate() {
        let spelling = &spellings[i];
        w.blank();
        w.line(&format!("    void SetValue(const {spelling}& value) {{"));
        w.line(&format!("        tag_ = TYPE_{};", i + 1));
        w.line(&format!("        {} = value;", member.name));
        w.line("    }");
    }
    for (i, member) in decl.members.iter().enumerate() {
        let spelling = &spellings[i];
        w.blank();
        w.line(&format!("    bool GetValue({spelling}* value) const {{"));
        w.line("        if (value == nullptr) {");
        w.line("            return false;");
        w.line("        }");
        w.line(&format!("        if (tag_ != TYPE_{}) {{", i + 1));
        w.line("            return false;");
        w.line("        }");
        w.line(&format!("        *value = {};", member.name));
        w.line("        return true;");
        w.line("    }");
    }
    w.blank();
    w.line("    Tag GetTag() const {");
    w.line("        return tag_;");
    w.line("    }");
    w.blank();
    w.line("    void Serialize(PolarisWritableMessage* message) const;");
    w.line("    bool Deserialize(PolarisReadableMessage* message);");
    w.blank();
    w.line("private:");
    w.line("    Tag tag_ = Tag::TYPE_RESERVED;");
    for (i, member) in decl.members.iter().enumerate() {
        w.line(&format!("    {} {};", spellings[i], member.name));
    }
    w.line("};");
    Ok(())
}

fn emit_struct_impl(w: &mut Writer, decl: &crate::ir::StructDecl) -> Result<(), ResolveError> {
    w.blank();
    w.line(&format!("void {}::Serialize(PolarisWritableMessage* message) const {{", decl.name));
    w.line("    if (message == nullptr) {");
    w.line("        return;");
    w.line("    }");
    w.blank();
    w.line("    MessageWriter writer(message);");
    w.line("    message->write_struct_begin(message);");
    for member in &decl.members {
        w.line(&format!("    writer.Write(this->{});", member.name));
    }
    w.line("    message->write_struct_end(message);");
    w.line("}");
    w.blank();
    w.line(&format!("bool {}::Deserialize(PolarisReadableMessage* message) {{", decl.name));
    w.line("    if (message == nullptr) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    MessageReader reader(message);");
    w.blank();
    w.line("    if (!message->read_struct_begin(message)) {");
    w.line("        return false;");
    w.line("    }");
    for member in &decl.members {
        w.line(&format!("    reader.Read(&(this->{}));", member.name));
    }
    w.line("    message->read_struct_end(message);");
    w.line("    return true;");
    w.line("}");
    Ok(())
}

fn emit_union_impl(w: &mut Writer, decl: &crate::ir::UnionDecl) -> Result<(), ResolveError> {
    w.blank();
    w.line(&format!("void {}::Serialize(PolarisWritableMessage* message) const {{", decl.name));
    w.line("    if (message == nullptr) {");
    w.line("        return;");
    w.line("    }");
    w.blank();
    w.line("    MessageWriter writer(message);");
    w.line("    message->write_union_begin(message, tag_);");
    w.blank();
    w.line("    switch (tag_) {");
    for (i, member) in decl.members.iter().enumerate() {
        w.line(&format!("    case Tag::TYPE_{}:", i + 1));
        w.line(&format!("        writer.Write(this->{});", member.name));
        w.line("        break;");
    }
    w.line("    default:");
    w.line("        break;");
    w.line("    }");
    w.blank();
    w.line("    message->write_union_end(message);");
    w.line("}");
    w.blank();
    w.line(&format!("bool {}::Deserialize(PolarisReadableMessage* message) {{", decl.name));
    w.line("    if (message == nullptr) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    MessageReader reader(message);");
    w.line("    bool flag = message->read_union_begin(message, (uint32_t*)&tag_);");
    w.blank();
    w.line("    if (!flag) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    switch (tag_) {");
    for (i, member) in decl.members.iter().enumerate() {
        w.line(&format!("    case Tag::TYPE_{}:", i + 1));
        w.line(&format!("        reader.Read(&(this->{}));", member.name));
        w.line("        break;");
    }
    w.line("    default:");
    w.line("        break;");
    w.line("    }");
    w.blank();
    w.line("    message->read_union_end(message);");
    w.line("    return true;");
    w.line("}");
    Ok(())
}

fn emit_message_reader_impl(w: &mut Writer) {
    w.blank();
    w.line("bool MessageReader::Read(bool* value) {");
    w.line("    uint8_t result;");
    w.blank();
    w.line("    if (!message_->read_uint8(message_, &result)) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    *value = result > 0 ? true : false;");
    w.line("    return true;");
    w.line("}");

    for (ty, abi) in PRIMITIVE_PAIRS {
        w.blank();
        w.line(&format!("bool MessageReader::Read({ty}* value) {{"));
        w.line(&format!("    return message_->read_{abi}(message_, value);"));
        w.line("}");
    }

    w.blank();
    w.line("bool MessageReader::Read(std::string* value) {");
    w.line("    const char* str = nullptr;");
    w.line("    uint32_t size = 0;");
    w.blank();
    w.line("    if (!message_->read_string(message_, &str, &size)) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    *value = str;");
    w.line("    delete [] str;");
    w.line("    return true;");
    w.line("}");

    w.blank();
    w.line("bool MessageReader::Read(BytesBuffer* value) {");
    w.line("    int8_t* buffer = nullptr;");
    w.line("    uint32_t size = 0;");
    w.blank();
    w.line("    if (!message_->read_byte_buffer(message_, &buffer, &size)) {");
    w.line("        return false;");
    w.line("    }");
    w.blank();
    w.line("    uint8_t* temp = reinterpret_cast<uint8_t*>(buffer);");
    w.line("    value->data.assign(temp, temp + size);");
    w.line("    delete [] buffer;");
    w.line("    return true;");
    w.line("}");
}

fn emit_message_writer_impl(w: &mut Writer) {
    w.blank();
    w.line("void MessageWriter::Write(const bool& value) {");
    w.line("    message_->write_uint8(message_, value ? 1 : 0);");
    w.line("}");

    for (ty, abi) in PRIMITIVE_PAIRS {
        w.blank();
        w.line(&format!("void MessageWriter::Write(const {ty}& value) {{"));
        w.line(&format!("    message_->write_{abi}(message_, value);"));
        w.line("}");
    }

    w.blank();
    w.line("void MessageWriter::Write(const std::string& value) {");
    w.line("    message_->write_string(message_, value.c_str());");
    w.line("}");

    w.blank();
    w.line("void MessageWriter::Write(const BytesBuffer& value) {");
    w.line("    message_->write_byte_buffer(message_, value.data.data(), value.data.size());");
    w.line("}");
}

const PRIMITIVE_PAIRS: &[(&str, &str)] = &[
    ("int8_t", "int8"),
    ("int16_t", "int16"),
    ("int32_t", "int32"),
    ("int64_t", "int64"),
    ("uint8_t", "uint8"),
    ("uint16_t", "uint16"),
    ("uint32_t", "uint32"),
    ("uint64_t", "uint64"),
    ("float", "float"),
    ("double", "double"),
];

/// A resolved data-wrapper struct: one per method request, method
/// response, or event payload (§4.3 point 6).
pub struct DataWrapper {
    pub name: String,
    pub members: Vec<(String, String)>,
}

/// Resolves an arg list into wrapper members using the wrapper-specific
/// `<function>_arg_<1-based-index>` naming convention (§3 invariant),
/// distinct from the 0-based in/out argument-list convention used
/// elsewhere. Returns `None` if the list is empty or resolves to void.
fn resolve_wrapper_members(
    function_name: &str,
    args: &[crate::ir::Arg],
) -> Result<Option<Vec<(String, String)>>, ResolveError> {
    if args.is_empty() {
        return Ok(None);
    }

    let mut members = Vec::with_capacity(args.len());
    for (i, arg) in args.iter().enumerate() {
        let spelling = resolver::resolve(&arg.ty)?;
        if crate::resolver::is_void(&spelling) {
            return Ok(None);
        }
        let name = crate::emit::wrapper_member_name(function_name, arg.name.as_deref(), i);
        members.push((name, spelling));
    }

    Ok(Some(members))
}

/// Builds the per-interface Req/Resp/Notify aggregates, suppressing any
/// whose member list resolves to a single void.
pub fn data_wrappers_for_interface(
    interface: &crate::ir::InterfaceDecl,
) -> Result<Vec<DataWrapper>, ResolveError> {
    let mut wrappers = Vec::new();

    for method in &interface.method_list {
        if let Some(members) = resolve_wrapper_members(&method.method_name, &method.method_parameter)? {
            wrappers.push(DataWrapper {
                name: format!("{}_{}_Req", interface.name, method.method_name),
                members,
            });
        }
        if let Some(members) = resolve_wrapper_members(&method.method_name, &method.method_return)? {
            wrappers.push(DataWrapper {
                name: format!("{}_{}_Resp", interface.name, method.method_name),
                members,
            });
        }
    }

    for event in &interface.event_list {
        if let Some(members) = resolve_wrapper_members(&event.event_name, &event.members)? {
            wrappers.push(DataWrapper {
                name: format!("{}_{}_Notify", interface.name, event.event_name),
                members,
            });
        }
    }

    Ok(wrappers)
}

fn emit_data_wrapper_structs(w: &mut Writer, doc: &Document) -> Result<(), ResolveError> {
    for interface in &doc.interfaces {
        for wrapper in data_wrappers_for_interface(interface)? {
            w.blank();
            w.line(&format!("struct {} {{", wrapper.name));
            for (name, spelling) in &wrapper.members {
                w.line(&format!("    const {spelling}& {name};"));
            }
            w.line("};");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{EnumDecl, EnumMember};

    #[test]
    fn minimal_enum_scenario() {
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
            declarations_order: vec![crate::ir::DeclarationOrderItem {
                category: DeclCategory::Enum,
                name: "Color".into(),
            }],
            ..Default::default()
        };

        let header = emit_common_header(&doc, "Demo").unwrap();
        assert!(header.contains("enum class Color {"));
        assert!(header.contains("RED = 1,"));
        assert!(header.contains("GREEN,"));
        assert!(header.contains("BLUE = 5,"));
        assert!(header.contains("namespace thru {"));
        assert!(header.contains("namespace demo {"));

        let impl_text = emit_common_impl(&doc, "Demo").unwrap();
        assert!(!impl_text.contains("Color::Serialize"));
    }

    #[test]
    fn union_round_trip_scenario() {
        use crate::ir::{UnionDecl, UnionMember};

        let doc = Document {
            unions: vec![UnionDecl {
                name: "V".into(),
                members: vec![
                    UnionMember {
                        name: "i".into(),
                        ty: crate::ir::TypeRef::Tokens(vec!["long".into()]),
                        case_value: 10,
                    },
                    UnionMember {
                        name: "s".into(),
                        ty: crate::ir::TypeRef::Tokens(vec!["string".into()]),
                        case_value: 20,
                    },
                ],
            }],
            declarations_order: vec![crate::ir::DeclarationOrderItem {
                category: DeclCategory::Union,
                name: "V".into(),
            }],
            ..Default::default()
        };

        let header = emit_common_header(&doc, "Demo").unwrap();
        assert!(header.contains("TYPE_1 = 1,"));
        assert!(header.contains("TYPE_2 = 2,"));
        assert!(header.contains("TYPE_RESERVED = 3"));
        assert!(header.contains("explicit V(const int32_t& value)"));

        let impl_text = emit_common_impl(&doc, "Demo").unwrap();
        assert!(impl_text.contains("case Tag::TYPE_1:"));
        assert!(impl_text.contains("writer.Write(this->i);"));
    }

    #[test]
    fn sequence_and_array_scenario() {
        use crate::ir::{Member, StructDecl, StructuredTypeRef, TypeRef};

        let doc = Document {
            structs: vec![StructDecl {
                name: "Bag".into(),
                members: vec![
                    Member {
                        name: "data".into(),
                        ty: TypeRef::Structured(Box::new(StructuredTypeRef {
                            type_name: Some(TypeRef::Tokens(vec!["uint8".into()])),
                            sequence_size: Some(-1),
                        })),
                    },
                    Member {
                        name: "hash".into(),
                        ty: TypeRef::Structured(Box::new(StructuredTypeRef {
                            type_name: Some(TypeRef::Tokens(vec!["uint8".into()])),
                            sequence_size: Some(4),
                        })),
                    },
                ],
            }],
            declarations_order: vec![crate::ir::DeclarationOrderItem {
                category: DeclCategory::Struct,
                name: "Bag".into(),
            }],
            ..Default::default()
        };

        let header = emit_common_header(&doc, "Demo").unwrap();
        assert!(header.contains("std::vector<uint8_t> data;"));
        assert!(header.contains("std::array<uint8_t, 4> hash;"));
    }

    #[test]
    fn void_wrapper_is_suppressed() {
        use crate::ir::{Arg, InterfaceDecl, Method, TypeRef};

        let interface = InterfaceDecl {
            name: "Ping".into(),
            method_list: vec![Method {
                method_name: "beat".into(),
                method_parameter: vec![],
                method_return: vec![Arg {
                    name: None,
                    ty: TypeRef::Tokens(vec!["void".into()]),
                }],
            }],
            event_list: vec![],
        };

        let wrappers = data_wrappers_for_interface(&interface).unwrap();
        assert!(wrappers.is_empty());
    }
}
