/* Service Skeleton Emitter: ServiceHeader / ServiceImpl (§4.5). */

use crate::emit::{resolve_args, Writer};
use crate::error::ResolveError;
use crate::ir::{Document, InterfaceDecl};
use crate::symbols::SymbolTable;

pub fn emit_service_header(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    let guard = super::common_guard(doc, base_name, "SERVICE");
    w.line(&format!("#ifndef {guard}"));
    w.line(&format!("#define {guard}"));
    w.blank();
    w.line("#include <functional>");
    w.line(&format!("#include \"{base_name}Common.h\""));

    w.namespace_start(&doc.module);
    emit_session_and_handlers(&mut w);

    for interface in &doc.interfaces {
        w.blank();
        w.line(&format!("class {}Service;", interface.name));
        w.line(&format!("class {}ServiceImpl;", interface.name));
    }

    for item in &doc.declarations_order {
        if item.category != crate::ir::DeclCategory::Interface {
            continue;
        }
        if let Some(interface) = doc.find_interface(&item.name) {
            emit_service_facade_decl(&mut w, interface)?;
            emit_abstract_service_decl(&mut w, interface)?;
        }
    }

    w.namespace_end(&doc.module);
    w.blank();
    w.line(&format!("#endif  // {guard}"));
    Ok(w.finish())
}

pub fn emit_service_impl(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    w.line(&format!("#include \"{base_name}Service.h\""));
    w.namespace_start(&doc.module);

    for item in &doc.declarations_order {
        if item.category != crate::ir::DeclCategory::Interface {
            continue;
        }
        if let Some(interface) = doc.find_interface(&item.name) {
            emit_codec(&mut w, interface)?;
            emit_service_impl_class(&mut w, doc, interface)?;
            emit_service_facade_impl(&mut w, interface)?;
            emit_abstract_service_impl(&mut w, doc, interface)?;
        }
    }

    w.namespace_end(&doc.module);
    Ok(w.finish())
}

fn emit_session_and_handlers(w: &mut Writer) {
    w.blank();
    w.line("struct SessionContext final {");
    w.line("    uint32_t channel;");
    w.line("    std::string token;");
    w.line("    std::string client_identifier;");
    w.line("    bool has_permission = false;");
    w.line("};");
    w.blank();
    w.line("using SessionHandler = std::function<void(const SessionContext& session, bool active)>;");
    w.line("using CommunicationHandler = std::function<void(bool available)>;");
}

fn emit_service_facade_decl(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!("class {name}Service final {{"));
    w.line("public:");
    w.line(&format!("    {name}Service();"));
    w.blank();
    w.line(&format!("    {name}Service(const {name}Service&) = delete;"));
    w.line(&format!("    {name}Service& operator=(const {name}Service&) = delete;"));
    w.blank();
    w.line("    bool Start();");
    w.line("    void Stop();");

    for method in &interface.method_list {
        let returns = resolve_args("out", &method.method_return)?;
        w.blank();
        if returns.is_some() {
            let args = args_signature(&returns);
            w.line(&format!(
                "    using {}Replyer = std::function<void({args})>;",
                method.method_name
            ));
        }
        let params = resolve_args("in", &method.method_parameter)?;
        let mut sig = String::from("const SessionContext& ctx");
        if let Some(params) = &params {
            for p in params {
                sig.push_str(&format!(", const {}& {}", p.spelling, p.name));
            }
        }
        if returns.is_some() {
            sig.push_str(&format!(", const {}Replyer& replyer", method.method_name));
        }
        w.line(&format!("    using {}Handler = std::function<void({sig})>;", method.method_name));
        w.line(&format!(
            "    void Register{}Handler(const {}Handler& handler);",
            method.method_name, method.method_name
        ));
    }

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let args = args_signature(&members);
        w.blank();
        w.line(&format!("    void Notify{}({args});", event.event_name));
    }

    w.blank();
    w.line("    void RegisterSessionHandler(const SessionHandler& handler);");
    w.line("    void RegisterCommunicationHandler(const CommunicationHandler& handler);");
    w.blank();
    w.line("private:");
    w.line(&format!("    std::shared_ptr<{name}ServiceImpl> impl_;"));
    w.line("};");
    Ok(())
}

fn emit_abstract_service_decl(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!("class {name}AbstractService {{"));
    w.line("public:");
    for method in &interface.method_list {
        let returns = resolve_args("out", &method.method_return)?;
        if returns.is_some() {
            let args = args_signature(&returns);
            w.line(&format!(
                "    using {}Replyer = std::function<void({args})>;",
                method.method_name
            ));
        }
    }
    w.blank();
    w.line("public:");
    w.line(&format!("    {name}AbstractService();"));
    w.line(&format!("    virtual ~{name}AbstractService();"));
    w.blank();
    w.line(&format!("    {name}AbstractService(const {name}AbstractService&) = delete;"));
    w.line(&format!("    {name}AbstractService& operator=(const {name}AbstractService&) = delete;"));
    w.blank();
    w.line("    bool Start();");
    w.line("    void Stop();");

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let args = args_signature(&members);
        w.blank();
        w.line(&format!("    void Notify{}({args});", event.event_name));
    }

    w.blank();
    w.line("private:");
    w.line("    virtual void handleSession(const SessionContext& session, bool active) {}");
    w.line("    virtual void handleCommStatus(bool available) {}");

    for method in &interface.method_list {
        let returns = resolve_args("out", &method.method_return)?;
        let params = resolve_args("in", &method.method_parameter)?;
        let mut sig = String::from("const SessionContext& ctx");
        if let Some(params) = &params {
            for p in params {
                sig.push_str(&format!(", const {}& {}", p.spelling, p.name));
            }
        }
        if returns.is_some() {
            sig.push_str(&format!(", const {}Replyer& replyer", method.method_name));
        }
        w.line(&format!("    virtual void handle{}({sig}) {{}}", method.method_name));
    }

    w.blank();
    w.line("private:");
    w.line(&format!(
        "    static void {name}RequestHandler(void* user_data, PolarisReadableMessage* message);"
    ));
    w.line(&format!(
        "    static void {name}SessionHandler(void* user_data, const PolarisSession* session, bool active);"
    ));
    w.line(&format!("    static void {name}CommHandler(void* user_data, bool available);"));
    w.blank();
    w.line("    static bool ServiceNameToId(void* user_data, const char* name, uint16_t* id) {");
    w.line("        auto* mapper = reinterpret_cast<NameIdMapper*>(user_data);");
    w.line("        return mapper->FindId(name, id);");
    w.line("    }");
    w.blank();
    w.line("    static bool ServiceIdToName(void* user_data, uint16_t id, const char** name, uint32_t* size) {");
    w.line("        auto* mapper = reinterpret_cast<NameIdMapper*>(user_data);");
    w.line("        return mapper->FindName(id, name, size);");
    w.line("    }");
    w.blank();
    w.line("    void onRequest(PolarisReadableMessage* request);");
    for method in &interface.method_list {
        w.line(&format!(
            "    void on{}(PolarisReadableMessage* request, const std::string& permission);",
            method.method_name
        ));
    }
    w.line("    void initNameIdMapping();");
    w.blank();
    w.line("private:");
    w.line("    PolarisRuntime* runtime_ = nullptr;");
    w.line("    PolarisService* service_ = nullptr;");
    w.line("    std::shared_ptr<NameIdMapper> name_id_map_;");
    w.line("};");
    Ok(())
}

fn args_signature(args: &Option<Vec<crate::emit::ResolvedArg>>) -> String {
    match args {
        Some(args) => args
            .iter()
            .map(|a| format!("const {}& {}", a.spelling, a.name))
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

fn emit_codec(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!("class {name}Codec {{"));
    w.line("public:");
    for method in &interface.method_list {
        let wrappers = super::common::data_wrappers_for_interface(interface)?;
        let resp = wrappers.iter().find(|w| w.name == format!("{name}_{}_Resp", method.method_name));
        if let Some(resp) = resp {
            w.blank();
            w.line(&format!(
                "    static void {}ReplyDecorator(void* user_data, PolarisWritableMessage* message) {{",
                method.method_name
            ));
            w.line(&format!("        auto* data = reinterpret_cast<const {}*>(user_data);", resp.name));
            w.line("        MessageWriter writer(message);");
            w.line(&format!("        message->serialize_begin(message, {});", resp.members.len()));
            for (member, _) in &resp.members {
                w.line(&format!("        writer.Write(data->{member});"));
            }
            w.line("        message->serialize_end(message);");
            w.line("    }");
        }
    }
    for event in &interface.event_list {
        let wrappers = super::common::data_wrappers_for_interface(interface)?;
        let notify = wrappers.iter().find(|w| w.name == format!("{name}_{}_Notify", event.event_name));
        w.blank();
        w.line(&format!(
            "    static void {}NotifyDecorator(void* user_data, PolarisWritableMessage* message) {{",
            event.event_name
        ));
        if let Some(notify) = notify {
            w.line(&format!("        auto* data = reinterpret_cast<const {}*>(user_data);", notify.name));
            w.line("        MessageWriter writer(message);");
            w.line(&format!("        message->serialize_begin(message, {});", notify.members.len()));
            for (member, _) in &notify.members {
                w.line(&format!("        writer.Write(data->{member});"));
            }
            w.line("        message->serialize_end(message);");
        }
        w.line("    }");
    }
    w.line("};");
    Ok(())
}

fn emit_service_impl_class(w: &mut Writer, doc: &Document, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    let full_name = if doc.module.is_empty() {
        name.clone()
    } else {
        format!("{}.{}", doc.module_dotted(), name)
    };

    w.blank();
    w.line(&format!("class {name}ServiceImpl final {{"));
    w.line("public:");
    w.line(&format!("    {name}ServiceImpl() {{"));
    w.line("        runtime_ = PolarisCreateRuntime();");
    w.line("        name_id_map_ = std::make_shared<NameIdMapper>();");
    w.line("        initNameIdMapping();");
    w.line(&format!(
        "        service_ = PolarisCreateService(runtime_, \"{full_name}\", PolarisChannel::kDDS,"
    ));
    w.line("            &ServiceIdToName, name_id_map_.get(), &ServiceNameToId, name_id_map_.get());");
    w.line("    }");
    w.blank();
    w.line(&format!("    ~{name}ServiceImpl() {{"));
    w.line("        if (service_ != nullptr) {");
    w.line("            PolarisDestroyService(service_);");
    w.line("        }");
    w.line("        if (runtime_ != nullptr) {");
    w.line("            PolarisDestroyRuntime(runtime_);");
    w.line("        }");
    w.line("    }");
    w.blank();
    w.line("    bool Start() {");
    w.line(&format!(
        "        service_->set_request_handler(service_, &{name}ServiceImpl::RequestTrampoline, this);"
    ));
    w.line(&format!(
        "        service_->set_session_handler(service_, &{name}ServiceImpl::SessionTrampoline, this);"
    ));
    w.line(&format!(
        "        service_->set_communication_handler(service_, &{name}ServiceImpl::CommTrampoline, this);"
    ));
    w.line("        return service_->start(service_);");
    w.line("    }");
    w.blank();
    w.line("    void Stop() { service_->stop(service_); }");
    w.blank();
    w.line(&format!(
        "    static void RequestTrampoline(void* user_data, PolarisReadableMessage* request) {{"
    ));
    w.line(&format!(
        "        reinterpret_cast<{name}ServiceImpl*>(user_data)->OnRequest(request);"
    ));
    w.line("    }");
    w.blank();
    w.line(&format!(
        "    static void SessionTrampoline(void* user_data, const PolarisSession* session, bool active) {{"
    ));
    w.line(&format!(
        "        auto* self = reinterpret_cast<{name}ServiceImpl*>(user_data);"
    ));
    w.line("        if (self->session_handler_) {");
    w.line("            SessionContext ctx{};");
    w.line("            self->session_handler_(ctx, active);");
    w.line("        }");
    w.line("    }");
    w.blank();
    w.line(&format!(
        "    static void CommTrampoline(void* user_data, bool available) {{"
    ));
    w.line(&format!(
        "        auto* self = reinterpret_cast<{name}ServiceImpl*>(user_data);"
    ));
    w.line("        if (self->communication_handler_) {");
    w.line("            self->communication_handler_(available);");
    w.line("        }");
    w.line("    }");
    w.blank();
    w.line("    void RegisterSessionHandler(const SessionHandler& handler) { session_handler_ = handler; }");
    w.line("    void RegisterCommunicationHandler(const CommunicationHandler& handler) { communication_handler_ = handler; }");
    w.blank();
    for method in &interface.method_list {
        w.line(&format!(
            "    void Register{}Handler({name}Service::{}Handler handler) {{ {}_handler_ = handler; }}",
            method.method_name, method.method_name, method.method_name
        ));
    }
    w.blank();
    w.line("    void OnRequest(PolarisReadableMessage* request) {");
    w.line("        const char* name = nullptr;");
    w.line("        uint32_t size = 0;");
    w.line("        if (!request->read_name(request, &name, &size)) {");
    w.line("            return;");
    w.line("        }");
    w.line("        std::string request_name(name, size);");
    for (i, method) in interface.method_list.iter().enumerate() {
        let kw = if i == 0 { "if" } else { "else if" };
        w.line(&format!("        {kw} (request_name == \"{}\") {{", method.method_name));
        w.line(&format!("            Handle{}(request);", method.method_name));
        w.line("        }");
    }
    w.line("    }");

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let args = args_signature(&members);
        w.blank();
        w.line(&format!("    void Notify{}({args}) {{", event.event_name));
        if let Some(members) = &members {
            let wrapper_name = format!("{name}_{}_Notify", event.event_name);
            w.line(&format!("        {wrapper_name} notify {{{}}};", members.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ")));
            w.line(&format!(
                "        PolarisServiceNotify(service_, \"{}\", &{name}Codec::{}NotifyDecorator, &notify);",
                event.event_name, event.event_name
            ));
        } else {
            w.line(&format!(
                "        PolarisServiceNotify(service_, \"{}\", &{name}Codec::{}NotifyDecorator, nullptr);",
                event.event_name, event.event_name
            ));
        }
        w.line("    }");
    }

    w.blank();
    w.line("    void initNameIdMapping() {");
    let table = SymbolTable::for_interface(interface);
    for (id, entry_name) in table.entries() {
        w.line(&format!("        name_id_map_->InsertNameId(\"{entry_name}\", {id});"));
        w.line(&format!("        name_id_map_->InsertIdName({id}, \"{entry_name}\");"));
    }
    w.line("    }");
    w.blank();

    for method in &interface.method_list {
        emit_handle_method(w, name, method)?;
    }

    w.blank();
    w.line("private:");
    w.line(&format!(
        "    static bool ServiceNameToId(void* user_data, const char* name, uint16_t* id) {{"
    ));
    w.line("        auto* mapper = reinterpret_cast<NameIdMapper*>(user_data);");
    w.line("        return mapper->FindId(name, id);");
    w.line("    }");
    w.blank();
    w.line(&format!(
        "    static bool ServiceIdToName(void* user_data, uint16_t id, const char** name, uint32_t* size) {{"
    ));
    w.line("        auto* mapper = reinterpret_cast<NameIdMapper*>(user_data);");
    w.line("        return mapper->FindName(id, name, size);");
    w.line("    }");
    w.blank();
    w.line("    PolarisRuntime* runtime_ = nullptr;");
    w.line("    PolarisService* service_ = nullptr;");
    w.line("    std::shared_ptr<NameIdMapper> name_id_map_;");
    w.line("    SessionHandler session_handler_;");
    w.line("    CommunicationHandler communication_handler_;");
    for method in &interface.method_list {
        w.line(&format!(
            "    {name}Service::{}Handler {}_handler_;",
            method.method_name, method.method_name
        ));
    }
    w.line("};");
    Ok(())
}

fn emit_handle_method(w: &mut Writer, interface: &str, method: &crate::ir::Method) -> Result<(), ResolveError> {
    let params = resolve_args("in", &method.method_parameter)?;
    let returns = resolve_args("out", &method.method_return)?;
    w.blank();
    w.line(&format!("    void Handle{}(PolarisReadableMessage* request) {{", method.method_name));
    w.line("        MessageReader reader(request);");
    if let Some(params) = &params {
        for p in params {
            w.line(&format!("        {} {};", p.spelling, p.name));
            w.line(&format!("        reader.Read(&{});", p.name));
        }
    }
    w.line("        uint32_t channel = 0;");
    w.line("        std::string token;");
    w.line("        request->get_channel(request, &channel);");
    w.line("        request->get_token(request, &token);");
    w.line("        SessionContext ctx{channel, token, \"\", false};");
    w.line("        PolarisReadableMessage* cloned_request = request->clone(request);");

    let call_args = params
        .as_ref()
        .map(|p| p.iter().map(|a| a.name.clone()).collect::<Vec<_>>())
        .unwrap_or_default()
        .join(", ");

    if let Some(returns) = &returns {
        let wrapper_name = format!("{interface}_{}_Resp", method.method_name);
        let lambda_params = returns
            .iter()
            .map(|r| format!("const {}& {}", r.spelling, r.name))
            .collect::<Vec<_>>()
            .join(", ");
        let wrapper_args = returns.iter().map(|r| r.name.clone()).collect::<Vec<_>>().join(", ");
        w.line(&format!("        auto replyer = [this, cloned_request]({lambda_params}) {{"));
        w.line(&format!("            {wrapper_name} response {{{wrapper_args}}};"));
        w.line(&format!(
            "            service_->reply(service_, cloned_request, &{interface}Codec::{}ReplyDecorator, &response);",
            method.method_name
        ));
        w.line("            cloned_request->release(cloned_request);");
        w.line("        };");
        let mut call = format!("ctx");
        if !call_args.is_empty() {
            call.push_str(", ");
            call.push_str(&call_args);
        }
        w.line(&format!("        if ({}_handler_) {{", method.method_name));
        w.line(&format!("            {}_handler_({call}, replyer);", method.method_name));
        w.line("        }");
    } else {
        let mut call = format!("ctx");
        if !call_args.is_empty() {
            call.push_str(", ");
            call.push_str(&call_args);
        }
        w.line(&format!("        if ({}_handler_) {{", method.method_name));
        w.line(&format!("            {}_handler_({call});", method.method_name));
        w.line("        }");
        w.line("        cloned_request->release(cloned_request);");
    }
    w.line("    }");
    Ok(())
}

fn emit_service_facade_impl(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!("{name}Service::{name}Service() : impl_(std::make_shared<{name}ServiceImpl>()) {{}}"));
    w.blank();
    w.line(&format!("bool {name}Service::Start() {{ return impl_->Start(); }}"));
    w.blank();
    w.line(&format!("void {name}Service::Stop() {{ impl_->Stop(); }}"));
    w.blank();
    w.line(&format!(
        "void {name}Service::RegisterSessionHandler(const SessionHandler& handler) {{ impl_->RegisterSessionHandler(handler); }}"
    ));
    w.blank();
    w.line(&format!(
        "void {name}Service::RegisterCommunicationHandler(const CommunicationHandler& handler) {{ impl_->RegisterCommunicationHandler(handler); }}"
    ));
    for method in &interface.method_list {
        w.blank();
        w.line(&format!(
            "void {name}Service::Register{}Handler(const {}Handler& handler) {{ impl_->Register{}Handler(handler); }}",
            method.method_name, method.method_name, method.method_name
        ));
    }
    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let args = args_signature(&members);
        let names = members
            .as_ref()
            .map(|m| m.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", "))
            .unwrap_or_default();
        w.blank();
        w.line(&format!("void {name}Service::Notify{}({args}) {{ impl_->Notify{}({names}); }}", event.event_name, event.event_name));
    }
    Ok(())
}

fn emit_abstract_service_impl(w: &mut Writer, doc: &Document, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    let full_name = if doc.module.is_empty() {
        name.clone()
    } else {
        format!("{}.{}", doc.module_dotted(), name)
    };

    w.blank();
    w.line(&format!("{name}AbstractService::{name}AbstractService() {{"));
    w.line("    runtime_ = PolarisCreateRuntime();");
    w.line("    name_id_map_ = std::make_shared<NameIdMapper>();");
    w.line("    initNameIdMapping();");
    w.line(&format!(
        "    service_ = PolarisCreateService(runtime_, \"{full_name}\", PolarisChannel::kDDS,"
    ));
    w.line(&format!(
        "        &{name}AbstractService::ServiceIdToName, name_id_map_.get(), &{name}AbstractService::ServiceNameToId, name_id_map_.get());"
    ));
    w.line("}");
    w.blank();
    w.line(&format!("{name}AbstractService::~{name}AbstractService() {{"));
    w.line("    if (service_ != nullptr) {");
    w.line("        PolarisDestroyService(service_);");
    w.line("    }");
    w.line("    if (runtime_ != nullptr) {");
    w.line("        PolarisDestroyRuntime(runtime_);");
    w.line("    }");
    w.line("}");
    w.blank();
    w.line(&format!("bool {name}AbstractService::Start() {{"));
    w.line(&format!(
        "    service_->set_request_handler(service_, &{name}RequestHandler, this);"
    ));
    w.line(&format!(
        "    service_->set_session_handler(service_, &{name}SessionHandler, this);"
    ));
    w.line(&format!(
        "    service_->set_communication_handler(service_, &{name}CommHandler, this);"
    ));
    w.line("    return service_->start(service_);");
    w.line("}");
    w.blank();
    w.line(&format!("void {name}AbstractService::Stop() {{ service_->stop(service_); }}"));
    w.blank();
    w.line(&format!(
        "void {name}AbstractService::{name}RequestHandler(void* user_data, PolarisReadableMessage* message) {{"
    ));
    w.line(&format!(
        "    reinterpret_cast<{name}AbstractService*>(user_data)->onRequest(message);"
    ));
    w.line("}");
    w.blank();
    w.line(&format!(
        "void {name}AbstractService::{name}SessionHandler(void* user_data, const PolarisSession* session, bool active) {{"
    ));
    w.line(&format!(
        "    auto* self = reinterpret_cast<{name}AbstractService*>(user_data);"
    ));
    w.line("    SessionContext ctx{};");
    w.line("    self->handleSession(ctx, active);");
    w.line("}");
    w.blank();
    w.line(&format!(
        "void {name}AbstractService::{name}CommHandler(void* user_data, bool available) {{"
    ));
    w.line(&format!(
        "    reinterpret_cast<{name}AbstractService*>(user_data)->handleCommStatus(available);"
    ));
    w.line("}");
    w.blank();
    w.line(&format!("void {name}AbstractService::onRequest(PolarisReadableMessage* request) {{"));
    w.line("    const char* name = nullptr;");
    w.line("    uint32_t size = 0;");
    w.line("    if (!request->read_name(request, &name, &size)) {");
    w.line("        return;");
    w.line("    }");
    w.line("    std::string request_name(name, size);");
    for (i, method) in interface.method_list.iter().enumerate() {
        let kw = if i == 0 { "if" } else { "else if" };
        w.line(&format!("    {kw} (request_name == \"{}\") {{", method.method_name));
        w.line(&format!(
            "        on{}(request, \"\");",
            method.method_name
        ));
        w.line("    }");
    }
    w.line("}");

    for method in &interface.method_list {
        let params = resolve_args("in", &method.method_parameter)?;
        let returns = resolve_args("out", &method.method_return)?;
        w.blank();
        w.line(&format!(
            "void {name}AbstractService::on{}(PolarisReadableMessage* request, const std::string& permission) {{",
            method.method_name
        ));
        w.line("    MessageReader reader(request);");
        if let Some(params) = &params {
            for p in params {
                w.line(&format!("    {} {};", p.spelling, p.name));
                w.line(&format!("    reader.Read(&{});", p.name));
            }
        }
        w.line("    uint32_t channel = 0;");
        w.line("    std::string token;");
        w.line("    request->get_channel(request, &channel);");
        w.line("    request->get_token(request, &token);");
        w.line(&format!(
            "    SessionContext ctx{{channel, token, \"\", !permission.empty()}};"
        ));
        let call_args = params
            .as_ref()
            .map(|p| p.iter().map(|a| a.name.clone()).collect::<Vec<_>>())
            .unwrap_or_default()
            .join(", ");
        if let Some(returns) = &returns {
            w.line("    PolarisReadableMessage* cloned_request = request->clone(request);");
            let wrapper_name = format!("{name}_{}_Resp", method.method_name);
            let lambda_params = returns
                .iter()
                .map(|r| format!("const {}& {}", r.spelling, r.name))
                .collect::<Vec<_>>()
                .join(", ");
            let wrapper_args = returns.iter().map(|r| r.name.clone()).collect::<Vec<_>>().join(", ");
            w.line(&format!("    auto replyer = [this, cloned_request]({lambda_params}) {{"));
            w.line(&format!("        {wrapper_name} response {{{wrapper_args}}};"));
            w.line(&format!(
                "        service_->reply(service_, cloned_request, &{name}Codec::{}ReplyDecorator, &response);",
                method.method_name
            ));
            w.line("        cloned_request->release(cloned_request);");
            w.line("    };");
            let mut call = String::from("ctx");
            if !call_args.is_empty() {
                call.push_str(", ");
                call.push_str(&call_args);
            }
            w.line(&format!("    handle{}({call}, replyer);", method.method_name));
        } else {
            let mut call = String::from("ctx");
            if !call_args.is_empty() {
                call.push_str(", ");
                call.push_str(&call_args);
            }
            w.line(&format!("    handle{}({call});", method.method_name));
        }
        w.line("}");
    }

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let args = args_signature(&members);
        w.blank();
        w.line(&format!("void {name}AbstractService::Notify{}({args}) {{", event.event_name));
        if let Some(members) = &members {
            let wrapper_name = format!("{name}_{}_Notify", event.event_name);
            w.line(&format!(
                "    {wrapper_name} notify {{{}}};",
                members.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ")
            ));
            w.line(&format!(
                "    PolarisServiceNotify(service_, \"{}\", &{name}Codec::{}NotifyDecorator, &notify);",
                event.event_name, event.event_name
            ));
        } else {
            w.line(&format!(
                "    PolarisServiceNotify(service_, \"{}\", &{name}Codec::{}NotifyDecorator, nullptr);",
                event.event_name, event.event_name
            ));
        }
        w.line("}");
    }

    w.blank();
    w.line(&format!("void {name}AbstractService::initNameIdMapping() {{"));
    let table = SymbolTable::for_interface(interface);
    for (id, entry_name) in table.entries() {
        w.line(&format!("    name_id_map_->InsertNameId(\"{entry_name}\", {id});"));
        w.line(&format!("    name_id_map_->InsertIdName({id}, \"{entry_name}\");"));
    }
    w.line("}");
    Ok(())
}
