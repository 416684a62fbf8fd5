/* Proxy Emitter: ProxyHeader / ProxyImpl (§4.6). */

use crate::emit::{resolve_args, Writer};
use crate::error::ResolveError;
use crate::ir::{Document, InterfaceDecl, Method};
use crate::symbols::SymbolTable;

pub fn emit_proxy_header(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    let guard = super::common_guard(doc, base_name, "PROXY");
    w.line(&format!("#ifndef {guard}"));
    w.line(&format!("#define {guard}"));
    w.blank();
    w.line("#include <functional>");
    w.line(&format!("#include \"{base_name}Common.h\""));

    w.namespace_start(&doc.module);
    emit_stable_decls(&mut w);

    for interface in &doc.interfaces {
        w.blank();
        w.line(&format!("class {}Proxy;", interface.name));
        w.line(&format!("class {}ProxyImpl;", interface.name));
    }

    for item in &doc.declarations_order {
        if item.category != crate::ir::DeclCategory::Interface {
            continue;
        }
        if let Some(interface) = doc.find_interface(&item.name) {
            emit_proxy_decl(&mut w, interface)?;
        }
    }

    w.namespace_end(&doc.module);
    w.blank();
    w.line(&format!("#endif  // {guard}"));
    Ok(w.finish())
}

pub fn emit_proxy_impl(doc: &Document, base_name: &str) -> Result<String, ResolveError> {
    let mut w = Writer::new();
    w.line(&format!("#include \"{base_name}Proxy.h\""));
    w.line("#include <algorithm>");
    w.line("#include <mutex>");
    w.namespace_start(&doc.module);
    emit_error_conversion(&mut w);

    for item in &doc.declarations_order {
        if item.category != crate::ir::DeclCategory::Interface {
            continue;
        }
        if let Some(interface) = doc.find_interface(&item.name) {
            emit_proxy_codec(&mut w, interface)?;
            emit_proxy_impl_class(&mut w, doc, interface)?;
            emit_proxy_facade_impl(&mut w, interface)?;
        }
    }

    w.namespace_end(&doc.module);
    Ok(w.finish())
}

fn emit_stable_decls(w: &mut Writer) {
    w.blank();
    w.line("enum class ErrorCode {");
    w.line("    SUCCESS = 0,");
    w.line("    NO_SERVICE,");
    w.line("    REQUEST_FAILED,");
    w.line("    TIME_OUT,");
    w.line("    PARAM_INVALID,");
    w.line("    INTERNAL_ERROR,");
    w.line("};");
    w.blank();
    w.line("enum class WaitResult {");
    w.line("    kSuccess = 0,");
    w.line("    kTimeout,");
    w.line("    kFailed");
    w.line("};");
    w.blank();
    w.line("using ServiceStatusCallback = std::function<void(bool available)>;");
}

fn emit_error_conversion(w: &mut Writer) {
    w.blank();
    w.line("static ErrorCode convert(PolarisErrorCode code) {");
    w.line("    switch (code) {");
    w.line("    case PolarisErrorCode::kSuccess:");
    w.line("        return ErrorCode::SUCCESS;");
    w.line("    case PolarisErrorCode::kNoConnection:");
    w.line("        return ErrorCode::NO_SERVICE;");
    w.line("    case PolarisErrorCode::kRequestFailed:");
    w.line("        return ErrorCode::REQUEST_FAILED;");
    w.line("    case PolarisErrorCode::kTimeout:");
    w.line("        return ErrorCode::TIME_OUT;");
    w.line("    default:");
    w.line("        return ErrorCode::INTERNAL_ERROR;");
    w.line("    }");
    w.line("}");
}

fn is_fire_and_forget(method: &Method) -> Result<bool, ResolveError> {
    Ok(resolve_args("out", &method.method_return)?.is_none())
}

fn emit_proxy_decl(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!("class {name}Proxy final {{"));
    w.line("public:");
    w.line(&format!("    explicit {name}Proxy(const std::string& app_name);"));
    w.blank();
    w.line(&format!("    {name}Proxy(const {name}Proxy&) = delete;"));
    w.line(&format!("    {name}Proxy& operator=(const {name}Proxy&) = delete;"));
    w.blank();
    w.line("    void WatchServiceStatus(const ServiceStatusCallback& callback);");
    w.line("    bool IsServiceActive();");
    w.line("    WaitResult WaitService(int32_t timeout);");
    w.line("    void Unwatch(const std::string& event_name);");

    for method in &interface.method_list {
        let params = resolve_args("in", &method.method_parameter)?;
        let returns = resolve_args("out", &method.method_return)?;
        w.blank();
        if returns.is_none() {
            let args = in_args_signature(&params);
            w.line(&format!("    ErrorCode {}({args});", method.method_name));
        } else {
            let returns = returns.unwrap();
            let cb_args = returns
                .iter()
                .map(|a| format!("{}*", a.spelling))
                .collect::<Vec<_>>()
                .join(", ");
            w.line(&format!(
                "    using {}Callback = std::function<void(ErrorCode, {cb_args})>;",
                method.method_name
            ));
            let mut sync_args = in_args_signature(&params);
            for r in &returns {
                if !sync_args.is_empty() {
                    sync_args.push_str(", ");
                }
                sync_args.push_str(&format!("{}* {}", r.spelling, r.name));
            }
            w.line(&format!(
                "    ErrorCode {}Sync({sync_args}, int timeout_msec);",
                method.method_name
            ));
            let mut async_args = in_args_signature(&params);
            if !async_args.is_empty() {
                async_args.push_str(", ");
            }
            async_args.push_str(&format!("const {}Callback& callback", method.method_name));
            w.line(&format!("    void {}Async({async_args});", method.method_name));
        }
    }

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let sig = in_args_signature(&members);
        w.blank();
        w.line(&format!("    using {}Callback = std::function<void({sig})>;", event.event_name));
        w.line(&format!("    void On{}(const {}Callback& callback);", event.event_name, event.event_name));
        w.line(&format!("    void Off{}();", event.event_name));
    }

    w.blank();
    w.line("private:");
    w.line(&format!("    std::shared_ptr<{name}ProxyImpl> impl_;"));
    w.line("};");
    Ok(())
}

fn in_args_signature(args: &Option<Vec<crate::emit::ResolvedArg>>) -> String {
    match args {
        Some(args) => args
            .iter()
            .map(|a| format!("const {}& {}", a.spelling, a.name))
            .collect::<Vec<_>>()
            .join(", "),
        None => String::new(),
    }
}

fn emit_proxy_codec(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    let wrappers = super::common::data_wrappers_for_interface(interface)?;
    w.blank();
    w.line(&format!("class {name}Codec {{"));
    w.line("public:");
    for method in &interface.method_list {
        if let Some(req) = wrappers.iter().find(|w| w.name == format!("{name}_{}_Req", method.method_name)) {
            w.blank();
            w.line(&format!(
                "    static void {}_message_decorator(void* user_data, PolarisWritableMessage* message) {{",
                method.method_name
            ));
            w.line(&format!("        auto* data = reinterpret_cast<const {}*>(user_data);", req.name));
            w.line("        MessageWriter writer(message);");
            w.line(&format!("        message->serialize_begin(message, {});", req.members.len()));
            for (member, _) in &req.members {
                w.line(&format!("        writer.Write(data->{member});"));
            }
            w.line("        message->serialize_end(message);");
            w.line("    }");
        }
    }
    w.line("};");
    Ok(())
}

fn emit_proxy_impl_class(w: &mut Writer, doc: &Document, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    let full_name = if doc.module.is_empty() {
        name.clone()
    } else {
        format!("{}.{}", doc.module_dotted(), name)
    };

    w.blank();
    w.line(&format!("struct {name}ProxyImplUserData {{"));
    w.line(&format!("    {name}ProxyImpl* impl;"));
    w.line("    void* inner;");
    w.line("};");

    w.blank();
    w.line(&format!("class {name}ProxyImpl final {{"));
    w.line("public:");
    w.line(&format!("    explicit {name}ProxyImpl(const std::string& app_name) {{"));
    w.line("        runtime_ = PolarisCreateRuntime();");
    w.line("        name_id_map_ = std::make_shared<NameIdMapper>();");
    let table = SymbolTable::for_interface(interface);
    for (id, entry_name) in table.entries() {
        w.line(&format!("        name_id_map_->InsertNameId(\"{entry_name}\", {id});"));
    }
    w.line(&format!(
        "        client_ = PolarisCreateClient(runtime_, \"{full_name}\", PolarisChannel::kDDS, app_name.c_str(),"
    ));
    w.line("            &ProxyNameToId, name_id_map_.get());");
    w.line("    }");
    w.blank();
    w.line(&format!("    ~{name}ProxyImpl() {{"));
    w.line("        if (client_ != nullptr) {");
    w.line("            PolarisDestroyClient(client_);");
    w.line("        }");
    w.line("        if (runtime_ != nullptr) {");
    w.line("            PolarisDestroyRuntime(runtime_);");
    w.line("        }");
    w.line("    }");
    w.blank();
    w.line("    void WatchServiceStatus(const ServiceStatusCallback& callback) {");
    w.line("        std::lock_guard<std::recursive_mutex> guard(mutex_);");
    w.line("        service_status_callbacks_.push_back(callback);");
    w.line("        client_->watch_service_status(client_, &ServiceStatusHandler, this);");
    w.line("    }");
    w.blank();
    w.line("    bool IsServiceActive() { return client_->is_service_active(client_); }");
    w.blank();
    w.line("    WaitResult WaitService(int32_t timeout) {");
    w.line("        return static_cast<WaitResult>(client_->wait_service(client_, timeout));");
    w.line("    }");
    w.blank();
    w.line("    void Unwatch(const std::string& event_name) { client_->unwatch(client_, event_name.c_str()); }");

    for method in &interface.method_list {
        emit_proxy_method(w, name, method)?;
    }

    for event in &interface.event_list {
        emit_proxy_event(w, name, event)?;
    }

    w.blank();
    w.line("private:");
    w.line(&format!(
        "    static bool ProxyNameToId(void* user_data, const char* name, uint16_t* id) {{"
    ));
    w.line("        auto* mapper = reinterpret_cast<NameIdMapper*>(user_data);");
    w.line("        return mapper->FindId(name, id);");
    w.line("    }");
    w.blank();
    w.line("    static void ServiceStatusHandler(void* user_data, bool available) {");
    w.line(&format!("        auto* self = reinterpret_cast<{name}ProxyImpl*>(user_data);"));
    w.line("        std::lock_guard<std::recursive_mutex> guard(self->mutex_);");
    w.line("        for (auto& cb : self->service_status_callbacks_) {");
    w.line("            cb(available);");
    w.line("        }");
    w.line("    }");
    w.blank();
    w.line("    PolarisRuntime* runtime_ = nullptr;");
    w.line("    PolarisClient* client_ = nullptr;");
    w.line("    std::shared_ptr<NameIdMapper> name_id_map_;");
    w.line("    std::recursive_mutex mutex_;");
    w.line("    std::vector<ServiceStatusCallback> service_status_callbacks_;");
    for method in &interface.method_list {
        if is_fire_and_forget(method)? {
            continue;
        }
        w.line(&format!(
            "    std::vector<std::shared_ptr<{name}Proxy::{}Callback>> {}_callbacks_;",
            method.method_name, method.method_name
        ));
        w.line(&format!(
            "    std::vector<std::unique_ptr<{name}ProxyImplUserData>> {}_user_data_;",
            method.method_name
        ));
    }
    for event in &interface.event_list {
        w.line(&format!(
            "    std::vector<std::shared_ptr<{name}Proxy::{}Callback>> {}_callbacks_;",
            event.event_name, event.event_name
        ));
    }
    w.line("};");
    Ok(())
}

fn emit_proxy_method(w: &mut Writer, interface: &str, method: &Method) -> Result<(), ResolveError> {
    let params = resolve_args("in", &method.method_parameter)?;
    let returns = resolve_args("out", &method.method_return)?;
    let method_name = &method.method_name;

    if returns.is_none() {
        let sig = in_args_signature(&params);
        w.blank();
        w.line(&format!("    ErrorCode {method_name}({sig}) {{"));
        if let Some(params) = &params {
            let wrapper = format!("{interface}_{method_name}_Req");
            w.line(&format!(
                "        {wrapper} request {{{}}};",
                params.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ")
            ));
            w.line(&format!(
                "        auto code = client_->send(client_, \"{method_name}\", &{interface}Codec::{method_name}_message_decorator, &request);"
            ));
        } else {
            w.line(&format!(
                "        auto code = client_->send(client_, \"{method_name}\", nullptr, nullptr);"
            ));
        }
        w.line("        return convert(code);");
        w.line("    }");
        return Ok(());
    }

    let returns = returns.unwrap();
    let req_wrapper = format!("{interface}_{method_name}_Req");

    // Sync
    let mut sync_args = in_args_signature(&params);
    for r in &returns {
        if !sync_args.is_empty() {
            sync_args.push_str(", ");
        }
        sync_args.push_str(&format!("{}* {}", r.spelling, r.name));
    }
    w.blank();
    w.line(&format!("    ErrorCode {method_name}Sync({sync_args}, int timeout_msec) {{"));
    let decorator = if params.is_some() {
        format!("&{interface}Codec::{method_name}_message_decorator")
    } else {
        "nullptr".to_string()
    };
    let request_ref = if let Some(params) = &params {
        w.line(&format!(
            "        {req_wrapper} request {{{}}};",
            params.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ")
        ));
        "&request"
    } else {
        "nullptr"
    };
    w.line(&format!(
        "        PolarisReadableMessage* reply = nullptr;"
    ));
    w.line(&format!(
        "        auto code = client_->request_sync(client_, \"{method_name}\", timeout_msec, {decorator}, {request_ref}, &reply);"
    ));
    w.line("        if (code != PolarisErrorCode::kSuccess) {");
    w.line("            return convert(code);");
    w.line("        }");
    w.line("        if (reply == nullptr) {");
    w.line("            return ErrorCode::PARAM_INVALID;");
    w.line("        }");
    w.line("        MessageReader reader(reply);");
    for r in &returns {
        w.line(&format!("        reader.Read({});", r.name));
    }
    w.line("        reply->release(reply);");
    w.line("        return ErrorCode::SUCCESS;");
    w.line("    }");

    // Async
    let mut async_args = in_args_signature(&params);
    if !async_args.is_empty() {
        async_args.push_str(", ");
    }
    async_args.push_str(&format!("const {method_name}Callback& callback"));
    w.blank();
    w.line(&format!("    void {method_name}Async({async_args}) {{"));
    w.line("        std::lock_guard<std::recursive_mutex> guard(mutex_);");
    w.line(&format!(
        "        auto holder = std::make_shared<{interface}Proxy::{method_name}Callback>(callback);"
    ));
    w.line(&format!("        {method_name}_callbacks_.push_back(holder);"));
    w.line(&format!(
        "        auto user_data = std::make_unique<{interface}ProxyImplUserData>({interface}ProxyImplUserData{{this, holder.get()}});"
    ));
    w.line("        auto* raw = user_data.get();");
    w.line(&format!("        {method_name}_user_data_.push_back(std::move(user_data));"));
    if let Some(params) = &params {
        w.line(&format!(
            "        {req_wrapper} request {{{}}};",
            params.iter().map(|a| a.name.clone()).collect::<Vec<_>>().join(", ")
        ));
        w.line(&format!(
            "        client_->request_async(client_, \"{method_name}\", &{interface}Codec::{method_name}_message_decorator, &request, &{method_name}_result_handler, raw);"
        ));
    } else {
        w.line(&format!(
            "        client_->request_async(client_, \"{method_name}\", nullptr, nullptr, &{method_name}_result_handler, raw);"
        ));
    }
    w.line("    }");

    w.blank();
    w.line(&format!(
        "    static void {method_name}_result_handler(void* user_data, PolarisErrorCode error_code, PolarisReadableMessage* reply) {{"
    ));
    w.line(&format!(
        "        auto* data = reinterpret_cast<{interface}ProxyImplUserData*>(user_data);"
    ));
    w.line("        auto* self = data->impl;");
    w.line(&format!(
        "        auto* callback = reinterpret_cast<{interface}Proxy::{method_name}Callback*>(data->inner);"
    ));
    w.line("        if (error_code != PolarisErrorCode::kSuccess) {");
    let null_args = returns.iter().map(|_| "nullptr".to_string()).collect::<Vec<_>>().join(", ");
    w.line(&format!("            (*callback)(convert(error_code), {null_args});"));
    w.line(&format!("            self->Remove{method_name}ResultCallback(user_data);"));
    w.line("            return;");
    w.line("        }");
    w.line("        MessageReader reader(reply);");
    for r in &returns {
        w.line(&format!("        {} {};", r.spelling, r.name));
        w.line(&format!("        reader.Read(&{});", r.name));
    }
    let addr_args = returns.iter().map(|r| format!("&{}", r.name)).collect::<Vec<_>>().join(", ");
    w.line(&format!("        (*callback)(ErrorCode::SUCCESS, {addr_args});"));
    w.line(&format!("        self->Remove{method_name}ResultCallback(user_data);"));
    w.line("    }");

    w.blank();
    w.line(&format!("    void Remove{method_name}ResultCallback(void* user_data) {{"));
    w.line("        std::lock_guard<std::recursive_mutex> guard(mutex_);");
    w.line(&format!(
        "        auto* data = reinterpret_cast<{interface}ProxyImplUserData*>(user_data);"
    ));
    w.line(&format!(
        "        {method_name}_user_data_.erase(std::remove_if({method_name}_user_data_.begin(), {method_name}_user_data_.end(),"
    ));
    w.line("            [data](const auto& entry) { return entry.get() == data; }),");
    w.line(&format!("            {method_name}_user_data_.end());"));
    w.line(&format!(
        "        {method_name}_callbacks_.erase(std::remove_if({method_name}_callbacks_.begin(), {method_name}_callbacks_.end(),"
    ));
    w.line(&format!("            [data](const auto& entry) {{ return entry.get() == data->inner; }}),"));
    w.line(&format!("            {method_name}_callbacks_.end());"));
    w.line("    }");
    Ok(())
}

fn emit_proxy_event(w: &mut Writer, interface: &str, event: &crate::ir::Event) -> Result<(), ResolveError> {
    let members = resolve_args("in", &event.members)?;
    let event_name = &event.event_name;

    w.blank();
    w.line(&format!("    void On{event_name}(const {interface}Proxy::{event_name}Callback& callback) {{"));
    w.line("        std::lock_guard<std::recursive_mutex> guard(mutex_);");
    w.line(&format!("        auto holder = std::make_shared<{interface}Proxy::{event_name}Callback>(callback);"));
    w.line(&format!("        {event_name}_callbacks_.push_back(holder);"));
    w.line(&format!(
        "        client_->watch(client_, \"{event_name}\", &{event_name}_message_handler, holder.get());"
    ));
    w.line("    }");

    w.blank();
    w.line(&format!(
        "    static void {event_name}_message_handler(void* user_data, PolarisReadableMessage* payload) {{"
    ));
    w.line(&format!(
        "        auto* callback = reinterpret_cast<{interface}Proxy::{event_name}Callback*>(user_data);"
    ));
    if let Some(members) = &members {
        w.line("        MessageReader reader(payload);");
        for m in members {
            w.line(&format!("        {} {};", m.spelling, m.name));
            w.line(&format!("        reader.Read(&{});", m.name));
        }
        let names = members.iter().map(|m| m.name.clone()).collect::<Vec<_>>().join(", ");
        w.line(&format!("        (*callback)({names});"));
    } else {
        w.line("        (*callback)();");
    }
    w.line("    }");

    w.blank();
    w.line(&format!(
        "    void Off{event_name}() {{ client_->unwatch(client_, \"{event_name}\"); }}"
    ));
    Ok(())
}

fn emit_proxy_facade_impl(w: &mut Writer, interface: &InterfaceDecl) -> Result<(), ResolveError> {
    let name = &interface.name;
    w.blank();
    w.line(&format!(
        "{name}Proxy::{name}Proxy(const std::string& app_name) : impl_(std::make_shared<{name}ProxyImpl>(app_name)) {{}}"
    ));
    w.blank();
    w.line(&format!(
        "void {name}Proxy::WatchServiceStatus(const ServiceStatusCallback& callback) {{ impl_->WatchServiceStatus(callback); }}"
    ));
    w.blank();
    w.line(&format!("bool {name}Proxy::IsServiceActive() {{ return impl_->IsServiceActive(); }}"));
    w.blank();
    w.line(&format!("WaitResult {name}Proxy::WaitService(int32_t timeout) {{ return impl_->WaitService(timeout); }}"));
    w.blank();
    w.line(&format!(
        "void {name}Proxy::Unwatch(const std::string& event_name) {{ impl_->Unwatch(event_name); }}"
    ));

    for method in &interface.method_list {
        let params = resolve_args("in", &method.method_parameter)?;
        let returns = resolve_args("out", &method.method_return)?;
        let method_name = &method.method_name;
        let call_args = params
            .as_ref()
            .map(|p| p.iter().map(|a| a.name.clone()).collect::<Vec<_>>())
            .unwrap_or_default();

        if returns.is_none() {
            let sig = in_args_signature(&params);
            w.blank();
            w.line(&format!(
                "ErrorCode {name}Proxy::{method_name}({sig}) {{ return impl_->{method_name}({}); }}",
                call_args.join(", ")
            ));
            continue;
        }
        let returns = returns.unwrap();

        let mut sync_args = in_args_signature(&params);
        for r in &returns {
            if !sync_args.is_empty() {
                sync_args.push_str(", ");
            }
            sync_args.push_str(&format!("{}* {}", r.spelling, r.name));
        }
        let mut sync_call = call_args.clone();
        sync_call.extend(returns.iter().map(|r| r.name.clone()));
        sync_call.push("timeout_msec".to_string());
        w.blank();
        w.line(&format!(
            "ErrorCode {name}Proxy::{method_name}Sync({sync_args}, int timeout_msec) {{ return impl_->{method_name}Sync({}); }}",
            sync_call.join(", ")
        ));

        let mut async_args = in_args_signature(&params);
        if !async_args.is_empty() {
            async_args.push_str(", ");
        }
        async_args.push_str(&format!("const {method_name}Callback& callback"));
        let mut async_call = call_args.clone();
        async_call.push("callback".to_string());
        w.blank();
        w.line(&format!(
            "void {name}Proxy::{method_name}Async({async_args}) {{ impl_->{method_name}Async({}); }}",
            async_call.join(", ")
        ));
    }

    for event in &interface.event_list {
        let members = resolve_args("in", &event.members)?;
        let sig = in_args_signature(&members);
        w.blank();
        w.line(&format!(
            "void {name}Proxy::On{}(const {}Callback& callback) {{ impl_->On{}(callback); }}",
            event.event_name, event.event_name, event.event_name
        ));
        w.blank();
        w.line(&format!(
            "void {name}Proxy::Off{}() {{ impl_->Off{}(); }}",
            event.event_name, event.event_name
        ));
        let _ = sig;
    }
    Ok(())
}
