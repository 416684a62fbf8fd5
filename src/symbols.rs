/* Symbol-Table Planner: per-interface ordered name->id assignment (§4.2). */

use crate::ir::InterfaceDecl;

/// The ordered [methods..., events...] name list and its derived ids,
/// shared verbatim by both the service and proxy emitters so their
/// NameIdMapper populations agree.
pub struct SymbolTable {
    pub names: Vec<String>,
}

impl SymbolTable {
    pub fn for_interface(interface: &InterfaceDecl) -> Self {
        let mut names = Vec::with_capacity(interface.method_list.len() + interface.event_list.len());
        names.extend(interface.method_list.iter().map(|m| m.method_name.clone()));
        names.extend(interface.event_list.iter().map(|e| e.event_name.clone()));
        SymbolTable { names }
    }

    pub fn id_of(&self, name: &str) -> Option<u16> {
        self.names.iter().position(|n| n == name).map(|i| i as u16)
    }

    pub fn entries(&self) -> impl Iterator<Item = (u16, &str)> {
        self.names.iter().enumerate().map(|(i, n)| (i as u16, n.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{Event, Method};

    fn interface(methods: &[&str], events: &[&str]) -> InterfaceDecl {
        InterfaceDecl {
            name: "Iface".to_string(),
            method_list: methods
                .iter()
                .map(|n| Method {
                    method_name: n.to_string(),
                    method_parameter: vec![],
                    method_return: vec![],
                })
                .collect(),
            event_list: events
                .iter()
                .map(|n| Event {
                    event_name: n.to_string(),
                    members: vec![],
                })
                .collect(),
        }
    }

    #[test]
    fn methods_then_events_in_order() {
        let interface = interface(&["a", "b"], &["x"]);
        let table = SymbolTable::for_interface(&interface);
        assert_eq!(table.names, vec!["a", "b", "x"]);
        assert_eq!(table.id_of("a"), Some(0));
        assert_eq!(table.id_of("b"), Some(1));
        assert_eq!(table.id_of("x"), Some(2));
    }

    #[test]
    fn service_and_proxy_derive_identical_tables() {
        let interface = interface(&["a", "b"], &["x"]);
        let service_side = SymbolTable::for_interface(&interface);
        let proxy_side = SymbolTable::for_interface(&interface);
        assert_eq!(service_side.names, proxy_side.names);
    }
}
