/* In-memory IR document model and loader.
 *
 * Field names are fixed by the upstream IDL-to-IR frontend and must match
 * exactly; see jsonIr_parser's key constants in the frontend this crate
 * consumes output from.
 */

use std::path::Path;

use serde::Deserialize;

use crate::error::IrError;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TypeRef {
    Tokens(Vec<String>),
    Structured(Box<StructuredTypeRef>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructuredTypeRef {
    #[serde(default)]
    pub type_name: Option<TypeRef>,
    #[serde(default)]
    pub sequence_size: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Member {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnionMember {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: TypeRef,
    pub case_value: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumMember {
    pub name: String,
    pub value: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnumDecl {
    pub name: String,
    pub members: Vec<EnumMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StructDecl {
    pub name: String,
    pub members: Vec<Member>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnionDecl {
    pub name: String,
    pub members: Vec<UnionMember>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Arg {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub ty: TypeRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Method {
    pub method_name: String,
    #[serde(default)]
    pub method_parameter: Vec<Arg>,
    #[serde(default)]
    pub method_return: Vec<Arg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Event {
    pub event_name: String,
    #[serde(default)]
    pub members: Vec<Arg>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InterfaceDecl {
    pub name: String,
    #[serde(default)]
    pub method_list: Vec<Method>,
    #[serde(default)]
    pub event_list: Vec<Event>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclCategory {
    Enum,
    Struct,
    Union,
    Interface,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DeclarationOrderItem {
    pub category: DeclCategory,
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default, rename = "module_name")]
    pub module: Vec<String>,
    #[serde(default, rename = "enum_declarations")]
    pub enums: Vec<EnumDecl>,
    #[serde(default, rename = "struct_declarations")]
    pub structs: Vec<StructDecl>,
    #[serde(default, rename = "union_declarations")]
    pub unions: Vec<UnionDecl>,
    #[serde(default, rename = "interface_declarations")]
    pub interfaces: Vec<InterfaceDecl>,
    #[serde(default, rename = "declarations_order")]
    pub declarations_order: Vec<DeclarationOrderItem>,
}

impl Document {
    pub fn find_enum(&self, name: &str) -> Option<&EnumDecl> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn find_struct(&self, name: &str) -> Option<&StructDecl> {
        self.structs.iter().find(|s| s.name == name)
    }

    pub fn find_union(&self, name: &str) -> Option<&UnionDecl> {
        self.unions.iter().find(|u| u.name == name)
    }

    pub fn find_interface(&self, name: &str) -> Option<&InterfaceDecl> {
        self.interfaces.iter().find(|i| i.name == name)
    }

    /// Full dotted module namespace, e.g. "thru.rpc.demo".
    pub fn module_dotted(&self) -> String {
        self.module.join(".")
    }

    /// Check that every name referenced from declarations_order resolves
    /// in its matching collection. A re-implementation decision: this is
    /// fatal here, where the upstream generator silently skips misses.
    pub fn validate(&self) -> Result<(), IrError> {
        for item in &self.declarations_order {
            let found = match item.category {
                DeclCategory::Enum => self.find_enum(&item.name).is_some(),
                DeclCategory::Struct => self.find_struct(&item.name).is_some(),
                DeclCategory::Union => self.find_union(&item.name).is_some(),
                DeclCategory::Interface => self.find_interface(&item.name).is_some(),
            };

            if !found {
                return Err(IrError::UnresolvedDeclarationOrderRef {
                    category: format!("{:?}", item.category).to_lowercase(),
                    name: item.name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// Load and structurally validate an IR document from a path.
pub fn load_document(path: &Path) -> Result<Document, IrError> {
    let text = std::fs::read_to_string(path)?;
    let document: Document = serde_json::from_str(&text)?;
    document.validate()?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let json = r#"{
            "module_name": ["thru", "demo"],
            "enum_declarations": [
                {"name": "Color", "members": [
                    {"name": "RED", "value": 1},
                    {"name": "GREEN"},
                    {"name": "BLUE", "value": 5}
                ]}
            ],
            "declarations_order": [
                {"category": "enum", "name": "Color"}
            ]
        }"#;

        let document: Document = serde_json::from_str(json).unwrap();
        document.validate().unwrap();
        assert_eq!(document.module_dotted(), "thru.demo");
        assert_eq!(document.enums[0].members.len(), 3);
    }

    #[test]
    fn rejects_unresolved_declaration_order_reference() {
        let json = r#"{
            "declarations_order": [
                {"category": "struct", "name": "Missing"}
            ]
        }"#;

        let document: Document = serde_json::from_str(json).unwrap();
        let err = document.validate().unwrap_err();
        matches!(err, IrError::UnresolvedDeclarationOrderRef { .. });
    }

    #[test]
    fn parses_token_and_structured_type_refs() {
        let json = r#"{"name": "a", "type": ["unsigned", "long"]}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        match member.ty {
            TypeRef::Tokens(tokens) => assert_eq!(tokens, vec!["unsigned", "long"]),
            _ => panic!("expected token type ref"),
        }

        let json = r#"{"name": "b", "type": {"type_name": ["uint8"], "sequence_size": -1}}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        match member.ty {
            TypeRef::Structured(inner) => assert_eq!(inner.sequence_size, Some(-1)),
            _ => panic!("expected structured type ref"),
        }
    }
}
