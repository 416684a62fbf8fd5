/* Type Resolver: IDL TypeRef -> C++ type spelling. */

use crate::error::ResolveError;
use crate::ir::TypeRef;

fn primitive_spelling(idl_spelling: &str) -> Option<&'static str> {
    Some(match idl_spelling {
        "void" => "void",
        "boolean" => "bool",
        "int8" => "int8_t",
        "uint8" => "uint8_t",
        "short" => "int16_t",
        "long" => "int32_t",
        "long long" => "int64_t",
        "unsigned short" => "uint16_t",
        "unsigned long" => "uint32_t",
        "unsigned long long" => "uint64_t",
        "float" => "float",
        "double" => "double",
        "string" => "std::string",
        _ => return None,
    })
}

/// Resolves IDL TypeRefs into target-language type spellings (§4.1).
pub fn resolve(type_ref: &TypeRef) -> Result<String, ResolveError> {
    match type_ref {
        TypeRef::Tokens(tokens) => {
            let idl_spelling = tokens.join(" ");
            if idl_spelling.is_empty() {
                return Ok("void".to_string());
            }
            Ok(primitive_spelling(&idl_spelling)
                .map(str::to_string)
                .unwrap_or(idl_spelling))
        }
        TypeRef::Structured(structured) => {
            let type_name = structured
                .type_name
                .as_ref()
                .ok_or(ResolveError::MissingTypeName)?;
            let inner = resolve(type_name)?;
            Ok(match structured.sequence_size {
                Some(size) if size >= 1 => format!("std::array<{inner}, {size}>"),
                Some(-1) => format!("std::vector<{inner}>"),
                _ => inner,
            })
        }
    }
}

/// True if a resolved spelling is the void sentinel.
pub fn is_void(spelling: &str) -> bool {
    spelling == "void"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::StructuredTypeRef;

    fn tokens(words: &[&str]) -> TypeRef {
        TypeRef::Tokens(words.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn resolves_primitives() {
        assert_eq!(resolve(&tokens(&["boolean"])).unwrap(), "bool");
        assert_eq!(resolve(&tokens(&["unsigned", "long", "long"])).unwrap(), "uint64_t");
        assert_eq!(resolve(&tokens(&["string"])).unwrap(), "std::string");
    }

    #[test]
    fn passes_through_user_defined_names() {
        assert_eq!(resolve(&tokens(&["Color"])).unwrap(), "Color");
    }

    #[test]
    fn empty_tokens_resolve_to_void() {
        assert_eq!(resolve(&tokens(&[])).unwrap(), "void");
    }

    #[test]
    fn fixed_array_and_variable_sequence() {
        let fixed = TypeRef::Structured(Box::new(StructuredTypeRef {
            type_name: Some(tokens(&["uint8"])),
            sequence_size: Some(4),
        }));
        assert_eq!(resolve(&fixed).unwrap(), "std::array<uint8_t, 4>");

        let variable = TypeRef::Structured(Box::new(StructuredTypeRef {
            type_name: Some(tokens(&["uint8"])),
            sequence_size: Some(-1),
        }));
        assert_eq!(resolve(&variable).unwrap(), "std::vector<uint8_t>");

        let scalar = TypeRef::Structured(Box::new(StructuredTypeRef {
            type_name: Some(tokens(&["long"])),
            sequence_size: None,
        }));
        assert_eq!(resolve(&scalar).unwrap(), "int32_t");
    }

    #[test]
    fn missing_type_name_is_fatal() {
        let malformed = TypeRef::Structured(Box::new(StructuredTypeRef {
            type_name: None,
            sequence_size: Some(4),
        }));
        assert!(matches!(resolve(&malformed), Err(ResolveError::MissingTypeName)));
    }
}
