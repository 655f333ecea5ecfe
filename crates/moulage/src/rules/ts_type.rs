//! TypeScript type to Vue runtime prop type.

use oxc_ast::ast::TSType;

use crate::ast_utils::ERASED;

/// Runtime prop type expression for `ty`.
///
/// Unions become an array of their mapped members. Types without a runtime
/// counterpart are erased.
pub(crate) fn runtime_prop_type(ty: &TSType<'_>) -> String {
    let token = match ty {
        TSType::TSNumberKeyword(_) => "Number",
        TSType::TSBooleanKeyword(_) => "Boolean",
        TSType::TSStringKeyword(_) => "String",
        TSType::TSFunctionType(_) => "Function",
        TSType::TSObjectKeyword(_) | TSType::TSTypeLiteral(_) => "Object",
        TSType::TSSymbolKeyword(_) => "Symbol",
        TSType::TSTupleType(_) | TSType::TSArrayType(_) => "Array",
        TSType::TSNullKeyword(_) => "null",
        TSType::TSParenthesizedType(paren) => return runtime_prop_type(&paren.type_annotation),
        TSType::TSUnionType(union) => {
            let members: Vec<String> = union.types.iter().map(runtime_prop_type).collect();
            return format!("[{}]", members.join(", "));
        }
        _ => ERASED,
    };
    token.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxc_allocator::Allocator;
    use oxc_ast::ast::Statement;
    use oxc_parser::Parser;
    use oxc_span::SourceType;

    fn map(annotation: &str) -> String {
        let allocator = Allocator::default();
        let source = format!("type T = {annotation};");
        let ret = Parser::new(&allocator, &source, SourceType::ts()).parse();
        assert!(ret.errors.is_empty(), "{:?}", ret.errors);
        match ret.program.body.first() {
            Some(Statement::TSTypeAliasDeclaration(decl)) => runtime_prop_type(&decl.type_annotation),
            _ => panic!("expected a type alias"),
        }
    }

    #[test]
    fn test_keywords() {
        assert_eq!(map("number"), "Number");
        assert_eq!(map("boolean"), "Boolean");
        assert_eq!(map("string"), "String");
        assert_eq!(map("symbol"), "Symbol");
        assert_eq!(map("object"), "Object");
        assert_eq!(map("null"), "null");
    }

    #[test]
    fn test_structural_types() {
        assert_eq!(map("() => void"), "Function");
        assert_eq!(map("{ a: number }"), "Object");
        assert_eq!(map("string[]"), "Array");
        assert_eq!(map("[number, string]"), "Array");
    }

    #[test]
    fn test_unions() {
        assert_eq!(map("number | string"), "[Number, String]");
        assert_eq!(map("(number | null)"), "[Number, null]");
        assert_eq!(map("string | (() => void)"), "[String, Function]");
    }

    #[test]
    fn test_unmapped_types_are_erased() {
        assert_eq!(map("any"), "void 0");
        assert_eq!(map("Foo<string>"), "void 0");
        assert_eq!(map("'a'"), "void 0");
    }
}
