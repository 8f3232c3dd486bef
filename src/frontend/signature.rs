//! Signature normalization.
//!
//! Parameter and result lists arrive as written (`a, b int`, `string`, `_ error`, `ids ...int`). Normalization
//! flattens them into one [`FieldInfo`] per value with a stable name, so nothing downstream has to distinguish named
//! from unnamed fields again.

use std::collections::HashSet;

use syncmock_core::lang::conventions::{self, BLANK_IDENT};
use syncmock_core::lang::types;
use syncmock_syntax::ast::{ParamField, Signature, TypeParamDecl};

use super::lower::LowerContext;
use super::model::{FieldInfo, MethodSignature, TypeExpr, TypeParam};

/// Positional names for unnamed fields; later positions fall back to `A{index}`.
const POSITIONAL_NAMES: [&str; 8] = ["A", "B", "C", "D", "E", "F", "G", "H"];

/// Name for the unnamed field at `index` of a list with `total` fields.
///
/// A lone string field is `S`, a lone integer field is `I`; everything else is named by position.
///
/// ## Examples
/// ```rust
/// use syncmock::frontend::model::TypeExpr;
/// use syncmock::frontend::signature::generated_name;
///
/// assert_eq!(generated_name(0, &TypeExpr::ident("string"), 1), "S");
/// assert_eq!(generated_name(0, &TypeExpr::ident("int64"), 1), "I");
/// assert_eq!(generated_name(1, &TypeExpr::ident("int"), 3), "B");
/// assert_eq!(generated_name(9, &TypeExpr::ident("int"), 10), "A9");
/// ```
pub fn generated_name(index: usize, ty: &TypeExpr, total: usize) -> String {
    if total == 1 {
        if let TypeExpr::Ident { name } = ty {
            if types::is_string(name) {
                return "S".to_string();
            }
            if types::is_integer(name) {
                return "I".to_string();
            }
        }
    }
    match POSITIONAL_NAMES.get(index) {
        Some(name) => (*name).to_string(),
        None => format!("A{index}"),
    }
}

/// Lower a type parameter list, one [`TypeParam`] per declared name.
pub fn lower_type_params(decls: &[TypeParamDecl], ctx: &LowerContext<'_>) -> Vec<TypeParam> {
    decls
        .iter()
        .flat_map(|decl| {
            let constraint = ctx.lower(&decl.constraint.node);
            decl.names.iter().map(move |name| TypeParam {
                name: name.clone(),
                constraint: constraint.clone(),
            })
        })
        .collect()
}

/// Normalize one signature.
///
/// `type_params` are the declaration's own type parameters (recorded on the result); `scope` lists every type
/// parameter name visible to the signature, which generated names must avoid.
pub fn normalize_signature(
    name: &str,
    signature: &Signature,
    type_params: Vec<TypeParam>,
    scope: &[TypeParam],
    ctx: &LowerContext<'_>,
) -> MethodSignature {
    let params = normalize_fields(&signature.params, &reserved_names(&signature.params, scope), ctx);
    let results = normalize_fields(&signature.results, &reserved_names(&signature.results, scope), ctx);
    let variadic = params.last().is_some_and(|p| p.variadic);

    MethodSignature {
        name: name.to_string(),
        params,
        results,
        type_params,
        variadic,
    }
}

/// Names a generated name in `fields` must avoid: type parameters in scope, plus the list's own explicit names in
/// both spellings (record fields are capitalized).
fn reserved_names(fields: &[ParamField], scope: &[TypeParam]) -> HashSet<String> {
    let mut reserved: HashSet<String> = scope.iter().map(|p| p.name.clone()).collect();
    for field in fields {
        for explicit in field.names.iter().filter(|n| n.as_str() != BLANK_IDENT) {
            reserved.insert(explicit.clone());
            reserved.insert(conventions::capitalize(explicit));
        }
    }
    reserved
}

/// Flatten one parameter or result list.
fn normalize_fields(fields: &[ParamField], reserved: &HashSet<String>, ctx: &LowerContext<'_>) -> Vec<FieldInfo> {
    let total: usize = fields.iter().map(|f| f.names.len().max(1)).sum();
    let mut used: HashSet<String> = HashSet::new();
    let mut out = Vec::with_capacity(total);

    for field in fields {
        let lowered = ctx.lower(&field.ty.node);
        let ty = if field.variadic {
            TypeExpr::slice(lowered)
        } else {
            lowered
        };

        let names: Vec<Option<&str>> = if field.names.is_empty() {
            vec![None]
        } else {
            field
                .names
                .iter()
                .map(|n| (n.as_str() != BLANK_IDENT).then_some(n.as_str()))
                .collect()
        };

        for written in names {
            let index = out.len();
            let (name, explicit) = match written {
                Some(name) => (name.to_string(), true),
                None => (
                    unique_name(generated_name(index, &ty, total), reserved, &used),
                    false,
                ),
            };
            used.insert(name.clone());
            out.push(FieldInfo {
                name,
                ty: ty.clone(),
                index,
                variadic: field.variadic,
                explicit,
            });
        }
    }
    out
}

/// `base`, or `base` with the smallest numeric suffix that collides with nothing.
fn unique_name(base: String, reserved: &HashSet<String>, used: &HashSet<String>) -> String {
    let taken = |candidate: &str| reserved.contains(candidate) || used.contains(candidate);
    if !taken(&base) {
        return base;
    }
    let mut n = 1;
    loop {
        let candidate = format!("{base}{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::imports::ImportTable;
    use syncmock_syntax::ast::Declaration;
    use syncmock_syntax::parser;

    fn normalize(source: &str) -> MethodSignature {
        let file = parser::parse_source(&format!("package p\n{source}\n")).unwrap();
        let Declaration::Func(func) = &file.declarations[0].node else {
            panic!("Expected a function declaration");
        };
        let imports = ImportTable::default();
        let names: Vec<&str> = func
            .type_params
            .iter()
            .flat_map(|d| d.names.iter().map(String::as_str))
            .collect();
        let ctx = LowerContext::new(&imports).with_type_params(names);
        let type_params = lower_type_params(&func.type_params, &ctx);
        let scope = type_params.clone();
        normalize_signature(&func.name.node, &func.signature, type_params, &scope, &ctx)
    }

    fn names(fields: &[FieldInfo]) -> Vec<&str> {
        fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn test_grouped_names_expand() {
        let sig = normalize("func Do(a, b int, c string) (n int, err error)");
        assert_eq!(names(&sig.params), vec!["a", "b", "c"]);
        assert_eq!(sig.params[1].index, 1);
        assert_eq!(sig.params[1].ty, TypeExpr::ident("int"));
        assert_eq!(names(&sig.results), vec!["n", "err"]);
        assert!(sig.params.iter().all(|p| p.explicit));
    }

    #[test]
    fn test_single_unnamed_string_and_integer() {
        assert_eq!(names(&normalize("func F(string)").params), vec!["S"]);
        assert_eq!(names(&normalize("func F(uint8)").params), vec!["I"]);
        assert_eq!(names(&normalize("func F() int").results), vec!["I"]);
        assert_eq!(names(&normalize("func F(float64)").params), vec!["A"]);
    }

    #[test]
    fn test_positional_names_and_fallback() {
        let sig = normalize("func F(int, int, int, int, int, int, int, int, int, int) (string, error)");
        assert_eq!(
            names(&sig.params),
            vec!["A", "B", "C", "D", "E", "F", "G", "H", "A8", "A9"]
        );
        assert_eq!(names(&sig.results), vec!["A", "B"]);
    }

    #[test]
    fn test_blank_counts_as_unnamed() {
        let sig = normalize("func F(_ string)");
        assert_eq!(names(&sig.params), vec!["S"]);
        assert!(!sig.params[0].explicit);
    }

    #[test]
    fn test_generated_name_avoids_explicit_and_type_params() {
        let sig = normalize("func F(b int, _ string)");
        assert_eq!(names(&sig.params), vec!["b", "B1"]);

        let sig = normalize("func F[A any](A, int)");
        assert_eq!(names(&sig.params), vec!["A1", "B"]);
    }

    #[test]
    fn test_results_ignore_parameter_names() {
        let sig = normalize("func Do(a int, b string) (int, error)");
        assert_eq!(names(&sig.results), vec!["A", "B"]);

        let sig = normalize("func Get(s string) (n int, _ error)");
        assert_eq!(names(&sig.results), vec!["n", "B"]);
    }

    #[test]
    fn test_variadic_tail_stored_as_slice() {
        let sig = normalize("func Notify(message string, ids ...int)");
        assert!(sig.variadic);
        let tail = sig.variadic_param().unwrap();
        assert_eq!(tail.name, "ids");
        assert_eq!(tail.ty, TypeExpr::slice(TypeExpr::ident("int")));
        assert_eq!(tail.element_type(), &TypeExpr::ident("int"));
        assert!(!sig.params[0].variadic);
    }

    #[test]
    fn test_type_params_are_recorded() {
        let sig = normalize("func Map[K comparable, V any](m map[K]V) []V");
        let params: Vec<&str> = sig.type_params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(params, vec!["K", "V"]);
        assert_eq!(sig.type_params[0].constraint, TypeExpr::ident("comparable"));
        assert_eq!(names(&sig.results), vec!["A"]);
    }
}
