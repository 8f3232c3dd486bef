//! Lowering of syntactic types into the resolved [`TypeExpr`] model.
//!
//! Lowering resolves package aliases through the declaring file's [`ImportTable`]. When a foreign interface is
//! expanded into another package's method set, its unqualified names are rewritten into qualified references to
//! the foreign package so they keep pointing at the right declarations.

use std::collections::HashSet;

use syncmock_core::lang::types;
use syncmock_syntax::ast::{self, ChanDir, InterfaceElem, ParamField, Type};

use super::imports::ImportTable;
use super::model::{
    ChanDirection, InterfaceElemExpr, PackageRef, StructFieldExpr, TypeExpr, TypeParamField, UnionTerm,
};

/// Context for lowering types of one source file.
#[derive(Debug, Clone)]
pub struct LowerContext<'a> {
    imports: &'a ImportTable,
    /// Package to qualify unqualified declared names with (set while expanding foreign embeddings)
    foreign: Option<&'a PackageRef>,
    /// Type parameters in scope; never qualified
    type_params: HashSet<String>,
}

impl<'a> LowerContext<'a> {
    pub fn new(imports: &'a ImportTable) -> Self {
        Self {
            imports,
            foreign: None,
            type_params: HashSet::new(),
        }
    }

    /// Rewrite unqualified declared names as references into `package`.
    pub fn qualifying(mut self, package: &'a PackageRef) -> Self {
        self.foreign = Some(package);
        self
    }

    pub fn with_type_params<'n>(mut self, names: impl IntoIterator<Item = &'n str>) -> Self {
        self.type_params.extend(names.into_iter().map(str::to_string));
        self
    }

    pub fn imports(&self) -> &'a ImportTable {
        self.imports
    }

    /// Lower one syntactic type.
    pub fn lower(&self, ty: &Type) -> TypeExpr {
        match ty {
            Type::Name(name) => self.lower_name(name),
            Type::Qualified { package, name } => {
                let path = match self.imports.path_for(package) {
                    Some(path) => path.to_string(),
                    None => {
                        tracing::debug!(alias = %package, "qualifier not found in import table; using it as path");
                        package.clone()
                    }
                };
                TypeExpr::Qualified {
                    alias: package.clone(),
                    path,
                    name: name.clone(),
                }
            }
            Type::Generic { base, args } => TypeExpr::Generic {
                base: Box::new(self.lower(&base.node)),
                args: args.iter().map(|a| self.lower(&a.node)).collect(),
            },
            Type::Pointer(elem) => TypeExpr::Pointer {
                elem: Box::new(self.lower(&elem.node)),
            },
            Type::Slice(elem) => TypeExpr::slice(self.lower(&elem.node)),
            Type::Array { len, elem } => TypeExpr::Array {
                len: len.clone(),
                elem: Box::new(self.lower(&elem.node)),
            },
            Type::Map { key, value } => TypeExpr::Map {
                key: Box::new(self.lower(&key.node)),
                value: Box::new(self.lower(&value.node)),
            },
            Type::Chan { dir, elem } => TypeExpr::Chan {
                dir: match dir {
                    ChanDir::Both => ChanDirection::Both,
                    ChanDir::Send => ChanDirection::Send,
                    ChanDir::Recv => ChanDirection::Recv,
                },
                elem: Box::new(self.lower(&elem.node)),
            },
            Type::Func(sig) => self.lower_func(sig),
            Type::Struct(fields) => TypeExpr::Struct {
                fields: fields
                    .iter()
                    .map(|f| StructFieldExpr {
                        names: f.names.clone(),
                        ty: self.lower(&f.ty.node),
                        tag: f.tag.clone(),
                    })
                    .collect(),
            },
            Type::Interface(elems) => TypeExpr::Interface {
                elems: elems
                    .iter()
                    .map(|e| match e {
                        InterfaceElem::Method { name, signature } => InterfaceElemExpr::Method {
                            name: name.node.clone(),
                            params: self.lower_fields(&signature.params),
                            results: self.lower_fields(&signature.results),
                        },
                        InterfaceElem::Embedded(ty) => InterfaceElemExpr::Embedded {
                            ty: self.lower(&ty.node),
                        },
                    })
                    .collect(),
            },
            Type::Union(terms) => TypeExpr::Union {
                terms: terms
                    .iter()
                    .map(|t| UnionTerm {
                        tilde: t.tilde,
                        ty: self.lower(&t.ty.node),
                    })
                    .collect(),
            },
        }
    }

    fn lower_name(&self, name: &str) -> TypeExpr {
        match self.foreign {
            Some(package) if !self.type_params.contains(name) && !types::is_predeclared(name) => {
                TypeExpr::Qualified {
                    alias: package.name.clone(),
                    path: package.path.clone(),
                    name: name.to_string(),
                }
            }
            _ => TypeExpr::ident(name),
        }
    }

    fn lower_func(&self, sig: &ast::Signature) -> TypeExpr {
        TypeExpr::Func {
            params: self.lower_fields(&sig.params),
            results: self.lower_fields(&sig.results),
        }
    }

    fn lower_fields(&self, fields: &[ParamField]) -> Vec<TypeParamField> {
        fields
            .iter()
            .map(|f| TypeParamField {
                names: f.names.clone(),
                ty: self.lower(&f.ty.node),
                variadic: f.variadic,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syncmock_syntax::ast::ImportSpec;
    use syncmock_syntax::parser;

    fn parse_type(source: &str) -> Type {
        let file = parser::parse_source(&format!("package p\ntype T {source}\n")).unwrap();
        match &file.declarations[0].node {
            ast::Declaration::Type(spec) => spec.ty.node.clone(),
            other => panic!("Expected type, got {other:?}"),
        }
    }

    fn table() -> ImportTable {
        ImportTable::from_specs(&[ImportSpec {
            alias: Some("str".to_string()),
            path: "strings".to_string(),
        }])
    }

    #[test]
    fn test_qualified_names_resolve_through_imports() {
        let imports = table();
        let ctx = LowerContext::new(&imports);
        assert_eq!(
            ctx.lower(&parse_type("*str.Builder")),
            TypeExpr::Pointer {
                elem: Box::new(TypeExpr::Qualified {
                    alias: "str".to_string(),
                    path: "strings".to_string(),
                    name: "Builder".to_string(),
                })
            }
        );
    }

    #[test]
    fn test_foreign_context_qualifies_declared_names() {
        let imports = ImportTable::default();
        let package = PackageRef {
            path: "example.com/dep".to_string(),
            name: "dep".to_string(),
        };
        let ctx = LowerContext::new(&imports)
            .qualifying(&package)
            .with_type_params(["T"]);
        let lowered = ctx.lower(&parse_type("map[string][]Row"));
        assert_eq!(lowered.to_string(), "map[string][]dep.Row");
        assert_eq!(ctx.lower(&parse_type("[]T")).to_string(), "[]T");
    }

    #[test]
    fn test_local_context_keeps_idents() {
        let imports = ImportTable::default();
        let ctx = LowerContext::new(&imports);
        assert_eq!(ctx.lower(&parse_type("chan<- Event")).to_string(), "chan<- Event");
    }
}
