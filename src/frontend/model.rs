//! Resolved, syntax-independent model of a mockable symbol.
//!
//! The resolver lowers parsed declarations into these types; every later stage (validation, qualification,
//! rendering) reads only this model. Everything here is plain data and serializes to JSON for `--dump-model`.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::imports::ImportTable;

/// A package as seen by the generator: its import path and its package-clause name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct PackageRef {
    pub path: String,
    pub name: String,
}

/// Channel direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChanDirection {
    Both,
    Send,
    Recv,
}

/// Recursive type expression.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TypeExpr {
    /// Unqualified name: a predeclared type, a type parameter, or a type of the declaring package.
    Ident { name: String },
    /// `alias.Name`; `path` is the resolved import path behind `alias`.
    Qualified { alias: String, path: String, name: String },
    Pointer { elem: Box<TypeExpr> },
    Slice { elem: Box<TypeExpr> },
    Array { len: String, elem: Box<TypeExpr> },
    Map { key: Box<TypeExpr>, value: Box<TypeExpr> },
    Chan { dir: ChanDirection, elem: Box<TypeExpr> },
    Func { params: Vec<TypeParamField>, results: Vec<TypeParamField> },
    Generic { base: Box<TypeExpr>, args: Vec<TypeExpr> },
    Struct { fields: Vec<StructFieldExpr> },
    Interface { elems: Vec<InterfaceElemExpr> },
    Union { terms: Vec<UnionTerm> },
}

/// One entry of a nested function type's parameter or result list, kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeParamField {
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub variadic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StructFieldExpr {
    /// Empty for embedded fields
    pub names: Vec<String>,
    pub ty: TypeExpr,
    pub tag: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "elem", rename_all = "snake_case")]
pub enum InterfaceElemExpr {
    Method {
        name: String,
        params: Vec<TypeParamField>,
        results: Vec<TypeParamField>,
    },
    Embedded { ty: TypeExpr },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct UnionTerm {
    pub tilde: bool,
    pub ty: TypeExpr,
}

impl TypeExpr {
    pub fn ident(name: impl Into<String>) -> Self {
        TypeExpr::Ident { name: name.into() }
    }

    pub fn slice(elem: TypeExpr) -> Self {
        TypeExpr::Slice { elem: Box::new(elem) }
    }

    /// Visit this node and every nested type node, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a TypeExpr)) {
        visit(self);
        match self {
            TypeExpr::Ident { .. } | TypeExpr::Qualified { .. } => {}
            TypeExpr::Pointer { elem }
            | TypeExpr::Slice { elem }
            | TypeExpr::Array { elem, .. }
            | TypeExpr::Chan { elem, .. } => elem.walk(visit),
            TypeExpr::Map { key, value } => {
                key.walk(visit);
                value.walk(visit);
            }
            TypeExpr::Func { params, results } => {
                for field in params.iter().chain(results) {
                    field.ty.walk(visit);
                }
            }
            TypeExpr::Generic { base, args } => {
                base.walk(visit);
                for arg in args {
                    arg.walk(visit);
                }
            }
            TypeExpr::Struct { fields } => {
                for field in fields {
                    field.ty.walk(visit);
                }
            }
            TypeExpr::Interface { elems } => {
                for elem in elems {
                    match elem {
                        InterfaceElemExpr::Method { params, results, .. } => {
                            for field in params.iter().chain(results) {
                                field.ty.walk(visit);
                            }
                        }
                        InterfaceElemExpr::Embedded { ty } => ty.walk(visit),
                    }
                }
            }
            TypeExpr::Union { terms } => {
                for term in terms {
                    term.ty.walk(visit);
                }
            }
        }
    }

    /// Like [`TypeExpr::walk`], with mutable access to every node.
    pub fn walk_mut(&mut self, visit: &mut dyn FnMut(&mut TypeExpr)) {
        visit(self);
        match self {
            TypeExpr::Ident { .. } | TypeExpr::Qualified { .. } => {}
            TypeExpr::Pointer { elem }
            | TypeExpr::Slice { elem }
            | TypeExpr::Array { elem, .. }
            | TypeExpr::Chan { elem, .. } => elem.walk_mut(visit),
            TypeExpr::Map { key, value } => {
                key.walk_mut(visit);
                value.walk_mut(visit);
            }
            TypeExpr::Func { params, results } => {
                for field in params.iter_mut().chain(results.iter_mut()) {
                    field.ty.walk_mut(visit);
                }
            }
            TypeExpr::Generic { base, args } => {
                base.walk_mut(visit);
                for arg in args {
                    arg.walk_mut(visit);
                }
            }
            TypeExpr::Struct { fields } => {
                for field in fields {
                    field.ty.walk_mut(visit);
                }
            }
            TypeExpr::Interface { elems } => {
                for elem in elems {
                    match elem {
                        InterfaceElemExpr::Method { params, results, .. } => {
                            for field in params.iter_mut().chain(results.iter_mut()) {
                                field.ty.walk_mut(visit);
                            }
                        }
                        InterfaceElemExpr::Embedded { ty } => ty.walk_mut(visit),
                    }
                }
            }
            TypeExpr::Union { terms } => {
                for term in terms {
                    term.ty.walk_mut(visit);
                }
            }
        }
    }

    /// Rename unqualified identifiers according to `renames`; every node is rewritten at most once.
    pub fn rename_idents(&mut self, renames: &HashMap<String, String>) {
        self.walk_mut(&mut |t: &mut TypeExpr| {
            if let TypeExpr::Ident { name } = t {
                if let Some(new_name) = renames.get(name.as_str()) {
                    *name = new_name.clone();
                }
            }
        });
    }
}

/// Source-like rendering with qualifiers exactly as written; used in messages and logs.
impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = crate::backend::qualify::render_type(self, &mut |ty: &TypeExpr| match ty {
            TypeExpr::Ident { name } => name.clone(),
            TypeExpr::Qualified { alias, name, .. } => format!("{alias}.{name}"),
            _ => String::new(),
        });
        f.write_str(&text)
    }
}

/// One normalized parameter or result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldInfo {
    /// Explicit name, or the generated one for unnamed and blank (`_`) entries
    pub name: String,
    /// For the variadic tail this is the slice type (`...T` is stored as `[]T`)
    pub ty: TypeExpr,
    /// Position within its list
    pub index: usize,
    pub variadic: bool,
    /// `false` when `name` was generated
    pub explicit: bool,
}

impl FieldInfo {
    /// Element type of a variadic tail, or the field type itself.
    pub fn element_type(&self) -> &TypeExpr {
        match (&self.ty, self.variadic) {
            (TypeExpr::Slice { elem }, true) => elem,
            _ => &self.ty,
        }
    }
}

/// A generic type parameter with its constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeParam {
    pub name: String,
    pub constraint: TypeExpr,
}

/// A normalized method or function signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodSignature {
    pub name: String,
    pub params: Vec<FieldInfo>,
    pub results: Vec<FieldInfo>,
    /// Function type parameters (including receiver type parameters); always empty for interface methods
    pub type_params: Vec<TypeParam>,
    /// The last parameter is a variadic tail
    pub variadic: bool,
}

impl MethodSignature {
    /// The variadic tail, if any.
    pub fn variadic_param(&self) -> Option<&FieldInfo> {
        self.params.last().filter(|p| p.variadic)
    }

    /// Every type node in parameters and results, in order.
    pub fn types(&self) -> impl Iterator<Item = &TypeExpr> {
        self.params.iter().chain(&self.results).map(|f| &f.ty)
    }
}

/// Resolved declaration of the target symbol.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SymbolDetails {
    Interface {
        name: String,
        /// Declaration order, embedded members expanded in place
        methods: Vec<MethodSignature>,
        type_params: Vec<TypeParam>,
        imports: ImportTable,
    },
    Function {
        signature: MethodSignature,
        /// Receiver type for methods (`*Store`), `None` for plain functions
        receiver: Option<TypeExpr>,
        imports: ImportTable,
    },
}

impl SymbolDetails {
    /// Symbol name (interface name, or function/method name).
    pub fn name(&self) -> &str {
        match self {
            SymbolDetails::Interface { name, .. } => name,
            SymbolDetails::Function { signature, .. } => &signature.name,
        }
    }

    /// Methods the mock implements: the interface's method set, or the function itself.
    pub fn methods(&self) -> &[MethodSignature] {
        match self {
            SymbolDetails::Interface { methods, .. } => methods,
            SymbolDetails::Function { signature, .. } => std::slice::from_ref(signature),
        }
    }

    /// Type parameters threaded onto every generated type.
    pub fn type_params(&self) -> &[TypeParam] {
        match self {
            SymbolDetails::Interface { type_params, .. } => type_params,
            SymbolDetails::Function { signature, .. } => &signature.type_params,
        }
    }

    pub fn imports(&self) -> &ImportTable {
        match self {
            SymbolDetails::Interface { imports, .. } | SymbolDetails::Function { imports, .. } => imports,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, SymbolDetails::Function { .. })
    }
}

/// The package the generated file belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPackage {
    pub name: String,
    /// Import path of the output package, when it is a real importable package (not an external `_test` package)
    pub path: Option<String>,
}

/// Resolver output: the symbol plus everything needed to place it in the output package.
#[derive(Debug, Clone, Serialize)]
pub struct ResolvedSymbol {
    pub details: SymbolDetails,
    /// Package that declares the symbol
    pub declaring: PackageRef,
    pub output: OutputPackage,
    /// The mock is generated into the declaring package itself
    pub same_package: bool,
}
