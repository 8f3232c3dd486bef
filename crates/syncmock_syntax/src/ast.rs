//! Abstract Syntax Tree definitions for Go declarations
//!
//! Only the declaration layer of Go is modelled: what a package exports as types and function signatures. Bodies
//! and value declarations are skipped by the parser and never appear here.

use std::fmt;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// A parsed `.go` file
#[derive(Debug, Clone, PartialEq)]
pub struct SourceFile {
    pub package: Spanned<Ident>,
    pub imports: Vec<Spanned<ImportSpec>>,
    pub declarations: Vec<Spanned<Declaration>>,
}

/// One import spec: `import alias "path"`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportSpec {
    /// Explicit name (`_`, `.`, or an identifier), if any
    pub alias: Option<Ident>,
    pub path: String,
}

/// Top-level declarations that matter for mock generation
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Type(TypeSpec),
    Func(FuncDecl),
}

impl Declaration {
    /// Declared name (type name or function name).
    pub fn name(&self) -> &str {
        match self {
            Declaration::Type(t) => &t.name.node,
            Declaration::Func(f) => &f.name.node,
        }
    }
}

// ============================================================================
// Type and function declarations
// ============================================================================

/// `type Name[P C] Type` or `type Name = Type`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeSpec {
    pub name: Spanned<Ident>,
    pub type_params: Vec<TypeParamDecl>,
    pub is_alias: bool,
    pub ty: Spanned<Type>,
}

/// One group of a type parameter list: `K, V comparable`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeParamDecl {
    pub names: Vec<Ident>,
    pub constraint: Spanned<Type>,
}

/// `func (r Recv) Name[T any](params) results { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub receiver: Option<Receiver>,
    pub name: Spanned<Ident>,
    pub type_params: Vec<TypeParamDecl>,
    pub signature: Signature,
    pub has_body: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Receiver {
    pub name: Option<Ident>,
    pub ty: Spanned<Type>,
}

/// Parameter and result lists of a function, method or function type
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub params: Vec<ParamField>,
    pub results: Vec<ParamField>,
}

/// One entry of a parameter list, as written: `a, b int`, `string`, or `args ...any`
#[derive(Debug, Clone, PartialEq)]
pub struct ParamField {
    /// Empty for unnamed parameters
    pub names: Vec<Ident>,
    /// Element type for variadic fields (the `...` is recorded in `variadic`)
    pub ty: Spanned<Type>,
    pub variadic: bool,
}

// ============================================================================
// Types
// ============================================================================

/// Channel direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChanDir {
    /// `chan T`
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// Syntactic type expression
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// `T`
    Name(Ident),
    /// `pkg.T`
    Qualified { package: Ident, name: Ident },
    /// `Base[A, B]`
    Generic {
        base: Box<Spanned<Type>>,
        args: Vec<Spanned<Type>>,
    },
    /// `*T`
    Pointer(Box<Spanned<Type>>),
    /// `[]T`
    Slice(Box<Spanned<Type>>),
    /// `[N]T`; the length is kept as source text
    Array { len: String, elem: Box<Spanned<Type>> },
    /// `map[K]V`
    Map {
        key: Box<Spanned<Type>>,
        value: Box<Spanned<Type>>,
    },
    /// `chan T`, `chan<- T`, `<-chan T`
    Chan { dir: ChanDir, elem: Box<Spanned<Type>> },
    /// `func(params) results`
    Func(Signature),
    /// `struct { ... }`
    Struct(Vec<StructField>),
    /// `interface { ... }`
    Interface(Vec<InterfaceElem>),
    /// `~int | string` (constraint position only)
    Union(Vec<TypeTerm>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Empty for embedded fields
    pub names: Vec<Ident>,
    pub ty: Spanned<Type>,
    pub tag: Option<String>,
}

impl StructField {
    pub fn is_embedded(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum InterfaceElem {
    Method { name: Spanned<Ident>, signature: Signature },
    Embedded(Spanned<Type>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeTerm {
    pub tilde: bool,
    pub ty: Spanned<Type>,
}

// ============================================================================
// Display: source-like rendering used by diagnostics
// ============================================================================

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Name(name) => write!(f, "{name}"),
            Type::Qualified { package, name } => write!(f, "{package}.{name}"),
            Type::Generic { base, args } => {
                write!(f, "{}[", base.node)?;
                write_joined(f, args.iter().map(|a| &a.node), ", ")?;
                write!(f, "]")
            }
            Type::Pointer(elem) => write!(f, "*{}", elem.node),
            Type::Slice(elem) => write!(f, "[]{}", elem.node),
            Type::Array { len, elem } => write!(f, "[{len}]{}", elem.node),
            Type::Map { key, value } => write!(f, "map[{}]{}", key.node, value.node),
            Type::Chan { dir, elem } => match dir {
                ChanDir::Both => write!(f, "chan {}", elem.node),
                ChanDir::Send => write!(f, "chan<- {}", elem.node),
                ChanDir::Recv => write!(f, "<-chan {}", elem.node),
            },
            Type::Func(sig) => write!(f, "func{sig}"),
            Type::Struct(fields) => {
                if fields.is_empty() {
                    return write!(f, "struct{{}}");
                }
                write!(f, "struct{{ ")?;
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    if !field.names.is_empty() {
                        write!(f, "{} ", field.names.join(", "))?;
                    }
                    write!(f, "{}", field.ty.node)?;
                }
                write!(f, " }}")
            }
            Type::Interface(elems) => {
                if elems.is_empty() {
                    return write!(f, "interface{{}}");
                }
                write!(f, "interface{{ ")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    match elem {
                        InterfaceElem::Method { name, signature } => write!(f, "{}{signature}", name.node)?,
                        InterfaceElem::Embedded(ty) => write!(f, "{}", ty.node)?,
                    }
                }
                write!(f, " }}")
            }
            Type::Union(terms) => {
                for (i, term) in terms.iter().enumerate() {
                    if i > 0 {
                        write!(f, " | ")?;
                    }
                    if term.tilde {
                        write!(f, "~")?;
                    }
                    write!(f, "{}", term.ty.node)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        write_params(f, &self.params)?;
        write!(f, ")")?;
        match self.results.as_slice() {
            [] => Ok(()),
            [single] if single.names.is_empty() => write!(f, " {}", single.ty.node),
            results => {
                write!(f, " (")?;
                write_params(f, results)?;
                write!(f, ")")
            }
        }
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[ParamField]) -> fmt::Result {
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        if !p.names.is_empty() {
            write!(f, "{} ", p.names.join(", "))?;
        }
        if p.variadic {
            write!(f, "...")?;
        }
        write!(f, "{}", p.ty.node)?;
    }
    Ok(())
}

fn write_joined<'t>(
    f: &mut fmt::Formatter<'_>,
    items: impl Iterator<Item = &'t Type>,
    sep: &str,
) -> fmt::Result {
    for (i, item) in items.enumerate() {
        if i > 0 {
            write!(f, "{sep}")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}
