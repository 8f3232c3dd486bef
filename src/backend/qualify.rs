//! Type qualification for the output package.
//!
//! Rendering is two-pass. [`QualificationPlan::build`] scans every type reachable from the symbol once and decides
//! which packages the generated file imports and under which alias; [`QualificationPlan::render`] then prints types
//! using only that plan. Nothing is mutated while rendering.
//!
//! A local identifier needs a qualifier iff the output package is not the declaring package, the identifier is not
//! a type parameter, not predeclared, and exported. A qualified reference is printed bare when it points at the
//! output package itself. Aliases of the runtime imports (`reflect`, `sync`, `testing`, `time`) are reserved; a
//! planned package whose preferred alias is taken gets a `_` prefix (`_time.Time`).

use std::collections::HashSet;

use syncmock_core::lang::conventions;
use syncmock_core::lang::types;

use crate::frontend::model::{
    ChanDirection, InterfaceElemExpr, PackageRef, ResolvedSymbol, TypeExpr, TypeParamField,
};

/// An import of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedImport {
    pub alias: String,
    pub path: String,
}

impl PlannedImport {
    /// Import spec text: `"path"` when the alias is the path's last element, `alias "path"` otherwise.
    pub fn spec(&self) -> String {
        let last = self.path.rsplit('/').next().unwrap_or(&self.path);
        if last == self.alias {
            format!("\"{}\"", self.path)
        } else {
            format!("{} \"{}\"", self.alias, self.path)
        }
    }
}

/// Immutable qualification decisions for one generated file.
#[derive(Debug, Clone)]
pub struct QualificationPlan {
    /// Local identifiers of the declaring package need its qualifier
    qualify_local: bool,
    declaring: PackageRef,
    /// Import path of the output package, if importable
    output_path: Option<String>,
    type_params: HashSet<String>,
    /// Standard-library imports the generated runtime needs, alias equal to path
    runtime: Vec<PlannedImport>,
    /// Imports needed by the symbol's types, in first-use order (declaring package first)
    planned: Vec<PlannedImport>,
}

impl QualificationPlan {
    /// Scan `resolved` and plan the imports for a file that also uses `runtime_imports`.
    pub fn build(resolved: &ResolvedSymbol, runtime_imports: &[&str]) -> Self {
        let output_path = resolved.output.path.clone();
        let qualify_local = output_path.as_deref() != Some(resolved.declaring.path.as_str());
        let type_params: HashSet<String> = resolved
            .details
            .type_params()
            .iter()
            .map(|p| p.name.clone())
            .collect();

        let mut plan = Self {
            qualify_local,
            declaring: resolved.declaring.clone(),
            output_path,
            type_params,
            runtime: runtime_imports
                .iter()
                .map(|path| PlannedImport {
                    alias: conventions::default_import_alias(path),
                    path: (*path).to_string(),
                })
                .collect(),
            planned: Vec::new(),
        };

        // Pass 1: which packages are referenced, in first-use order.
        let mut needs_declaring = false;
        let mut foreign: Vec<(String, String)> = Vec::new();
        let mut visit = |ty: &TypeExpr| match ty {
            TypeExpr::Ident { name } if plan.needs_local_qualifier(name) => needs_declaring = true,
            TypeExpr::Qualified { alias, path, .. } => {
                if plan.output_path.as_deref() != Some(path.as_str()) && !foreign.iter().any(|(_, p)| p == path) {
                    foreign.push((alias.clone(), path.clone()));
                }
            }
            _ => {}
        };
        for ty in referenced_types(resolved) {
            ty.walk(&mut visit);
        }

        // Pass 2: assign aliases.
        if needs_declaring {
            let declaring = plan.declaring.clone();
            plan.plan_import(&declaring.name, &declaring.path);
        }
        for (alias, path) in foreign {
            plan.plan_import(&alias, &path);
        }
        plan
    }

    fn needs_local_qualifier(&self, name: &str) -> bool {
        self.qualify_local
            && !self.type_params.contains(name)
            && !types::is_predeclared(name)
            && conventions::is_exported(name)
    }

    /// Reuse an existing import of `path`, or add one under `preferred` (prefixed with `_` until unique).
    fn plan_import(&mut self, preferred: &str, path: &str) {
        if self.alias_for(path).is_some() {
            return;
        }
        let mut alias = preferred.to_string();
        let mut n = 0;
        while self.alias_taken(&alias) {
            alias = if n == 0 {
                format!("_{preferred}")
            } else {
                format!("_{preferred}{n}")
            };
            n += 1;
        }
        if alias != preferred {
            tracing::debug!(%preferred, %alias, %path, "import alias disambiguated");
        }
        self.planned.push(PlannedImport {
            alias,
            path: path.to_string(),
        });
    }

    fn alias_taken(&self, alias: &str) -> bool {
        self.type_params.contains(alias) || self.all_imports().any(|i| i.alias == alias)
    }

    fn all_imports(&self) -> impl Iterator<Item = &PlannedImport> {
        self.runtime.iter().chain(&self.planned)
    }

    /// Alias under which the generated file imports `path`.
    pub fn alias_for(&self, path: &str) -> Option<&str> {
        self.all_imports().find(|i| i.path == path).map(|i| i.alias.as_str())
    }

    /// Standard-library imports of the generated runtime.
    pub fn runtime_imports(&self) -> &[PlannedImport] {
        &self.runtime
    }

    /// Imports required by the symbol's types.
    pub fn imports(&self) -> &[PlannedImport] {
        &self.planned
    }

    /// Every alias the generated file uses; generated identifiers must not shadow them.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.all_imports().map(|i| i.alias.as_str())
    }

    /// Print `ty` as it must appear in the output package.
    pub fn render(&self, ty: &TypeExpr) -> String {
        render_type(ty, &mut |leaf: &TypeExpr| match leaf {
            TypeExpr::Ident { name } if self.needs_local_qualifier(name) => {
                let alias = self.alias_for(&self.declaring.path).unwrap_or(&self.declaring.name);
                format!("{alias}.{name}")
            }
            TypeExpr::Ident { name } => name.clone(),
            TypeExpr::Qualified { name, path, .. } if self.output_path.as_deref() == Some(path.as_str()) => {
                name.clone()
            }
            TypeExpr::Qualified { alias, path, name } => {
                format!("{}.{name}", self.alias_for(path).unwrap_or(alias))
            }
            _ => String::new(),
        })
    }
}

/// Every type the generated file prints: parameters, results and type-parameter constraints.
fn referenced_types(resolved: &ResolvedSymbol) -> impl Iterator<Item = &TypeExpr> {
    resolved
        .details
        .type_params()
        .iter()
        .map(|p| &p.constraint)
        .chain(resolved.details.methods().iter().flat_map(|m| m.types()))
}

/// Print a type in Go syntax, delegating names (`Ident` and `Qualified` nodes) to `leaf`.
pub fn render_type(ty: &TypeExpr, leaf: &mut dyn FnMut(&TypeExpr) -> String) -> String {
    let mut out = String::new();
    write_type(&mut out, ty, leaf);
    out
}

fn write_type(out: &mut String, ty: &TypeExpr, leaf: &mut dyn FnMut(&TypeExpr) -> String) {
    match ty {
        TypeExpr::Ident { .. } | TypeExpr::Qualified { .. } => out.push_str(&leaf(ty)),
        TypeExpr::Pointer { elem } => {
            out.push('*');
            write_type(out, elem, leaf);
        }
        TypeExpr::Slice { elem } => {
            out.push_str("[]");
            write_type(out, elem, leaf);
        }
        TypeExpr::Array { len, elem } => {
            out.push('[');
            out.push_str(len);
            out.push(']');
            write_type(out, elem, leaf);
        }
        TypeExpr::Map { key, value } => {
            out.push_str("map[");
            write_type(out, key, leaf);
            out.push(']');
            write_type(out, value, leaf);
        }
        TypeExpr::Chan { dir, elem } => {
            out.push_str(match dir {
                ChanDirection::Both => "chan ",
                ChanDirection::Send => "chan<- ",
                ChanDirection::Recv => "<-chan ",
            });
            // `chan (<-chan T)` needs parentheses to keep its meaning.
            let needs_parens = *dir == ChanDirection::Both
                && matches!(elem.as_ref(), TypeExpr::Chan { dir: ChanDirection::Recv, .. });
            if needs_parens {
                out.push('(');
            }
            write_type(out, elem, leaf);
            if needs_parens {
                out.push(')');
            }
        }
        TypeExpr::Func { params, results } => {
            out.push_str("func");
            write_signature(out, params, results, leaf);
        }
        TypeExpr::Generic { base, args } => {
            write_type(out, base, leaf);
            out.push('[');
            for (i, arg) in args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_type(out, arg, leaf);
            }
            out.push(']');
        }
        TypeExpr::Struct { fields } => {
            if fields.is_empty() {
                out.push_str("struct{}");
                return;
            }
            out.push_str("struct{ ");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if !field.names.is_empty() {
                    out.push_str(&field.names.join(", "));
                    out.push(' ');
                }
                write_type(out, &field.ty, leaf);
                if let Some(tag) = &field.tag {
                    out.push(' ');
                    out.push_str(&quote_tag(tag));
                }
            }
            out.push_str(" }");
        }
        TypeExpr::Interface { elems } => {
            if elems.is_empty() {
                out.push_str("interface{}");
                return;
            }
            out.push_str("interface{ ");
            for (i, elem) in elems.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                match elem {
                    InterfaceElemExpr::Method { name, params, results } => {
                        out.push_str(name);
                        write_signature(out, params, results, leaf);
                    }
                    InterfaceElemExpr::Embedded { ty } => write_type(out, ty, leaf),
                }
            }
            out.push_str(" }");
        }
        TypeExpr::Union { terms } => {
            for (i, term) in terms.iter().enumerate() {
                if i > 0 {
                    out.push_str(" | ");
                }
                if term.tilde {
                    out.push('~');
                }
                write_type(out, &term.ty, leaf);
            }
        }
    }
}

fn write_signature(
    out: &mut String,
    params: &[TypeParamField],
    results: &[TypeParamField],
    leaf: &mut dyn FnMut(&TypeExpr) -> String,
) {
    out.push('(');
    write_fields(out, params, leaf);
    out.push(')');
    match results {
        [] => {}
        [single] if single.names.is_empty() => {
            out.push(' ');
            write_type(out, &single.ty, leaf);
        }
        _ => {
            out.push_str(" (");
            write_fields(out, results, leaf);
            out.push(')');
        }
    }
}

fn write_fields(out: &mut String, fields: &[TypeParamField], leaf: &mut dyn FnMut(&TypeExpr) -> String) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        if !field.names.is_empty() {
            out.push_str(&field.names.join(", "));
            out.push(' ');
        }
        if field.variadic {
            out.push_str("...");
        }
        write_type(out, &field.ty, leaf);
    }
}

/// Struct tags are printed as raw strings unless they contain a backquote.
fn quote_tag(tag: &str) -> String {
    if tag.contains('`') {
        format!("{tag:?}")
    } else {
        format!("`{tag}`")
    }
}
