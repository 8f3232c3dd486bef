//! Export validation.
//!
//! A mock generated outside the declaring package can only mention what that package exports. This pass walks
//! every type the mock would print and rejects the first inaccessible one.

use std::collections::HashSet;

use syncmock_core::lang::conventions;
use syncmock_core::lang::types;

use crate::errors::GenerateError;
use crate::frontend::model::{InterfaceElemExpr, ResolvedSymbol, TypeExpr};

/// Check that every type reachable from `resolved` is accessible from its output package.
///
/// Inside the declaring package its own unexported names are fine; names from other packages (reached through
/// embedded foreign interfaces) must still be exported.
///
/// ## Errors
/// `GenerateError::UnexportedType` naming the first offending type and the method that uses it.
#[tracing::instrument(skip_all, fields(symbol = %resolved.details.name()))]
pub fn validate_exports(resolved: &ResolvedSymbol) -> Result<(), GenerateError> {
    let output_path = resolved.output.path.as_deref();
    let same_package = output_path == Some(resolved.declaring.path.as_str());

    let details = &resolved.details;
    let type_params: HashSet<&str> = details.type_params().iter().map(|p| p.name.as_str()).collect();
    let unexported = |method: &str, type_name: String| GenerateError::UnexportedType {
        type_name,
        method: method.to_string(),
        symbol: details.name().to_string(),
        package: resolved.declaring.path.clone(),
    };

    for param in details.type_params() {
        if let Some(type_name) = first_inaccessible(&param.constraint, &type_params, output_path, same_package) {
            return Err(unexported(&param.name, type_name));
        }
    }
    for method in details.methods() {
        for ty in method.types() {
            if let Some(type_name) = first_inaccessible(ty, &type_params, output_path, same_package) {
                return Err(unexported(&method.name, type_name));
            }
        }
    }
    Ok(())
}

/// The first node of `ty` (parents before children) that the output package cannot name.
fn first_inaccessible(
    ty: &TypeExpr,
    type_params: &HashSet<&str>,
    output_path: Option<&str>,
    same_package: bool,
) -> Option<String> {
    let mut found: Option<String> = None;
    ty.walk(&mut |node: &TypeExpr| {
        if found.is_some() {
            return;
        }
        found = match node {
            TypeExpr::Ident { name } => {
                let accessible = same_package
                    || types::is_predeclared(name)
                    || type_params.contains(name.as_str())
                    || conventions::is_exported(name);
                (!accessible).then(|| name.clone())
            }
            TypeExpr::Qualified { alias, path, name } => {
                let accessible = conventions::is_exported(name) || output_path == Some(path.as_str());
                (!accessible).then(|| format!("{alias}.{name}"))
            }
            TypeExpr::Struct { .. } | TypeExpr::Interface { .. } if same_package => None,
            TypeExpr::Struct { fields } => fields
                .iter()
                .flat_map(|f| f.names.iter())
                .find(|name| !conventions::is_exported(name))
                .map(|name| format!("{node} (field {name})")),
            TypeExpr::Interface { elems } => elems
                .iter()
                .find_map(|elem| match elem {
                    InterfaceElemExpr::Method { name, .. } if !conventions::is_exported(name) => Some(name),
                    _ => None,
                })
                .map(|name| format!("{node} (method {name})")),
            _ => None,
        };
    });
    found
}
