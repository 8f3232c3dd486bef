//! Symbol resolution
//!
//! Turns a target name (`Store`, `store.Store`, `example.com/app/store.Store`) into a [`ResolvedSymbol`]:
//! locate the package, find the interface or function declaration, expand embedded interfaces (local and foreign)
//! and normalize every signature.
//!
//! ## Usage
//!
//! ```rust
//! use syncmock::frontend::loader::MemoryLoader;
//! use syncmock::frontend::resolver::Resolver;
//!
//! let loader = MemoryLoader::new("example.com/app").with_file(
//!     "example.com/app",
//!     "ops.go",
//!     "package app\ntype Ops interface { Do(a int, b string) (int, error) }\n",
//! );
//! let resolved = Resolver::new(&loader).resolve("Ops", None, None).unwrap();
//! assert_eq!(resolved.details.methods()[0].name, "Do");
//! assert!(resolved.same_package);
//! ```

use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use syncmock_core::lang::conventions::LOCAL_IMPORT_PATH;
use syncmock_core::lang::types::{self, PredeclaredKind};
use syncmock_syntax::ast::{Declaration, FuncDecl, InterfaceElem, Signature, Type, TypeSpec};

use super::imports::ImportTable;
use super::loader::{LoadedFile, LoadedPackage, SourceLoader};
use super::lower::LowerContext;
use super::model::{
    FieldInfo, MethodSignature, OutputPackage, PackageRef, ResolvedSymbol, SymbolDetails, TypeExpr, TypeParam,
};
use super::signature::{self, normalize_signature};
use crate::errors::GenerateError;

/// Resolves target symbols through a [`SourceLoader`], caching loaded packages.
pub struct Resolver<'l> {
    loader: &'l dyn SourceLoader,
    packages: HashMap<String, Rc<LoadedPackage>>,
}

/// Where an interface declaration was found.
struct InterfaceSite {
    package: Rc<LoadedPackage>,
    file: usize,
    spec: TypeSpec,
}

/// Shared state of one interface expansion.
struct Expansion<'s> {
    /// Target symbol name, for error messages
    symbol: &'s str,
    /// Interface type parameters; visible to every expanded method
    scope: &'s [TypeParam],
    methods: Vec<MethodSignature>,
    /// `(package path, interface name)` pairs already expanded
    visited: HashSet<(String, String)>,
}

impl<'l> Resolver<'l> {
    pub fn new(loader: &'l dyn SourceLoader) -> Self {
        Self {
            loader,
            packages: HashMap::new(),
        }
    }

    /// Resolve `target` for generation into `output_package` (defaults to the local package).
    ///
    /// `source_file` names the file that triggered generation; its imports take precedence when the target's
    /// qualifier is looked up.
    ///
    /// ## Errors
    /// - `PackageNotFound` when the qualifier or an embedded interface's package cannot be loaded.
    /// - `SymbolNotFound` when the package declares neither an interface nor a function of that name.
    /// - `UnsupportedEmbedding` for embedded elements other than `Name` or `pkg.Name`.
    #[tracing::instrument(skip(self))]
    pub fn resolve(
        &mut self,
        target: &str,
        output_package: Option<&str>,
        source_file: Option<&str>,
    ) -> Result<ResolvedSymbol, GenerateError> {
        let local = self.package(LOCAL_IMPORT_PATH)?;

        let (package, name) = match target.rsplit_once('.') {
            None => (Rc::clone(&local), target),
            Some((qualifier, name)) => {
                let path = lookup_qualifier(&local, qualifier, source_file).unwrap_or(qualifier);
                tracing::debug!(%qualifier, %path, "resolved target qualifier");
                let path = path.to_string();
                let package = self.package(&path).map_err(|e| match e {
                    GenerateError::PackageNotFound { path, .. } => GenerateError::PackageNotFound {
                        path,
                        context: format!("qualifier of target {target}"),
                    },
                    other => other,
                })?;
                (package, name)
            }
        };

        let details = self.find_symbol(&package, name)?;

        let output_name = output_package.unwrap_or(&local.name).to_string();
        let output = OutputPackage {
            path: (output_name == local.name).then(|| local.path.clone()),
            name: output_name,
        };
        let same_package = package.path == local.path && output.name == local.name;
        if !same_package && package.path == LOCAL_IMPORT_PATH {
            tracing::warn!(
                package = %package.name,
                "declaring package has no import path (no go.mod); the generated file cannot import it"
            );
        }

        tracing::debug!(
            symbol = %details.name(),
            methods = details.methods().len(),
            declaring = %package.path,
            output = %output.name,
            same_package,
            "symbol resolved"
        );
        Ok(ResolvedSymbol {
            details,
            declaring: package.package_ref(),
            output,
            same_package,
        })
    }

    /// Load (or fetch from cache) the package at `path`.
    fn package(&mut self, path: &str) -> Result<Rc<LoadedPackage>, GenerateError> {
        if let Some(package) = self.packages.get(path) {
            return Ok(Rc::clone(package));
        }
        let package = Rc::new(self.loader.load(path)?);
        self.packages.insert(path.to_string(), Rc::clone(&package));
        self.packages
            .entry(package.path.clone())
            .or_insert_with(|| Rc::clone(&package));
        Ok(package)
    }

    fn find_symbol(&mut self, package: &Rc<LoadedPackage>, name: &str) -> Result<SymbolDetails, GenerateError> {
        if let Some(site) = find_interface(package, name) {
            return self.interface_details(site, name);
        }
        if let Some((file, func)) = find_function(package, name) {
            return Ok(function_details(package, file, func));
        }

        let interface_check = match find_type(package, name) {
            Some(spec) => format!("type {name} is declared as `{}`, not as an interface", spec.ty.node),
            None => format!("no interface type named {name}"),
        };
        let function_check = format!("no function or method named {name}");
        Err(GenerateError::SymbolNotFound {
            symbol: name.to_string(),
            package: package.path.clone(),
            interface_check,
            function_check,
        })
    }

    fn interface_details(&mut self, site: InterfaceSite, symbol: &str) -> Result<SymbolDetails, GenerateError> {
        let file = &site.package.files[site.file];
        let param_names: Vec<&str> = site
            .spec
            .type_params
            .iter()
            .flat_map(|d| d.names.iter().map(String::as_str))
            .collect();
        let ctx = LowerContext::new(&file.imports).with_type_params(param_names.iter().copied());
        let type_params = signature::lower_type_params(&site.spec.type_params, &ctx);

        let mut expansion = Expansion {
            symbol,
            scope: &type_params,
            methods: Vec::new(),
            visited: HashSet::new(),
        };
        expansion
            .visited
            .insert((site.package.path.clone(), site.spec.name.node.clone()));
        self.expand(&site.package, site.file, &site.spec, &ctx, None, &mut expansion)?;

        Ok(SymbolDetails::Interface {
            name: site.spec.name.node.clone(),
            methods: expansion.methods,
            type_params,
            imports: file.imports.clone(),
        })
    }

    /// Append the method set of the interface `spec` (declared in `package`) to `expansion`.
    ///
    /// `foreign` is set when `package` is not the declaring package of the target; declared names are then
    /// qualified with it.
    fn expand(
        &mut self,
        package: &Rc<LoadedPackage>,
        file: usize,
        spec: &TypeSpec,
        ctx: &LowerContext<'_>,
        foreign: Option<&PackageRef>,
        expansion: &mut Expansion<'_>,
    ) -> Result<(), GenerateError> {
        let Type::Interface(elems) = &spec.ty.node else {
            return Ok(());
        };

        for elem in elems {
            match elem {
                InterfaceElem::Method { name, signature } => {
                    push_method(expansion, &name.node, signature, ctx);
                }
                InterfaceElem::Embedded(embedded) => match &embedded.node {
                    Type::Name(name) => self.expand_local(package, file, name, foreign, expansion)?,
                    Type::Qualified { package: alias, name } => {
                        self.expand_foreign(&package.files[file].imports, alias, name, expansion)?
                    }
                    other => {
                        return Err(GenerateError::UnsupportedEmbedding {
                            symbol: expansion.symbol.to_string(),
                            package: package.path.clone(),
                            embedded: other.to_string(),
                        });
                    }
                },
            }
        }
        Ok(())
    }

    /// Expand an unqualified embedding: a predeclared interface or an interface of the same package.
    fn expand_local(
        &mut self,
        package: &Rc<LoadedPackage>,
        file: usize,
        name: &str,
        foreign: Option<&PackageRef>,
        expansion: &mut Expansion<'_>,
    ) -> Result<(), GenerateError> {
        match types::kind_of(name) {
            Some(PredeclaredKind::Error) => {
                push_error_method(expansion);
                return Ok(());
            }
            Some(PredeclaredKind::Constraint) => return Ok(()),
            Some(_) => {
                return Err(GenerateError::UnsupportedEmbedding {
                    symbol: expansion.symbol.to_string(),
                    package: package.path.clone(),
                    embedded: name.to_string(),
                });
            }
            None => {}
        }

        if !expansion.visited.insert((package.path.clone(), name.to_string())) {
            tracing::debug!(interface = %name, "embedding cycle cut");
            return Ok(());
        }

        let Some(site) = find_interface(package, name) else {
            let interface_check = match find_type(package, name) {
                Some(spec) => format!("embedded {name} is declared as `{}`, not as an interface", spec.ty.node),
                None => format!("no interface type named {name} embedded by {}", expansion.symbol),
            };
            return Err(GenerateError::SymbolNotFound {
                symbol: name.to_string(),
                package: package.path.clone(),
                interface_check,
                function_check: "functions cannot be embedded".to_string(),
            });
        };
        tracing::debug!(interface = %name, from_file = file, "expanding local embedded interface");

        let imports = &site.package.files[site.file].imports;
        let ctx = LowerContext::new(imports).with_type_params(expansion.scope.iter().map(|p| p.name.as_str()));
        let ctx = match foreign {
            Some(package) => ctx.qualifying(package),
            None => ctx,
        };
        self.expand(&site.package, site.file, &site.spec, &ctx, foreign, expansion)
    }

    /// Expand `alias.Name` embedded in a file whose imports are `imports`.
    fn expand_foreign(
        &mut self,
        imports: &ImportTable,
        alias: &str,
        name: &str,
        expansion: &mut Expansion<'_>,
    ) -> Result<(), GenerateError> {
        let context = format!("embedded interface {alias}.{name} in {}", expansion.symbol);
        let Some(path) = imports.path_for(alias) else {
            return Err(GenerateError::PackageNotFound {
                path: alias.to_string(),
                context,
            });
        };
        let package = self.package(path).map_err(|e| match e {
            GenerateError::PackageNotFound { path, .. } => GenerateError::PackageNotFound {
                path,
                context: context.clone(),
            },
            other => other,
        })?;

        if !expansion.visited.insert((package.path.clone(), name.to_string())) {
            tracing::debug!(interface = %name, package = %package.path, "embedding cycle cut");
            return Ok(());
        }

        let Some(site) = find_interface(&package, name) else {
            return Err(GenerateError::SymbolNotFound {
                symbol: name.to_string(),
                package: package.path.clone(),
                interface_check: format!("no interface type named {name} ({context})"),
                function_check: "functions cannot be embedded".to_string(),
            });
        };
        tracing::debug!(interface = %name, package = %package.path, "expanding foreign embedded interface");

        let foreign = package.package_ref();
        let imports = &site.package.files[site.file].imports;
        let ctx = LowerContext::new(imports)
            .with_type_params(expansion.scope.iter().map(|p| p.name.as_str()))
            .qualifying(&foreign);
        self.expand(&site.package, site.file, &site.spec, &ctx, Some(&foreign), expansion)
    }
}

/// Add a method unless one of that name is already present (first occurrence wins).
fn push_method(expansion: &mut Expansion<'_>, name: &str, signature: &Signature, ctx: &LowerContext<'_>) {
    if expansion.methods.iter().any(|m| m.name == name) {
        tracing::debug!(method = %name, "duplicate method from embedding ignored");
        return;
    }
    let method = normalize_signature(name, signature, Vec::new(), expansion.scope, ctx);
    expansion.methods.push(method);
}

/// The predeclared `error` interface contributes `Error() string`.
fn push_error_method(expansion: &mut Expansion<'_>) {
    if expansion.methods.iter().any(|m| m.name == types::ERROR_METHOD) {
        return;
    }
    let string = TypeExpr::ident("string");
    let name = signature::generated_name(0, &string, 1);
    expansion.methods.push(MethodSignature {
        name: types::ERROR_METHOD.to_string(),
        params: Vec::new(),
        results: vec![FieldInfo {
            name,
            ty: string,
            index: 0,
            variadic: false,
            explicit: false,
        }],
        type_params: Vec::new(),
        variadic: false,
    });
}

/// Import path behind `qualifier`, consulting the triggering file first and then every other file.
fn lookup_qualifier<'p>(local: &'p LoadedPackage, qualifier: &str, source_file: Option<&str>) -> Option<&'p str> {
    let first = source_file.and_then(|name| local.file(name));
    first
        .into_iter()
        .chain(local.files.iter())
        .find_map(|file| file.imports.path_for(qualifier))
}

fn type_specs(package: &LoadedPackage) -> impl Iterator<Item = (usize, &TypeSpec)> {
    package.files.iter().enumerate().flat_map(|(i, file)| {
        file.ast.declarations.iter().filter_map(move |decl| match &decl.node {
            Declaration::Type(spec) => Some((i, spec)),
            Declaration::Func(_) => None,
        })
    })
}

fn find_type<'p>(package: &'p LoadedPackage, name: &str) -> Option<&'p TypeSpec> {
    type_specs(package).map(|(_, spec)| spec).find(|spec| spec.name.node == name)
}

fn find_interface(package: &Rc<LoadedPackage>, name: &str) -> Option<InterfaceSite> {
    type_specs(package)
        .find(|(_, spec)| spec.name.node == name && matches!(spec.ty.node, Type::Interface(_)))
        .map(|(file, spec)| InterfaceSite {
            package: Rc::clone(package),
            file,
            spec: spec.clone(),
        })
}

fn find_function<'p>(package: &'p LoadedPackage, name: &str) -> Option<(&'p LoadedFile, &'p FuncDecl)> {
    package.files.iter().find_map(|file| {
        file.ast.declarations.iter().find_map(|decl| match &decl.node {
            Declaration::Func(func) if func.name.node == name => Some((file, func)),
            _ => None,
        })
    })
}

fn function_details(package: &LoadedPackage, file: &LoadedFile, func: &FuncDecl) -> SymbolDetails {
    let base_ctx = LowerContext::new(&file.imports);

    let mut type_params = func
        .receiver
        .as_ref()
        .map(|recv| receiver_type_params(package, &recv.ty.node, &base_ctx))
        .unwrap_or_default();
    let own_names: Vec<&str> = func
        .type_params
        .iter()
        .flat_map(|d| d.names.iter().map(String::as_str))
        .collect();
    let all_names: Vec<String> = type_params
        .iter()
        .map(|p| p.name.clone())
        .chain(own_names.iter().map(|n| n.to_string()))
        .collect();

    let ctx = base_ctx.with_type_params(all_names.iter().map(String::as_str));
    type_params.extend(signature::lower_type_params(&func.type_params, &ctx));

    let receiver = func.receiver.as_ref().map(|recv| ctx.lower(&recv.ty.node));
    let scope = type_params.clone();
    let signature = normalize_signature(&func.name.node, &func.signature, type_params, &scope, &ctx);

    SymbolDetails::Function {
        signature,
        receiver,
        imports: file.imports.clone(),
    }
}

/// Type parameters introduced by a generic receiver (`func (l *List[T]) ...`).
///
/// Constraints come from the receiver type's declaration by position, falling back to `any`. The receiver may
/// rename the declared parameters (`func (p *Pair[A, B])` for `type Pair[K, V ...]`), so declared names inside the
/// constraints are rewritten to the receiver's names.
fn receiver_type_params(package: &LoadedPackage, receiver: &Type, ctx: &LowerContext<'_>) -> Vec<TypeParam> {
    let base = match receiver {
        Type::Pointer(elem) => &elem.node,
        other => other,
    };
    let Type::Generic { base, args } = base else {
        return Vec::new();
    };
    let receiver_names: Vec<Option<&str>> = args
        .iter()
        .map(|arg| match &arg.node {
            Type::Name(name) => Some(name.as_str()),
            _ => None,
        })
        .collect();

    let declared: Vec<TypeParam> = match &base.node {
        Type::Name(name) => find_type(package, name)
            .map(|spec| {
                let own = spec.type_params.iter().flat_map(|d| d.names.iter().map(String::as_str));
                let decl_ctx = ctx.clone().with_type_params(own);
                signature::lower_type_params(&spec.type_params, &decl_ctx)
            })
            .unwrap_or_default(),
        _ => Vec::new(),
    };
    let renames: HashMap<String, String> = declared
        .iter()
        .zip(&receiver_names)
        .filter_map(|(p, name)| name.map(|n| (p.name.clone(), n.to_string())))
        .filter(|(from, to)| from != to)
        .collect();

    receiver_names
        .iter()
        .enumerate()
        .filter_map(|(i, name)| {
            let name = (*name)?;
            let constraint = match declared.get(i) {
                Some(p) => {
                    let mut constraint = p.constraint.clone();
                    constraint.rename_idents(&renames);
                    constraint
                }
                None => TypeExpr::ident("any"),
            };
            Some(TypeParam {
                name: name.to_string(),
                constraint,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::loader::MemoryLoader;

    const APP: &str = "example.com/app";

    fn loader(source: &str) -> MemoryLoader {
        MemoryLoader::new(APP).with_file(APP, "app.go", source)
    }

    fn method_names(resolved: &ResolvedSymbol) -> Vec<&str> {
        resolved.details.methods().iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn test_local_interface() {
        let loader = loader("package app\ntype Ops interface { Do(a int, b string) (int, error); Close() }\n");
        let resolved = Resolver::new(&loader).resolve("Ops", None, None).unwrap();
        assert_eq!(method_names(&resolved), vec!["Do", "Close"]);
        assert_eq!(resolved.declaring.path, APP);
        assert_eq!(resolved.output.path.as_deref(), Some(APP));
        assert!(resolved.same_package);
    }

    #[test]
    fn test_local_embedding_and_error() {
        let loader = loader(
            "package app\n\
             type Closer interface { Close() error }\n\
             type Store interface { Closer; error; Get(key string) ([]byte, error); Close() error }\n",
        );
        let resolved = Resolver::new(&loader).resolve("Store", None, None).unwrap();
        assert_eq!(method_names(&resolved), vec!["Close", "Error", "Get"]);
        let error = &resolved.details.methods()[1];
        assert_eq!(error.results[0].name, "S");
    }

    #[test]
    fn test_embedding_cycle_is_cut() {
        let loader = loader(
            "package app\n\
             type A interface { B; Fa() }\n\
             type B interface { A; Fb() }\n",
        );
        let resolved = Resolver::new(&loader).resolve("A", None, None).unwrap();
        assert_eq!(method_names(&resolved), vec!["Fb", "Fa"]);
    }

    #[test]
    fn test_foreign_embedding_is_qualified() {
        let loader = loader("package app\nimport \"example.com/dep\"\ntype Svc interface { dep.Source; Run() }\n")
            .with_file(
                "example.com/dep",
                "dep.go",
                "package dep\ntype Row struct{}\ntype Source interface { Next() (*Row, bool) }\n",
            );
        let resolved = Resolver::new(&loader).resolve("Svc", None, None).unwrap();
        assert_eq!(method_names(&resolved), vec!["Next", "Run"]);
        let next = &resolved.details.methods()[0];
        assert_eq!(next.results[0].ty.to_string(), "*dep.Row");
        assert_eq!(next.results[1].ty, TypeExpr::ident("bool"));
    }

    #[test]
    fn test_missing_embedded_package() {
        let loader = loader("package app\nimport \"example.com/gone\"\ntype Svc interface { gone.Thing }\n");
        let err = Resolver::new(&loader).resolve("Svc", None, None).unwrap_err();
        assert!(matches!(err, GenerateError::PackageNotFound { .. }));
        assert!(err.to_string().contains("embedded interface"));
    }

    #[test]
    fn test_unsupported_embedding() {
        let loader = loader("package app\ntype Num interface { ~int | ~float64 }\n");
        let err = Resolver::new(&loader).resolve("Num", None, None).unwrap_err();
        assert!(matches!(err, GenerateError::UnsupportedEmbedding { .. }));
    }

    #[test]
    fn test_symbol_not_found_distinguishes_checks() {
        let loader = loader("package app\ntype Row struct{}\n");
        let err = Resolver::new(&loader).resolve("Row", None, None).unwrap_err();
        let GenerateError::SymbolNotFound {
            interface_check,
            function_check,
            ..
        } = err
        else {
            panic!("Expected SymbolNotFound");
        };
        assert!(interface_check.contains("not as an interface"));
        assert!(function_check.contains("no function or method named Row"));
    }

    #[test]
    fn test_qualified_target_uses_source_file_imports() {
        let loader = MemoryLoader::new(APP)
            .with_file(APP, "a.go", "package app\nimport st \"example.com/other/store\"\n")
            .with_file(APP, "b.go", "package app\nimport st \"example.com/store\"\n")
            .with_file("example.com/store", "s.go", "package store\ntype Store interface { Get() }\n")
            .with_file("example.com/other/store", "s.go", "package store\ntype Other interface{}\n");
        let resolved = Resolver::new(&loader).resolve("st.Store", None, Some("b.go")).unwrap();
        assert_eq!(resolved.declaring.path, "example.com/store");
        assert!(!resolved.same_package);
    }

    #[test]
    fn test_qualified_target_falls_back_to_path() {
        let loader = loader("package app\n").with_file("fmt", "print.go", "package fmt\ntype Stringer interface { String() string }\n");
        let resolved = Resolver::new(&loader).resolve("fmt.Stringer", None, None).unwrap();
        assert_eq!(resolved.declaring.name, "fmt");

        let err = Resolver::new(&loader).resolve("nope.Thing", None, None).unwrap_err();
        assert!(matches!(err, GenerateError::PackageNotFound { ref path, .. } if path == "nope"));
    }

    #[test]
    fn test_functions_and_generic_receivers() {
        let loader = loader(
            "package app\n\
             type List[T comparable] struct{}\n\
             func (l *List[T]) Push(v T, more ...T) bool { return true }\n\
             func Fetch(url string) ([]byte, error) { return nil, nil }\n",
        );
        let mut resolver = Resolver::new(&loader);

        let push = resolver.resolve("Push", None, None).unwrap();
        assert!(push.details.is_function());
        let params = push.details.type_params();
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "T");
        assert_eq!(params[0].constraint, TypeExpr::ident("comparable"));
        let SymbolDetails::Function { receiver, .. } = &push.details else {
            panic!("Expected function");
        };
        assert_eq!(receiver.as_ref().map(ToString::to_string).as_deref(), Some("*List[T]"));

        let fetch = resolver.resolve("Fetch", None, None).unwrap();
        assert_eq!(fetch.details.methods()[0].params[0].name, "url");
    }

    #[test]
    fn test_renamed_receiver_type_params() {
        let loader = loader(
            "package app\n\
             type Pair[K comparable, V interface{ ~[]K }] struct{}\n\
             func (p *Pair[A, B]) Put(a A, b B) {}\n",
        );
        let put = Resolver::new(&loader).resolve("Put", Some("app_test"), None).unwrap();
        let params = put.details.type_params();
        let rendered: Vec<String> = params.iter().map(|p| format!("{} {}", p.name, p.constraint)).collect();
        assert_eq!(rendered, vec!["A comparable", "B interface{ ~[]A }"]);
    }

    #[test]
    fn test_interfaces_preferred_over_functions() {
        let loader = loader("package app\nfunc Ops() {}\ntype Ops interface { Do() }\n");
        let resolved = Resolver::new(&loader).resolve("Ops", None, None).unwrap();
        assert!(!resolved.details.is_function());
    }

    #[test]
    fn test_external_test_package_output() {
        let loader = loader("package app\ntype Ops interface { Do() }\n");
        let resolved = Resolver::new(&loader).resolve("Ops", Some("app_test"), None).unwrap();
        assert!(!resolved.same_package);
        assert_eq!(resolved.output.name, "app_test");
        assert_eq!(resolved.output.path, None);
    }
}
