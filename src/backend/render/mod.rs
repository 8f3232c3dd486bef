//! Mock rendering
//!
//! - `data.rs` - Template data: names, qualified type strings, collision handling
//! - `templates.rs` - The Go text of every generated declaration

pub mod data;
pub mod templates;

use crate::config::GenerateConfig;
use crate::errors::GenerateError;
use crate::frontend::model::{ResolvedSymbol, SymbolDetails};

use super::qualify::QualificationPlan;
use super::writer::GoWriter;

/// Standard-library packages the generated runtime always uses.
const BASE_RUNTIME_IMPORTS: &[&str] = &["sync", "testing", "time"];

/// Package providing the argument comparison of the expectation façade.
const REFLECT_IMPORT: &str = "reflect";

/// Runtime imports for `details`: `reflect` only when some method takes arguments.
pub fn runtime_imports(details: &SymbolDetails) -> Vec<&'static str> {
    let mut imports = Vec::with_capacity(BASE_RUNTIME_IMPORTS.len() + 1);
    if details.methods().iter().any(|m| !m.params.is_empty()) {
        imports.push(REFLECT_IMPORT);
    }
    imports.extend_from_slice(BASE_RUNTIME_IMPORTS);
    imports
}

/// Render the mock source for `resolved` using a plan built for it.
///
/// ## Errors
/// `GenerateError::Render` when the symbol cannot be expressed as a mock.
#[tracing::instrument(skip_all, fields(symbol = %resolved.details.name(), mock = %mock_name))]
pub fn render(
    resolved: &ResolvedSymbol,
    plan: &QualificationPlan,
    config: &GenerateConfig,
    mock_name: &str,
) -> Result<String, GenerateError> {
    let mock = data::build(resolved, plan, config, mock_name)?;
    let mut writer = GoWriter::new();
    templates::emit_file(&mut writer, &mock);

    let mut source = writer.finish();
    let trimmed = source.trim_end_matches('\n').len();
    source.truncate(trimmed);
    source.push('\n');
    tracing::debug!(bytes = source.len(), methods = mock.methods.len(), "mock rendered");
    Ok(source)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::loader::MemoryLoader;
    use crate::frontend::resolver::Resolver;

    fn render_source(source: &str, target: &str) -> String {
        let loader = MemoryLoader::new("example.com/app").with_file("example.com/app", "app.go", source);
        let resolved = Resolver::new(&loader).resolve(target, None, None).unwrap();
        let plan = QualificationPlan::build(&resolved, &runtime_imports(&resolved.details));
        let config = GenerateConfig::default();
        render(&resolved, &plan, &config, &config.default_mock_name(target)).unwrap()
    }

    #[test]
    fn test_reflect_only_with_arguments() {
        let with_args = render_source("package app\ntype X interface { Do(a int) }\n", "X");
        assert!(with_args.contains("\t\"reflect\"\n"));
        let without = render_source("package app\ntype X interface { Do() }\n", "X");
        assert!(!without.contains("reflect"));
    }

    #[test]
    fn test_file_layout() {
        let out = render_source("package app\ntype Ops interface { Do(a int, b string) (int, error) }\n", "Ops");
        assert!(out.starts_with("// Code generated by syncmock. DO NOT EDIT.\n\npackage app\n\nimport (\n"));
        assert!(out.ends_with("}\n"));
        assert!(!out.ends_with("\n\n"));
        assert!(out.contains("\tt       testing.TB\n\tcalls   chan OpsImp_Call\n"));
        assert!(out.contains("return &OpsImp{t: t, calls: make(chan OpsImp_Call, 100)}"));
        assert!(out.contains(
            "_call := &OpsImp_Do_Call{A: a, B: b, responseCh: make(chan *OpsImp_Do_Response, 1)}"
        ));
        assert!(out.contains("func (_c *OpsImp_Do_Call) InjectResults(r0 int, r1 error) {"));
        assert!(out.contains("return _c != nil && reflect.DeepEqual(_c.A, a) && reflect.DeepEqual(_c.B, b)"));
    }

    #[test]
    fn test_parameters_never_shadow_called_builtins() {
        let out = render_source("package app\ntype P interface { Run(make int, panic string, nil bool) }\n", "P");
        assert!(out.contains("func (_imp *PImp) Run(make_ int, panic_ string, nil_ bool) {"));
        assert!(out.contains(
            "_call := &PImp_Run_Call{Make: make_, Panic: panic_, Nil: nil_, responseCh: make(chan *PImp_Run_Response, 1)}"
        ));
        assert!(out.contains("reflect.DeepEqual(_c.Nil, nil_)"));
    }

    #[test]
    fn test_zero_result_method_gets_resolve() {
        let out = render_source("package app\ntype C interface { Close() }\n", "C");
        assert!(out.contains("func (_c *CImp_Close_Call) InjectResolve() {"));
        assert!(!out.contains("InjectResult("));
        assert!(out.contains("\t_impl.Close()\n\t_c.InjectResolve()\n"));
    }
}
