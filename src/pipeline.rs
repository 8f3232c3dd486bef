//! Generation pipeline
//!
//! Ties the stages together for one request:
//!
//! 1. resolve the target through a [`SourceLoader`]
//! 2. validate exports against the output package
//! 3. plan imports and aliases
//! 4. render the mock
//! 5. name the artifact
//!
//! Any failure aborts the run; nothing is handed to a writer unless the whole artifact rendered.

use crate::backend::artifact::{self, GeneratedArtifact};
use crate::backend::qualify::QualificationPlan;
use crate::backend::{render, validate};
use crate::config::{GenerateConfig, InvocationContext};
use crate::errors::GenerateError;
use crate::frontend::loader::SourceLoader;
use crate::frontend::model::ResolvedSymbol;
use crate::frontend::resolver::Resolver;

/// One generation request.
#[derive(Debug, Clone, Default)]
pub struct GeneratorRequest {
    /// `Name` or `pkg.Name` (a method is targeted by its name)
    pub target: String,
    /// Name of the generated mock type; defaults to the symbol name plus the configured suffix
    pub mock_name: Option<String>,
    /// Package clause of the output; defaults to the local package
    pub output_package: Option<String>,
    /// File that triggered generation
    pub source_file: Option<String>,
}

impl GeneratorRequest {
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            ..Self::default()
        }
    }

    pub fn with_mock_name(mut self, name: Option<String>) -> Self {
        self.mock_name = name.filter(|n| !n.is_empty());
        self
    }

    /// Take output package and source file from an invocation context.
    pub fn with_context(mut self, context: &InvocationContext) -> Self {
        self.output_package = context.output_package.clone();
        self.source_file = context.source_file.clone();
        self
    }
}

/// Resolve the request's target without rendering anything.
///
/// ## Errors
/// Whatever the resolver reports: `PackageNotFound`, `SymbolNotFound`, `UnsupportedEmbedding`, `Syntax`, `Io`.
pub fn resolve(request: &GeneratorRequest, loader: &dyn SourceLoader) -> Result<ResolvedSymbol, GenerateError> {
    Resolver::new(loader).resolve(
        &request.target,
        request.output_package.as_deref(),
        request.source_file.as_deref(),
    )
}

/// Run the full pipeline for `request`.
///
/// ## Errors
/// The first error of any stage.
#[tracing::instrument(skip_all, fields(target = %request.target))]
pub fn generate(
    request: &GeneratorRequest,
    loader: &dyn SourceLoader,
    config: &GenerateConfig,
) -> Result<GeneratedArtifact, GenerateError> {
    let resolved = resolve(request, loader)?;
    validate::validate_exports(&resolved)?;

    let plan = QualificationPlan::build(&resolved, &render::runtime_imports(&resolved.details));
    let mock_name = request
        .mock_name
        .clone()
        .unwrap_or_else(|| config.default_mock_name(&request.target));
    let source = render::render(&resolved, &plan, config, &mock_name)?;

    let file_name = artifact::output_file_name(&mock_name, request.source_file.as_deref(), &resolved.output.name);
    tracing::info!(file = %file_name, mock = %mock_name, "generated mock");
    Ok(GeneratedArtifact { file_name, source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::frontend::loader::MemoryLoader;

    const OPS: &str = "package app\n\ntype Ops interface {\n\tDo(a int, b string) (int, error)\n}\n";

    #[test]
    fn test_generate_defaults() {
        let loader = MemoryLoader::new("example.com/app").with_file("example.com/app", "ops.go", OPS);
        let artifact = generate(&GeneratorRequest::new("Ops"), &loader, &GenerateConfig::default()).unwrap();
        assert_eq!(artifact.file_name, "ops_imp.go");
        assert!(artifact.source.contains("type OpsImp struct {"));
        assert!(artifact.source.contains("package app\n"));
    }

    #[test]
    fn test_request_context_drives_file_name() {
        let loader = MemoryLoader::new("example.com/app").with_file("example.com/app", "ops.go", OPS);
        let context = InvocationContext::new(".")
            .with_output_package(Some("app_test".to_string()))
            .with_source_file(Some("ops_test.go".to_string()));
        let request = GeneratorRequest::new("Ops")
            .with_mock_name(Some("FakeOps".to_string()))
            .with_context(&context);
        let artifact = generate(&request, &loader, &GenerateConfig::default()).unwrap();
        assert_eq!(artifact.file_name, "ops_fake_ops_test.go");
        assert!(artifact.source.contains("package app_test\n"));
        assert!(artifact.source.contains("type FakeOps struct {"));
    }

    #[test]
    fn test_missing_symbol_stops_before_render() {
        let loader = MemoryLoader::new("example.com/app").with_file("example.com/app", "ops.go", OPS);
        let err = generate(&GeneratorRequest::new("Nope"), &loader, &GenerateConfig::default()).unwrap_err();
        assert!(matches!(err, GenerateError::SymbolNotFound { .. }));
    }
}
