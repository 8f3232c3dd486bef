//! Template data for the mock renderer.
//!
//! Everything the templates print is computed here: Go type strings (already qualified), identifier names after
//! collision handling, and the generated type names. The templates only arrange text.

use std::collections::HashSet;

use syncmock_core::lang::builtins::{self, BuiltinId};
use syncmock_core::lang::conventions;
use syncmock_core::lang::types::{self, PredeclaredKind};

use crate::backend::qualify::QualificationPlan;
use crate::config::GenerateConfig;
use crate::errors::GenerateError;
use crate::frontend::model::{FieldInfo, MethodSignature, ResolvedSymbol};

/// Members of the mock struct; an interface method with one of these names cannot be generated.
pub const MOCK_MEMBERS: &[&str] = &[
    "MatchCall",
    "Call",
    "ExpectCall",
    "Timeout",
    "t",
    "calls",
    "mu",
    "pending",
    "current",
    "takePending",
];

/// Members of the expectation façade besides its per-method operations.
const EXPECT_MEMBERS: &[&str] = &["imp"];

/// Identifiers the generated method bodies declare; parameters are renamed away from them.
const BODY_LOCALS: &[&str] = &["_imp", "_e", "_c", "_m", "_call", "_resp", "_impl", "_fn"];

/// Builtins the generated method bodies refer to (`make`, `panic`, `nil`).
const BODY_BUILTINS: &[BuiltinId] = &[BuiltinId::Make, BuiltinId::Panic, BuiltinId::Nil];

/// Exported methods every call record carries besides `As<Method>`.
const CALL_ACCESSORS: &[&str] = &[
    "Name",
    "Done",
    "Forward",
    "InjectResult",
    "InjectResults",
    "InjectPanic",
    "InjectResolve",
];

/// Everything the templates need for one mock.
#[derive(Debug, Clone)]
pub struct MockData {
    pub header: String,
    pub package: String,
    /// Name of the mock type (`OpsImp`)
    pub mock_name: String,
    /// Target symbol name (`Ops`)
    pub symbol: String,
    pub is_function: bool,
    /// `[K comparable, V any]`, or empty
    pub type_params_decl: String,
    /// `[K, V]`, or empty
    pub type_args: String,
    pub dispatch_capacity: usize,
    /// Import spec lines of the runtime group
    pub runtime_imports: Vec<String>,
    /// Import spec lines required by the symbol's types
    pub type_imports: Vec<String>,
    pub methods: Vec<MethodData>,
}

impl MockData {
    /// `OpsImp[K, V]`
    pub fn mock_type(&self) -> String {
        format!("{}{}", self.mock_name, self.type_args)
    }

    /// `OpsImp_Call[K, V]`
    pub fn call_union(&self) -> String {
        format!("{}_Call{}", self.mock_name, self.type_args)
    }

    /// `OpsImp_Expect[K, V]`
    pub fn expect_type(&self) -> String {
        format!("{}_Expect{}", self.mock_name, self.type_args)
    }
}

/// One method (or the function) of the mocked symbol.
#[derive(Debug, Clone)]
pub struct MethodData {
    pub name: String,
    /// `OpsImp_Do_Call` without type arguments
    pub call_type: String,
    /// `OpsImp_Do_Response` without type arguments
    pub response_type: String,
    pub params: Vec<ParamData>,
    pub results: Vec<ResultData>,
    /// Local names of the fixed (non-variadic) arguments, in order
    pub arg_names: Vec<String>,
    /// Local name of the variadic argument
    pub variadic_arg: Option<String>,
}

impl MethodData {
    /// Fixed arguments followed by the variadic one.
    pub fn all_arg_names(&self) -> Vec<&str> {
        self.arg_names
            .iter()
            .map(String::as_str)
            .chain(self.variadic_arg.as_deref())
            .collect()
    }

    /// `(int, string)`-style parameter list with `...` on a variadic tail, used by `Forward`.
    pub fn param_types(&self) -> String {
        let types: Vec<&str> = self.params.iter().map(|p| p.decl_type.as_str()).collect();
        format!("({})", types.join(", "))
    }

    /// ` int`, ` (int, error)` or empty.
    pub fn result_types(&self) -> String {
        match self.results.as_slice() {
            [] => String::new(),
            [single] => format!(" {}", single.ty),
            many => {
                let types: Vec<&str> = many.iter().map(|r| r.ty.as_str()).collect();
                format!(" ({})", types.join(", "))
            }
        }
    }

    /// `a int, ids ...int`
    pub fn param_decls(&self) -> String {
        let decls: Vec<String> = self
            .params
            .iter()
            .map(|p| format!("{} {}", p.local, p.decl_type))
            .collect();
        decls.join(", ")
    }
}

/// A parameter as it appears in the mock method and the call record.
#[derive(Debug, Clone)]
pub struct ParamData {
    /// Name of the Go parameter in generated methods
    pub local: String,
    /// Exported call-record field
    pub field: String,
    /// Field type (`[]int` for a variadic tail)
    pub ty: String,
    /// Type as written in a parameter list (`...int` for a variadic tail)
    pub decl_type: String,
    pub variadic: bool,
}

/// A result value.
#[derive(Debug, Clone)]
pub struct ResultData {
    /// Response-record field
    pub field: String,
    pub ty: String,
}

/// Build the template data.
///
/// ## Errors
/// `GenerateError::Render` when a method name collides with a member of the mock or its façade.
pub fn build(
    resolved: &ResolvedSymbol,
    plan: &QualificationPlan,
    config: &GenerateConfig,
    mock_name: &str,
) -> Result<MockData, GenerateError> {
    let details = &resolved.details;
    let symbol = details.name().to_string();

    for method in details.methods() {
        if MOCK_MEMBERS.contains(&method.name.as_str()) || EXPECT_MEMBERS.contains(&method.name.as_str()) {
            return Err(GenerateError::render(
                symbol,
                format!("method {} collides with a member of the generated mock", method.name),
            ));
        }
    }

    let type_params = details.type_params();
    let (type_params_decl, type_args) = if type_params.is_empty() {
        (String::new(), String::new())
    } else {
        let decls: Vec<String> = type_params
            .iter()
            .map(|p| format!("{} {}", p.name, plan.render(&p.constraint)))
            .collect();
        let names: Vec<&str> = type_params.iter().map(|p| p.name.as_str()).collect();
        (format!("[{}]", decls.join(", ")), format!("[{}]", names.join(", ")))
    };

    let mut taken_locals: HashSet<String> = plan.aliases().map(str::to_string).collect();
    taken_locals.extend(BODY_LOCALS.iter().map(|s| s.to_string()));
    taken_locals.extend(BODY_BUILTINS.iter().map(|id| builtins::as_str(*id).to_string()));
    // The expectation predicate is a `func(...) bool` literal.
    taken_locals.extend(
        types::PREDECLARED_TYPES
            .iter()
            .filter(|t| t.kind == PredeclaredKind::Boolean)
            .map(|t| t.name.to_string()),
    );
    taken_locals.extend(type_params.iter().map(|p| p.name.clone()));

    let method_names: Vec<&str> = details.methods().iter().map(|m| m.name.as_str()).collect();
    let methods = details
        .methods()
        .iter()
        .map(|m| method_data(m, mock_name, plan, &method_names, &taken_locals))
        .collect();

    Ok(MockData {
        header: config.header(),
        package: resolved.output.name.clone(),
        mock_name: mock_name.to_string(),
        symbol,
        is_function: details.is_function(),
        type_params_decl,
        type_args,
        dispatch_capacity: config.dispatch_capacity,
        runtime_imports: plan.runtime_imports().iter().map(|i| i.spec()).collect(),
        type_imports: plan.imports().iter().map(|i| i.spec()).collect(),
        methods,
    })
}

fn method_data(
    method: &MethodSignature,
    mock_name: &str,
    plan: &QualificationPlan,
    method_names: &[&str],
    taken_locals: &HashSet<String>,
) -> MethodData {
    let mut reserved_fields: HashSet<String> = CALL_ACCESSORS.iter().map(|s| s.to_string()).collect();
    reserved_fields.extend(method_names.iter().map(|m| format!("As{m}")));

    let mut fields = HashSet::new();
    let mut locals = HashSet::new();
    let params: Vec<ParamData> = method
        .params
        .iter()
        .map(|p| {
            let ty = plan.render(&p.ty);
            let decl_type = if p.variadic {
                format!("...{}", plan.render(p.element_type()))
            } else {
                ty.clone()
            };
            ParamData {
                local: local_name(p, taken_locals, &mut locals),
                field: field_name(&p.name, &reserved_fields, &mut fields),
                ty,
                decl_type,
                variadic: p.variadic,
            }
        })
        .collect();

    let mut result_fields = HashSet::new();
    let no_reserved = HashSet::new();
    let results = method
        .results
        .iter()
        .map(|r| ResultData {
            field: field_name(&r.name, &no_reserved, &mut result_fields),
            ty: plan.render(&r.ty),
        })
        .collect();

    let arg_names = params.iter().filter(|p| !p.variadic).map(|p| p.local.clone()).collect();
    let variadic_arg = params.iter().find(|p| p.variadic).map(|p| p.local.clone());

    MethodData {
        name: method.name.clone(),
        call_type: format!("{mock_name}_{}_Call", method.name),
        response_type: format!("{mock_name}_{}_Response", method.name),
        params,
        results,
        arg_names,
        variadic_arg,
    }
}

/// Parameter name in generated methods; renamed with a trailing `_` when it would shadow an import or a body local.
fn local_name(field: &FieldInfo, taken: &HashSet<String>, used: &mut HashSet<String>) -> String {
    let mut name = field.name.clone();
    while taken.contains(&name) || used.contains(&name) {
        name.push('_');
    }
    used.insert(name.clone());
    name
}

/// Capitalized record field name, with a trailing `_` while it collides.
fn field_name(name: &str, reserved: &HashSet<String>, used: &mut HashSet<String>) -> String {
    let mut field = conventions::capitalize(name);
    while reserved.contains(&field) || used.contains(&field) {
        field.push('_');
    }
    used.insert(field.clone());
    field
}
