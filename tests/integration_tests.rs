//! Integration tests for the generation pipeline
//!
//! Every test drives `syncmock::pipeline::generate` end to end through the in-memory loader, so packages are plain
//! string fixtures and nothing touches the filesystem.

use syncmock::backend::{ArtifactWriter, MemoryWriter};
use syncmock::config::GenerateConfig;
use syncmock::errors::GenerateError;
use syncmock::frontend::loader::MemoryLoader;
use syncmock::pipeline::{self, GeneratorRequest};

const APP: &str = "example.com/app";

fn app(source: &str) -> MemoryLoader {
    MemoryLoader::new(APP).with_file(APP, "app.go", source)
}

fn generate(loader: &MemoryLoader, request: GeneratorRequest) -> Result<String, GenerateError> {
    pipeline::generate(&request, loader, &GenerateConfig::default()).map(|artifact| artifact.source)
}

fn generate_ok(loader: &MemoryLoader, target: &str) -> String {
    generate(loader, GeneratorRequest::new(target)).unwrap()
}

/// Lines of the Go struct `name`, without the braces.
fn struct_body<'a>(source: &'a str, name: &str) -> Vec<&'a str> {
    let header = format!("type {name} struct {{");
    source
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| *line != "}")
        .collect()
}

// ============================================================================
// Call and response records
// ============================================================================

#[test]
fn test_one_field_per_parameter_and_result() {
    let loader = app("package app\n\ntype Ops interface {\n\tDo(a int, b string) (int, error)\n\tClose()\n}\n");
    let out = generate_ok(&loader, "Ops");

    assert_eq!(
        struct_body(&out, "OpsImp_Do_Call"),
        vec![
            "\tA int",
            "\tB string",
            "",
            "\tdone       bool",
            "\tresponseCh chan *OpsImp_Do_Response",
        ]
    );
    assert_eq!(
        struct_body(&out, "OpsImp_Do_Response"),
        vec!["\tA int", "\tB error", "", "\tkind       string", "\tpanicValue interface{}"]
    );
    assert_eq!(
        struct_body(&out, "OpsImp_Close_Call"),
        vec!["\tdone       bool", "\tresponseCh chan *OpsImp_Close_Response"]
    );
}

#[test]
fn test_unnamed_parameters_get_generated_names() {
    let loader = app(
        "package app\n\n\
         type Lookup interface {\n\
         \tByName(string) bool\n\
         \tByID(int64) bool\n\
         \tPair(int, string) bool\n\
         }\n",
    );
    let out = generate_ok(&loader, "Lookup");
    assert!(out.contains("func (_imp *LookupImp) ByName(S string) bool {"));
    assert!(out.contains("func (_imp *LookupImp) ByID(I int64) bool {"));
    assert!(out.contains("func (_imp *LookupImp) Pair(A int, B string) bool {"));
}

#[test]
fn test_variadic_forward_spreads_tail() {
    let loader = app("package app\n\ntype Notifier interface {\n\tNotify(message string, ids ...int)\n}\n");
    let out = generate_ok(&loader, "Notifier");
    assert!(out.contains("func (_imp *NotifierImp) Notify(message string, ids ...int) {"));
    assert!(out.contains("\tIds     []int\n"));
    assert!(out.contains(
        "func (_c *NotifierImp_Notify_Call) Forward(_impl interface{ Notify(string, ...int) }) {\n\
         \t_impl.Notify(_c.Message, _c.Ids...)\n\
         \t_c.InjectResolve()\n"
    ));
}

#[test]
fn test_function_target() {
    let loader = app("package app\n\nfunc Fetch(url string) ([]byte, error) {\n\treturn nil, nil\n}\n");
    let out = generate_ok(&loader, "Fetch");
    assert!(out.contains("// FetchImp is a synchronized mock of the function Fetch."));
    assert!(out.contains("func (_imp *FetchImp) Fetch(url string) ([]byte, error) {"));
    assert!(out.contains("Forward(_fn func(string) ([]byte, error)) {\n\tr0, r1 := _fn(_c.Url)\n"));
}

#[test]
fn test_generic_interface() {
    let loader = app("package app\n\ntype Cache[K comparable, V any] interface {\n\tGet(key K) (V, bool)\n}\n");
    let out = generate_ok(&loader, "Cache");
    assert!(out.contains("type CacheImp[K comparable, V any] struct {"));
    assert!(out.contains("func NewCacheImp[K comparable, V any](t testing.TB) *CacheImp[K, V] {"));
    assert!(out.contains("func (_c *CacheImp_Get_Call[K, V]) InjectResults(r0 V, r1 bool) {"));
}

#[test]
fn test_renamed_receiver_type_params_stay_local() {
    let loader = app(
        "package app\n\n\
         type Pair[K comparable, V interface{ ~[]K }] struct{}\n\n\
         func (p *Pair[A, B]) Put(a A, b B) {}\n",
    );
    let request = GeneratorRequest {
        output_package: Some("app_test".to_string()),
        ..GeneratorRequest::new("Put")
    };
    let out = generate(&loader, request).unwrap();
    assert!(out.contains("type PutImp[A comparable, B interface{ ~[]A }] struct {"));
    assert!(!out.contains("app.K"));
    assert!(!out.contains("\"example.com/app\""));
}

// ============================================================================
// Qualification
// ============================================================================

#[test]
fn test_local_package_shadowing_std_name() {
    let loader = MemoryLoader::new("example.com/app/time").with_file(
        "example.com/app/time",
        "clock.go",
        "package time\n\nimport stdtime \"time\"\n\ntype Time struct{}\n\n\
         type Clock interface {\n\tNow() Time\n\tSleep(d stdtime.Duration)\n}\n",
    );
    let request = GeneratorRequest {
        output_package: Some("time_test".to_string()),
        ..GeneratorRequest::new("Clock")
    };
    let out = generate(&loader, request).unwrap();
    assert!(out.contains("func (_imp *ClockImp) Now() _time.Time {"));
    assert!(out.contains("func (_imp *ClockImp) Sleep(d time.Duration) {"));
    assert!(out.contains(
        "import (\n\t\"reflect\"\n\t\"sync\"\n\t\"testing\"\n\t\"time\"\n\n\t_time \"example.com/app/time\"\n)\n"
    ));
}

#[test]
fn test_unshadowed_import_keeps_plain_alias() {
    let loader = app("package app\n\nimport \"bytes\"\n\ntype Sink interface {\n\tWrite(b *bytes.Buffer) error\n}\n");
    let out = generate_ok(&loader, "Sink");
    assert!(out.contains("\t\"time\"\n\n\t\"bytes\"\n)"));
    assert!(out.contains("Write(b *bytes.Buffer) error {"));
}

#[test]
fn test_std_embedding_expands() {
    let loader = app("package app\n\nimport \"fmt\"\n\ntype Named interface {\n\tfmt.Stringer\n\tOwnMethod()\n}\n")
        .with_file("fmt", "print.go", "package fmt\n\ntype Stringer interface {\n\tString() string\n}\n");
    let out = generate_ok(&loader, "Named");
    assert!(out.contains("\tAsString() *NamedImp_String_Call\n\tAsOwnMethod() *NamedImp_OwnMethod_Call\n"));
    assert!(out.contains("func (_imp *NamedImp) String() string {"));
    // fmt is only needed to find the embedded interface
    assert!(!out.contains("\"fmt\""));
}

#[test]
fn test_missing_embedded_package() {
    let loader = app("package app\n\nimport \"example.com/missing\"\n\ntype Svc interface {\n\tmissing.Iface\n}\n");
    let err = generate(&loader, GeneratorRequest::new("Svc")).unwrap_err();
    assert!(matches!(err, GenerateError::PackageNotFound { .. }));
    assert!(err.to_string().contains("embedded interface"));
}

// ============================================================================
// Export validation
// ============================================================================

const STORE_WITH_PRIVATE_ROW: &str = "package app\n\ntype row struct{}\n\ntype Store interface {\n\tGet(id int) *row\n}\n";

#[test]
fn test_unexported_type_in_other_package() {
    let loader = app(STORE_WITH_PRIVATE_ROW);
    let request = GeneratorRequest {
        output_package: Some("app_test".to_string()),
        ..GeneratorRequest::new("Store")
    };
    let err = generate(&loader, request).unwrap_err();
    let GenerateError::UnexportedType {
        type_name,
        method,
        symbol,
        package,
    } = err
    else {
        panic!("Expected UnexportedType");
    };
    assert_eq!(type_name, "row");
    assert_eq!(method, "Get");
    assert_eq!(symbol, "Store");
    assert_eq!(package, APP);
}

#[test]
fn test_unexported_type_in_same_package() {
    let loader = app(STORE_WITH_PRIVATE_ROW);
    let out = generate_ok(&loader, "Store");
    assert!(out.contains("func (_imp *StoreImp) Get(id int) *row {"));
}

#[test]
fn test_expansion_precedes_validation() {
    let loader = app("package app\n\nimport \"example.com/dep\"\n\ntype Svc interface {\n\tdep.Source\n}\n").with_file(
        "example.com/dep",
        "dep.go",
        "package dep\n\ntype record struct{}\n\ntype Source interface {\n\tNext() record\n}\n",
    );
    let err = generate(&loader, GeneratorRequest::new("Svc")).unwrap_err();
    assert!(
        matches!(err, GenerateError::UnexportedType { ref type_name, ref method, .. } if type_name == "dep.record" && method == "Next"),
        "unexpected error: {err}"
    );
}

// ============================================================================
// Rendering errors and artifacts
// ============================================================================

#[test]
fn test_member_collision() {
    let loader = app("package app\n\ntype Dialer interface {\n\tMatchCall() error\n}\n");
    let err = generate(&loader, GeneratorRequest::new("Dialer")).unwrap_err();
    assert!(matches!(err, GenerateError::Render { .. }));
    insta::assert_snapshot!(err.to_string(), @"cannot render mock for Dialer: method MatchCall collides with a member of the generated mock");
}

#[test]
fn test_file_naming_and_writer() {
    let loader = app("package app\n\ntype HTTPClient interface {\n\tDo(url string) error\n}\n");
    let request = GeneratorRequest {
        output_package: Some("app_test".to_string()),
        source_file: Some("client_test.go".to_string()),
        ..GeneratorRequest::new("HTTPClient")
    };
    let artifact = pipeline::generate(&request, &loader, &GenerateConfig::default()).unwrap();
    assert_eq!(artifact.file_name, "client_http_client_imp_test.go");

    let mut writer = MemoryWriter::new();
    artifact.write_to(&mut writer).unwrap();
    let written = writer.get("client_http_client_imp_test.go").unwrap();
    assert!(std::str::from_utf8(written).unwrap().starts_with("// Code generated by syncmock. DO NOT EDIT.\n\npackage app_test\n"));
}

/// A writer that refuses everything, to show failures surface as `io::Error`.
struct ReadOnly;

impl ArtifactWriter for ReadOnly {
    fn write(&mut self, _file_name: &str, _contents: &[u8]) -> std::io::Result<()> {
        Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"))
    }
}

#[test]
fn test_writer_failure_is_reported() {
    let loader = app("package app\n\ntype Ops interface {\n\tDo()\n}\n");
    let artifact = pipeline::generate(&GeneratorRequest::new("Ops"), &loader, &GenerateConfig::default()).unwrap();
    let err = artifact.write_to(&mut ReadOnly).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::PermissionDenied);
}

#[test]
fn test_dispatch_capacity_from_config() {
    let loader = app("package app\n\ntype Ops interface {\n\tDo()\n}\n");
    let config = GenerateConfig::new().with_dispatch_capacity(7);
    let artifact = pipeline::generate(&GeneratorRequest::new("Ops"), &loader, &config).unwrap();
    assert!(artifact.source.contains("return &OpsImp{t: t, calls: make(chan OpsImp_Call, 7)}"));
}
