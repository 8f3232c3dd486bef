#[cfg(test)]
/// Parser unit tests.
///
/// These tests focus on the declaration forms a mock generator depends on and on the parser’s
/// error recovery behavior (avoiding cascaded errors).
mod tests {
    use super::*;

    fn parse_str(source: &str) -> Result<SourceFile, Vec<CompileError>> {
        parse_source(source)
    }

    fn only_type(file: &SourceFile) -> &TypeSpec {
        match &file.declarations[0].node {
            Declaration::Type(t) => t,
            other => panic!("Expected type declaration, got {other:?}"),
        }
    }

    fn only_func(file: &SourceFile) -> &FuncDecl {
        match &file.declarations[0].node {
            Declaration::Func(f) => f,
            other => panic!("Expected function declaration, got {other:?}"),
        }
    }

    fn methods(ty: &Type) -> Vec<(String, String)> {
        match ty {
            Type::Interface(elems) => elems
                .iter()
                .filter_map(|e| match e {
                    InterfaceElem::Method { name, signature } => Some((name.node.clone(), signature.to_string())),
                    InterfaceElem::Embedded(_) => None,
                })
                .collect(),
            other => panic!("Expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_imports() {
        let source = r#"
package store

import "context"
import (
    "fmt"
    io2 "io"
    _ "embed"
    . "strings"
)
"#;
        let file = parse_str(source).unwrap();
        assert_eq!(file.package.node, "store");
        let imports: Vec<_> = file
            .imports
            .iter()
            .map(|i| (i.node.alias.clone(), i.node.path.as_str()))
            .collect();
        assert_eq!(
            imports,
            vec![
                (None, "context"),
                (None, "fmt"),
                (Some("io2".to_string()), "io"),
                (Some("_".to_string()), "embed"),
                (Some(".".to_string()), "strings"),
            ]
        );
    }

    #[test]
    fn test_parse_interface_methods() {
        let source = r#"
package store

type Store interface {
    Get(ctx context.Context, key string) ([]byte, error)
    Put(key string, value []byte) error
    Keys(prefix string, limit int, opts ...Option) <-chan string
    Close()
}
"#;
        let file = parse_str(source).unwrap();
        let spec = only_type(&file);
        assert_eq!(spec.name.node, "Store");
        assert_eq!(
            methods(&spec.ty.node),
            vec![
                ("Get".to_string(), "(ctx context.Context, key string) ([]byte, error)".to_string()),
                ("Put".to_string(), "(key string, value []byte) error".to_string()),
                ("Keys".to_string(), "(prefix string, limit int, opts ...Option) <-chan string".to_string()),
                ("Close".to_string(), "()".to_string()),
            ]
        );
    }

    #[test]
    fn test_grouped_parameter_names() {
        let file = parse_str("package a\nfunc F(a, b int, c string) (n int, err error) {}\n").unwrap();
        let func = only_func(&file);
        assert_eq!(func.signature.params.len(), 2);
        assert_eq!(func.signature.params[0].names, vec!["a", "b"]);
        assert_eq!(func.signature.params[1].names, vec!["c"]);
        assert_eq!(func.signature.results[1].names, vec!["err"]);
        assert!(func.has_body);
    }

    #[test]
    fn test_unnamed_params_stay_unnamed() {
        let file = parse_str("package a\ntype F func(int, string, pkg.T, List[int]) bool\n").unwrap();
        match &only_type(&file).ty.node {
            Type::Func(sig) => {
                assert_eq!(sig.params.len(), 4);
                assert!(sig.params.iter().all(|p| p.names.is_empty()));
                assert_eq!(sig.params[3].ty.node.to_string(), "List[int]");
            }
            other => panic!("Expected func type, got {other:?}"),
        }
    }

    #[test]
    fn test_named_array_and_slice_params() {
        let file = parse_str("package a\nfunc F(a []int, b [4]int, m map[string][]byte) {}\n").unwrap();
        let func = only_func(&file);
        assert_eq!(func.signature.to_string(), "(a []int, b [4]int, m map[string][]byte)");
    }

    #[test]
    fn test_mixed_named_and_unnamed_is_rejected() {
        let err = parse_str("package a\nfunc F(a int, string) {}\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].message.contains("Mixed named and unnamed"));
    }

    #[test]
    fn test_generic_type_declaration() {
        let source = "package a\ntype Cache[K comparable, V any] interface {\n\tGet(K) (V, bool)\n}\n";
        let file = parse_str(source).unwrap();
        let spec = only_type(&file);
        assert_eq!(spec.type_params.len(), 2);
        assert_eq!(spec.type_params[0].names, vec!["K"]);
        assert_eq!(spec.type_params[1].constraint.node, Type::Name("any".to_string()));
    }

    #[test]
    fn test_array_type_is_not_type_params() {
        let file = parse_str("package a\nconst N = 4\ntype Buf [N]byte\n").unwrap();
        let spec = only_type(&file);
        assert!(spec.type_params.is_empty());
        assert_eq!(spec.ty.node.to_string(), "[N]byte");
    }

    #[test]
    fn test_constraint_unions() {
        let file = parse_str("package a\ntype Number interface {\n\t~int | ~int64 | float64\n}\n").unwrap();
        match &only_type(&file).ty.node {
            Type::Interface(elems) => match &elems[0] {
                InterfaceElem::Embedded(ty) => assert_eq!(ty.node.to_string(), "~int | ~int64 | float64"),
                other => panic!("Expected union, got {other:?}"),
            },
            other => panic!("Expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_embedded_interfaces() {
        let source = "package a\ntype RW interface {\n\tio.Reader\n\tWriter\n\tfmt.Stringer\n}\n";
        let file = parse_str(source).unwrap();
        match &only_type(&file).ty.node {
            Type::Interface(elems) => {
                let embedded: Vec<String> = elems
                    .iter()
                    .map(|e| match e {
                        InterfaceElem::Embedded(ty) => ty.node.to_string(),
                        InterfaceElem::Method { name, .. } => name.node.clone(),
                    })
                    .collect();
                assert_eq!(embedded, vec!["io.Reader", "Writer", "fmt.Stringer"]);
            }
            other => panic!("Expected interface, got {other:?}"),
        }
    }

    #[test]
    fn test_struct_fields_and_tags() {
        let source = r#"
package a

type Row struct {
    sync.Mutex
    *Base
    ID, Seq int64 `json:"id"`
    Items []Item
    Fixed [2]int
    Page[int]
    cb func(err error)
}
"#;
        let file = parse_str(source).unwrap();
        match &only_type(&file).ty.node {
            Type::Struct(fields) => {
                assert_eq!(fields.len(), 7);
                assert!(fields[0].is_embedded());
                assert!(fields[1].is_embedded());
                assert_eq!(fields[2].names, vec!["ID", "Seq"]);
                assert_eq!(fields[2].tag.as_deref(), Some(r#"json:"id""#));
                assert_eq!(fields[3].names, vec!["Items"]);
                assert_eq!(fields[4].ty.node.to_string(), "[2]int");
                assert!(fields[5].is_embedded());
                assert_eq!(fields[6].ty.node.to_string(), "func(err error)");
            }
            other => panic!("Expected struct, got {other:?}"),
        }
    }

    #[test]
    fn test_channel_directions() {
        let file = parse_str("package a\ntype T func(a chan int, b chan<- int, c <-chan int)\n").unwrap();
        assert_eq!(
            only_type(&file).ty.node.to_string(),
            "func(a chan int, b chan<- int, c <-chan int)"
        );
    }

    #[test]
    fn test_method_with_generic_receiver() {
        let file = parse_str("package a\nfunc (s *Stack[T]) Push(v T) { s.items = append(s.items, v) }\n").unwrap();
        let func = only_func(&file);
        let receiver = func.receiver.as_ref().unwrap();
        assert_eq!(receiver.name.as_deref(), Some("s"));
        assert_eq!(receiver.ty.node.to_string(), "*Stack[T]");
    }

    #[test]
    fn test_generic_function() {
        let file = parse_str("package a\nfunc Map[T, U any](xs []T, f func(T) U) []U { return nil }\n").unwrap();
        let func = only_func(&file);
        assert_eq!(func.type_params[0].names, vec!["T", "U"]);
        assert_eq!(func.signature.results[0].ty.node.to_string(), "[]U");
    }

    #[test]
    fn test_bodies_and_values_are_skipped() {
        let source = r#"
package a

var (
    x = func() int { return 1 }()
    y = map[string]int{"a": 1}
)

const Limit = 10

func Helper() {
    if x > 0 {
        for i := range []int{1, 2} { _ = i }
    }
}

type After interface{ Ping() }
"#;
        let file = parse_str(source).unwrap();
        let names: Vec<&str> = file.declarations.iter().map(|d| d.node.name()).collect();
        assert_eq!(names, vec!["Helper", "After"]);
    }

    #[test]
    fn test_grouped_type_declarations() {
        let source = "package a\ntype (\n\tA int\n\tB = string\n)\n";
        let file = parse_str(source).unwrap();
        assert_eq!(file.declarations.len(), 2);
        match &file.declarations[1].node {
            Declaration::Type(t) => assert!(t.is_alias),
            other => panic!("Expected type, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_package_clause() {
        let err = parse_str("type X int\n").unwrap_err();
        assert_eq!(err.len(), 1);
        assert!(err[0].message.contains("Expected package clause"));
        assert!(!err[0].hints.is_empty());
    }

    #[test]
    fn test_error_recovery_reports_each_broken_declaration() {
        let source = "package a\ntype = int\nfunc Ok() {}\ntype Y interface { M( }\ntype Z int\n";
        let err = parse_str(source).unwrap_err();
        assert_eq!(err.len(), 2, "one error per broken declaration, got {err:?}");
    }

    #[test]
    fn test_import_after_declaration() {
        let err = parse_str("package a\ntype X int\nimport \"fmt\"\n").unwrap_err();
        assert!(err[0].message.contains("Imports must appear before"));
    }
}
